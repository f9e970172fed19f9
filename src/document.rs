//! Document source resolution.
//!
//! A document is identified by a URL string. `http://` and `https://` URLs
//! are fetched over the network; `file://` URLs and anything else are read
//! from the local filesystem.

use crate::error::DocumentError;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use url::Url;

/// Upper bound on remote document size (64 MiB).
pub const MAX_REMOTE_BYTES: u64 = 64 * 1024 * 1024;

/// Where a document's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Fetched over HTTP(S)
    Remote(String),
    /// Read from disk
    Local(PathBuf),
}

impl DocumentSource {
    /// Classifies a document URL.
    pub fn parse(url: &str) -> Self {
        let trimmed = url.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DocumentSource::Remote(trimmed.to_string())
        } else if lower.starts_with("file://") {
            DocumentSource::Local(file_url_path(trimmed))
        } else {
            DocumentSource::Local(PathBuf::from(trimmed))
        }
    }

    /// Reads the full document into memory.
    pub fn fetch(&self) -> Result<Vec<u8>, DocumentError> {
        let bytes = match self {
            DocumentSource::Remote(url) => fetch_remote(url)?,
            DocumentSource::Local(path) => std::fs::read(path)?,
        };

        if bytes.is_empty() {
            return Err(DocumentError::EmptyDocument(self.to_string()));
        }

        tracing::debug!(source = %self, bytes = bytes.len(), "document fetched");
        Ok(bytes)
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Remote(url) => f.write_str(url),
            DocumentSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

fn fetch_remote(url: &str) -> Result<Vec<u8>, DocumentError> {
    let response = ureq::get(url).call().map_err(|e| DocumentError::Fetch {
        url: url.to_string(),
        reason: match e {
            ureq::Error::Status(code, _) => format!("HTTP status {}", code),
            ureq::Error::Transport(transport) => transport.to_string(),
        },
    })?;

    read_capped(response.into_reader(), url, MAX_REMOTE_BYTES)
}

/// Reads at most `limit` bytes; a longer body is an error, not a truncated document.
fn read_capped(reader: impl Read, url: &str, limit: u64) -> Result<Vec<u8>, DocumentError> {
    let mut bytes = Vec::new();
    reader.take(limit + 1).read_to_end(&mut bytes)?;
    if bytes.len() as u64 > limit {
        return Err(DocumentError::Fetch {
            url: url.to_string(),
            reason: format!("document exceeds the {} byte limit", limit),
        });
    }
    Ok(bytes)
}

/// Converts a `file://` URL to a path, decoding percent escapes.
fn file_url_path(url: &str) -> PathBuf {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.to_file_path().ok())
        .unwrap_or_else(|| PathBuf::from(&url["file://".len()..]))
}

/// Writes a downloaded copy of the document to `path`.
pub fn save_copy(bytes: &[u8], path: &Path) -> Result<(), DocumentError> {
    std::fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "document saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_remote_urls() {
        assert_eq!(
            DocumentSource::parse("https://example.com/cv.pdf"),
            DocumentSource::Remote("https://example.com/cv.pdf".to_string())
        );
        assert_eq!(
            DocumentSource::parse("  HTTP://example.com/cv.pdf "),
            DocumentSource::Remote("HTTP://example.com/cv.pdf".to_string())
        );
    }

    #[test]
    fn test_parse_local_paths() {
        assert_eq!(
            DocumentSource::parse("file:///tmp/cv.pdf"),
            DocumentSource::Local(PathBuf::from("/tmp/cv.pdf"))
        );
        assert_eq!(
            DocumentSource::parse("assets/cv.pdf"),
            DocumentSource::Local(PathBuf::from("assets/cv.pdf"))
        );
    }

    #[test]
    fn test_parse_file_url_decodes_escapes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("My CV.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let url = Url::from_file_path(&path).unwrap();
        assert!(url.as_str().contains("My%20CV.pdf"));

        let source = DocumentSource::parse(url.as_str());
        assert_eq!(source, DocumentSource::Local(path));
        assert_eq!(source.fetch().unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn test_parse_file_url_with_localhost() {
        assert_eq!(
            DocumentSource::parse("file://localhost/tmp/cv.pdf"),
            DocumentSource::Local(PathBuf::from("/tmp/cv.pdf"))
        );
    }

    /// Serves one HTTP response with `body` and returns the URL to fetch it.
    fn serve_once(body: Vec<u8>) -> String {
        use std::io::{BufRead, BufReader, Write};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap_or(0) > 0 && line != "\r\n" {
                line.clear();
            }
            let mut stream = reader.into_inner();
            let header = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/pdf\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            // The client hangs up early on oversize bodies.
            let _ = stream.write_all(header.as_bytes());
            let _ = stream.write_all(&body);
        });
        format!("http://{}/cv.pdf", addr)
    }

    #[test]
    fn test_fetch_remote_document() {
        let url = serve_once(b"%PDF-1.7 remote".to_vec());
        let source = DocumentSource::parse(&url);
        assert!(matches!(source, DocumentSource::Remote(_)));
        assert_eq!(source.fetch().unwrap(), b"%PDF-1.7 remote");
    }

    #[test]
    fn test_fetch_remote_over_limit_is_rejected() {
        let url = serve_once(vec![0u8; MAX_REMOTE_BYTES as usize + 1]);
        match DocumentSource::parse(&url).fetch() {
            Err(DocumentError::Fetch { reason, .. }) => assert!(reason.contains("limit")),
            other => panic!("expected Fetch error, got {:?}", other.map(|bytes| bytes.len())),
        }
    }

    #[test]
    fn test_read_capped_accepts_exact_limit() {
        let bytes = read_capped(&b"12345678"[..], "mem", 8).unwrap();
        assert_eq!(bytes.len(), 8);
        assert!(matches!(
            read_capped(&b"123456789"[..], "mem", 8),
            Err(DocumentError::Fetch { .. })
        ));
    }

    #[test]
    fn test_fetch_missing_file_is_io_error() {
        let source = DocumentSource::parse("/definitely/not/here/cv.pdf");
        assert!(matches!(source.fetch(), Err(DocumentError::Io(_))));
    }

    #[test]
    fn test_fetch_empty_file_is_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let source = DocumentSource::Local(file.path().to_path_buf());
        assert!(matches!(source.fetch(), Err(DocumentError::EmptyDocument(_))));
    }

    #[test]
    fn test_save_copy_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("Roshan_Kern_CV.pdf");
        save_copy(b"%PDF-1.4", &target).unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), b"%PDF-1.4");
    }
}

//! Landing-page profile configuration.
//!
//! A profile names the page owner, lists their external links, and points
//! at the résumé document shown in the viewer. Profiles are JSON files;
//! every field is optional and falls back to the built-in defaults.

use crate::error::ProfileError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const PROFILE_DIR: &str = "cvpage";
const PROFILE_FILE: &str = "profile.json";

/// An external link shown under the name heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileLink {
    pub label: String,
    pub url: String,
}

impl ProfileLink {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// The document opened by the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// URL or path of the PDF
    pub url: String,
    /// Heading shown in the viewer header
    pub title: String,
    /// Filename suggested when downloading
    pub download_name: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            url: "assets/Roshan_Kern_CV.pdf".to_string(),
            title: "Roshan Kern - CV".to_string(),
            download_name: "Roshan_Kern_CV.pdf".to_string(),
        }
    }
}

/// Complete landing-page configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub links: Vec<ProfileLink>,
    pub document: DocumentConfig,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Roshan Kern".to_string(),
            links: vec![
                ProfileLink::new("github.com/roshankern", "https://github.com/roshankern"),
                ProfileLink::new("linkedin.com/in/roshan-kern", "https://linkedin.com/in/roshan-kern"),
            ],
            document: DocumentConfig::default(),
        }
    }
}

impl Profile {
    /// Loads a profile from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let text = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ProfileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Default per-user profile location, e.g. `~/.config/cvpage/profile.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROFILE_DIR).join(PROFILE_FILE))
    }

    /// Resolves the profile to use at startup.
    ///
    /// An explicit path must load. Otherwise the per-user file is used when
    /// present and valid, and the built-in profile when not.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ProfileError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path().filter(|path| path.is_file()) {
            Some(path) => Self::load(&path).or_else(|e| {
                tracing::warn!("ignoring user profile: {}", e);
                Ok(Self::default())
            }),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_matches_landing_page() {
        let profile = Profile::default();
        assert_eq!(profile.name, "Roshan Kern");
        assert_eq!(profile.links.len(), 2);
        assert_eq!(profile.document.download_name, "Roshan_Kern_CV.pdf");
        assert_eq!(profile.document.title, "Roshan Kern - CV");
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let profile = Profile::from_json(r#"{ "name": "Ada", "document": { "url": "https://a.dev/cv.pdf" } }"#).unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.document.url, "https://a.dev/cv.pdf");
        assert_eq!(profile.document.download_name, "Roshan_Kern_CV.pdf");
        assert_eq!(profile.links, Profile::default().links);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Profile::load(&path), Err(ProfileError::Parse { .. })));
    }

    #[test]
    fn test_explicit_missing_profile_is_error() {
        let result = Profile::resolve(Some(Path::new("/no/such/profile.json")));
        assert!(matches!(result, Err(ProfileError::Io { .. })));
    }
}

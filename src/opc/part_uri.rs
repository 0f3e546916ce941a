//! Part URI handling for OPC packages

use crate::error::{Error, Result};
use std::fmt;

/// Represents a URI to a part within an OPC package.
///
/// Part URIs are always absolute paths starting with '/'.
/// Example: `/word/settings.xml`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PartUri {
    path: String,
}

impl PartUri {
    /// Create a new PartUri from a string.
    ///
    /// The path will be normalized (leading '/' ensured, no trailing '/').
    pub fn new(path: &str) -> Result<Self> {
        let path = path.trim();

        if path.is_empty() {
            return Err(Error::InvalidPartUri("empty path".into()));
        }

        // Normalize: ensure leading '/', remove trailing '/'
        let normalized = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        let normalized = normalized.trim_end_matches('/').to_string();

        // "/" and "///" normalize to nothing
        if normalized.is_empty() {
            return Err(Error::InvalidPartUri(format!("invalid path '{}'", path)));
        }

        if normalized.contains("//") {
            return Err(Error::InvalidPartUri(format!(
                "invalid path '{}': contains double slashes",
                path
            )));
        }

        Ok(Self { path: normalized })
    }

    /// Create PartUri without validation (for internal use)
    pub(crate) fn from_string_unchecked(path: String) -> Self {
        Self { path }
    }

    /// Get the path as a string slice
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Get the entry name inside the ZIP container (no leading '/').
    ///
    /// For `/word/settings.xml`, returns `word/settings.xml`
    pub fn zip_name(&self) -> &str {
        &self.path[1..]
    }

    /// Get the file name portion
    pub fn file_name(&self) -> Option<&str> {
        self.path.rsplit('/').next()
    }
}

impl fmt::Display for PartUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

impl std::str::FromStr for PartUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PartUri::new(s)
    }
}

/// Well-known part URIs
pub mod well_known {
    use super::PartUri;

    /// The document settings part (`w:settings`).
    pub fn settings() -> PartUri {
        PartUri::from_string_unchecked("/word/settings.xml".into())
    }

    /// The review comments part (`w:comments`).
    pub fn comments() -> PartUri {
        PartUri::from_string_unchecked("/word/comments.xml".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_leading_slash() {
        let uri = PartUri::new("/word/settings.xml").unwrap();
        assert_eq!(uri.as_str(), "/word/settings.xml");
    }

    #[test]
    fn test_new_without_leading_slash() {
        let uri = PartUri::new("word/settings.xml").unwrap();
        assert_eq!(uri.as_str(), "/word/settings.xml");
    }

    #[test]
    fn test_rejects_empty() {
        assert!(PartUri::new("  ").is_err());
    }

    #[test]
    fn test_rejects_double_slashes() {
        assert!(PartUri::new("/word//settings.xml").is_err());
    }

    #[test]
    fn test_rejects_bare_slashes() {
        assert!(PartUri::new("/").is_err());
        assert!(PartUri::new("///").is_err());
    }

    #[test]
    fn test_zip_name() {
        let uri = PartUri::new("/word/comments.xml").unwrap();
        assert_eq!(uri.zip_name(), "word/comments.xml");
    }

    #[test]
    fn test_file_name() {
        let uri = PartUri::new("/word/settings.xml").unwrap();
        assert_eq!(uri.file_name(), Some("settings.xml"));
    }

    #[test]
    fn test_well_known() {
        assert_eq!(well_known::settings().as_str(), "/word/settings.xml");
        assert_eq!(well_known::comments().as_str(), "/word/comments.xml");
    }
}

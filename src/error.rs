//! Error types for docx-redline

use std::path::PathBuf;
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("invalid XML: {0}")]
    InvalidXml(String),

    #[error("invalid part URI: {0}")]
    InvalidPartUri(String),

    /// A required archive entry is missing.
    #[error("can't access {0}")]
    PartNotFound(String),

    /// An archive entry could not be decoded as XML.
    #[error("error reading {part}: {detail}")]
    PartRead { part: String, detail: String },

    /// An archive entry could not be re-encoded.
    #[error("error saving {part}: {detail}")]
    PartWrite { part: String, detail: String },

    /// The settings part has no document root to attach the marker to.
    #[error("no root element in {0}")]
    NoRootElement(String),

    /// The comments part holds zero comment elements.
    #[error("no comments found in {0}")]
    NoComments(String),

    /// Deanonymization was asked to load an alias file that does not exist.
    #[error("can't load authors: no alias file at {}", .0.display())]
    AliasFileMissing(PathBuf),

    /// The alias file exists but is unreadable or not a flat string map.
    #[error("can't load authors from {}: {detail}", .path.display())]
    AliasFileInvalid { path: PathBuf, detail: String },

    /// The alias mapping could not be persisted after the XML edit landed.
    #[error("can't save authors to {}: {detail}", .path.display())]
    AliasFileWrite { path: PathBuf, detail: String },

    /// The session was not opened from a file path, so there is no default
    /// alias path to derive and no destination for an in-place save.
    #[error("document has no backing file path")]
    NoDocumentPath,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

//! Part representation in OPC packages

use crate::opc::PartUri;
use zip::CompressionMethod;

/// A part within an OPC package.
///
/// Holds the raw bytes of one ZIP entry together with the container
/// metadata needed to write the entry back unchanged.
#[derive(Clone, Debug)]
pub struct Part {
    uri: PartUri,
    data: Vec<u8>,
    compression: CompressionMethod,
    last_modified: Option<zip::DateTime>,
    modified: bool,
}

impl Part {
    /// Create a new part with the given URI and data
    pub fn new(uri: PartUri, data: Vec<u8>) -> Self {
        Self {
            uri,
            data,
            compression: CompressionMethod::Deflated,
            last_modified: None,
            modified: false,
        }
    }

    /// Get the part URI
    pub fn uri(&self) -> &PartUri {
        &self.uri
    }

    /// Get the part data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the compression method the entry was stored with
    pub fn compression(&self) -> CompressionMethod {
        self.compression
    }

    pub(crate) fn set_compression(&mut self, method: CompressionMethod) {
        self.compression = method;
    }

    /// Get the entry's recorded modification time, if any
    pub fn last_modified(&self) -> Option<zip::DateTime> {
        self.last_modified
    }

    pub(crate) fn set_last_modified(&mut self, when: Option<zip::DateTime>) {
        self.last_modified = when;
    }

    /// Replace the part data, marking the part as modified
    pub fn set_data(&mut self, data: Vec<u8>) {
        self.data = data;
        self.modified = true;
    }

    /// Check if the part has been modified since loading
    pub fn is_modified(&self) -> bool {
        self.modified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_part_is_unmodified() {
        let uri = PartUri::new("/word/settings.xml").unwrap();
        let part = Part::new(uri, b"<w:settings/>".to_vec());
        assert!(!part.is_modified());
        assert_eq!(part.data(), b"<w:settings/>");
    }

    #[test]
    fn test_set_data_marks_modified() {
        let uri = PartUri::new("/word/settings.xml").unwrap();
        let mut part = Part::new(uri, Vec::new());
        part.set_data(b"<w:settings/>".to_vec());
        assert!(part.is_modified());
    }
}

//! Document session - open a DOCX, apply edits, save it back.

use crate::alias::{self, AliasTable};
use crate::comments;
use crate::error::{Error, Result};
use crate::opc::{well_known, Package, PartUri};
use crate::revisions::{self, TrackChangesStatus};
use crate::xml::XmlDocument;
use std::path::{Path, PathBuf};

/// An open DOCX document.
///
/// Edits land in the in-memory package; nothing touches disk until
/// [`Docx::save`] or [`Docx::save_as`].
#[derive(Clone, Debug)]
pub struct Docx {
    /// Underlying OPC package
    package: Package,
    /// Backing file, when opened from one
    path: Option<PathBuf>,
}

impl Docx {
    /// Open a document from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let package = Package::open(path)?;
        Ok(Self {
            package,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a document from bytes. The document has no backing path,
    /// so alias files must be addressed explicitly.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let package = Package::from_bytes(bytes)?;
        Ok(Self {
            package,
            path: None,
        })
    }

    /// Wrap an already-open package.
    pub fn from_package(package: Package) -> Self {
        Self {
            package,
            path: None,
        }
    }

    /// The backing file path, when the document was opened from one.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The underlying OPC package.
    pub fn package(&self) -> &Package {
        &self.package
    }

    /// Write the document back to its backing file.
    pub fn save(&self) -> Result<()> {
        match &self.path {
            Some(path) => self.package.save(path),
            None => Err(Error::NoDocumentPath),
        }
    }

    /// Write the document to a new file, which becomes the backing
    /// file for later saves.
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.package.save(path)?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Serialize the document to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.package.to_bytes()
    }

    /// Force change tracking on by ensuring `word/settings.xml`
    /// carries a `w:trackRevisions` marker.
    ///
    /// Returns [`TrackChangesStatus::AlreadyEnabled`] without writing
    /// anything when the marker is already present, so repeated calls
    /// leave the document byte-for-byte unchanged.
    pub fn enable_tracked_changes(&mut self) -> Result<TrackChangesStatus> {
        let uri = well_known::settings();
        let mut doc = self.get_xml(&uri)?;

        if revisions::has_marker(&doc) {
            log::debug!("change tracking already enabled");
            return Ok(TrackChangesStatus::AlreadyEnabled);
        }

        let root = doc
            .root_mut()
            .ok_or_else(|| Error::NoRootElement(uri.zip_name().to_string()))?;
        revisions::append_marker(root);

        self.save_xml(&doc, &uri)?;
        log::debug!("change tracking enabled");
        Ok(TrackChangesStatus::Enabled)
    }

    /// Anonymize comment authors, writing the alias table to the
    /// default side file (document path with a `.json` extension).
    pub fn anonymize_comments(&mut self) -> Result<AliasTable> {
        let alias_path = self.default_alias_path()?;
        self.anonymize_comments_to(alias_path)
    }

    /// Anonymize comment authors, writing the alias table to the
    /// given path.
    ///
    /// Every `w:comment` author in `word/comments.xml` is replaced by
    /// `Author1`, `Author2`, ... in first-seen document order. The
    /// part edit lands before the table is persisted; if persisting
    /// fails, the returned error names the alias path and the comment
    /// edit is kept.
    pub fn anonymize_comments_to<P: AsRef<Path>>(&mut self, alias_path: P) -> Result<AliasTable> {
        let uri = well_known::comments();
        let mut doc = self.get_xml(&uri)?;

        if comments::comment_count(&doc) == 0 {
            return Err(Error::NoComments(uri.zip_name().to_string()));
        }

        let table = comments::anonymize_authors(&mut doc);
        self.save_xml(&doc, &uri)?;

        table.save(alias_path.as_ref())?;
        log::debug!("anonymized {} distinct comment authors", table.len());
        Ok(table)
    }

    /// Restore comment authors from the default alias file.
    pub fn deanonymize_comments(&mut self) -> Result<usize> {
        let alias_path = self.default_alias_path()?;
        self.deanonymize_comments_from(alias_path)
    }

    /// Restore comment authors from the alias table at the given
    /// path. Authors that are not known aliases stay as they are.
    /// Returns the number of restored attributes.
    pub fn deanonymize_comments_from<P: AsRef<Path>>(&mut self, alias_path: P) -> Result<usize> {
        let alias_path = alias_path.as_ref();
        let table = AliasTable::load(alias_path)?;
        if table.is_empty() {
            return Err(Error::AliasFileInvalid {
                path: alias_path.to_path_buf(),
                detail: "empty mapping".into(),
            });
        }

        let uri = well_known::comments();
        let mut doc = self.get_xml(&uri)?;
        let restored = comments::restore_authors(&mut doc, &table);
        self.save_xml(&doc, &uri)?;

        log::debug!("restored {} comment authors", restored);
        Ok(restored)
    }

    fn default_alias_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(alias::default_alias_path(path)),
            None => Err(Error::NoDocumentPath),
        }
    }

    fn get_xml(&self, uri: &PartUri) -> Result<XmlDocument> {
        let part = self
            .package
            .part(uri)
            .ok_or_else(|| Error::PartNotFound(uri.zip_name().to_string()))?;

        XmlDocument::parse(part.data()).map_err(|e| Error::PartRead {
            part: uri.zip_name().to_string(),
            detail: e.to_string(),
        })
    }

    fn save_xml(&mut self, doc: &XmlDocument, uri: &PartUri) -> Result<()> {
        let data = doc.to_bytes().map_err(|e| Error::PartWrite {
            part: uri.zip_name().to_string(),
            detail: e.to_string(),
        })?;

        match self.package.part_mut(uri) {
            Some(part) => {
                part.set_data(data);
                Ok(())
            }
            None => Err(Error::PartNotFound(uri.zip_name().to_string())),
        }
    }
}

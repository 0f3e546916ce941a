//! # docx-redline
//!
//! Review-workflow edits for DOCX files.
//!
//! ## Features
//!
//! - Force change tracking on (idempotent, no-op when already enabled)
//! - Anonymize comment authors to `Author1`, `Author2`, ... with a
//!   JSON alias file that makes the substitution reversible
//! - Byte-preserving round trips: untouched parts and untouched XML
//!   regions come back exactly as they went in
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docx_redline::{Docx, TrackChangesStatus};
//!
//! // Force change tracking on
//! let mut doc = Docx::open("report.docx")?;
//! if doc.enable_tracked_changes()? == TrackChangesStatus::Enabled {
//!     doc.save()?;
//! }
//!
//! // Anonymize comment authors; the mapping lands in report.json
//! let mut doc = Docx::open("report.docx")?;
//! doc.anonymize_comments()?;
//! doc.save()?;
//!
//! // Later, restore the real names from report.json
//! let mut doc = Docx::open("report.docx")?;
//! doc.deanonymize_comments()?;
//! doc.save()?;
//! ```

pub mod alias;
pub mod comments;
pub mod docx;
pub mod error;
pub mod opc;
pub mod revisions;
pub mod xml;

pub use alias::{default_alias_path, AliasTable};
pub use docx::Docx;
pub use error::{Error, Result};
pub use opc::{Package, Part, PartUri};
pub use revisions::TrackChangesStatus;

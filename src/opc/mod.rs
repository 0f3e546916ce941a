//! Open Packaging Conventions (OPC) support.
//!
//! DOCX files are OPC packages: ZIP containers whose entries are
//! addressed by part URI. This module reads a package into memory,
//! hands out parts for editing, and writes the container back while
//! preserving entry order and per-entry metadata.

mod package;
mod part;
mod part_uri;

pub use package::Package;
pub use part::Part;
pub use part_uri::{well_known, PartUri};

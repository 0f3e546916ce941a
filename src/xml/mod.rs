//! XML parsing and serialization with exact round-trip preservation

mod dom;
mod namespace;

pub use dom::{XmlDocument, XmlElement, XmlNode};
pub use namespace::*;

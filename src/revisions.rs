//! Track-revisions marker handling for the settings part.

use crate::xml::{XmlDocument, XmlElement, XmlNode, W};
use std::fmt;

/// Outcome of forcing change tracking on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackChangesStatus {
    /// The marker was appended and the settings part rewritten.
    Enabled,
    /// The marker was already present; no write occurred.
    AlreadyEnabled,
}

impl fmt::Display for TrackChangesStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackChangesStatus::Enabled => write!(f, "change tracking enabled"),
            TrackChangesStatus::AlreadyEnabled => write!(f, "no change needed"),
        }
    }
}

/// Check whether a `trackRevisions` marker exists anywhere in the
/// settings document.
pub fn has_marker(doc: &XmlDocument) -> bool {
    match doc.root() {
        Some(root) => {
            root.local_name() == "trackRevisions"
                || root.find_descendant("trackRevisions").is_some()
        }
        None => false,
    }
}

/// Append an empty `w:trackRevisions` element as the root's last
/// child. The namespace declaration rides on the marker itself when
/// the root does not bind the `w` prefix.
pub fn append_marker(root: &mut XmlElement) {
    let mut marker = XmlElement::new_empty("w:trackRevisions");
    if root.attr("xmlns:w").is_none() {
        marker.set_attr("xmlns:w", W);
    }
    root.push_child(XmlNode::Element(marker));
}

//! Comment-author rewriting for the comments part.
//!
//! Anonymization walks `w:comment` elements in document order and
//! swaps each author name for its alias; deanonymization applies the
//! inverse mapping. Everything else on a comment passes through
//! untouched.

use crate::alias::AliasTable;
use crate::xml::{XmlDocument, XmlElement};
use std::collections::HashMap;

/// Number of comment elements in the part, at any depth.
pub fn comment_count(doc: &XmlDocument) -> usize {
    let mut count = 0;
    visit_comments(doc, &mut |_| count += 1);
    count
}

/// Replace each comment's author with a run-scoped alias, assigning
/// aliases in document order. Returns the completed table.
pub fn anonymize_authors(doc: &mut XmlDocument) -> AliasTable {
    let mut table = AliasTable::new();
    visit_comments_mut(doc, &mut |comment| {
        if let Some((key, author)) = author_entry(comment) {
            let alias = table.alias_for(&author);
            comment.set_attr(key, &alias);
        }
    });
    table
}

/// Swap aliases back to real names using the inverted table; comments
/// whose author is not a known alias are left alone. Returns the
/// number of rewritten attributes.
pub fn restore_authors(doc: &mut XmlDocument, aliases: &AliasTable) -> usize {
    // Invert alias -> name; on duplicate aliases the later entry wins.
    let mut names: HashMap<&str, &str> = HashMap::new();
    for (name, alias) in aliases.iter() {
        names.insert(alias, name);
    }

    let mut restored = 0;
    visit_comments_mut(doc, &mut |comment| {
        if let Some((key, current)) = author_entry(comment) {
            if let Some(name) = names.get(current.as_str()).copied() {
                comment.set_attr(key, name);
                restored += 1;
            }
        }
    });
    restored
}

/// The author attribute carried by a comment, with the attribute name
/// it uses. Comments without one are skipped by both directions.
fn author_entry(comment: &XmlElement) -> Option<(&'static str, String)> {
    for key in ["w:author", "author"] {
        if let Some(value) = comment.attr(key) {
            return Some((key, value.to_string()));
        }
    }
    None
}

fn visit_comments(doc: &XmlDocument, visit: &mut impl FnMut(&XmlElement)) {
    if let Some(root) = doc.root() {
        if root.local_name() == "comment" {
            visit(root);
        }
        root.for_each_descendant(&mut |element| {
            if element.local_name() == "comment" {
                visit(element);
            }
        });
    }
}

fn visit_comments_mut(doc: &mut XmlDocument, visit: &mut impl FnMut(&mut XmlElement)) {
    if let Some(root) = doc.root_mut() {
        if root.local_name() == "comment" {
            visit(root);
        }
        root.for_each_descendant_mut(&mut |element| {
            if element.local_name() == "comment" {
                visit(element);
            }
        });
    }
}

//! Author alias table and its JSON side file.
//!
//! Anonymization replaces each distinct comment author with `Author1`,
//! `Author2`, ... in first-seen order and records the mapping next to
//! the document so a later run can reverse it.

use crate::error::{Error, Result};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Mapping from real author names to their assigned aliases.
///
/// Entries keep first-seen order; the same name always resolves to
/// the same alias within one table.
#[derive(Clone, Debug, Default)]
pub struct AliasTable {
    entries: Vec<(String, String)>,
}

impl AliasTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct authors in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the alias already assigned to an author.
    pub fn get(&self, author: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == author)
            .map(|(_, alias)| alias.as_str())
    }

    /// Resolve an author to its alias, assigning the next `Author<N>`
    /// on first sight.
    pub fn alias_for(&mut self, author: &str) -> String {
        match self.entries.iter().position(|(name, _)| name == author) {
            Some(pos) => self.entries[pos].1.clone(),
            None => {
                let alias = format!("Author{}", self.entries.len() + 1);
                self.entries.push((author.to_string(), alias.clone()));
                alias
            }
        }
    }

    /// Iterate over (author, alias) pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, alias)| (name.as_str(), alias.as_str()))
    }

    /// Write the table to a JSON file as an object of
    /// author-name keys to alias values.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut map = serde_json::Map::new();
        for (name, alias) in &self.entries {
            map.insert(name.clone(), Value::String(alias.clone()));
        }

        let json = serde_json::to_string_pretty(&Value::Object(map)).map_err(|e| {
            Error::AliasFileWrite {
                path: path.to_path_buf(),
                detail: e.to_string(),
            }
        })?;

        fs::write(path, json).map_err(|e| Error::AliasFileWrite {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

        log::debug!("saved {} author aliases to {}", self.entries.len(), path.display());
        Ok(())
    }

    /// Load a table from a JSON file written by [`AliasTable::save`].
    ///
    /// Null values are skipped; any other non-string value makes the
    /// file invalid. Entries keep the order they have in the file, so
    /// when two names share one alias, restoring resolves that alias
    /// to the name written later.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::AliasFileMissing(path.to_path_buf())
            } else {
                Error::AliasFileInvalid {
                    path: path.to_path_buf(),
                    detail: e.to_string(),
                }
            }
        })?;

        let value: Value = serde_json::from_str(&text).map_err(|e| Error::AliasFileInvalid {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(Error::AliasFileInvalid {
                    path: path.to_path_buf(),
                    detail: format!("expected an object, found {}", json_kind(&other)),
                })
            }
        };

        let mut entries = Vec::with_capacity(object.len());
        for (name, value) in object {
            match value {
                Value::String(alias) => entries.push((name, alias)),
                Value::Null => {}
                other => {
                    return Err(Error::AliasFileInvalid {
                        path: path.to_path_buf(),
                        detail: format!("value for '{}' is {}, not a string", name, json_kind(&other)),
                    })
                }
            }
        }

        log::debug!("loaded {} author aliases from {}", entries.len(), path.display());
        Ok(Self { entries })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Default alias-file location for a document: same path with the
/// extension replaced by `.json`.
pub fn default_alias_path(document: &Path) -> PathBuf {
    document.with_extension("json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_aliases_assigned_in_first_seen_order() {
        let mut table = AliasTable::new();
        assert_eq!(table.alias_for("Ann"), "Author1");
        assert_eq!(table.alias_for("Bob"), "Author2");
        assert_eq!(table.alias_for("Ann"), "Author1");
        assert_eq!(table.alias_for("Cleo"), "Author3");
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_get_does_not_assign() {
        let table = AliasTable::new();
        assert_eq!(table.get("Ann"), None);
        assert!(table.is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("authors.json");

        let mut table = AliasTable::new();
        table.alias_for("Ann");
        table.alias_for("Bob");
        table.save(&path).unwrap();

        let loaded = AliasTable::load(&path).unwrap();
        assert_eq!(loaded.get("Ann"), Some("Author1"));
        assert_eq!(loaded.get("Bob"), Some("Author2"));
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let result = AliasTable::load(&path);
        assert!(matches!(result, Err(Error::AliasFileMissing(_))));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("authors.json");
        fs::write(&path, "{not json").unwrap();
        let result = AliasTable::load(&path);
        assert!(matches!(result, Err(Error::AliasFileInvalid { .. })));
    }

    #[test]
    fn test_load_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("authors.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        let result = AliasTable::load(&path);
        assert!(matches!(result, Err(Error::AliasFileInvalid { .. })));
    }

    #[test]
    fn test_load_keeps_file_entry_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("authors.json");
        fs::write(&path, r#"{"Zoe": "Author1", "Ann": "Author2"}"#).unwrap();
        let table = AliasTable::load(&path).unwrap();
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![("Zoe", "Author1"), ("Ann", "Author2")]);
    }

    #[test]
    fn test_load_skips_null_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("authors.json");
        fs::write(&path, r#"{"Ann": "Author1", "Bob": null}"#).unwrap();
        let table = AliasTable::load(&path).unwrap();
        assert_eq!(table.get("Ann"), Some("Author1"));
        assert_eq!(table.get("Bob"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_load_rejects_non_string_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("authors.json");
        fs::write(&path, r#"{"Ann": 7}"#).unwrap();
        let result = AliasTable::load(&path);
        assert!(matches!(result, Err(Error::AliasFileInvalid { .. })));
    }

    #[test]
    fn test_default_alias_path() {
        assert_eq!(
            default_alias_path(Path::new("/tmp/report.docx")),
            PathBuf::from("/tmp/report.json")
        );
        assert_eq!(
            default_alias_path(Path::new("notes")),
            PathBuf::from("notes.json")
        );
    }
}

// Storage module: the single JSON document backing the catalog. The whole
// book list is read once at startup and rewritten in full on every save.

use crate::catalog::Book;
use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Storage file name, resolved against the working directory.
pub const STORAGE_FILE: &str = "book_collection.json";

const INDENT: &[u8] = b"    ";

/// Reads and writes the catalog's JSON file. Holds only the path; no file
/// handle is kept open between calls.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    /// Store backed by `book_collection.json` in the current directory.
    pub fn default_location() -> Self {
        Self::at(STORAGE_FILE)
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every stored book.
    ///
    /// A missing file, invalid JSON or non UTF-8 content all yield an empty
    /// list. Any other read failure (permissions, a directory in the way) is
    /// returned as an error.
    pub fn load(&self) -> Result<Vec<Book>> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=catalog_loaded status=missing path={} count=0",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(err) if err.kind() == ErrorKind::InvalidData => {
                warn!(
                    "event=catalog_recovered reason=not_utf8 path={}",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to read catalog file {}", self.path.display())
                })
            }
        };

        match serde_json::from_str::<Vec<Book>>(&data) {
            Ok(books) => {
                info!(
                    "event=catalog_loaded status=ok path={} count={}",
                    self.path.display(),
                    books.len()
                );
                Ok(books)
            }
            Err(err) => {
                warn!(
                    "event=catalog_recovered reason=invalid_json path={} line={} column={}",
                    self.path.display(),
                    err.line(),
                    err.column()
                );
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the storage file with `books`, indented four spaces.
    pub fn persist(&self, books: &[Book]) -> Result<()> {
        let json = to_pretty_json(books).context("Failed to serialize catalog")?;
        std::fs::write(&self.path, json).with_context(|| {
            format!("Failed to write catalog file {}", self.path.display())
        })?;
        info!(
            "event=catalog_persisted path={} count={}",
            self.path.display(),
            books.len()
        );
        Ok(())
    }
}

fn to_pretty_json(books: &[Book]) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    books.serialize(&mut ser)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_json_uses_four_space_indent() {
        let books = vec![Book {
            title: "Dune".into(),
            author: "Herbert".into(),
            genre: "SciFi".into(),
            publication_year: "1965".into(),
            read: false,
        }];
        let json = String::from_utf8(to_pretty_json(&books).unwrap()).unwrap();
        assert!(json.starts_with("[\n    {\n        \"title\": \"Dune\""));
        assert!(json.contains("\"publication_year\": \"1965\""));
        assert!(json.contains("\"read\": false"));
    }

    #[test]
    fn empty_catalog_serializes_to_empty_array() {
        let json = String::from_utf8(to_pretty_json(&[]).unwrap()).unwrap();
        assert_eq!(json, "[]");
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::model::Document;
use crate::store::traits::DocumentStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode document as YAML")]
    Encode(#[from] serde_yaml::Error),
}

/// Where documents land. A destination string ending in a YAML extension is
/// a literal file path; anything else is a directory whose file names are
/// derived from the primary tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    File(PathBuf),
    Directory(PathBuf),
}

impl Destination {
    pub fn parse(raw: &str) -> Self {
        if raw.ends_with(".yaml") || raw.ends_with(".yml") {
            Destination::File(PathBuf::from(raw))
        } else {
            Destination::Directory(PathBuf::from(raw))
        }
    }

    pub fn resolve(&self, tag: &str) -> PathBuf {
        match self {
            Destination::File(path) => path.clone(),
            Destination::Directory(dir) => dir.join(format!("{tag}.yaml")),
        }
    }
}

/// YAML-on-disk document store: one blocking read and one blocking write
/// per exchange, no locking. Concurrent processes writing to the same
/// destination can silently lose each other's updates.
#[derive(Debug, Clone)]
pub struct YamlFileStore {
    destination: Destination,
}

impl YamlFileStore {
    pub fn new(destination: Destination) -> Self {
        Self { destination }
    }

    pub fn from_destination(raw: &str) -> Self {
        Self::new(Destination::parse(raw))
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }
}

impl DocumentStore for YamlFileStore {
    fn load(&self, tag: &str) -> Result<Option<Document>> {
        let path = self.destination.resolve(tag);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }.into()),
        };
        match serde_yaml::from_str::<Document>(&text) {
            Ok(document) => Ok(Some(document)),
            // A corrupt document is treated as absent: the next save
            // rewrites it from scratch instead of failing the exchange.
            Err(err) => {
                log::warn!(
                    "discarding unparseable document at {}: {}",
                    path.display(),
                    err
                );
                Ok(None)
            }
        }
    }

    fn save(&self, tag: &str, document: &Document) -> Result<()> {
        if let Destination::Directory(dir) = &self.destination {
            create_dir(dir)?;
        }
        let path = self.destination.resolve(tag);
        let text = serde_yaml::to_string(document).map_err(StoreError::Encode)?;
        fs::write(&path, quote_dates(&text))
            .map_err(|source| StoreError::Io { path, source })?;
        Ok(())
    }
}

fn create_dir(dir: &Path) -> Result<(), StoreError> {
    fs::create_dir_all(dir).map_err(|source| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

static DATE_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").unwrap());
static QUOTED_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'(\d{4}-\d{2}-\d{2})'").unwrap());

/// Single-quote every `YYYY-MM-DD`-shaped literal in the serialized text so
/// YAML loaders do not auto-type it as a date. Existing quotes are stripped
/// first, which keeps repeated load/merge/save cycles byte-stable.
pub fn quote_dates(text: &str) -> String {
    let stripped = QUOTED_DATE.replace_all(text, "$1");
    DATE_LITERAL.replace_all(&stripped, "'$0'").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Operation, PathOperations};
    use indexmap::IndexMap;

    fn document_with_path(path: &str) -> Document {
        let mut document = Document::default();
        let mut operations = PathOperations::new();
        operations.insert(
            "get".to_string(),
            Operation {
                tags: vec!["orders".to_string()],
                summary: path.to_string(),
                parameters: Vec::new(),
                request_body: None,
                responses: IndexMap::new(),
                security: Vec::new(),
            },
        );
        document.paths.insert(path.to_string(), operations);
        document
    }

    #[test]
    fn test_destination_parse() {
        assert_eq!(
            Destination::parse("doc/openapi.yaml"),
            Destination::File(PathBuf::from("doc/openapi.yaml"))
        );
        assert_eq!(
            Destination::parse("doc/openapi.yml"),
            Destination::File(PathBuf::from("doc/openapi.yml"))
        );
        assert_eq!(
            Destination::parse("doc/api"),
            Destination::Directory(PathBuf::from("doc/api"))
        );
    }

    #[test]
    fn test_directory_resolution_uses_tag() {
        let destination = Destination::parse("doc/api");
        assert_eq!(
            destination.resolve("orders"),
            PathBuf::from("doc/api/orders.yaml")
        );
    }

    #[test]
    fn test_quote_dates_is_stable_across_cycles() {
        let text = "value: 2024-01-05\nother: '2023-12-31'\n";
        let quoted = quote_dates(text);
        assert_eq!(quoted, "value: '2024-01-05'\nother: '2023-12-31'\n");
        assert_eq!(quote_dates(&quoted), quoted);
    }

    #[test]
    fn test_quote_dates_leaves_other_scalars_alone() {
        // No word boundary between the date and the time suffix, and the
        // short trailing group never matches the date shape.
        let text = "created: 2024-01-05T10:00:00Z\ncount: 1234-5\n";
        assert_eq!(quote_dates(text), text);
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = YamlFileStore::from_destination(dir.path().join("api").to_str().unwrap());
        assert!(store.load("orders").unwrap().is_none());
    }

    #[test]
    fn test_load_corrupt_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("openapi.yaml");
        fs::write(&file, ": not : valid : yaml [").unwrap();
        let store = YamlFileStore::from_destination(file.to_str().unwrap());
        assert!(store.load("orders").unwrap().is_none());
    }

    #[test]
    fn test_save_bootstraps_directory_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("nested").join("api");
        let store = YamlFileStore::from_destination(destination.to_str().unwrap());
        let document = document_with_path("/orders");

        store.save("orders", &document).unwrap();
        assert!(destination.join("orders.yaml").exists());

        let loaded = store.load("orders").unwrap().unwrap();
        assert_eq!(loaded, document);
    }

    #[test]
    fn test_saved_dates_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("openapi.yaml");
        let store = YamlFileStore::from_destination(file.to_str().unwrap());
        let mut document = document_with_path("/orders");
        let operations = document.paths.get_mut("/orders").unwrap();
        operations.get_mut("get").unwrap().summary = "2024-01-05".to_string();

        store.save("orders", &document).unwrap();
        let text = fs::read_to_string(&file).unwrap();
        assert!(text.contains("'2024-01-05'"));
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::event::Event;
use crate::core::task::Task;
use crate::error::Result;

/// The single persisted document holding all application state.
///
/// Readers tolerate partial documents: any missing key defaults to an
/// empty collection or empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub class_image: String,
}

/// Load/save of the backing JSON file.
///
/// Every mutation in the crate is a full read-modify-write of this
/// document. There is no locking: two writers racing load→mutate→save
/// lose one update, last writer wins. A known limitation, acceptable for
/// the single-process, single-window usage this is built for.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document. A missing file or one that fails to parse reads
    /// as the default empty document; this never errors.
    pub fn load(&self) -> Document {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!(
                    "Unparseable document at {}, starting empty: {}",
                    self.path.display(),
                    e
                );
                Document::default()
            }),
            Err(_) => Document::default(),
        }
    }

    /// Serialize the whole document and overwrite the backing file,
    /// creating the parent directory if needed. I/O and serialization
    /// failures propagate.
    pub fn save(&self, doc: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(doc)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn temp_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("data.json"));
        (dir, store)
    }

    #[test]
    fn missing_file_loads_empty() {
        let (_dir, store) = temp_store();
        let doc = store.load();
        assert!(doc.tasks.is_empty());
        assert!(doc.events.is_empty());
        assert!(doc.class_image.is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), "{not json").unwrap();
        let doc = store.load();
        assert!(doc.tasks.is_empty());
    }

    #[test]
    fn save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("nested").join("data.json"));
        store.save(&Document::default()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn round_trip_preserves_document() {
        let (_dir, store) = temp_store();
        let mut doc = Document::default();
        doc.tasks.push(Task::new(
            "Read chapter 4",
            NaiveDate::from_ymd_opt(2024, 1, 5),
        ));
        doc.events.push(Event::new(
            "Field trip",
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        ));
        doc.class_image = "/tmp/photo.png".to_string();
        store.save(&doc).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.tasks.len(), 1);
        assert_eq!(loaded.tasks[0].id, doc.tasks[0].id);
        assert_eq!(loaded.tasks[0].title, "Read chapter 4");
        assert_eq!(loaded.events[0].id, doc.events[0].id);
        assert_eq!(loaded.class_image, "/tmp/photo.png");

        // Saving what was loaded keeps the same bytes
        store.save(&loaded).unwrap();
        let first = serde_json::to_string_pretty(&doc).unwrap();
        let second = fs::read_to_string(store.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn legacy_python_document_loads() {
        let (_dir, store) = temp_store();
        // The shape the original data files had: `task` field name,
        // unpadded D/M/Y dates, no ids, no done flag on events.
        fs::write(
            store.path(),
            r#"{
                "tasks": [
                    {"task": "Buy notebook", "done": false, "date": "5/1/2024"},
                    {"task": "Old habit", "done": true}
                ],
                "events": [
                    {"title": "Orientation", "date": "2024-01-10", "time": "", "details": "Hall B"}
                ]
            }"#,
        )
        .unwrap();

        let doc = store.load();
        assert_eq!(doc.tasks.len(), 2);
        assert_eq!(doc.tasks[0].title, "Buy notebook");
        assert_eq!(
            doc.tasks[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(doc.tasks[1].date, None);
        assert_eq!(doc.events[0].time, None);
        assert_eq!(doc.events[0].details, "Hall B");
        assert!(doc.class_image.is_empty());
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::store::Store;

/// The single managed "class photo" file.
///
/// At most one file is live in the managed directory. Replacing the photo
/// copies the new file in first; only after the copy succeeds is the old
/// file removed. Removal is best effort: a file that is already gone or
/// undeletable is logged and forgotten.
#[derive(Debug, Clone)]
pub struct PhotoSlot {
    dir: PathBuf,
    store: Store,
}

impl PhotoSlot {
    pub fn new(dir: impl Into<PathBuf>, store: Store) -> Self {
        Self {
            dir: dir.into(),
            store,
        }
    }

    /// Copy `source` into the managed directory and make it the live
    /// photo. Returns the managed path. Copy failures propagate; the
    /// previous photo is only touched after the copy has succeeded.
    pub fn set(&self, source: &Path) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let dest = self.unique_dest(source);
        fs::copy(source, &dest)?;

        let mut doc = self.store.load();
        if !doc.class_image.is_empty() {
            remove_best_effort(Path::new(&doc.class_image));
        }
        doc.class_image = dest.to_string_lossy().into_owned();
        self.store.save(&doc)?;
        Ok(dest)
    }

    /// Delete the live photo if there is one and clear the document field.
    pub fn clear(&self) -> Result<()> {
        let mut doc = self.store.load();
        if doc.class_image.is_empty() {
            return Ok(());
        }
        remove_best_effort(Path::new(&doc.class_image));
        doc.class_image.clear();
        self.store.save(&doc)
    }

    /// The live photo path, only while the file still exists on disk.
    pub fn current(&self) -> Option<PathBuf> {
        let doc = self.store.load();
        if doc.class_image.is_empty() {
            return None;
        }
        let path = PathBuf::from(doc.class_image);
        path.exists().then_some(path)
    }

    /// Pick a destination name, appending `_N` before the extension while
    /// the name is taken.
    fn unique_dest(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let ext = source
            .extension()
            .map(|e| e.to_string_lossy().into_owned());

        let file_name = |suffix: &str| match &ext {
            Some(ext) => format!("{stem}{suffix}.{ext}"),
            None => format!("{stem}{suffix}"),
        };

        let mut dest = self.dir.join(file_name(""));
        let mut counter = 1;
        while dest.exists() {
            dest = self.dir.join(file_name(&format!("_{counter}")));
            counter += 1;
        }
        dest
    }
}

fn remove_best_effort(path: &Path) {
    if path.exists() {
        if let Err(e) = fs::remove_file(path) {
            log::warn!("Failed to remove old photo {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        _dir: tempfile::TempDir,
        slot: PhotoSlot,
        store: Store,
        source_dir: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("data.json"));
        let slot = PhotoSlot::new(dir.path().join("images"), store.clone());
        let source_dir = dir.path().join("sources");
        fs::create_dir_all(&source_dir).unwrap();
        Fixture {
            _dir: dir,
            slot,
            store,
            source_dir,
        }
    }

    fn write_source(fx: &Fixture, name: &str, bytes: &[u8]) -> PathBuf {
        let path = fx.source_dir.join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    fn managed_files(fx: &Fixture) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(fx._dir.path().join("images"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn set_copies_and_records_path() {
        let fx = fixture();
        let source = write_source(&fx, "class.png", b"png bytes");
        let dest = fx.slot.set(&source).unwrap();

        assert!(dest.exists());
        assert_eq!(fx.store.load().class_image, dest.to_string_lossy());
        assert_eq!(fx.slot.current(), Some(dest));
        // The source is untouched
        assert!(source.exists());
    }

    #[test]
    fn replacing_removes_the_previous_copy() {
        let fx = fixture();
        let a = write_source(&fx, "a.png", b"a");
        let b = write_source(&fx, "b.png", b"b");

        let first = fx.slot.set(&a).unwrap();
        let second = fx.slot.set(&b).unwrap();

        assert!(!first.exists());
        assert!(second.exists());
        assert_eq!(managed_files(&fx), vec!["b.png"]);
    }

    #[test]
    fn name_collisions_get_numeric_suffixes() {
        let fx = fixture();
        let source = write_source(&fx, "class.png", b"first");

        let first = fx.slot.set(&source).unwrap();
        // Simulate a stray file keeping the plain name occupied
        fs::write(&first, b"occupied").unwrap();
        let second = fx.slot.set(&source).unwrap();

        assert_eq!(second.file_name().unwrap().to_string_lossy(), "class_1.png");
    }

    #[test]
    fn clear_deletes_and_blanks_the_field() {
        let fx = fixture();
        let source = write_source(&fx, "class.png", b"bytes");
        let dest = fx.slot.set(&source).unwrap();

        fx.slot.clear().unwrap();
        assert!(!dest.exists());
        assert!(fx.store.load().class_image.is_empty());
        assert_eq!(fx.slot.current(), None);
    }

    #[test]
    fn clear_tolerates_an_already_missing_file() {
        let fx = fixture();
        let source = write_source(&fx, "class.png", b"bytes");
        let dest = fx.slot.set(&source).unwrap();
        fs::remove_file(&dest).unwrap();

        fx.slot.clear().unwrap();
        assert!(fx.store.load().class_image.is_empty());
    }

    #[test]
    fn current_is_none_when_file_vanished() {
        let fx = fixture();
        let source = write_source(&fx, "class.png", b"bytes");
        let dest = fx.slot.set(&source).unwrap();
        fs::remove_file(&dest).unwrap();
        assert_eq!(fx.slot.current(), None);
    }

    #[test]
    fn missing_source_propagates_and_leaves_state_alone() {
        let fx = fixture();
        let good = write_source(&fx, "good.png", b"bytes");
        fx.slot.set(&good).unwrap();

        let missing = fx.source_dir.join("nope.png");
        assert!(fx.slot.set(&missing).is_err());

        // Live photo unchanged
        assert_eq!(managed_files(&fx), vec!["good.png"]);
        assert!(fx.slot.current().is_some());
    }
}

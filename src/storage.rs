//! Persistence adapters for the task collection.
//!
//! The whole collection lives in a single slot as one JSON array blob.
//! Every save overwrites the previous blob; reads that find nothing
//! usable report absence so the store can start fresh.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::PathBuf;

use crate::task::Task;

/// Storage slot for the serialized task collection.
///
/// `read` treats a malformed blob exactly like a missing one: the caller
/// falls back to an empty collection instead of failing startup. `save`
/// must preserve every field of every task and the exact sequence order.
pub trait Storage {
    /// Deserialize the stored collection, or `None` if no usable blob exists.
    fn read(&self) -> Option<Vec<Task>>;

    /// Overwrite the stored blob with the full collection.
    fn save(&mut self, tasks: &[Task]) -> io::Result<()>;
}

/// File-backed storage: one JSON file holding the task array.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStorage { path: path.into() }
    }
}

impl Storage for JsonFileStorage {
    fn read(&self) -> Option<Vec<Task>> {
        if !self.path.exists() {
            return None;
        }
        let mut buf = String::new();
        File::open(&self.path)
            .and_then(|mut f| f.read_to_string(&mut buf))
            .ok()?;
        match serde_json::from_str(&buf) {
            Ok(tasks) => Some(tasks),
            Err(e) => {
                eprintln!("Error parsing task file, starting fresh: {e}");
                None
            }
        }
    }

    fn save(&mut self, tasks: &[Task]) -> io::Result<()> {
        // Atomic-ish write via temp + rename.
        let data = serde_json::to_string_pretty(tasks).map_err(io::Error::other)?;
        let tmp = self.path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, &self.path)?;
        Ok(())
    }
}

/// In-process storage: a single string slot, the way a browser's local
/// storage would hold it. Useful for tests and embedders that do not
/// want a file on disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blob: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// The raw serialized blob, if one has been saved.
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Option<Vec<Task>> {
        let blob = self.blob.as_ref()?;
        serde_json::from_str(blob).ok()
    }

    fn save(&mut self, tasks: &[Task]) -> io::Result<()> {
        self.blob = Some(serde_json::to_string(tasks).map_err(io::Error::other)?);
        Ok(())
    }
}

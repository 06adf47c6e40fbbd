//! File-backed storage port.
//!
//! Each record key maps to one `<key>.json` file inside a data directory.
//! Writes go through a temp file and a rename so a crash mid-write never
//! leaves a truncated record behind.

use crate::{
    error::StoreResult,
    store::{KeyValueStore, RecordKey},
};

use std::{
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};

/// [`KeyValueStore`] persisting one JSON file per record key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the directory cannot be created.
    #[track_caller]
    #[instrument(skip(dir))]
    pub fn open<P: AsRef<Path>>(dir: P) -> StoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            debug!(data_dir = ?dir, "Created data directory");
        }

        Ok(Self { dir })
    }

    /// Directory holding the record files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: RecordKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

impl KeyValueStore for JsonFileStore {
    #[track_caller]
    fn get(&self, key: RecordKey) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[track_caller]
    fn put(&mut self, key: RecordKey, value: &str) -> StoreResult<()> {
        let path = self.path_for(key);

        // Atomic write: write to temp file then rename
        let temp_path = path.with_extension("json.tmp");

        let mut temp_file = fs::File::create(&temp_path)?;
        temp_file.write_all(value.as_bytes())?;
        temp_file.sync_all()?;
        fs::rename(&temp_path, &path)?;

        debug!(key = %key, bytes = value.len(), "Record written (atomic write)");

        Ok(())
    }
}

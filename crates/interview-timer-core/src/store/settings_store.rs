use crate::{
    AppSettings,
    error::StoreResult,
    store::{KeyValueStore, RecordKey, read_json, write_json},
};

use tracing::{info, instrument};

/// Settings singleton over the storage port.
pub struct SettingsStore<'a, S: ?Sized> {
    kv: &'a mut S,
}

impl<'a, S: KeyValueStore + ?Sized> SettingsStore<'a, S> {
    /// Create a view over `kv`.
    pub fn new(kv: &'a mut S) -> Self {
        Self { kv }
    }

    /// Current settings, or defaults when none were saved.
    #[track_caller]
    pub fn get(&self) -> StoreResult<AppSettings> {
        Ok(read_json(&*self.kv, RecordKey::Settings)?.unwrap_or_default())
    }

    /// Replace the stored settings.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn put(&mut self, settings: &AppSettings) -> StoreResult<()> {
        write_json(&mut *self.kv, RecordKey::Settings, settings)?;
        info!("Settings saved");
        Ok(())
    }
}

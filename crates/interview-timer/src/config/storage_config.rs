use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where practice data lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per record type.
    pub data_dir: PathBuf,
}

use crate::config::{default_audio_enabled, default_max_recording_seconds};

use serde::{Deserialize, Serialize};

/// Microphone recording configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Allow runs to record audio. When off, `rec` is ignored.
    #[serde(default = "default_audio_enabled")]
    pub enabled: bool,

    /// Upper bound on one run's recording; older audio is dropped beyond it.
    #[serde(default = "default_max_recording_seconds")]
    pub max_recording_seconds: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: default_audio_enabled(),
            max_recording_seconds: default_max_recording_seconds(),
        }
    }
}

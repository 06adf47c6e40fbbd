use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_PREPARATION_SECONDS: u32 = 5;
pub(crate) const DEFAULT_ANSWER_SECONDS: u32 = 60;
pub(crate) const DEFAULT_RECORDING_LIMIT: usize = 20;

/// Question order used by `Real` mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RealModeOrder {
    /// Deck order as-is.
    #[default]
    Fixed,
    /// Shuffle before taking the first N questions.
    Shuffle,
}

/// Process-wide practice settings.
///
/// A practice run snapshots this value when it starts and never re-reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Whether each question opens with a preparation countdown.
    #[serde(default)]
    pub preparation_time_enabled: bool,
    /// Length of the preparation countdown.
    #[serde(default = "default_preparation_seconds")]
    pub preparation_seconds: u32,
    /// Ordering policy for `Real` mode.
    #[serde(default)]
    pub real_mode_order: RealModeOrder,
    /// Recommended answer length for questions without their own value.
    #[serde(default = "default_answer_seconds")]
    pub default_seconds: u32,
    /// How many session logs keep their embedded recording.
    #[serde(default = "default_recording_limit")]
    pub recording_limit: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            preparation_time_enabled: false,
            preparation_seconds: DEFAULT_PREPARATION_SECONDS,
            real_mode_order: RealModeOrder::Fixed,
            default_seconds: DEFAULT_ANSWER_SECONDS,
            recording_limit: DEFAULT_RECORDING_LIMIT,
        }
    }
}

fn default_preparation_seconds() -> u32 {
    DEFAULT_PREPARATION_SECONDS
}

fn default_answer_seconds() -> u32 {
    DEFAULT_ANSWER_SECONDS
}

fn default_recording_limit() -> usize {
    DEFAULT_RECORDING_LIMIT
}

mod audio_config;
#[allow(clippy::module_inception)]
mod config;
mod logging_config;
mod storage_config;

pub(crate) use {
    audio_config::AudioConfig, config::Config, logging_config::LoggingConfig,
    storage_config::StorageConfig,
};

pub(crate) const DEFAULT_AUDIO_ENABLED: bool = true;
pub(crate) const DEFAULT_MAX_RECORDING_SECONDS: u32 = 1800;
pub(crate) const DEFAULT_LOG_FILTER: &str = "interview_timer=info,interview_timer_core=info";

pub(crate) fn default_audio_enabled() -> bool {
    DEFAULT_AUDIO_ENABLED
}

pub(crate) fn default_max_recording_seconds() -> u32 {
    DEFAULT_MAX_RECORDING_SECONDS
}

pub(crate) fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

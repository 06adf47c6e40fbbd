use crate::{CaptureError, error::CaptureResult};

use std::{io::Cursor, panic::Location};

use base64::{Engine, engine::general_purpose::STANDARD};
use error_location::ErrorLocation;
use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::{debug, instrument};

const DATA_URL_PREFIX: &str = "data:audio/wav;base64,";

/// A finished recording in transportable form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAudio {
    data_url: String,
}

impl EncodedAudio {
    /// Wrap an already encoded data URL.
    pub fn from_data_url(data_url: impl Into<String>) -> Self {
        Self {
            data_url: data_url.into(),
        }
    }

    /// `data:audio/wav;base64,...` URL, ready to embed in a session log.
    pub fn as_data_url(&self) -> &str {
        &self.data_url
    }

    /// Consume into the data URL string.
    pub fn into_data_url(self) -> String {
        self.data_url
    }

    /// Decode the WAV bytes back out of the data URL.
    pub fn wav_bytes(&self) -> Option<Vec<u8>> {
        let payload = self.data_url.strip_prefix(DATA_URL_PREFIX)?;
        STANDARD.decode(payload).ok()
    }
}

/// Encode mono f32 samples as 16-bit PCM WAV inside a base64 data URL.
#[track_caller]
#[instrument(skip(samples), fields(sample_count = samples.len()))]
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> CaptureResult<EncodedAudio> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(44 + samples.len() * 2));
    {
        let mut writer = WavWriter::new(&mut cursor, spec).map_err(|e| CaptureError::EncodingFailed {
            reason: format!("Failed to create WAV writer: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        for &sample in samples {
            let sample_i16 = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
            writer
                .write_sample(sample_i16)
                .map_err(|e| CaptureError::EncodingFailed {
                    reason: format!("Failed to write sample: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        }

        writer.finalize().map_err(|e| CaptureError::EncodingFailed {
            reason: format!("Failed to finalize WAV: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
    }

    let bytes = cursor.into_inner();
    debug!(wav_bytes = bytes.len(), "Recording encoded");

    Ok(EncodedAudio {
        data_url: format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(&bytes)),
    })
}

use crate::{CaptureError, error::CaptureResult};

use std::{
    collections::VecDeque,
    panic::Location,
    sync::{
        atomic::{AtomicBool, Ordering},
        {Arc, Mutex},
    },
};

use cpal::{
    Device, Stream, StreamConfig,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument};

/// Microphone capture into a bounded mono sample buffer.
///
/// A practice run records for its whole length, so the buffer is capped at
/// `max_samples` and drops the oldest audio once full.
pub(crate) struct AudioCapturer {
    device: Device,
    config: StreamConfig,
    stream: Option<Stream>,
    samples: Arc<Mutex<VecDeque<f32>>>,
    max_samples: usize,
    /// Signals the audio callback to stop writing. Set to `true` before
    /// dropping the stream so no in-flight callback writes after `stop()`
    /// takes the lock.
    shutdown: Arc<AtomicBool>,
}

impl AudioCapturer {
    /// Open the default input device. Holds at most `max_seconds` of audio.
    #[track_caller]
    #[instrument]
    pub fn new(max_seconds: u32) -> CaptureResult<Self> {
        let host = cpal::default_host();

        let device = host
            .default_input_device()
            .ok_or(CaptureError::NoMicrophoneFound {
                location: ErrorLocation::from(Location::caller()),
            })?;

        let config = device
            .default_input_config()
            .map_err(|e| CaptureError::DeviceError {
                reason: format!("Failed to get config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let max_samples = config.sample_rate() as usize * max_seconds as usize;

        info!(
            device_id = ?device.id(),
            sample_rate = config.sample_rate(),
            channels = config.channels(),
            max_samples,
            "AudioCapturer initialized"
        );

        Ok(Self {
            device,
            config: config.into(),
            stream: None,
            samples: Arc::new(Mutex::new(VecDeque::new())),
            max_samples,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    #[track_caller]
    #[instrument(skip(self))]
    pub fn start(&mut self) -> CaptureResult<()> {
        let samples = Arc::clone(&self.samples);
        let shutdown = Arc::clone(&self.shutdown);
        let channels = usize::from(self.config.channels.max(1));
        let max_samples = self.max_samples;

        self.shutdown.store(false, Ordering::Release);

        samples
            .lock()
            .map_err(|e| CaptureError::DeviceError {
                reason: format!("Failed to lock samples: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
            .clear();

        let stream = self
            .device
            .build_input_stream(
                &self.config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if shutdown.load(Ordering::Acquire) {
                        return;
                    }
                    // A poisoned mutex still holds valid samples.
                    let mut buf = samples.lock().unwrap_or_else(|e| {
                        error!("Sample buffer lock poisoned, recovering: {}", e);
                        e.into_inner()
                    });
                    push_mono(&mut buf, data, channels, max_samples);
                },
                |err| {
                    error!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| CaptureError::DeviceError {
                reason: format!("Failed to build stream: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        stream.play().map_err(|e| CaptureError::DeviceError {
            reason: format!("Failed to start stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        self.stream = Some(stream);
        info!("Audio capture started");

        Ok(())
    }

    #[track_caller]
    #[instrument(skip(self))]
    pub fn stop(&mut self) -> CaptureResult<Vec<f32>> {
        self.shutdown.store(true, Ordering::Release);

        if let Some(stream) = self.stream.take() {
            drop(stream);
            // Lets a callback that raced the flag finish before we read.
            std::thread::sleep(std::time::Duration::from_millis(5));
            info!("Audio capture stopped");
        }

        let samples: Vec<f32> = self
            .samples
            .lock()
            .map_err(|e| CaptureError::DeviceError {
                reason: format!("Failed to lock samples: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
            .drain(..)
            .collect();

        debug!(sample_count = samples.len(), "Captured audio samples");

        Ok(samples)
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }
}

/// Downmix interleaved frames to mono and append, dropping the oldest
/// samples beyond `max_samples`.
pub(crate) fn push_mono(buf: &mut VecDeque<f32>, data: &[f32], channels: usize, max_samples: usize) {
    if channels <= 1 {
        buf.extend(data.iter().copied());
    } else {
        buf.extend(
            data.chunks(channels)
                .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32),
        );
    }

    while buf.len() > max_samples {
        buf.pop_front();
    }
}

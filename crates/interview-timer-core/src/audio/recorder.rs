use crate::{
    audio::{AudioCapturer, EncodedAudio, encode_wav},
    error::CaptureResult,
};

use tracing::{info, instrument, warn};

/// Run-wide audio recording.
///
/// A practice run starts at most one recording and stops it once, after the
/// last answer. Implementations must tolerate `stop` and `discard` without a
/// prior `start`.
pub trait Recorder {
    /// Begin capturing. Fails on permission or device errors.
    fn start(&mut self) -> CaptureResult<()>;

    /// Finish capturing and encode the result. Returns `Ok(None)` if no
    /// recording was active.
    fn stop(&mut self) -> CaptureResult<Option<EncodedAudio>>;

    /// Abort an active recording and throw its audio away.
    fn discard(&mut self);

    /// Whether a recording is in progress.
    fn is_recording(&self) -> bool;
}

impl<R: Recorder + ?Sized> Recorder for Box<R> {
    fn start(&mut self) -> CaptureResult<()> {
        (**self).start()
    }

    fn stop(&mut self) -> CaptureResult<Option<EncodedAudio>> {
        (**self).stop()
    }

    fn discard(&mut self) {
        (**self).discard()
    }

    fn is_recording(&self) -> bool {
        (**self).is_recording()
    }
}

/// Recorder backed by the default microphone.
///
/// The device is opened on `start`, not at construction, so a missing
/// microphone or a denied permission only affects runs that ask for audio.
pub struct MicrophoneRecorder {
    max_seconds: u32,
    capturer: Option<AudioCapturer>,
}

impl MicrophoneRecorder {
    /// Create a recorder that keeps at most `max_seconds` of audio per run.
    pub fn new(max_seconds: u32) -> Self {
        Self {
            max_seconds,
            capturer: None,
        }
    }
}

impl Recorder for MicrophoneRecorder {
    #[instrument(skip(self))]
    fn start(&mut self) -> CaptureResult<()> {
        if self.capturer.is_some() {
            warn!("Recording already active, ignoring start");
            return Ok(());
        }

        let mut capturer = AudioCapturer::new(self.max_seconds)?;
        capturer.start()?;
        self.capturer = Some(capturer);

        Ok(())
    }

    #[instrument(skip(self))]
    fn stop(&mut self) -> CaptureResult<Option<EncodedAudio>> {
        let Some(mut capturer) = self.capturer.take() else {
            return Ok(None);
        };

        let samples = capturer.stop()?;
        let audio = encode_wav(&samples, capturer.sample_rate())?;
        info!(sample_count = samples.len(), "Recording finalized");

        Ok(Some(audio))
    }

    fn discard(&mut self) {
        if let Some(mut capturer) = self.capturer.take()
            && let Err(e) = capturer.stop()
        {
            warn!(error = ?e, "Failed to stop discarded recording");
        }
    }

    fn is_recording(&self) -> bool {
        self.capturer.is_some()
    }
}

/// Recorder that never records. Used when audio is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRecorder;

impl Recorder for NullRecorder {
    fn start(&mut self) -> CaptureResult<()> {
        Ok(())
    }

    fn stop(&mut self) -> CaptureResult<Option<EncodedAudio>> {
        Ok(None)
    }

    fn discard(&mut self) {}

    fn is_recording(&self) -> bool {
        false
    }
}

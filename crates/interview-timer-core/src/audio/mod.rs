pub(crate) mod capture;
mod encoder;
mod recorder;

pub(crate) use capture::AudioCapturer;

pub use {
    encoder::{EncodedAudio, encode_wav},
    recorder::{MicrophoneRecorder, NullRecorder, Recorder},
};

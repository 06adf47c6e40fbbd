#![allow(clippy::unwrap_used)]

use crate::{MicrophoneRecorder, NullRecorder, Recorder};

/// WHAT: Stopping a recorder that never started yields no audio
/// WHY: The session may reach the last End with recording already disabled
#[test]
fn given_idle_microphone_recorder_when_stopped_then_no_audio() {
    let mut recorder = MicrophoneRecorder::new(5);

    assert!(!recorder.is_recording());
    assert!(recorder.stop().unwrap().is_none());
    recorder.discard();
}

/// WHAT: The null recorder accepts every call and never records
#[test]
fn given_null_recorder_when_started_and_stopped_then_nothing_recorded() {
    let mut recorder = NullRecorder;

    recorder.start().unwrap();

    assert!(!recorder.is_recording());
    assert!(recorder.stop().unwrap().is_none());
}

/// WHAT: A short microphone capture encodes to WAV
/// WHY: Verifies the device path end to end on a machine with a microphone
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn given_microphone_when_recording_briefly_then_wav_produced() {
    // Given: A recorder over the default input device
    let mut recorder = MicrophoneRecorder::new(5);

    // When: Recording for half a second
    recorder.start().unwrap();
    assert!(recorder.is_recording());
    std::thread::sleep(std::time::Duration::from_millis(500));
    let audio = recorder.stop().unwrap().unwrap();

    // Then: A RIFF payload and the recorder is idle again
    let bytes = audio.wav_bytes().unwrap();
    assert_eq!(&bytes[..4], b"RIFF");
    assert!(!recorder.is_recording());
}

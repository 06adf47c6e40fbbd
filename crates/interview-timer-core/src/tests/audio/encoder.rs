#![allow(clippy::unwrap_used)]

use crate::{EncodedAudio, encode_wav};

/// WHAT: Encoded audio is a WAV data URL whose payload decodes to RIFF
/// WHY: Session logs embed recordings as playable data URLs
#[test]
fn given_samples_when_encoded_then_data_url_holds_wav() {
    // Given: 100 samples of a quiet signal
    let samples = vec![0.25f32; 100];

    // When: Encoding at 16 kHz
    let audio = encode_wav(&samples, 16_000).unwrap();

    // Then: Data URL prefix, RIFF header and 16-bit PCM payload
    assert!(audio.as_data_url().starts_with("data:audio/wav;base64,"));
    let bytes = audio.wav_bytes().unwrap();
    assert_eq!(&bytes[..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"WAVE");
    assert_eq!(bytes.len(), 44 + samples.len() * 2);
}

/// WHAT: Out-of-range samples are clamped instead of wrapping
/// WHY: A wrapped sample turns a loud peak into a loud click
#[test]
fn given_clipping_samples_when_encoded_then_clamped_to_i16_range() {
    let audio = encode_wav(&[2.0, -2.0], 8_000).unwrap();

    let bytes = audio.wav_bytes().unwrap();
    let first = i16::from_le_bytes([bytes[44], bytes[45]]);
    let second = i16::from_le_bytes([bytes[46], bytes[47]]);
    assert_eq!(first, i16::MAX);
    assert_eq!(second, -i16::MAX);
}

/// WHAT: A foreign data URL yields no WAV bytes
#[test]
fn given_non_wav_data_url_when_decoding_then_none() {
    let audio = EncodedAudio::from_data_url("data:audio/ogg;base64,AAAA");

    assert!(audio.wav_bytes().is_none());
}

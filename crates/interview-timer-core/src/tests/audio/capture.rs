use crate::audio::capture::push_mono;

use std::collections::VecDeque;

/// WHAT: Stereo frames are averaged down to one mono sample each
/// WHY: Recordings are stored as mono WAV regardless of the device layout
#[test]
fn given_stereo_frames_when_pushed_then_averaged_to_mono() {
    // Given: An empty buffer and two stereo frames
    let mut buf = VecDeque::new();
    let data = [0.2f32, 0.4, -1.0, 1.0];

    // When: Pushing with two channels
    push_mono(&mut buf, &data, 2, 100);

    // Then: One sample per frame, each the channel mean
    assert_eq!(buf.len(), 2);
    assert!((buf[0] - 0.3).abs() < 1e-6);
    assert!(buf[1].abs() < 1e-6);
}

/// WHAT: Mono input is appended unchanged
/// WHY: No downmix work is needed for single-channel devices
#[test]
fn given_mono_input_when_pushed_then_copied_verbatim() {
    let mut buf = VecDeque::from(vec![0.1f32]);

    push_mono(&mut buf, &[0.5, -0.5], 1, 100);

    assert_eq!(buf, VecDeque::from(vec![0.1f32, 0.5, -0.5]));
}

/// WHAT: The buffer never grows beyond its cap and keeps the newest audio
/// WHY: Whole-run recordings must not grow memory without bound
#[test]
fn given_full_buffer_when_more_samples_pushed_then_oldest_dropped() {
    // Given: A buffer filled to its cap of 8 with zeros
    let max_samples = 8;
    let mut buf: VecDeque<f32> = std::iter::repeat_n(0.0, max_samples).collect();

    // When: Pushing three new samples
    push_mono(&mut buf, &[1.0, 1.0, 1.0], 1, max_samples);

    // Then: Still 8 long, the last three are the new samples
    assert_eq!(buf.len(), max_samples);
    assert!(buf.iter().skip(5).all(|s| (*s - 1.0).abs() < f32::EPSILON));
    assert!(buf.iter().take(5).all(|s| s.abs() < f32::EPSILON));
}

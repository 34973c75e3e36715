// Unit tests for WindowBuffer covering both buffering policies,
// readiness gating, and fill-status reporting.

use super::*;
use crate::landmarks::LandmarkSample;
use crate::recognition::features::FeatureExtractor;

/// Build a feature vector whose first value tags its arrival order
fn frame(tag: f32) -> FeatureVector {
    let sample = LandmarkSample {
        pose: vec![[tag, 0.0, 0.0]],
        ..LandmarkSample::empty()
    };
    FeatureExtractor::new().extract(&sample)
}

fn tag_of(vector: &FeatureVector) -> f32 {
    vector.as_slice()[0]
}

#[test]
fn test_sliding_never_exceeds_capacity() {
    let mut buffer = WindowBuffer::new(BufferMode::Sliding);
    for i in 0..100 {
        buffer.append(frame(i as f32));
        assert!(buffer.len() <= SEQUENCE_LENGTH);
    }
    assert_eq!(buffer.len(), SEQUENCE_LENGTH);
}

#[test]
fn test_sliding_keeps_most_recent_in_arrival_order() {
    let mut buffer = WindowBuffer::new(BufferMode::Sliding);
    for i in 0..45 {
        buffer.append(frame(i as f32));
    }
    let snapshot = buffer.snapshot();
    assert_eq!(snapshot.len(), SEQUENCE_LENGTH);
    // Frames 15..44 survive, oldest first
    for (offset, vector) in snapshot.iter().enumerate() {
        assert_eq!(tag_of(vector), (15 + offset) as f32);
    }
}

#[test]
fn test_sliding_partial_fill_preserves_order() {
    let mut buffer = WindowBuffer::new(BufferMode::Sliding);
    for i in 0..10 {
        buffer.append(frame(i as f32));
    }
    let snapshot = buffer.snapshot();
    assert_eq!(snapshot.len(), 10);
    for (i, vector) in snapshot.iter().enumerate() {
        assert_eq!(tag_of(vector), i as f32);
    }
}

#[test]
fn test_batch_drops_appends_when_full() {
    let mut buffer = WindowBuffer::new(BufferMode::Batch);
    for i in 0..SEQUENCE_LENGTH + 5 {
        buffer.append(frame(i as f32));
    }
    assert_eq!(buffer.len(), SEQUENCE_LENGTH);
    // The overflow frames were dropped, not slid in
    assert_eq!(tag_of(&buffer.snapshot()[0]), 0.0);
    assert_eq!(
        tag_of(&buffer.snapshot()[SEQUENCE_LENGTH - 1]),
        (SEQUENCE_LENGTH - 1) as f32
    );
}

#[test]
fn test_batch_refills_after_clear() {
    let mut buffer = WindowBuffer::new(BufferMode::Batch);
    for i in 0..SEQUENCE_LENGTH {
        buffer.append(frame(i as f32));
    }
    assert!(buffer.is_ready());
    buffer.clear();
    assert!(buffer.is_empty());
    buffer.append(frame(99.0));
    assert_eq!(buffer.len(), 1);
    assert_eq!(tag_of(&buffer.snapshot()[0]), 99.0);
}

#[test]
fn test_is_ready_requires_full_window() {
    let mut buffer = WindowBuffer::new(BufferMode::Sliding);
    for i in 0..SEQUENCE_LENGTH - 1 {
        buffer.append(frame(i as f32));
        assert!(!buffer.is_ready());
    }
    buffer.append(frame(29.0));
    assert!(buffer.is_ready());
}

#[test]
fn test_is_ready_false_while_inference_in_flight() {
    let mut buffer = WindowBuffer::new(BufferMode::Sliding);
    for i in 0..SEQUENCE_LENGTH {
        buffer.append(frame(i as f32));
    }
    assert!(buffer.is_ready());

    buffer.begin_inference();
    assert!(!buffer.is_ready());
    assert!(buffer.inference_in_flight());

    buffer.finish_inference();
    assert!(buffer.is_ready());
}

#[test]
#[should_panic(expected = "already in flight")]
fn test_double_begin_inference_panics() {
    let mut buffer = WindowBuffer::new(BufferMode::Sliding);
    buffer.begin_inference();
    buffer.begin_inference();
}

#[test]
fn test_status_percentage_monotonic_and_exact() {
    let mut buffer = WindowBuffer::new(BufferMode::Sliding);
    let mut last = -1.0f32;
    for i in 0..SEQUENCE_LENGTH {
        buffer.append(frame(i as f32));
        let status = buffer.status();
        assert_eq!(status.current, i + 1);
        assert_eq!(status.required, SEQUENCE_LENGTH);
        assert!(status.percentage >= last);
        assert!((0.0..=100.0).contains(&status.percentage));
        last = status.percentage;
    }
    assert!((buffer.status().percentage - 100.0).abs() < f32::EPSILON);
}

#[test]
fn test_clear_resets_status() {
    let mut buffer = WindowBuffer::new(BufferMode::Sliding);
    for i in 0..SEQUENCE_LENGTH {
        buffer.append(frame(i as f32));
    }
    buffer.clear();
    let status = buffer.status();
    assert_eq!(status.current, 0);
    assert_eq!(status.percentage, 0.0);
    assert!(!buffer.is_ready());

    // Idempotent
    buffer.clear();
    assert!(buffer.is_empty());
}

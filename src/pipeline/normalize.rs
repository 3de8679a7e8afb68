use tracing::info;

use crate::models::{RawTranscript, Segment, Transcript, distinct_speakers};

/// Placeholder label for utterances the service left unattributed.
pub const DEFAULT_SPEAKER: &str = "Speaker";

/// Convert a raw transcription result into the canonical transcript shape.
///
/// Millisecond offsets become seconds, a missing speaker label becomes the
/// generic placeholder, missing text becomes empty. When the service
/// supplied no usable aggregate text it is synthesized by joining segment
/// texts with single spaces. An empty utterance list yields an empty
/// transcript.
pub fn normalize_transcript(raw: &RawTranscript) -> Transcript {
    let segments: Vec<Segment> = raw
        .utterances
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|u| {
            Segment::new(
                u.start as f64 / 1000.0,
                u.end as f64 / 1000.0,
                u.speaker.as_deref().unwrap_or(DEFAULT_SPEAKER),
                u.text.as_deref().unwrap_or(""),
            )
        })
        .collect();

    let speakers = distinct_speakers(&segments);

    let text = match raw.text.as_deref() {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" "),
    };

    info!(
        "Normalized transcript: {} segments, {} speakers",
        segments.len(),
        speakers.len()
    );

    Transcript {
        text,
        segments,
        speakers,
    }
}

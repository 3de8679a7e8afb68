use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One diarized utterance with timestamps in seconds.
///
/// Immutable once normalized. Reconciliation produces a new segment
/// sequence with `speaker` replaced by the resolved display name; the
/// originals are left untouched so the raw/derived distinction stays
/// auditable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start offset in seconds
    pub start: f64,
    /// End offset in seconds
    pub end: f64,
    /// Opaque diarization tag before reconciliation, resolved display
    /// name after
    pub speaker: String,
    /// Utterance text - never modified by the pipeline
    pub text: String,
}

impl Segment {
    pub fn new(
        start: f64,
        end: f64,
        speaker: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

/// Canonical transcript shape consumed by the reconciliation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Aggregate text: the service's own when present, otherwise
    /// synthesized from segment texts
    pub text: String,
    /// Utterances in original order
    pub segments: Vec<Segment>,
    /// Distinct speaker labels in first-appearance order
    pub speakers: Vec<String>,
}

/// Distinct speaker labels in first-appearance order.
///
/// This ordering is load-bearing: the positional fallback pass assigns
/// leftover candidates by it.
pub fn distinct_speakers(segments: &[Segment]) -> Vec<String> {
    let mut seen = Vec::new();
    for segment in segments {
        if !seen.iter().any(|s| s == &segment.speaker) {
            seen.push(segment.speaker.clone());
        }
    }
    seen
}

/// Resolved tag -> display-name mapping for one transcript.
///
/// `order` carries the label order so iteration over the map is
/// deterministic. Exactly one entry per distinct tag; an unmatched tag
/// maps to itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeakerMap {
    /// Distinct speaker tags in first-appearance order
    pub order: Vec<String>,
    /// Tag -> resolved display name, one entry per tag in `order`
    pub names: HashMap<String, String>,
}

impl SpeakerMap {
    /// Display name for a tag; the tag itself when unmapped.
    pub fn display_name<'a>(&'a self, tag: &'a str) -> &'a str {
        self.names.get(tag).map(|n| n.as_str()).unwrap_or(tag)
    }

    /// Resolved display names in label order.
    pub fn resolved_names(&self) -> Vec<String> {
        self.order
            .iter()
            .map(|tag| self.display_name(tag).to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_speakers_first_appearance_order() {
        let segments = vec![
            Segment::new(0.0, 1.0, "B", "hi"),
            Segment::new(1.0, 2.0, "A", "hello"),
            Segment::new(2.0, 3.0, "B", "again"),
        ];

        assert_eq!(distinct_speakers(&segments), vec!["B", "A"]);
    }

    #[test]
    fn test_distinct_speakers_empty() {
        assert!(distinct_speakers(&[]).is_empty());
    }

    #[test]
    fn test_display_name_falls_back_to_tag() {
        let mut map = SpeakerMap::default();
        map.order.push("A".to_string());
        map.names.insert("A".to_string(), "Dana".to_string());

        assert_eq!(map.display_name("A"), "Dana");
        assert_eq!(map.display_name("Z"), "Z");
    }

    #[test]
    fn test_resolved_names_follow_label_order() {
        let map = SpeakerMap {
            order: vec!["B".to_string(), "A".to_string()],
            names: HashMap::from([
                ("A".to_string(), "Dana".to_string()),
                ("B".to_string(), "Yossi".to_string()),
            ]),
        };

        assert_eq!(map.resolved_names(), vec!["Yossi", "Dana"]);
    }

    #[test]
    fn test_segment_deserializes() {
        let json = r#"{"start": 1.5, "end": 4.2, "speaker": "1", "text": "hello"}"#;
        let segment: Segment = serde_json::from_str(json).unwrap();

        assert_eq!(segment.start, 1.5);
        assert_eq!(segment.speaker, "1");
    }
}

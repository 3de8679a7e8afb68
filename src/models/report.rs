use serde::{Deserialize, Serialize};

use super::Segment;

/// Sentinel shown in the items table when an owner or due date is unknown.
pub const UNSPECIFIED: &str = "—";

/// Maximum number of rows in the topics table.
pub const MAX_REPORT_ITEMS: usize = 8;

/// One row of the topics/decisions/owners/due table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportItem {
    /// 1-based row number; always renumbered by the assembler
    pub ordinal: u32,
    pub topic: String,
    pub decisions: String,
    /// "—" when unknown
    pub owner: String,
    /// "—" when unknown
    pub due: String,
}

impl ReportItem {
    pub fn new(ordinal: u32, topic: impl Into<String>, decisions: impl Into<String>) -> Self {
        Self {
            ordinal,
            topic: topic.into(),
            decisions: decisions.into(),
            owner: UNSPECIFIED.to_string(),
            due: UNSPECIFIED.to_string(),
        }
    }

    /// Fixed fallback rows used when summarization is off or degraded.
    pub fn placeholders() -> Vec<ReportItem> {
        vec![
            ReportItem::new(1, "Opening", "Introduction of meeting goals"),
            ReportItem::new(2, "Status", "Progress and dependency updates"),
        ]
    }
}

/// Form metadata accompanying a report request.
#[derive(Debug, Clone, Default)]
pub struct MeetingMeta {
    pub title: String,
    pub date: String,
    pub scribe: String,
    pub distribution: String,
}

/// POST /api/report request body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportRequest {
    pub meeting_title: Option<String>,
    pub meeting_date: Option<String>,
    pub scribe_name: Option<String>,
    pub distribution: Option<String>,
    /// Free-form manual participant list
    pub participants: Option<String>,
    pub audio_url: Option<String>,
    pub language_code: Option<String>,
    /// Previously returned transcription job id; when present the handler
    /// skips submission and only polls this job
    pub job_id: Option<String>,
}

impl ReportRequest {
    /// Metadata with the form-field defaults applied.
    pub fn meta(&self) -> MeetingMeta {
        MeetingMeta {
            title: self
                .meeting_title
                .clone()
                .unwrap_or_else(|| "Meeting summary".to_string()),
            date: self.meeting_date.clone().unwrap_or_default(),
            scribe: self.scribe_name.clone().unwrap_or_default(),
            distribution: self.distribution.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendee {
    pub name: String,
}

/// Transcript portion of the structured report payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSection {
    /// Resolved display names in label order
    pub speakers: Vec<String>,
    /// Remapped segments
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    pub scribe_name: String,
    pub distribution: String,
}

/// Structured report payload; the rendered document embeds the same data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub title: String,
    pub attendees: Vec<Attendee>,
    pub items: Vec<ReportItem>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    pub transcript: TranscriptSection,
    pub footer: Footer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_carry_sentinels() {
        let items = ReportItem::placeholders();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].ordinal, 1);
        assert_eq!(items[0].topic, "Opening");
        assert_eq!(items[1].ordinal, 2);
        assert!(items.iter().all(|i| i.owner == UNSPECIFIED && i.due == UNSPECIFIED));
    }

    #[test]
    fn test_request_camel_case_fields() {
        let json = r#"{
            "meetingTitle": "Weekly sync",
            "meetingDate": "2025-03-02",
            "scribeName": "Ruth",
            "participants": "Dana, Yossi",
            "audioUrl": "https://example.com/a.mp3",
            "jobId": "job-42"
        }"#;
        let request: ReportRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.meeting_title.as_deref(), Some("Weekly sync"));
        assert_eq!(request.participants.as_deref(), Some("Dana, Yossi"));
        assert_eq!(request.job_id.as_deref(), Some("job-42"));
        assert!(request.distribution.is_none());
    }

    #[test]
    fn test_meta_defaults() {
        let request: ReportRequest = serde_json::from_str("{}").unwrap();
        let meta = request.meta();

        assert_eq!(meta.title, "Meeting summary");
        assert_eq!(meta.date, "");
        assert_eq!(meta.scribe, "");
    }

    #[test]
    fn test_report_data_skips_empty_summary() {
        let data = ReportData {
            title: "Weekly sync – 2025-03-02".to_string(),
            attendees: vec![Attendee {
                name: "Dana".to_string(),
            }],
            items: ReportItem::placeholders(),
            summary: String::new(),
            transcript: TranscriptSection {
                speakers: vec![],
                segments: vec![],
            },
            footer: Footer {
                scribe_name: "Ruth".to_string(),
                distribution: "team".to_string(),
            },
        };

        let value = serde_json::to_value(&data).unwrap();
        assert!(value.get("summary").is_none());
        assert_eq!(value["footer"]["scribeName"], "Ruth");
    }
}

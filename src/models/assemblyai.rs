use serde::{Deserialize, Serialize};

/// Request body for creating a transcription job.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptRequest {
    pub audio_url: String,
    pub speaker_labels: bool,
    pub language_code: String,
    pub punctuate: bool,
    pub format_text: bool,
}

impl TranscriptRequest {
    /// Standard job settings: diarization on, text cleanup on.
    pub fn new(audio_url: impl Into<String>, language_code: impl Into<String>) -> Self {
        Self {
            audio_url: audio_url.into(),
            speaker_labels: true,
            language_code: language_code.into(),
            punctuate: true,
            format_text: true,
        }
    }
}

/// Job status reported by the transcription service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptStatus {
    Queued,
    Processing,
    Completed,
    Error,
}

impl TranscriptStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }
}

/// One diarized utterance on the wire, timestamps in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawUtterance {
    #[serde(default)]
    pub start: u64,
    #[serde(default)]
    pub end: u64,
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Transcription job state as returned by both the create call and the
/// status poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTranscript {
    #[serde(default)]
    pub id: String,
    pub status: TranscriptStatus,
    /// Diarized utterances; present once the job completes
    #[serde(default)]
    pub utterances: Option<Vec<RawUtterance>>,
    /// Full transcript text; present once the job completes
    #[serde(default)]
    pub text: Option<String>,
    /// Failure detail when status is `Error`
    #[serde(default)]
    pub error: Option<String>,
}

pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod transcription;

pub use config::ReportConfig;
pub use error::{ReportError, ReportResult};
pub use llm::{AnthropicClient, AnthropicConfig, SummaryOutcome, summarize_transcript};
pub use models::{
    MeetingMeta, RawTranscript, ReportData, ReportItem, ReportRequest, Segment, SpeakerMap,
    Transcript,
};
pub use pipeline::{
    AssembledReport, assemble_report, attendee_roster, normalize_transcript, parse_participants,
    reconcile_speakers,
};
pub use transcription::{PollPolicy, TranscriptPoll, TranscriptionClient, TranscriptionConfig};

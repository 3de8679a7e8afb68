use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};
use tracing::info;
use uuid::Uuid;

use crate::api::error::ApiResult;
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::llm::{AnthropicClient, AnthropicConfig, summarize_transcript};
use crate::models::{
    RawTranscript, RawUtterance, ReportItem, ReportRequest, TranscriptStatus, distinct_speakers,
};
use crate::pipeline::{
    assemble_report, attendee_roster, normalize_transcript, parse_participants,
    reconcile_speakers,
};
use crate::transcription::{
    PollPolicy, TranscriptPoll, TranscriptionClient, TranscriptionConfig,
};

/// GET /api/health
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true, "message": "report API is alive" }))
}

/// POST /api/report
///
/// Runs the full pipeline for one request: transcript acquisition,
/// speaker reconciliation, optional summarization, assembly. Replies 202
/// with the job id when the transcription job outlives the polling
/// budget; the client retries later with that id in `jobId`.
pub async fn create_report(
    State(config): State<ReportConfig>,
    Json(request): Json<ReportRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let request_id = Uuid::new_v4();
    info!(
        "[{}] Report requested (live transcription: {}, summarization: {})",
        request_id, config.use_live_transcription, config.use_summarization
    );

    let meta = request.meta();
    let manual = parse_participants(request.participants.as_deref().unwrap_or(""));

    let raw = if !config.use_live_transcription {
        demo_transcript()
    } else {
        // Reject before any credential lookup or upstream call.
        let audio_url = request.audio_url.as_deref().unwrap_or("");
        if request.job_id.is_none() && audio_url.is_empty() {
            return Err(ReportError::invalid_input(
                "audioUrl is required when live transcription is enabled",
            )
            .into());
        }

        let client = TranscriptionClient::new(TranscriptionConfig::from_env()?);
        let policy = PollPolicy::new(config.poll_interval_ms, config.poll_timeout_ms);

        let job_id = match &request.job_id {
            Some(job_id) => {
                info!("[{}] Resuming transcription job {}", request_id, job_id);
                job_id.clone()
            }
            None => {
                let language = request.language_code.as_deref().unwrap_or("en");
                client.submit(audio_url, language).await?
            }
        };

        match client.await_transcript(&job_id, &policy).await? {
            TranscriptPoll::Ready(raw) => raw,
            TranscriptPoll::Processing { job_id } => {
                info!("[{}] Job {} still processing, replying 202", request_id, job_id);
                return Ok((
                    StatusCode::ACCEPTED,
                    Json(json!({ "status": "processing", "jobId": job_id })),
                ));
            }
        }
    };

    let transcript = normalize_transcript(&raw);
    let reconciled = reconcile_speakers(&transcript.segments, &manual);
    let attendees = attendee_roster(&manual, &reconciled.map);
    let speakers = distinct_speakers(&reconciled.segments);

    let (items, summary) = if config.use_summarization {
        let client = AnthropicClient::new(AnthropicConfig::from_env()?);
        let outcome =
            summarize_transcript(&client, &transcript.text, &meta.title, &meta.date).await?;
        (outcome.items, outcome.summary)
    } else {
        (ReportItem::placeholders(), String::new())
    };

    let report = assemble_report(
        &meta,
        &attendees,
        &speakers,
        &reconciled.segments,
        &items,
        &summary,
        !config.use_live_transcription,
    );

    info!(
        "[{}] Report assembled: {} attendees, {} segments, {} items",
        request_id,
        attendees.len(),
        report.data.transcript.segments.len(),
        report.data.items.len()
    );

    Ok((
        StatusCode::OK,
        Json(json!({ "html": report.html, "data": report.data })),
    ))
}

/// Built-in diarized transcript used when live transcription is off.
fn demo_transcript() -> RawTranscript {
    RawTranscript {
        id: "demo".to_string(),
        status: TranscriptStatus::Completed,
        utterances: Some(vec![
            RawUtterance {
                start: 0,
                end: 2_500,
                speaker: Some("A".to_string()),
                text: Some("Hello everyone, Dana here, let's get started.".to_string()),
            },
            RawUtterance {
                start: 2_600,
                end: 8_000,
                speaker: Some("B".to_string()),
                text: Some("Thanks Dana. First on the agenda is the status update.".to_string()),
            },
            RawUtterance {
                start: 8_100,
                end: 12_000,
                speaker: Some("A".to_string()),
                text: Some("We'll go over the schedule afterwards.".to_string()),
            },
        ]),
        text: None,
        error: None,
    }
}

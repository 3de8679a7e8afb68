use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::error::{ReportError, ReportResult};
use crate::models::{RawTranscript, TranscriptRequest, TranscriptStatus};

const API_BASE: &str = "https://api.assemblyai.com/v2";

/// Configuration for the transcription API client
#[derive(Debug, Clone)]
pub struct TranscriptionConfig {
    /// API key (from ASSEMBLYAI_API_KEY env var)
    pub api_key: String,
    /// Service endpoint (ASSEMBLYAI_BASE_URL env var overrides the default)
    pub base_url: String,
}

impl TranscriptionConfig {
    /// Create config from environment variables.
    ///
    /// A non-blank `ASSEMBLYAI_BASE_URL` replaces the default endpoint.
    pub fn from_env() -> ReportResult<Self> {
        let api_key = std::env::var("ASSEMBLYAI_API_KEY")
            .map_err(|_| ReportError::config("ASSEMBLYAI_API_KEY environment variable not set"))?;
        let endpoint = std::env::var("ASSEMBLYAI_BASE_URL")
            .ok()
            .filter(|v| !v.is_empty());
        Ok(Self::new(api_key, endpoint))
    }

    pub fn new(api_key: impl Into<String>, endpoint: Option<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: endpoint.unwrap_or_else(|| API_BASE.to_string()),
        }
    }
}

/// Bounded polling schedule for transcription jobs.
///
/// Owned by the caller: the client only interprets one response at a time
/// and this policy decides how often and for how long to ask.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    /// Delay between status checks
    pub interval: Duration,
    /// Maximum wall-clock budget before giving up
    pub timeout: Duration,
}

impl PollPolicy {
    pub fn new(interval_ms: u64, timeout_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(2_500, 25_000)
    }
}

/// Outcome of a bounded polling run.
#[derive(Debug)]
pub enum TranscriptPoll {
    /// The job completed within the budget
    Ready(RawTranscript),
    /// Budget exhausted while the job was still queued or running; check
    /// again later with the same job id
    Processing { job_id: String },
}

/// Client for the diarized-transcription job API
pub struct TranscriptionClient {
    client: Client,
    config: TranscriptionConfig,
}

impl TranscriptionClient {
    pub fn new(config: TranscriptionConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Submit an audio reference for diarized transcription.
    ///
    /// Returns the job id used for all later status checks.
    pub async fn submit(&self, audio_url: &str, language_code: &str) -> ReportResult<String> {
        let request = TranscriptRequest::new(audio_url, language_code);

        let response = self
            .client
            .post(format!("{}/transcript", self.config.base_url))
            .header("authorization", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ReportError::upstream("transcription", e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::upstream(
                "transcription",
                format!("create failed: {status} - {body}"),
            ));
        }

        let created: RawTranscript = response
            .json()
            .await
            .map_err(|e| ReportError::upstream("transcription", format!("unreadable create response: {e}")))?;

        info!("Submitted transcription job {}", created.id);
        Ok(created.id)
    }

    /// Fetch the current state of a transcription job.
    pub async fn fetch(&self, job_id: &str) -> ReportResult<RawTranscript> {
        let response = self
            .client
            .get(format!("{}/transcript/{job_id}", self.config.base_url))
            .header("authorization", &self.config.api_key)
            .send()
            .await
            .map_err(|e| ReportError::upstream("transcription", e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::upstream(
                "transcription",
                format!("status check failed: {status} - {body}"),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| ReportError::upstream("transcription", format!("unreadable status response: {e}")))
    }

    /// Poll a job until it reaches a terminal status or the policy budget
    /// runs out.
    ///
    /// Exhausting the budget is not a failure: the caller gets back
    /// `Processing` with the job id for a later check. An `error` status
    /// from the service is a failure.
    pub async fn await_transcript(
        &self,
        job_id: &str,
        policy: &PollPolicy,
    ) -> ReportResult<TranscriptPoll> {
        let started = Instant::now();

        while started.elapsed() < policy.timeout {
            tokio::time::sleep(policy.interval).await;

            let raw = self.fetch(job_id).await?;
            match raw.status {
                TranscriptStatus::Completed => {
                    info!("Transcription job {} completed", job_id);
                    return Ok(TranscriptPoll::Ready(raw));
                }
                TranscriptStatus::Error => {
                    let detail = raw
                        .error
                        .unwrap_or_else(|| "unspecified transcription failure".to_string());
                    return Err(ReportError::upstream("transcription", detail));
                }
                status => debug!("Transcription job {} still {:?}", job_id, status),
            }
        }

        warn!(
            "Transcription job {} not finished within {:?}",
            job_id, policy.timeout
        );
        Ok(TranscriptPoll::Processing {
            job_id: job_id.to_string(),
        })
    }
}

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type ReportResult<T> = Result<T, ReportError>;

/// Failure taxonomy for report generation.
///
/// A transcription job that is still pending when the polling budget runs
/// out is not represented here: that is the `TranscriptPoll::Processing`
/// outcome, which callers surface to the client for a later retry.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Required configuration or credential is missing for an enabled call.
    #[error("configuration error: {0}")]
    Config(String),

    /// The request itself is unusable; raised before any upstream call.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An external collaborator returned an error status or a
    /// non-success response.
    #[error("{service} request failed: {detail}")]
    Upstream { service: String, detail: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn upstream(service: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Upstream {
            service: service.into(),
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_names_service() {
        let err = ReportError::upstream("transcription", "status 503");
        assert_eq!(err.to_string(), "transcription request failed: status 503");
    }

    #[test]
    fn test_config_message() {
        let err = ReportError::config("ASSEMBLYAI_API_KEY not set");
        assert!(err.to_string().starts_with("configuration error:"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ReportError = io.into();
        assert!(matches!(err, ReportError::Io(_)));
    }
}

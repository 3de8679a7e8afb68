/// Runtime mode switches for report generation.
///
/// Core pipeline components never read the process environment; they are
/// handed this struct from the binary edge.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Submit audio to the live transcription service. When false, a
    /// built-in demo transcript feeds the pipeline instead.
    pub use_live_transcription: bool,
    /// Ask the summarization model for the topics table. When false, the
    /// report carries the fixed placeholder rows.
    pub use_summarization: bool,
    /// Delay between transcription job status checks, in milliseconds.
    pub poll_interval_ms: u64,
    /// Wall-clock budget for the whole polling loop, in milliseconds.
    pub poll_timeout_ms: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            use_live_transcription: false,
            use_summarization: false,
            poll_interval_ms: 2_500,
            poll_timeout_ms: 25_000,
        }
    }
}

impl ReportConfig {
    /// Build the config from the process environment.
    ///
    /// `DEMO_MODE` counts as true when unset or blank, so an unconfigured
    /// deployment serves demo reports instead of failing on missing
    /// credentials.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            use_live_transcription: !parse_flag(std::env::var("DEMO_MODE").ok(), true),
            use_summarization: parse_flag(std::env::var("USE_SUMMARIZATION").ok(), false),
            poll_interval_ms: parse_u64(
                std::env::var("POLL_INTERVAL_MS").ok(),
                defaults.poll_interval_ms,
            ),
            poll_timeout_ms: parse_u64(
                std::env::var("POLL_TIMEOUT_MS").ok(),
                defaults.poll_timeout_ms,
            ),
        }
    }
}

/// Boolean switch semantics: unset and blank values count as the default.
fn parse_flag(value: Option<String>, default: bool) -> bool {
    match value.filter(|v| !v.is_empty()) {
        Some(v) => v.to_lowercase() == "true",
        None => default,
    }
}

fn parse_u64(value: Option<String>, default: u64) -> u64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_needs_no_credentials() {
        let config = ReportConfig::default();
        assert!(!config.use_live_transcription);
        assert!(!config.use_summarization);
        assert_eq!(config.poll_interval_ms, 2_500);
        assert_eq!(config.poll_timeout_ms, 25_000);
    }

    #[test]
    fn test_blank_demo_mode_keeps_demo_default() {
        assert!(parse_flag(Some(String::new()), true));
        assert!(!parse_flag(Some(String::new()), false));
    }

    #[test]
    fn test_explicit_flag_values_win() {
        assert!(!parse_flag(Some("false".to_string()), true));
        assert!(parse_flag(Some("True".to_string()), false));
        assert!(parse_flag(None, true));
    }

    #[test]
    fn test_poll_fields_ignore_unparseable_values() {
        assert_eq!(parse_u64(Some("oops".to_string()), 2_500), 2_500);
        assert_eq!(parse_u64(Some("4000".to_string()), 2_500), 4_000);
        assert_eq!(parse_u64(None, 25_000), 25_000);
    }
}

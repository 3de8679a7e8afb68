use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use rapporteur::models::distinct_speakers;
use rapporteur::{
    AssembledReport, MeetingMeta, RawTranscript, ReportConfig, ReportItem, ReportResult,
    assemble_report, attendee_roster, normalize_transcript, parse_participants,
    reconcile_speakers,
};

#[derive(Parser)]
#[command(name = "rapporteur")]
#[command(author, version, about = "Meeting report generator with speaker-name reconciliation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the report API over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Render a report from a saved transcription result
    Render {
        /// Input file with the raw transcription result (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Free-form participant list (comma-, semicolon-, or newline-separated)
        #[arg(short, long, default_value = "")]
        attendees: String,

        /// Meeting title
        #[arg(long, default_value = "Meeting report")]
        title: String,

        /// Meeting date (defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Scribe name shown in the footer
        #[arg(long, default_value = "")]
        scribe: String,

        /// Distribution list shown in the footer
        #[arg(long, default_value = "")]
        distribution: String,

        /// Directory for report.html and report.json
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, verbose } => {
            setup_logging(verbose);
            serve(port).await
        }
        Commands::Render {
            input,
            attendees,
            title,
            date,
            scribe,
            distribution,
            output_dir,
            verbose,
        } => {
            setup_logging(verbose);
            render_report(input, attendees, title, date, scribe, distribution, output_dir)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn serve(port: u16) -> Result<()> {
    let config = ReportConfig::from_env();
    info!(
        "Starting report API (live transcription: {}, summarization: {})",
        config.use_live_transcription, config.use_summarization
    );

    let app = rapporteur::api::router(config);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;

    info!("Report API listening on http://0.0.0.0:{}", port);
    axum::serve(listener, app).await?;

    Ok(())
}

fn render_report(
    input: PathBuf,
    attendees: String,
    title: String,
    date: Option<String>,
    scribe: String,
    distribution: String,
    output_dir: PathBuf,
) -> Result<()> {
    info!("Loading transcription result from {:?}", input);
    let raw = load_transcript(&input)
        .with_context(|| format!("Failed to load transcription result from {:?}", input))?;

    let manual = parse_participants(&attendees);
    let transcript = normalize_transcript(&raw);

    info!(
        "Loaded {} segments, {} speakers, {} manual participants",
        transcript.segments.len(),
        transcript.speakers.len(),
        manual.len()
    );

    let reconciled = reconcile_speakers(&transcript.segments, &manual);
    let roster = attendee_roster(&manual, &reconciled.map);
    let speakers = distinct_speakers(&reconciled.segments);

    let meta = MeetingMeta {
        title,
        date: date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string()),
        scribe,
        distribution,
    };

    let report = assemble_report(
        &meta,
        &roster,
        &speakers,
        &reconciled.segments,
        &ReportItem::placeholders(),
        "",
        false,
    );

    let (html_path, json_path) = write_artifacts(&report, &output_dir)
        .with_context(|| format!("Failed to write report into {:?}", output_dir))?;

    info!("Report written to {:?}", html_path);
    info!("Structured data written to {:?}", json_path);
    info!(
        "Complete: {} attendees, {} segments ({} speakers matched by content, {} by position)",
        roster.len(),
        report.data.transcript.segments.len(),
        reconciled.content_matches,
        reconciled.positional_matches
    );

    Ok(())
}

/// Read a saved transcription result from disk.
fn load_transcript(path: &Path) -> ReportResult<RawTranscript> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write report.html and report.json into `output_dir`, creating it first.
fn write_artifacts(
    report: &AssembledReport,
    output_dir: &Path,
) -> ReportResult<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(output_dir)?;

    let html_path = output_dir.join("report.html");
    std::fs::write(&html_path, &report.html)?;

    let json_path = output_dir.join("report.json");
    let file = std::fs::File::create(&json_path)?;
    serde_json::to_writer_pretty(file, &report.data)?;

    Ok((html_path, json_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapporteur::ReportError;
    use tempfile::tempdir;

    #[test]
    fn test_render_report_writes_both_artifacts() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("raw.json");
        std::fs::write(
            &input,
            r#"{
                "id": "job-1",
                "status": "completed",
                "utterances": [
                    {"start": 0, "end": 2500, "speaker": "A", "text": "Hi, this is Dana speaking"},
                    {"start": 2600, "end": 8000, "speaker": "B", "text": "thanks Dana, I'm continuing"}
                ]
            }"#,
        )
        .unwrap();

        let out = dir.path().join("out");
        render_report(
            input,
            "Dana, Yossi".to_string(),
            "Weekly sync".to_string(),
            Some("2025-03-02".to_string()),
            "Ruth".to_string(),
            "team".to_string(),
            out.clone(),
        )
        .unwrap();

        let html = std::fs::read_to_string(out.join("report.html")).unwrap();
        assert!(html.contains("<strong>Dana:</strong>"));
        assert!(html.contains("<strong>Yossi:</strong>"));
        assert!(!html.contains("demo mode active"));

        let json = std::fs::read_to_string(out.join("report.json")).unwrap();
        let data: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(data["title"], "Weekly sync – 2025-03-02");
        assert_eq!(data["transcript"]["segments"][0]["speaker"], "Dana");
        assert_eq!(data["transcript"]["segments"][1]["speaker"], "Yossi");
        assert_eq!(data["footer"]["scribeName"], "Ruth");
    }

    #[test]
    fn test_render_report_rejects_unreadable_input() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.json");

        let err = render_report(
            missing,
            String::new(),
            "Meeting report".to_string(),
            None,
            String::new(),
            String::new(),
            dir.path().to_path_buf(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("Failed to load transcription result"));
    }

    #[test]
    fn test_load_transcript_missing_file_is_io_error() {
        let dir = tempdir().unwrap();

        let err = load_transcript(&dir.path().join("nope.json")).unwrap_err();

        assert!(matches!(err, ReportError::Io(_)));
    }

    #[test]
    fn test_load_transcript_bad_json_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("raw.json");
        std::fs::write(&path, "not a transcript").unwrap();

        let err = load_transcript(&path).unwrap_err();

        assert!(matches!(err, ReportError::Json(_)));
    }
}

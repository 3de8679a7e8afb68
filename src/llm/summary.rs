use serde::Deserialize;
use tracing::{info, warn};

use crate::error::ReportResult;
use crate::llm::client::{AnthropicClient, Tool};
use crate::models::{MAX_REPORT_ITEMS, ReportItem, UNSPECIFIED};

/// Upper bound on transcript characters sent to the model.
pub const MAX_EXCERPT_CHARS: usize = 8_000;

pub const SUMMARY_TOOL_NAME: &str = "submit_meeting_summary";

/// Sanitized summarization outcome
#[derive(Debug, Clone, Default)]
pub struct SummaryOutcome {
    /// Topic rows ready for the report table
    pub items: Vec<ReportItem>,
    /// Prose summary, possibly empty
    pub summary: String,
}

/// Run the summarization call end to end.
///
/// A non-success response from the API surfaces as an upstream failure;
/// a successful response that cannot be interpreted degrades to an empty
/// outcome so the report can still be produced.
pub async fn summarize_transcript(
    client: &AnthropicClient,
    transcript_text: &str,
    meeting_title: &str,
    meeting_date: &str,
) -> ReportResult<SummaryOutcome> {
    let system = build_summary_system_prompt();
    let user = build_summary_user_prompt(transcript_text, meeting_title, meeting_date);

    let input = client.send_with_tool(&system, &user, summary_tool()).await?;
    let outcome = parse_summary_response(input);

    info!(
        "Summarization produced {} items ({} summary)",
        outcome.items.len(),
        if outcome.summary.is_empty() { "no" } else { "with" }
    );
    Ok(outcome)
}

/// Build the system prompt for meeting summarization
pub fn build_summary_system_prompt() -> String {
    r#"You are an expert meeting secretary.

Your task is to read a meeting transcript and extract a concise, factual
summary table of the topics that were discussed.

## Guidelines

1. **One row per topic**: group related discussion into a single topic row.
2. **Decisions over chatter**: record what was decided or concluded, not who said what.
3. **Owners and due dates**: fill them only when the transcript states them; otherwise leave them null.
4. **No invention**: never fabricate names, dates, or decisions that are not in the transcript.
5. **At most 8 rows**: keep the table short; merge minor topics.

## Output Format

Use the submit_meeting_summary tool to provide the table and a short prose summary."#
        .to_string()
}

/// Build the user prompt around a bounded transcript excerpt
pub fn build_summary_user_prompt(
    transcript_text: &str,
    meeting_title: &str,
    meeting_date: &str,
) -> String {
    let mut prompt = String::new();

    prompt.push_str("# Meeting\n\n");
    prompt.push_str(&format!("Title: {}\n", meeting_title));
    prompt.push_str(&format!("Date: {}\n\n", meeting_date));

    prompt.push_str("# Transcript\n\n");
    prompt.push_str(bounded_excerpt(transcript_text, MAX_EXCERPT_CHARS));
    prompt.push_str("\n\n# Task\n\n");
    prompt.push_str(
        "Extract the topics, decisions, owners, and due dates from the transcript above. ",
    );
    prompt.push_str("Use the submit_meeting_summary tool to submit the table and summary.\n");

    prompt
}

/// Truncate to at most `max_chars` characters, on a char boundary.
fn bounded_excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Tool definition for the summary call
pub fn summary_tool() -> Tool {
    Tool {
        name: SUMMARY_TOOL_NAME.to_string(),
        description: "Submit the structured meeting summary table".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "items": {
                    "type": "array",
                    "description": "Topic rows, at most 8",
                    "items": {
                        "type": "object",
                        "properties": {
                            "topic": {"type": "string"},
                            "decisions": {"type": "string"},
                            "owner": {
                                "type": ["string", "null"],
                                "description": "Responsible person, or null when not stated"
                            },
                            "due": {
                                "type": ["string", "null"],
                                "description": "Due date, or null when not stated"
                            }
                        },
                        "required": ["topic", "decisions"]
                    }
                },
                "summary": {
                    "type": "string",
                    "description": "Short prose summary of the meeting"
                }
            },
            "required": ["items", "summary"]
        }),
    }
}

/// Interpret a tool response, degrading to an empty outcome when the
/// payload is missing or malformed.
pub fn parse_summary_response(input: Option<serde_json::Value>) -> SummaryOutcome {
    let value = match input {
        Some(value) => value,
        None => {
            warn!("Summarization returned no tool output; using empty summary");
            return SummaryOutcome::default();
        }
    };

    match serde_json::from_value::<SummaryPayload>(value) {
        Ok(payload) => sanitize(payload),
        Err(e) => {
            warn!("Malformed summarization payload ({}); using empty summary", e);
            SummaryOutcome::default()
        }
    }
}

/// Raw tool output before sanitizing
#[derive(Debug, Deserialize)]
struct SummaryPayload {
    #[serde(default)]
    items: Vec<SummaryItem>,
    #[serde(default)]
    summary: String,
}

#[derive(Debug, Deserialize)]
struct SummaryItem {
    #[serde(default)]
    topic: String,
    #[serde(default)]
    decisions: String,
    #[serde(default)]
    owner: Option<String>,
    #[serde(default)]
    due: Option<String>,
}

fn sanitize(payload: SummaryPayload) -> SummaryOutcome {
    let items = payload
        .items
        .into_iter()
        .filter(|item| !item.topic.trim().is_empty())
        .take(MAX_REPORT_ITEMS)
        .enumerate()
        .map(|(i, item)| ReportItem {
            ordinal: (i + 1) as u32,
            topic: item.topic,
            decisions: item.decisions,
            owner: non_blank_or_dash(item.owner),
            due: non_blank_or_dash(item.due),
        })
        .collect();

    SummaryOutcome {
        items,
        summary: payload.summary,
    }
}

fn non_blank_or_dash(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => UNSPECIFIED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_excerpt_char_boundary() {
        assert_eq!(bounded_excerpt("hello", 10), "hello");
        assert_eq!(bounded_excerpt("héllo", 3), "hél");

        let long = "é".repeat(9_000);
        let excerpt = bounded_excerpt(&long, MAX_EXCERPT_CHARS);
        assert_eq!(excerpt.chars().count(), MAX_EXCERPT_CHARS);
    }

    #[test]
    fn test_user_prompt_carries_meeting_context() {
        let prompt = build_summary_user_prompt("we talked", "Weekly sync", "2025-03-02");

        assert!(prompt.contains("Title: Weekly sync"));
        assert!(prompt.contains("Date: 2025-03-02"));
        assert!(prompt.contains("we talked"));
        assert!(prompt.contains(SUMMARY_TOOL_NAME));
    }

    #[test]
    fn test_parse_valid_payload() {
        let input = serde_json::json!({
            "items": [
                {"topic": "Budget", "decisions": "Approved Q3", "owner": "Dana", "due": "2025-04-01"},
                {"topic": "Hiring", "decisions": "Two openings", "owner": null}
            ],
            "summary": "Budget approved, hiring continues."
        });

        let outcome = parse_summary_response(Some(input));

        assert_eq!(outcome.items.len(), 2);
        assert_eq!(outcome.items[0].ordinal, 1);
        assert_eq!(outcome.items[0].owner, "Dana");
        assert_eq!(outcome.items[1].ordinal, 2);
        assert_eq!(outcome.items[1].owner, UNSPECIFIED);
        assert_eq!(outcome.items[1].due, UNSPECIFIED);
        assert_eq!(outcome.summary, "Budget approved, hiring continues.");
    }

    #[test]
    fn test_parse_drops_blank_topics() {
        let input = serde_json::json!({
            "items": [
                {"topic": "  ", "decisions": "noise"},
                {"topic": "Real topic", "decisions": ""}
            ],
            "summary": ""
        });

        let outcome = parse_summary_response(Some(input));

        assert_eq!(outcome.items.len(), 1);
        assert_eq!(outcome.items[0].topic, "Real topic");
        assert_eq!(outcome.items[0].ordinal, 1);
    }

    #[test]
    fn test_parse_caps_item_count() {
        let items: Vec<serde_json::Value> = (0..12)
            .map(|i| serde_json::json!({"topic": format!("t{i}"), "decisions": ""}))
            .collect();
        let input = serde_json::json!({"items": items, "summary": ""});

        let outcome = parse_summary_response(Some(input));
        assert_eq!(outcome.items.len(), MAX_REPORT_ITEMS);
    }

    #[test]
    fn test_parse_malformed_payload_degrades() {
        let outcome = parse_summary_response(Some(serde_json::json!("not an object")));
        assert!(outcome.items.is_empty());
        assert!(outcome.summary.is_empty());
    }

    #[test]
    fn test_parse_missing_payload_degrades() {
        let outcome = parse_summary_response(None);
        assert!(outcome.items.is_empty());
        assert!(outcome.summary.is_empty());
    }

    #[test]
    fn test_summary_tool_schema() {
        let tool = summary_tool();

        assert_eq!(tool.name, SUMMARY_TOOL_NAME);
        assert_eq!(tool.input_schema["required"][0], "items");
        assert_eq!(tool.input_schema["required"][1], "summary");
    }
}

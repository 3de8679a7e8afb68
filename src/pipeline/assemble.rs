use tracing::info;

use crate::models::{
    Attendee, Footer, MAX_REPORT_ITEMS, MeetingMeta, ReportData, ReportItem, Segment,
    TranscriptSection, UNSPECIFIED,
};

/// Result of report assembly
#[derive(Debug, Clone)]
pub struct AssembledReport {
    /// Structured payload
    pub data: ReportData,
    /// Rendered document embedding the same information
    pub html: String,
}

/// Combine the pipeline outputs into the structured payload and the
/// rendered document.
///
/// Pure formatting and numbering: items are renumbered 1..N and capped,
/// every embedded string is escaped, and no input is mutated.
pub fn assemble_report(
    meta: &MeetingMeta,
    attendees: &[String],
    speakers: &[String],
    segments: &[Segment],
    items: &[ReportItem],
    summary: &str,
    demo: bool,
) -> AssembledReport {
    let items = renumber_items(items);

    let data = ReportData {
        title: format!("{} – {}", meta.title, meta.date),
        attendees: attendees
            .iter()
            .map(|name| Attendee { name: name.clone() })
            .collect(),
        items: items.clone(),
        summary: summary.to_string(),
        transcript: TranscriptSection {
            speakers: speakers.to_vec(),
            segments: segments.to_vec(),
        },
        footer: Footer {
            scribe_name: meta.scribe.clone(),
            distribution: meta.distribution.clone(),
        },
    };

    let html = render_html(meta, attendees, segments, &items, summary, demo);

    info!(
        "Assembled report: {} attendees, {} segments, {} items",
        attendees.len(),
        segments.len(),
        items.len()
    );

    AssembledReport { data, html }
}

/// Renumber items 1..N regardless of source numbering, capped at
/// `MAX_REPORT_ITEMS`.
pub fn renumber_items(items: &[ReportItem]) -> Vec<ReportItem> {
    items
        .iter()
        .take(MAX_REPORT_ITEMS)
        .enumerate()
        .map(|(i, item)| ReportItem {
            ordinal: (i + 1) as u32,
            ..item.clone()
        })
        .collect()
}

/// Escape text for embedding into the rendered document.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { UNSPECIFIED } else { value }
}

fn render_html(
    meta: &MeetingMeta,
    attendees: &[String],
    segments: &[Segment],
    items: &[ReportItem],
    summary: &str,
    demo: bool,
) -> String {
    let mut html = String::new();

    html.push_str(
        "<section style=\"font-family: system-ui; line-height:1.6; max-width:860px; margin:auto;\">\n",
    );
    html.push_str(&format!(
        "  <h1 style=\"margin:0 0 12px;\">{} – meeting summary from {}</h1>\n",
        escape_html(&meta.title),
        escape_html(&meta.date)
    ));

    html.push_str("  <h3 style=\"margin:12px 0 6px;\">Attendees</h3>\n");
    html.push_str("  <ul>");
    for name in attendees {
        html.push_str(&format!("<li>{}</li>", escape_html(name)));
    }
    html.push_str("</ul>\n");

    html.push_str(&format!(
        "  <h3 style=\"margin:12px 0 6px;\">Transcript by speaker{}</h3>\n",
        if demo { " (demo)" } else { "" }
    ));
    html.push_str("  <div style=\"background:#f7f7f7; padding:10px; border-radius:8px;\">\n");
    for segment in segments {
        html.push_str(&format!(
            "    <p style=\"margin:6px 0;\"><strong>{}:</strong> {}</p>\n",
            escape_html(&segment.speaker),
            escape_html(&segment.text)
        ));
    }
    html.push_str("  </div>\n");

    if !summary.is_empty() {
        html.push_str("  <h3 style=\"margin:12px 0 6px;\">Summary</h3>\n");
        html.push_str(&format!("  <p>{}</p>\n", escape_html(summary)));
    }

    html.push_str("  <h3 style=\"margin:12px 0 6px;\">Topics, decisions and schedule</h3>\n");
    html.push_str(
        "  <table border=\"1\" cellpadding=\"6\" cellspacing=\"0\" style=\"border-collapse:collapse; width:100%;\">\n",
    );
    html.push_str(
        "    <thead><tr><th>#</th><th>Topic</th><th>Decisions</th><th>Owner</th><th>Due</th></tr></thead>\n",
    );
    html.push_str("    <tbody>\n");
    for item in items {
        html.push_str(&format!(
            "      <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            item.ordinal,
            escape_html(&item.topic),
            escape_html(&item.decisions),
            escape_html(&item.owner),
            escape_html(&item.due)
        ));
    }
    html.push_str("    </tbody>\n");
    html.push_str("  </table>\n");

    html.push_str(&format!(
        "  <p style=\"margin-top:10px;\">Scribe: {} | Distribution: {}</p>\n",
        escape_html(or_dash(&meta.scribe)),
        escape_html(or_dash(&meta.distribution))
    ));
    if demo {
        html.push_str(
            "  <p style=\"font-size:0.9em; color:#666;\">(demo mode active, no live processing)</p>\n",
        );
    }
    html.push_str("</section>");

    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> MeetingMeta {
        MeetingMeta {
            title: "Weekly sync".to_string(),
            date: "2025-03-02".to_string(),
            scribe: "Ruth".to_string(),
            distribution: "team".to_string(),
        }
    }

    #[test]
    fn test_escape_html_minimum_set() {
        assert_eq!(escape_html("a & b <c>"), "a &amp; b &lt;c&gt;");
        assert_eq!(escape_html("\"quotes\" stay"), "\"quotes\" stay");
    }

    #[test]
    fn test_renumber_ignores_source_numbering() {
        let items = vec![
            ReportItem::new(7, "Budget", "Approved"),
            ReportItem::new(3, "Hiring", "Postponed"),
        ];
        let renumbered = renumber_items(&items);

        assert_eq!(renumbered[0].ordinal, 1);
        assert_eq!(renumbered[0].topic, "Budget");
        assert_eq!(renumbered[1].ordinal, 2);
    }

    #[test]
    fn test_renumber_caps_item_count() {
        let items: Vec<ReportItem> = (0..12)
            .map(|i| ReportItem::new(0, format!("topic {i}"), ""))
            .collect();
        let renumbered = renumber_items(&items);

        assert_eq!(renumbered.len(), MAX_REPORT_ITEMS);
        assert_eq!(renumbered.last().map(|i| i.ordinal), Some(8));
    }

    #[test]
    fn test_data_title_joins_with_en_dash() {
        let report = assemble_report(&meta(), &[], &[], &[], &[], "", false);
        assert_eq!(report.data.title, "Weekly sync – 2025-03-02");
    }

    #[test]
    fn test_html_escapes_injected_markup() {
        let segments = vec![Segment::new(0.0, 1.0, "Dana", "<script>alert(1)</script>")];
        let attendees = vec!["Dana & co".to_string()];
        let report = assemble_report(
            &meta(),
            &attendees,
            &["Dana".to_string()],
            &segments,
            &ReportItem::placeholders(),
            "",
            false,
        );

        assert!(report.html.contains("&lt;script&gt;"));
        assert!(!report.html.contains("<script>"));
        assert!(report.html.contains("Dana &amp; co"));
    }

    #[test]
    fn test_html_marks_demo_mode() {
        let demo = assemble_report(&meta(), &[], &[], &[], &[], "", true);
        assert!(demo.html.contains("Transcript by speaker (demo)"));
        assert!(demo.html.contains("demo mode active"));

        let live = assemble_report(&meta(), &[], &[], &[], &[], "", false);
        assert!(!live.html.contains("(demo)"));
    }

    #[test]
    fn test_summary_block_only_when_present() {
        let with = assemble_report(&meta(), &[], &[], &[], &[], "We agreed on Q3 goals.", false);
        assert!(with.html.contains("We agreed on Q3 goals."));
        assert!(with.html.contains(">Summary</h3>"));
        assert_eq!(with.data.summary, "We agreed on Q3 goals.");

        let without = assemble_report(&meta(), &[], &[], &[], &[], "", false);
        assert!(!without.html.contains(">Summary</h3>"));
    }

    #[test]
    fn test_footer_falls_back_to_dashes() {
        let empty_meta = MeetingMeta {
            title: "T".to_string(),
            date: "".to_string(),
            scribe: "".to_string(),
            distribution: "".to_string(),
        };
        let report = assemble_report(&empty_meta, &[], &[], &[], &[], "", false);

        assert!(report.html.contains("Scribe: — | Distribution: —"));
        assert_eq!(report.data.footer.scribe_name, "");
    }
}

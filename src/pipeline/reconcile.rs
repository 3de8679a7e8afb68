use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::models::{Segment, SpeakerMap, distinct_speakers};
use crate::pipeline::participants::find_name_in_text;

/// Result of speaker reconciliation
#[derive(Debug)]
pub struct ReconcileResult {
    /// Tag -> display-name mapping with label order
    pub map: SpeakerMap,
    /// Segments rewritten through the mapping
    pub segments: Vec<Segment>,
    /// Tags bound by a name spoken in their own segments
    pub content_matches: usize,
    /// Tags bound to leftover candidates by position
    pub positional_matches: usize,
    /// Tags left standing for themselves
    pub unresolved: usize,
}

/// Bind each opaque diarization tag to a participant name and rewrite the
/// transcript through the binding.
///
/// Three passes:
/// 1. Content: iterate segments in order; a segment whose text mentions a
///    still-unassigned candidate binds its tag to that candidate. The
///    first match is permanent; the tag is never rebound.
/// 2. Positional: iterate the label order; each still-unbound tag takes
///    the next unassigned candidate through one shared cursor.
/// 3. Residual: any tag left over keeps itself as display name.
///
/// Total and deterministic: degenerate inputs yield an empty or identity
/// map, never an error.
pub fn reconcile_speakers(segments: &[Segment], candidates: &[String]) -> ReconcileResult {
    let candidates = dedupe_candidates(candidates);
    let order = distinct_speakers(segments);

    let mut names: HashMap<String, String> = HashMap::new();
    let mut assigned: HashSet<String> = HashSet::new();

    // Pass 1: content-based assignment, in segment order.
    let mut content_matches = 0;
    for segment in segments {
        if names.contains_key(&segment.speaker) {
            continue;
        }
        let unassigned: Vec<&str> = candidates
            .iter()
            .filter(|c| !assigned.contains(c.as_str()))
            .map(|c| c.as_str())
            .collect();
        if let Some(name) = find_name_in_text(&unassigned, &segment.text) {
            debug!("speaker {:?} identified as {:?} from content", segment.speaker, name);
            names.insert(segment.speaker.clone(), name.to_string());
            assigned.insert(name.to_string());
            content_matches += 1;
        }
    }

    // Pass 2: positional fallback over the label order, one shared cursor.
    let mut positional_matches = 0;
    let mut cursor = 0;
    for tag in &order {
        if names.contains_key(tag) {
            continue;
        }
        while cursor < candidates.len() && assigned.contains(candidates[cursor].as_str()) {
            cursor += 1;
        }
        if cursor < candidates.len() {
            let name = candidates[cursor].clone();
            debug!("speaker {:?} assigned to {:?} by position", tag, name);
            names.insert(tag.clone(), name.clone());
            assigned.insert(name);
            cursor += 1;
            positional_matches += 1;
        }
    }

    // Pass 3: leftover tags stand for themselves.
    let mut unresolved = 0;
    for tag in &order {
        if !names.contains_key(tag) {
            names.insert(tag.clone(), tag.clone());
            unresolved += 1;
        }
    }

    let map = SpeakerMap { order, names };
    let segments = apply_speaker_map(&map, segments);

    info!(
        "Reconciled {} speakers: {} by content, {} by position, {} unresolved",
        map.len(),
        content_matches,
        positional_matches,
        unresolved
    );

    ReconcileResult {
        map,
        segments,
        content_matches,
        positional_matches,
        unresolved,
    }
}

/// Rewrite segments through a completed map; text and timing unchanged.
pub fn apply_speaker_map(map: &SpeakerMap, segments: &[Segment]) -> Vec<Segment> {
    segments
        .iter()
        .map(|s| Segment::new(s.start, s.end, map.display_name(&s.speaker), s.text.clone()))
        .collect()
}

/// Order-preserving attendee union: manual names first in input order,
/// then resolved speaker names in label order. Deduplication is exact
/// string equality, so differently-cased entries stay distinct.
pub fn attendee_roster(manual: &[String], map: &SpeakerMap) -> Vec<String> {
    let mut roster: Vec<String> = Vec::new();
    for name in manual.iter().cloned().chain(map.resolved_names()) {
        if !roster.contains(&name) {
            roster.push(name);
        }
    }
    roster
}

/// Collapse repeated candidate names, keeping first-seen order.
fn dedupe_candidates(candidates: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for candidate in candidates {
        if !seen.contains(candidate) {
            seen.push(candidate.clone());
        }
    }
    seen
}

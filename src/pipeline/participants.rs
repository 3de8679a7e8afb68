/// Characters that delimit names in the free-form participant field.
const SEPARATORS: [char; 5] = [',', '\u{060C}', ';', '|', '\n'];

/// Parse a free-form participant string into an ordered candidate list.
///
/// Splits on commas (Latin or Arabic), semicolons, vertical bars, and
/// newlines; trims each piece; drops empty pieces. Repeated names are
/// kept - collapsing duplicates is the reconciliation engine's job.
pub fn parse_participants(input: &str) -> Vec<String> {
    input
        .split(|c: char| SEPARATORS.contains(&c))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|name| name.to_string())
        .collect()
}

/// Decide which candidate name, if any, is mentioned in a text fragment.
///
/// Candidates are tried in list order and the first hit wins, so an
/// earlier-listed participant takes priority even when a later candidate
/// would match on a full name. Per candidate: a multi-word name matches
/// when the whole lower-cased name appears in the fragment; failing that,
/// the first part matches alone when it has at least two characters.
pub fn find_name_in_text<'a>(candidates: &[&'a str], text: &str) -> Option<&'a str> {
    let fragment = text.to_lowercase();

    for candidate in candidates {
        let parts: Vec<&str> = candidate.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        if parts.len() > 1 && fragment.contains(&candidate.to_lowercase()) {
            return Some(candidate);
        }

        let first = parts[0].to_lowercase();
        if first.chars().count() >= 2 && fragment.contains(&first) {
            return Some(candidate);
        }
    }

    None
}

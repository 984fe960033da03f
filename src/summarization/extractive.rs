//! Pure helpers shared by both summarization tiers: reply parsing and the heuristic fallback.

use std::sync::LazyLock;

use regex::Regex;

use crate::processing::SummaryResult;

const EXTRACT_MAX_CHARS: usize = 1500;
const HEURISTIC_SUMMARY_MAX_CHARS: usize = 800;
const HEURISTIC_SUMMARY_LINES: usize = 4;
const REPLY_SUMMARY_LINES: usize = 3;
const MAX_KEY_POINTS: usize = 4;
const MODEL_PLACEHOLDER: &str = "See full summary.";
const HEURISTIC_PLACEHOLDER: &str = "See document for details.";

/// Lines opening with `-`, `<ascii digits>.` or `•` count as bullets.
static BULLET_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:-|[0-9]+\.|•)[\s\x{FEFF}]*").expect("valid bullet regex")
});

/// Summary and key points recovered from a model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    /// First lines of the reply joined into one paragraph.
    pub summary: String,
    /// Bullet lines with their markers removed. Never empty.
    pub key_points: Vec<String>,
}

/// Split a free-form model reply into a summary and bullet key points.
pub fn parse_model_reply(reply: &str) -> ParsedReply {
    let joined = reply
        .split('\n')
        .take(REPLY_SUMMARY_LINES)
        .collect::<Vec<_>>()
        .join(" ");
    let summary = match trim_text(&joined) {
        "" => reply.to_string(),
        trimmed => trimmed.to_string(),
    };

    // Markers are matched on the trimmed line but stripped from the raw one.
    let mut key_points: Vec<String> = reply
        .split('\n')
        .filter(|line| BULLET_MARKER.is_match(trim_text(line)))
        .take(MAX_KEY_POINTS)
        .map(|line| trim_text(&BULLET_MARKER.replace(line, "")).to_string())
        .collect();
    if key_points.is_empty() {
        key_points.push(MODEL_PLACEHOLDER.to_string());
    }

    ParsedReply {
        summary,
        key_points,
    }
}

/// Extractive summary used when the language model is unavailable.
pub fn build_heuristic_summary(text: &str) -> SummaryResult {
    let lines: Vec<&str> = text
        .split('\n')
        .map(trim_text)
        .filter(|line| !line.is_empty())
        .collect();

    let summary = if lines.is_empty() {
        take_chars(text, HEURISTIC_SUMMARY_MAX_CHARS).to_string()
    } else {
        let joined = lines[..lines.len().min(HEURISTIC_SUMMARY_LINES)].join(" ");
        take_chars(&joined, HEURISTIC_SUMMARY_MAX_CHARS).to_string()
    };

    let mut key_points: Vec<String> = lines
        .iter()
        .take(MAX_KEY_POINTS)
        .map(|line| line.to_string())
        .collect();
    if key_points.is_empty() {
        key_points.push(HEURISTIC_PLACEHOLDER.to_string());
    }

    SummaryResult {
        summary,
        key_points,
        original_extract: original_extract(text),
    }
}

/// Leading slice of `text` echoed back to the client.
pub fn original_extract(text: &str) -> String {
    take_chars(text, EXTRACT_MAX_CHARS).to_string()
}

/// Trim whitespace and byte-order marks from both ends.
fn trim_text(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

fn take_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_with_dash_bullets() {
        let reply = "The lease runs for one year.\nRent is due monthly.\nDeposits are refundable.\n\n- Term is twelve months\n- Rent due on the 1st\n- Deposit returned within 30 days\n- Pets require approval\n- Extra bullet";
        let parsed = parse_model_reply(reply);
        assert_eq!(
            parsed.summary,
            "The lease runs for one year. Rent is due monthly. Deposits are refundable."
        );
        assert_eq!(
            parsed.key_points,
            vec![
                "Term is twelve months",
                "Rent due on the 1st",
                "Deposit returned within 30 days",
                "Pets require approval",
            ]
        );
    }

    #[test]
    fn reply_with_numbered_and_dot_bullets() {
        let reply = "Summary: short.\n\nKey points:\n1. First point\n2.Second point\n• Third point\n10. Tenth point";
        let parsed = parse_model_reply(reply);
        assert_eq!(parsed.summary, "Summary: short.  Key points:");
        assert_eq!(
            parsed.key_points,
            vec!["First point", "Second point", "Third point", "Tenth point"]
        );
    }

    #[test]
    fn indented_bullet_counts_but_keeps_its_marker() {
        let parsed = parse_model_reply("Intro\n  - Indented point\n- Flush point");
        assert_eq!(parsed.key_points, vec!["- Indented point", "Flush point"]);
    }

    #[test]
    fn bare_markers_count_toward_the_limit() {
        let parsed = parse_model_reply("S\n-\n-\n-\n-\n- five");
        assert_eq!(parsed.key_points, vec!["", "", "", ""]);

        let single = parse_model_reply("Summary\n•");
        assert_eq!(single.key_points, vec![""]);
    }

    #[test]
    fn only_ascii_digits_open_numbered_bullets() {
        let parsed = parse_model_reply("Summary\n\u{0661}\u{0662}. not an ascii bullet");
        assert_eq!(parsed.key_points, vec!["See full summary."]);
    }

    #[test]
    fn reply_without_bullets_uses_placeholder() {
        let parsed = parse_model_reply("Just one paragraph of prose.");
        assert_eq!(parsed.summary, "Just one paragraph of prose.");
        assert_eq!(parsed.key_points, vec!["See full summary."]);
    }

    #[test]
    fn blank_leading_lines_fall_back_to_whole_reply() {
        let reply = "\n\n\nLate content";
        let parsed = parse_model_reply(reply);
        assert_eq!(parsed.summary, reply);
    }

    #[test]
    fn empty_reply_still_has_a_key_point() {
        let parsed = parse_model_reply("");
        assert_eq!(parsed.summary, "");
        assert_eq!(parsed.key_points.len(), 1);
    }

    #[test]
    fn heuristic_uses_first_four_lines() {
        let result =
            build_heuristic_summary("Line one.\nLine two.\nLine three.\nLine four.\nLine five.");
        assert_eq!(result.summary, "Line one. Line two. Line three. Line four.");
        assert_eq!(
            result.key_points,
            vec!["Line one.", "Line two.", "Line three.", "Line four."]
        );
        assert_eq!(
            result.original_extract,
            "Line one.\nLine two.\nLine three.\nLine four.\nLine five."
        );
    }

    #[test]
    fn heuristic_single_line() {
        let result = build_heuristic_summary("hello world");
        assert_eq!(result.summary, "hello world");
        assert_eq!(result.key_points, vec!["hello world"]);
        assert_eq!(result.original_extract, "hello world");
    }

    #[test]
    fn heuristic_trims_and_skips_blank_lines() {
        let result = build_heuristic_summary("  first \r\n\r\n\t second\n   \n");
        assert_eq!(result.summary, "first second");
        assert_eq!(result.key_points, vec!["first", "second"]);
    }

    #[test]
    fn heuristic_ignores_byte_order_marks() {
        let result = build_heuristic_summary("\u{FEFF}Tenant pays rent.\nLandlord fixes roof.");
        assert_eq!(result.summary, "Tenant pays rent. Landlord fixes roof.");
        assert_eq!(
            result.key_points,
            vec!["Tenant pays rent.", "Landlord fixes roof."]
        );

        let mark_only = build_heuristic_summary("\u{FEFF}\n");
        assert_eq!(mark_only.key_points, vec!["See document for details."]);
    }

    #[test]
    fn heuristic_on_blank_text_uses_placeholder() {
        let result = build_heuristic_summary("  \n \n");
        assert_eq!(result.summary, "  \n \n");
        assert_eq!(result.key_points, vec!["See document for details."]);

        let empty = build_heuristic_summary("");
        assert_eq!(empty.summary, "");
        assert_eq!(empty.key_points, vec!["See document for details."]);
        assert_eq!(empty.original_extract, "");
    }

    #[test]
    fn heuristic_summary_is_capped_at_800_chars() {
        let long_line = "a".repeat(1000);
        let result = build_heuristic_summary(&long_line);
        assert_eq!(result.summary.chars().count(), 800);
        assert_eq!(result.original_extract.chars().count(), 1000);
    }

    #[test]
    fn extract_is_a_char_prefix_capped_at_1500() {
        let text = "é".repeat(2000);
        let extract = original_extract(&text);
        assert_eq!(extract.chars().count(), 1500);
        assert!(text.starts_with(&extract));
    }
}

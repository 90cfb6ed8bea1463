//! Display helpers for article cards.

use chrono::NaiveDateTime;

/// Characters kept by [`truncate`] before the ellipsis.
pub const PREVIEW_CHARS: usize = 200;

/// First two sentences of `content`, followed by `...` when more text follows.
pub fn make_preview(content: &str) -> String {
    let text = content.trim();
    let mut sentences = 0;
    for (idx, ch) in text.char_indices() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let end = idx + ch.len_utf8();
        let at_boundary = text[end..]
            .chars()
            .next()
            .map_or(true, char::is_whitespace);
        if !at_boundary {
            continue;
        }
        sentences += 1;
        if sentences == 2 {
            let rest = text[end..].trim();
            return if rest.is_empty() {
                text[..end].to_string()
            } else {
                format!("{}...", &text[..end])
            };
        }
    }
    text.to_string()
}

/// Cut `text` to [`PREVIEW_CHARS`] characters, appending `...` if anything was cut.
pub fn truncate(text: &str) -> String {
    truncate_to(text, PREVIEW_CHARS)
}

pub fn truncate_to(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// `January 5, 2024`.
pub fn format_date(at: &NaiveDateTime) -> String {
    at.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn preview_keeps_two_sentences() {
        assert_eq!(
            make_preview("One. Two! Three? Four."),
            "One. Two!..."
        );
        assert_eq!(make_preview("Only one sentence"), "Only one sentence");
        assert_eq!(make_preview("First. Second."), "First. Second.");
    }

    #[test]
    fn preview_ignores_dots_inside_words() {
        assert_eq!(
            make_preview("Version 1.2 is out. It is fast. Try it."),
            "Version 1.2 is out. It is fast...."
        );
    }

    #[test]
    fn truncate_counts_characters() {
        let long = "é".repeat(PREVIEW_CHARS + 5);
        let cut = truncate(&long);
        assert_eq!(cut.chars().count(), PREVIEW_CHARS + 3);
        assert!(cut.ends_with("..."));
        assert_eq!(truncate("short"), "short");
    }

    #[test]
    fn dates_read_naturally() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        assert_eq!(format_date(&at), "January 5, 2024");
    }
}

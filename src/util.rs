//! Utility functions for text processing.

use chrono::DateTime;

/// Truncate a string to max length with ellipsis.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

/// Word-wrap a string to fit within a given width (in characters).
pub fn word_wrap(s: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_len = 0;

    for word in s.split_whitespace() {
        let word_len = word.chars().count();
        if current_line.is_empty() {
            current_line = word.to_string();
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current_line.push(' ');
            current_line.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current_line));
            current_line = word.to_string();
            current_len = word_len;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Short date for a report timestamp. Anything that is not RFC 3339 is shown as sent.
pub fn format_reported_at(at: Option<&str>) -> String {
    match at.map(str::trim).filter(|s| !s.is_empty()) {
        None => "—".to_string(),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|at| at.format("%d %b %Y").to_string())
            .unwrap_or_else(|_| raw.to_string()),
    }
}

const MAX_VISIBLE_CHARS: usize = 100;

const SENSITIVE_PATTERNS: [(&str, &str); 5] = [
    ("Bearer ", "Bearer [REDACTED]"),
    ("api_key=", "api_key=[REDACTED]"),
    ("password=", "password=[REDACTED]"),
    ("secret=", "secret=[REDACTED]"),
    ("token=", "token=[REDACTED]"),
];

/// Shortens learner input for log lines and masks obvious credentials.
///
/// Truncation counts characters, not bytes, so non-Latin scripts never split
/// inside a code point.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let char_count = trimmed.chars().count();
    let visible = match trimmed.char_indices().nth(MAX_VISIBLE_CHARS) {
        Some((cut, _)) => format!("{}... ({} chars total)", &trimmed[..cut], char_count),
        None => trimmed.to_string(),
    };

    redact_sensitive_patterns(visible)
}

fn redact_sensitive_patterns(mut text: String) -> String {
    for (pattern, replacement) in SENSITIVE_PATTERNS {
        let mut search_from = 0;
        while let Some(found) = text[search_from..].find(pattern) {
            let start = search_from + found;
            let value_start = start + pattern.len();
            let end = text[value_start..]
                .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
                .map(|i| value_start + i)
                .unwrap_or(text.len());
            text.replace_range(start..end, replacement);
            search_from = start + replacement.len();
        }
    }

    text
}

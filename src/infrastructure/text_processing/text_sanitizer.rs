use unicode_normalization::UnicodeNormalization;

/// Flattens extracted document text into a single line.
///
/// Applies NFKC so ligatures and compatibility forms compare equal to their
/// plain spellings, then collapses every whitespace run (newlines and page
/// breaks included) to one space and trims both ends.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect();

    let mut result = String::with_capacity(normalized.len());
    let mut prev_was_space = true;

    for ch in normalized.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(ch);
            prev_was_space = false;
        }
    }

    if result.ends_with(' ') {
        result.pop();
    }

    result
}

//! Small pure helpers shared by the dispatch rules.

/// Cut `text` down to at most `max_chars` characters for feed display, appending an ellipsis
/// marker when something was actually cut. Counts characters, not bytes, so Cyrillic text is not
/// split mid-codepoint.
pub fn truncate_for_display(text: &str, max_chars: usize) -> String {
    let mut preview: String = text.chars().take(max_chars).collect();
    if text.chars().nth(max_chars).is_some() {
        preview.push_str("...");
    }
    preview
}

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_CLAIM_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:Claim\s+)?\d+\s*[.:\-)\]、．：]\s*").unwrap()
});

/// §4.2 preamble/body split: case-insensitive locate of the detected
/// transitional phrase. An empty phrase yields an empty preamble and the
/// whole text as body.
pub fn split_preamble_body(text: &str, transitional_phrase: &str) -> (String, String) {
    if transitional_phrase.is_empty() {
        return (String::new(), text.trim().to_string());
    }
    let lower_text = text.to_lowercase();
    let lower_phrase = transitional_phrase.to_lowercase();
    match lower_text.find(&lower_phrase) {
        Some(byte_pos) => {
            let prefix = &text[..byte_pos];
            let suffix = &text[byte_pos + transitional_phrase.len()..];
            let preamble = LEADING_CLAIM_MARKER.replace(prefix.trim(), "").trim().to_string();
            (preamble, suffix.trim().to_string())
        }
        None => (String::new(), text.trim().to_string()),
    }
}

use once_cell::sync::Lazy;
use regex::Regex;

static ENGLISH_CLAIM_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:Claim\s+)?(\d+)\s*[.:\-)\]]\s*").unwrap());

static CHINESE_CLAIM_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s*[、.．:：)\]]\s*").unwrap());

/// §4.2 claim number: try the English pattern, then the Chinese pattern,
/// returning the first match; `0` if neither matches.
pub fn extract_claim_number(text: &str) -> u32 {
    for pattern in [&*ENGLISH_CLAIM_NUMBER, &*CHINESE_CLAIM_NUMBER] {
        if let Some(caps) = pattern.captures(text) {
            if let Some(number) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) {
                return number;
            }
        }
    }
    0
}

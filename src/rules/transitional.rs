use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::TransitionalType;

#[derive(Debug, Clone)]
pub struct TransitionalMatch {
    pub phrase: String,
    pub transitional_type: TransitionalType,
    pub start: usize,
    pub end: usize,
}

static CONSISTING_ESSENTIALLY_EN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)consisting\s+essentially\s+of").unwrap());
static CONSISTING_OF_EN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)consisting\s+of").unwrap());
static COMPRISING_EN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)comprising|which\s+comprises?|characterized\s+in\s+that|wherein").unwrap()
});
static CONSISTING_ESSENTIALLY_CN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"基本上由[^，,。.]+组成").unwrap());
static CONSISTING_OF_CN: Lazy<Regex> = Lazy::new(|| Regex::new(r"由[^，,。.]+组成").unwrap());
static COMPRISING_CN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"包含|包括|含有|其特征在于|其中").unwrap());

/// §4.2 transitional phrase detection: checks each pattern in legal
/// precedence order, returning the first match. An empty phrase with
/// `Comprising` (the broadest default) is returned when nothing matches.
pub fn detect_transitional_phrase(text: &str) -> TransitionalMatch {
    let checks: [(&Regex, TransitionalType); 6] = [
        (&CONSISTING_ESSENTIALLY_EN, TransitionalType::ConsistingEssentiallyOf),
        (&CONSISTING_OF_EN, TransitionalType::ConsistingOf),
        (&COMPRISING_EN, TransitionalType::Comprising),
        (&CONSISTING_ESSENTIALLY_CN, TransitionalType::ConsistingEssentiallyOf),
        (&CONSISTING_OF_CN, TransitionalType::ConsistingOf),
        (&COMPRISING_CN, TransitionalType::Comprising),
    ];
    for (pattern, transitional_type) in checks {
        if let Some(m) = pattern.find(text) {
            return TransitionalMatch {
                phrase: m.as_str().to_string(),
                transitional_type,
                start: char_index(text, m.start()),
                end: char_index(text, m.end()),
            };
        }
    }
    TransitionalMatch {
        phrase: String::new(),
        transitional_type: TransitionalType::Comprising,
        start: 0,
        end: 0,
    }
}

fn char_index(text: &str, byte_index: usize) -> usize {
    text[..byte_index].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_consisting_essentially_of_before_consisting_of() {
        let m = detect_transitional_phrase("a composition consisting essentially of X");
        assert!(matches!(m.transitional_type, TransitionalType::ConsistingEssentiallyOf));
    }

    #[test]
    fn detects_wherein_as_comprising() {
        let m = detect_transitional_phrase("a device wherein the part moves");
        assert!(matches!(m.transitional_type, TransitionalType::Comprising));
    }

    #[test]
    fn chinese_consisting_of() {
        let m = detect_transitional_phrase("一种由甲醇组成的溶液");
        assert!(matches!(m.transitional_type, TransitionalType::ConsistingOf));
    }

    #[test]
    fn default_is_comprising() {
        let m = detect_transitional_phrase("nothing matches here");
        assert_eq!(m.phrase, "");
        assert!(matches!(m.transitional_type, TransitionalType::Comprising));
    }
}

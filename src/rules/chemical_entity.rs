use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static FORMULA_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:formula\s+)?\(([IVX]+|[A-Z])\)").unwrap()
});

static SUFFIX_HEURISTIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[a-z]*(?:ine|ol|ase|ide|ate|ene|ane|one|yl|oyl|amide|amine|acid)\b")
        .unwrap()
});

static FALSE_POSITIVES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "one", "done", "gone", "none", "alone", "bone", "zone", "tone", "stone",
        "machine", "medicine", "online", "routine", "mine", "line", "wine", "engine",
        "whole", "role", "sole", "hole", "control", "protocol",
    ]
    .into_iter()
    .copied()
    .collect()
});

/// §4.2 chemical entities: formula tags like `formula (I)` / `(A)`
/// resolved to a literal label, plus a suffix heuristic over common
/// chemical-name endings, filtered against a closed false-positive list.
pub fn find_chemical_entities(text: &str) -> Vec<String> {
    let mut entities = Vec::new();

    for caps in FORMULA_TAG.captures_iter(text) {
        if let Some(label) = caps.get(1) {
            entities.push(format!("formula ({})", label.as_str()));
        }
    }

    for m in SUFFIX_HEURISTIC.find_iter(text) {
        let word = m.as_str();
        let lower = word.to_lowercase();
        if !FALSE_POSITIVES.contains(lower.as_str()) {
            entities.push(word.to_string());
        }
    }

    entities
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_formula_tag() {
        let entities = find_chemical_entities("a compound of formula (I) comprising");
        assert!(entities.contains(&"formula (I)".to_string()));
    }

    #[test]
    fn suffix_heuristic_filters_false_positives() {
        let entities = find_chemical_entities("the machine uses methanol and ethylamine");
        assert!(!entities.iter().any(|e| e.eq_ignore_ascii_case("machine")));
        assert!(entities.iter().any(|e| e.eq_ignore_ascii_case("methanol")));
    }
}

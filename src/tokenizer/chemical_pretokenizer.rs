//! Chemical-entity pre-tokenization (§4.1 step 2): a fixed set of
//! case-insensitive regexes is scanned over the cleaned text, matches are
//! sorted start-ascending then length-descending, and a greedy pass
//! selects the non-overlapping spans that word-splitting must honor
//! verbatim.

use once_cell::sync::Lazy;
use regex::Regex;

static CAS_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\d{2,7}-\d{2}-\d").unwrap());

static MOLECULAR_FORMULA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b[A-Z][a-z]?\d*(?:\([A-Za-z0-9]+\)\d+)+\b").unwrap());

static MARKUSH_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bC\d+-C\d+-?(?:alkyl|aryl|heteroaryl|cycloalkyl|heterocyclic|halogen|halo)\b|\b(?:alkyl|aryl|heteroaryl|cycloalkyl|heterocyclic|halogen|halo)\b").unwrap()
});

static IUPAC_FRAGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[a-z]*(?:methyl|ethyl|propyl|butyl|pentyl|hexyl|hydroxy|chloro|bromo|fluoro|amino|carboxy|phenyl|benzyl)\b").unwrap()
});

fn byte_to_char_table(text: &str) -> Vec<usize> {
    let mut table = vec![0usize; text.len() + 1];
    let mut char_count = 0usize;
    let mut last_byte = 0usize;
    for (byte_idx, _) in text.char_indices() {
        for slot in table.iter_mut().take(byte_idx + 1).skip(last_byte) {
            *slot = char_count;
        }
        last_byte = byte_idx + 1;
        char_count += 1;
    }
    for slot in table.iter_mut().take(text.len() + 1).skip(last_byte) {
        *slot = char_count;
    }
    table
}

/// Returns non-overlapping chemical spans as character offsets
/// `[start, end)` into `text`.
pub fn find_chemical_spans(text: &str) -> Vec<(usize, usize)> {
    let byte_to_char = byte_to_char_table(text);
    let mut matches: Vec<(usize, usize)> = Vec::new();
    for pattern in [&*CAS_NUMBER, &*MOLECULAR_FORMULA, &*MARKUSH_KEYWORD, &*IUPAC_FRAGMENT] {
        for m in pattern.find_iter(text) {
            let start = byte_to_char[m.start()];
            let end = byte_to_char[m.end()];
            if end > start {
                matches.push((start, end));
            }
        }
    }
    // start-ascending, then length-descending
    matches.sort_by(|a, b| {
        a.0.cmp(&b.0).then_with(|| (b.1 - b.0).cmp(&(a.1 - a.0)))
    });
    let mut selected: Vec<(usize, usize)> = Vec::new();
    let mut occupied_until = 0usize;
    for (start, end) in matches {
        if start >= occupied_until {
            selected.push((start, end));
            occupied_until = end;
        }
    }
    selected
}

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::NumericalRange;

const NUM: &str = r"(about\s+)?(-?\d+(?:\.\d+)?)\s*([°%\x{2103}\x{2109}]?[A-Za-z/\x{00B5}\x{03BC}]*)";

static FROM_TO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)from\s+{n}\s+to\s+{n}", n = NUM)).unwrap()
});
static BETWEEN_AND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)between\s+{n}\s+and\s+{n}", n = NUM)).unwrap()
});
static AT_LEAST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)(?:at\s+least|no\s+less\s+than|not\s+less\s+than|>=|\x{{2265}})\s*{n}",
        n = NUM
    ))
    .unwrap()
});
static AT_MOST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)(?:at\s+most|no\s+more\s+than|not\s+more\s+than|<=|\x{{2264}})\s*{n}",
        n = NUM
    ))
    .unwrap()
});
static LESS_THAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)(?:less\s+than|below|under|<)\s*{n}", n = NUM)).unwrap()
});
static GREATER_THAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        &format!(
            r"(?i)(?:greater\s+than|above|over|more\s+than|exceeding|>)\s*{n}",
            n = NUM
        ),
    )
    .unwrap()
});
static STANDALONE_APPROX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)(?:about|approximately|circa|roughly|~)\s*{n}",
        n = NUM
    ))
    .unwrap()
});

static DOMAIN_TERM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)temperature|pressure|concentration|ratio|amount|weight|volume|time|duration|pH|molecular\s+weight|viscosity|density|purity|yield|thickness|diameter|length|width|height|dose|dosage|flow\s+rate").unwrap()
});

/// §4.2 numerical ranges: seven patterns scanned over the text; the
/// standalone `about X` fallback only runs when the first six matched
/// nothing.
pub fn extract_numerical_ranges(text: &str) -> Vec<NumericalRange> {
    let mut ranges = Vec::new();

    for m in FROM_TO.captures_iter(text) {
        ranges.push(range_from_two(text, &m));
    }
    for m in BETWEEN_AND.captures_iter(text) {
        ranges.push(range_from_two(text, &m));
    }
    for m in AT_LEAST.captures_iter(text) {
        ranges.push(range_lower(text, &m));
    }
    for m in AT_MOST.captures_iter(text) {
        ranges.push(range_upper(text, &m));
    }
    for m in LESS_THAN.captures_iter(text) {
        ranges.push(range_upper(text, &m));
    }
    for m in GREATER_THAN.captures_iter(text) {
        ranges.push(range_lower(text, &m));
    }

    if ranges.is_empty() {
        for m in STANDALONE_APPROX.captures_iter(text) {
            let value: f64 = m.get(2).unwrap().as_str().parse().unwrap_or(0.0);
            let unit = non_empty(m.get(3));
            let start = m.get(0).unwrap().start();
            ranges.push(NumericalRange {
                parameter: infer_parameter(text, start),
                lower_bound: Some(value * 0.9),
                upper_bound: Some(value * 1.1),
                unit,
                is_approximate: true,
            });
        }
    }

    ranges
}

fn non_empty(m: Option<regex::Match>) -> Option<String> {
    m.map(|v| v.as_str().to_string()).filter(|s| !s.is_empty())
}

fn range_from_two(text: &str, caps: &regex::Captures) -> NumericalRange {
    let is_approx = caps.get(1).is_some() || caps.get(4).is_some();
    let lower: f64 = caps.get(2).unwrap().as_str().parse().unwrap_or(0.0);
    let upper: f64 = caps.get(5).unwrap().as_str().parse().unwrap_or(0.0);
    let unit = non_empty(caps.get(6)).or_else(|| non_empty(caps.get(3)));
    let start = caps.get(0).unwrap().start();
    NumericalRange {
        parameter: infer_parameter(text, start),
        lower_bound: Some(lower),
        upper_bound: Some(upper),
        unit,
        is_approximate: is_approx,
    }
}

fn range_lower(text: &str, caps: &regex::Captures) -> NumericalRange {
    let value: f64 = caps.get(2).unwrap().as_str().parse().unwrap_or(0.0);
    let unit = non_empty(caps.get(3));
    let is_approx = caps.get(1).is_some();
    let start = caps.get(0).unwrap().start();
    NumericalRange {
        parameter: infer_parameter(text, start),
        lower_bound: Some(value),
        upper_bound: None,
        unit,
        is_approximate: is_approx,
    }
}

fn range_upper(text: &str, caps: &regex::Captures) -> NumericalRange {
    let value: f64 = caps.get(2).unwrap().as_str().parse().unwrap_or(0.0);
    let unit = non_empty(caps.get(3));
    let is_approx = caps.get(1).is_some();
    let start = caps.get(0).unwrap().start();
    NumericalRange {
        parameter: infer_parameter(text, start),
        lower_bound: None,
        upper_bound: Some(value),
        unit,
        is_approximate: is_approx,
    }
}

/// Looks at up to 80 preceding characters (char-boundary safe, per the
/// source's raw-byte-offset pitfall called out in §9) for the first
/// known domain term.
fn infer_parameter(text: &str, byte_start: usize) -> Option<String> {
    let prefix = &text[..byte_start];
    let char_count = prefix.chars().count();
    let skip = char_count.saturating_sub(80);
    let window: String = prefix.chars().skip(skip).collect();
    DOMAIN_TERM
        .find(&window)
        .map(|m| m.as_str().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_about_to_about_with_unit() {
        let ranges = extract_numerical_ranges(
            "a process for synthesizing compound X at a temperature of from about 50\u{00B0}C to about 100\u{00B0}C.",
        );
        assert_eq!(ranges.len(), 1);
        let r = &ranges[0];
        assert_eq!(r.lower_bound, Some(50.0));
        assert_eq!(r.upper_bound, Some(100.0));
        assert!(r.is_approximate);
        assert_eq!(r.parameter.as_deref(), Some("temperature"));
    }

    #[test]
    fn at_least_only_lower_bound() {
        let ranges = extract_numerical_ranges("a concentration of at least 5%");
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].lower_bound, Some(5.0));
        assert_eq!(ranges[0].upper_bound, None);
    }

    #[test]
    fn standalone_about_only_when_no_other_match() {
        let ranges = extract_numerical_ranges("approximately 20 minutes");
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].lower_bound, Some(18.0));
        assert_eq!(ranges[0].upper_bound, Some(22.0));
    }
}

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapses whitespace runs, trims ends, and normalizes a fixed set of
/// Unicode/Chinese punctuation to their ASCII or canonical counterparts
/// (§4.2). Idempotent: `preprocess(preprocess(x)) == preprocess(x)`.
pub fn preprocess(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for c in text.chars() {
        let replacement = match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2264}' => {
                normalized.push_str("<=");
                continue;
            }
            '\u{2265}' => {
                normalized.push_str(">=");
                continue;
            }
            '\u{FF0C}' | '\u{3001}' => ',',
            '\u{FF1B}' => ';',
            '\u{FF1A}' => ':',
            '\u{3002}' | '\u{FF0E}' => '.',
            other => other,
        };
        normalized.push(replacement);
    }
    let collapsed = WHITESPACE_RUN.replace_all(&normalized, " ");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idempotent() {
        let text = "  A\u{3000}claim\n\twith\u{2018}quotes\u{2019}  ";
        let once = preprocess(text);
        let twice = preprocess(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn normalizes_chinese_punctuation() {
        assert_eq!(preprocess("1\u{3001}2\u{FF0C}3"), "1,2,3");
    }

    #[test]
    fn normalizes_comparison_operators() {
        assert_eq!(preprocess("x \u{2264} 5 \u{2265} y"), "x <= 5 >= y");
    }
}

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static ENGLISH_DEPENDENCY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:of|in|according\s+to|as\s+(?:claimed|defined|set\s+forth)\s+in)\s+claims?\s+([0-9,\sandor\-to]+?)(?:[.;]|$)").unwrap()
});

static CHINESE_DEPENDENCY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:如)?权利要求\s*([0-9、,，\-至到或和\s]+?)(?:\s*所述)?").unwrap());

#[derive(Debug, Clone)]
pub struct DependencyMatch {
    pub claim_numbers: Vec<u32>,
}

/// §4.2 dependency references: locate an English or Chinese reference
/// phrase, normalize connectives, and expand the resulting list.
pub fn extract_dependency_refs(text: &str) -> DependencyMatch {
    let mut numbers = BTreeSet::new();
    for caps in ENGLISH_DEPENDENCY.captures_iter(text) {
        if let Some(list) = caps.get(1) {
            numbers.extend(parse_list(list.as_str(), Language::English));
        }
    }
    for caps in CHINESE_DEPENDENCY.captures_iter(text) {
        if let Some(list) = caps.get(1) {
            numbers.extend(parse_list(list.as_str(), Language::Chinese));
        }
    }
    DependencyMatch {
        claim_numbers: numbers.into_iter().collect(),
    }
}

enum Language {
    English,
    Chinese,
}

fn parse_list(raw: &str, lang: Language) -> Vec<u32> {
    let normalized = match lang {
        Language::English => raw
            .replace(" and ", ",")
            .replace(" or ", ",")
            .replace(" to ", "-"),
        Language::Chinese => raw
            .replace('和', ",")
            .replace('或', ",")
            .replace("到", ",")
            .replace('至', "-")
            .replace('、', ",")
            .replace('，', ","),
    };
    let mut result = Vec::new();
    for part in normalized.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if let Some((lo_str, hi_str)) = part.split_once('-') {
            if let (Ok(lo), Ok(hi)) = (lo_str.trim().parse::<u32>(), hi_str.trim().parse::<u32>())
            {
                if lo <= hi && hi - lo < 100 {
                    result.extend(lo..=hi);
                    continue;
                }
            }
        }
        if let Ok(single) = part.parse::<u32>() {
            if single > 0 {
                result.push(single);
            }
        }
    }
    result.sort_unstable();
    result.into_iter().dedup().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_single_reference() {
        let m = extract_dependency_refs("The composition of claim 1, wherein...");
        assert_eq!(m.claim_numbers, vec![1]);
    }

    #[test]
    fn english_range_reference() {
        let m = extract_dependency_refs("The method according to claims 1-3, wherein...");
        assert_eq!(m.claim_numbers, vec![1, 2, 3]);
    }

    #[test]
    fn chinese_or_reference() {
        let m = extract_dependency_refs("如权利要求1或2所述的装置");
        assert_eq!(m.claim_numbers, vec![1, 2]);
    }

    #[test]
    fn chinese_dao_is_list_not_range() {
        // "到" behaves like "and" (list), not like "至" (range).
        let m = extract_dependency_refs("如权利要求1到3所述的装置");
        assert_eq!(m.claim_numbers, vec![1, 3]);
    }

    #[test]
    fn chinese_zhi_is_range() {
        let m = extract_dependency_refs("如权利要求1至3所述的装置");
        assert_eq!(m.claim_numbers, vec![1, 2, 3]);
    }
}

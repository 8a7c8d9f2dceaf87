use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::MarkushGroup;

static CLOSED_MARKUSH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)selected\s+from\s+the\s+group\s+consisting\s+of\s+(.+?)(?:\.|;|$)").unwrap()
});

static OPEN_MARKUSH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(including\s+but\s+not\s+limited\s+to|such\s+as|for\s+example)\s+(.+?)(?:\.|;|$)")
        .unwrap()
});

static CHEMICAL_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(alkyl|aryl|heteroaryl|heterocyclic|cycloalkyl|alkenyl|alkynyl|alkoxy|halogen|amino|hydroxyl|carboxyl)\b",
    )
    .unwrap()
});

/// §4.2 Markush group extraction: closed (`selected from the group
/// consisting of`) and open (`including but not limited to` / `such as`
/// / `for example`) variants, each producing a trimmed, comma-normalized
/// member list.
pub fn extract_markush_groups(text: &str) -> Vec<MarkushGroup> {
    let mut groups = Vec::new();
    let mut next_id = 1usize;

    for caps in CLOSED_MARKUSH.captures_iter(text) {
        if let Some(list) = caps.get(1) {
            let members = split_members(list.as_str());
            if !members.is_empty() {
                groups.push(MarkushGroup {
                    group_id: format!("markush-{}", next_id),
                    lead_phrase: "selected from the group consisting of".to_string(),
                    chemical_type: infer_chemical_type(list.as_str()),
                    members,
                    is_open_ended: false,
                });
                next_id += 1;
            }
        }
    }

    for caps in OPEN_MARKUSH.captures_iter(text) {
        let lead = caps.get(1).map(|m| m.as_str().to_lowercase()).unwrap_or_default();
        if let Some(list) = caps.get(2) {
            let members = split_members(list.as_str());
            if !members.is_empty() {
                groups.push(MarkushGroup {
                    group_id: format!("markush-{}", next_id),
                    lead_phrase: lead,
                    chemical_type: infer_chemical_type(list.as_str()),
                    members,
                    is_open_ended: true,
                });
                next_id += 1;
            }
        }
    }

    groups
}

fn split_members(raw: &str) -> Vec<String> {
    let normalized = raw.replace(" and ", ",").replace(" or ", ",");
    normalized
        .split(',')
        .map(|m| m.trim().trim_end_matches('.').to_string())
        .filter(|m| !m.is_empty())
        .dedup()
        .collect()
}

fn infer_chemical_type(text: &str) -> Option<String> {
    CHEMICAL_TYPE
        .find(text)
        .map(|m| m.as_str().to_lowercase())
}

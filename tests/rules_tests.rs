use claim_scope_core::rules::{
    detect_transitional_phrase, extract_claim_number, extract_dependency_refs,
    extract_markush_groups, extract_numerical_ranges, find_chemical_entities, preprocess,
    split_preamble_body,
};
use claim_scope_core::TransitionalType;

#[test]
fn preprocess_is_idempotent() {
    // §8 "Idempotent preprocessing".
    let text = "  A\u{3000}claim\u{FF0C}with\u{2018}quotes\u{2019} and x \u{2264} 5  ";
    let once = preprocess(text);
    let twice = preprocess(&once);
    assert_eq!(once, twice);
}

#[test]
fn claim_number_and_transitional_phrase_agree_on_a_simple_claim() {
    let text = "1. A pharmaceutical composition comprising a compound of formula (I).";
    assert_eq!(extract_claim_number(text), 1);
    let transitional = detect_transitional_phrase(text);
    assert!(matches!(transitional.transitional_type, TransitionalType::Comprising));
    let (preamble, body) = split_preamble_body(text, &transitional.phrase);
    assert!(preamble.contains("pharmaceutical composition"));
    assert!(body.contains("formula"));
}

#[test]
fn dependency_refs_span_both_languages() {
    let english = extract_dependency_refs("The device of claims 1-3, wherein...");
    assert_eq!(english.claim_numbers, vec![1, 2, 3]);

    let chinese = extract_dependency_refs("如权利要求1或2所述的装置");
    assert_eq!(chinese.claim_numbers, vec![1, 2]);
}

#[test]
fn markush_group_extraction_distinguishes_open_and_closed() {
    let closed = extract_markush_groups(
        "selected from the group consisting of aspirin, ibuprofen, and naproxen.",
    );
    assert_eq!(closed.len(), 1);
    assert!(!closed[0].is_open_ended);

    let open = extract_markush_groups("an alkyl group such as methyl, ethyl, or propyl.");
    assert_eq!(open.len(), 1);
    assert!(open[0].is_open_ended);
}

#[test]
fn numerical_range_extraction_infers_parameter_from_context() {
    // §8 scenario 3.
    let ranges = extract_numerical_ranges(
        "A process for synthesizing compound X at a temperature of from about 50\u{00B0}C to about 100\u{00B0}C.",
    );
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].lower_bound, Some(50.0));
    assert_eq!(ranges[0].upper_bound, Some(100.0));
    assert!(ranges[0].is_approximate);
    assert_eq!(ranges[0].parameter.as_deref(), Some("temperature"));
}

#[test]
fn chemical_entity_extraction_finds_formula_tags_and_suffixed_names() {
    let entities =
        find_chemical_entities("a compound of formula (I), namely methanol, not a machine.");
    assert!(entities.contains(&"formula (I)".to_string()));
    assert!(entities.iter().any(|e| e.eq_ignore_ascii_case("methanol")));
    assert!(!entities.iter().any(|e| e.eq_ignore_ascii_case("machine")));
}

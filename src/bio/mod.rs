//! # BIO decoder (§4.3)
//!
//! The 11-tag label space is `O` plus `B-`/`I-` pairs over five
//! categories. Correction is deterministic and left-to-right (§9); span
//! extraction and span-to-character-offset recovery never mutate their
//! inputs.

use crate::model::FeatureType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BioPrefix {
    Outside,
    Begin,
    Inside,
}

/// Fixed index -> tag mapping matching the backend's classification head
/// output order (§6): 0=O, then (B,I) pairs for Structural, Functional,
/// Process, Composition, Parameter.
pub fn decode_tag_index(index: i64) -> (BioPrefix, Option<FeatureType>) {
    match index {
        0 => (BioPrefix::Outside, None),
        1 => (BioPrefix::Begin, Some(FeatureType::Structural)),
        2 => (BioPrefix::Inside, Some(FeatureType::Structural)),
        3 => (BioPrefix::Begin, Some(FeatureType::Functional)),
        4 => (BioPrefix::Inside, Some(FeatureType::Functional)),
        5 => (BioPrefix::Begin, Some(FeatureType::Process)),
        6 => (BioPrefix::Inside, Some(FeatureType::Process)),
        7 => (BioPrefix::Begin, Some(FeatureType::Composition)),
        8 => (BioPrefix::Inside, Some(FeatureType::Composition)),
        9 => (BioPrefix::Begin, Some(FeatureType::Parameter)),
        10 => (BioPrefix::Inside, Some(FeatureType::Parameter)),
        _ => (BioPrefix::Outside, None),
    }
}

/// §4.3 correction rule: any `I-X` whose immediate predecessor is not
/// `B-X` or `I-X` of the same category is promoted to `B-X`, including
/// at position 0. Operates on a copy; never mutates the input.
pub fn correct_bio(tags: &[i64]) -> Vec<i64> {
    let mut corrected = tags.to_vec();
    let mut prev: Option<(BioPrefix, Option<FeatureType>)> = None;
    for i in 0..corrected.len() {
        let (prefix, category) = decode_tag_index(corrected[i]);
        if prefix == BioPrefix::Inside {
            let predecessor_matches = matches!(
                prev,
                Some((BioPrefix::Begin, c)) | Some((BioPrefix::Inside, c)) if c == category
            );
            if !predecessor_matches {
                corrected[i] = begin_index_for(category);
                prev = Some((BioPrefix::Begin, category));
                continue;
            }
        }
        prev = Some((prefix, category));
    }
    corrected
}

fn begin_index_for(category: Option<FeatureType>) -> i64 {
    match category {
        Some(FeatureType::Structural) => 1,
        Some(FeatureType::Functional) => 3,
        Some(FeatureType::Process) => 5,
        Some(FeatureType::Composition) => 7,
        Some(FeatureType::Parameter) => 9,
        None => 0,
    }
}

#[derive(Debug, Clone)]
pub struct BioSpan {
    pub start_token: usize,
    pub end_token_inclusive: usize,
    pub category: FeatureType,
}

/// §4.3 span extraction: open a span on `B-X`, extend on matching `I-X`,
/// close on `O`, end-of-sequence, or a category change. Orphan `I-X`
/// (should not occur after correction, but handled defensively) opens a
/// new span.
pub fn extract_spans(corrected_tags: &[i64]) -> Vec<BioSpan> {
    let mut spans = Vec::new();
    let mut open: Option<(usize, usize, FeatureType)> = None;

    for (i, &tag) in corrected_tags.iter().enumerate() {
        let (prefix, category) = decode_tag_index(tag);
        match (prefix, category) {
            (BioPrefix::Begin, Some(cat)) => {
                if let Some((start, end, open_cat)) = open.take() {
                    spans.push(BioSpan {
                        start_token: start,
                        end_token_inclusive: end,
                        category: open_cat,
                    });
                }
                open = Some((i, i, cat));
            }
            (BioPrefix::Inside, Some(cat)) => match open {
                Some((start, _, open_cat)) if open_cat == cat => {
                    open = Some((start, i, open_cat));
                }
                _ => {
                    if let Some((start, end, open_cat)) = open.take() {
                        spans.push(BioSpan {
                            start_token: start,
                            end_token_inclusive: end,
                            category: open_cat,
                        });
                    }
                    open = Some((i, i, cat));
                }
            },
            _ => {
                if let Some((start, end, open_cat)) = open.take() {
                    spans.push(BioSpan {
                        start_token: start,
                        end_token_inclusive: end,
                        category: open_cat,
                    });
                }
            }
        }
    }
    if let Some((start, end, open_cat)) = open.take() {
        spans.push(BioSpan {
            start_token: start,
            end_token_inclusive: end,
            category: open_cat,
        });
    }
    spans
}

/// A decoded feature span in character offsets, prior to trimming and id
/// assignment (done by the caller, §4.3 "Feature assembly").
#[derive(Debug, Clone)]
pub struct DecodedSpan {
    pub start_char: usize,
    pub end_char: usize,
    pub category: FeatureType,
}

/// §4.3 span -> character offset: prefer tokenizer offsets; fall back to
/// joining tokens (stripping `##`/`\u{2581}` prefixes) and a
/// case-insensitive substring search in the original text.
pub fn spans_to_char_offsets(
    spans: &[BioSpan],
    token_offsets: Option<&[(usize, usize)]>,
    tokens: Option<&[String]>,
    original_text: &str,
) -> Vec<DecodedSpan> {
    let mut decoded = Vec::new();
    for span in spans {
        if let Some(offsets) = token_offsets {
            if span.end_token_inclusive < offsets.len() {
                let start_char = offsets[span.start_token].0;
                let end_char = offsets[span.end_token_inclusive].1;
                if end_char > start_char {
                    decoded.push(DecodedSpan {
                        start_char,
                        end_char,
                        category: span.category,
                    });
                    continue;
                }
            }
        }
        if let Some(tokens) = tokens {
            if span.end_token_inclusive < tokens.len() {
                let joined: String = tokens[span.start_token..=span.end_token_inclusive]
                    .iter()
                    .map(|t| t.trim_start_matches("##").trim_start_matches('\u{2581}'))
                    .collect();
                let lower_text = original_text.to_lowercase();
                let lower_joined = joined.to_lowercase();
                if let Some(byte_pos) = lower_text.find(&lower_joined) {
                    let start_char = original_text[..byte_pos].chars().count();
                    let end_char = start_char + joined.chars().count();
                    decoded.push(DecodedSpan {
                        start_char,
                        end_char,
                        category: span.category,
                    });
                }
            }
        }
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correction_promotes_orphan_inside() {
        // I-Structural (2) with no predecessor -> promoted to B-Structural (1)
        let corrected = correct_bio(&[2, 2, 0]);
        assert_eq!(corrected, vec![1, 2, 0]);
    }

    #[test]
    fn correction_promotes_category_switch() {
        // B-Structural, I-Functional (mismatched category) -> promoted to B-Functional
        let corrected = correct_bio(&[1, 4]);
        assert_eq!(corrected, vec![1, 3]);
    }

    #[test]
    fn correction_is_idempotent() {
        let tags = vec![0, 2, 4, 1, 2, 0];
        let once = correct_bio(&tags);
        let twice = correct_bio(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn spans_extracted_respect_category_boundaries() {
        let corrected = correct_bio(&[1, 2, 3, 4, 0]);
        let spans = extract_spans(&corrected);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].start_token, 0);
        assert_eq!(spans[0].end_token_inclusive, 1);
        assert_eq!(spans[1].start_token, 2);
        assert_eq!(spans[1].end_token_inclusive, 3);
    }
}

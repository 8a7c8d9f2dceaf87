use claim_scope_core::config::TokenizerOptions;
use claim_scope_core::vocab::{SpecialTokens, WordPieceVocab};
use claim_scope_core::DomainTokenizer;

fn special_tokens() -> SpecialTokens {
    SpecialTokens {
        cls: "[CLS]".into(),
        sep: "[SEP]".into(),
        unk: "[UNK]".into(),
        pad: "[PAD]".into(),
        mask: "[MASK]".into(),
    }
}

fn build_tokenizer(extra_vocab: &[&str], max_sequence_length: usize) -> DomainTokenizer {
    let mut lines: Vec<String> = vec!["[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]"]
        .into_iter()
        .map(String::from)
        .collect();
    lines.extend(extra_vocab.iter().map(|s| s.to_string()));
    let vocab = WordPieceVocab::from_lines(lines, special_tokens()).unwrap();
    let mut options = TokenizerOptions::default();
    options.max_sequence_length = max_sequence_length;
    DomainTokenizer::new(vocab, options).unwrap()
}

#[test]
fn from_vocab_file_loads_a_vocab_txt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocab.txt");
    std::fs::write(&path, "[PAD]\n[UNK]\n[CLS]\n[SEP]\n[MASK]\nhello\nworld\n").unwrap();
    let tokenizer = DomainTokenizer::from_vocab_file(&path, TokenizerOptions::default()).unwrap();
    assert_eq!(tokenizer.vocab_size(), 7);
}

#[test]
fn encode_invariants_hold() {
    // §8 "Encode invariants": fixed length, mask matches padding, CLS at
    // position 0, a single SEP between content and padding.
    let tokenizer = build_tokenizer(&["hello", "world"], 16);
    let encoded = tokenizer.encode("hello world");
    let pad = pad_id(&tokenizer);

    assert_eq!(encoded.input_ids.len(), 16);
    for (i, &id) in encoded.input_ids.iter().enumerate() {
        assert_eq!(encoded.attention_mask[i] == 0, id == pad);
    }
    assert_eq!(encoded.input_ids[0], cls_id(&tokenizer));

    let sep_positions: Vec<usize> = encoded
        .input_ids
        .iter()
        .enumerate()
        .filter(|&(_, &id)| id == sep_id(&tokenizer))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(sep_positions.len(), 1);
}

#[test]
fn encode_decode_round_trip_preserves_content_words() {
    // §8 "Encode/decode round-trip".
    let tokenizer = build_tokenizer(&["hello", "world"], 16);
    let encoded = tokenizer.encode("hello world");
    let decoded = tokenizer.decode(&encoded.input_ids);
    assert!(decoded.contains("hello"));
    assert!(decoded.contains("world"));
}

#[test]
fn encode_truncates_tail_when_over_budget() {
    let tokenizer = build_tokenizer(&["a", "b", "c", "d", "e", "f"], 4);
    let encoded = tokenizer.encode("a b c d e f");
    assert!(encoded.num_truncated > 0);
    assert!(!encoded.overflow_ids.is_empty());
    assert_eq!(encoded.input_ids.len(), 4);
}

#[test]
fn encode_pair_marks_token_type_ids_per_segment() {
    // §4.1 `encode_pair`: token_type_ids are 0 through the first [SEP]
    // inclusive and 1 thereafter (up to the trailing pad run).
    let tokenizer = build_tokenizer(&["alpha", "beta"], 16);
    let encoded = tokenizer.encode_pair("alpha", "beta");
    let first_sep = encoded
        .input_ids
        .iter()
        .position(|&id| id == sep_id(&tokenizer))
        .unwrap();
    assert!(encoded.token_type_ids[..=first_sep].iter().all(|&t| t == 0));
    assert_eq!(encoded.token_type_ids[first_sep + 1], 1);
}

#[test]
fn batch_encode_applies_to_every_text() {
    let tokenizer = build_tokenizer(&["hello", "world"], 16);
    let batch = tokenizer.batch_encode(&["hello".to_string(), "world".to_string()]);
    assert_eq!(batch.len(), 2);
    assert!(batch.iter().all(|e| e.input_ids.len() == 16));
}

fn cls_id(t: &DomainTokenizer) -> i64 {
    t.encode("").input_ids[0]
}
fn sep_id(t: &DomainTokenizer) -> i64 {
    // second non-padding id in an empty encode is always [SEP]
    t.encode("").input_ids[1]
}
fn pad_id(t: &DomainTokenizer) -> i64 {
    *t.encode("").input_ids.last().unwrap()
}

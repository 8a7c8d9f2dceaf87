// Copyright 2018 The Open AI Team Authors, The Google AI Language Team Authors
// Copyright 2018 The HuggingFace Inc. team.
// Copyright 2019-2020 Guillaume Becquin
// Copyright 2020 Maarten van Gompel
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Low-level text-cleaning and sub-word splitting primitives shared by
//! [`crate::tokenizer::DomainTokenizer`] (§4.1, pipeline steps 1-5).

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::vocab::{Vocab, WordPieceVocab};

/// Step 1: Unicode NFC normalize, drop NUL / replacement char, drop
/// control characters that are not whitespace, optionally lowercase
/// (ASCII semantics) and strip accents.
pub fn clean_text(text: &str, lowercase: bool, strip_accents_opt: bool) -> String {
    let normalized: String = text.nfc().collect();
    let mut cleaned: String = normalized
        .chars()
        .filter(|&c| c != '\u{0}' && c != '\u{FFFD}')
        .filter(|&c| !(c.is_control() && !c.is_whitespace()))
        .collect();
    if lowercase {
        cleaned = cleaned.chars().map(ascii_lowercase_char).collect();
    }
    if strip_accents_opt {
        cleaned = strip_accents(&cleaned);
    }
    cleaned
}

fn ascii_lowercase_char(c: char) -> char {
    if c.is_ascii() {
        c.to_ascii_lowercase()
    } else {
        c
    }
}

/// NFD-decompose then drop non-spacing (combining) marks.
pub fn strip_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

pub fn is_whitespace(c: char) -> bool {
    c.is_whitespace()
}

pub fn is_punctuation(c: char) -> bool {
    let cp = c as u32;
    // ASCII punctuation ranges, mirroring BERT's basic tokenizer, plus
    // Unicode general punctuation categories for non-ASCII runes.
    ((33..=47).contains(&cp)
        || (58..=64).contains(&cp)
        || (91..=96).contains(&cp)
        || (123..=126).contains(&cp))
        || (!c.is_ascii() && (c.is_ascii_punctuation() || is_unicode_punctuation(c)))
}

fn is_unicode_punctuation(c: char) -> bool {
    matches!(
        c,
        '\u{2018}'..='\u{201F}' | '\u{2013}' | '\u{2014}' | '\u{3000}'..='\u{303F}'
            | '\u{FF00}'..='\u{FFEF}'
    ) && !c.is_alphanumeric()
}

/// A word is a run of non-whitespace, non-punctuation characters, or a
/// single punctuation rune, or a pre-selected chemical span (handled by
/// the caller before falling back to this walker).
pub struct Word {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Splits `text` into words honoring pre-selected chemical spans
/// (character-offset ranges that must be emitted verbatim, §4.1 step 3).
pub fn split_into_words(text: &str, chemical_spans: &[(usize, usize)]) -> Vec<Word> {
    let chars: Vec<char> = text.chars().collect();
    let mut words = Vec::new();
    let mut i = 0usize;
    let n = chars.len();
    while i < n {
        if let Some(&(start, end)) = chemical_spans.iter().find(|&&(s, _)| s == i) {
            let word_text: String = chars[start..end].iter().collect();
            words.push(Word {
                text: word_text,
                start,
                end,
            });
            i = end;
            continue;
        }
        let c = chars[i];
        if is_whitespace(c) {
            i += 1;
            continue;
        }
        if is_punctuation(c) {
            words.push(Word {
                text: c.to_string(),
                start: i,
                end: i + 1,
            });
            i += 1;
            continue;
        }
        let start = i;
        while i < n
            && !is_whitespace(chars[i])
            && !is_punctuation(chars[i])
            && !chemical_spans.iter().any(|&(s, _)| s == i)
        {
            i += 1;
        }
        let word_text: String = chars[start..i].iter().collect();
        words.push(Word {
            text: word_text,
            start,
            end: i,
        });
    }
    words
}

/// A WordPiece sub-token with its character span into the original word
/// (and, by the caller's bookkeeping, into the cleaned text).
#[derive(Debug, Clone)]
pub struct SubWord {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Longest-match-from-left WordPiece tokenization of a single word
/// (§4.1 step 4). `word_start` is the word's character offset into the
/// cleaned text, used to translate local char positions into absolute
/// ones.
pub fn tokenize_wordpiece(word: &str, word_start: usize, vocab: &WordPieceVocab) -> Vec<SubWord> {
    if word.len() > 200 {
        return vec![SubWord {
            text: vocab.special_tokens().unk.clone(),
            start: word_start,
            end: word_start + word.chars().count(),
        }];
    }
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    let mut result = Vec::new();
    let mut start = 0usize;
    while start < n {
        let mut end = n;
        let mut found: Option<String> = None;
        while end > start {
            let piece: String = chars[start..end].iter().collect();
            let candidate = if start > 0 {
                format!("##{}", piece)
            } else {
                piece
            };
            if vocab.values().contains_key(&candidate) {
                found = Some(candidate);
                break;
            }
            end -= 1;
        }
        match found {
            Some(piece) => {
                result.push(SubWord {
                    text: piece,
                    start: word_start + start,
                    end: word_start + end,
                });
                start = end;
            }
            None => {
                return vec![SubWord {
                    text: vocab.special_tokens().unk.clone(),
                    start: word_start,
                    end: word_start + n,
                }];
            }
        }
    }
    result
}

/// Truncates a single content-token sequence to `max_content_len` by
/// dropping the tail, returning the removed ids as overflow (§4.1 `encode`).
pub fn truncate_tail<T: Clone>(tokens: &mut Vec<T>, max_content_len: usize) -> Vec<T> {
    if tokens.len() <= max_content_len {
        return Vec::new();
    }
    tokens.split_off(max_content_len)
}

/// Longest-first truncation for a sequence pair (§4.1 `encode_pair`):
/// repeatedly drop the tail token from whichever side is currently
/// longer, ties favoring side A. Returns the ids removed from A (the
/// spec's overflow is captured from the first sequence only).
pub fn truncate_longest_first<T>(a: &mut Vec<T>, b: &mut Vec<T>, num_to_remove: usize) -> Vec<T> {
    let mut overflow = Vec::new();
    for _ in 0..num_to_remove {
        if a.len() >= b.len() {
            if let Some(v) = a.pop() {
                overflow.push(v);
            } else if let Some(v) = b.pop() {
                overflow.push(v);
            }
        } else if let Some(v) = b.pop() {
            overflow.push(v);
        } else if let Some(v) = a.pop() {
            overflow.push(v);
        }
    }
    overflow
}

//! # Construction-time configuration
//!
//! Validated once, at construction, never per-request (§7: `ConfigInvalid`
//! is "raised at construction"). Configuration loading itself (reading a
//! file, environment variables, a service mesh config store) is an
//! external collaborator's job and is out of scope here (§1).

use std::time::Duration;

use crate::error::{CoreError, Result};

/// Options controlling the [`crate::tokenizer::DomainTokenizer`].
#[derive(Debug, Clone)]
pub struct TokenizerOptions {
    pub max_sequence_length: usize,
    pub lowercase: bool,
    pub strip_accents: bool,
    pub cls_token: String,
    pub sep_token: String,
    pub unk_token: String,
    pub pad_token: String,
    pub mask_token: String,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        TokenizerOptions {
            max_sequence_length: 512,
            lowercase: false,
            strip_accents: false,
            cls_token: "[CLS]".to_string(),
            sep_token: "[SEP]".to_string(),
            unk_token: "[UNK]".to_string(),
            pad_token: "[PAD]".to_string(),
            mask_token: "[MASK]".to_string(),
        }
    }
}

impl TokenizerOptions {
    pub fn validate(&self) -> Result<()> {
        if self.max_sequence_length == 0
            || self.max_sequence_length > 2048
            || !self.max_sequence_length.is_power_of_two()
        {
            return Err(CoreError::ConfigInvalid(format!(
                "max_sequence_length must be a positive power of two <= 2048, got {}",
                self.max_sequence_length
            )));
        }
        Ok(())
    }
}

/// Runtime configuration for the claim parser / scope analyzer.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    pub request_timeout: Duration,
    pub hidden_dim: usize,
    pub num_attention_heads: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            request_timeout: Duration::from_millis(3000),
            hidden_dim: 768,
            num_attention_heads: 12,
        }
    }
}

impl ParserConfig {
    pub fn validate(&self) -> Result<()> {
        if self.num_attention_heads == 0 || self.hidden_dim % self.num_attention_heads != 0 {
            return Err(CoreError::ConfigInvalid(format!(
                "hidden_dim ({}) must be divisible by num_attention_heads ({})",
                self.hidden_dim, self.num_attention_heads
            )));
        }
        Ok(())
    }
}

//! Hash embeddings
//!
//! Bag-of-words feature hashing into a fixed 100-bucket vector. Each token
//! lands in the bucket given by the sum of its UTF-16 code units modulo the
//! dimension. No model dependencies, fully deterministic.
//!
//! The bucketing is deliberately weak (anagrams collide) and must not change:
//! precomputed corpora are only comparable with vectors produced by this exact
//! scheme.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SkemiError;
use crate::search::similarity::{l2_norm, l2_normalize};

/// Fixed embedding dimension shared by queries and corpus vectors.
pub const EMBEDDING_DIM: usize = 100;

/// Which characters survive normalization before tokenizing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tokenization {
    /// ASCII letters and digits only. Compatible with existing corpora.
    #[default]
    Ascii,
    /// Any Unicode alphanumeric character. Corpora must be rebuilt in this mode.
    Unicode,
}

impl Tokenization {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Unicode => "unicode",
        }
    }

    fn keeps(self, c: char) -> bool {
        match self {
            Self::Ascii => c.is_ascii_lowercase() || c.is_ascii_digit(),
            Self::Unicode => c.is_alphanumeric(),
        }
    }
}

impl fmt::Display for Tokenization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tokenization {
    type Err = SkemiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "ascii" => Ok(Self::Ascii),
            "unicode" => Ok(Self::Unicode),
            other => Err(SkemiError::Config(format!(
                "invalid tokenization {other} (expected ascii|unicode)"
            ))),
        }
    }
}

/// Whitespace in the sense of ECMAScript `\s`: Unicode White_Space without
/// U+0085, plus U+FEFF. Existing corpora were tokenized with this set.
fn is_separator(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// A unit-length (or all-zero) embedding of exactly [`EMBEDDING_DIM`] components.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EmbeddingVector(Vec<f64>);

impl EmbeddingVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn norm(&self) -> f64 {
        l2_norm(&self.0)
    }

    /// True when the text produced no tokens.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|x| *x == 0.0)
    }

    /// `(bucket, weight)` pairs for every non-zero component.
    pub fn nonzero_buckets(&self) -> Vec<(usize, f64)> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, x)| **x != 0.0)
            .map(|(i, x)| (i, *x))
            .collect()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl AsRef<[f64]> for EmbeddingVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Hash embedder producing [`EMBEDDING_DIM`]-bucket vectors.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashEmbedder {
    tokenization: Tokenization,
}

impl HashEmbedder {
    pub const fn new(tokenization: Tokenization) -> Self {
        Self { tokenization }
    }

    pub const fn tokenization(&self) -> Tokenization {
        self.tokenization
    }

    /// Lowercase, drop everything but kept characters and separators, split.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .filter(|c| is_separator(*c) || self.tokenization.keeps(*c))
            .collect();
        cleaned
            .split(is_separator)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Bucket index for a single token.
    pub fn bucket(token: &str) -> usize {
        token
            .encode_utf16()
            .fold(0usize, |acc, unit| acc.wrapping_add(usize::from(unit)))
            % EMBEDDING_DIM
    }

    /// Embed text into a normalized bucket histogram.
    pub fn embed(&self, text: &str) -> EmbeddingVector {
        let mut vector = vec![0.0; EMBEDDING_DIM];
        for token in self.tokenize(text) {
            vector[Self::bucket(&token)] += 1.0;
        }
        l2_normalize(&mut vector);
        EmbeddingVector(vector)
    }
}

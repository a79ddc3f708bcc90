//! Vector norms and cosine similarity.

use thiserror::Error;

/// Why two vectors could not be scored against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimilarityError {
    #[error("vectors differ in length ({left} vs {right})")]
    DimensionMismatch { left: usize, right: usize },

    /// A zero-norm vector has no direction to compare.
    #[error("zero-norm vector")]
    Degenerate,

    #[error("vector contains a non-finite component")]
    NonFinite,
}

/// Euclidean norm.
pub fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// L2-normalize in place. Zero vectors stay zero.
pub fn l2_normalize(v: &mut [f64]) {
    let norm = l2_norm(v);
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Cosine similarity `dot(a, b) / (|a| * |b|)`, clamped to `[-1, 1]`.
///
/// Mismatched lengths are rejected rather than truncated, and a zero-norm
/// side yields [`SimilarityError::Degenerate`] instead of NaN.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64, SimilarityError> {
    if a.len() != b.len() {
        return Err(SimilarityError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);

    if !(dot.is_finite() && norm_a.is_finite() && norm_b.is_finite()) {
        return Err(SimilarityError::NonFinite);
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(SimilarityError::Degenerate);
    }

    Ok((dot / (norm_a * norm_b)).clamp(-1.0, 1.0))
}

//! Attribute scoring functions
//!
//! Compare two ordinal values of the same attribute. Every function is
//! symmetric in its two values and returns a score in [0.0, 1.0] where 1.0
//! is the most compatible pair. A degenerate scale (min == max) scores 1.0.

use crate::schema::{ComplementarityFormula, ScoringMode};
use tenantmatch_core::Scale;

/// Clamp a raw score into [0.0, 1.0]
#[inline]
pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Score one attribute according to its mode
#[inline]
pub fn score(
    mode: ScoringMode,
    a: f64,
    b: f64,
    scale: Scale,
    formula: ComplementarityFormula,
) -> f64 {
    match mode {
        ScoringMode::Similarity => similarity(a, b, scale),
        ScoringMode::Complementarity => complementarity(a, b, scale, formula),
    }
}

/// Closeness of two values
///
/// On 1..5: (1, 5) scores 0.0, (1, 2) scores 0.75.
#[inline]
pub fn similarity(a: f64, b: f64, scale: Scale) -> f64 {
    let span = scale.span();
    if span <= 0.0 {
        return 1.0;
    }
    clamp01(1.0 - (a - b).abs() / span)
}

/// Balance of two values around the scale midpoint
#[inline]
pub fn complementarity(a: f64, b: f64, scale: Scale, formula: ComplementarityFormula) -> f64 {
    match formula {
        ComplementarityFormula::Mirror => mirror_balance(a, b, scale),
        ComplementarityFormula::BalancedAverage => balanced_average(a, b, scale),
    }
}

/// Pairs summing to min + max score 1.0: (1, 5), (2, 4), (3, 3) on 1..5.
/// (1, 1) and (5, 5) score 0.0.
fn mirror_balance(a: f64, b: f64, scale: Scale) -> f64 {
    let span = scale.span();
    if span <= 0.0 {
        return 1.0;
    }
    let deviation = (a + b - scale.target_sum()).abs();
    clamp01(1.0 - deviation / span)
}

/// Average near the midpoint, with a mild penalty for pairs built from
/// extreme values: (3, 3) scores 1.0, (1, 5) scores 0.75.
fn balanced_average(a: f64, b: f64, scale: Scale) -> f64 {
    let half = scale.span() / 2.0;
    if half <= 0.0 {
        return 1.0;
    }
    let mid = scale.midpoint();
    let avg = (a + b) / 2.0;
    let closeness = 1.0 - (avg - mid).abs() / half;
    let extremity = ((a - mid).abs() / half + (b - mid).abs() / half) / 2.0;
    clamp01(closeness * (1.0 - 0.25 * extremity))
}

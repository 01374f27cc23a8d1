//! Explainability for match results
//!
//! Picks the attributes that contributed most to a pair score and renders
//! them as short and long sentences plus compact machine-readable strings.

use crate::aggregate::{Contribution, PairResult};
use crate::rerank::Matcher;
use crate::schema::{ComplementarityFormula, MatchingSchema, ScoringMode};
use serde::Serialize;
use smallvec::SmallVec;
use std::cmp::Ordering;
use tenantmatch_core::{humanize, Entity};

/// Number of drivers reported per match
pub const TOP_DRIVERS: usize = 3;

/// An attribute among the strongest contributors to a pair score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Driver {
    /// Column name
    pub attribute: String,
    /// Display label, see [`humanize`]
    pub label: String,
    pub mode: ScoringMode,
    pub score: f64,
    pub weight: f64,
    pub contribution: f64,
    pub a: f64,
    pub b: f64,
}

/// Rendered explanation of one match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub drivers: SmallVec<[Driver; TOP_DRIVERS]>,
    /// `High compatibility driven by ...`
    pub short: String,
    pub long: String,
    /// `attr(mode=.., score=.., w=..)` joined by `"; "`
    pub top_drivers: String,
    /// `attr: a vs b (mode, score)` joined by `" | "`
    pub driver_values: String,
}

/// Strongest contributions, largest first.
///
/// The sort is stable, so equal contributions keep declaration order.
pub fn top_contributions(contributions: &[Contribution]) -> SmallVec<[&Contribution; TOP_DRIVERS]> {
    let mut sorted: Vec<&Contribution> = contributions.iter().collect();
    sorted.sort_by(|a, b| {
        b.contribution
            .partial_cmp(&a.contribution)
            .unwrap_or(Ordering::Equal)
    });
    sorted.into_iter().take(TOP_DRIVERS).collect()
}

/// Explain why `a` and `b` scored `pair.percentage`
pub fn explain(schema: &MatchingSchema, a: &Entity, b: &Entity, pair: &PairResult) -> Explanation {
    let drivers: SmallVec<[Driver; TOP_DRIVERS]> = top_contributions(&pair.contributions)
        .into_iter()
        .map(|c| {
            let attribute = schema
                .attribute(c.attribute)
                .map(|def| def.name.clone())
                .unwrap_or_else(|| format!("attribute_{}", c.attribute));
            Driver {
                label: humanize(&attribute),
                attribute,
                mode: c.mode,
                score: c.score,
                weight: c.weight,
                contribution: c.contribution,
                a: c.a,
                b: c.b,
            }
        })
        .collect();

    let labels: Vec<&str> = drivers.iter().map(|d| d.label.as_str()).collect();
    let listed = join_labels(&labels);

    let short = if listed.is_empty() {
        "High compatibility.".to_string()
    } else {
        format!("High compatibility driven by {}.", listed)
    };

    let mut long = format!(
        "{} matches well with {} (score {:.2}%). ",
        a.label(),
        b.label(),
        pair.percentage
    );
    if !listed.is_empty() {
        long.push_str(&format!("Top drivers: {}. ", listed));
    }
    long.push_str(&mode_note(schema));

    let top_drivers = drivers
        .iter()
        .map(|d| {
            format!(
                "{}(mode={}, score={:.2}, w={:.2})",
                d.attribute, d.mode, d.score, d.weight
            )
        })
        .collect::<Vec<_>>()
        .join("; ");

    let driver_values = drivers
        .iter()
        .map(|d| format!("{}: {} vs {} ({}, {:.2})", d.attribute, d.a, d.b, d.mode, d.score))
        .collect::<Vec<_>>()
        .join(" | ");

    Explanation {
        drivers,
        short,
        long,
        top_drivers,
        driver_values,
    }
}

/// "A", "A and B", "A, B and C"
fn join_labels(labels: &[&str]) -> String {
    match labels {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

fn mode_note(schema: &MatchingSchema) -> String {
    let scale = schema.scale;
    match schema.complementarity {
        ComplementarityFormula::Mirror => format!(
            "Note: similarity rewards close values, while complementarity rewards balanced pairs \
             (on a {}..{} scale, best when a+b is about {}).",
            scale.min,
            scale.max,
            scale.target_sum()
        ),
        ComplementarityFormula::BalancedAverage => format!(
            "Note: similarity rewards close values, while complementarity rewards balanced pairs \
             (on a {}..{} scale, best when the pair's average sits near {}).",
            scale.min,
            scale.max,
            scale.midpoint()
        ),
    }
}

impl Matcher {
    /// Explain a pair produced by [`Matcher::aggregate`]
    pub fn explain(&self, a: &Entity, b: &Entity, pair: &PairResult) -> Explanation {
        explain(self.schema(), a, b, pair)
    }
}

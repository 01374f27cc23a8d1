//! Ranker for tenant matches
//!
//! Scores an entity against every other entity and keeps the strongest
//! candidates, with an explicit tie-break so results are reproducible.

use crate::aggregate::{self, PairResult};
use crate::schema::MatchingSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tenantmatch_core::{Entity, Result, ValidationError};

/// Ordering among candidates with equal percentages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Keep the candidates' order in the input table
    #[default]
    InputOrder,
    /// Lower candidate id first
    CandidateId,
}

/// A candidate together with its pair score
#[derive(Debug, Clone)]
pub struct RankedMatch<'e> {
    pub candidate: &'e Entity,
    pub pair: PairResult,
}

impl RankedMatch<'_> {
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.pair.percentage
    }
}

/// Stateless matching engine bound to one validated schema
#[derive(Debug, Clone)]
pub struct Matcher {
    schema: MatchingSchema,
    tie_break: TieBreak,
}

impl Matcher {
    /// Create a matcher, rejecting an unusable schema up front
    pub fn new(schema: MatchingSchema) -> Result<Self> {
        schema.validate()?;
        Ok(Self {
            schema,
            tie_break: TieBreak::default(),
        })
    }

    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Get a reference to the schema
    pub fn schema(&self) -> &MatchingSchema {
        &self.schema
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Compatibility of `a` with `b`
    pub fn aggregate(&self, a: &Entity, b: &Entity) -> Result<PairResult> {
        Ok(aggregate::aggregate(&self.schema, a, b)?)
    }

    /// Best `top_n` matches for `entity` among `candidates`.
    ///
    /// The entity itself is skipped by id, wherever it sits in the input.
    /// Results are sorted by percentage descending, ties resolved by the
    /// matcher's [`TieBreak`]. Percentages are compared after rounding to
    /// two decimals, so candidates closer than 0.005 count as tied.
    pub fn top_matches<'e, I>(&self, entity: &Entity, candidates: I, top_n: usize) -> Result<Vec<RankedMatch<'e>>>
    where
        I: IntoIterator<Item = &'e Entity>,
    {
        Ok(self.rank(entity, candidates, top_n)?)
    }

    pub(crate) fn rank<'e, I>(
        &self,
        entity: &Entity,
        candidates: I,
        top_n: usize,
    ) -> std::result::Result<Vec<RankedMatch<'e>>, ValidationError>
    where
        I: IntoIterator<Item = &'e Entity>,
    {
        if top_n == 0 {
            return Ok(Vec::new());
        }

        let mut results = Vec::new();
        for candidate in candidates {
            if candidate.id() == entity.id() {
                continue;
            }
            let pair = aggregate::aggregate(&self.schema, entity, candidate)?;
            results.push(RankedMatch { candidate, pair });
        }

        // sort_by is stable, so InputOrder needs no secondary key
        match self.tie_break {
            TieBreak::InputOrder => results.sort_by(|a, b| by_percentage_desc(a, b)),
            TieBreak::CandidateId => results.sort_by(|a, b| {
                by_percentage_desc(a, b).then_with(|| a.candidate.id().cmp(&b.candidate.id()))
            }),
        }

        results.truncate(top_n);
        Ok(results)
    }
}

fn by_percentage_desc(a: &RankedMatch<'_>, b: &RankedMatch<'_>) -> Ordering {
    b.percentage()
        .partial_cmp(&a.percentage())
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AttributeDef;
    use tenantmatch_core::ConfigError;
    use tenantmatch_core::Error;

    fn single_attribute_matcher() -> Matcher {
        Matcher::new(MatchingSchema::new(vec![AttributeDef::similarity("x", 1.0)])).unwrap()
    }

    fn entity(id: u32, x: f64) -> Entity {
        Entity::with_default_label(id, vec![x])
    }

    fn ids(matches: &[RankedMatch<'_>]) -> Vec<u32> {
        matches.iter().map(|m| m.candidate.id()).collect()
    }

    #[test]
    fn test_matcher_rejects_invalid_schema() {
        let schema = MatchingSchema::new(vec![AttributeDef::similarity("x", 0.0)]);
        assert!(matches!(
            Matcher::new(schema),
            Err(Error::Configuration(ConfigError::ZeroTotalWeight))
        ));
    }

    #[test]
    fn test_top_matches_scenario() {
        let matcher = single_attribute_matcher();
        let entities = vec![entity(1, 1.0), entity(2, 3.0), entity(3, 5.0)];

        let top = matcher.top_matches(&entities[0], &entities, 2).unwrap();

        assert_eq!(ids(&top), vec![2, 3]);
        assert_eq!(top[0].percentage(), 50.0);
        assert_eq!(top[1].percentage(), 0.0);
    }

    #[test]
    fn test_self_excluded_by_id_not_position() {
        let matcher = single_attribute_matcher();
        // Unsorted input with the query entity in the middle
        let entities = vec![entity(9, 2.0), entity(4, 4.0), entity(7, 4.0)];

        let top = matcher.top_matches(&entities[1], &entities, 10).unwrap();

        assert_eq!(top.len(), 2);
        assert!(top.iter().all(|m| m.candidate.id() != 4));
        assert_eq!(top[0].candidate.id(), 7);
    }

    #[test]
    fn test_length_is_bounded_by_candidates() {
        let matcher = single_attribute_matcher();
        let entities: Vec<Entity> = (1..=4).map(|i| entity(i, f64::from(i))).collect();

        assert_eq!(matcher.top_matches(&entities[0], &entities, 2).unwrap().len(), 2);
        assert_eq!(matcher.top_matches(&entities[0], &entities, 3).unwrap().len(), 3);
        assert_eq!(matcher.top_matches(&entities[0], &entities, 50).unwrap().len(), 3);
        assert!(matcher.top_matches(&entities[0], &entities, 0).unwrap().is_empty());
    }

    #[test]
    fn test_single_entity_has_no_matches() {
        let matcher = single_attribute_matcher();
        let entities = vec![entity(1, 3.0)];

        assert!(matcher.top_matches(&entities[0], &entities, 5).unwrap().is_empty());
    }

    #[test]
    fn test_sorted_non_increasing() {
        let matcher = Matcher::new(MatchingSchema::tenant_default()).unwrap();
        let entities: Vec<Entity> = (1..=12)
            .map(|i| {
                let values: Vec<f64> = (0..10).map(|k| f64::from((i + k) % 5 + 1)).collect();
                Entity::with_default_label(i, values)
            })
            .collect();

        let top = matcher.top_matches(&entities[0], &entities, 11).unwrap();
        assert_eq!(top.len(), 11);
        for window in top.windows(2) {
            assert!(window[0].percentage() >= window[1].percentage());
        }
    }

    #[test]
    fn test_tie_break_input_order() {
        let matcher = single_attribute_matcher();
        // Candidates 8 and 2 both score 75% against entity 1
        let entities = vec![entity(1, 3.0), entity(8, 4.0), entity(2, 2.0)];

        let top = matcher.top_matches(&entities[0], &entities, 2).unwrap();
        assert_eq!(ids(&top), vec![8, 2]);
    }

    #[test]
    fn test_ties_are_judged_after_rounding() {
        let matcher = single_attribute_matcher();
        // 99.9975% and 100% both round to 100.00
        let entities = vec![entity(1, 3.0), entity(5, 3.0001), entity(6, 3.0)];

        let top = matcher.top_matches(&entities[0], &entities, 2).unwrap();
        assert_eq!(ids(&top), vec![5, 6]);
        assert_eq!(top[0].percentage(), 100.0);
    }

    #[test]
    fn test_tie_break_candidate_id() {
        let matcher = single_attribute_matcher().with_tie_break(TieBreak::CandidateId);
        let entities = vec![entity(1, 3.0), entity(8, 4.0), entity(2, 2.0)];

        let top = matcher.top_matches(&entities[0], &entities, 2).unwrap();
        assert_eq!(ids(&top), vec![2, 8]);
    }

    #[test]
    fn test_top_matches_rejects_non_finite_candidates() {
        let matcher = single_attribute_matcher();
        let query = entity(1, 3.0);
        let nan = entity(2, f64::NAN);

        assert!(matches!(
            matcher.top_matches(&query, [&nan], 1),
            Err(Error::Validation(ValidationError::NonFiniteValue { id: 2, .. }))
        ));
    }

    #[test]
    fn test_top_matches_propagates_arity_errors() {
        let matcher = single_attribute_matcher();
        let query = entity(1, 3.0);
        let broken = Entity::with_default_label(2, vec![1.0, 2.0]);

        assert!(matches!(
            matcher.top_matches(&query, [&broken], 1),
            Err(Error::Validation(_))
        ));
    }
}

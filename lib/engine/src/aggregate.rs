//! Pair aggregation
//!
//! Scores every attribute of an entity pair and folds the weighted scores
//! into a single compatibility percentage, keeping the per-attribute detail
//! for explanations.

use crate::distance;
use crate::schema::{MatchingSchema, ScoringMode};
use serde::Serialize;
use tenantmatch_core::{Entity, ValidationError};

/// One attribute's share of a pair score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contribution {
    /// Position of the attribute in the schema
    pub attribute: usize,
    /// Value on the left-hand entity
    pub a: f64,
    /// Value on the right-hand entity
    pub b: f64,
    /// Normalized attribute score in [0, 1]
    pub score: f64,
    pub weight: f64,
    /// `weight * score`
    pub contribution: f64,
    pub mode: ScoringMode,
}

/// Compatibility of an ordered entity pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairResult {
    /// Weighted average scaled to [0, 100], rounded to two decimals
    pub percentage: f64,
    /// Per-attribute detail in schema declaration order
    pub contributions: Vec<Contribution>,
}

/// Round to two decimal places
#[inline]
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Check an entity carries exactly one value per schema attribute
pub fn check_arity(schema: &MatchingSchema, entity: &Entity) -> std::result::Result<(), ValidationError> {
    if entity.arity() != schema.len() {
        return Err(ValidationError::ValueCountMismatch {
            id: entity.id(),
            expected: schema.len(),
            actual: entity.arity(),
        });
    }
    Ok(())
}

/// Check every value is finite; NaN would survive clamping and break ordering
pub fn check_finite(schema: &MatchingSchema, entity: &Entity) -> std::result::Result<(), ValidationError> {
    match entity.values().iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ValidationError::NonFiniteValue {
            id: entity.id(),
            attribute: schema
                .attribute(index)
                .map(|def| def.name.clone())
                .unwrap_or_else(|| format!("attribute_{}", index)),
        }),
        None => Ok(()),
    }
}

/// Arity and finiteness together
pub fn check_entity(schema: &MatchingSchema, entity: &Entity) -> std::result::Result<(), ValidationError> {
    check_arity(schema, entity)?;
    check_finite(schema, entity)
}

/// Aggregate all attribute scores of `a` against `b`.
///
/// The schema is assumed validated, so its total weight is positive.
pub fn aggregate(
    schema: &MatchingSchema,
    a: &Entity,
    b: &Entity,
) -> std::result::Result<PairResult, ValidationError> {
    check_entity(schema, a)?;
    check_entity(schema, b)?;

    let mut contributions = Vec::with_capacity(schema.len());
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for (index, ((attr, &av), &bv)) in schema
        .attributes
        .iter()
        .zip(a.values())
        .zip(b.values())
        .enumerate()
    {
        let score = distance::score(attr.mode, av, bv, schema.scale, schema.complementarity);
        let contribution = attr.weight * score;
        weighted_sum += contribution;
        total_weight += attr.weight;

        contributions.push(Contribution {
            attribute: index,
            a: av,
            b: bv,
            score,
            weight: attr.weight,
            contribution,
            mode: attr.mode,
        });
    }

    let percentage = round2(weighted_sum / total_weight * 100.0);

    Ok(PairResult {
        percentage,
        contributions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AttributeDef;
    use proptest::prelude::*;
    use tenantmatch_core::TenantAttribute;

    fn single(mode: ScoringMode) -> MatchingSchema {
        MatchingSchema::new(vec![AttributeDef::new("x", mode, 1.0)])
    }

    #[test]
    fn test_single_similarity_attribute() {
        let schema = single(ScoringMode::Similarity);
        let a = Entity::with_default_label(1, vec![1.0]);
        let b = Entity::with_default_label(2, vec![3.0]);
        let c = Entity::with_default_label(3, vec![5.0]);

        assert_eq!(aggregate(&schema, &a, &b).unwrap().percentage, 50.0);
        assert_eq!(aggregate(&schema, &a, &c).unwrap().percentage, 0.0);
        assert_eq!(aggregate(&schema, &b, &c).unwrap().percentage, 50.0);
    }

    #[test]
    fn test_single_complementarity_attribute() {
        let schema = single(ScoringMode::Complementarity);
        let a = Entity::with_default_label(1, vec![1.0]);
        let b = Entity::with_default_label(2, vec![5.0]);

        assert_eq!(aggregate(&schema, &a, &b).unwrap().percentage, 100.0);
    }

    #[test]
    fn test_weighted_average() {
        let schema = MatchingSchema::new(vec![
            AttributeDef::similarity("x", 3.0),
            AttributeDef::similarity("y", 1.0),
        ]);
        // x identical (1.0 * 3), y opposite (0.0 * 1) => 75%
        let a = Entity::with_default_label(1, vec![2.0, 1.0]);
        let b = Entity::with_default_label(2, vec![2.0, 5.0]);

        let pair = aggregate(&schema, &a, &b).unwrap();
        assert_eq!(pair.percentage, 75.0);
        assert_eq!(pair.contributions.len(), 2);
        assert_eq!(pair.contributions[0].contribution, 3.0);
        assert_eq!(pair.contributions[1].contribution, 0.0);
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        let schema = MatchingSchema::new(vec![
            AttributeDef::similarity("x", 1.0),
            AttributeDef::similarity("y", 1.0),
            AttributeDef::similarity("z", 1.0),
        ]);
        // scores 1.0, 0.0, 0.0 => 33.333...
        let a = Entity::with_default_label(1, vec![1.0, 1.0, 1.0]);
        let b = Entity::with_default_label(2, vec![1.0, 5.0, 5.0]);

        assert_eq!(aggregate(&schema, &a, &b).unwrap().percentage, 33.33);
    }

    #[test]
    fn test_contributions_keep_declaration_order() {
        let schema = MatchingSchema::tenant_default();
        let a = Entity::with_default_label(1, vec![3.0; 10]);
        let b = Entity::with_default_label(2, vec![4.0; 10]);

        let pair = aggregate(&schema, &a, &b).unwrap();
        let order: Vec<usize> = pair.contributions.iter().map(|c| c.attribute).collect();
        assert_eq!(order, (0..10).collect::<Vec<_>>());
        assert_eq!(
            pair.contributions[TenantAttribute::Sociability.index()].mode,
            ScoringMode::Complementarity
        );
    }

    #[test]
    fn test_arity_mismatch_is_rejected() {
        let schema = MatchingSchema::tenant_default();
        let a = Entity::with_default_label(1, vec![3.0; 10]);
        let short = Entity::with_default_label(2, vec![3.0; 4]);

        let err = aggregate(&schema, &a, &short).unwrap_err();
        assert!(err.to_string().contains("expected 10"));
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let schema = MatchingSchema::new(vec![
            AttributeDef::similarity("x", 1.0),
            AttributeDef::similarity("y", 1.0),
        ]);
        let a = Entity::with_default_label(1, vec![3.0, 3.0]);
        let nan = Entity::with_default_label(2, vec![3.0, f64::NAN]);
        let inf = Entity::with_default_label(3, vec![f64::INFINITY, 3.0]);

        assert_eq!(
            aggregate(&schema, &a, &nan).unwrap_err(),
            ValidationError::NonFiniteValue {
                id: 2,
                attribute: "y".to_string()
            }
        );
        assert_eq!(
            aggregate(&schema, &inf, &a).unwrap_err(),
            ValidationError::NonFiniteValue {
                id: 3,
                attribute: "x".to_string()
            }
        );
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(50.0), 50.0);
    }

    proptest! {
        #[test]
        fn prop_percentage_symmetric_and_bounded(
            left in proptest::collection::vec(1u8..=5, 10),
            right in proptest::collection::vec(1u8..=5, 10),
        ) {
            let schema = MatchingSchema::tenant_default();
            let a = Entity::with_default_label(1, left.into_iter().map(f64::from).collect::<Vec<_>>());
            let b = Entity::with_default_label(2, right.into_iter().map(f64::from).collect::<Vec<_>>());

            let ab = aggregate(&schema, &a, &b).unwrap().percentage;
            let ba = aggregate(&schema, &b, &a).unwrap().percentage;
            prop_assert_eq!(ab, ba);
            prop_assert!((0.0..=100.0).contains(&ab));
        }
    }
}

//! Batch driver
//!
//! Runs the ranker and explainer for every entity and flattens the results
//! into match rows. Work is O(n² · f) for n entities and f attributes; the
//! outer loop is spread across the rayon thread pool.

use crate::aggregate::check_entity;
use crate::rerank::Matcher;
use ahash::AHashSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tenantmatch_core::{Entity, EntityId, Result, ValidationError};

type EntityRows = std::result::Result<Vec<MatchRow>, ValidationError>;
use tracing::{debug, info, warn};

/// One output row: a ranked match with its explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRow {
    pub user_id: EntityId,
    pub tenant_label: String,
    /// 1-based
    pub match_rank: usize,
    pub match_user_id: EntityId,
    pub match_tenant_label: String,
    pub compatibility_score: f64,
    pub top_drivers: String,
    pub explanation_short: String,
    pub explanation_long: String,
    pub top_driver_values: String,
}

/// An entity whose rows could not be produced
#[derive(Debug, Clone, PartialEq)]
pub struct EntityFailure {
    pub user_id: EntityId,
    pub tenant_label: String,
    pub error: ValidationError,
}

/// Result of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchOutput {
    /// Rows in input entity order, then rank
    pub rows: Vec<MatchRow>,
    /// Entities skipped because their input was malformed
    pub failures: Vec<EntityFailure>,
}

impl BatchOutput {
    /// Rows emitted for one entity
    pub fn rows_for(&self, user_id: EntityId) -> impl Iterator<Item = &MatchRow> {
        self.rows.iter().filter(move |r| r.user_id == user_id)
    }
}

impl Matcher {
    /// Top `top_n` explained matches for every entity, computed in parallel.
    ///
    /// Malformed entities (wrong value count, non-finite value, repeated id)
    /// are reported in
    /// [`BatchOutput::failures`] and left out of every candidate pool; the
    /// rest of the batch is unaffected.
    pub fn compute_all(&self, entities: &[Entity], top_n: usize) -> BatchOutput {
        let (valid, failures) = self.partition(entities);

        let per_entity: Vec<EntityRows> = valid
            .par_iter()
            .map(|entity| self.explained_rows(entity, &valid, top_n))
            .collect();

        self.collect_rows(&valid, per_entity, failures, entities.len())
    }

    /// Same as [`Matcher::compute_all`] on the calling thread
    pub fn compute_all_serial(&self, entities: &[Entity], top_n: usize) -> BatchOutput {
        let (valid, failures) = self.partition(entities);

        let per_entity: Vec<EntityRows> = valid
            .iter()
            .map(|entity| self.explained_rows(entity, &valid, top_n))
            .collect();

        self.collect_rows(&valid, per_entity, failures, entities.len())
    }

    /// Ranked and explained rows for a single entity
    pub fn explained_matches(&self, entity: &Entity, pool: &[&Entity], top_n: usize) -> Result<Vec<MatchRow>> {
        Ok(self.explained_rows(entity, pool, top_n)?)
    }

    fn explained_rows(&self, entity: &Entity, pool: &[&Entity], top_n: usize) -> EntityRows {
        let matches = self.rank(entity, pool.iter().copied(), top_n)?;
        debug!(
            user_id = entity.id(),
            matches = matches.len(),
            "ranked candidates"
        );

        let rows = matches
            .into_iter()
            .enumerate()
            .map(|(i, m)| {
                let explanation = self.explain(entity, m.candidate, &m.pair);
                MatchRow {
                    user_id: entity.id(),
                    tenant_label: entity.label().to_string(),
                    match_rank: i + 1,
                    match_user_id: m.candidate.id(),
                    match_tenant_label: m.candidate.label().to_string(),
                    compatibility_score: m.pair.percentage,
                    top_drivers: explanation.top_drivers,
                    explanation_short: explanation.short,
                    explanation_long: explanation.long,
                    top_driver_values: explanation.driver_values,
                }
            })
            .collect();

        Ok(rows)
    }

    /// Split the input into usable entities and per-entity failures
    fn partition<'e>(&self, entities: &'e [Entity]) -> (Vec<&'e Entity>, Vec<EntityFailure>) {
        let scale = self.schema().scale;
        let mut seen = AHashSet::with_capacity(entities.len());
        let mut valid = Vec::with_capacity(entities.len());
        let mut failures = Vec::new();

        for entity in entities {
            let checked = check_entity(self.schema(), entity).and_then(|()| {
                if seen.insert(entity.id()) {
                    Ok(())
                } else {
                    Err(ValidationError::DuplicateEntityId(entity.id()))
                }
            });

            match checked {
                Ok(()) => {
                    if entity.values().iter().any(|v| !scale.contains(*v)) {
                        warn!(
                            user_id = entity.id(),
                            "attribute values outside {}..{}, scores will be clamped",
                            scale.min,
                            scale.max
                        );
                    }
                    valid.push(entity);
                }
                Err(error) => {
                    warn!(user_id = entity.id(), %error, "skipping entity");
                    failures.push(EntityFailure {
                        user_id: entity.id(),
                        tenant_label: entity.label().to_string(),
                        error,
                    });
                }
            }
        }

        (valid, failures)
    }

    fn collect_rows(
        &self,
        valid: &[&Entity],
        per_entity: Vec<EntityRows>,
        mut failures: Vec<EntityFailure>,
        input_len: usize,
    ) -> BatchOutput {
        let mut rows = Vec::new();
        for (entity, result) in valid.iter().zip(per_entity) {
            match result {
                Ok(entity_rows) => rows.extend(entity_rows),
                Err(error) => {
                    warn!(user_id = entity.id(), %error, "skipping entity");
                    failures.push(EntityFailure {
                        user_id: entity.id(),
                        tenant_label: entity.label().to_string(),
                        error,
                    });
                }
            }
        }

        info!(
            entities = input_len,
            rows = rows.len(),
            failures = failures.len(),
            "match batch complete"
        );

        BatchOutput { rows, failures }
    }
}

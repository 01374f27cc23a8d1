//! Synthetic profile generator
//!
//! Draws every attribute uniformly from the integer points of the schema
//! scale. A fixed seed reproduces the same table.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tenantmatch_core::Entity;
use tenantmatch_engine::MatchingSchema;

/// Seed used by the command line when none is given
pub const DEFAULT_SEED: u64 = 1234;

/// Generate `count` profiles with ids `1..=count` and `Tenant_###` labels.
///
/// `None` seeds from the operating system.
pub fn generate_profiles(schema: &MatchingSchema, count: u32, seed: Option<u64>) -> Vec<Entity> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let low = schema.scale.min.ceil() as i64;
    let high = (schema.scale.max.floor() as i64).max(low);

    (1..=count)
        .map(|id| {
            let values: Vec<f64> = (0..schema.len())
                .map(|_| rng.random_range(low..=high) as f64)
                .collect();
            Entity::with_default_label(id, values)
        })
        .collect()
}

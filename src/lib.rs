//! # tenantmatch
//!
//! Explainable compatibility matching for tenant profiles.
//!
//! Each tenant is described by ten ordinal attributes (cleanliness, noise
//! tolerance, sleep schedule, ...). tenantmatch scores every pair of tenants,
//! ranks each tenant's best matches and explains which attributes drove
//! each score.
//!
//! ## Quick Start
//!
//! ### As a Command
//!
//! ```bash
//! tenantmatch generate --count 300 --out profiles.csv
//! tenantmatch match --profiles profiles.csv --out matches.csv --top-n 5
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use tenantmatch::prelude::*;
//!
//! let schema = MatchingSchema::tenant_default();
//! let profiles = generate_profiles(&schema, 25, Some(DEFAULT_SEED));
//!
//! let matcher = Matcher::new(schema).unwrap();
//! let output = matcher.compute_all(&profiles, 5);
//!
//! assert_eq!(output.rows.len(), 25 * 5);
//! for row in output.rows.iter().take(3) {
//!     assert!(row.explanation_short.starts_with("High compatibility driven by"));
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `tenantmatch-core` - Data model (Entity, TenantAttribute, Scale, errors)
//! - `tenantmatch-engine` - Scoring, aggregation, ranking, explanations, batch driver
//! - `tenantmatch-table` - CSV/JSON-lines tables, synthetic profiles, visual keys
//!
//! ## Scaling
//!
//! A batch scores every ordered pair: O(n² · f) for n tenants and f
//! attributes. The outer loop runs in parallel; memory holds one candidate
//! list per worker.

// Re-export core types
pub use tenantmatch_core::{
    humanize, tenant_label,
    Entity, EntityId, TenantAttribute, Scale,
    Error, ConfigError, ValidationError, Result,
};

// Re-export engine
pub use tenantmatch_engine::{
    MatchingSchema, AttributeDef, ScoringMode, ComplementarityFormula,
    Matcher, TieBreak, RankedMatch,
    Contribution, PairResult,
    Driver, Explanation,
    BatchOutput, EntityFailure, MatchRow,
};

// Re-export table glue
pub use tenantmatch_table::{
    read_profiles, read_profiles_from, write_profiles, write_matches,
    generate_profiles, visual_key,
    OutputFormat, VisualKey, DEFAULT_SEED,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Entity, EntityId, TenantAttribute, Scale,
        Error, Result,
        MatchingSchema, AttributeDef, ScoringMode, ComplementarityFormula,
        Matcher, TieBreak, MatchRow, BatchOutput,
        read_profiles, write_profiles, write_matches, generate_profiles,
        OutputFormat, DEFAULT_SEED,
    };
}

/// Attribute scoring functions
pub mod distance {
    pub use tenantmatch_engine::distance::{complementarity, score, similarity};
}

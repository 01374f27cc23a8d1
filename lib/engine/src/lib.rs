//! # tenantmatch Engine
//!
//! Weighted, explainable compatibility matching for tenant profiles.
//!
//! ## Overview
//!
//! Every tenant carries the same set of ordinal attributes. A
//! [`MatchingSchema`] assigns each attribute a weight and a scoring mode:
//!
//! - **similarity** rewards close values
//! - **complementarity** rewards pairs balanced around the scale midpoint
//!
//! Attribute scores are folded into a weighted percentage, candidates are
//! ranked, and the strongest contributing attributes are rendered as an
//! explanation.
//!
//! ## Example
//!
//! ```rust
//! use tenantmatch_core::Entity;
//! use tenantmatch_engine::{AttributeDef, Matcher, MatchingSchema};
//!
//! let schema = MatchingSchema::new(vec![
//!     AttributeDef::similarity("cleanliness_level", 1.3),
//!     AttributeDef::complementarity("sociability_level", 1.0),
//! ]);
//! let matcher = Matcher::new(schema).unwrap();
//!
//! let tenants = vec![
//!     Entity::with_default_label(1, vec![5.0, 1.0]),
//!     Entity::with_default_label(2, vec![5.0, 5.0]),
//!     Entity::with_default_label(3, vec![1.0, 3.0]),
//! ];
//!
//! let output = matcher.compute_all(&tenants, 2);
//! assert_eq!(output.rows.len(), 6);
//! assert_eq!(output.rows[0].match_tenant_label, "Tenant_002");
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Batch    │────>│   Ranker    │────>│  Aggregate  │
//! │ (all rows)  │     │  (top-N)    │     │ (pair %)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!       │                                        │
//!       │              ┌─────────────┐    ┌──────┴──────┐
//!       └─────────────>│   Explain   │    │  Distance   │
//!                      │ (drivers)   │    │ (attribute) │
//!                      └─────────────┘    └─────────────┘
//! ```

pub mod schema;
pub mod distance;
pub mod aggregate;
pub mod rerank;
pub mod explain;
pub mod batch;

// Re-export main types
pub use schema::{
    MatchingSchema,
    AttributeDef,
    ScoringMode,
    ComplementarityFormula,
};
pub use aggregate::{Contribution, PairResult};
pub use rerank::{Matcher, RankedMatch, TieBreak};
pub use explain::{Driver, Explanation, TOP_DRIVERS};
pub use batch::{BatchOutput, EntityFailure, MatchRow};

//! # tenantmatch Table
//!
//! Tabular glue around the matching engine: loading profile tables,
//! writing match tables, generating synthetic profiles and deriving the
//! stable visual keys the viewer uses.

pub mod profiles;
pub mod matches;
pub mod synthetic;
pub mod visual;

pub use profiles::{read_profiles, read_profiles_from, write_profiles, write_profiles_to};
pub use matches::{write_matches, write_matches_csv, write_matches_jsonl, OutputFormat};
pub use synthetic::{generate_profiles, DEFAULT_SEED};
pub use visual::{visual_key, VisualKey};

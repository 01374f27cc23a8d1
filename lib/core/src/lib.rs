//! # tenantmatch Core
//!
//! Data model shared by the tenantmatch crates:
//!
//! - [`Entity`] - A tenant profile with positional attribute values
//! - [`TenantAttribute`] - The ten built-in profile attributes
//! - [`Scale`] - The closed ordinal range attribute values live in
//! - [`Error`] - Configuration and validation error taxonomy
//!
//! ## Example
//!
//! ```rust
//! use tenantmatch_core::{Entity, Scale, TenantAttribute};
//!
//! let values: Vec<f64> = TenantAttribute::ALL.iter().map(|_| 3.0).collect();
//! let tenant = Entity::with_default_label(7, values);
//! assert_eq!(tenant.label(), "Tenant_007");
//! assert!(tenant.values().iter().all(|v| Scale::default().contains(*v)));
//! ```

pub mod attribute;
pub mod entity;
pub mod error;
pub mod scale;

pub use attribute::{humanize, TenantAttribute};
pub use entity::{tenant_label, Entity, EntityId};
pub use error::{ConfigError, Error, Result, ValidationError};
pub use scale::{Scale, SCALE_MAX, SCALE_MIN};

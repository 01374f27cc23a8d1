//! Matching schema definitions
//!
//! Declares which attributes are compared, how each one is scored and how
//! much it weighs in the final compatibility percentage. The schema is
//! immutable configuration handed to the [`Matcher`](crate::Matcher) once.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use tenantmatch_core::{ConfigError, Result, Scale, TenantAttribute};

/// Matching schema
///
/// Attribute order is significant: it is the order values are stored in
/// every [`Entity`](tenantmatch_core::Entity), the order contributions are
/// accumulated in, and the tie order among equally strong drivers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchingSchema {
    /// Schema version for future compatibility
    #[serde(default = "default_version")]
    pub version: u32,

    /// Ordinal range shared by every attribute
    #[serde(default)]
    pub scale: Scale,

    /// Complementarity formula used for the whole deployment
    #[serde(default)]
    pub complementarity: ComplementarityFormula,

    /// Attribute definitions in declaration order
    pub attributes: Vec<AttributeDef>,
}

fn default_version() -> u32 {
    1
}

impl MatchingSchema {
    /// Create a schema on the default 1..5 scale
    pub fn new(attributes: Vec<AttributeDef>) -> Self {
        Self {
            version: 1,
            scale: Scale::default(),
            complementarity: ComplementarityFormula::default(),
            attributes,
        }
    }

    /// The built-in ten-attribute tenant schema
    pub fn tenant_default() -> Self {
        let attributes = TenantAttribute::ALL
            .iter()
            .map(|attr| {
                let (weight, mode) = match attr {
                    TenantAttribute::Cleanliness => (1.3, ScoringMode::Similarity),
                    TenantAttribute::NoiseTolerance => (1.3, ScoringMode::Similarity),
                    TenantAttribute::SleepSchedule => (1.2, ScoringMode::Similarity),
                    TenantAttribute::RoutineStructure => (1.0, ScoringMode::Similarity),
                    TenantAttribute::WfhFrequency => (0.8, ScoringMode::Similarity),
                    TenantAttribute::Sociability => (1.0, ScoringMode::Complementarity),
                    TenantAttribute::GuestTolerance => (1.0, ScoringMode::Similarity),
                    TenantAttribute::PrivacyNeed => (1.1, ScoringMode::Similarity),
                    TenantAttribute::ConflictStyle => (0.9, ScoringMode::Similarity),
                    TenantAttribute::SharedSpacesUsage => (0.9, ScoringMode::Complementarity),
                };
                AttributeDef::new(attr.as_str(), mode, weight)
            })
            .collect();
        Self::new(attributes)
    }

    /// Parse a schema from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let schema: MatchingSchema = serde_json::from_str(json)?;
        schema.validate()?;
        Ok(schema)
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_complementarity(mut self, formula: ComplementarityFormula) -> Self {
        self.complementarity = formula;
        self
    }

    /// Check the schema can be used for scoring.
    ///
    /// Weights are taken as given, not normalized: the aggregate divides by
    /// their sum, and explanations report them verbatim.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.attributes.is_empty() {
            return Err(ConfigError::EmptySchema);
        }

        if !self.scale.is_valid() {
            return Err(ConfigError::InvalidScale {
                min: self.scale.min,
                max: self.scale.max,
            });
        }

        let mut seen = AHashSet::with_capacity(self.attributes.len());
        for attr in &self.attributes {
            if !attr.weight.is_finite() {
                return Err(ConfigError::NonFiniteWeight(attr.name.clone()));
            }
            if attr.weight < 0.0 {
                return Err(ConfigError::NegativeWeight(attr.name.clone()));
            }
            if !seen.insert(attr.name.as_str()) {
                return Err(ConfigError::DuplicateAttribute(attr.name.clone()));
            }
        }

        if self.total_weight() <= 0.0 {
            return Err(ConfigError::ZeroTotalWeight);
        }

        Ok(())
    }

    /// Sum of all attribute weights
    pub fn total_weight(&self) -> f64 {
        self.attributes.iter().map(|a| a.weight).sum()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    #[inline]
    pub fn attribute(&self, index: usize) -> Option<&AttributeDef> {
        self.attributes.get(index)
    }

    /// Attribute names in declaration order
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }

    /// Name to position lookup, used when binding loosely-typed rows
    pub fn name_index(&self) -> AHashMap<&str, usize> {
        self.attribute_names()
            .enumerate()
            .map(|(i, name)| (name, i))
            .collect()
    }

    /// Scoring mode for an attribute name; unknown names score by similarity
    pub fn mode_of(&self, name: &str) -> ScoringMode {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.mode)
            .unwrap_or_default()
    }
}

impl Default for MatchingSchema {
    fn default() -> Self {
        Self::tenant_default()
    }
}

/// Configuration for a single attribute
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttributeDef {
    /// Column name
    pub name: String,

    /// How the two values are compared
    #[serde(default)]
    pub mode: ScoringMode,

    /// Weight of this attribute in the overall percentage
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl AttributeDef {
    pub fn new(name: impl Into<String>, mode: ScoringMode, weight: f64) -> Self {
        Self {
            name: name.into(),
            mode,
            weight,
        }
    }

    /// Attribute rewarding close values
    pub fn similarity(name: impl Into<String>, weight: f64) -> Self {
        Self::new(name, ScoringMode::Similarity, weight)
    }

    /// Attribute rewarding pairs balanced around the midpoint
    pub fn complementarity(name: impl Into<String>, weight: f64) -> Self {
        Self::new(name, ScoringMode::Complementarity, weight)
    }
}

/// Per-attribute scoring mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// 1 - |a - b| / span
    #[default]
    Similarity,
    /// Balance around the midpoint, see [`ComplementarityFormula`]
    Complementarity,
}

impl ScoringMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMode::Similarity => "similarity",
            ScoringMode::Complementarity => "complementarity",
        }
    }
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complementarity formula, chosen once per schema
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ComplementarityFormula {
    /// 1 - |a + b - (min + max)| / span
    #[default]
    Mirror,
    /// Closeness of the pair average to the midpoint, damped by
    /// `1 - 0.25 * avg_extremity`
    BalancedAverage,
}

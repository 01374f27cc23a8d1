//! Attribute catalogue
//!
//! The ten ordinal attributes every tenant profile carries, in the
//! declaration order used for scoring and for table columns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A tenant profile attribute
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TenantAttribute {
    #[serde(rename = "cleanliness_level")]
    Cleanliness,
    #[serde(rename = "noise_tolerance")]
    NoiseTolerance,
    #[serde(rename = "sleep_schedule")]
    SleepSchedule,
    #[serde(rename = "routine_structure")]
    RoutineStructure,
    #[serde(rename = "WFH_frequency")]
    WfhFrequency,
    #[serde(rename = "sociability_level")]
    Sociability,
    #[serde(rename = "guest_tolerance")]
    GuestTolerance,
    #[serde(rename = "privacy_need")]
    PrivacyNeed,
    #[serde(rename = "conflict_style")]
    ConflictStyle,
    #[serde(rename = "shared_spaces_usage")]
    SharedSpacesUsage,
}

impl TenantAttribute {
    /// All attributes in declaration order
    pub const ALL: [TenantAttribute; 10] = [
        TenantAttribute::Cleanliness,
        TenantAttribute::NoiseTolerance,
        TenantAttribute::SleepSchedule,
        TenantAttribute::RoutineStructure,
        TenantAttribute::WfhFrequency,
        TenantAttribute::Sociability,
        TenantAttribute::GuestTolerance,
        TenantAttribute::PrivacyNeed,
        TenantAttribute::ConflictStyle,
        TenantAttribute::SharedSpacesUsage,
    ];

    /// Column name used in profile tables
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantAttribute::Cleanliness => "cleanliness_level",
            TenantAttribute::NoiseTolerance => "noise_tolerance",
            TenantAttribute::SleepSchedule => "sleep_schedule",
            TenantAttribute::RoutineStructure => "routine_structure",
            TenantAttribute::WfhFrequency => "WFH_frequency",
            TenantAttribute::Sociability => "sociability_level",
            TenantAttribute::GuestTolerance => "guest_tolerance",
            TenantAttribute::PrivacyNeed => "privacy_need",
            TenantAttribute::ConflictStyle => "conflict_style",
            TenantAttribute::SharedSpacesUsage => "shared_spaces_usage",
        }
    }

    /// Position in [`TenantAttribute::ALL`]
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for TenantAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TenantAttribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TenantAttribute::ALL
            .iter()
            .copied()
            .find(|attr| attr.as_str() == s)
            .ok_or_else(|| format!("unknown attribute '{}'", s))
    }
}

/// Turn a column name into a display label.
///
/// Underscores become spaces, the first character is upper-cased and the
/// rest lower-cased: `"WFH_frequency"` renders as `"Wfh frequency"`.
pub fn humanize(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_order() {
        for (i, attr) in TenantAttribute::ALL.iter().enumerate() {
            assert_eq!(attr.index(), i);
        }
        assert_eq!(TenantAttribute::ALL[0].as_str(), "cleanliness_level");
        assert_eq!(TenantAttribute::ALL[9].as_str(), "shared_spaces_usage");
    }

    #[test]
    fn test_from_str_roundtrip() {
        for attr in TenantAttribute::ALL {
            assert_eq!(attr.as_str().parse::<TenantAttribute>(), Ok(attr));
        }
        assert!("bogus".parse::<TenantAttribute>().is_err());
    }

    #[test]
    fn test_serde_uses_column_names() {
        let json = serde_json::to_string(&TenantAttribute::WfhFrequency).unwrap();
        assert_eq!(json, "\"WFH_frequency\"");
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("cleanliness_level"), "Cleanliness level");
        assert_eq!(humanize("WFH_frequency"), "Wfh frequency");
        assert_eq!(humanize("x"), "X");
        assert_eq!(humanize(""), "");
    }
}

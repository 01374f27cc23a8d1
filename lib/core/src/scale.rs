use serde::{Deserialize, Serialize};

/// Default lower bound of the ordinal scale
pub const SCALE_MIN: f64 = 1.0;
/// Default upper bound of the ordinal scale
pub const SCALE_MAX: f64 = 5.0;

/// Closed ordinal range every attribute value is expected to fall into
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Scale {
    pub min: f64,
    pub max: f64,
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            min: SCALE_MIN,
            max: SCALE_MAX,
        }
    }
}

impl Scale {
    #[inline]
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the range; zero for a degenerate scale
    #[inline]
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Sum of a perfectly balanced pair (6 on 1..5)
    #[inline]
    #[must_use]
    pub fn target_sum(&self) -> f64 {
        self.min + self.max
    }

    #[inline]
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        self.target_sum() / 2.0
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scale() {
        let scale = Scale::default();
        assert_eq!(scale.span(), 4.0);
        assert_eq!(scale.target_sum(), 6.0);
        assert_eq!(scale.midpoint(), 3.0);
    }

    #[test]
    fn test_contains() {
        let scale = Scale::default();
        assert!(scale.contains(1.0));
        assert!(scale.contains(5.0));
        assert!(!scale.contains(0.0));
        assert!(!scale.contains(6.0));
    }

    #[test]
    fn test_validity() {
        assert!(Scale::new(3.0, 3.0).is_valid());
        assert!(!Scale::new(5.0, 1.0).is_valid());
        assert!(!Scale::new(f64::NAN, 5.0).is_valid());
    }
}

//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A whole-number value between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percentage, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Clamps an arbitrary point total into the 0-100 range.
    pub fn from_points(points: u32) -> Self {
        Self(points.min(100) as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns true when this value reaches `threshold`.
    pub fn meets(&self, threshold: u8) -> bool {
        self.0 >= threshold
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_to_100() {
        assert_eq!(Percentage::new(101).value(), 100);
        assert_eq!(Percentage::new(42).value(), 42);
    }

    #[test]
    fn from_points_clamps_large_totals() {
        assert_eq!(Percentage::from_points(0), Percentage::ZERO);
        assert_eq!(Percentage::from_points(87).value(), 87);
        assert_eq!(Percentage::from_points(400), Percentage::HUNDRED);
    }

    #[test]
    fn meets_is_inclusive() {
        assert!(Percentage::new(80).meets(80));
        assert!(!Percentage::new(79).meets(80));
    }

    #[test]
    fn displays_with_percent_sign() {
        assert_eq!(Percentage::new(75).to_string(), "75%");
    }

    #[test]
    fn serializes_as_bare_number() {
        assert_eq!(serde_json::to_string(&Percentage::new(42)).unwrap(), "42");
        let pct: Percentage = serde_json::from_str("75").unwrap();
        assert_eq!(pct.value(), 75);
    }
}

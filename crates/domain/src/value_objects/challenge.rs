//! Challenge rating as an exact rational number.
//!
//! The published ladder only uses 0, 1/8, 1/4, 1/2 and the whole numbers
//! 1..=30, but the type can hold any non-negative rational so that homebrew
//! ladders remain representable. Experience lookup is an exact-key match
//! against a [`crate::rules::Ruleset`] ladder, never interpolation.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error when parsing a challenge rating string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrParseError {
    /// The rating string is empty
    #[error("Empty challenge rating")]
    Empty,
    /// Invalid format - expected a whole number, "N/D" fraction, or decimal
    #[error("Invalid challenge rating: {0}")]
    InvalidFormat(String),
    /// Fraction with a zero denominator
    #[error("Challenge rating denominator must not be zero")]
    ZeroDenominator,
}

/// A challenge rating such as 5, 1/8, or 0.
///
/// Stored as a normalized fraction so equality and ladder lookups are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChallengeRating {
    numerator: u32,
    denominator: u32,
}

impl ChallengeRating {
    pub const ZERO: ChallengeRating = ChallengeRating {
        numerator: 0,
        denominator: 1,
    };
    pub const EIGHTH: ChallengeRating = ChallengeRating {
        numerator: 1,
        denominator: 8,
    };
    pub const QUARTER: ChallengeRating = ChallengeRating {
        numerator: 1,
        denominator: 4,
    };
    pub const HALF: ChallengeRating = ChallengeRating {
        numerator: 1,
        denominator: 2,
    };

    /// A whole-number rating (1, 2, ... 30).
    pub fn whole(value: u32) -> Self {
        Self {
            numerator: value,
            denominator: 1,
        }
    }

    /// An arbitrary fractional rating, reduced to lowest terms.
    pub fn fraction(numerator: u32, denominator: u32) -> Result<Self, CrParseError> {
        if denominator == 0 {
            return Err(CrParseError::ZeroDenominator);
        }
        if numerator == 0 {
            return Ok(Self::ZERO);
        }
        let divisor = gcd(numerator, denominator);
        Ok(Self {
            numerator: numerator / divisor,
            denominator: denominator / divisor,
        })
    }

    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    /// The whole-number value, when this rating is not fractional.
    pub fn as_whole(&self) -> Option<u32> {
        (self.denominator == 1).then_some(self.numerator)
    }

    /// True for the sub-1 ladder steps (1/8, 1/4, 1/2) and any other
    /// rating below one.
    pub fn is_below_one(&self) -> bool {
        self.numerator < self.denominator
    }
}

impl Default for ChallengeRating {
    fn default() -> Self {
        Self::ZERO
    }
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

impl PartialOrd for ChallengeRating {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChallengeRating {
    fn cmp(&self, other: &Self) -> Ordering {
        // Cross-multiply in u64 to order fractions without division
        let lhs = u64::from(self.numerator) * u64::from(other.denominator);
        let rhs = u64::from(other.numerator) * u64::from(self.denominator);
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for ChallengeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl FromStr for ChallengeRating {
    type Err = CrParseError;

    /// Parses "5", "1/8", and the decimal forms "0.125", "0.25", "0.5".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(CrParseError::Empty);
        }

        if let Some((num_str, den_str)) = input.split_once('/') {
            let numerator: u32 = num_str
                .trim()
                .parse()
                .map_err(|_| CrParseError::InvalidFormat(input.to_string()))?;
            let denominator: u32 = den_str
                .trim()
                .parse()
                .map_err(|_| CrParseError::InvalidFormat(input.to_string()))?;
            return Self::fraction(numerator, denominator);
        }

        if let Ok(whole) = input.parse::<u32>() {
            return Ok(Self::whole(whole));
        }

        match input {
            "0.125" => Ok(Self::EIGHTH),
            "0.25" => Ok(Self::QUARTER),
            "0.5" => Ok(Self::HALF),
            _ => Err(CrParseError::InvalidFormat(input.to_string())),
        }
    }
}

// On the wire a rating is its display form ("1/8", "5"), matching how
// records store it.

impl Serialize for ChallengeRating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ChallengeRating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(DeError::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole() {
        let cr: ChallengeRating = "5".parse().expect("parse");
        assert_eq!(cr, ChallengeRating::whole(5));
        assert_eq!(cr.as_whole(), Some(5));
    }

    #[test]
    fn test_parse_fraction() {
        let cr: ChallengeRating = "1/8".parse().expect("parse");
        assert_eq!(cr, ChallengeRating::EIGHTH);
        assert!(cr.is_below_one());
    }

    #[test]
    fn test_parse_decimal_forms() {
        assert_eq!("0.125".parse::<ChallengeRating>().ok(), Some(ChallengeRating::EIGHTH));
        assert_eq!("0.25".parse::<ChallengeRating>().ok(), Some(ChallengeRating::QUARTER));
        assert_eq!("0.5".parse::<ChallengeRating>().ok(), Some(ChallengeRating::HALF));
    }

    #[test]
    fn test_fraction_is_reduced() {
        let cr = ChallengeRating::fraction(2, 16).expect("fraction");
        assert_eq!(cr, ChallengeRating::EIGHTH);
    }

    #[test]
    fn test_zero_denominator_rejected() {
        assert_eq!(
            ChallengeRating::fraction(1, 0),
            Err(CrParseError::ZeroDenominator)
        );
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!("".parse::<ChallengeRating>(), Err(CrParseError::Empty));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            "deadly".parse::<ChallengeRating>(),
            Err(CrParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_ordering_is_numeric() {
        assert!(ChallengeRating::EIGHTH < ChallengeRating::QUARTER);
        assert!(ChallengeRating::HALF < ChallengeRating::whole(1));
        assert!(ChallengeRating::whole(1) < ChallengeRating::whole(30));
    }

    #[test]
    fn test_display_roundtrip() {
        for text in ["0", "1/8", "1/4", "1/2", "1", "17", "30"] {
            let cr: ChallengeRating = text.parse().expect("parse");
            assert_eq!(cr.to_string(), text);
        }
    }

    #[test]
    fn test_serde_string_form() {
        let json = serde_json::to_string(&ChallengeRating::QUARTER).expect("serialize");
        assert_eq!(json, "\"1/4\"");
        let back: ChallengeRating = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, ChallengeRating::QUARTER);
    }
}

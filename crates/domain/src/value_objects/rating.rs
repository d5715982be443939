//! Factor status and overall suitability rating

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome bucket for a single weather factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactorStatus {
    Perfect,
    Good,
    Fair,
    Poor,
}

impl FactorStatus {
    /// Whether the factor should produce mitigation advice
    ///
    /// Wind and precipitation advise on `Fair` too; temperature and
    /// conditions only on `Poor`.
    #[must_use]
    pub const fn is_poor_or_fair(&self) -> bool {
        matches!(self, Self::Poor | Self::Fair)
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Perfect => "Perfect",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }
}

impl fmt::Display for FactorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Overall suitability bucket derived from the total score
///
/// # Examples
///
/// ```
/// use domain::value_objects::SuitabilityRating;
///
/// assert_eq!(SuitabilityRating::from_score(80), SuitabilityRating::Excellent);
/// assert_eq!(SuitabilityRating::from_score(79), SuitabilityRating::Good);
/// assert_eq!(SuitabilityRating::from_score(39), SuitabilityRating::Poor);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuitabilityRating {
    Excellent,
    Good,
    Okay,
    Poor,
}

impl SuitabilityRating {
    /// Minimum score for `Excellent`
    pub const EXCELLENT_THRESHOLD: u32 = 80;
    /// Minimum score for `Good`
    pub const GOOD_THRESHOLD: u32 = 60;
    /// Minimum score for `Okay`
    pub const OKAY_THRESHOLD: u32 = 40;

    /// Bucket a total score
    #[must_use]
    pub const fn from_score(score: u32) -> Self {
        if score >= Self::EXCELLENT_THRESHOLD {
            Self::Excellent
        } else if score >= Self::GOOD_THRESHOLD {
            Self::Good
        } else if score >= Self::OKAY_THRESHOLD {
            Self::Okay
        } else {
            Self::Poor
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Okay => "Okay",
            Self::Poor => "Poor",
        }
    }
}

impl fmt::Display for SuitabilityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_boundaries() {
        assert_eq!(SuitabilityRating::from_score(110), SuitabilityRating::Excellent);
        assert_eq!(SuitabilityRating::from_score(80), SuitabilityRating::Excellent);
        assert_eq!(SuitabilityRating::from_score(79), SuitabilityRating::Good);
        assert_eq!(SuitabilityRating::from_score(60), SuitabilityRating::Good);
        assert_eq!(SuitabilityRating::from_score(59), SuitabilityRating::Okay);
        assert_eq!(SuitabilityRating::from_score(40), SuitabilityRating::Okay);
        assert_eq!(SuitabilityRating::from_score(39), SuitabilityRating::Poor);
        assert_eq!(SuitabilityRating::from_score(0), SuitabilityRating::Poor);
    }

    #[test]
    fn poor_or_fair() {
        assert!(FactorStatus::Poor.is_poor_or_fair());
        assert!(FactorStatus::Fair.is_poor_or_fair());
        assert!(!FactorStatus::Good.is_poor_or_fair());
        assert!(!FactorStatus::Perfect.is_poor_or_fair());
    }

    #[test]
    fn serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&SuitabilityRating::Okay).unwrap(),
            "\"Okay\""
        );
        assert_eq!(
            serde_json::to_string(&FactorStatus::Perfect).unwrap(),
            "\"Perfect\""
        );
    }

    #[test]
    fn display() {
        assert_eq!(SuitabilityRating::Excellent.to_string(), "Excellent");
        assert_eq!(FactorStatus::Fair.to_string(), "Fair");
    }
}

use serde::{Deserialize, Serialize};

use crate::errors::MatchError;

/// Coarse bucket the card UI colors by. Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityThresholds {
    pub high: f64,
    pub medium: f64,
}

impl Default for PriorityThresholds {
    fn default() -> Self {
        Self {
            high: 8.0,
            medium: 4.0,
        }
    }
}

impl PriorityThresholds {
    pub fn new(high: f64, medium: f64) -> Result<Self, MatchError> {
        let thresholds = Self { high, medium };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if !(self.high.is_finite() && self.medium.is_finite()) || self.medium > self.high {
            return Err(MatchError::InvalidConfig(format!(
                "priority thresholds must satisfy medium <= high (got medium={}, high={})",
                self.medium, self.high
            )));
        }
        Ok(())
    }

    pub fn classify(&self, match_score: f64) -> Priority {
        if match_score >= self.high {
            Priority::High
        } else if match_score >= self.medium {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(10.0, Priority::High)]
    #[case(8.0, Priority::High)]
    #[case(7.9, Priority::Medium)]
    #[case(4.0, Priority::Medium)]
    #[case(3.9, Priority::Low)]
    #[case(0.0, Priority::Low)]
    fn test_default_cutoffs(#[case] score: f64, #[case] expected: Priority) {
        assert_eq!(PriorityThresholds::default().classify(score), expected);
    }

    #[test]
    fn test_priority_is_monotonic_in_score() {
        for thresholds in [
            PriorityThresholds::default(),
            PriorityThresholds::new(6.0, 6.0).unwrap(),
            PriorityThresholds::new(9.5, 1.0).unwrap(),
        ] {
            let mut previous = Priority::Low;
            for tenth in 0..=100 {
                let current = thresholds.classify(f64::from(tenth) / 10.0);
                assert!(current >= previous, "bucket dropped at score {}", tenth);
                previous = current;
            }
        }
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        assert!(matches!(
            PriorityThresholds::new(4.0, 8.0),
            Err(MatchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_priority_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), r#""high""#);
    }
}

use serde::{Deserialize, Serialize};

use crate::matching::scoring::{Dimension, DimensionScore};

/// Relative importance of each dimension in the aggregate match score.
/// Weights need not sum to one: aggregation renormalizes over the
/// dimensions that were actually scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionWeights {
    pub skills: f64,
    pub experience: f64,
    pub location: f64,
    pub compensation: f64,
    pub job_type: f64,
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            skills: 0.40,
            experience: 0.20,
            location: 0.15,
            compensation: 0.15,
            job_type: 0.10,
        }
    }
}

impl DimensionWeights {
    pub fn weight(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Skills => self.skills,
            Dimension::Experience => self.experience,
            Dimension::Location => self.location,
            Dimension::Compensation => self.compensation,
            Dimension::JobType => self.job_type,
        }
    }

    pub fn sum(&self) -> f64 {
        Dimension::ALL.iter().map(|d| self.weight(*d)).sum()
    }
}

/// matchScore = 10 × Σ(w·s) / Σ(w over included dimensions), one decimal, within [0, 10].
pub fn aggregate_score(scores: &[DimensionScore], weights: &DimensionWeights) -> f64 {
    let (weighted, included) = scores.iter().fold((0.0_f64, 0.0_f64), |(ws, w), s| {
        let weight = weights.weight(s.dimension);
        (ws + weight * s.score.clamp(0.0, 1.0), w + weight)
    });

    if included <= 0.0 {
        return 0.0;
    }
    round_one_decimal((10.0 * weighted / included).clamp(0.0, 10.0))
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

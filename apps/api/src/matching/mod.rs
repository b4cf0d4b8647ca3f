// Matching engine: candidate profile + posting pool -> ranked, explained recommendations.
// Pure and synchronous; all store I/O happens in the handlers before the engine runs.

pub mod aggregate;
pub mod analysis;
pub mod engine;
pub mod explain;
pub mod features;
pub mod handlers;
pub mod priority;
pub mod ranker;
pub mod scoring;

use serde::{Deserialize, Serialize};

use crate::errors::MatchError;
use crate::matching::aggregate::DimensionWeights;
use crate::matching::explain::ExplainThresholds;
use crate::matching::priority::PriorityThresholds;
use crate::matching::scoring::{Dimension, ScoringParams};

/// Every tunable of the engine. Loaded from the environment by `Config`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub weights: DimensionWeights,
    pub thresholds: PriorityThresholds,
    pub explain: ExplainThresholds,
    pub scoring: ScoringParams,
}

impl MatchingConfig {
    pub fn validate(&self) -> Result<(), MatchError> {
        for dim in Dimension::ALL {
            let w = self.weights.weight(dim);
            if !w.is_finite() || w < 0.0 {
                return Err(MatchError::InvalidConfig(format!(
                    "weight for {} must be a non-negative number (got {w})",
                    dim.label()
                )));
            }
        }
        if self.weights.sum() <= 0.0 {
            return Err(MatchError::InvalidConfig(
                "at least one dimension weight must be positive".to_string(),
            ));
        }
        self.thresholds.validate()?;
        self.explain.validate()?;
        let step = self.scoring.experience_step;
        if !step.is_finite() || step < 0.0 {
            return Err(MatchError::InvalidConfig(
                "experience step must be non-negative".to_string(),
            ));
        }
        let falloff = self.scoring.compensation_falloff;
        if !falloff.is_finite() || falloff <= 0.0 {
            return Err(MatchError::InvalidConfig(
                "compensation falloff must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

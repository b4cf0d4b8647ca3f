//! Explanation Generator — reasons, strengths, considerations and the one-line
//! recommendation shown on a recommendation card.

use serde::{Deserialize, Serialize};

use crate::errors::MatchError;
use crate::matching::aggregate::DimensionWeights;
use crate::matching::priority::Priority;
use crate::matching::scoring::{Dimension, DimensionScore};

const MAX_REASONS: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainThresholds {
    /// Included dimensions scoring at or above this become strengths.
    pub strength: f64,
    /// Included dimensions scoring at or below this become considerations.
    pub consideration: f64,
}

impl Default for ExplainThresholds {
    fn default() -> Self {
        Self {
            strength: 0.75,
            consideration: 0.4,
        }
    }
}

impl ExplainThresholds {
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.consideration >= self.strength {
            return Err(MatchError::InvalidConfig(format!(
                "strength threshold ({}) must be above consideration threshold ({})",
                self.strength, self.consideration
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    pub reasons: Vec<String>,
    pub strengths: Vec<String>,
    pub considerations: Vec<String>,
    pub recommendation_text: String,
}

/// Builds the explanation for one scored posting. `scores` holds included
/// dimensions only, so excluded ones can never surface as considerations.
pub fn explain(
    scores: &[DimensionScore],
    weights: &DimensionWeights,
    thresholds: &ExplainThresholds,
    priority: Priority,
) -> Explanation {
    let ranked = rank_dimensions(scores, weights);

    let reasons = ranked
        .iter()
        .filter(|s| s.score > 0.0)
        .take(MAX_REASONS)
        .map(|s| s.rationale.clone())
        .collect();

    let strengths = scores
        .iter()
        .filter(|s| s.score >= thresholds.strength)
        .map(strength_statement)
        .collect();

    let considerations = scores
        .iter()
        .filter(|s| s.score <= thresholds.consideration)
        .map(consideration_statement)
        .collect();

    let recommendation_text = recommendation_text(priority, ranked.first().copied());

    Explanation {
        reasons,
        strengths,
        considerations,
        recommendation_text,
    }
}

/// Orders dimensions by their contribution to the aggregate (weight × score),
/// then by raw score, then by declaration order.
pub fn rank_dimensions<'a>(
    scores: &'a [DimensionScore],
    weights: &DimensionWeights,
) -> Vec<&'a DimensionScore> {
    let mut ranked: Vec<&DimensionScore> = scores.iter().collect();
    ranked.sort_by(|a, b| {
        let ca = weights.weight(a.dimension) * a.score;
        let cb = weights.weight(b.dimension) * b.score;
        cb.total_cmp(&ca)
            .then_with(|| b.score.total_cmp(&a.score))
            .then_with(|| a.dimension.cmp(&b.dimension))
    });
    ranked
}

fn strength_statement(score: &DimensionScore) -> String {
    let lead = match score.dimension {
        Dimension::Skills => "Strong skill alignment",
        Dimension::Location => "Convenient location",
        Dimension::Experience => "Experience level fits",
        Dimension::Compensation => "Salary meets expectations",
        Dimension::JobType => "Preferred employment type",
    };
    format!("{lead}: {}", score.rationale)
}

fn consideration_statement(score: &DimensionScore) -> String {
    let lead = match score.dimension {
        Dimension::Skills => "Skill gap",
        Dimension::Location => "May require relocation",
        Dimension::Experience => "Experience below requirement",
        Dimension::Compensation => "Salary may be below expectations",
        Dimension::JobType => "Employment type differs from preference",
    };
    format!("{lead}: {}", score.rationale)
}

fn recommendation_text(priority: Priority, top: Option<&DimensionScore>) -> String {
    let Some(top) = top else {
        return "Not enough information to judge this role against your profile.".to_string();
    };
    match priority {
        Priority::High => format!("Highly recommended, an excellent match: {}.", top.rationale),
        Priority::Medium => format!("Worth considering, a reasonable match: {}.", top.rationale),
        Priority::Low => format!(
            "Limited match for your profile; the closest fit is that {}.",
            lowercase_first(&top.rationale)
        ),
    }
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

//! Attribute Scorer — one `DimensionScore` in [0, 1] per comparable dimension.
//!
//! Compensation and job type return `None` when the dimension cannot be judged
//! from the data at hand. Skills, location and experience are always scored.
//! Excluded dimensions drop out of aggregation entirely; they are never scored
//! as zero.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::matching::features::{CandidateFeatures, Place, PostingFeatures};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Skills,
    Location,
    Experience,
    Compensation,
    JobType,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Skills,
        Dimension::Location,
        Dimension::Experience,
        Dimension::Compensation,
        Dimension::JobType,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Skills => "Skills",
            Dimension::Location => "Location",
            Dimension::Experience => "Experience",
            Dimension::Compensation => "Compensation",
            Dimension::JobType => "Job type",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    pub score: f64,
    pub rationale: String,
}

impl DimensionScore {
    fn new(dimension: Dimension, score: f64, rationale: impl Into<String>) -> Self {
        Self {
            dimension,
            score: score.clamp(0.0, 1.0),
            rationale: rationale.into(),
        }
    }
}

/// How a candidate with no stated job-type preference is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoPreferencePolicy {
    /// Any employment type is a full match.
    #[default]
    Neutral,
    /// The job-type dimension is left out of aggregation.
    Exclude,
}

impl FromStr for NoPreferencePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "neutral" => Ok(NoPreferencePolicy::Neutral),
            "exclude" => Ok(NoPreferencePolicy::Exclude),
            other => Err(format!("unknown job type policy '{other}' (expected neutral|exclude)")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringParams {
    /// Score lost per experience band below the requirement.
    pub experience_step: f64,
    /// Relative salary shortfall at which compensation reaches 0.0.
    pub compensation_falloff: f64,
    pub no_preference: NoPreferencePolicy,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            experience_step: 0.25,
            compensation_falloff: 0.5,
            no_preference: NoPreferencePolicy::Neutral,
        }
    }
}

/// Scores every dimension, returning only the included ones in `Dimension::ALL` order.
pub fn score_all(
    candidate: &CandidateFeatures,
    posting: &PostingFeatures,
    params: &ScoringParams,
) -> Vec<DimensionScore> {
    [
        Some(score_skills(candidate, posting)),
        Some(score_location(candidate, posting)),
        Some(score_experience(candidate, posting, params)),
        score_compensation(candidate, posting, params),
        score_job_type(candidate, posting, params),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn score_skills(candidate: &CandidateFeatures, posting: &PostingFeatures) -> DimensionScore {
    let (matched, missing): (Vec<&String>, Vec<&String>) = posting
        .requirements
        .iter()
        .partition(|req| candidate.covers(req));

    let total = posting.requirements.len();
    let score = (matched.len() as f64 / total.max(1) as f64).min(1.0);

    let mut rationale = format!("{} of {} required skills matched", matched.len(), total);
    if !missing.is_empty() {
        let shown: Vec<&str> = missing.iter().take(3).map(|s| s.as_str()).collect();
        rationale.push_str(&format!(" (missing: {})", shown.join(", ")));
    }
    DimensionScore::new(Dimension::Skills, score, rationale)
}

pub fn score_location(candidate: &CandidateFeatures, posting: &PostingFeatures) -> DimensionScore {
    if posting.remote {
        return DimensionScore::new(
            Dimension::Location,
            1.0,
            "Remote position, location is not a constraint",
        );
    }
    let (cand, post) = (&candidate.place, &posting.place);
    if cand.is_empty() || post.is_empty() {
        return DimensionScore::new(
            Dimension::Location,
            0.0,
            "No location to compare against the on-site posting",
        );
    }

    let city_match = same(&cand.city, &post.city);
    let state_match = same(&cand.state, &post.state) || same(&cand.state, &post.region);
    let country_match = same(&cand.country, &post.country) || same(&cand.country, &post.region);
    // A two-part location ("Hyderabad, Pakistan") leaves state vs country ambiguous.
    let region_conflict = post.region.is_some()
        && (cand.state.is_some() || cand.country.is_some())
        && !state_match
        && !country_match;
    let conflict = differ(&cand.state, &post.state)
        || differ(&cand.country, &post.country)
        || region_conflict;

    let where_ = &posting.location_label;
    if city_match && !conflict {
        DimensionScore::new(Dimension::Location, 1.0, format!("Based in {where_}"))
    } else if state_match || country_match {
        DimensionScore::new(
            Dimension::Location,
            0.5,
            format!("Same region as {where_}, different city"),
        )
    } else {
        DimensionScore::new(
            Dimension::Location,
            0.0,
            format!("On-site in {where_}, outside your area"),
        )
    }
}

pub fn score_experience(
    candidate: &CandidateFeatures,
    posting: &PostingFeatures,
    params: &ScoringParams,
) -> DimensionScore {
    let short = posting.experience.saturating_sub(candidate.experience);
    let score = (1.0 - params.experience_step * f64::from(short)).max(0.0);

    let rationale = match (posting.experience_label, short) {
        (None, _) => format!(
            "No experience level required; you bring {}",
            candidate.experience_label
        ),
        (Some(level), 0) => format!(
            "Your {} of experience meets the {level} requirement",
            candidate.experience_label
        ),
        (Some(level), _) => format!(
            "The {level} role expects more than your {} of experience",
            candidate.experience_label
        ),
    };
    DimensionScore::new(Dimension::Experience, score, rationale)
}

pub fn score_compensation(
    candidate: &CandidateFeatures,
    posting: &PostingFeatures,
    params: &ScoringParams,
) -> Option<DimensionScore> {
    let expected = candidate.salary.as_ref()?;
    let offered = posting.salary.as_ref()?;
    if expected.currency != offered.currency {
        return None;
    }

    if offered.max >= expected.min {
        return Some(DimensionScore::new(
            Dimension::Compensation,
            1.0,
            format!(
                "Offered {} {}–{} per year meets your expectation",
                offered.currency,
                fmt_amount(offered.min),
                fmt_amount(offered.max)
            ),
        ));
    }

    let gap = (expected.min - offered.max) / expected.min.max(1.0);
    let falloff = params.compensation_falloff.max(f64::EPSILON);
    let score = (1.0 - gap / falloff).max(0.0);
    Some(DimensionScore::new(
        Dimension::Compensation,
        score,
        format!(
            "Offered salary tops out {:.0}% below your expected minimum",
            gap * 100.0
        ),
    ))
}

pub fn score_job_type(
    candidate: &CandidateFeatures,
    posting: &PostingFeatures,
    params: &ScoringParams,
) -> Option<DimensionScore> {
    if candidate.job_types.is_empty() {
        return match params.no_preference {
            NoPreferencePolicy::Neutral => Some(DimensionScore::new(
                Dimension::JobType,
                1.0,
                "No job type preference stated, any employment type fits",
            )),
            NoPreferencePolicy::Exclude => None,
        };
    }
    let employment = posting.employment_type.as_deref()?;
    let scored = if candidate.job_types.contains(employment) {
        DimensionScore::new(
            Dimension::JobType,
            1.0,
            format!("{employment} matches your preferred job types"),
        )
    } else {
        DimensionScore::new(
            Dimension::JobType,
            0.0,
            format!("{employment} is not among your preferred job types"),
        )
    };
    Some(scored)
}

fn same(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(x), Some(y)) if x == y)
}

fn differ(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(x), Some(y)) if x != y)
}

fn fmt_amount(value: f64) -> String {
    format!("{:.0}", value.round())
}

//! Recommendation Assembler — composes extraction, scoring, aggregation,
//! classification and explanation per posting, then ranks the batch once.
//!
//! `AppState` holds the engine as `Arc<dyn Recommender>`, so an alternative
//! backend can be swapped in without touching the handlers.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::MatchError;
use crate::matching::aggregate::aggregate_score;
use crate::matching::analysis::{analyze, RecommendationAnalysis};
use crate::matching::explain::explain;
use crate::matching::features::{
    extract, extract_candidate, extract_posting, CandidateFeatures, PostingFeatures,
};
use crate::matching::priority::Priority;
use crate::matching::ranker::rank;
use crate::matching::scoring::{score_all, DimensionScore};
use crate::matching::MatchingConfig;
use crate::models::posting::JobPosting;
use crate::models::profile::CandidateProfile;

/// Outcome of matching one candidate against one posting. Never persisted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub job_id: String,
    pub match_score: f64, // 0.0 – 10.0, one decimal
    pub priority: Priority,
    pub reasons: Vec<String>,
    pub strengths: Vec<String>,
    pub considerations: Vec<String>,
    pub recommendation_text: String,
    pub posted_at: Option<DateTime<Utc>>,
    /// Included dimensions only, in fixed dimension order.
    pub dimensions: Vec<DimensionScore>,
}

/// The recommender trait. Implement this to swap matching backends.
pub trait Recommender: Send + Sync {
    fn compute_recommendations(
        &self,
        candidate: &CandidateProfile,
        postings: &[JobPosting],
        exclude_job_ids: &HashSet<String>,
    ) -> Result<Vec<MatchResult>, MatchError>;

    fn score_posting(
        &self,
        candidate: &CandidateProfile,
        posting: &JobPosting,
    ) -> Result<MatchResult, MatchError>;

    fn analyze(
        &self,
        candidate: &CandidateProfile,
        postings: &[JobPosting],
        results: &[MatchResult],
    ) -> Result<RecommendationAnalysis, MatchError>;

    /// Short label for transparency in responses ("attribute", ...).
    fn backend(&self) -> &'static str;
}

/// Deterministic structured-attribute matcher.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    config: MatchingConfig,
}

impl MatchEngine {
    pub fn new(config: MatchingConfig) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self { config })
    }

    fn assemble(
        &self,
        candidate: &CandidateFeatures,
        posting: &PostingFeatures,
        posted_at: Option<DateTime<Utc>>,
    ) -> MatchResult {
        let cfg = &self.config;
        let dimensions = score_all(candidate, posting, &cfg.scoring);
        let match_score = aggregate_score(&dimensions, &cfg.weights);
        let priority = cfg.thresholds.classify(match_score);
        let explanation = explain(&dimensions, &cfg.weights, &cfg.explain, priority);

        MatchResult {
            job_id: posting.job_id.clone(),
            match_score,
            priority,
            reasons: explanation.reasons,
            strengths: explanation.strengths,
            considerations: explanation.considerations,
            recommendation_text: explanation.recommendation_text,
            posted_at,
            dimensions,
        }
    }
}

impl Recommender for MatchEngine {
    fn compute_recommendations(
        &self,
        candidate: &CandidateProfile,
        postings: &[JobPosting],
        exclude_job_ids: &HashSet<String>,
    ) -> Result<Vec<MatchResult>, MatchError> {
        let pool: Vec<&JobPosting> = postings
            .iter()
            .filter(|p| !exclude_job_ids.contains(&p.id))
            .collect();
        debug!(
            total = postings.len(),
            excluded = postings.len() - pool.len(),
            "Filtered posting pool"
        );
        if pool.is_empty() {
            return Err(MatchError::EmptyPostingPool);
        }

        let features = extract_candidate(candidate)?;
        let results = pool
            .par_iter()
            .map(|posting| -> Result<MatchResult, MatchError> {
                let posting_features = extract_posting(posting)?;
                Ok(self.assemble(&features, &posting_features, posting.posted_at))
            })
            .collect::<Result<Vec<_>, MatchError>>()?;

        let ranked = rank(results);
        info!(
            user_id = %candidate.user_id,
            scored = ranked.len(),
            top_score = ranked.first().map(|r| r.match_score).unwrap_or_default(),
            "Computed recommendations"
        );
        Ok(ranked)
    }

    fn score_posting(
        &self,
        candidate: &CandidateProfile,
        posting: &JobPosting,
    ) -> Result<MatchResult, MatchError> {
        let (c, p) = extract(candidate, posting)?;
        Ok(self.assemble(&c, &p, posting.posted_at))
    }

    fn analyze(
        &self,
        candidate: &CandidateProfile,
        postings: &[JobPosting],
        results: &[MatchResult],
    ) -> Result<RecommendationAnalysis, MatchError> {
        let features = extract_candidate(candidate)?;
        Ok(analyze(&features, postings, results, &self.config.explain))
    }

    fn backend(&self) -> &'static str {
        "attribute"
    }
}

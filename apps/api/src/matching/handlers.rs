//! Axum route handlers for the Recommendations API.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::config::MAX_RECOMMENDATION_LIMIT;
use crate::errors::AppError;
use crate::matching::analysis::RecommendationAnalysis;
use crate::matching::engine::MatchResult;
use crate::models::posting::JobPosting;
use crate::models::profile::CandidateProfile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default = "default_true")]
    pub include_analysis: bool,
    #[serde(default)]
    pub exclude_job_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct UserProfileSummary {
    pub name: Option<String>,
    pub current_role: Option<String>,
    pub experience: String,
    pub skills: Vec<String>,
    pub location: String,
}

impl From<&CandidateProfile> for UserProfileSummary {
    fn from(profile: &CandidateProfile) -> Self {
        Self {
            name: profile.full_name.clone(),
            current_role: profile.current_job_title.clone(),
            experience: profile.years_of_experience.label().to_string(),
            skills: profile.skills.clone(),
            location: profile.location.display(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<MatchResult>,
    pub analysis: Option<RecommendationAnalysis>,
    /// Postings considered after excluding already-applied jobs.
    pub total_jobs: usize,
    pub user_profile: UserProfileSummary,
    pub scorer_backend: String,
}

#[derive(Debug, Deserialize)]
pub struct ComputeRequest {
    pub candidate: CandidateProfile,
    pub postings: Vec<JobPosting>,
    #[serde(default)]
    pub exclude_job_ids: Vec<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ComputeResponse {
    pub recommendations: Vec<MatchResult>,
    pub total_jobs: usize,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub candidate: CandidateProfile,
    pub posting: JobPosting,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/recommendations
///
/// Recommends postings for a stored candidate. Postings the candidate already
/// applied to are excluded regardless of application status.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationsRequest>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let limit = resolve_limit(request.limit, state.config.default_limit)?;

    let profile = state
        .profiles
        .get_profile(request.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {} not found", request.user_id)))?;
    let postings = state.postings.list_postings().await?;
    let applications = state.applications.applications_for(request.user_id).await?;

    let exclude: HashSet<String> = applications
        .into_iter()
        .map(|a| a.job_id)
        .chain(request.exclude_job_ids)
        .collect();
    let total_jobs = postings.iter().filter(|p| !exclude.contains(&p.id)).count();

    let recommender = Arc::clone(&state.recommender);
    let include_analysis = request.include_analysis;
    let (profile, recommendations, analysis) = tokio::task::spawn_blocking(move || {
        let mut ranked = recommender.compute_recommendations(&profile, &postings, &exclude)?;
        ranked.truncate(limit);
        let analysis = if include_analysis && !ranked.is_empty() {
            Some(recommender.analyze(&profile, &postings, &ranked)?)
        } else {
            None
        };
        Ok::<_, AppError>((profile, ranked, analysis))
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))??;

    info!(
        user_id = %request.user_id,
        returned = recommendations.len(),
        total_jobs,
        "Served recommendations"
    );

    Ok(Json(RecommendationsResponse {
        recommendations,
        analysis,
        total_jobs,
        user_profile: UserProfileSummary::from(&profile),
        scorer_backend: state.recommender.backend().to_string(),
    }))
}

/// POST /api/v1/recommendations/compute
///
/// Stateless variant: the caller supplies the profile and the posting pool.
pub async fn handle_compute(
    State(state): State<AppState>,
    Json(request): Json<ComputeRequest>,
) -> Result<Json<ComputeResponse>, AppError> {
    let limit = resolve_limit(request.limit, state.config.default_limit)?;
    let exclude: HashSet<String> = request.exclude_job_ids.into_iter().collect();
    let total_jobs = request
        .postings
        .iter()
        .filter(|p| !exclude.contains(&p.id))
        .count();

    let recommender = Arc::clone(&state.recommender);
    let mut recommendations = tokio::task::spawn_blocking(move || {
        recommender.compute_recommendations(&request.candidate, &request.postings, &exclude)
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))??;
    recommendations.truncate(limit);

    Ok(Json(ComputeResponse {
        recommendations,
        total_jobs,
    }))
}

/// POST /api/v1/match
///
/// Scores a single (candidate, posting) pair — the analysis view of one card.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResult>, AppError> {
    let result = state
        .recommender
        .score_posting(&request.candidate, &request.posting)?;
    Ok(Json(result))
}

fn resolve_limit(requested: Option<usize>, default_limit: usize) -> Result<usize, AppError> {
    match requested {
        None => Ok(default_limit),
        Some(0) => Err(AppError::Validation("limit must be at least 1".to_string())),
        Some(n) => Ok(n.min(MAX_RECOMMENDATION_LIMIT)),
    }
}

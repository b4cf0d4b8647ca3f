//! Shared fixtures for router-level tests: a seeded in-memory store behind the
//! real router, plus request/response helpers.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use jobmatch_api::config::Config;
use jobmatch_api::models::application::{Application, ApplicationStatus};
use jobmatch_api::models::posting::{ExperienceLevel, JobPosting, LocationType};
use jobmatch_api::models::profile::{CandidateLocation, CandidateProfile, ExperienceBand};
use jobmatch_api::store::{InMemoryStore, Seed};
use jobmatch_api::{build_router, AppState};
use rstest::fixture;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub struct TestApp {
    pub router: Router,
    pub candidate_id: Uuid,
    pub incomplete_id: Uuid,
}

pub fn candidate(user_id: Uuid) -> CandidateProfile {
    CandidateProfile {
        user_id,
        full_name: Some("Asha Rao".to_string()),
        current_job_title: Some("Frontend Engineer".to_string()),
        skills: vec!["React".into(), "Node".into(), "SQL".into()],
        location: CandidateLocation {
            city: Some("Pune".into()),
            state: Some("Maharashtra".into()),
            country: Some("India".into()),
        },
        years_of_experience: ExperienceBand::ThreeToFive,
        preferred_job_types: vec!["full-time".into()],
        expected_salary: None,
        languages: vec!["English".into()],
        certifications: vec![],
    }
}

pub fn posting(id: &str, requirements: &[&str], location_type: LocationType) -> JobPosting {
    JobPosting {
        id: id.to_string(),
        title: format!("Engineer {id}"),
        company: "Acme".into(),
        location: "Pune, Maharashtra, India".into(),
        location_type,
        employment_type: "full-time".into(),
        experience_level: Some(ExperienceLevel::Mid),
        salary_min: None,
        salary_max: None,
        currency: None,
        salary_period: None,
        requirements: requirements.iter().map(|s| s.to_string()).collect(),
        benefits: vec![],
        responsibilities: vec![],
        posted_at: None,
    }
}

pub fn postings() -> Vec<JobPosting> {
    vec![
        posting("job-1", &["React", "Node", "SQL"], LocationType::Onsite),
        posting("job-2", &["React", "Node", "SQL", "Go"], LocationType::Remote),
        posting("job-3", &["Kotlin", "Android"], LocationType::Onsite),
        posting("job-4", &["SQL"], LocationType::Hybrid),
    ]
}

#[fixture]
pub fn app() -> TestApp {
    let candidate_id = Uuid::new_v4();
    let incomplete_id = Uuid::new_v4();
    let mut incomplete = candidate(incomplete_id);
    incomplete.skills.clear();

    let mut applications = HashMap::new();
    applications.insert(
        candidate_id,
        vec![Application {
            job_id: "job-4".to_string(),
            status: ApplicationStatus::Rejected,
        }],
    );

    let store = InMemoryStore::from_seed(Seed {
        profiles: vec![candidate(candidate_id), incomplete],
        postings: postings(),
        applications,
    });
    let state = AppState::in_memory(Config::default(), Arc::new(store)).unwrap();

    TestApp {
        router: build_router(state),
        candidate_id,
        incomplete_id,
    }
}

pub async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

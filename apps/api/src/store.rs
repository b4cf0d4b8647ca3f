//! Stores the matcher reads from. Profiles, postings and applications are
//! owned by other services; here they are trait seams with an in-memory
//! implementation seeded from a JSON file.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::models::application::Application;
use crate::models::posting::JobPosting;
use crate::models::profile::CandidateProfile;

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<CandidateProfile>>;
}

#[async_trait]
pub trait PostingStore: Send + Sync {
    async fn list_postings(&self) -> Result<Vec<JobPosting>>;
}

#[async_trait]
pub trait ApplicationIndex: Send + Sync {
    async fn applications_for(&self, user_id: Uuid) -> Result<Vec<Application>>;
}

/// Shape of the seed file.
#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub profiles: Vec<CandidateProfile>,
    #[serde(default)]
    pub postings: Vec<JobPosting>,
    #[serde(default)]
    pub applications: HashMap<Uuid, Vec<Application>>,
}

#[derive(Default)]
pub struct InMemoryStore {
    profiles: RwLock<HashMap<Uuid, CandidateProfile>>,
    postings: RwLock<Vec<JobPosting>>,
    applications: RwLock<HashMap<Uuid, Vec<Application>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: Seed) -> Self {
        Self {
            profiles: RwLock::new(seed.profiles.into_iter().map(|p| (p.user_id, p)).collect()),
            postings: RwLock::new(seed.postings),
            applications: RwLock::new(seed.applications),
        }
    }

    /// Reads and parses a seed file.
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        let seed: Seed = serde_json::from_str(&raw)
            .with_context(|| format!("Seed file {} is not valid JSON", path.display()))?;
        info!(
            profiles = seed.profiles.len(),
            postings = seed.postings.len(),
            "Loaded seed data from {}",
            path.display()
        );
        Ok(Self::from_seed(seed))
    }

    pub async fn upsert_profile(&self, profile: CandidateProfile) {
        self.profiles.write().await.insert(profile.user_id, profile);
    }

    /// Replaces a posting with the same id, or appends it.
    pub async fn upsert_posting(&self, posting: JobPosting) {
        let mut postings = self.postings.write().await;
        match postings.iter_mut().find(|p| p.id == posting.id) {
            Some(existing) => *existing = posting,
            None => postings.push(posting),
        }
    }

    pub async fn record_application(&self, user_id: Uuid, application: Application) {
        self.applications
            .write()
            .await
            .entry(user_id)
            .or_default()
            .push(application);
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<CandidateProfile>> {
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }
}

#[async_trait]
impl PostingStore for InMemoryStore {
    async fn list_postings(&self) -> Result<Vec<JobPosting>> {
        Ok(self.postings.read().await.clone())
    }
}

#[async_trait]
impl ApplicationIndex for InMemoryStore {
    async fn applications_for(&self, user_id: Uuid) -> Result<Vec<Application>> {
        Ok(self
            .applications
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }
}

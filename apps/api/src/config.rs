use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::matching::aggregate::DimensionWeights;
use crate::matching::explain::ExplainThresholds;
use crate::matching::priority::PriorityThresholds;
use crate::matching::scoring::{NoPreferencePolicy, ScoringParams};
use crate::matching::MatchingConfig;

/// Hard ceiling on recommendations returned per request.
pub const MAX_RECOMMENDATION_LIMIT: usize = 50;

/// Application configuration loaded from environment variables.
/// Every variable is optional; a present but unparsable value fails startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON file with `{ profiles, postings, applications }` to seed the in-memory store.
    pub seed_path: Option<PathBuf>,
    pub default_limit: usize,
    pub matching: MatchingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            seed_path: None,
            default_limit: 10,
            matching: MatchingConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        let weights = DimensionWeights::default();
        let thresholds = PriorityThresholds::default();
        let explain = ExplainThresholds::default();
        let scoring = ScoringParams::default();

        let matching = MatchingConfig {
            weights: DimensionWeights {
                skills: parse_or(&lookup, "MATCH_WEIGHT_SKILLS", weights.skills)?,
                experience: parse_or(&lookup, "MATCH_WEIGHT_EXPERIENCE", weights.experience)?,
                location: parse_or(&lookup, "MATCH_WEIGHT_LOCATION", weights.location)?,
                compensation: parse_or(&lookup, "MATCH_WEIGHT_COMPENSATION", weights.compensation)?,
                job_type: parse_or(&lookup, "MATCH_WEIGHT_JOB_TYPE", weights.job_type)?,
            },
            thresholds: PriorityThresholds {
                high: parse_or(&lookup, "PRIORITY_HIGH_THRESHOLD", thresholds.high)?,
                medium: parse_or(&lookup, "PRIORITY_MEDIUM_THRESHOLD", thresholds.medium)?,
            },
            explain: ExplainThresholds {
                strength: parse_or(&lookup, "STRENGTH_THRESHOLD", explain.strength)?,
                consideration: parse_or(&lookup, "CONSIDERATION_THRESHOLD", explain.consideration)?,
            },
            scoring: ScoringParams {
                experience_step: parse_or(&lookup, "EXPERIENCE_STEP", scoring.experience_step)?,
                compensation_falloff: parse_or(
                    &lookup,
                    "COMPENSATION_FALLOFF",
                    scoring.compensation_falloff,
                )?,
                no_preference: parse_or::<NoPreferencePolicy>(
                    &lookup,
                    "JOB_TYPE_NO_PREFERENCE",
                    scoring.no_preference,
                )?,
            },
        };
        matching
            .validate()
            .context("Matching configuration is inconsistent")?;

        let default_limit: usize =
            parse_or(&lookup, "DEFAULT_RECOMMENDATION_LIMIT", defaults.default_limit)?;
        if default_limit == 0 || default_limit > MAX_RECOMMENDATION_LIMIT {
            anyhow::bail!(
                "DEFAULT_RECOMMENDATION_LIMIT must be between 1 and {MAX_RECOMMENDATION_LIMIT}"
            );
        }

        Ok(Config {
            port: parse_or(&lookup, "PORT", defaults.port)
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            seed_path: lookup("SEED_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            default_limit,
            matching,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Environment variable '{key}' is invalid ({raw:?}): {e}")),
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    #[default]
    #[serde(alias = "on-site")]
    Onsite,
    Remote,
    Hybrid,
}

/// Seniority a posting asks for. Shares the 0..=4 scale with `ExperienceBand`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    #[serde(alias = "Entry Level")]
    Entry,
    #[serde(alias = "Junior")]
    Junior,
    #[serde(alias = "Mid Level")]
    Mid,
    #[serde(alias = "Senior Level", alias = "Senior")]
    Senior,
    #[serde(alias = "Executive")]
    Executive,
}

impl ExperienceLevel {
    pub fn ordinal(self) -> u8 {
        match self {
            ExperienceLevel::Entry => 0,
            ExperienceLevel::Junior => 1,
            ExperienceLevel::Mid => 2,
            ExperienceLevel::Senior => 3,
            ExperienceLevel::Executive => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry level",
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Mid => "mid level",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Executive => "executive",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalaryPeriod {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    #[default]
    Annual,
}

impl SalaryPeriod {
    /// Multiplier that converts an amount in this period to an annual amount.
    pub fn annual_factor(self) -> f64 {
        match self {
            SalaryPeriod::Hourly => 2080.0,
            SalaryPeriod::Daily => 260.0,
            SalaryPeriod::Weekly => 52.0,
            SalaryPeriod::Monthly => 12.0,
            SalaryPeriod::Annual => 1.0,
        }
    }
}

/// A job opening as read from the posting store. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub location_type: LocationType,
    #[serde(default)]
    pub employment_type: String,
    #[serde(default)]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[serde(default)]
    pub salary_max: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub salary_period: Option<SalaryPeriod>,
    /// Required. An empty list is rejected by the feature extractor.
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
}

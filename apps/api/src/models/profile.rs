use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::posting::SalaryPeriod;

/// Self-reported years of experience, as offered by the profile form.
/// Ordered, so `ExperienceBand::FiveToTen > ExperienceBand::OneToThree`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExperienceBand {
    #[default]
    #[serde(rename = "0-1")]
    ZeroToOne,
    #[serde(rename = "1-3")]
    OneToThree,
    #[serde(rename = "3-5")]
    ThreeToFive,
    #[serde(rename = "5-10")]
    FiveToTen,
    #[serde(rename = "10+")]
    TenPlus,
}

impl ExperienceBand {
    /// Position on the shared 0..=4 experience scale.
    pub fn ordinal(self) -> u8 {
        match self {
            ExperienceBand::ZeroToOne => 0,
            ExperienceBand::OneToThree => 1,
            ExperienceBand::ThreeToFive => 2,
            ExperienceBand::FiveToTen => 3,
            ExperienceBand::TenPlus => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExperienceBand::ZeroToOne => "0-1 years",
            ExperienceBand::OneToThree => "1-3 years",
            ExperienceBand::ThreeToFive => "3-5 years",
            ExperienceBand::FiveToTen => "5-10 years",
            ExperienceBand::TenPlus => "10+ years",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateLocation {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl CandidateLocation {
    /// "City, State, Country" with unknown parts skipped.
    pub fn display(&self) -> String {
        [&self.city, &self.state, &self.country]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Salary the candidate expects. `currency`/`period` default to the posting
/// side's conventions (INR, annual) when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub period: Option<SalaryPeriod>,
}

/// Immutable snapshot of a job seeker's profile, taken once per matching run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub user_id: Uuid,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub current_job_title: Option<String>,
    /// Required. An empty list is rejected by the feature extractor.
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub location: CandidateLocation,
    #[serde(default)]
    pub years_of_experience: ExperienceBand,
    #[serde(default)]
    pub preferred_job_types: Vec<String>,
    #[serde(default)]
    pub expected_salary: Option<SalaryRange>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_band_wire_values() {
        let band: ExperienceBand = serde_json::from_str(r#""5-10""#).unwrap();
        assert_eq!(band, ExperienceBand::FiveToTen);
        assert_eq!(serde_json::to_string(&ExperienceBand::TenPlus).unwrap(), r#""10+""#);
    }

    #[test]
    fn test_experience_band_ordering_matches_ordinal() {
        assert!(ExperienceBand::ThreeToFive > ExperienceBand::OneToThree);
        assert_eq!(ExperienceBand::ZeroToOne.ordinal(), 0);
        assert_eq!(ExperienceBand::TenPlus.ordinal(), 4);
    }

    #[test]
    fn test_location_display_skips_missing_parts() {
        let loc = CandidateLocation {
            city: Some("Pune".to_string()),
            state: None,
            country: Some("India".to_string()),
        };
        assert_eq!(loc.display(), "Pune, India");
    }

    #[test]
    fn test_profile_deserializes_with_defaults() {
        let json = r#"{
            "user_id": "6f1c1f7e-8b8c-4a7a-9d0e-2b1e4f3a5c6d",
            "skills": ["Rust", "SQL"]
        }"#;
        let profile: CandidateProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.skills.len(), 2);
        assert_eq!(profile.years_of_experience, ExperienceBand::ZeroToOne);
        assert!(profile.expected_salary.is_none());
        assert!(profile.preferred_job_types.is_empty());
    }
}

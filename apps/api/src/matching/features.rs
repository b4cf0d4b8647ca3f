//! Feature Extractor — turns a profile and a posting into aligned, normalized
//! feature records that the attribute scorer can compare directly.

use std::collections::BTreeSet;

use crate::errors::MatchError;
use crate::models::posting::{JobPosting, LocationType, SalaryPeriod};
use crate::models::profile::CandidateProfile;

/// Currency assumed when a salary carries none (the job board lists in INR).
pub const DEFAULT_CURRENCY: &str = "INR";

/// A salary range converted to annual figures.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualRange {
    pub min: f64,
    pub max: f64,
    pub currency: String,
}

impl AnnualRange {
    fn new(a: f64, b: f64, currency: Option<&str>, period: Option<SalaryPeriod>) -> Self {
        let factor = period.unwrap_or_default().annual_factor();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Self {
            min: lo * factor,
            max: hi * factor,
            currency: currency
                .map(|c| c.trim().to_uppercase())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        }
    }
}

/// Comma-separated place split into its parts. A two-part place keeps its
/// second part as `region`, which may be either a state or a country.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Place {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
}

impl Place {
    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.state.is_none() && self.country.is_none() && self.region.is_none()
    }

    fn parse(raw: &str) -> Self {
        let parts: Vec<String> = raw
            .split(',')
            .map(normalize_term)
            .filter(|p| !p.is_empty())
            .collect();
        match parts.as_slice() {
            [] => Place::default(),
            [city] => Place {
                city: Some(city.clone()),
                ..Place::default()
            },
            [city, region] => Place {
                city: Some(city.clone()),
                region: Some(region.clone()),
                ..Place::default()
            },
            [city, .., state, country] => Place {
                city: Some(city.clone()),
                state: Some(state.clone()),
                country: Some(country.clone()),
                region: None,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct CandidateFeatures {
    pub skills: BTreeSet<String>,
    /// Each skill split into words, for whole-word containment checks.
    skill_words: Vec<Vec<String>>,
    pub place: Place,
    pub experience: u8,
    pub experience_label: &'static str,
    pub job_types: BTreeSet<String>,
    pub salary: Option<AnnualRange>,
}

impl CandidateFeatures {
    /// True when the requirement names one of the candidate's skills, either
    /// exactly or as a whole-word run inside a longer requirement.
    pub fn covers(&self, requirement: &str) -> bool {
        if self.skills.contains(requirement) {
            return true;
        }
        let req_words = words(requirement);
        self.skill_words
            .iter()
            .any(|skill| !skill.is_empty() && contains_run(&req_words, skill))
    }
}

#[derive(Debug, Clone)]
pub struct PostingFeatures {
    pub job_id: String,
    /// Normalized, deduplicated requirements in posting order.
    pub requirements: Vec<String>,
    pub place: Place,
    pub location_label: String,
    pub remote: bool,
    pub experience: u8,
    pub experience_label: Option<&'static str>,
    pub employment_type: Option<String>,
    pub salary: Option<AnnualRange>,
}

/// Extracts aligned features for one (candidate, posting) pair.
pub fn extract(
    candidate: &CandidateProfile,
    posting: &JobPosting,
) -> Result<(CandidateFeatures, PostingFeatures), MatchError> {
    Ok((extract_candidate(candidate)?, extract_posting(posting)?))
}

pub fn extract_candidate(candidate: &CandidateProfile) -> Result<CandidateFeatures, MatchError> {
    let skills: BTreeSet<String> = candidate
        .skills
        .iter()
        .map(|s| normalize_term(s))
        .filter(|s| !s.is_empty())
        .collect();
    if skills.is_empty() {
        return Err(MatchError::MalformedInput {
            field: "candidate.skills".to_string(),
        });
    }
    let skill_words = skills.iter().map(|s| words(s)).collect();

    let loc = &candidate.location;
    let place = Place {
        city: loc.city.as_deref().map(normalize_term).filter(|s| !s.is_empty()),
        state: loc.state.as_deref().map(normalize_term).filter(|s| !s.is_empty()),
        country: loc.country.as_deref().map(normalize_term).filter(|s| !s.is_empty()),
        region: None,
    };

    let salary = candidate.expected_salary.as_ref().map(|s| {
        AnnualRange::new(s.min, s.max, s.currency.as_deref(), s.period)
    });

    Ok(CandidateFeatures {
        skills,
        skill_words,
        place,
        experience: candidate.years_of_experience.ordinal(),
        experience_label: candidate.years_of_experience.label(),
        job_types: candidate
            .preferred_job_types
            .iter()
            .map(|t| normalize_job_type(t))
            .filter(|t| !t.is_empty())
            .collect(),
        salary,
    })
}

pub fn extract_posting(posting: &JobPosting) -> Result<PostingFeatures, MatchError> {
    let mut seen = BTreeSet::new();
    let requirements: Vec<String> = posting
        .requirements
        .iter()
        .map(|r| normalize_term(r))
        .filter(|r| !r.is_empty() && seen.insert(r.clone()))
        .collect();
    if requirements.is_empty() {
        return Err(MatchError::MalformedInput {
            field: "posting.requirements".to_string(),
        });
    }

    let salary = match (posting.salary_min, posting.salary_max) {
        (None, None) => None,
        (min, max) => {
            let lo = min.or(max).unwrap_or_default();
            let hi = max.or(min).unwrap_or_default();
            Some(AnnualRange::new(
                lo,
                hi,
                posting.currency.as_deref(),
                posting.salary_period,
            ))
        }
    };

    let employment_type = Some(normalize_job_type(&posting.employment_type)).filter(|t| !t.is_empty());

    Ok(PostingFeatures {
        job_id: posting.id.clone(),
        requirements,
        place: Place::parse(&posting.location),
        location_label: posting.location.trim().to_string(),
        remote: posting.location_type == LocationType::Remote,
        experience: posting.experience_level.map_or(0, |l| l.ordinal()),
        experience_label: posting.experience_level.map(|l| l.label()),
        employment_type,
        salary,
    })
}

/// Lowercases, trims and collapses inner whitespace.
pub fn normalize_term(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// "Full time", "full_time" and "FULL-TIME" all become "full-time".
pub fn normalize_job_type(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Splits a normalized term into words, keeping `+`, `#` and inner dots so
/// that "c++", "c#" and "node.js" survive intact.
fn words(term: &str) -> Vec<String> {
    term.split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#' || c == '.'))
        .map(|w| w.trim_end_matches('.'))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn contains_run(haystack: &[String], needle: &[String]) -> bool {
    needle.len() <= haystack.len() && haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::posting::ExperienceLevel;
    use crate::models::profile::{CandidateLocation, ExperienceBand, SalaryRange};
    use uuid::Uuid;

    fn make_candidate(skills: &[&str]) -> CandidateProfile {
        CandidateProfile {
            user_id: Uuid::new_v4(),
            full_name: Some("Asha Rao".to_string()),
            current_job_title: None,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            location: CandidateLocation::default(),
            years_of_experience: ExperienceBand::ThreeToFive,
            preferred_job_types: vec![],
            expected_salary: None,
            languages: vec![],
            certifications: vec![],
        }
    }

    fn make_posting(requirements: &[&str]) -> JobPosting {
        JobPosting {
            id: "job-1".to_string(),
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            location: String::new(),
            location_type: LocationType::Onsite,
            employment_type: "full-time".to_string(),
            experience_level: None,
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

    #[test]
    fn test_missing_skills_is_malformed() {
        let err = extract_candidate(&make_candidate(&["  ", ""])).unwrap_err();
        assert!(matches!(err, MatchError::MalformedInput { ref field } if field == "candidate.skills"));
    }

    #[test]
    fn test_missing_requirements_is_malformed() {
        let err = extract_posting(&make_posting(&[])).unwrap_err();
        assert!(matches!(err, MatchError::MalformedInput { ref field } if field == "posting.requirements"));
    }

    #[test]
    fn test_requirements_are_case_insensitive_and_deduplicated() {
        let posting = extract_posting(&make_posting(&["React", " react ", "Node  JS", "SQL"])).unwrap();
        assert_eq!(posting.requirements, vec!["react", "node js", "sql"]);
    }

    #[test]
    fn test_covers_exact_and_whole_word_runs() {
        let candidate = extract_candidate(&make_candidate(&["React", "Go", "Node.js"])).unwrap();
        assert!(candidate.covers("react"));
        assert!(candidate.covers("3+ years of react experience."));
        assert!(candidate.covers("node.js"));
        assert!(!candidate.covers("google cloud"));
        assert!(!candidate.covers("reactive streams"));
    }

    #[test]
    fn test_place_parse_shapes() {
        assert_eq!(Place::parse("").city, None);
        let two = Place::parse("Austin, TX");
        assert_eq!(two.city.as_deref(), Some("austin"));
        assert_eq!(two.region.as_deref(), Some("tx"));
        let three = Place::parse("Bengaluru, Karnataka, India");
        assert_eq!(three.state.as_deref(), Some("karnataka"));
        assert_eq!(three.country.as_deref(), Some("india"));
    }

    #[test]
    fn test_salary_normalized_to_annual() {
        let mut posting = make_posting(&["Rust"]);
        posting.salary_min = Some(100_000.0);
        posting.salary_period = Some(SalaryPeriod::Monthly);
        let features = extract_posting(&posting).unwrap();
        let salary = features.salary.unwrap();
        assert_eq!(salary.min, 1_200_000.0);
        assert_eq!(salary.max, 1_200_000.0);
        assert_eq!(salary.currency, "INR");

        let mut candidate = make_candidate(&["Rust"]);
        candidate.expected_salary = Some(SalaryRange {
            min: 20.0,
            max: 10.0,
            currency: Some("usd".to_string()),
            period: Some(SalaryPeriod::Hourly),
        });
        let salary = extract_candidate(&candidate).unwrap().salary.unwrap();
        assert_eq!(salary.min, 20_800.0);
        assert_eq!(salary.max, 41_600.0);
        assert_eq!(salary.currency, "USD");
    }

    #[test]
    fn test_experience_mapped_to_shared_scale() {
        let mut posting = make_posting(&["Rust"]);
        posting.experience_level = Some(ExperienceLevel::Senior);
        let features = extract_posting(&posting).unwrap();
        assert_eq!(features.experience, 3);
        assert_eq!(extract_posting(&make_posting(&["Rust"])).unwrap().experience, 0);
    }

    #[test]
    fn test_job_type_normalization() {
        assert_eq!(normalize_job_type("Full time"), "full-time");
        assert_eq!(normalize_job_type("PART_TIME"), "part-time");
        assert_eq!(normalize_job_type("  "), "");
    }
}

//! Batch analysis — a summary of a candidate's recommendation batch: how the
//! search looks overall, which required skills keep coming up missing, and
//! what to do next.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::matching::engine::MatchResult;
use crate::matching::explain::ExplainThresholds;
use crate::matching::features::{extract_posting, CandidateFeatures};
use crate::matching::priority::Priority;
use crate::matching::ranker::Ranking;
use crate::matching::scoring::Dimension;
use crate::models::posting::JobPosting;

/// Only the best matches shape the analysis.
const TOP_MATCHES: usize = 5;
const MAX_SKILL_GAPS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationAnalysis {
    pub overall_assessment: String,
    pub average_score: f64,
    pub priority_counts: PriorityCounts,
    pub skill_gaps: Vec<String>,
    pub strengths: Vec<String>,
    pub next_steps: Vec<String>,
}

pub fn analyze(
    candidate: &CandidateFeatures,
    postings: &[JobPosting],
    results: &[MatchResult],
    thresholds: &ExplainThresholds,
) -> RecommendationAnalysis {
    let mut counts = PriorityCounts::default();
    for r in results {
        match r.priority {
            Priority::High => counts.high += 1,
            Priority::Medium => counts.medium += 1,
            Priority::Low => counts.low += 1,
        }
    }
    let average_score = if results.is_empty() {
        0.0
    } else {
        let mean = results.iter().map(|r| r.match_score).sum::<f64>() / results.len() as f64;
        (mean * 10.0).round() / 10.0
    };

    let ranking = Ranking::new(results);
    let top: Vec<&MatchResult> = ranking.iter().take(TOP_MATCHES).collect();

    let skill_gaps = skill_gaps(candidate, postings, &top);
    let strengths = recurring_strengths(&top, thresholds);
    let next_steps = next_steps(&counts, &skill_gaps, &top, thresholds);

    RecommendationAnalysis {
        overall_assessment: overall_assessment(&counts, results.len()),
        average_score,
        priority_counts: counts,
        skill_gaps,
        strengths,
        next_steps,
    }
}

/// Required skills the candidate lacks across the top matches, most frequent first.
fn skill_gaps(
    candidate: &CandidateFeatures,
    postings: &[JobPosting],
    top: &[&MatchResult],
) -> Vec<String> {
    let by_id: HashMap<&str, &JobPosting> = postings.iter().map(|p| (p.id.as_str(), p)).collect();
    let mut missing: BTreeMap<String, usize> = BTreeMap::new();

    for result in top {
        let Some(posting) = by_id.get(result.job_id.as_str()) else {
            continue;
        };
        let Ok(features) = extract_posting(posting) else {
            continue;
        };
        for requirement in features.requirements {
            if !candidate.covers(&requirement) {
                *missing.entry(requirement).or_default() += 1;
            }
        }
    }

    let mut gaps: Vec<(String, usize)> = missing.into_iter().collect();
    // BTreeMap iteration already sorted names; stable sort keeps that for ties.
    gaps.sort_by(|a, b| b.1.cmp(&a.1));
    gaps.into_iter().take(MAX_SKILL_GAPS).map(|(skill, _)| skill).collect()
}

/// Dimensions that are strong in at least half of the top matches.
fn recurring_strengths(top: &[&MatchResult], thresholds: &ExplainThresholds) -> Vec<String> {
    if top.is_empty() {
        return vec![];
    }
    Dimension::ALL
        .iter()
        .filter(|dim| {
            let strong = top
                .iter()
                .filter(|r| {
                    r.dimensions
                        .iter()
                        .any(|d| d.dimension == **dim && d.score >= thresholds.strength)
                })
                .count();
            strong * 2 >= top.len()
        })
        .map(|dim| {
            match dim {
                Dimension::Skills => "Your skills line up with most of your top matches",
                Dimension::Location => "Your location works for most of your top matches",
                Dimension::Experience => "Your experience meets the level most top matches ask for",
                Dimension::Compensation => "Your salary expectations fit what top matches offer",
                Dimension::JobType => "Your preferred employment type is widely available",
            }
            .to_string()
        })
        .collect()
}

fn next_steps(
    counts: &PriorityCounts,
    skill_gaps: &[String],
    top: &[&MatchResult],
    thresholds: &ExplainThresholds,
) -> Vec<String> {
    let mut steps = Vec::new();
    if counts.high > 0 {
        steps.push(format!(
            "Apply to your {} high-priority match{} first",
            counts.high,
            if counts.high == 1 { "" } else { "es" }
        ));
    }
    if !skill_gaps.is_empty() {
        let shown: Vec<&str> = skill_gaps.iter().take(3).map(String::as_str).collect();
        steps.push(format!("Build experience with {}", shown.join(", ")));
    }
    let weak_location = top.iter().any(|r| {
        r.dimensions
            .iter()
            .any(|d| d.dimension == Dimension::Location && d.score <= thresholds.consideration)
    });
    if weak_location {
        steps.push("Consider remote roles or relocation to widen your options".to_string());
    }
    steps.push("Keep your skills and salary expectations on your profile up to date".to_string());
    steps
}

fn overall_assessment(counts: &PriorityCounts, total: usize) -> String {
    if total == 0 {
        return "No recommendations to assess yet.".to_string();
    }
    if counts.high * 2 >= total {
        "Strong prospects: most of your recommendations are high-priority matches.".to_string()
    } else if counts.high + counts.medium > counts.low {
        "Good prospects: several roles fit your profile, with a few gaps worth closing.".to_string()
    } else {
        "Limited matches right now: closing your skill gaps will open up more roles.".to_string()
    }
}

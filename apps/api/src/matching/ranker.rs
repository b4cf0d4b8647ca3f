//! Ranker — orders one candidate's scored postings for presentation.
//!
//! Sort key: match score descending, posting date descending (undated last),
//! job id ascending. The job id makes the order total, so ranking the same
//! batch twice always yields the same sequence.

use std::cell::OnceCell;
use std::cmp::Ordering;

use crate::matching::engine::MatchResult;

pub fn compare(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.match_score
        .total_cmp(&a.match_score)
        .then_with(|| match (a.posted_at, b.posted_at) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.job_id.cmp(&b.job_id))
}

/// Sorts an owned batch in place and returns it.
pub fn rank(mut batch: Vec<MatchResult>) -> Vec<MatchResult> {
    batch.sort_by(compare);
    batch
}

/// A ranked view over a borrowed batch. The order is computed on first use;
/// `iter` can be called any number of times and never mutates the batch.
pub struct Ranking<'a> {
    batch: &'a [MatchResult],
    order: OnceCell<Vec<usize>>,
}

impl<'a> Ranking<'a> {
    pub fn new(batch: &'a [MatchResult]) -> Self {
        Self {
            batch,
            order: OnceCell::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.batch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a MatchResult> + '_ {
        let batch = self.batch;
        self.order().iter().map(move |&i| &batch[i])
    }

    fn order(&self) -> &[usize] {
        self.order.get_or_init(|| {
            let mut order: Vec<usize> = (0..self.batch.len()).collect();
            order.sort_by(|&a, &b| compare(&self.batch[a], &self.batch[b]));
            order
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::priority::Priority;
    use chrono::{TimeZone, Utc};

    fn make_result(job_id: &str, score: f64, day: Option<u32>) -> MatchResult {
        MatchResult {
            job_id: job_id.to_string(),
            match_score: score,
            priority: Priority::Medium,
            reasons: vec![],
            strengths: vec![],
            considerations: vec![],
            recommendation_text: String::new(),
            posted_at: day.map(|d| Utc.with_ymd_and_hms(2026, 3, d, 9, 0, 0).unwrap()),
            dimensions: vec![],
        }
    }

    fn ids<'a>(it: impl Iterator<Item = &'a MatchResult>) -> Vec<&'a str> {
        it.map(|r| r.job_id.as_str()).collect()
    }

    #[test]
    fn test_orders_by_score_then_date_then_id() {
        let batch = vec![
            make_result("c", 7.0, Some(1)),
            make_result("b", 7.0, Some(5)),
            make_result("a", 7.0, Some(5)),
            make_result("d", 9.1, None),
            make_result("e", 7.0, None),
        ];
        let ranking = Ranking::new(&batch);
        assert_eq!(ids(ranking.iter()), vec!["d", "a", "b", "c", "e"]);
    }

    #[test]
    fn test_ranking_is_restartable_and_leaves_batch_untouched() {
        let batch = vec![
            make_result("x", 2.0, None),
            make_result("y", 8.0, None),
            make_result("z", 5.0, None),
        ];
        let ranking = Ranking::new(&batch);
        let first = ids(ranking.iter());
        let second = ids(ranking.iter());
        assert_eq!(first, second);
        assert_eq!(first, vec!["y", "z", "x"]);
        assert_eq!(batch[0].job_id, "x");
        assert_eq!(ranking.len(), 3);
    }

    #[test]
    fn test_owned_rank_matches_view() {
        let batch = vec![
            make_result("b", 4.4, Some(2)),
            make_result("a", 4.4, Some(2)),
            make_result("c", 6.0, Some(1)),
        ];
        let view = ids(Ranking::new(&batch).iter())
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        let owned: Vec<String> = rank(batch.clone()).into_iter().map(|r| r.job_id).collect();
        assert_eq!(view, owned);
        assert_eq!(owned, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_empty_batch() {
        let batch: Vec<MatchResult> = vec![];
        let ranking = Ranking::new(&batch);
        assert!(ranking.is_empty());
        assert_eq!(ranking.iter().count(), 0);
    }
}

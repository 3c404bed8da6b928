//! Staleness-weighted quiz selection.
//!
//! Selection is deterministic: rank the pool stalest-first and take the
//! quota. Presentation is not: the taken subset is shuffled so a session
//! doesn't always open with the single most overdue card while coverage
//! stays biased toward overdue material.

use crate::model::QuizQuestion;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Reverse;

/// Pick up to `n` questions from the pool, favoring the least recently
/// seen. The sort is stable, so equal ages keep their pool order; the
/// returned subset is shuffled.
///
/// `n == 0` or an empty pool yields an empty result; `n` past the pool
/// size returns the whole pool (shuffled).
pub fn select_weighted<R: Rng>(
    mut pool: Vec<QuizQuestion>,
    n: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<QuizQuestion> {
    if n == 0 || pool.is_empty() {
        return Vec::new();
    }
    pool.sort_by_key(|q| Reverse(q.qa.age_seconds(now)));
    pool.truncate(n.min(pool.len()));
    pool.shuffle(rng);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QaPair;
    use chrono::Duration;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use uuid::Uuid;

    fn question(label: &str, last_seen: Option<DateTime<Utc>>) -> QuizQuestion {
        QuizQuestion {
            note_id: Uuid::new_v4(),
            note_path: "notes/a.md".into(),
            qa: QaPair {
                id: Some(Uuid::new_v4()),
                question: label.into(),
                answer: String::new(),
                last_seen,
                categories: vec![],
            },
        }
    }

    fn labels(selected: &[QuizQuestion]) -> Vec<String> {
        let mut labels: Vec<String> = selected.iter().map(|q| q.qa.question.clone()).collect();
        labels.sort();
        labels
    }

    #[test]
    fn test_selects_stalest_regardless_of_seed() {
        let now = Utc::now();
        let pool = vec![
            question("ten-days", Some(now - Duration::days(10))),
            question("one-day", Some(now - Duration::days(1))),
            question("just-now", Some(now)),
        ];

        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let selected = select_weighted(pool.clone(), 2, now, &mut rng);
            assert_eq!(labels(&selected), vec!["one-day", "ten-days"]);
        }
    }

    #[test]
    fn test_quota_larger_than_pool_returns_everything_once() {
        let now = Utc::now();
        let pool = vec![
            question("a", Some(now - Duration::days(2))),
            question("b", Some(now - Duration::days(1))),
            question("c", Some(now)),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        let selected = select_weighted(pool, 5, now, &mut rng);
        assert_eq!(labels(&selected), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_zero_quota_and_empty_pool() {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(select_weighted(vec![question("a", Some(now))], 0, now, &mut rng).is_empty());
        assert!(select_weighted(Vec::new(), 3, now, &mut rng).is_empty());
    }

    #[test]
    fn test_never_seen_ranks_stalest() {
        let now = Utc::now();
        let pool = vec![
            question("seen-long-ago", Some(now - Duration::days(300))),
            question("never-seen", None),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let selected = select_weighted(pool, 1, now, &mut rng);
        assert_eq!(selected[0].qa.question, "never-seen");
    }

    #[test]
    fn test_future_dated_ranks_freshest() {
        let now = Utc::now();
        let pool = vec![
            question("skewed", Some(now + Duration::days(2))),
            question("yesterday", Some(now - Duration::days(1))),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let selected = select_weighted(pool, 1, now, &mut rng);
        assert_eq!(selected[0].qa.question, "yesterday");
    }

    #[test]
    fn test_shuffle_changes_presentation_order() {
        let now = Utc::now();
        let pool: Vec<QuizQuestion> = (0..8)
            .map(|i| question(&format!("q{}", i), Some(now - Duration::days(i + 1))))
            .collect();

        // Across seeds the contents are identical but the order varies.
        let mut orders = std::collections::HashSet::new();
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let selected = select_weighted(pool.clone(), 8, now, &mut rng);
            orders.insert(
                selected
                    .iter()
                    .map(|q| q.qa.question.clone())
                    .collect::<Vec<_>>(),
            );
        }
        assert!(orders.len() > 1);
    }
}

//! Stage ladder review scheduling
//!
//! Every item sits on a stage of an ascending interval ladder:
//! - Correct answer: move up one stage (capped at the top)
//! - Incorrect answer: drop back to stage 0
//!
//! Either way the item becomes due `interval[stage]` after the answer.

use chrono::{DateTime, Duration, Utc};

use super::models::ItemState;

/// Default ladder: now, 5m, 30m, 12h, 1d, 2d, 4d, 7d, 15d, 30d
const DEFAULT_INTERVALS_SECS: [i64; 10] = [
    0,
    5 * 60,
    30 * 60,
    12 * 3600,
    24 * 3600,
    48 * 3600,
    96 * 3600,
    7 * 86400,
    15 * 86400,
    30 * 86400,
];

/// Longest interval accepted from configuration (100 years)
const MAX_INTERVAL_SECS: u64 = 100 * 365 * 86400;

/// Ascending review intervals, one per stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalLadder {
    intervals: Vec<Duration>,
}

impl Default for IntervalLadder {
    fn default() -> Self {
        Self {
            intervals: DEFAULT_INTERVALS_SECS
                .iter()
                .map(|secs| Duration::seconds(*secs))
                .collect(),
        }
    }
}

impl IntervalLadder {
    /// Build a ladder from seconds. Returns `None` for an empty list.
    pub fn from_secs(secs: &[u64]) -> Option<Self> {
        if secs.is_empty() {
            return None;
        }
        let intervals = secs
            .iter()
            .map(|s| Duration::seconds((*s).min(MAX_INTERVAL_SECS) as i64))
            .collect();
        Some(Self { intervals })
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Highest reachable stage
    pub fn max_stage(&self) -> usize {
        self.intervals.len().saturating_sub(1)
    }

    /// Interval for a stage, clamped to the ladder
    pub fn interval(&self, stage: usize) -> Duration {
        self.intervals
            .get(stage.min(self.max_stage()))
            .copied()
            .unwrap_or_else(Duration::zero)
    }
}

/// State after answering an item at `now`
pub fn next_state(state: &ItemState, correct: bool, now: DateTime<Utc>, ladder: &IntervalLadder) -> ItemState {
    let stage = if correct {
        (state.stage + 1).min(ladder.max_stage())
    } else {
        0
    };

    ItemState {
        stage,
        due_at: Some(now + ladder.interval(stage)),
    }
}

/// Queue position class: never answered, overdue, then upcoming
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Bucket {
    Unseen,
    Overdue,
    Upcoming,
}

fn bucket(state: &ItemState, now: DateTime<Utc>) -> Bucket {
    if state.is_unseen() {
        Bucket::Unseen
    } else if state.is_overdue(now) {
        Bucket::Overdue
    } else {
        Bucket::Upcoming
    }
}

/// Practice order for `states` (given in list order) as a permutation of
/// indices.
///
/// Unseen items come first, then overdue, then upcoming. Within a bucket the
/// earlier due time wins, then the lower stage, then the list position.
pub fn order_indices(states: &[ItemState], now: DateTime<Utc>) -> Vec<usize> {
    let mut keyed: Vec<_> = states
        .iter()
        .enumerate()
        .map(|(index, state)| (bucket(state, now), state.due_at, state.stage, index))
        .collect();
    keyed.sort();
    keyed.into_iter().map(|(_, _, _, index)| index).collect()
}

/// Short human form of an interval, e.g. `now`, `30m`, `12h`, `7d`
pub fn format_interval(interval: Duration) -> String {
    let minutes = interval.num_minutes();
    if minutes <= 0 {
        "now".to_string()
    } else if minutes < 60 {
        format!("{}m", minutes)
    } else if minutes < 24 * 60 {
        format!("{}h", interval.num_hours())
    } else {
        format!("{}d", interval.num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_default_ladder() {
        let ladder = IntervalLadder::default();
        assert_eq!(ladder.len(), 10);
        assert_eq!(ladder.max_stage(), 9);
        assert_eq!(ladder.interval(0), Duration::zero());
        assert_eq!(ladder.interval(1), Duration::minutes(5));
        assert_eq!(ladder.interval(9), Duration::days(30));
        assert_eq!(ladder.interval(42), Duration::days(30));
    }

    #[test]
    fn test_custom_ladder() {
        assert!(IntervalLadder::from_secs(&[]).is_none());

        let ladder = IntervalLadder::from_secs(&[0, 60, 3600]).unwrap();
        assert_eq!(ladder.max_stage(), 2);
        assert_eq!(ladder.interval(2), Duration::hours(1));
    }

    #[test]
    fn test_correct_answer_escalates_and_caps() {
        let ladder = IntervalLadder::default();
        let mut state = ItemState::default();

        for expected in 1..=ladder.max_stage() {
            state = next_state(&state, true, now(), &ladder);
            assert_eq!(state.stage, expected);
        }
        for _ in 0..5 {
            state = next_state(&state, true, now(), &ladder);
            assert_eq!(state.stage, ladder.max_stage());
        }
        assert_eq!(state.due_at, Some(now() + Duration::days(30)));
    }

    #[test]
    fn test_incorrect_answer_resets() {
        let ladder = IntervalLadder::default();
        for stage in 0..=ladder.max_stage() {
            let state = ItemState {
                stage,
                due_at: Some(now()),
            };
            let next = next_state(&state, false, now(), &ladder);
            assert_eq!(next.stage, 0);
            assert_eq!(next.due_at, Some(now()));
        }
    }

    #[test]
    fn test_order_buckets() {
        let states = [
            ItemState {
                stage: 1,
                due_at: Some(now() + Duration::hours(1)),
            },
            ItemState {
                stage: 4,
                due_at: Some(now() - Duration::hours(1)),
            },
            ItemState::default(),
        ];
        assert_eq!(order_indices(&states, now()), vec![2, 1, 0]);
    }

    #[test]
    fn test_order_tie_breaks() {
        let due = Some(now() - Duration::minutes(10));
        let states = [
            ItemState { stage: 3, due_at: due },
            ItemState { stage: 1, due_at: due },
            ItemState { stage: 1, due_at: due },
            ItemState {
                stage: 5,
                due_at: Some(now() - Duration::hours(2)),
            },
        ];
        assert_eq!(order_indices(&states, now()), vec![3, 1, 2, 0]);
    }

    #[test]
    fn test_order_all_unseen_keeps_list_order() {
        let states = vec![ItemState::default(); 5];
        assert_eq!(order_indices(&states, now()), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(Duration::zero()), "now");
        assert_eq!(format_interval(Duration::minutes(30)), "30m");
        assert_eq!(format_interval(Duration::hours(12)), "12h");
        assert_eq!(format_interval(Duration::days(15)), "15d");
    }
}

//! Practice statistics records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::OrderMode;
use crate::resources::ResourceType;

/// One finished (or abandoned) practice session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub timestamp: DateTime<Utc>,
    pub resource_type: ResourceType,
    pub file_name: String,
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// Percentage, 0-100
    pub accuracy: f64,
    pub duration_seconds: i64,
    pub order_mode: OrderMode,
    pub completed: bool,
}

/// Totals for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    /// `YYYY-MM-DD`
    pub date: String,
    pub session_count: usize,
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub accuracy: f64,
}

impl DailySummary {
    pub fn from_records(date: impl Into<String>, records: &[SessionRecord]) -> Self {
        let total: usize = records.iter().map(|r| r.total).sum();
        let correct: usize = records.iter().map(|r| r.correct).sum();
        let incorrect: usize = records.iter().map(|r| r.incorrect).sum();

        Self {
            date: date.into(),
            session_count: records.len(),
            total,
            correct,
            incorrect,
            accuracy: accuracy(correct, total),
        }
    }
}

/// `correct / total` as a percentage; 0 when nothing was answered
pub fn accuracy(correct: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64 * 100.0
    }
}

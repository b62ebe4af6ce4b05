//! Practice statistics: a per-day session log and daily summaries

pub mod models;
pub mod storage;

pub use models::*;
pub use storage::{date_key, StatisticsError, StatisticsStorage};

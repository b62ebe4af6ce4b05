//! Spaced repetition for practice lists
//!
//! This module provides:
//! - A stage ladder scheduler (correct answers climb, mistakes reset)
//! - Review ordering that puts unseen and overdue items first
//! - Per-resource JSON sidecars behind a repository trait

pub mod algorithm;
pub mod models;
pub mod schedule;
pub mod storage;

pub use algorithm::IntervalLadder;
pub use models::*;
pub use schedule::{item_key, Schedule};
pub use storage::{JsonScheduleRepository, MemoryScheduleRepository, ScheduleError, ScheduleRepository};

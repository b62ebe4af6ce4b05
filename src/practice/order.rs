//! Practice order selection
//!
//! Turns the configured order mode into a permutation of item indices.
//! Articles are always read front to back. The scheduled mode falls back to
//! list order whenever its schedule cannot be used.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::OrderMode;
use crate::resources::Entry;
use crate::srs::{IntervalLadder, Schedule, ScheduleKey, ScheduleRepository};

/// Chosen order together with the mode actually in effect
pub struct OrderPlan {
    pub order: Vec<usize>,
    pub mode: OrderMode,
    /// Present only when the scheduled mode is in effect
    pub schedule: Option<Schedule>,
}

impl OrderPlan {
    fn sequential(len: usize) -> Self {
        Self {
            order: (0..len).collect(),
            mode: OrderMode::Sequential,
            schedule: None,
        }
    }
}

pub struct OrderCoordinator {
    repository: Arc<dyn ScheduleRepository>,
    ladder: IntervalLadder,
}

impl OrderCoordinator {
    pub fn new(repository: Arc<dyn ScheduleRepository>, ladder: IntervalLadder) -> Self {
        Self { repository, ladder }
    }

    pub fn plan(&self, key: ScheduleKey, entries: &[Entry], mode: OrderMode) -> OrderPlan {
        self.plan_with_rng(key, entries, mode, &mut rand::thread_rng())
    }

    pub fn plan_with_rng<R: Rng + ?Sized>(
        &self,
        key: ScheduleKey,
        entries: &[Entry],
        mode: OrderMode,
        rng: &mut R,
    ) -> OrderPlan {
        if key.resource_type.is_article() {
            return OrderPlan::sequential(entries.len());
        }

        match mode {
            OrderMode::Sequential => OrderPlan::sequential(entries.len()),
            OrderMode::Random => {
                let mut order: Vec<usize> = (0..entries.len()).collect();
                order.shuffle(rng);
                OrderPlan {
                    order,
                    mode: OrderMode::Random,
                    schedule: None,
                }
            }
            OrderMode::Ebbinghaus => self.scheduled(key, entries),
        }
    }

    fn scheduled(&self, key: ScheduleKey, entries: &[Entry]) -> OrderPlan {
        let file_name = key.file_name.clone();
        let schedule = match Schedule::load(self.repository.clone(), key, self.ladder.clone(), entries) {
            Ok(schedule) => schedule,
            Err(e) => {
                log::warn!("Schedule unavailable for {}, using list order: {}", file_name, e);
                return OrderPlan::sequential(entries.len());
            }
        };

        let order = schedule.order(entries);
        if order.len() != entries.len() {
            log::warn!(
                "Schedule for {} ordered {} of {} items, using list order",
                file_name,
                order.len(),
                entries.len()
            );
            return OrderPlan::sequential(entries.len());
        }

        OrderPlan {
            order,
            mode: OrderMode::Ebbinghaus,
            schedule: Some(schedule),
        }
    }
}

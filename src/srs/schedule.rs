//! Review schedule for one resource file

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::algorithm::{next_state, order_indices, IntervalLadder};
use super::models::{ItemState, ScheduleDocument, ScheduleKey};
use super::storage::{Result, ScheduleError, ScheduleRepository};
use crate::resources::io as resource_io;
use crate::resources::{Entry, ResourceContext, ResourceId, ResourceType};

/// Key an entry is tracked under: its trimmed primary text, so editing a
/// translation keeps the memory state
pub fn item_key(entry: &Entry) -> String {
    let key = entry.primary.trim();
    if key.is_empty() {
        entry.to_line().trim().to_string()
    } else {
        key.to_string()
    }
}

/// Loaded schedule, saved back after every mutation
pub struct Schedule {
    key: ScheduleKey,
    document: ScheduleDocument,
    ladder: IntervalLadder,
    repository: Arc<dyn ScheduleRepository>,
}

impl Schedule {
    /// Load the schedule for `key` and start tracking any entry it does not
    /// know yet (stage 0, never answered).
    ///
    /// Corrupt stored state is logged and replaced by an empty schedule.
    pub fn load(
        repository: Arc<dyn ScheduleRepository>,
        key: ScheduleKey,
        ladder: IntervalLadder,
        entries: &[Entry],
    ) -> Result<Self> {
        let mut document = match repository.load_schedule(&key) {
            Ok(document) => document,
            Err(ScheduleError::CorruptState(msg)) => {
                log::warn!("Discarding corrupt schedule for {}: {}", key.file_name, msg);
                ScheduleDocument::default()
            }
            Err(e) => return Err(e),
        };

        let max_stage = ladder.max_stage();
        for state in document.items.values_mut() {
            state.stage = state.stage.min(max_stage);
        }
        for entry in entries {
            document.items.entry(item_key(entry)).or_default();
        }

        let schedule = Self {
            key,
            document,
            ladder,
            repository,
        };
        schedule.save()?;
        Ok(schedule)
    }

    /// Read a resource and load its schedule
    pub fn open(
        repository: Arc<dyn ScheduleRepository>,
        ctx: &ResourceContext,
        resource_type: ResourceType,
        identifier: &str,
        ladder: IntervalLadder,
    ) -> Result<(Self, Vec<Entry>)> {
        let id = ResourceId::parse(identifier);
        let entries: Vec<Entry> = resource_io::read(ctx, resource_type, &id)?
            .into_iter()
            .filter(|entry| !entry.is_blank())
            .collect();
        let key = ScheduleKey::new(&ctx.language, resource_type, id.to_string());
        let schedule = Self::load(repository, key, ladder, &entries)?;
        Ok((schedule, entries))
    }

    fn save(&self) -> Result<()> {
        self.repository.save_schedule(&self.key, &self.document)
    }

    pub fn key(&self) -> &ScheduleKey {
        &self.key
    }

    pub fn ladder(&self) -> &IntervalLadder {
        &self.ladder
    }

    /// Number of tracked items
    pub fn len(&self) -> usize {
        self.document.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document.items.is_empty()
    }

    /// Current state of an entry; untracked entries read as unseen
    pub fn state(&self, entry: &Entry) -> ItemState {
        self.document
            .items
            .get(&item_key(entry))
            .copied()
            .unwrap_or_default()
    }

    /// Practice order for `entries` as a permutation of their indices
    pub fn order(&self, entries: &[Entry]) -> Vec<usize> {
        self.order_at(entries, Utc::now())
    }

    pub fn order_at(&self, entries: &[Entry], now: DateTime<Utc>) -> Vec<usize> {
        let states: Vec<ItemState> = entries.iter().map(|entry| self.state(entry)).collect();
        order_indices(&states, now)
    }

    /// Record an answer and persist the new state
    pub fn record_result(&mut self, entry: &Entry, correct: bool) -> Result<ItemState> {
        self.record_result_at(entry, correct, Utc::now())
    }

    pub fn record_result_at(&mut self, entry: &Entry, correct: bool, now: DateTime<Utc>) -> Result<ItemState> {
        let state = next_state(&self.state(entry), correct, now, &self.ladder);
        self.document.items.insert(item_key(entry), state);
        self.save()?;
        Ok(state)
    }

    /// Stop tracking an entry. Returns whether it was tracked.
    pub fn remove_item(&mut self, entry: &Entry) -> Result<bool> {
        let removed = self.document.items.remove(&item_key(entry)).is_some();
        self.save()?;
        Ok(removed)
    }
}

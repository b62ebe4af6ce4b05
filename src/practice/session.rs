//! A single practice run over one resource

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use thiserror::Error;

use super::matching::{expected_input, is_correct};
use super::order::OrderCoordinator;
use crate::bookmarks::{self, BookmarkError, BookmarkList};
use crate::config::{MatchMode, OrderMode, Settings};
use crate::resources::io as resource_io;
use crate::resources::{Entry, ResourceContext, ResourceError, ResourceId, ResourceType};
use crate::srs::{Schedule, ScheduleError, ScheduleKey, ScheduleRepository};
use crate::statistics::{accuracy, SessionRecord};

#[derive(Error, Debug)]
pub enum PracticeError {
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("Bookmark error: {0}")]
    Bookmark(#[from] BookmarkError),

    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("The session has no current item")]
    Finished,
}

pub type Result<T> = std::result::Result<T, PracticeError>;

/// Result of one submitted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub expected: String,
    /// Translation of the answered entry, if it has one
    pub translation: Option<String>,
}

/// End-of-session figures
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub resource_type: ResourceType,
    pub file_name: String,
    /// Answers submitted, right or wrong
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub accuracy: f64,
    pub duration_seconds: i64,
    pub order_mode: OrderMode,
    pub completed: bool,
}

impl SessionSummary {
    pub fn to_record(&self, timestamp: DateTime<Utc>) -> SessionRecord {
        SessionRecord {
            timestamp,
            resource_type: self.resource_type,
            file_name: self.file_name.clone(),
            total: self.total,
            correct: self.correct,
            incorrect: self.incorrect,
            accuracy: self.accuracy,
            duration_seconds: self.duration_seconds,
            order_mode: self.order_mode,
            completed: self.completed,
        }
    }
}

pub struct PracticeSession {
    ctx: ResourceContext,
    resource_type: ResourceType,
    identifier: String,
    items: Vec<Entry>,
    order: Vec<usize>,
    /// Items done so far; also the position in `order`
    position: usize,
    initial_count: usize,
    mode: OrderMode,
    schedule: Option<Schedule>,
    match_mode: MatchMode,
    show_translation: bool,
    correct: usize,
    incorrect: usize,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

impl PracticeSession {
    /// Read the resource, drop blank and marked entries, and pick the order.
    ///
    /// Marked entries are kept when practicing one of the bookmark lists
    /// itself.
    pub fn start(
        ctx: &ResourceContext,
        settings: &Settings,
        resource_type: ResourceType,
        identifier: &str,
        repository: Arc<dyn ScheduleRepository>,
    ) -> Result<Self> {
        Self::start_with_rng(ctx, settings, resource_type, identifier, repository, &mut rand::thread_rng())
    }

    pub fn start_with_rng<R: Rng + ?Sized>(
        ctx: &ResourceContext,
        settings: &Settings,
        resource_type: ResourceType,
        identifier: &str,
        repository: Arc<dyn ScheduleRepository>,
        rng: &mut R,
    ) -> Result<Self> {
        let id = ResourceId::parse(identifier);
        let identifier = id.to_string();

        let mut items: Vec<Entry> = resource_io::read(ctx, resource_type, &id)?
            .into_iter()
            .filter(|entry| !entry.is_blank())
            .collect();

        if bookmarks::supports_mark(resource_type) && !bookmarks::is_special_list(&identifier) && !items.is_empty() {
            let marked = bookmarks::items(ctx, resource_type, BookmarkList::Marked)?;
            items.retain(|entry| !marked.contains(entry));
        }

        let key = ScheduleKey::new(&ctx.language, resource_type, &identifier);
        let plan = if items.is_empty() {
            None
        } else {
            let coordinator = OrderCoordinator::new(repository, settings.ladder());
            Some(coordinator.plan_with_rng(key, &items, settings.next_one_order, rng))
        };
        let (order, mode, schedule) = match plan {
            Some(plan) => (plan.order, plan.mode, plan.schedule),
            None => (Vec::new(), settings.next_one_order, None),
        };

        log::info!(
            "Starting {} practice on {} ({} items, {} order)",
            resource_type,
            identifier,
            items.len(),
            mode
        );

        Ok(Self {
            ctx: ctx.clone(),
            resource_type,
            identifier,
            initial_count: order.len(),
            items,
            order,
            position: 0,
            mode,
            schedule,
            match_mode: settings.correctness_match_mode,
            show_translation: settings.show_translation,
            correct: 0,
            incorrect: 0,
            started_at: Utc::now(),
            ended_at: None,
        }
        .finish_if_exhausted())
    }

    fn finish_if_exhausted(mut self) -> Self {
        if self.position >= self.order.len() {
            self.finish();
        }
        self
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Order mode actually in effect
    pub fn mode(&self) -> OrderMode {
        self.mode
    }

    pub fn show_translation(&self) -> bool {
        self.show_translation
    }

    pub fn is_scheduled(&self) -> bool {
        self.schedule.is_some()
    }

    pub fn current(&self) -> Option<&Entry> {
        self.order
            .get(self.position)
            .and_then(|&index| self.items.get(index))
    }

    /// `(done, total)` for progress display
    pub fn progress(&self) -> (usize, usize) {
        (self.position.min(self.order.len()), self.order.len())
    }

    pub fn is_finished(&self) -> bool {
        self.ended_at.is_some()
    }

    /// Check an answer for the current item.
    ///
    /// A correct answer moves on; a wrong one keeps the same item up. The
    /// schedule, when active, is updated before anything else changes.
    pub fn submit(&mut self, answer: &str) -> Result<AnswerOutcome> {
        let entry = self.current().cloned().ok_or(PracticeError::Finished)?;
        let expected = expected_input(&entry);
        let correct = is_correct(answer, &expected, self.match_mode);

        if let Some(schedule) = self.schedule.as_mut() {
            schedule.record_result(&entry, correct)?;
        }

        if correct {
            self.correct += 1;
            self.advance();
        } else {
            self.incorrect += 1;
        }

        Ok(AnswerOutcome {
            correct,
            translation: entry.has_translation().then(|| entry.translation.clone()),
            expected,
        })
    }

    /// Move on without answering
    pub fn skip(&mut self) -> Result<()> {
        if self.current().is_none() {
            return Err(PracticeError::Finished);
        }
        self.advance();
        Ok(())
    }

    fn advance(&mut self) {
        self.position += 1;
        if self.position >= self.order.len() {
            self.finish();
        }
    }

    fn forget(&mut self, entry: &Entry) -> Result<()> {
        if let Some(schedule) = self.schedule.as_mut() {
            schedule.remove_item(entry)?;
        }
        Ok(())
    }

    /// Drop the current item from this session and from the schedule.
    /// Returns the removed entry.
    pub fn remove_current(&mut self) -> Result<Entry> {
        let index = *self.order.get(self.position).ok_or(PracticeError::Finished)?;
        let entry = self.items.remove(index);
        self.forget(&entry)?;

        self.order.remove(self.position);
        for i in self.order.iter_mut() {
            if *i > index {
                *i -= 1;
            }
        }

        if self.position >= self.order.len() {
            self.finish();
        }
        Ok(entry)
    }

    /// Add the current item to a bookmark list and move past it.
    /// Returns `false` when it was already in the list.
    fn bookmark_current(&mut self, list: BookmarkList) -> Result<bool> {
        let entry = self.current().cloned().ok_or(PracticeError::Finished)?;
        if !bookmarks::add(&self.ctx, self.resource_type, list, &entry)? {
            return Ok(false);
        }
        self.forget(&entry)?;
        self.advance();
        Ok(true)
    }

    /// Take the current item off a bookmark list. While practicing that very
    /// list the item also leaves the session.
    fn unbookmark_current(&mut self, list: BookmarkList) -> Result<bool> {
        let entry = self.current().cloned().ok_or(PracticeError::Finished)?;
        if !bookmarks::remove(&self.ctx, self.resource_type, list, &entry)? {
            return Ok(false);
        }
        if BookmarkList::from_name(&self.identifier) == Some(list) {
            self.remove_current()?;
        } else {
            self.forget(&entry)?;
            self.advance();
        }
        Ok(true)
    }

    pub fn mark_current(&mut self) -> Result<bool> {
        self.bookmark_current(BookmarkList::Marked)
    }

    pub fn unmark_current(&mut self) -> Result<bool> {
        self.unbookmark_current(BookmarkList::Marked)
    }

    pub fn favorite_current(&mut self) -> Result<bool> {
        self.bookmark_current(BookmarkList::Favorite)
    }

    pub fn unfavorite_current(&mut self) -> Result<bool> {
        self.unbookmark_current(BookmarkList::Favorite)
    }

    /// End the session now; later calls keep the first end time
    pub fn finish(&mut self) {
        if self.ended_at.is_none() {
            self.ended_at = Some(Utc::now());
        }
    }

    pub fn summary(&self) -> SessionSummary {
        let total = self.correct + self.incorrect;
        let ended_at = self.ended_at.unwrap_or_else(Utc::now);
        SessionSummary {
            resource_type: self.resource_type,
            file_name: self.identifier.clone(),
            total,
            correct: self.correct,
            incorrect: self.incorrect,
            accuracy: accuracy(self.correct, total),
            duration_seconds: (ended_at - self.started_at).num_seconds().max(0),
            order_mode: self.mode,
            completed: self.initial_count > 0 && self.position >= self.order.len(),
        }
    }
}

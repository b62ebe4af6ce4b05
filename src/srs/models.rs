//! Data models for the review scheduler

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::resources::ResourceType;

/// Memory state of one practice item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemState {
    /// Index into the interval ladder
    #[serde(default)]
    pub stage: usize,
    /// Next review time; unset until the item is first answered
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_due_at"
    )]
    pub due_at: Option<DateTime<Utc>>,
}

impl ItemState {
    pub fn is_unseen(&self) -> bool {
        self.due_at.is_none()
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        matches!(self.due_at, Some(due) if due < now)
    }
}

/// Sidecars written by older builds store `0001-01-01T00:00:00Z` for items
/// that were never answered. Treat that (and `null`) as unset.
fn deserialize_due_at<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<DateTime<Utc>> = Option::deserialize(deserializer)?;
    Ok(value.filter(|due| due.year() > 1))
}

/// On-disk shape of one schedule sidecar
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDocument {
    #[serde(default)]
    pub items: BTreeMap<String, ItemState>,
}

/// Identifies the schedule of one resource file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScheduleKey {
    pub language: String,
    pub resource_type: ResourceType,
    /// Resource identifier, e.g. `travel/verbs`
    pub file_name: String,
}

impl ScheduleKey {
    pub fn new(language: impl Into<String>, resource_type: ResourceType, file_name: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            resource_type,
            file_name: file_name.into(),
        }
    }

    /// Flat file stem for the sidecar: extension dropped, separators
    /// flattened to `_`
    pub fn sidecar_name(&self) -> String {
        let name = self.file_name.trim();
        let name = name.strip_suffix(".txt").unwrap_or(name).trim();
        let name = name.replace(['/', '\\'], "_");
        if name.is_empty() {
            "default".to_string()
        } else {
            name
        }
    }
}

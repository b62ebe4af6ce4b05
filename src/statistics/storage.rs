//! Per-day session log
//!
//! Directory structure:
//! ```text
//! <user-data>/statistics/
//! └── {YYYY-MM-DD}.json    # Array of session records, local date
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Local, Utc};
use thiserror::Error;

use super::models::{DailySummary, SessionRecord};
use crate::resources::store::write_atomic;

#[derive(Error, Debug)]
pub enum StatisticsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StatisticsError>;

/// Local calendar day a timestamp is filed under
pub fn date_key(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

pub struct StatisticsStorage {
    dir: PathBuf,
}

impl StatisticsStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn day_path(&self, date: &str) -> PathBuf {
        self.dir.join(format!("{}.json", date))
    }

    /// Append a record to its day file
    pub fn log_session(&self, record: &SessionRecord) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let date = date_key(record.timestamp);

        let mut records = self.read_day(&date)?;
        records.push(record.clone());

        let json = serde_json::to_string_pretty(&records)?;
        write_atomic(&self.day_path(&date), &json)?;
        log::debug!("Logged {} session for {}", record.resource_type, date);
        Ok(())
    }

    fn read_day(&self, date: &str) -> Result<Vec<SessionRecord>> {
        let content = match fs::read_to_string(self.day_path(date)) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Records of one day, newest first
    pub fn sessions_by_date(&self, date: &str) -> Result<Vec<SessionRecord>> {
        let mut records = self.read_day(date.trim())?;
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(records)
    }

    /// One summary per logged day, newest day first
    pub fn daily_summaries(&self) -> Result<Vec<DailySummary>> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut summaries = Vec::new();
        for entry in read_dir {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            let Some(date) = name.strip_suffix(".json") else {
                continue;
            };

            let records = self.read_day(date)?;
            summaries.push(DailySummary::from_records(date, &records));
        }

        summaries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrderMode;
    use crate::statistics::models::accuracy;
    use crate::resources::ResourceType;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn create_test_storage() -> (StatisticsStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = StatisticsStorage::new(temp_dir.path().join("statistics"));
        (storage, temp_dir)
    }

    fn record(timestamp: DateTime<Utc>, total: usize, correct: usize) -> SessionRecord {
        SessionRecord {
            timestamp,
            resource_type: ResourceType::Words,
            file_name: "verbs".to_string(),
            total,
            correct,
            incorrect: total - correct,
            accuracy: accuracy(correct, total),
            duration_seconds: 60,
            order_mode: OrderMode::Sequential,
            completed: true,
        }
    }

    #[test]
    fn test_empty_statistics() {
        let (storage, _temp) = create_test_storage();
        assert!(storage.daily_summaries().unwrap().is_empty());
        assert!(storage.sessions_by_date("2024-05-01").unwrap().is_empty());
    }

    #[test]
    fn test_log_and_read_sessions() {
        let (storage, _temp) = create_test_storage();
        // Noon UTC stays on the same local day across common offsets
        let morning = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let later = morning + Duration::minutes(30);

        storage.log_session(&record(morning, 10, 8)).unwrap();
        storage.log_session(&record(later, 10, 6)).unwrap();

        let date = date_key(morning);
        let sessions = storage.sessions_by_date(&date).unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].timestamp, later);

        let summaries = storage.daily_summaries().unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].date, date);
        assert_eq!(summaries[0].session_count, 2);
        assert_eq!(summaries[0].total, 20);
        assert_eq!(summaries[0].correct, 14);
        assert_eq!(summaries[0].accuracy, 70.0);
    }

    #[test]
    fn test_summaries_newest_first() {
        let (storage, _temp) = create_test_storage();
        let first = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let second = first + Duration::days(3);

        storage.log_session(&record(first, 1, 1)).unwrap();
        storage.log_session(&record(second, 2, 0)).unwrap();

        let summaries = storage.daily_summaries().unwrap();
        let dates: Vec<&str> = summaries.iter().map(|s| s.date.as_str()).collect();
        assert_eq!(dates, vec![date_key(second), date_key(first)]);
        assert_eq!(summaries[0].accuracy, 0.0);
    }
}

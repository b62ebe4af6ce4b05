//! Persisted user settings

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resources::store::write_atomic;
use crate::srs::IntervalLadder;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Could not determine home directory")]
    HomeDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// How the next practice item is picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderMode {
    Sequential,
    #[default]
    Random,
    /// Spaced repetition schedule
    Ebbinghaus,
}

impl OrderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Random => "random",
            Self::Ebbinghaus => "ebbinghaus",
        }
    }
}

impl fmt::Display for OrderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "random" => Ok(Self::Random),
            "ebbinghaus" | "srs" => Ok(Self::Ebbinghaus),
            _ => Err(ConfigError::InvalidValue(format!("order mode '{}'", s))),
        }
    }
}

/// How a typed answer is compared to the expected text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    #[default]
    ExactMatch,
    /// Case and punctuation insensitive
    WordMatch,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExactMatch => "exact_match",
            Self::WordMatch => "word_match",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "exact_match" | "exact" => Ok(Self::ExactMatch),
            "word_match" | "word" => Ok(Self::WordMatch),
            _ => Err(ConfigError::InvalidValue(format!("match mode '{}'", s))),
        }
    }
}

/// Keys accepted by [`Settings::set`]
pub const SETTABLE_KEYS: [&str; 4] = [
    "next_one_order",
    "correctness_match_mode",
    "show_translation",
    "input_keyboard_sound",
];

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue(format!("{} '{}'", key, value))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub languages: Vec<String>,
    pub current_language: String,
    pub next_one_order: OrderMode,
    pub correctness_match_mode: MatchMode,
    pub show_translation: bool,
    pub input_keyboard_sound: bool,
    /// Replaces the default review ladder when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_intervals_secs: Option<Vec<u64>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            languages: vec!["english".to_string(), "japanese".to_string()],
            current_language: "english".to_string(),
            next_one_order: OrderMode::default(),
            correctness_match_mode: MatchMode::default(),
            show_translation: true,
            input_keyboard_sound: false,
            review_intervals_secs: None,
        }
    }
}

impl Settings {
    /// Load settings; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No config at {:?}, using defaults", path);
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        write_atomic(path, &content)?;
        Ok(())
    }

    pub fn list_languages(&self) -> &[String] {
        &self.languages
    }

    pub fn is_supported_language(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
    }

    /// Make `language` current and persist the change
    pub fn switch_language(&mut self, language: &str, path: &Path) -> Result<()> {
        if !self.is_supported_language(language) {
            return Err(ConfigError::UnsupportedLanguage(language.to_string()));
        }
        self.current_language = language.to_string();
        self.save(path)?;
        log::info!("Switched language to {}", language);
        Ok(())
    }

    /// Change one setting from its text form. The caller saves.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key.trim() {
            "next_one_order" => self.next_one_order = value.parse()?,
            "correctness_match_mode" => self.correctness_match_mode = value.parse()?,
            "show_translation" => self.show_translation = parse_flag(key, value)?,
            "input_keyboard_sound" => self.input_keyboard_sound = parse_flag(key, value)?,
            other => return Err(ConfigError::InvalidValue(format!("unknown setting '{}'", other))),
        }
        log::debug!("Set {} = {}", key.trim(), value.trim());
        Ok(())
    }

    /// Review ladder, honouring a configured override
    pub fn ladder(&self) -> IntervalLadder {
        self.review_intervals_secs
            .as_deref()
            .and_then(IntervalLadder::from_secs)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::load(&temp.path().join("config.toml")).unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.current_language, "english");
        assert_eq!(settings.next_one_order, OrderMode::Random);
        assert_eq!(settings.correctness_match_mode, MatchMode::ExactMatch);
        assert!(settings.show_translation);
        assert_eq!(settings.ladder(), IntervalLadder::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "current_language = \"japanese\"\nnext_one_order = \"ebbinghaus\"\ncorrectness_match_mode = \"word_match\"\nreview_intervals_secs = [0, 60]\n",
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.current_language, "japanese");
        assert_eq!(settings.next_one_order, OrderMode::Ebbinghaus);
        assert_eq!(settings.correctness_match_mode, MatchMode::WordMatch);
        assert_eq!(settings.languages, vec!["english", "japanese"]);
        assert_eq!(settings.ladder().max_stage(), 1);
    }

    #[test]
    fn test_invalid_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "next_one_order = \"sometimes\"\n").unwrap();

        assert!(matches!(Settings::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_switch_language_persists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("home/config.toml");
        let mut settings = Settings::default();

        settings.switch_language("japanese", &path).unwrap();
        assert_eq!(Settings::load(&path).unwrap().current_language, "japanese");

        let err = settings.switch_language("klingon", &path).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedLanguage(ref l) if l == "klingon"));
        assert_eq!(settings.current_language, "japanese");
    }

    #[test]
    fn test_set_then_reload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        let mut settings = Settings::default();

        settings.set("next_one_order", "sequential").unwrap();
        settings.set("correctness_match_mode", "word").unwrap();
        settings.set("show_translation", "off").unwrap();
        settings.set("input_keyboard_sound", "true").unwrap();
        settings.save(&path).unwrap();

        let reloaded = Settings::load(&path).unwrap();
        assert_eq!(reloaded.next_one_order, OrderMode::Sequential);
        assert_eq!(reloaded.correctness_match_mode, MatchMode::WordMatch);
        assert!(!reloaded.show_translation);
        assert!(reloaded.input_keyboard_sound);
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut settings = Settings::default();

        assert!(matches!(settings.set("colour", "red"), Err(ConfigError::InvalidValue(_))));
        assert!(matches!(
            settings.set("correctness_match_mode", "fuzzy"),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(settings.set("show_translation", "maybe"), Err(ConfigError::InvalidValue(_))));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_match_mode_parse() {
        assert_eq!("Exact_Match".parse::<MatchMode>().unwrap(), MatchMode::ExactMatch);
        assert_eq!("word_match".parse::<MatchMode>().unwrap(), MatchMode::WordMatch);
        assert!("fuzzy".parse::<MatchMode>().is_err());
    }

    #[test]
    fn test_order_mode_parse() {
        assert_eq!("Sequential".parse::<OrderMode>().unwrap(), OrderMode::Sequential);
        assert_eq!("ebbinghaus".parse::<OrderMode>().unwrap(), OrderMode::Ebbinghaus);
        assert!("shuffle".parse::<OrderMode>().is_err());
    }
}

//! Application paths and user settings

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{ConfigError, MatchMode, OrderMode, Settings, SETTABLE_KEYS};

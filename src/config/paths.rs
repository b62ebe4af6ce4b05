//! Application directory layout
//!
//! ```text
//! <app-home>/                 ($MLLT_HOME or ~/.mllt-cli)
//! ├── config.toml
//! ├── resources/              # bundled content, read-only
//! └── user-data/              # user overlay
//!     ├── srs/
//!     └── statistics/
//! ```

use std::path::{Path, PathBuf};

use super::settings::{ConfigError, Result};
use crate::resources::{ResourceContext, ResourceStorage};

/// Environment variable overriding the application home
pub const HOME_ENV: &str = "MLLT_HOME";

const APP_DIR_NAME: &str = ".mllt-cli";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    home: PathBuf,
}

impl AppPaths {
    pub fn new(home: PathBuf) -> Self {
        Self { home }
    }

    /// `$MLLT_HOME` when set, otherwise `~/.mllt-cli`
    pub fn resolve() -> Result<Self> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::new(PathBuf::from(home)));
        }
        dirs::home_dir()
            .map(|home| Self::new(home.join(APP_DIR_NAME)))
            .ok_or(ConfigError::HomeDirNotFound)
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn config_file(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Read-only bundled resources
    pub fn base_root(&self) -> PathBuf {
        self.home.join("resources")
    }

    /// Writable user overlay
    pub fn user_root(&self) -> PathBuf {
        self.home.join("user-data")
    }

    pub fn srs_dir(&self) -> PathBuf {
        self.user_root().join("srs")
    }

    pub fn statistics_dir(&self) -> PathBuf {
        self.user_root().join("statistics")
    }

    /// Resource context for a language
    pub fn context(&self, language: &str) -> ResourceContext {
        ResourceContext::new(language, self.base_root(), self.user_root())
    }

    pub fn resources(&self, language: &str) -> ResourceStorage {
        ResourceStorage::new(self.context(language))
    }
}

use std::sync::Arc;

use anyhow::{bail, Context, Result};

use mllt_lib::config::{AppPaths, Settings};
use mllt_lib::resources::{ResourceContext, ResourceStorage, ResourceType};
use mllt_lib::srs::{JsonScheduleRepository, ScheduleRepository};
use mllt_lib::statistics::StatisticsStorage;

/// Shared application state for CLI commands
pub struct App {
    pub paths: AppPaths,
    pub settings: Settings,
    pub resources: ResourceStorage,
    pub schedules: Arc<JsonScheduleRepository>,
    pub statistics: StatisticsStorage,
}

impl App {
    /// Initialize from the application home, optionally overriding the
    /// configured language for this call only
    pub fn new(language: Option<&str>) -> Result<Self> {
        let paths = AppPaths::resolve().context("Failed to resolve application directory")?;
        let settings = Settings::load(&paths.config_file())
            .with_context(|| format!("Failed to read {}", paths.config_file().display()))?;

        let language = match language {
            Some(lang) => {
                let lang = lang.trim().to_lowercase();
                if !settings.is_supported_language(&lang) {
                    bail!(
                        "Unsupported language '{}'. Available languages: {}",
                        lang,
                        settings.list_languages().join(", ")
                    );
                }
                lang
            }
            None => settings.current_language.clone(),
        };

        log::debug!("Using {} at {}", language, paths.home().display());

        Ok(Self {
            resources: paths.resources(&language),
            schedules: Arc::new(JsonScheduleRepository::new(paths.srs_dir())),
            statistics: StatisticsStorage::new(paths.statistics_dir()),
            paths,
            settings,
        })
    }

    pub fn context(&self) -> &ResourceContext {
        self.resources.context()
    }

    pub fn language(&self) -> &str {
        self.resources.language()
    }

    pub fn schedule_repository(&self) -> Arc<dyn ScheduleRepository> {
        self.schedules.clone()
    }

    /// Find an identifier among a type's files: exact match first, then a
    /// unique case-insensitive prefix match
    pub fn find_file(&self, resource_type: ResourceType, name: &str) -> Result<String> {
        let files = self
            .resources
            .list_files(resource_type)
            .with_context(|| format!("Failed to list {}", resource_type))?;

        let name = name.trim().trim_end_matches(".txt");
        if let Some(found) = files.iter().find(|f| f.as_str() == name) {
            return Ok(found.clone());
        }

        let name_lower = name.to_lowercase();
        let matches: Vec<&String> = files
            .iter()
            .filter(|f| f.to_lowercase().starts_with(&name_lower))
            .collect();

        match matches.len() {
            0 => bail!(
                "No {} resource matching '{}'. Available:\n{}",
                resource_type,
                name,
                files.iter().map(|f| format!("  - {}", f)).collect::<Vec<_>>().join("\n")
            ),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous name '{}'. Matches:\n{}",
                name,
                matches.iter().map(|f| format!("  - {}", f)).collect::<Vec<_>>().join("\n")
            ),
        }
    }
}

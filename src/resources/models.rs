//! Data models for practice resources

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::store::{DirStore, LayeredStore, ResourceError};

/// Kind of practice content. Each kind lives in its own directory under a
/// language root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Words,
    Phrases,
    Sentences,
    Articles,
}

impl ResourceType {
    pub const ALL: [ResourceType; 4] = [
        ResourceType::Words,
        ResourceType::Phrases,
        ResourceType::Sentences,
        ResourceType::Articles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Words => "words",
            Self::Phrases => "phrases",
            Self::Sentences => "sentences",
            Self::Articles => "articles",
        }
    }

    /// File extension (without the dot) used for this type on disk
    pub fn extension(&self) -> &'static str {
        "txt"
    }

    /// Articles are read as continuous text, never as drill items
    pub fn is_article(&self) -> bool {
        matches!(self, Self::Articles)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "words" => Ok(Self::Words),
            "phrases" => Ok(Self::Phrases),
            "sentences" => Ok(Self::Sentences),
            "articles" => Ok(Self::Articles),
            _ => Err(ResourceError::InvalidResourceType(s.to_string())),
        }
    }
}

/// Explicit storage context for every resource operation.
///
/// Holds the active language together with the two storage roots, so the
/// same process can work against several languages side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceContext {
    pub language: String,
    /// Read-only bundled content
    pub base_root: PathBuf,
    /// Writable user overlay
    pub user_root: PathBuf,
}

impl ResourceContext {
    pub fn new(language: impl Into<String>, base_root: PathBuf, user_root: PathBuf) -> Self {
        Self {
            language: language.into(),
            base_root,
            user_root,
        }
    }

    /// Same roots, different language
    pub fn with_language(&self, language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..self.clone()
        }
    }

    /// Path of a resource type directory relative to either root
    pub fn type_dir(&self, resource_type: ResourceType) -> PathBuf {
        PathBuf::from(&self.language).join(resource_type.as_str())
    }

    /// The user overlay stacked over the base layer
    pub fn store(&self) -> LayeredStore {
        LayeredStore::new(
            DirStore::writable(self.user_root.clone()),
            DirStore::read_only(self.base_root.clone()),
        )
    }
}

/// A folder of resources, merged across the base and user roots
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFolder {
    pub dir_name: String,
    pub display_name: String,
    pub files: Vec<String>,
}

/// One parsed line of a resource file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    pub primary: String,
    #[serde(default)]
    pub translation: String,
}

impl Entry {
    pub fn new(primary: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            primary: primary.into().trim().to_string(),
            translation: translation.into().trim().to_string(),
        }
    }

    pub fn has_translation(&self) -> bool {
        !self.translation.is_empty()
    }

    pub fn is_blank(&self) -> bool {
        self.primary.is_empty() && self.translation.is_empty()
    }
}

//! Folder name normalization and resource identifiers
//!
//! A resource is addressed by `folder/baseName`. The folder segment is left
//! out for the default folder, so identifiers written before folders existed
//! (plain `baseName`) keep working.

use std::fmt;

/// On-disk name of the default folder
pub const DEFAULT_FOLDER: &str = "default";

/// Label shown for the default folder; also accepted as input for it
pub const DEFAULT_FOLDER_LABEL: &str = "默认";

/// Base name used when an identifier carries no file name at all
const FALLBACK_BASE_NAME: &str = "resource";

const INVALID_FOLDER_CHARS: &str = "<>:\"/\\|?*";

const WINDOWS_RESERVED_NAMES: &[&str] = &[
    "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7", "com8",
    "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

/// Normalize a user-supplied folder name into a safe storage key.
///
/// Returns the canonical name and whether it differs from the trimmed input,
/// so callers can ask the user to confirm a renamed folder.
pub fn normalize_folder(input: &str) -> (String, bool) {
    normalize_folder_for(input, cfg!(windows))
}

fn normalize_folder_for(input: &str, windows: bool) -> (String, bool) {
    let trimmed = input.trim();
    let folder = trimmed.replace("..", "").replace('\\', "/");
    let folder = folder.trim_matches('/');

    let replaced: String = folder
        .chars()
        .map(|c| if is_invalid_folder_char(c) { '_' } else { c })
        .collect();
    let mut sanitized = replaced.trim().to_string();

    if windows {
        sanitized = sanitized.trim_matches(|c| c == '.' || c == ' ').to_string();
    }

    // Checked after every trim so leftovers like ".. ." cannot survive as "."
    if sanitized.is_empty() || sanitized == "." || sanitized == DEFAULT_FOLDER_LABEL {
        return (DEFAULT_FOLDER.to_string(), trimmed != DEFAULT_FOLDER);
    }

    if windows && WINDOWS_RESERVED_NAMES.contains(&sanitized.to_lowercase().as_str()) {
        sanitized = format!("_{}", sanitized);
    }

    let changed = sanitized != trimmed;
    (sanitized, changed)
}

fn is_invalid_folder_char(c: char) -> bool {
    c == '\0' || c.is_control() || INVALID_FOLDER_CHARS.contains(c)
}

/// Human label for a folder key
pub fn folder_display_name(dir: &str) -> String {
    if dir.is_empty() || dir == DEFAULT_FOLDER {
        DEFAULT_FOLDER_LABEL.to_string()
    } else {
        dir.to_string()
    }
}

fn clean_base_name(name: &str) -> String {
    let name = name.trim();
    let name = name.strip_suffix(".txt").unwrap_or(name);
    sanitize_base_name(name.trim().trim_matches('/'))
}

/// A base name is a single path component: separators and reserved glyphs
/// become `_`
fn sanitize_base_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if is_invalid_folder_char(c) { '_' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Build the canonical identifier string for a folder and base name
pub fn build_identifier(folder: &str, base_name: &str) -> String {
    let (folder, _) = normalize_folder(folder);
    let base_name = clean_base_name(base_name);

    if base_name.is_empty() {
        return folder;
    }
    if folder == DEFAULT_FOLDER {
        return base_name;
    }
    format!("{}/{}", folder, base_name)
}

/// Split an identifier into `(folder, baseName)`.
///
/// A plain name without a separator belongs to the default folder. Only the
/// first separator splits; any later one is folded into the base name.
pub fn split_identifier(identifier: &str) -> (String, String) {
    let trimmed = identifier.trim().replace('\\', "/");
    let trimmed = trimmed.strip_suffix(".txt").unwrap_or(&trimmed);
    let trimmed = trimmed.trim_matches('/');

    if trimmed.is_empty() {
        return (DEFAULT_FOLDER.to_string(), String::new());
    }

    match trimmed.split_once('/') {
        None => (DEFAULT_FOLDER.to_string(), sanitize_base_name(trimmed)),
        Some((folder, rest)) => {
            let (folder, _) = normalize_folder(folder);
            (folder, sanitize_base_name(rest))
        }
    }
}

/// Display form of an identifier: `baseName` in the default folder,
/// `label/baseName` elsewhere
pub fn format_display_name(identifier: &str) -> String {
    let (folder, base_name) = split_identifier(identifier);
    let display_folder = folder_display_name(&folder);

    if base_name.is_empty() {
        display_folder
    } else if folder == DEFAULT_FOLDER {
        base_name
    } else {
        format!("{}/{}", display_folder, base_name)
    }
}

/// Parsed, canonical resource identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    folder: String,
    base_name: String,
}

impl ResourceId {
    pub fn new(folder: &str, base_name: &str) -> Self {
        Self::parse(&build_identifier(folder, base_name))
    }

    /// Parse any identifier string. Never fails; an empty base name falls
    /// back to a fixed placeholder.
    pub fn parse(identifier: &str) -> Self {
        let (folder, base_name) = split_identifier(identifier);
        let (folder, base_name) = if base_name.is_empty() && folder != DEFAULT_FOLDER {
            // "notes/ /" leaves an empty name; the lone segment is the file name
            (DEFAULT_FOLDER.to_string(), folder)
        } else {
            (folder, base_name)
        };
        let base_name = if base_name.is_empty() {
            FALLBACK_BASE_NAME.to_string()
        } else {
            base_name
        };

        Self { folder, base_name }
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn is_default_folder(&self) -> bool {
        self.folder == DEFAULT_FOLDER
    }

    /// File name on disk, extension included
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.base_name, extension)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default_folder() {
            f.write_str(&self.base_name)
        } else {
            write!(f, "{}/{}", self.folder, self.base_name)
        }
    }
}

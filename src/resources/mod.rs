//! Practice resources for each language
//!
//! This module provides:
//! - Folder name normalization and resource identifiers
//! - A read-only base root overlaid by a writable user root
//! - Path resolution with a fallback to the legacy flat layout
//! - Folder catalog merged across both roots
//! - Inline and paired line formats
//! - Import and deletion of user resources

pub mod catalog;
pub mod format;
pub mod identifier;
pub mod io;
pub mod locator;
pub mod manage;
pub mod models;
pub mod store;

pub use identifier::{
    build_identifier, folder_display_name, format_display_name, normalize_folder, split_identifier, ResourceId,
    DEFAULT_FOLDER, DEFAULT_FOLDER_LABEL,
};
pub use io::ResourceStorage;
pub use models::*;
pub use store::{ResourceError, Result};

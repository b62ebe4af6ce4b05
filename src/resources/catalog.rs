//! Folder and file enumeration across both storage roots

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use super::identifier::{build_identifier, folder_display_name, normalize_folder, DEFAULT_FOLDER};
use super::models::{ResourceContext, ResourceFolder, ResourceType};
use super::store::{ResourceError, ResourceStore, Result};

/// Strip the resource extension from a file name; `None` for other files
fn resource_base_name(name: &str, resource_type: ResourceType) -> Option<String> {
    let stem = Path::new(name)
        .extension()
        .filter(|ext| *ext == resource_type.extension())
        .and_then(|_| Path::new(name).file_stem())?
        .to_string_lossy()
        .to_string();

    if stem.is_empty() {
        None
    } else {
        Some(stem)
    }
}

fn collect(
    store: &dyn ResourceStore,
    ctx: &ResourceContext,
    resource_type: ResourceType,
    folders: &mut BTreeMap<String, BTreeSet<String>>,
) -> Result<()> {
    let type_dir = ctx.type_dir(resource_type);

    for entry in store.list(&type_dir)? {
        if entry.is_dir {
            let (folder, _) = normalize_folder(&entry.name);
            for child in store.list(&type_dir.join(&entry.name))? {
                if child.is_dir {
                    continue;
                }
                if let Some(name) = resource_base_name(&child.name, resource_type) {
                    folders.entry(folder.clone()).or_default().insert(name);
                }
            }
        } else if let Some(name) = resource_base_name(&entry.name, resource_type) {
            // Legacy flat layout: files directly under the type directory
            folders
                .entry(DEFAULT_FOLDER.to_string())
                .or_default()
                .insert(name);
        }
    }

    Ok(())
}

/// List folders for a resource type, merged across the base and user roots.
///
/// The default folder always comes first and is present even when nothing
/// was found; other folders and all files are sorted alphabetically.
pub fn list_folders(ctx: &ResourceContext, resource_type: ResourceType) -> Result<Vec<ResourceFolder>> {
    let store = ctx.store();
    let mut folders: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    collect(store.base(), ctx, resource_type, &mut folders).map_err(|e| {
        log::warn!("Failed to read base resources for {}: {}", resource_type, e);
        e
    })?;
    collect(store.user(), ctx, resource_type, &mut folders).map_err(|e| {
        log::warn!("Failed to read user resources for {}: {}", resource_type, e);
        e
    })?;

    if folders.is_empty() {
        folders.insert(DEFAULT_FOLDER.to_string(), BTreeSet::new());
    }

    let mut result: Vec<ResourceFolder> = folders
        .into_iter()
        .map(|(dir_name, files)| ResourceFolder {
            display_name: folder_display_name(&dir_name),
            dir_name,
            files: files.into_iter().collect(),
        })
        .collect();

    // BTreeMap already gives alphabetical order; only the default moves
    if let Some(pos) = result.iter().position(|f| f.dir_name == DEFAULT_FOLDER) {
        let default = result.remove(pos);
        result.insert(0, default);
    }

    Ok(result)
}

/// Every resource as an identifier string, folder-prefixed unless default
pub fn list_files(ctx: &ResourceContext, resource_type: ResourceType) -> Result<Vec<String>> {
    let folders = list_folders(ctx, resource_type)?;
    Ok(folders
        .iter()
        .flat_map(|folder| {
            folder
                .files
                .iter()
                .map(move |file| build_identifier(&folder.dir_name, file))
        })
        .collect())
}

/// Look up a single folder by (normalized) name
pub fn get_folder(ctx: &ResourceContext, resource_type: ResourceType, folder: &str) -> Result<ResourceFolder> {
    let (normalized, _) = normalize_folder(folder);
    list_folders(ctx, resource_type)?
        .into_iter()
        .find(|f| f.dir_name == normalized)
        .ok_or_else(|| ResourceError::NotFound(format!("folder '{}'", folder)))
}

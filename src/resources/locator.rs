//! Resource path resolution
//!
//! Read paths search, in order: the user overlay, the base root, and (for
//! the default folder only) the legacy flat layout without a folder segment
//! in both roots. Write paths always point into the user overlay.

use std::fs;
use std::path::PathBuf;

use super::identifier::ResourceId;
use super::models::{ResourceContext, ResourceType};
use super::store::{Layer, Result};

/// Canonical path of a resource relative to either root
pub fn canonical_rel_path(ctx: &ResourceContext, resource_type: ResourceType, id: &ResourceId) -> PathBuf {
    ctx.type_dir(resource_type)
        .join(id.folder())
        .join(id.file_name(resource_type.extension()))
}

/// Relative candidates in search order. Each is tried against the user layer
/// and then the base layer.
pub fn read_candidates(ctx: &ResourceContext, resource_type: ResourceType, id: &ResourceId) -> Vec<PathBuf> {
    let mut candidates = vec![canonical_rel_path(ctx, resource_type, id)];
    if id.is_default_folder() {
        candidates.push(
            ctx.type_dir(resource_type)
                .join(id.file_name(resource_type.extension())),
        );
    }
    candidates
}

/// Where a resource was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub layer: Layer,
    /// Relative to the layer root
    pub rel: PathBuf,
    pub path: PathBuf,
}

/// Find an existing resource file without touching the filesystem otherwise
pub fn locate(ctx: &ResourceContext, resource_type: ResourceType, id: &ResourceId) -> Option<Located> {
    let store = ctx.store();
    let candidates = read_candidates(ctx, resource_type, id);
    store.find(&candidates).map(|(layer, rel)| Located {
        layer,
        rel: rel.to_path_buf(),
        path: store.layer(layer).path(rel),
    })
}

/// Path to read a resource from. When the resource does not exist anywhere,
/// an empty file is created at the user-overlay canonical path.
pub fn resolve_read_path(ctx: &ResourceContext, resource_type: ResourceType, id: &ResourceId) -> Result<PathBuf> {
    if let Some(found) = locate(ctx, resource_type, id) {
        return Ok(found.path);
    }

    let rel = canonical_rel_path(ctx, resource_type, id);
    ctx.store().user().touch(&rel)
}

/// User-overlay canonical path, with its parent directories created
pub fn resolve_write_path(ctx: &ResourceContext, resource_type: ResourceType, id: &ResourceId) -> Result<PathBuf> {
    let path = ctx.user_root.join(canonical_rel_path(ctx, resource_type, id));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(path)
}

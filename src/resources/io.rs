//! Reading and writing resource entry lists
//!
//! [`ResourceStorage`] bundles a [`ResourceContext`] with every resource
//! operation so callers hold one value instead of threading the context
//! through each call.

use std::fs;
use std::path::Path;

use super::catalog;
use super::format::{parse_resource, render_resource};
use super::identifier::ResourceId;
use super::locator::{canonical_rel_path, resolve_read_path};
use super::manage;
use super::models::{Entry, ResourceContext, ResourceFolder, ResourceType};
use super::store::Result;

/// Read and parse a resource. A resource that does not exist yet reads as
/// empty (and an empty user file is created for it).
pub fn read(ctx: &ResourceContext, resource_type: ResourceType, id: &ResourceId) -> Result<Vec<Entry>> {
    let path = resolve_read_path(ctx, resource_type, id)?;
    let content = fs::read_to_string(&path)?;
    Ok(parse_resource(&content, resource_type))
}

/// Overwrite the user-overlay copy of a resource with `entries`.
///
/// The full file is rendered in memory first; the previous content stays in
/// place if the write fails.
pub fn write(ctx: &ResourceContext, resource_type: ResourceType, id: &ResourceId, entries: &[Entry]) -> Result<()> {
    let content = render_resource(entries, resource_type);
    let rel = canonical_rel_path(ctx, resource_type, id);
    ctx.store().write(&rel, &content)?;
    log::debug!("Wrote {} entries to {}/{}", entries.len(), resource_type, id);
    Ok(())
}

/// Resource operations bound to one context
#[derive(Debug, Clone)]
pub struct ResourceStorage {
    ctx: ResourceContext,
}

impl ResourceStorage {
    pub fn new(ctx: ResourceContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &ResourceContext {
        &self.ctx
    }

    pub fn language(&self) -> &str {
        &self.ctx.language
    }

    pub fn list_folders(&self, resource_type: ResourceType) -> Result<Vec<ResourceFolder>> {
        catalog::list_folders(&self.ctx, resource_type)
    }

    pub fn list_files(&self, resource_type: ResourceType) -> Result<Vec<String>> {
        catalog::list_files(&self.ctx, resource_type)
    }

    pub fn get_folder(&self, resource_type: ResourceType, folder: &str) -> Result<ResourceFolder> {
        catalog::get_folder(&self.ctx, resource_type, folder)
    }

    pub fn read(&self, resource_type: ResourceType, identifier: &str) -> Result<Vec<Entry>> {
        read(&self.ctx, resource_type, &ResourceId::parse(identifier))
    }

    pub fn write(&self, resource_type: ResourceType, identifier: &str, entries: &[Entry]) -> Result<()> {
        write(&self.ctx, resource_type, &ResourceId::parse(identifier), entries)
    }

    pub fn import(&self, resource_type: ResourceType, folder: &str, source: &Path) -> Result<String> {
        manage::import(&self.ctx, resource_type, folder, source)
    }

    pub fn delete(&self, resource_type: ResourceType, identifier: &str) -> Result<()> {
        manage::delete(&self.ctx, resource_type, identifier)
    }

    pub fn delete_folder(&self, resource_type: ResourceType, folder: &str) -> Result<()> {
        manage::delete_folder(&self.ctx, resource_type, folder)
    }
}

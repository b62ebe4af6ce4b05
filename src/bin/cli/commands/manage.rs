use std::path::Path;

use anyhow::{bail, Context, Result};

use mllt_lib::resources::locator::locate;
use mllt_lib::resources::store::Layer;
use mllt_lib::resources::{build_identifier, normalize_folder, ResourceId, ResourceType};

use crate::app::App;
use crate::OutputFormat;

pub fn run_import(
    app: &App,
    resource_type: ResourceType,
    source: &Path,
    folder: &str,
    force: bool,
    format: &OutputFormat,
) -> Result<()> {
    let (folder_key, renamed) = normalize_folder(folder);
    if renamed && !folder.trim().is_empty() {
        eprintln!("Folder '{}' will be stored as '{}'", folder.trim(), folder_key);
    }

    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let identifier = build_identifier(&folder_key, &stem);
    let existing = locate(app.context(), resource_type, &ResourceId::parse(&identifier))
        .filter(|found| found.layer == Layer::User);
    if let (Some(found), false) = (&existing, force) {
        bail!(
            "{} '{}' already exists at {}. Use --force to replace it.",
            resource_type,
            identifier,
            found.path.display()
        );
    }

    let identifier = app
        .resources
        .import(resource_type, &folder_key, source)
        .with_context(|| format!("Failed to import {}", source.display()))?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "identifier": identifier,
                "type": resource_type.as_str(),
                "language": app.language(),
                "replaced": existing.is_some(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Imported {} as {} '{}'", source.display(), resource_type, identifier);
            if existing.is_some() {
                println!("  (replaces the previous copy)");
            }
        }
    }

    Ok(())
}

pub fn run_delete(app: &App, resource_type: ResourceType, name: &str, format: &OutputFormat) -> Result<()> {
    let identifier = app.find_file(resource_type, name)?;
    app.resources
        .delete(resource_type, &identifier)
        .with_context(|| format!("Failed to delete {} '{}'", resource_type, identifier))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "deleted": identifier }));
        }
        OutputFormat::Plain => println!("Deleted {} '{}'", resource_type, identifier),
    }

    Ok(())
}

pub fn run_delete_folder(app: &App, resource_type: ResourceType, folder: &str, format: &OutputFormat) -> Result<()> {
    app.resources
        .delete_folder(resource_type, folder)
        .with_context(|| format!("Failed to delete folder '{}'", folder))?;

    let (folder_key, _) = normalize_folder(folder);
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "deletedFolder": folder_key }));
        }
        OutputFormat::Plain => println!("Deleted {} folder '{}'", resource_type, folder_key),
    }

    Ok(())
}

use anyhow::{Context, Result};

use mllt_lib::resources::{build_identifier, format_display_name, ResourceType};

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(
    app: &App,
    resource_type: ResourceType,
    folder_name: Option<&str>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let identifiers: Vec<String> = match folder_name {
        Some(name) => {
            let folder = app
                .resources
                .get_folder(resource_type, name)
                .with_context(|| format!("Folder '{}' not found", name))?;
            folder
                .files
                .iter()
                .map(|file| build_identifier(&folder.dir_name, file))
                .collect()
        }
        None => app
            .resources
            .list_files(resource_type)
            .with_context(|| format!("Failed to list {}", resource_type))?,
    };

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = identifiers
                .iter()
                .map(|id| {
                    serde_json::json!({
                        "identifier": id,
                        "displayName": format_display_name(id),
                        "type": resource_type.as_str(),
                        "language": app.language(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if identifiers.is_empty() {
                println!("No {} found.", resource_type);
                return Ok(());
            }

            let id_width = identifiers.iter().map(|id| id.chars().count()).max().unwrap_or(10).clamp(10, 40);

            println!("{:<width$} {}", "Identifier", "Display name", width = id_width);
            println!("{} {}", "\u{2500}".repeat(id_width), "\u{2500}".repeat(20));

            for id in &identifiers {
                let shown = terminal::truncate(id, id_width);
                let pad = id_width.saturating_sub(shown.chars().count());
                println!(
                    "{}{} {}",
                    terminal::bold(&shown, use_color),
                    " ".repeat(pad),
                    format_display_name(id)
                );
            }

            println!("\n{} {} total", identifiers.len(), resource_type);
        }
    }

    Ok(())
}

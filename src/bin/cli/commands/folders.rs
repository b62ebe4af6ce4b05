use anyhow::{Context, Result};

use mllt_lib::resources::ResourceType;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, resource_type: ResourceType, format: &OutputFormat, use_color: bool) -> Result<()> {
    let folders = app
        .resources
        .list_folders(resource_type)
        .with_context(|| format!("Failed to list {} folders", resource_type))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&folders)?);
        }
        OutputFormat::Plain => {
            for folder in &folders {
                println!(
                    "{} {}",
                    terminal::bold(&folder.display_name, use_color),
                    terminal::dim(&format!("({} files)", folder.files.len()), use_color)
                );
                if folder.files.is_empty() {
                    println!("    (empty)");
                }
                for file in &folder.files {
                    println!("    {}", file);
                }
            }
        }
    }

    Ok(())
}

use anyhow::{Context, Result};

use mllt_lib::bookmarks::{self, BookmarkList};
use mllt_lib::resources::{format_display_name, ResourceType};

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(
    app: &App,
    resource_type: ResourceType,
    name: &str,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let identifier = app.find_file(resource_type, name)?;
    let entries = app
        .resources
        .read(resource_type, &identifier)
        .with_context(|| format!("Failed to read {}", identifier))?;

    let marked = if bookmarks::supports_mark(resource_type) {
        bookmarks::items(app.context(), resource_type, BookmarkList::Marked)
            .context("Failed to read marked list")?
    } else {
        Vec::new()
    };

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = entries
                .iter()
                .map(|entry| {
                    serde_json::json!({
                        "primary": entry.primary,
                        "translation": entry.translation,
                        "marked": marked.contains(entry),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::bold(&format_display_name(&identifier), use_color));
            println!();

            if entries.is_empty() {
                println!("(empty)");
                return Ok(());
            }

            for entry in &entries {
                let flag = if marked.contains(entry) {
                    terminal::paint("*", terminal::Color::YELLOW, use_color)
                } else {
                    " ".to_string()
                };
                println!("{} {}", flag, terminal::render_entry(entry, use_color));
            }

            println!("\n{} entries", entries.len());
        }
    }

    Ok(())
}

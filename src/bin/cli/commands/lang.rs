use anyhow::{Context, Result};

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run_list(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let current = &app.settings.current_language;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "current": current,
                "languages": app.settings.list_languages(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for language in app.settings.list_languages() {
                if language == current {
                    println!("* {}", terminal::bold(language, use_color));
                } else {
                    println!("  {}", language);
                }
            }
        }
    }

    Ok(())
}

pub fn run_switch(app: &mut App, language: &str, format: &OutputFormat) -> Result<()> {
    let language = language.trim().to_lowercase();
    let config_file = app.paths.config_file();
    app.settings
        .switch_language(&language, &config_file)
        .with_context(|| format!("Failed to switch to '{}'", language))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "current": language }));
        }
        OutputFormat::Plain => println!("Current language: {}", language),
    }

    Ok(())
}

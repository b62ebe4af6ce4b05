use anyhow::{Context, Result};

use mllt_lib::config::SETTABLE_KEYS;

use crate::app::App;
use crate::OutputFormat;

pub fn run_show(app: &App, format: &OutputFormat) -> Result<()> {
    let settings = &app.settings;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(settings)?);
        }
        OutputFormat::Plain => {
            println!("current_language = {}", settings.current_language);
            println!("languages = {}", settings.list_languages().join(", "));
            println!("next_one_order = {}", settings.next_one_order);
            println!("correctness_match_mode = {}", settings.correctness_match_mode);
            println!("show_translation = {}", settings.show_translation);
            println!("input_keyboard_sound = {}", settings.input_keyboard_sound);
            if let Some(intervals) = &settings.review_intervals_secs {
                println!("review_intervals_secs = {:?}", intervals);
            }
        }
    }

    Ok(())
}

pub fn run_set(app: &mut App, key: &str, value: &str, format: &OutputFormat) -> Result<()> {
    app.settings
        .set(key, value)
        .with_context(|| format!("Settable keys: {}", SETTABLE_KEYS.join(", ")))?;

    let config_file = app.paths.config_file();
    app.settings
        .save(&config_file)
        .with_context(|| format!("Failed to write {}", config_file.display()))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "key": key.trim(), "value": value.trim() }));
        }
        OutputFormat::Plain => println!("{} = {}", key.trim(), value.trim()),
    }

    Ok(())
}

use anyhow::Result;

use mllt_lib::resources::{folder_display_name, normalize_folder};

use crate::OutputFormat;

pub fn run(folder: &str, format: &OutputFormat) -> Result<()> {
    let (normalized, changed) = normalize_folder(folder);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "input": folder,
                "folder": normalized,
                "displayName": folder_display_name(&normalized),
                "changed": changed,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if changed {
                println!("'{}' is stored as '{}'", folder.trim(), normalized);
            } else {
                println!("'{}' is stored unchanged", normalized);
            }
        }
    }

    Ok(())
}

use anyhow::{Context, Result};

use mllt_lib::bookmarks::{self, BookmarkList};
use mllt_lib::resources::{Entry, ResourceType};

use crate::app::App;
use crate::OutputFormat;

#[derive(Debug, Clone, Copy)]
pub enum Action {
    Mark,
    Unmark,
    Favorite,
    Unfavorite,
}

impl Action {
    fn list(self) -> BookmarkList {
        match self {
            Self::Mark | Self::Unmark => BookmarkList::Marked,
            Self::Favorite | Self::Unfavorite => BookmarkList::Favorite,
        }
    }

    fn adds(self) -> bool {
        matches!(self, Self::Mark | Self::Favorite)
    }
}

pub fn run(app: &App, resource_type: ResourceType, item: &str, action: Action, format: &OutputFormat) -> Result<()> {
    let list = action.list();
    let mut entry = Entry::from_item(item);
    if !action.adds() && !entry.has_translation() {
        if let Some(found) = bookmarks::find(app.context(), resource_type, list, &entry.primary)
            .with_context(|| format!("Failed to read {} list", list))?
        {
            entry = found;
        }
    }

    let changed = if action.adds() {
        bookmarks::add(app.context(), resource_type, list, &entry)
    } else {
        bookmarks::remove(app.context(), resource_type, list, &entry)
    }
    .with_context(|| format!("Failed to update {} list", list))?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "list": list.name(),
                "type": resource_type.as_str(),
                "primary": entry.primary,
                "translation": entry.translation,
                "changed": changed,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let message = match (action.adds(), changed) {
                (true, true) => "Added to",
                (true, false) => "Already in",
                (false, true) => "Removed from",
                (false, false) => "Not in",
            };
            println!("{} {} ({}): {}", message, list, resource_type, entry.to_line());
        }
    }

    Ok(())
}

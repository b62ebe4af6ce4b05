use anyhow::{Context, Result};
use chrono::Utc;

use mllt_lib::resources::{format_display_name, ResourceType};
use mllt_lib::srs::algorithm::format_interval;
use mllt_lib::srs::Schedule;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    resource_type: ResourceType,
    name: &str,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let identifier = app.find_file(resource_type, name)?;
    let (schedule, entries) = Schedule::open(
        app.schedule_repository(),
        app.context(),
        resource_type,
        &identifier,
        app.settings.ladder(),
    )
    .with_context(|| format!("Failed to load schedule for '{}'", identifier))?;

    let now = Utc::now();
    let order = schedule.order_at(&entries, now);

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = order
                .iter()
                .filter_map(|&index| entries.get(index))
                .map(|entry| {
                    let state = schedule.state(entry);
                    serde_json::json!({
                        "primary": entry.primary,
                        "stage": state.stage,
                        "dueAt": state.due_at.map(|d| d.to_rfc3339()),
                        "overdue": state.is_overdue(now),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "{} {}",
                terminal::bold(&format_display_name(&identifier), use_color),
                terminal::dim(&format!("({} stages)", schedule.ladder().len()), use_color)
            );
            if entries.is_empty() {
                println!("(empty)");
                return Ok(());
            }

            let width = entries
                .iter()
                .map(|e| e.primary.chars().count())
                .max()
                .unwrap_or(10)
                .clamp(10, 40);

            for &index in &order {
                let Some(entry) = entries.get(index) else {
                    continue;
                };
                let state = schedule.state(entry);
                let due = match state.due_at {
                    None => terminal::paint("new", Color::CYAN, use_color),
                    Some(_) if state.is_overdue(now) => terminal::paint("due", Color::YELLOW, use_color),
                    Some(due_at) => format!("in {}", format_interval(due_at - now)),
                };
                let shown = terminal::truncate(&entry.primary, width);
                let pad = width.saturating_sub(shown.chars().count());
                println!("{}{}  stage {:>2}  {}", shown, " ".repeat(pad), state.stage, due);
            }
        }
    }

    Ok(())
}

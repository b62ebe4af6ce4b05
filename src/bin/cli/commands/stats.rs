use anyhow::{Context, Result};
use chrono::Local;

use mllt_lib::resources::format_display_name;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, date: Option<&str>, format: &OutputFormat, use_color: bool) -> Result<()> {
    match date {
        Some(date) => run_day(app, date, format, use_color),
        None => run_summaries(app, format, use_color),
    }
}

fn run_day(app: &App, date: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let sessions = app
        .statistics
        .sessions_by_date(date)
        .with_context(|| format!("Failed to read statistics for {}", date))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&sessions)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::bold(date, use_color));
            if sessions.is_empty() {
                println!("No sessions.");
                return Ok(());
            }

            for session in &sessions {
                let status = if session.completed { "" } else { " (stopped)" };
                println!(
                    "  {}  {:<9} {:<24} {:>3}/{:<3} {:>5.1}%  {}s{}",
                    session.timestamp.with_timezone(&Local).format("%H:%M"),
                    session.resource_type.as_str(),
                    terminal::truncate(&format_display_name(&session.file_name), 24),
                    session.correct,
                    session.total,
                    session.accuracy,
                    session.duration_seconds,
                    status
                );
            }
        }
    }

    Ok(())
}

fn run_summaries(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let summaries = app
        .statistics
        .daily_summaries()
        .context("Failed to read statistics")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        OutputFormat::Plain => {
            if summaries.is_empty() {
                println!("No practice sessions recorded yet.");
                return Ok(());
            }

            println!(
                "{}",
                terminal::bold(
                    &format!("{:<10}  {:>8}  {:>7}  {:>7}  {:>8}", "Date", "Sessions", "Answers", "Correct", "Accuracy"),
                    use_color
                )
            );
            for day in &summaries {
                println!(
                    "{:<10}  {:>8}  {:>7}  {:>7}  {:>7.1}%",
                    day.date, day.session_count, day.total, day.correct, day.accuracy
                );
            }
        }
    }

    Ok(())
}

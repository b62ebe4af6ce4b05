use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use chrono::Utc;

use mllt_lib::config::OrderMode;
use mllt_lib::practice::{word_diff, PracticeSession, SessionSummary};
use mllt_lib::resources::{format_display_name, ResourceType};

use crate::app::App;
use crate::render::terminal::{self, Color};

const HELP: &str = "Type the text shown. Commands: :skip :mark :unmark :fav :unfav :q";

pub fn run(
    app: &App,
    resource_type: ResourceType,
    name: &str,
    order: Option<OrderMode>,
    use_color: bool,
) -> Result<()> {
    let identifier = app.find_file(resource_type, name)?;

    let mut settings = app.settings.clone();
    if let Some(order) = order {
        settings.next_one_order = order;
    }

    let mut session = PracticeSession::start(
        app.context(),
        &settings,
        resource_type,
        &identifier,
        app.schedule_repository(),
    )
    .with_context(|| format!("Failed to start practice on '{}'", identifier))?;

    if session.is_finished() {
        println!("Nothing to practice in '{}'.", format_display_name(&identifier));
        return Ok(());
    }

    let (_, total) = session.progress();
    println!(
        "{} ({} items, {} order)",
        terminal::bold(&format_display_name(&identifier), use_color),
        total,
        session.mode()
    );
    println!("{}", terminal::dim(HELP, use_color));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(entry) = session.current().cloned() {
        let (done, total) = session.progress();
        println!();
        println!("{}", terminal::dim(&terminal::progress_bar(done, total, 20), use_color));
        println!("{}", terminal::bold(&entry.primary, use_color));
        if session.show_translation() && entry.has_translation() {
            println!("{}", terminal::dim(&entry.translation, use_color));
        }
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read input")?;

        match line.trim() {
            ":q" | ":quit" => break,
            ":skip" => session.skip()?,
            ":mark" => report(session.mark_current(), "Marked", "Already marked", use_color),
            ":unmark" => report(session.unmark_current(), "Unmarked", "Not marked", use_color),
            ":fav" => report(session.favorite_current(), "Added to favorites", "Already a favorite", use_color),
            ":unfav" => report(
                session.unfavorite_current(),
                "Removed from favorites",
                "Not a favorite",
                use_color,
            ),
            _ => {
                let outcome = session.submit(&line)?;
                if outcome.correct {
                    println!("{}", terminal::paint("\u{2713} correct", Color::GREEN, use_color));
                } else {
                    println!(
                        "{} {}",
                        terminal::paint("\u{2717}", Color::RED, use_color),
                        terminal::render_word_diff(&word_diff(&line, &outcome.expected), use_color)
                    );
                    println!("  expected: {}", terminal::paint(&outcome.expected, Color::CYAN, use_color));
                }
            }
        }
    }

    session.finish();
    let summary = session.summary();
    if summary.total > 0 || summary.completed {
        app.statistics
            .log_session(&summary.to_record(Utc::now()))
            .context("Failed to save session statistics")?;
    }
    print_summary(&summary, use_color);

    Ok(())
}

/// Print the result of a bookmark command; failures are shown, not fatal
fn report<E: std::fmt::Display>(result: Result<bool, E>, done: &str, unchanged: &str, use_color: bool) {
    match result {
        Ok(true) => println!("{}", terminal::paint(done, Color::YELLOW, use_color)),
        Ok(false) => println!("{}", terminal::dim(unchanged, use_color)),
        Err(e) => eprintln!("{}", terminal::paint(&e.to_string(), Color::RED, use_color)),
    }
}

fn print_summary(summary: &SessionSummary, use_color: bool) {
    println!();
    let status = if summary.completed { "Finished" } else { "Stopped" };
    println!("{}", terminal::bold(status, use_color));
    println!(
        "  {} answers, {} correct, {} wrong ({:.1}%)",
        summary.total, summary.correct, summary.incorrect, summary.accuracy
    );
    println!("  {}s, {} order", summary.duration_seconds, summary.order_mode);
}

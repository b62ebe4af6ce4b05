mod app;
mod commands;
mod render;

use std::io::IsTerminal;

use clap::{Parser, Subcommand};

use mllt_lib::config::OrderMode;
use mllt_lib::resources::ResourceType;

#[derive(Parser)]
#[command(name = "mllt-cli", about = "Multi-language typing practice", version)]
struct Cli {
    /// Practice language for this call (default: configured language)
    #[arg(long, global = true)]
    language: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List folders of a resource type with their files
    Folders {
        /// words, phrases, sentences or articles
        resource_type: ResourceType,
    },

    /// List resources of a type
    Ls {
        resource_type: ResourceType,
        /// Only this folder
        #[arg(long)]
        folder: Option<String>,
    },

    /// Show the entries of a resource
    Show {
        resource_type: ResourceType,
        /// Resource identifier (`name` or `folder/name`, prefix match)
        identifier: String,
    },

    /// Copy a .txt file into the user resources
    Import {
        resource_type: ResourceType,
        source: std::path::PathBuf,
        /// Target folder (default folder when omitted)
        #[arg(long, default_value = "")]
        folder: String,
        /// Overwrite an existing resource of the same name
        #[arg(long)]
        force: bool,
    },

    /// Delete a user resource
    Rm {
        resource_type: ResourceType,
        identifier: String,
    },

    /// Delete an empty user folder
    Rmdir {
        resource_type: ResourceType,
        folder: String,
    },

    /// Practice a resource interactively
    Practice {
        resource_type: ResourceType,
        identifier: String,
        /// sequential, random or ebbinghaus (default: configured order)
        #[arg(long)]
        order: Option<OrderMode>,
    },

    /// Add an item to the marked list
    Mark {
        resource_type: ResourceType,
        /// `primary` or `primary ->> translation`
        item: String,
    },

    /// Remove an item from the marked list
    Unmark {
        resource_type: ResourceType,
        item: String,
    },

    /// Add an item to the favorite list
    Favorite {
        resource_type: ResourceType,
        item: String,
    },

    /// Remove an item from the favorite list
    Unfavorite {
        resource_type: ResourceType,
        item: String,
    },

    /// Show the review schedule of a resource
    Srs {
        resource_type: ResourceType,
        identifier: String,
    },

    /// Practice statistics
    Stats {
        /// Sessions of one day (YYYY-MM-DD) instead of daily totals
        #[arg(long)]
        date: Option<String>,
    },

    /// Language settings
    #[command(subcommand)]
    Lang(LangCommand),

    /// Show or change settings
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Show how a folder name is stored
    Normalize {
        folder: String,
    },
}

#[derive(Subcommand)]
enum LangCommand {
    /// List configured languages
    List,

    /// Make a language current
    Switch {
        #[arg(value_name = "LANGUAGE")]
        name: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the current settings
    Show,

    /// Change one setting and save it
    Set {
        /// next_one_order, correctness_match_mode, show_translation or input_keyboard_sound
        key: String,
        value: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let language = cli.language.as_deref();

    match cli.command {
        Command::Folders { resource_type } => {
            let app = app::App::new(language)?;
            commands::folders::run(&app, resource_type, &cli.format, use_color)?;
        }
        Command::Ls { resource_type, folder } => {
            let app = app::App::new(language)?;
            commands::ls::run(&app, resource_type, folder.as_deref(), &cli.format, use_color)?;
        }
        Command::Show { resource_type, identifier } => {
            let app = app::App::new(language)?;
            commands::show::run(&app, resource_type, &identifier, &cli.format, use_color)?;
        }
        Command::Import { resource_type, source, folder, force } => {
            let app = app::App::new(language)?;
            commands::manage::run_import(&app, resource_type, &source, &folder, force, &cli.format)?;
        }
        Command::Rm { resource_type, identifier } => {
            let app = app::App::new(language)?;
            commands::manage::run_delete(&app, resource_type, &identifier, &cli.format)?;
        }
        Command::Rmdir { resource_type, folder } => {
            let app = app::App::new(language)?;
            commands::manage::run_delete_folder(&app, resource_type, &folder, &cli.format)?;
        }
        Command::Practice { resource_type, identifier, order } => {
            let app = app::App::new(language)?;
            commands::practice::run(&app, resource_type, &identifier, order, use_color)?;
        }
        Command::Mark { resource_type, item } => {
            let app = app::App::new(language)?;
            commands::bookmark::run(&app, resource_type, &item, commands::bookmark::Action::Mark, &cli.format)?;
        }
        Command::Unmark { resource_type, item } => {
            let app = app::App::new(language)?;
            commands::bookmark::run(&app, resource_type, &item, commands::bookmark::Action::Unmark, &cli.format)?;
        }
        Command::Favorite { resource_type, item } => {
            let app = app::App::new(language)?;
            commands::bookmark::run(&app, resource_type, &item, commands::bookmark::Action::Favorite, &cli.format)?;
        }
        Command::Unfavorite { resource_type, item } => {
            let app = app::App::new(language)?;
            commands::bookmark::run(&app, resource_type, &item, commands::bookmark::Action::Unfavorite, &cli.format)?;
        }
        Command::Srs { resource_type, identifier } => {
            let app = app::App::new(language)?;
            commands::srs::run(&app, resource_type, &identifier, &cli.format, use_color)?;
        }
        Command::Stats { date } => {
            let app = app::App::new(language)?;
            commands::stats::run(&app, date.as_deref(), &cli.format, use_color)?;
        }
        Command::Lang(subcmd) => {
            let mut app = app::App::new(language)?;
            match subcmd {
                LangCommand::List => commands::lang::run_list(&app, &cli.format, use_color)?,
                LangCommand::Switch { name } => commands::lang::run_switch(&mut app, &name, &cli.format)?,
            }
        }
        Command::Config(subcmd) => {
            let mut app = app::App::new(language)?;
            match subcmd {
                ConfigCommand::Show => commands::config::run_show(&app, &cli.format)?,
                ConfigCommand::Set { key, value } => commands::config::run_set(&mut app, &key, &value, &cli.format)?,
            }
        }
        Command::Normalize { folder } => {
            commands::normalize::run(&folder, &cli.format)?;
        }
    }

    Ok(())
}

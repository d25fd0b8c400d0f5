use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sitedeck::config::FilePreferences;
use sitedeck::git::DEFAULT_COMMIT_MESSAGE;

mod cli;

#[derive(Parser)]
#[command(name = "sitedeck")]
#[command(about = "Control panel for a static site: git sync and local preview server")]
#[command(version)]
struct Cli {
    /// Path to the preferences file (defaults to ~/.sitedeck/preferences.toml)
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the control panel window
    Gui,

    /// Run the preview server for the configured project until it exits
    Serve,

    /// Clone the configured remote into the project directory
    Clone,

    /// Pull the current branch from the configured remote
    Pull,

    /// Commit all changes and push them to the configured remote
    Push {
        /// Commit message
        #[arg(short, long, default_value = DEFAULT_COMMIT_MESSAGE)]
        message: String,
    },

    /// Show or change preferences
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print all preferences
    Show,

    /// Set a preference, e.g. `config set GitHost git.example.com`
    Set { key: String, value: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let prefs_path = cli.prefs.unwrap_or_else(FilePreferences::global_path);

    match cli.command {
        Some(Commands::Gui) | None => {
            sitedeck::gui::run_gui(Some(prefs_path))?;
        }
        Some(Commands::Serve) => {
            let prefs = FilePreferences::open(&prefs_path)?;
            cli::serve::serve_command(&prefs)?;
        }
        Some(Commands::Clone) => {
            let prefs = FilePreferences::open(&prefs_path)?;
            cli::git::clone_command(&prefs)?;
        }
        Some(Commands::Pull) => {
            let prefs = FilePreferences::open(&prefs_path)?;
            cli::git::pull_command(&prefs)?;
        }
        Some(Commands::Push { message }) => {
            let prefs = FilePreferences::open(&prefs_path)?;
            cli::git::push_command(&prefs, &message)?;
        }
        Some(Commands::Config { action }) => {
            let mut prefs = FilePreferences::open(&prefs_path)?;
            match action {
                ConfigAction::Show => cli::config::show_command(&prefs)?,
                ConfigAction::Set { key, value } => {
                    cli::config::set_command(&mut prefs, &key, &value)?
                }
            }
        }
    }

    Ok(())
}

//! Bookshelf CLI
//!
//! Command-line interface for Bookshelf - a personal book collection.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use bookshelf_core::{Config, StorageError, Store};

mod commands;
mod output;
mod prompt;

use output::{Output, OutputFormat};
use prompt::Prompter;

#[derive(Parser)]
#[command(name = "bookshelf")]
#[command(about = "Bookshelf - keep track of the books you own and read")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Book data file (overrides config)
    #[arg(long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Config file to use instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all books
    #[command(alias = "ls")]
    List {
        /// Only show books not yet read
        #[arg(short, long)]
        unread: bool,
    },
    /// Add a new book (prompts for anything not given)
    Add {
        /// Book title
        #[arg(short, long)]
        title: Option<String>,
        /// Author name
        #[arg(short, long)]
        author: Option<String>,
        /// Publication year
        #[arg(short, long, allow_negative_numbers = true)]
        year: Option<i32>,
    },
    /// Remove a book by title
    #[command(alias = "rm")]
    Remove {
        /// Book title (case-insensitive, exact)
        title: Vec<String>,
    },
    /// Find books by author
    Find {
        /// Part of the author's name (case-insensitive)
        author: Vec<String>,
    },
    /// Show a book by title
    Show {
        /// Book title (case-insensitive, exact)
        title: Vec<String>,
    },
    /// Mark a book as read
    #[command(alias = "read")]
    MarkRead {
        /// Book title (case-insensitive, exact)
        title: Vec<String>,
    },
    /// Show books not yet read
    Unread,
    /// Show data file location and counts
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_file, backup_corrupt, log_level)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let mut config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    if let Some(file) = cli.file {
        config.data_file = file;
    }
    init_logging(&config, &output);
    debug!("Using data file {:?}", config.data_file);

    // Config commands don't need the store
    if let Commands::Config { command } = command {
        return handle_config_command(command, cli.config.as_ref(), &output);
    }

    let mut store = Store::open_with_config(&config).with_context(|| {
        format!("Failed to open book collection at {:?}", config.data_file)
    })?;
    if let Some(warning) = store.load_warning() {
        output.warning(&warning.to_string());
    }

    let mut prompter = Prompter::stdio(!output.is_human());

    match command {
        Commands::List { unread } => commands::book::list(&store, unread, &output),
        Commands::Unread => commands::book::list(&store, true, &output),
        Commands::Add {
            title,
            author,
            year,
        } => commands::book::add(&mut store, title, author, year, &mut prompter, &output),
        Commands::Remove { title } => {
            commands::book::remove(&mut store, join_words(title), &mut prompter, &output)
        }
        Commands::Find { author } => {
            commands::book::find(&store, join_words(author), &mut prompter, &output)
        }
        Commands::Show { title } => {
            commands::book::show(&store, join_words(title), &mut prompter, &output)
        }
        Commands::MarkRead { title } => {
            commands::book::mark_read(&mut store, join_words(title), &mut prompter, &output)
        }
        Commands::Status => commands::status::show(&store, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Join positional words into one value; none means "ask"
fn join_words(words: Vec<String>) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Initialize stderr logging
///
/// RUST_LOG wins over the configured level.
fn init_logging(config: &Config, output: &Output) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "bookshelf_core={level},bookshelf={level}",
            level = config.log_level
        ))
    });

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(output.is_human())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Print an error chain, plus a hint when storage offers one
fn report_error(error: &anyhow::Error) {
    eprintln!("Error: {:#}", error);

    if let Some(hint) = error_hint(error) {
        eprintln!("Hint: {}", hint);
    }
}

/// Recovery hint for the first storage error in the chain
fn error_hint(error: &anyhow::Error) -> Option<String> {
    let storage_error = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<StorageError>())?;
    let suggestion = storage_error.recovery_suggestion()?;

    if storage_error.is_recoverable() {
        Some(format!(
            "{} The collection on disk was not changed; run the command again once fixed.",
            suggestion
        ))
    } else {
        Some(suggestion.to_string())
    }
}

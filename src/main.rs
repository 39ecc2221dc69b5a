//! Binary entry point for rolodex.
//!
//! This binary provides the command-line interface to the contact store.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

mod commands;

use clap::{Parser, Subcommand};
use commands::{
    cmd_add, cmd_clean, cmd_convert, cmd_display, cmd_filter, cmd_formats, cmd_import, cmd_shell,
};
use rolodex::RolodexConfig;
use rolodex::observability::{self, LoggingConfig};
use std::path::PathBuf;
use std::process::ExitCode;

/// Rolodex - a contact store with interchangeable file formats.
#[derive(Parser)]
#[command(name = "rolodex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Dataset base name; the format is appended as the extension.
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Storage format of the dataset (csv or json).
    #[arg(long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Add a contact.
    Add {
        /// Contact name.
        #[arg(long)]
        name: String,

        /// Postal address.
        #[arg(long)]
        address: String,

        /// Phone number.
        #[arg(long)]
        phone: String,
    },

    /// Import contacts from a .csv or .json file.
    Import {
        /// File to import.
        path: PathBuf,
    },

    /// Search one field with a glob pattern.
    Filter {
        /// Field to search: name, address, or "phone number".
        field: String,

        /// Glob pattern (*, ?, [...]) or literal value.
        pattern: String,
    },

    /// List available formats.
    Formats,

    /// Print all contacts.
    Display {
        /// Write an HTML file instead of printing text.
        #[arg(long)]
        html: bool,

        /// HTML output path (defaults to the configured path).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Migrate the dataset to another format.
    Convert {
        /// Target format.
        format: String,
    },

    /// Delete the current data file.
    Clean,

    /// Start the interactive shell.
    Shell,
}

/// Main entry point.
fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    let logging = LoggingConfig::from_settings(&config.logging, cli.verbose)
        .and_then(|logging| observability::init(&logging));
    if let Err(e) = logging {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(cli: Cli, config: RolodexConfig) -> Result<(), Box<dyn std::error::Error>> {
    let prompt_for_dataset = cli.file.is_none() && cli.format.is_none();

    match cli.command {
        Commands::Add {
            name,
            address,
            phone,
        } => cmd_add(&config, name, address, phone),

        Commands::Import { path } => cmd_import(&config, &path),

        Commands::Filter { field, pattern } => cmd_filter(&config, &field, &pattern),

        Commands::Formats => cmd_formats(&config),

        Commands::Display { html, output } => cmd_display(&config, html, output),

        Commands::Convert { format } => cmd_convert(&config, &format),

        Commands::Clean => cmd_clean(&config),

        Commands::Shell => cmd_shell(&config, prompt_for_dataset),
    }
}

/// Loads configuration and applies command-line overrides.
fn load_config(cli: &Cli) -> Result<RolodexConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => RolodexConfig::load_from_file(path)?,
        None => RolodexConfig::load_default(),
    };

    if let Some(file) = &cli.file {
        config = config.with_data_file(file);
    }
    if let Some(format) = &cli.format {
        config = config.with_default_format(format.trim().to_lowercase());
    }

    Ok(config)
}

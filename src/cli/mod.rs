//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for renumber using clap.

pub mod commands;

use crate::config::DEFAULT_CONFIG_PATH;
use clap::{Parser, Subcommand};

/// Renumber - chronological renaming of scanned image batches
#[derive(Parser, Debug)]
#[command(name = "renumber")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, env = "RENUMBER_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RENUMBER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy every batch below the scan root into chronologically named files
    Run(commands::run::RunArgs),

    /// Show the ranking of one metadata document without writing anything
    Inspect(commands::inspect::InspectArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

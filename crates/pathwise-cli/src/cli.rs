//! CLI argument parsing and command definitions.
//!
//! Provides the `pathwise` command structure: global configuration and
//! dataset flags, the concept query commands, dataset diagnostics, and
//! configuration management.

use clap::{Parser, Subcommand};

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "pathwise", author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Concept dataset to load, overriding the configured path.
    #[arg(short, long, global = true)]
    pub dataset: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show every transitive prerequisite of a concept.
    Chain {
        /// Concept ID.
        id: String,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Suggest a study order for a concept.
    Path {
        /// Target concept ID.
        id: String,

        /// Concept IDs the learner already knows (comma-separated).
        #[arg(short, long, value_delimiter = ',')]
        known: Vec<String>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List concepts within a hop distance of a concept.
    Related {
        /// Concept ID.
        id: String,

        /// Maximum hop distance (defaults to the configured value).
        #[arg(short, long)]
        max_distance: Option<usize>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show a concept with its resolved references.
    Info {
        /// Concept ID.
        id: String,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Look up a concept by name (case-insensitive).
    Find {
        /// Concept name.
        name: String,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Check the dataset for data-quality issues.
    Validate {
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show dataset statistics.
    Stats {
        /// Print the statistics as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Write the loaded dataset back out as JSON.
    Export {
        /// Output file path (prints to stdout when omitted).
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "query.max_distance").
        key: String,
    },

    /// Set a configuration value by dotted key.
    Set {
        /// Dotted key (e.g., "query.max_distance").
        key: String,

        /// Value to set.
        value: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================

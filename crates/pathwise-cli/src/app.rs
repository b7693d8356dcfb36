//! PathwiseCli application.
//!
//! Ties parsed arguments, configuration, and logging together and
//! dispatches each command to its handler.

use crate::cli::{CliArgs, Command};
use crate::config::{DEFAULT_MAX_DISTANCE, PathwiseConfig};
use crate::{config_handlers, graph_handlers};
use pathwise_core::Result;
use pathwise_core::traits::ConfigProvider;
use pathwise_graph::ConceptGraph;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ============================================================================
// PathwiseCli
// ============================================================================

/// CLI application parameterized over a config provider.
pub struct PathwiseCli<C: ConfigProvider> {
    name: String,
    config: Arc<C>,
    version: String,
    max_distance: usize,
}

impl PathwiseCli<PathwiseConfig> {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = PathwiseConfig::load(args.config.as_deref())?;
        let max_distance = config.query.max_distance;
        Ok(Self::new(name, config).with_max_distance(max_distance))
    }
}

impl<C: ConfigProvider> PathwiseCli<C> {
    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: C) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Override the default hop cutoff for `related`.
    pub fn with_max_distance(mut self, max_distance: usize) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Get a reference to the config provider.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // Ignore error if a subscriber is already set (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);
        let dataset = args.dataset.as_deref().map(Path::new);

        match args.command {
            Some(Command::Chain { id, json }) => {
                graph_handlers::handle_chain(&self.load(dataset)?, &id, json)
            }
            Some(Command::Path { id, known, json }) => {
                graph_handlers::handle_path(&self.load(dataset)?, &id, &known, json)
            }
            Some(Command::Related {
                id,
                max_distance,
                json,
            }) => {
                let max_distance = max_distance.unwrap_or(self.max_distance);
                graph_handlers::handle_related(&self.load(dataset)?, &id, max_distance, json)
            }
            Some(Command::Info { id, json }) => {
                graph_handlers::handle_info(&self.load(dataset)?, &id, json)
            }
            Some(Command::Find { name, json }) => {
                graph_handlers::handle_find(&self.load(dataset)?, &name, json)
            }
            Some(Command::Validate { json }) => {
                graph_handlers::handle_validate(&self.load(dataset)?, json)
            }
            Some(Command::Stats { json }) => {
                graph_handlers::handle_stats(&self.load(dataset)?, json)
            }
            Some(Command::Export { output }) => {
                let output = output.map(PathBuf::from);
                graph_handlers::handle_export(&self.load(dataset)?, output.as_deref())
            }
            Some(Command::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            None => {
                println!("{} {} (use --help for usage)", self.name, self.version);
                Ok(())
            }
        }
    }

    /// Resolve the dataset path: `--dataset` flag first, then config.
    fn dataset_path(&self, flag: Option<&Path>) -> Result<PathBuf> {
        match flag {
            Some(path) => Ok(path.to_path_buf()),
            None => self.config.dataset_path(),
        }
    }

    fn load(&self, flag: Option<&Path>) -> Result<ConceptGraph> {
        let path = self.dataset_path(flag)?;
        tracing::debug!(
            "Loading dataset for {} from {}",
            self.config.project_name(),
            path.display()
        );
        graph_handlers::load_dataset(&path)
    }
}

// ============================================================================
// Tests
// ============================================================================

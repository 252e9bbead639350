//! Core application

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::cli::{self, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, DEFAULT_LOG_FILTER, ENV_LOG};
use crate::data::filters::{SqlParams, build_where, build_where_with_params, parse_filters};

pub struct CoreApp {
    pub config: AppConfig,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        let app = Self::new(AppConfig::load(&cli_config)?);
        let input = read_input(command.input().map(|p| p.as_path()))?;
        let output = app.execute(&command, &input)?;

        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(output.as_bytes())
            .context("Failed to write output")?;
        Ok(())
    }

    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run a command against a filter document and return the text to print
    pub fn execute(&self, command: &Commands, input: &str) -> Result<String> {
        let filters = parse_filters(input, &self.config.limits)
            .inspect_err(|e| {
                tracing::debug!(error = %e, input_error = e.is_input_error(), "Rejected filters")
            })
            .context("Failed to parse filters")?;

        match command {
            Commands::Render { .. } if self.config.render.bind => {
                let mut params = SqlParams::default();
                let sql = build_where_with_params(&filters, &mut params)
                    .context("Failed to render filters")?;
                tracing::debug!(params = params.len(), "Rendered with bound parameters");
                let values = serde_json::to_string(&params.values)
                    .context("Failed to serialize bound values")?;
                Ok(format!("{}\n{}\n", sql.unwrap_or_default(), values))
            }
            Commands::Render { .. } => {
                let sql = build_where(&filters).context("Failed to render filters")?;
                Ok(sql.map(|sql| format!("{}\n", sql)).unwrap_or_default())
            }
            Commands::Check { .. } => {
                build_where(&filters).context("Failed to render filters")?;
                Ok(format!("ok: {} filter(s)\n", filters.len()))
            }
        }
    }

    fn init_logging() {
        let default_filter = format!("{},{}={}", DEFAULT_LOG_FILTER, APP_NAME_LOWER, DEFAULT_LOG_FILTER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }
}

/// Read the filter document from a file, or stdin for `None` / "-"
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            tracing::debug!(path = %path.display(), "Reading filters from file");
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read filter file: {}", path.display()))
        }
        _ => {
            tracing::debug!("Reading filters from stdin");
            std::io::read_to_string(std::io::stdin()).context("Failed to read filters from stdin")
        }
    }
}

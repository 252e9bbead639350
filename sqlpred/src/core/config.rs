use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::filters::ParseLimits;
use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{APP_DOT_FOLDER, CONFIG_FILE_NAME};

// =============================================================================
// File Config (all fields optional, merged in priority order)
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct RenderFileConfig {
    pub bind: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LimitsFileConfig {
    pub max_json_bytes: Option<usize>,
    pub max_filters: Option<usize>,
    pub max_depth: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub render: Option<RenderFileConfig>,
    pub limits: Option<LimitsFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Names of top-level keys this version does not understand
    fn unknown_fields(&self) -> Vec<String> {
        match &self.extra {
            serde_json::Value::Object(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        let keys = self.unknown_fields();
        if !keys.is_empty() {
            tracing::warn!(
                fields = %keys.join(", "),
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Overlay values set in `other` onto `self`
    fn merge(&mut self, other: FileConfig) {
        if let Some(render) = other.render {
            let current = self.render.get_or_insert_with(RenderFileConfig::default);
            if render.bind.is_some() {
                tracing::trace!(bind = ?render.bind, "Merging render.bind");
                current.bind = render.bind;
            }
        }

        if let Some(limits) = other.limits {
            let current = self.limits.get_or_insert_with(LimitsFileConfig::default);
            if limits.max_json_bytes.is_some() {
                current.max_json_bytes = limits.max_json_bytes;
            }
            if limits.max_filters.is_some() {
                current.max_filters = limits.max_filters;
            }
            if limits.max_depth.is_some() {
                current.max_depth = limits.max_depth;
            }
            tracing::trace!(limits = ?current, "Merged limits");
        }
    }
}

// =============================================================================
// Resolved Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderConfig {
    /// Emit ? placeholders and a list of bound values instead of inline literals
    pub bind: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub render: RenderConfig,
    pub limits: ParseLimits,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.sqlpred/sqlpred.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        Self::resolve(cli, file_config)
    }

    /// Layer configs: defaults -> file config -> CLI/env overrides
    fn resolve(cli: &CliConfig, file_config: FileConfig) -> Result<Self> {
        let file_render = file_config.render.unwrap_or_default();
        let file_limits = file_config.limits.unwrap_or_default();
        let defaults = ParseLimits::default();

        // render.bind: file config sets default, --bind CLI flag enables
        let bind = cli.bind || file_render.bind.unwrap_or(false);

        let limits = ParseLimits {
            max_json_bytes: cli
                .max_json_bytes
                .or(file_limits.max_json_bytes)
                .unwrap_or(defaults.max_json_bytes),
            max_filters: cli
                .max_filters
                .or(file_limits.max_filters)
                .unwrap_or(defaults.max_filters),
            max_depth: cli
                .max_depth
                .or(file_limits.max_depth)
                .unwrap_or(defaults.max_depth),
        };

        if limits.max_json_bytes == 0 || limits.max_filters == 0 || limits.max_depth == 0 {
            anyhow::bail!("limits.max_json_bytes, max_filters and max_depth must be greater than 0");
        }

        let config = Self {
            render: RenderConfig { bind },
            limits,
        };
        tracing::debug!(config = ?config, "Configuration resolved");
        Ok(config)
    }
}

fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

//! Configuration loader with hierarchical merging.
//!
//! # Load Order
//!
//! 1. Default values (compile-time)
//! 2. Global config (`~/.zion/config.toml`)
//! 3. Project config (`.zion/config.toml`)
//! 4. Environment variables (`ZION_*`)
//!
//! Each layer overrides the previous.

use super::{default_config_path, ConfigError, ZionConfig, PROJECT_CONFIG_DIR, PROJECT_CONFIG_FILE};
use std::path::{Path, PathBuf};
use tracing::debug;
use zion_types::UnitId;

/// Helper macro for parsing boolean environment variables.
macro_rules! parse_env_bool {
    ($field:expr, $var:literal) => {
        if let Ok(val) = std::env::var($var) {
            $field = parse_bool(&val)
                .ok_or_else(|| ConfigError::invalid_env_var($var, "expected bool"))?;
        }
    };
}

/// Configuration loader with builder pattern.
///
/// # Example
///
/// ```no_run
/// use zion_runtime::config::ConfigLoader;
///
/// let config = ConfigLoader::new()
///     .with_project_root(".")
///     .load()?;
/// println!("session file: {}", config.session.resolved_path().display());
/// # Ok::<(), zion_runtime::config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Global config file path (defaults to `~/.zion/config.toml`).
    global_config_path: Option<PathBuf>,

    /// Project root directory.
    project_root: Option<PathBuf>,

    skip_env: bool,
    skip_global: bool,
    skip_project: bool,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom global config path.
    #[must_use]
    pub fn with_global_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config_path = Some(path.into());
        self
    }

    /// Sets the project root directory.
    ///
    /// Project config will be loaded from `<project_root>/.zion/config.toml`.
    #[must_use]
    pub fn with_project_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_root = Some(path.into());
        self
    }

    /// Skips environment variable loading.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    #[must_use]
    pub fn skip_global_config(mut self) -> Self {
        self.skip_global = true;
        self
    }

    #[must_use]
    pub fn skip_project_config(mut self) -> Self {
        self.skip_project = true;
        self
    }

    /// Loads and merges configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a config file exists but cannot be read or
    /// parsed, or an environment variable has an invalid value. Missing
    /// config files are ignored.
    pub fn load(&self) -> Result<ZionConfig, ConfigError> {
        let mut config = ZionConfig::default();

        if !self.skip_global {
            let global_path = self
                .global_config_path
                .clone()
                .unwrap_or_else(default_config_path);

            if let Some(global_config) = self.load_file(&global_path)? {
                debug!(path = %global_path.display(), "Loaded global config");
                config.merge(&global_config);
            }
        }

        if !self.skip_project {
            if let Some(ref project_root) = self.project_root {
                let project_config_path = project_root
                    .join(PROJECT_CONFIG_DIR)
                    .join(PROJECT_CONFIG_FILE);

                if let Some(project_config) = self.load_file(&project_config_path)? {
                    debug!(
                        path = %project_config_path.display(),
                        project = %project_root.display(),
                        "Loaded project config"
                    );
                    config.merge(&project_config);
                }
            }
        }

        if !self.skip_env {
            apply_env_vars(&mut config)?;
        }

        Ok(config)
    }

    /// Loads a config file, returning None if it doesn't exist.
    fn load_file(&self, path: &Path) -> Result<Option<ZionConfig>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let config =
            ZionConfig::from_toml(&content).map_err(|e| ConfigError::parse_toml(path, e))?;

        Ok(Some(config))
    }
}

fn apply_env_vars(config: &mut ZionConfig) -> Result<(), ConfigError> {
    parse_env_bool!(config.debug, "ZION_DEBUG");
    parse_env_bool!(config.demo.enabled, "ZION_DEMO");

    if let Ok(val) = std::env::var("ZION_BACKEND_URL") {
        config.backend.url = Some(val);
    }
    if let Ok(val) = std::env::var("ZION_BACKEND_KEY") {
        config.backend.anon_key = Some(val);
    }

    if let Ok(val) = std::env::var("ZION_SEED_FILE") {
        config.backend.seed_file = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("ZION_SESSION_PATH") {
        config.session.path = Some(PathBuf::from(val));
    }

    if let Ok(val) = std::env::var("ZION_SESSION_MAX_AGE_DAYS") {
        config.session.max_age_days = val
            .trim()
            .parse()
            .map_err(|_| ConfigError::invalid_env_var("ZION_SESSION_MAX_AGE_DAYS", "expected days"))?;
    }

    if let Ok(val) = std::env::var("ZION_UNITS") {
        config.units.catalog = parse_list(&val).map(UnitId::new).collect();
    }

    Ok(())
}

/// Parses a boolean from string.
///
/// Accepts: "true", "false", "1", "0", "yes", "no", "on", "off"
/// (case-insensitive).
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim).filter(|item| !item.is_empty())
}

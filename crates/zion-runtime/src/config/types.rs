//! Configuration types.
//!
//! All types implement [`Default`] for compile-time fallback values.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use zion_types::UnitId;

/// Main configuration structure, after all layers are merged.
///
/// # Example
///
/// ```
/// use zion_runtime::config::ZionConfig;
///
/// let config = ZionConfig::default();
/// assert!(!config.debug);
/// assert_eq!(config.session.max_age_days, 7);
/// assert!(!config.backend.is_configured());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ZionConfig {
    /// Enable debug logging.
    pub debug: bool,

    /// Hosted backend connection.
    pub backend: BackendConfig,

    /// Session record persistence.
    pub session: SessionConfig,

    /// Demo identities.
    pub demo: DemoConfig,

    /// Unit catalog.
    pub units: UnitsConfig,
}

impl ZionConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes to TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Merges another config into this one.
    ///
    /// Values from `other` override values in `self` only if they
    /// differ from the default.
    pub fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.debug != default.debug {
            self.debug = other.debug;
        }

        self.backend.merge(&other.backend);
        self.session.merge(&other.session);
        self.demo.merge(&other.demo);
        self.units.merge(&other.units);
    }
}

/// Hosted backend connection.
///
/// The backend counts as configured only when both `url` and `anon_key`
/// are set and non-empty. The local implementation reads its accounts from
/// `seed_file`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    pub seed_file: Option<PathBuf>,
}

impl BackendConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.url) && present(&self.anon_key)
    }

    fn merge(&mut self, other: &Self) {
        if other.url.is_some() {
            self.url.clone_from(&other.url);
        }
        if other.anon_key.is_some() {
            self.anon_key.clone_from(&other.anon_key);
        }
        if other.seed_file.is_some() {
            self.seed_file.clone_from(&other.seed_file);
        }
    }
}

/// Session record persistence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Session record file. Defaults to `~/.zion/session.json`.
    pub path: Option<PathBuf>,

    /// Lifetime of a session record in days.
    pub max_age_days: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_age_days: 7,
        }
    }
}

impl SessionConfig {
    /// Resolved session record path.
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(crate::store::default_session_path)
    }

    fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.path.is_some() {
            self.path.clone_from(&other.path);
        }
        if other.max_age_days != default.max_age_days {
            self.max_age_days = other.max_age_days;
        }
    }
}

/// Demo identities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    /// Honor demo markers and demo credentials.
    pub enabled: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl DemoConfig {
    fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.enabled != default.enabled {
            self.enabled = other.enabled;
        }
    }
}

/// Units selectable by roles that may view every unit.
///
/// When empty, the seed accounts' units are used instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UnitsConfig {
    pub catalog: Vec<UnitId>,
}

impl UnitsConfig {
    fn merge(&mut self, other: &Self) {
        if !other.catalog.is_empty() {
            self.catalog.clone_from(&other.catalog);
        }
    }
}

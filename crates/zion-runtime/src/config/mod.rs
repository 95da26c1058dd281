//! Configuration management with hierarchical layering.
//!
//! # Architecture
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌─────────────────────────────────────────┐
//! │  1. CLI flags (ConfigResolver)          │  Per invocation
//! ├─────────────────────────────────────────┤
//! │  2. Environment Variables (ZION_*)      │  Runtime override
//! ├─────────────────────────────────────────┤
//! │  3. Project Config (.zion/config.toml)  │  Project-specific
//! ├─────────────────────────────────────────┤
//! │  4. Global Config (~/.zion/config.toml) │  User defaults
//! ├─────────────────────────────────────────┤
//! │  5. Default Values (compile-time)       │  Fallback
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Directory Structure
//!
//! ```text
//! ~/.zion/
//! ├── config.toml              # Global configuration
//! └── session.json             # Session record (separate from config)
//!
//! <project>/.zion/
//! └── config.toml              # Project configuration (overrides global)
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `ZION_DEBUG` | `debug` | bool |
//! | `ZION_BACKEND_URL` | `backend.url` | String |
//! | `ZION_BACKEND_KEY` | `backend.anon_key` | String |
//! | `ZION_SEED_FILE` | `backend.seed_file` | PathBuf |
//! | `ZION_SESSION_PATH` | `session.path` | PathBuf |
//! | `ZION_SESSION_MAX_AGE_DAYS` | `session.max_age_days` | u32 |
//! | `ZION_DEMO` | `demo.enabled` | bool |
//! | `ZION_UNITS` | `units.catalog` | comma-separated list |
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.zion/config.toml
//! debug = false
//!
//! [backend]
//! url = "https://example.backend.local"
//! anon_key = "public-anon-key"
//! seed_file = "~/.zion/seed.json"
//!
//! [session]
//! path = "~/.zion/session.json"
//! max_age_days = 7
//!
//! [demo]
//! enabled = true
//!
//! [units]
//! catalog = ["harare-1st", "harare-2nd", "norton"]
//! ```

mod error;
mod loader;
mod resolver;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use resolver::{ConfigResolver, NoOpResolver};
pub use types::{BackendConfig, DemoConfig, SessionConfig, UnitsConfig, ZionConfig};

/// Default global config directory.
pub fn default_config_dir() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".zion")
}

/// Default global config file path.
pub fn default_config_path() -> std::path::PathBuf {
    default_config_dir().join("config.toml")
}

/// Project config directory name.
pub const PROJECT_CONFIG_DIR: &str = ".zion";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "config.toml";

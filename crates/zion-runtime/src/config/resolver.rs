//! Configuration resolver trait for layered overrides.
//!
//! ```text
//! ConfigLoader.load()  →  ZionConfig (base)
//!                              │
//!                              ▼
//!                     ConfigResolver.apply()
//!                              │
//!                              ▼
//!                     ZionConfig (final)
//! ```

use super::ZionConfig;

/// Applies overrides on top of a loaded configuration.
///
/// Used for CLI flags: only values the user actually passed are applied.
pub trait ConfigResolver {
    fn apply(&self, config: &mut ZionConfig);
}

/// Resolver that makes no changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpResolver;

impl ConfigResolver for NoOpResolver {
    fn apply(&self, _config: &mut ZionConfig) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn noop_resolver_does_nothing() {
        let mut config = ZionConfig::default();
        let original = config.clone();

        NoOpResolver.apply(&mut config);

        assert_eq!(config, original);
    }

    #[test]
    fn custom_resolver() {
        struct SessionOverride {
            path: Option<PathBuf>,
        }

        impl ConfigResolver for SessionOverride {
            fn apply(&self, config: &mut ZionConfig) {
                if let Some(p) = &self.path {
                    config.session.path = Some(p.clone());
                }
            }
        }

        let mut config = ZionConfig::default();
        SessionOverride {
            path: Some(PathBuf::from("/tmp/s.json")),
        }
        .apply(&mut config);

        assert_eq!(config.session.path, Some(PathBuf::from("/tmp/s.json")));
    }
}

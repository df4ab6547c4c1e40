//! Runtime configuration.
//!
//! # Responsibility
//! - Resolve the document path and logging settings from the environment.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Resolution never fails; unsupported levels are validated later by
//!   `init_logging`.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const ENV_DATA_PATH: &str = "ROADMAP_DATA_PATH";
pub const ENV_LOG_LEVEL: &str = "ROADMAP_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "ROADMAP_LOG_DIR";

/// Document file used when nothing else is configured.
pub const DEFAULT_DATA_FILE: &str = "roadmap.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapConfig {
    pub data_path: PathBuf,
    pub log_level: String,
    /// Logging stays disabled when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for RoadmapConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl RoadmapConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            data_path: read(ENV_DATA_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            log_level: read(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RoadmapConfig, ENV_DATA_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn missing_values_use_defaults() {
        let config = RoadmapConfig::from_lookup(|_| None);
        assert_eq!(config, RoadmapConfig::default());
        assert_eq!(config.data_path, PathBuf::from("roadmap.json"));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = RoadmapConfig::from_lookup(|_| Some("   ".to_string()));
        assert_eq!(config, RoadmapConfig::default());
    }

    #[test]
    fn environment_values_override_defaults() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_DATA_PATH, "/data/roadmap.json"),
            (ENV_LOG_LEVEL, " warn "),
            (ENV_LOG_DIR, "/var/log/roadmap"),
        ]);
        let config = RoadmapConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.data_path, PathBuf::from("/data/roadmap.json"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/roadmap")));
    }
}

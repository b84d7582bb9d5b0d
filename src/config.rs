use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct HindsightConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

/// Result-size and defaulting knobs applied at the tool boundary.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LimitsConfig {
    /// Used when a list-shaped tool gets no `limit`, or a non-positive one.
    pub default_limit: usize,
    /// Larger requested limits are clamped to this.
    pub max_limit: usize,
    /// Characters of message content kept in search previews.
    pub preview_chars: usize,
    /// Importance given to memories stored without one.
    pub default_importance: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_hindsight_dir()
            .join("history.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            default_limit: 50,
            max_limit: 200,
            preview_chars: 200,
            default_importance: 5,
        }
    }
}

/// Returns `~/.hindsight/`, or `./.hindsight/` when no home directory is known.
pub fn default_hindsight_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".hindsight")
}

/// Returns the default config file path: `~/.hindsight/config.toml`
pub fn default_config_path() -> PathBuf {
    default_hindsight_dir().join("config.toml")
}

impl HindsightConfig {
    /// Load config from the default TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            HindsightConfig::default()
        };

        config.apply_env_overrides();
        config.limits.normalize();
        Ok(config)
    }

    /// Apply environment variable overrides (HINDSIGHT_DB, HINDSIGHT_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HINDSIGHT_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("HINDSIGHT_LOG_LEVEL") {
            self.server.log_level = val;
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }
}

impl LimitsConfig {
    /// Keep the knobs self-consistent: a zero maximum would make every list empty.
    fn normalize(&mut self) {
        self.max_limit = self.max_limit.max(1);
        self.default_limit = self.default_limit.clamp(1, self.max_limit);
        self.default_importance = self.default_importance.clamp(1, 10);
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = HindsightConfig::default();
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.limits.default_limit, 50);
        assert_eq!(config.limits.max_limit, 200);
        assert_eq!(config.limits.default_importance, 5);
        assert!(config.storage.db_path.ends_with("history.db"));
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[server]
log_level = "debug"

[storage]
db_path = "/tmp/test.db"

[limits]
default_limit = 10
"#;
        let config: HindsightConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.log_level, "debug");
        assert_eq!(config.storage.db_path, "/tmp/test.db");
        assert_eq!(config.limits.default_limit, 10);
        // defaults still apply for unset fields
        assert_eq!(config.limits.max_limit, 200);
        assert_eq!(config.limits.preview_chars, 200);
    }

    #[test]
    fn load_from_missing_file_uses_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = HindsightConfig::load_from(tmp.path().join("absent.toml")).unwrap();
        assert_eq!(config.limits.max_limit, 200);
    }

    #[test]
    fn normalize_keeps_default_within_max() {
        let mut limits = LimitsConfig {
            default_limit: 500,
            max_limit: 0,
            preview_chars: 200,
            default_importance: 42,
        };
        limits.normalize();
        assert_eq!(limits.max_limit, 1);
        assert_eq!(limits.default_limit, 1);
        assert_eq!(limits.default_importance, 10);
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = HindsightConfig::default();
        std::env::set_var("HINDSIGHT_DB", "/tmp/override.db");
        std::env::set_var("HINDSIGHT_LOG_LEVEL", "trace");

        config.apply_env_overrides();

        assert_eq!(config.storage.db_path, "/tmp/override.db");
        assert_eq!(config.server.log_level, "trace");

        // Clean up
        std::env::remove_var("HINDSIGHT_DB");
        std::env::remove_var("HINDSIGHT_LOG_LEVEL");
    }

    #[test]
    fn expand_tilde_leaves_absolute_paths() {
        assert_eq!(expand_tilde("/var/db.sqlite"), PathBuf::from("/var/db.sqlite"));
    }
}

//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides the database path.
pub const DB_ENV_VAR: &str = "FLASHDECK_DB";

/// Top-level flashdeck configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashdeckConfig {
    /// SQLite database file. `${VAR}` references are expanded.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("flashdeck.db")
}

impl Default for FlashdeckConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied verbatim and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when no path is given:
/// 1. `flashdeck.toml` in the current directory
/// 2. `~/.config/flashdeck/config.toml`
///
/// `FLASHDECK_DB` overrides the database path.
pub fn load_config_from(path: Option<&Path>) -> Result<FlashdeckConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("flashdeck.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<FlashdeckConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => FlashdeckConfig::default(),
    };

    if let Ok(db) = std::env::var(DB_ENV_VAR) {
        if !db.is_empty() {
            config.database_path = PathBuf::from(db);
        }
    }

    config.database_path = PathBuf::from(resolve_env_vars(&config.database_path.to_string_lossy()));

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("flashdeck"))
}

/// Sample configuration written by `flashdeck init`.
pub const SAMPLE_CONFIG: &str = r#"# flashdeck configuration

# SQLite database holding categories, cards, and lifetime statistics.
# ${VAR} references are expanded; FLASHDECK_DB overrides this value.
database_path = "flashdeck.db"
"#;

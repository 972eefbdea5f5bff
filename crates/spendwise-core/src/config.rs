//! Engine configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the user override in the config dir
//!    (~/.config/spendwise/engine.toml on Linux)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::format::Grouping;
use crate::insights::rank::DEFAULT_MAX_INSIGHTS;
use crate::notify::DedupPolicy;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/engine.toml");

/// Resolved engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineConfig {
    /// How many insights to keep after ranking
    pub max_insights: usize,
    /// Digit grouping for amounts in messages
    pub grouping: Grouping,
    /// Prefix for amounts in messages
    pub currency_symbol: String,
    /// Alert suppression at the notifier boundary
    pub dedup: DedupPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_insights: DEFAULT_MAX_INSIGHTS,
            grouping: Grouping::Indian,
            currency_symbol: "₹".to_string(),
            dedup: DedupPolicy::Never,
        }
    }
}

/// Where a config came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Embedded,
    File(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded => write!(f, "embedded defaults"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl EngineConfig {
    /// Load from an explicit path, else the user override, else defaults
    ///
    /// An explicit path that does not exist is an error; a missing user
    /// override silently falls back to the embedded defaults.
    pub fn load(override_path: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = override_path {
            let content = fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", path.display(), e))
            })?;
            let config = parse_config(&content)?;
            return Ok((config, ConfigSource::File(path.to_path_buf())));
        }

        if let Some(default_path) = default_config_path() {
            if default_path.exists() {
                let content = fs::read_to_string(&default_path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", default_path.display(), e))
                })?;
                let config = parse_config(&content)?;
                tracing::debug!(path = %default_path.display(), "Loaded user config override");
                return Ok((config, ConfigSource::File(default_path)));
            }
        }

        Ok((parse_config(DEFAULT_CONFIG)?, ConfigSource::Embedded))
    }

    /// Parse a TOML document on top of the defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("spendwise").join("engine.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    insights: Option<RawInsights>,
    format: Option<RawFormat>,
    alerts: Option<RawAlerts>,
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    max_insights: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawFormat {
    grouping: Option<String>,
    currency_symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAlerts {
    dedup: Option<String>,
}

fn parse_config(content: &str) -> Result<EngineConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = EngineConfig::default();

    if let Some(insights) = raw.insights {
        if let Some(max) = insights.max_insights {
            config.max_insights = max;
        }
    }

    if let Some(format) = raw.format {
        if let Some(grouping) = format.grouping {
            config.grouping = grouping.parse().map_err(Error::Config)?;
        }
        if let Some(symbol) = format.currency_symbol {
            config.currency_symbol = symbol;
        }
    }

    if let Some(alerts) = raw.alerts {
        if let Some(dedup) = alerts.dedup {
            config.dedup = dedup.parse().map_err(Error::Config)?;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_matches_defaults() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = parse_config(
            r#"
            [alerts]
            dedup = "per_month"
            "#,
        )
        .unwrap();
        assert_eq!(config.dedup, DedupPolicy::PerMonth);
        assert_eq!(config.max_insights, 3);
        assert_eq!(config.currency_symbol, "₹");
    }

    #[test]
    fn test_full_override() {
        let config = parse_config(
            r#"
            [insights]
            max_insights = 5

            [format]
            grouping = "international"
            currency_symbol = "$"
            "#,
        )
        .unwrap();
        assert_eq!(config.max_insights, 5);
        assert_eq!(config.grouping, Grouping::International);
        assert_eq!(config.currency_symbol, "$");
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(parse_config("[format]\ngrouping = \"roman\"").is_err());
        assert!(parse_config("[alerts]\ndedup = \"sometimes\"").is_err());
        assert!(parse_config("not toml at all [").is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        std::fs::write(&path, "[insights]\nmax_insights = 1\n").unwrap();

        let (config, source) = EngineConfig::load(Some(&path)).unwrap();
        assert_eq!(config.max_insights, 1);
        assert_eq!(source, ConfigSource::File(path));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = EngineConfig::load(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}

//! Configuration file support
//!
//! Values set here sit between the built-in defaults and the command line:
//! a flag given on the command line always wins.

use crate::error::CliError;
use crate::report::ReportFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Splitting configuration
    #[serde(default)]
    pub split: SplitSection,

    /// Report configuration
    #[serde(default)]
    pub report: ReportSection,
}

/// Splitting-related configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SplitSection {
    /// Marker substrings that trigger a split
    pub markers: Option<Vec<String>>,

    /// Hits needed to force a split
    pub trigger_count: Option<i64>,

    /// Drop blank lines from the output
    pub ignore_blank_lines: Option<bool>,
}

/// Report-related configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReportSection {
    /// Print a summary after each run
    pub enabled: Option<bool>,

    /// Summary format
    pub format: Option<ReportFormat>,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::ConfigError(e.message().to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config() {
        let config = CliConfig::from_toml("").unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_full_config() {
        let config = CliConfig::from_toml(
            r#"
            [split]
            markers = ["DROP TABLE", "ALTER TABLE"]
            trigger_count = 2
            ignore_blank_lines = true

            [report]
            enabled = true
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.split.markers,
            Some(vec!["DROP TABLE".to_string(), "ALTER TABLE".to_string()])
        );
        assert_eq!(config.split.trigger_count, Some(2));
        assert_eq!(config.split.ignore_blank_lines, Some(true));
        assert_eq!(config.report.enabled, Some(true));
        assert_eq!(config.report.format, Some(ReportFormat::Json));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = CliConfig::from_toml("[split]\ntrigger = 2\n").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = CliConfig::load(Path::new("/nonexistent/sqlsplit.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sqlsplit.toml");
        fs::write(&path, "[split]\ntrigger_count = 3\n").unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.split.trigger_count, Some(3));
        assert_eq!(config.split.markers, None);
    }
}

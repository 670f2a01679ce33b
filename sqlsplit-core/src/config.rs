//! Configuration for split runs

use serde::{Deserialize, Serialize};

/// Default configuration constants
pub mod defaults {
    /// Marker hits needed before a split is forced
    pub const TRIGGER_COUNT: i64 = 1;

    /// Marker substrings used when none are configured
    pub const MARKERS: &[&str] = &[
        "CREATE TABLE IF NOT EXISTS",
        "DROP TABLE",
        "CREATE VIEW",
        "CREATE FUNCTION",
        "CREATE PROCEDURE",
    ];

    /// Extension appended to every segment name
    pub const SEGMENT_EXTENSION: &str = "sql";

    /// Default marker list as owned strings
    pub fn markers() -> Vec<String> {
        MARKERS.iter().map(|m| m.to_string()).collect()
    }
}

/// Split configuration
///
/// No validation is applied: an empty marker list never splits, and a
/// trigger count of zero or below splits on every matching line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Literal substrings that count as a hit
    pub markers: Vec<String>,

    /// Hits required before the next split
    pub trigger_count: i64,

    /// Drop whitespace-only lines from the output
    pub ignore_blank_lines: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            markers: defaults::markers(),
            trigger_count: defaults::TRIGGER_COUNT,
            ignore_blank_lines: false,
        }
    }
}

impl SplitConfig {
    /// Create a configuration builder
    pub fn builder() -> SplitConfigBuilder {
        SplitConfigBuilder::default()
    }
}

/// Fluent builder for [`SplitConfig`]
#[derive(Debug, Default)]
pub struct SplitConfigBuilder {
    markers: Option<Vec<String>>,
    trigger_count: Option<i64>,
    ignore_blank_lines: Option<bool>,
}

impl SplitConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the marker list
    pub fn markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markers = Some(markers.into_iter().map(Into::into).collect());
        self
    }

    /// Set the number of hits that forces a split
    pub fn trigger_count(mut self, count: i64) -> Self {
        self.trigger_count = Some(count);
        self
    }

    /// Enable or disable blank line suppression
    pub fn ignore_blank_lines(mut self, ignore: bool) -> Self {
        self.ignore_blank_lines = Some(ignore);
        self
    }

    /// Build the configuration
    pub fn build(self) -> SplitConfig {
        let mut config = SplitConfig::default();

        if let Some(markers) = self.markers {
            config.markers = markers;
        }

        if let Some(count) = self.trigger_count {
            config.trigger_count = count;
        }

        if let Some(ignore) = self.ignore_blank_lines {
            config.ignore_blank_lines = ignore;
        }

        config
    }
}

//! Run summary reporting

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlsplit_core::{SplitConfig, SplitSummary};
use std::path::Path;

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human readable summary
    #[default]
    Text,
    /// JSON object
    Json,
}

/// Everything the summary shows about one run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunReport {
    /// Wall-clock time in seconds
    pub elapsed_seconds: f64,
    /// Input dump path
    pub input_file: String,
    /// Output directory
    pub output_dir: String,
    /// Files written successfully
    pub files_generated: usize,
    /// Segments lost to write failures
    pub write_failures: usize,
    /// Lines read from the input
    pub lines_read: usize,
    /// Blank line suppression flag
    pub ignore_blank_lines: bool,
    /// Hits needed to force a split
    pub trigger_count: i64,
    /// Markers used
    pub sql_conditions: Vec<String>,
    /// Read failure that ended the run early
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunReport {
    /// Build a report from a finished run
    pub fn new(
        input: &Path,
        output_dir: &Path,
        config: &SplitConfig,
        summary: &SplitSummary,
    ) -> Self {
        Self {
            elapsed_seconds: summary.elapsed.as_secs_f64(),
            input_file: input.display().to_string(),
            output_dir: output_dir.display().to_string(),
            files_generated: summary.files_written(),
            write_failures: summary.write_failures,
            lines_read: summary.lines_read,
            ignore_blank_lines: config.ignore_blank_lines,
            trigger_count: config.trigger_count,
            sql_conditions: config.markers.clone(),
            error: summary.read_error.as_ref().map(ToString::to_string),
        }
    }
}

/// Trait for report formatters
pub trait ReportFormatter {
    /// Write the report and flush
    fn write_report(&mut self, report: &RunReport) -> Result<()>;
}

/// Formatter for `format` writing to stdout
pub fn stdout_formatter(format: ReportFormat) -> Box<dyn ReportFormatter> {
    match format {
        ReportFormat::Text => Box::new(TextFormatter::stdout()),
        ReportFormat::Json => Box::new(JsonFormatter::stdout()),
    }
}

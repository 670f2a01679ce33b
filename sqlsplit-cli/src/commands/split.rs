//! Split command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::progress::{ProgressReporter, ProgressSink};
use crate::report::{self, ReportFormat, RunReport};
use anyhow::{Context, Result};
use clap::Parser;
use sqlsplit_core::{DirectorySink, SplitConfig, StreamSplitter};
use std::env;
use std::path::PathBuf;

/// Split a SQL dump into smaller files at marker statements
#[derive(Debug, Parser)]
#[command(name = "sqlsplit", version)]
pub struct SplitArgs {
    /// Path to the SQL file to be processed
    #[arg(short = 'i', long, value_name = "FILE")]
    pub input_file: PathBuf,

    /// Directory for the split files (default: ./<input file stem>)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Marker occurrences needed before a new file is started (default: 1)
    #[arg(short, long, value_name = "N", allow_negative_numbers = true)]
    pub trigger_count: Option<i64>,

    /// Drop blank lines from the output
    #[arg(short = 'b', long)]
    pub ignore_blank_lines: bool,

    /// Substrings that mark a split point, e.g. -c 'DROP TABLE' 'ALTER TABLE'
    #[arg(short = 'c', long, value_name = "MARKER", num_args = 1..)]
    pub sql_conditions: Option<Vec<String>>,

    /// Print a summary after the run
    #[arg(short, long)]
    pub report: bool,

    /// Summary format
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub report_format: Option<ReportFormat>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE", env = "SQLSPLIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress logging and progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl SplitArgs {
    /// Execute the split command
    pub fn execute(&self) -> Result<()> {
        self.init_logging()?;

        log::debug!("Arguments: {:?}", self);

        let file_config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        let split_config = self.split_config(&file_config);
        let output_dir = self.resolve_output_dir()?;

        log::info!(
            "Splitting {} into {}",
            self.input_file.display(),
            output_dir.display()
        );

        let splitter = StreamSplitter::new(split_config);
        let mut progress = ProgressReporter::new(self.quiet);
        progress.start(&output_dir);

        let sink = ProgressSink::new(DirectorySink::new(&output_dir), &progress);
        let summary = splitter.split_file(&self.input_file, sink);
        progress.finish(&summary);

        if self.report || file_config.report.enabled.unwrap_or(false) {
            let format = self
                .report_format
                .or(file_config.report.format)
                .unwrap_or_default();
            let run = RunReport::new(&self.input_file, &output_dir, splitter.config(), &summary);
            report::stdout_formatter(format).write_report(&run)?;
        }

        Ok(())
    }

    /// Merge command line flags over the config file over built-in defaults
    pub fn split_config(&self, file_config: &CliConfig) -> SplitConfig {
        let file = &file_config.split;
        let ignore_blank_lines =
            self.ignore_blank_lines || file.ignore_blank_lines.unwrap_or(false);
        let mut builder = SplitConfig::builder().ignore_blank_lines(ignore_blank_lines);

        if let Some(markers) = self.sql_conditions.clone().or_else(|| file.markers.clone()) {
            builder = builder.markers(markers);
        }

        if let Some(count) = self.trigger_count.or(file.trigger_count) {
            builder = builder.trigger_count(count);
        }

        builder.build()
    }

    /// Output directory, defaulting to `<cwd>/<input file stem>`
    pub fn resolve_output_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.output_dir {
            return Ok(dir.clone());
        }

        let stem = self.input_file.file_stem().ok_or_else(|| {
            CliError::InvalidInputPath(self.input_file.display().to_string())
        })?;
        let cwd = env::current_dir().context("Failed to determine current directory")?;

        Ok(cwd.join(stem))
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .try_init()
                .context("Failed to initialize logger")?;
        }

        Ok(())
    }
}

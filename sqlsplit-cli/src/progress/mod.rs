//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use sqlsplit_core::{Result, SegmentSink, SplitSummary};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Progress reporter for segment writing
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Start the spinner for a run into `output_dir`
    pub fn start(&mut self, output_dir: &Path) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner} [{elapsed_precise}] {pos} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(format!("-> {}", output_dir.display()));
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Update progress for a written segment
    pub fn segment_written(&self, path: &Path) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("Wrote: {}", path.display()));
            pb.inc(1);
        }
    }

    /// Finish progress reporting
    pub fn finish(&self, summary: &SplitSummary) {
        if let Some(pb) = &self.progress_bar {
            if summary.is_complete() {
                pb.finish_with_message("Complete");
            } else {
                pb.abandon_with_message("Stopped on read error");
            }
        }
    }
}

/// Sink decorator that ticks a [`ProgressReporter`] for every written segment
pub struct ProgressSink<'a, S> {
    inner: S,
    reporter: &'a ProgressReporter,
}

impl<'a, S: SegmentSink> ProgressSink<'a, S> {
    /// Wrap `inner`, reporting to `reporter`
    pub fn new(inner: S, reporter: &'a ProgressReporter) -> Self {
        Self { inner, reporter }
    }
}

impl<S: SegmentSink> SegmentSink for ProgressSink<'_, S> {
    fn prepare(&mut self) -> Result<()> {
        self.inner.prepare()
    }

    fn write_segment(&mut self, name: &str, lines: &[String]) -> Result<PathBuf> {
        let path = self.inner.write_segment(name, lines)?;
        self.reporter.segment_written(&path);
        Ok(path)
    }
}

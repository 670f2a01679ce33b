//! Plain text report formatter

use super::{ReportFormatter, RunReport};
use anyhow::Result;
use std::io::{self, Write};

/// Plain text formatter - one labelled value per line
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the formatter and return the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ReportFormatter for TextFormatter<W> {
    fn write_report(&mut self, report: &RunReport) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "Execution Summary:")?;
        writeln!(self.writer, "Time elapsed: {:.2} seconds", report.elapsed_seconds)?;
        writeln!(self.writer, "Input file: {}", report.input_file)?;
        writeln!(self.writer, "Output directory: {}", report.output_dir)?;
        writeln!(self.writer, "Total files generated: {}", report.files_generated)?;
        if report.write_failures > 0 {
            writeln!(self.writer, "Failed writes: {}", report.write_failures)?;
        }
        writeln!(self.writer, "Ignore blank lines: {}", report.ignore_blank_lines)?;
        writeln!(
            self.writer,
            "SQL conditions used: {}",
            report.sql_conditions.join(", ")
        )?;
        if let Some(error) = &report.error {
            writeln!(self.writer, "Stopped early: {error}")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

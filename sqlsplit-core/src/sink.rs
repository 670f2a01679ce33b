//! Segment destinations

use crate::config::defaults::SEGMENT_EXTENSION;
use crate::error::{Result, SplitError};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Destination for flushed segments
pub trait SegmentSink {
    /// Prepare the destination before the first segment is written
    fn prepare(&mut self) -> Result<()> {
        Ok(())
    }

    /// Write one segment under `name`, returning where it went
    fn write_segment(&mut self, name: &str, lines: &[String]) -> Result<PathBuf>;
}

impl<S: SegmentSink + ?Sized> SegmentSink for &mut S {
    fn prepare(&mut self) -> Result<()> {
        (**self).prepare()
    }

    fn write_segment(&mut self, name: &str, lines: &[String]) -> Result<PathBuf> {
        (**self).write_segment(name, lines)
    }
}

/// Writes each segment to `<name>.sql` inside a directory
///
/// Existing files are overwritten. When two segments in one run share a
/// name the later one wins and a warning is logged.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    written: HashSet<String>,
}

impl DirectorySink {
    /// Create a sink rooted at `dir`; nothing touches the disk until use
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            written: HashSet::new(),
        }
    }

    /// Output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Target path for a segment name
    pub fn segment_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{SEGMENT_EXTENSION}"))
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|source| SplitError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl SegmentSink for DirectorySink {
    fn prepare(&mut self) -> Result<()> {
        self.ensure_dir(&self.dir)
    }

    fn write_segment(&mut self, name: &str, lines: &[String]) -> Result<PathBuf> {
        let path = self.segment_path(name);
        self.ensure_dir(&path)?;

        if !self.written.insert(name.to_string()) {
            log::warn!(
                "Segment name '{}' already used in this run, overwriting {}",
                name,
                path.display()
            );
        }

        fs::write(&path, lines.concat()).map_err(|source| SplitError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

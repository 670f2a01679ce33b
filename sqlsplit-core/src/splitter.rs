//! Single-pass streaming splitter

use crate::config::SplitConfig;
use crate::error::SplitError;
use crate::filter::filter_line;
use crate::marker::MarkerSet;
use crate::naming::NameExtractor;
use crate::sink::SegmentSink;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Counters and outcome of one split run
#[derive(Debug, Default)]
pub struct SplitSummary {
    /// Lines read from the input
    pub lines_read: usize,
    /// Lines that survived blank line filtering
    pub lines_kept: usize,
    /// Segments flushed, including those whose write failed
    pub segments: usize,
    /// Files written successfully, in flush order
    pub files: Vec<PathBuf>,
    /// Segments lost to write failures
    pub write_failures: usize,
    /// Read failure that ended the run early
    pub read_error: Option<SplitError>,
    /// Wall-clock time of the run
    pub elapsed: Duration,
}

impl SplitSummary {
    /// Number of files generated
    pub fn files_written(&self) -> usize {
        self.files.len()
    }

    /// Whether the input was consumed to the end
    pub fn is_complete(&self) -> bool {
        self.read_error.is_none()
    }
}

/// Accumulation state threaded through the pass
#[derive(Debug, Default)]
struct SegmentState {
    buffer: Vec<String>,
    hits: i64,
    name: Option<String>,
}

impl SegmentState {
    /// Write out the buffered segment, if any
    fn flush<S: SegmentSink>(&mut self, sink: &mut S, summary: &mut SplitSummary) {
        if self.buffer.is_empty() {
            return;
        }

        let index = summary.segments;
        let name = self.name.take().unwrap_or_else(|| index.to_string());

        match sink.write_segment(&name, &self.buffer) {
            Ok(path) => {
                log::debug!(
                    "Wrote segment {} ({} lines) to {}",
                    index,
                    self.buffer.len(),
                    path.display()
                );
                summary.files.push(path);
            }
            Err(e) => {
                log::error!("{e}");
                summary.write_failures += 1;
            }
        }

        summary.segments += 1;
        self.buffer.clear();
    }
}

/// Splits a text stream into segments at marker boundaries
///
/// # Example
///
/// ```rust
/// use sqlsplit_core::{SegmentSink, SplitConfig, StreamSplitter};
/// use std::path::{Path, PathBuf};
///
/// #[derive(Default)]
/// struct Collect(Vec<(String, String)>);
///
/// impl SegmentSink for Collect {
///     fn write_segment(
///         &mut self,
///         name: &str,
///         lines: &[String],
///     ) -> sqlsplit_core::Result<PathBuf> {
///         self.0.push((name.to_string(), lines.concat()));
///         Ok(PathBuf::from(name))
///     }
/// }
///
/// let splitter = StreamSplitter::new(SplitConfig::default());
/// let dump = "-- header\nDROP TABLE users;\nCREATE TABLE users (id int);\n";
/// let mut sink = Collect::default();
/// let summary = splitter.split_reader(dump.as_bytes(), Path::new("dump.sql"), &mut sink);
///
/// assert_eq!(summary.segments, 2);
/// assert_eq!(sink.0[0], ("0".to_string(), "-- header\n".to_string()));
/// assert_eq!(sink.0[1].0, "users");
/// ```
#[derive(Debug, Clone)]
pub struct StreamSplitter {
    config: SplitConfig,
    markers: MarkerSet,
    names: NameExtractor,
}

impl StreamSplitter {
    /// Create a splitter for the given configuration
    pub fn new(config: SplitConfig) -> Self {
        let markers = MarkerSet::new(config.markers.iter().cloned());
        Self {
            config,
            markers,
            names: NameExtractor::new(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Split the file at `path` into `sink`.
    ///
    /// Failures are logged, never returned: a read failure ends the run and
    /// is recorded in [`SplitSummary::read_error`], a write failure loses
    /// only the affected segment.
    pub fn split_file<S: SegmentSink>(&self, path: &Path, mut sink: S) -> SplitSummary {
        let started = Instant::now();
        prepare_sink(&mut sink);

        let mut summary = match File::open(path) {
            Ok(file) => self.run(BufReader::new(file), path, &mut sink),
            Err(source) => read_failed(SplitSummary::default(), path, source),
        };

        summary.elapsed = started.elapsed();
        summary
    }

    /// Split an already opened stream; `source` names it in log messages
    pub fn split_reader<R: BufRead, S: SegmentSink>(
        &self,
        reader: R,
        source: &Path,
        mut sink: S,
    ) -> SplitSummary {
        let started = Instant::now();
        prepare_sink(&mut sink);

        let mut summary = self.run(reader, source, &mut sink);
        summary.elapsed = started.elapsed();
        summary
    }

    fn run<R: BufRead, S: SegmentSink>(
        &self,
        mut reader: R,
        source: &Path,
        sink: &mut S,
    ) -> SplitSummary {
        log::info!("Splitting {}", source.display());

        let mut summary = SplitSummary::default();
        let mut state = SegmentState::default();
        let mut line = String::new();

        loop {
            line.clear();
            match reader.read_line(&mut line) {
                Ok(0) => break,
                Ok(_) => {}
                // The partial segment is dropped along with the rest of the input
                Err(e) => return read_failed(summary, source, e),
            }
            summary.lines_read += 1;

            let Some(kept) = filter_line(&line, self.config.ignore_blank_lines) else {
                continue;
            };

            let decision = self
                .markers
                .evaluate(kept, state.hits, self.config.trigger_count);
            state.hits = decision.hits();

            if decision.is_split() {
                log::trace!(
                    "Split at line {} after {} hits",
                    summary.lines_read,
                    decision.hits()
                );
                state.flush(sink, &mut summary);
                state.hits = 0;
                state.name = self.names.extract(kept);
            }

            state.buffer.push(kept.to_string());
            summary.lines_kept += 1;
        }

        state.flush(sink, &mut summary);

        log::info!(
            "Finished {}: {} segments, {} write failures",
            source.display(),
            summary.segments,
            summary.write_failures
        );
        summary
    }
}

fn prepare_sink<S: SegmentSink>(sink: &mut S) {
    if let Err(e) = sink.prepare() {
        log::error!("{e}");
    }
}

fn read_failed(mut summary: SplitSummary, path: &Path, source: std::io::Error) -> SplitSummary {
    let err = SplitError::Read {
        path: path.to_path_buf(),
        source,
    };
    log::error!("{err}");
    summary.read_error = Some(err);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use std::io::{self, Read};

    /// Sink that keeps segments in memory
    #[derive(Default)]
    struct MemorySink {
        segments: Vec<(String, String)>,
        fail_on: Option<String>,
    }

    impl SegmentSink for MemorySink {
        fn write_segment(&mut self, name: &str, lines: &[String]) -> Result<PathBuf> {
            let path = PathBuf::from(format!("{name}.sql"));
            if self.fail_on.as_deref() == Some(name) {
                return Err(SplitError::Write {
                    path,
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
                });
            }
            self.segments.push((name.to_string(), lines.concat()));
            Ok(path)
        }
    }

    fn seg(name: &str, body: &str) -> (String, String) {
        (name.to_string(), body.to_string())
    }

    fn split(config: SplitConfig, input: &str) -> (SplitSummary, MemorySink) {
        let mut sink = MemorySink::default();
        let summary = StreamSplitter::new(config).split_reader(
            input.as_bytes(),
            Path::new("test.sql"),
            &mut sink,
        );
        (summary, sink)
    }

    fn drop_table_config() -> SplitConfig {
        SplitConfig::builder().markers(["DROP TABLE"]).build()
    }

    #[test]
    fn test_each_marker_opens_a_segment() {
        let input = "DROP TABLE a;\nCREATE TABLE a (id int);\nDROP TABLE b;\nDROP TABLE c;\n";
        let (summary, sink) = split(drop_table_config(), input);

        assert_eq!(summary.segments, 3);
        assert_eq!(sink.segments[0], seg("a", "DROP TABLE a;\nCREATE TABLE a (id int);\n"));
        assert_eq!(sink.segments[1], seg("b", "DROP TABLE b;\n"));
        assert_eq!(sink.segments[2], seg("c", "DROP TABLE c;\n"));
    }

    #[test]
    fn test_leading_content_gets_positional_name() {
        let input = "-- dump header\nSET NAMES utf8;\nDROP TABLE a;\n";
        let (summary, sink) = split(drop_table_config(), input);

        assert_eq!(summary.segments, 2);
        assert_eq!(sink.segments[0].0, "0");
        assert_eq!(sink.segments[1].0, "a");
    }

    #[test]
    fn test_unnamed_segment_uses_its_index() {
        let input = "-- header\nDROP TABLE a;\nCREATE TABLE IF NOT EXISTS b (id int);\n";
        let config = SplitConfig::default();
        let (_, sink) = split(config, input);

        let names: Vec<_> = sink.segments.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["0", "a", "2"]);
    }

    #[test]
    fn test_trigger_count_two() {
        let input = "DROP TABLE a;\nDROP TABLE b;\nx\nDROP TABLE c;\nDROP TABLE d;\n";
        let config = SplitConfig::builder()
            .markers(["DROP TABLE"])
            .trigger_count(2)
            .build();
        let (summary, sink) = split(config, input);

        assert_eq!(summary.segments, 3);
        assert_eq!(sink.segments[0], seg("0", "DROP TABLE a;\n"));
        assert_eq!(
            sink.segments[1],
            seg("b", "DROP TABLE b;\nx\nDROP TABLE c;\n")
        );
        assert_eq!(sink.segments[2], seg("d", "DROP TABLE d;\n"));
        assert_eq!(summary.lines_kept, 5);
    }

    #[test]
    fn test_single_hit_never_splits_with_trigger_two() {
        let config = SplitConfig::builder()
            .markers(["DROP TABLE"])
            .trigger_count(2)
            .build();
        let (summary, sink) = split(config, "a\nDROP TABLE a;\nb\n");

        assert_eq!(summary.segments, 1);
        assert_eq!(sink.segments[0], seg("0", "a\nDROP TABLE a;\nb\n"));
    }

    #[test]
    fn test_no_markers_yield_one_segment() {
        let (summary, sink) = split(SplitConfig::default(), "SELECT 1;\nSELECT 2;");
        assert_eq!(summary.segments, 1);
        assert_eq!(sink.segments, vec![seg("0", "SELECT 1;\nSELECT 2;")]);
    }

    #[test]
    fn test_empty_input_writes_nothing() {
        let (summary, sink) = split(SplitConfig::default(), "");
        assert_eq!(summary.segments, 0);
        assert!(sink.segments.is_empty());
        assert!(summary.is_complete());
    }

    #[test]
    fn test_blank_line_suppression() {
        let input = "DROP TABLE a;\n\n   \nINSERT 1;\n";

        let config = drop_table_config();
        let (_, kept) = split(config.clone(), input);
        assert_eq!(kept.segments[0].1, input);

        let config = SplitConfig {
            ignore_blank_lines: true,
            ..config
        };
        let (summary, dropped) = split(config, input);
        assert_eq!(dropped.segments[0].1, "DROP TABLE a;\nINSERT 1;\n");
        assert_eq!(summary.lines_read, 4);
        assert_eq!(summary.lines_kept, 2);
    }

    #[test]
    fn test_write_failure_continues_with_next_segment() {
        let mut sink = MemorySink {
            fail_on: Some("a".into()),
            ..Default::default()
        };
        let input = "DROP TABLE a;\nDROP TABLE b;\n";
        let summary = StreamSplitter::new(drop_table_config()).split_reader(
            input.as_bytes(),
            Path::new("test.sql"),
            &mut sink,
        );

        assert_eq!(summary.segments, 2);
        assert_eq!(summary.write_failures, 1);
        assert_eq!(summary.files_written(), 1);
        assert_eq!(sink.segments, vec![seg("b", "DROP TABLE b;\n")]);
    }

    /// Reader that yields some bytes, then invalid UTF-8
    struct BrokenReader {
        chunks: Vec<Vec<u8>>,
    }

    impl Read for BrokenReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.chunks.is_empty() {
                return Ok(0);
            }
            let chunk = self.chunks.remove(0);
            buf[..chunk.len()].copy_from_slice(&chunk);
            Ok(chunk.len())
        }
    }

    #[test]
    fn test_read_failure_aborts_and_keeps_counters() {
        let reader = BrokenReader {
            chunks: vec![
                b"DROP TABLE a;\nDROP TABLE b;\n".to_vec(),
                vec![0xff, 0xfe, b'\n'],
            ],
        };
        let mut sink = MemorySink::default();
        let summary = StreamSplitter::new(drop_table_config()).split_reader(
            BufReader::new(reader),
            Path::new("broken.sql"),
            &mut sink,
        );

        assert!(!summary.is_complete());
        assert!(matches!(summary.read_error, Some(SplitError::Read { .. })));
        // Segment "a" was flushed by the second marker; "b" was still buffered
        assert_eq!(summary.segments, 1);
        assert_eq!(sink.segments, vec![seg("a", "DROP TABLE a;\n")]);
    }

    #[test]
    fn test_missing_file_is_a_read_failure() {
        let mut sink = MemorySink::default();
        let summary = StreamSplitter::new(SplitConfig::default())
            .split_file(Path::new("/nonexistent/dump.sql"), &mut sink);

        let err = summary.read_error.expect("read error recorded");
        assert_eq!(err.path(), &PathBuf::from("/nonexistent/dump.sql"));
        assert_eq!(summary.segments, 0);
        assert!(sink.segments.is_empty());
    }
}

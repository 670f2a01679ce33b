//! Streaming splitter for large SQL dump files
//!
//! A dump is read line by line. Lines containing one of a configurable set
//! of marker substrings (`DROP TABLE`, `CREATE VIEW`, ...) count as hits;
//! once the hit count reaches the trigger count, the lines accumulated so
//! far are flushed as one segment and the triggering line opens the next.
//! Each segment is named after the object its opening line creates or
//! drops, falling back to its position in the dump.
//!
//! # Example
//!
//! ```rust,no_run
//! use sqlsplit_core::{DirectorySink, SplitConfig, StreamSplitter};
//! use std::path::Path;
//!
//! let config = SplitConfig::builder()
//!     .markers(["DROP TABLE"])
//!     .ignore_blank_lines(true)
//!     .build();
//!
//! let splitter = StreamSplitter::new(config);
//! let summary = splitter.split_file(Path::new("dump.sql"), DirectorySink::new("dump"));
//!
//! println!("{} files written", summary.files_written());
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod marker;
pub mod naming;
pub mod sink;
pub mod splitter;

pub use config::{defaults, SplitConfig, SplitConfigBuilder};
pub use error::{Result, SplitError};
pub use filter::filter_line;
pub use marker::{MarkerSet, SplitDecision};
pub use naming::NameExtractor;
pub use sink::{DirectorySink, SegmentSink};
pub use splitter::{SplitSummary, StreamSplitter};

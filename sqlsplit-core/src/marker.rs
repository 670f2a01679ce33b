//! Marker matching and split decisions

/// Outcome of feeding one line to a [`MarkerSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitDecision {
    /// Keep accumulating; carries the updated hit count
    Continue {
        /// Hit count after this line
        hits: i64,
    },
    /// The trigger count was reached on this line; carries the unreset hit count
    Split {
        /// Hit count after this line
        hits: i64,
    },
}

impl SplitDecision {
    /// Hit count reported by the decision
    pub fn hits(&self) -> i64 {
        match *self {
            SplitDecision::Continue { hits } | SplitDecision::Split { hits } => hits,
        }
    }

    /// Whether a split was requested
    pub fn is_split(&self) -> bool {
        matches!(self, SplitDecision::Split { .. })
    }
}

/// Set of literal substrings that count toward the split trigger
#[derive(Debug, Clone, Default)]
pub struct MarkerSet {
    markers: Vec<String>,
}

impl MarkerSet {
    /// Create a marker set from literal substrings
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    /// Markers in configuration order
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Whether any marker occurs in the line
    pub fn matches(&self, line: &str) -> bool {
        self.markers.iter().any(|marker| line.contains(marker.as_str()))
    }

    /// Count a hit for `line` and compare against `trigger_count`.
    ///
    /// A line scores at most one hit however many markers it contains.
    /// The counter is never reset here; that is the caller's job once the
    /// split has actually happened.
    pub fn evaluate(&self, line: &str, hit_count: i64, trigger_count: i64) -> SplitDecision {
        if !self.matches(line) {
            return SplitDecision::Continue { hits: hit_count };
        }

        let hits = hit_count + 1;
        if hits >= trigger_count {
            SplitDecision::Split { hits }
        } else {
            SplitDecision::Continue { hits }
        }
    }
}

//! Blank line filtering

/// Apply blank line suppression to a raw line.
///
/// Returns `None` when `ignore_blank_lines` is set and the line is empty
/// after trimming; otherwise the line is returned untouched, terminator
/// included.
pub fn filter_line(line: &str, ignore_blank_lines: bool) -> Option<&str> {
    if ignore_blank_lines && line.trim().is_empty() {
        return None;
    }
    Some(line)
}

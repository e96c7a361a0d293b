use serde::{Deserialize, Serialize};
use std::ops::Range;

/// The document line sequence: every reconstructed line of a document, in
/// reading order. Indices are stable and used as cursors by the extractors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentLines {
    lines: Vec<String>,
}

impl DocumentLines {
    pub fn new(lines: Vec<String>) -> Self {
        DocumentLines { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Lines in `range`, clamped to the document.
    pub fn slice(&self, range: Range<usize>) -> &[String] {
        let end = range.end.min(self.lines.len());
        let start = range.start.min(end);
        &self.lines[start..end]
    }

    /// Lines `start..end`, clamped to the document.
    pub fn block(&self, start: usize, end: usize) -> &[String] {
        self.slice(start..end)
    }

    /// First index at or after `start` whose line equals `marker`.
    pub fn find_marker(&self, marker: &str, start: usize) -> Option<usize> {
        self.position_from(start, |line| line == marker)
    }

    /// First index at or after `start` whose line contains `needle`.
    pub fn find_containing(&self, needle: &str, start: usize) -> Option<usize> {
        self.position_from(start, |line| line.contains(needle))
    }

    /// First blank line at or after `start`: the universal block terminator.
    pub fn find_block_end(&self, start: usize) -> Option<usize> {
        self.position_from(start, |line| line.trim().is_empty())
    }

    /// Start of the block following the next blank line at or after `start`.
    pub fn next_block(&self, start: usize) -> Option<usize> {
        self.find_block_end(start).map(|i| i + 1)
    }

    /// Whether some line equals `line` exactly.
    pub fn contains_line(&self, line: &str) -> bool {
        self.lines.iter().any(|l| l == line)
    }

    /// Whether `needle` occurs anywhere in the document text.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }

    /// Remainder of the first line starting with `prefix`.
    pub fn value_after_prefix(&self, prefix: &str) -> Option<&str> {
        self.lines
            .iter()
            .find_map(|l| l.strip_prefix(prefix))
            .map(str::trim)
    }

    /// Line directly below the first exact `marker` line.
    pub fn line_after(&self, marker: &str) -> Option<&str> {
        self.find_marker(marker, 0).and_then(|i| self.get(i + 1))
    }

    fn position_from<F>(&self, start: usize, pred: F) -> Option<usize>
    where
        F: Fn(&str) -> bool,
    {
        self.lines
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, line)| pred(line))
            .map(|(i, _)| i)
    }
}

impl<S: Into<String>> FromIterator<S> for DocumentLines {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        DocumentLines::new(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> DocumentLines {
        [
            "Treatment Summary",
            "Beam",
            "",
            "Energy Daily corr Norm",
            "  ",
            "Radiation Device: TrueBeam",
            "Notes",
            "None",
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_find_marker_is_exact() {
        let d = doc();
        assert_eq!(d.find_marker("Beam", 0), Some(1));
        assert_eq!(d.find_marker("Daily corr", 0), None);
        assert_eq!(d.find_marker("Beam", 2), None);
    }

    #[test]
    fn test_find_containing() {
        assert_eq!(doc().find_containing("Daily corr", 0), Some(3));
    }

    #[test]
    fn test_block_end_treats_whitespace_as_blank() {
        let d = doc();
        assert_eq!(d.find_block_end(0), Some(2));
        assert_eq!(d.find_block_end(3), Some(4));
        assert_eq!(d.next_block(3), Some(5));
        assert_eq!(d.find_block_end(5), None);
    }

    #[test]
    fn test_slice_is_clamped() {
        let d = doc();
        assert_eq!(d.slice(6..20), &["Notes", "None"]);
        assert!(d.slice(20..30).is_empty());
    }

    #[test]
    fn test_prefix_and_line_after() {
        let d = doc();
        assert_eq!(d.value_after_prefix("Radiation Device: "), Some("TrueBeam"));
        assert_eq!(d.line_after("Notes"), Some("None"));
        assert_eq!(d.line_after("Missing"), None);
    }

    #[test]
    fn test_contains() {
        let d = doc();
        assert!(d.contains_line("Notes"));
        assert!(!d.contains_line("Note"));
        assert!(d.contains_text("Daily corr"));
    }
}

//! Bounded ring of submitted inputs with a navigation cursor

use std::collections::VecDeque;

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Older,
    Newer,
}

/// Most recent inputs, oldest first.
///
/// The cursor ranges over `0..=len`; `len` is the blank slot past the
/// newest entry, where navigation starts after every submission.
#[derive(Debug, Clone)]
pub struct HistoryRing {
    entries: VecDeque<String>,
    capacity: usize,
    cursor: usize,
}

impl HistoryRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Entries oldest first
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Change the capacity, dropping the oldest entries that no longer fit
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.entries.len() > capacity {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len();
    }

    /// Add a submitted input, evicting the oldest entry when full, and
    /// reset the cursor to the blank slot
    pub fn record(&mut self, entry: &str) {
        if self.capacity > 0 {
            if self.entries.len() == self.capacity {
                self.entries.pop_front();
            }
            self.entries.push_back(entry.to_string());
        }
        self.cursor = self.entries.len();
    }

    /// Move the cursor and return the entry under it.
    ///
    /// Moving older stops at the oldest entry, moving newer stops at the
    /// blank slot, which yields an empty string.
    pub fn navigate(&mut self, direction: Direction) -> &str {
        self.cursor = match direction {
            Direction::Older => self.cursor.saturating_sub(1),
            Direction::Newer => (self.cursor + 1).min(self.entries.len()),
        };
        self.entries.get(self.cursor).map_or("", String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

impl Default for HistoryRing {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn ring(entries: &[&str], capacity: usize) -> HistoryRing {
        let mut ring = HistoryRing::new(capacity);
        for entry in entries {
            ring.record(entry);
        }
        ring
    }

    #[test]
    fn test_eviction_keeps_newest() {
        let ring = ring(&["a", "b", "c", "d"], 3);
        assert_eq!(ring.entries().collect::<Vec<_>>(), vec!["b", "c", "d"]);
        assert_eq!(ring.cursor(), 3);
    }

    #[test]
    fn test_older_clamps_at_oldest() {
        let mut ring = ring(&["a", "b"], 10);
        assert_eq!(ring.navigate(Direction::Older), "b");
        assert_eq!(ring.navigate(Direction::Older), "a");
        assert_eq!(ring.navigate(Direction::Older), "a");
        assert_eq!(ring.cursor(), 0);
    }

    #[test]
    fn test_newer_stops_at_blank_slot() {
        let mut ring = ring(&["a", "b"], 10);
        ring.navigate(Direction::Older);
        ring.navigate(Direction::Older);
        assert_eq!(ring.navigate(Direction::Newer), "b");
        assert_eq!(ring.navigate(Direction::Newer), "");
        assert_eq!(ring.navigate(Direction::Newer), "");
        assert_eq!(ring.cursor(), 2);
    }

    #[test_case(Direction::Older ; "older")]
    #[test_case(Direction::Newer ; "newer")]
    fn test_empty_ring_yields_blank(direction: Direction) {
        let mut ring = HistoryRing::new(5);
        assert_eq!(ring.navigate(direction), "");
        assert_eq!(ring.cursor(), 0);
    }

    #[test]
    fn test_record_resets_cursor() {
        let mut ring = ring(&["a", "b"], 10);
        ring.navigate(Direction::Older);
        ring.record("c");
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.cursor(), 3);
    }

    #[test]
    fn test_empty_input_is_recorded() {
        let mut ring = ring(&["a", ""], 10);
        assert_eq!(ring.entries().collect::<Vec<_>>(), vec!["a", ""]);
        assert_eq!(ring.navigate(Direction::Older), "");
        assert_eq!(ring.navigate(Direction::Older), "a");
    }

    #[test]
    fn test_shrinking_capacity() {
        let mut ring = ring(&["a", "b", "c"], 10);
        ring.set_capacity(1);
        assert_eq!(ring.entries().collect::<Vec<_>>(), vec!["c"]);

        ring.set_capacity(0);
        ring.record("d");
        assert!(ring.is_empty());
    }
}

//! Inline input region
//!
//! The region is the only part of the buffer the user may edit. It is armed
//! either by an `%i...;` directive (bounded or open-ended) or implicitly at
//! the tail after plain output, and acts as the gatekeeper for every edit
//! the buffer receives.

use crate::buffer::{Edit, EditGate, EditOrigin, Verdict};
use ember_markup::{Extent, InputDirective};
use tracing::debug;

/// Lifecycle of the region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing to edit
    Idle,

    /// Configured, nothing typed yet
    Armed,

    /// Configured and holding user edits
    Editing,

    /// Contents parked while the program writes
    Suspended,
}

/// Width and masking of a region, used to match stored input to a new prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputShape {
    pub extent: Extent,
    pub protected: bool,
}

/// The raw characters the user typed, never masked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputValue {
    chars: Vec<char>,
}

impl InputValue {
    /// `width` spaces
    pub fn blank(width: usize) -> Self {
        Self {
            chars: vec![' '; width],
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Length without trailing blanks
    pub fn filled_len(&self) -> usize {
        self.chars
            .iter()
            .rposition(|c| *c != ' ')
            .map_or(0, |last| last + 1)
    }

    /// Insert at `at`, appending if `at` is past the end
    pub fn insert(&mut self, at: usize, text: &str) {
        let at = at.min(self.chars.len());
        self.chars.splice(at..at, text.chars());
    }

    pub fn remove(&mut self, at: usize, len: usize) {
        let start = at.min(self.chars.len());
        let end = start.saturating_add(len).min(self.chars.len());
        self.chars.drain(start..end);
    }

    pub fn replace(&mut self, at: usize, len: usize, text: &str) {
        let start = at.min(self.chars.len());
        let end = start.saturating_add(len).min(self.chars.len());
        self.chars.splice(start..end, text.chars());
    }

    /// Replace within a fixed-width field.
    ///
    /// Characters pushed past `width` must be blanks, otherwise the field
    /// is over capacity and nothing changes.
    pub fn replace_fixed(&mut self, at: usize, len: usize, text: &str, width: usize) -> bool {
        let mut next = self.clone();
        next.replace(at, len, text);
        if next.chars.len() > width {
            if next.chars[width..].iter().any(|c| *c != ' ') {
                return false;
            }
            next.chars.truncate(width);
        }
        next.chars.resize(width, ' ');
        *self = next;
        true
    }

    /// Remove within a fixed-width field, padding the tail with blanks
    pub fn remove_fixed(&mut self, at: usize, len: usize, width: usize) {
        self.remove(at, len);
        self.chars.resize(width, ' ');
    }
}

impl From<&str> for InputValue {
    fn from(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }
}

impl std::fmt::Display for InputValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Input parked by [`InputRegion::store`]
#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredInput {
    shape: InputShape,
    value: InputValue,
}

/// The editable span of the buffer and the gate that enforces it
#[derive(Debug, Clone)]
pub struct InputRegion {
    phase: Phase,
    start: usize,
    extent: Extent,
    protected: bool,
    mask: char,
    value: InputValue,
    stored: Option<StoredInput>,
    ignore_input: bool,
}

impl InputRegion {
    pub fn new(mask: char) -> Self {
        Self {
            phase: Phase::Idle,
            start: 0,
            extent: Extent::Unbounded,
            protected: false,
            mask,
            value: InputValue::default(),
            stored: None,
            ignore_input: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while the user may type into the region
    pub fn is_receiving_input(&self) -> bool {
        matches!(self.phase, Phase::Armed | Phase::Editing)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last slot of a bounded region
    pub fn bounded_end(&self) -> Option<usize> {
        match self.extent {
            Extent::Bounded(width) => Some(self.start + width),
            Extent::Unbounded => None,
        }
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn is_protected(&self) -> bool {
        self.protected
    }

    pub fn shape(&self) -> InputShape {
        InputShape {
            extent: self.extent,
            protected: self.protected,
        }
    }

    pub fn mask(&self) -> char {
        self.mask
    }

    pub fn set_mask(&mut self, mask: char) {
        self.mask = mask;
    }

    pub fn set_ignore_input(&mut self, ignore: bool) {
        self.ignore_input = ignore;
    }

    /// Raw value, unmasked and untrimmed
    pub fn value(&self) -> String {
        self.value.to_string()
    }

    pub fn has_stored(&self) -> bool {
        self.stored.is_some()
    }

    /// Arm a region starting at `start` as described by `directive`
    pub fn configure(&mut self, start: usize, directive: InputDirective) {
        self.start = start;
        self.extent = directive.extent;
        self.protected = directive.protected;
        self.value = InputValue::blank(directive.extent.width());
        self.phase = Phase::Armed;
        debug!(
            "Input region armed at {} ({:?}, protected: {})",
            start, directive.extent, directive.protected
        );
    }

    /// Arm an open-ended, unmasked region at `start`
    pub fn arm_unbounded(&mut self, start: usize) {
        self.configure(start, InputDirective::UNBOUNDED);
    }

    /// Text written into the buffer when the region is configured
    pub fn placeholder(&self) -> String {
        " ".repeat(self.extent.width())
    }

    /// Hand back the trimmed value and go idle
    pub fn extract_and_close(&mut self) -> String {
        let input = self.value.to_string().trim().to_string();
        self.close();
        input
    }

    /// Go idle without touching stored input
    pub fn close(&mut self) {
        self.phase = Phase::Idle;
        self.value = InputValue::default();
    }

    /// Drop everything, including stored input
    pub fn reset(&mut self) {
        self.close();
        self.stored = None;
        self.start = 0;
        self.extent = Extent::Unbounded;
        self.protected = false;
    }

    /// Park the current value so program output can be written.
    ///
    /// Returns the shape that was stored, or `None` if the region was not
    /// receiving input.
    pub fn store(&mut self) -> Option<InputShape> {
        if !self.is_receiving_input() {
            return None;
        }
        let shape = self.shape();
        self.stored = Some(StoredInput {
            shape,
            value: std::mem::take(&mut self.value),
        });
        self.phase = Phase::Suspended;
        Some(shape)
    }

    /// Bring stored input back into a freshly armed region of the same shape.
    ///
    /// Stored input is consumed either way. On a match with something typed,
    /// the returned edit rewrites the region with the (masked) value.
    pub fn restore(&mut self) -> Option<Edit> {
        let stored = self.stored.take()?;
        if !self.is_receiving_input() || stored.shape != self.shape() {
            debug!(
                "Dropping stored input: {:?} does not fit {:?}",
                stored.shape,
                self.shape()
            );
            return None;
        }

        if stored.value.filled_len() == 0 {
            return None;
        }

        let len = self.extent.width();
        self.value = stored.value;
        self.phase = Phase::Editing;
        Some(Edit::Replace {
            offset: self.start,
            len,
            text: self.display(&self.value),
        })
    }

    /// Replace the whole value of an open-ended region.
    ///
    /// `current_len` is how many buffer chars the region occupies now.
    pub fn set_value(&mut self, text: &str, current_len: usize) -> Option<Edit> {
        if !self.is_receiving_input() || self.extent.is_bounded() {
            return None;
        }
        self.value = InputValue::from(text);
        self.phase = Phase::Editing;
        Some(Edit::Replace {
            offset: self.start,
            len: current_len,
            text: self.display(&self.value),
        })
    }

    /// Length of the value as shown in the buffer, for caret placement
    pub fn shown_len(&self) -> usize {
        match self.extent {
            Extent::Bounded(_) => self.value.filled_len(),
            Extent::Unbounded => self.value.len(),
        }
    }

    /// Keep a caret offset inside the region while it is receiving input
    pub fn clamp_caret(&self, offset: usize) -> usize {
        if !self.is_receiving_input() {
            return offset;
        }
        let offset = offset.max(self.start);
        match self.bounded_end() {
            Some(end) => offset.min(end),
            None => offset,
        }
    }

    /// What the buffer shows for `value`
    fn display(&self, value: &InputValue) -> String {
        if !self.protected {
            return value.to_string();
        }
        let filled = match self.extent {
            Extent::Bounded(_) => value.filled_len(),
            Extent::Unbounded => value.len(),
        };
        (0..value.len())
            .map(|i| if i < filled { self.mask } else { ' ' })
            .collect()
    }

    fn masked(&self, text: &str) -> String {
        if self.protected {
            text.chars().map(|_| self.mask).collect()
        } else {
            text.to_string()
        }
    }

    /// Whole-field rewrite for a bounded region
    fn rewrite(&self) -> Verdict {
        Verdict::Accept(vec![Edit::Replace {
            offset: self.start,
            len: self.extent.width(),
            text: self.display(&self.value),
        }])
    }

    fn review_bounded(&mut self, width: usize, edit: Edit) -> Verdict {
        let start = self.start;
        let end = start + width;
        let within = move |offset: usize, len: usize| offset >= start && offset + len <= end;

        match edit {
            Edit::Insert { offset, text } | Edit::Replace { offset, len: 0, text }
                if offset >= start && offset < end =>
            {
                if !self.value.replace_fixed(offset - start, 0, &text, width) {
                    debug!("Bounded input full, rejecting {:?}", text);
                    return Verdict::Reject;
                }
                self.rewrite()
            }
            Edit::Replace { offset, len, text } if within(offset, len) && offset < end => {
                if !self.value.replace_fixed(offset - start, len, &text, width) {
                    return Verdict::Reject;
                }
                self.rewrite()
            }
            Edit::Remove { offset, len } if within(offset, len) => {
                self.value.remove_fixed(offset - start, len, width);
                self.rewrite()
            }
            _ => Verdict::Reject,
        }
    }

    fn review_unbounded(&mut self, edit: Edit) -> Verdict {
        let limit = self.value.len();
        match edit {
            Edit::Insert { offset, text } if offset >= self.start && offset - self.start <= limit => {
                self.value.insert(offset - self.start, &text);
                Verdict::Accept(vec![Edit::Insert {
                    offset,
                    text: self.masked(&text),
                }])
            }
            Edit::Replace { offset, len, text }
                if offset >= self.start && offset - self.start + len <= limit =>
            {
                self.value.replace(offset - self.start, len, &text);
                Verdict::Accept(vec![Edit::Replace {
                    offset,
                    len,
                    text: self.masked(&text),
                }])
            }
            Edit::Remove { offset, len } if offset >= self.start && offset - self.start + len <= limit => {
                self.value.remove(offset - self.start, len);
                Verdict::Accept(vec![Edit::Remove { offset, len }])
            }
            _ => Verdict::Reject,
        }
    }
}

impl EditGate for InputRegion {
    fn review(&mut self, origin: EditOrigin, edit: Edit) -> Verdict {
        if origin == EditOrigin::Program {
            return Verdict::Accept(vec![edit]);
        }
        if self.ignore_input || !self.is_receiving_input() {
            return Verdict::Reject;
        }

        let verdict = match self.extent {
            Extent::Bounded(width) => self.review_bounded(width, edit),
            Extent::Unbounded => self.review_unbounded(edit),
        };
        if matches!(verdict, Verdict::Accept(_)) {
            self.phase = Phase::Editing;
        }
        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn user_insert(region: &mut InputRegion, offset: usize, text: &str) -> Verdict {
        region.review(
            EditOrigin::User,
            Edit::Insert {
                offset,
                text: text.to_string(),
            },
        )
    }

    fn bounded(start: usize, width: usize, protected: bool) -> InputRegion {
        let mut region = InputRegion::new('*');
        region.configure(
            start,
            InputDirective {
                extent: Extent::Bounded(width),
                protected,
            },
        );
        region
    }

    #[test]
    fn test_idle_rejects_user_edits() {
        let mut region = InputRegion::new('*');
        assert_eq!(user_insert(&mut region, 0, "a"), Verdict::Reject);
        assert_eq!(region.phase(), Phase::Idle);
    }

    #[test]
    fn test_program_edits_always_pass() {
        let mut region = bounded(5, 3, false);
        let edit = Edit::Insert {
            offset: 0,
            text: "out".to_string(),
        };
        assert_eq!(
            region.review(EditOrigin::Program, edit.clone()),
            Verdict::Accept(vec![edit])
        );
    }

    #[test]
    fn test_unbounded_rejects_before_start() {
        let mut region = InputRegion::new('*');
        region.arm_unbounded(4);
        assert_eq!(user_insert(&mut region, 3, "a"), Verdict::Reject);
        assert!(matches!(user_insert(&mut region, 4, "ab"), Verdict::Accept(_)));
        assert_eq!(region.phase(), Phase::Editing);
        assert_eq!(region.value(), "ab");
    }

    #[test]
    fn test_bounded_rewrites_whole_field() {
        let mut region = bounded(2, 4, false);
        let verdict = user_insert(&mut region, 2, "ab");
        assert_eq!(
            verdict,
            Verdict::Accept(vec![Edit::Replace {
                offset: 2,
                len: 4,
                text: "ab  ".to_string(),
            }])
        );
    }

    #[test]
    fn test_bounded_rejects_outside_field() {
        let mut region = bounded(2, 4, false);
        assert_eq!(user_insert(&mut region, 1, "a"), Verdict::Reject);
        assert_eq!(user_insert(&mut region, 6, "a"), Verdict::Reject);
        let remove = Edit::Remove { offset: 5, len: 2 };
        assert_eq!(region.review(EditOrigin::User, remove), Verdict::Reject);
    }

    #[test]
    fn test_bounded_full_field_rejects_more() {
        let mut region = bounded(0, 3, false);
        assert!(matches!(user_insert(&mut region, 0, "abc"), Verdict::Accept(_)));
        assert_eq!(user_insert(&mut region, 1, "x"), Verdict::Reject);
        assert_eq!(region.value(), "abc");
        assert_eq!(region.extract_and_close(), "abc");
    }

    #[test]
    fn test_protected_display_masks_filled_part() {
        let mut region = bounded(0, 5, true);
        let verdict = user_insert(&mut region, 0, "pw");
        assert_eq!(
            verdict,
            Verdict::Accept(vec![Edit::Replace {
                offset: 0,
                len: 5,
                text: "**   ".to_string(),
            }])
        );
        assert_eq!(region.value(), "pw   ");
    }

    #[test]
    fn test_bounded_remove_pads() {
        let mut region = bounded(0, 4, false);
        user_insert(&mut region, 0, "abcd");
        let remove = Edit::Remove { offset: 1, len: 1 };
        assert!(matches!(
            region.review(EditOrigin::User, remove),
            Verdict::Accept(_)
        ));
        assert_eq!(region.value(), "acd ");
    }

    #[test]
    fn test_ignore_input_rejects() {
        let mut region = InputRegion::new('*');
        region.arm_unbounded(0);
        region.set_ignore_input(true);
        assert_eq!(user_insert(&mut region, 0, "a"), Verdict::Reject);
    }

    #[test]
    fn test_store_and_restore_same_shape() {
        let mut region = InputRegion::new('*');
        region.arm_unbounded(3);
        user_insert(&mut region, 3, "half");
        assert!(region.store().is_some());
        assert_eq!(region.phase(), Phase::Suspended);

        region.arm_unbounded(10);
        assert_eq!(
            region.restore(),
            Some(Edit::Replace {
                offset: 10,
                len: 0,
                text: "half".to_string(),
            })
        );
        assert_eq!(region.value(), "half");
        assert!(!region.has_stored());
    }

    #[test]
    fn test_restore_discards_on_shape_mismatch() {
        let mut region = bounded(0, 5, false);
        user_insert(&mut region, 0, "ab");
        region.store();

        region.arm_unbounded(8);
        assert_eq!(region.restore(), None);
        assert!(!region.has_stored());
        assert_eq!(region.value(), "");
    }

    #[test]
    fn test_caret_clamp() {
        let region = bounded(4, 3, false);
        assert_eq!(region.clamp_caret(0), 4);
        assert_eq!(region.clamp_caret(5), 5);
        assert_eq!(region.clamp_caret(12), 7);

        let idle = InputRegion::new('*');
        assert_eq!(idle.clamp_caret(12), 12);
    }
}

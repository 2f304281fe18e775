//! Styled text buffer shared by program output and user edits
//!
//! Every mutation is routed through an [`EditGate`], which sees where the
//! edit came from and decides what, if anything, is actually written.

use ember_markup::Style;
use std::ops::Range;

/// A single character in the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The character in this cell
    pub c: char,

    /// Style it was written with
    pub style: Style,
}

/// A proposed change, in char offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Insert { offset: usize, text: String },
    Replace { offset: usize, len: usize, text: String },
    Remove { offset: usize, len: usize },
}

impl Edit {
    pub fn offset(&self) -> usize {
        match self {
            Edit::Insert { offset, .. }
            | Edit::Replace { offset, .. }
            | Edit::Remove { offset, .. } => *offset,
        }
    }
}

/// Who is asking to mutate the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOrigin {
    /// Output written by the program
    Program,

    /// Keystrokes, pastes and other user gestures
    User,
}

/// Outcome of reviewing an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Write these edits (possibly transformed from the proposal)
    Accept(Vec<Edit>),

    /// Leave the buffer untouched
    Reject,
}

/// Authorization check every buffer mutation passes through
pub trait EditGate {
    fn review(&mut self, origin: EditOrigin, edit: Edit) -> Verdict;
}

/// Gate that lets everything through
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGate;

impl EditGate for OpenGate {
    fn review(&mut self, _origin: EditOrigin, edit: Edit) -> Verdict {
        Verdict::Accept(vec![edit])
    }
}

/// Text buffer with per-character styles and a caret
#[derive(Debug, Clone, Default)]
pub struct StyledBuffer {
    /// Cells in document order
    cells: Vec<Cell>,

    /// Caret offset (0..=len)
    caret: usize,
}

impl StyledBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of characters
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell_at(&self, offset: usize) -> Option<&Cell> {
        self.cells.get(offset)
    }

    /// Whole buffer as plain text
    pub fn text(&self) -> String {
        self.cells.iter().map(|cell| cell.c).collect()
    }

    /// Plain text of a char range, clamped to the buffer
    pub fn text_range(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.cells.len());
        let start = range.start.min(end);
        self.cells[start..end].iter().map(|cell| cell.c).collect()
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn set_caret(&mut self, offset: usize) {
        self.caret = offset.min(self.cells.len());
    }

    /// Ask `gate` about `edit` and write whatever it accepts with `style`.
    ///
    /// Returns `false` when the edit was rejected.
    pub fn submit(
        &mut self,
        gate: &mut dyn EditGate,
        origin: EditOrigin,
        edit: Edit,
        style: Style,
    ) -> bool {
        match gate.review(origin, edit) {
            Verdict::Accept(edits) => {
                for edit in edits {
                    self.apply(edit, style);
                }
                true
            }
            Verdict::Reject => false,
        }
    }

    /// Write `text` at the end of the buffer through `gate`
    pub fn append(&mut self, gate: &mut dyn EditGate, text: &str, style: Style) -> bool {
        if text.is_empty() {
            return true;
        }
        let edit = Edit::Insert {
            offset: self.cells.len(),
            text: text.to_string(),
        };
        self.submit(gate, EditOrigin::Program, edit, style)
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.cells.clear();
        self.caret = 0;
    }

    /// Char ranges of each line, excluding the newline
    pub fn lines(&self) -> Vec<Range<usize>> {
        let mut lines = Vec::new();
        let mut start = 0;
        for (i, cell) in self.cells.iter().enumerate() {
            if cell.c == '\n' {
                lines.push(start..i);
                start = i + 1;
            }
        }
        lines.push(start..self.cells.len());
        lines
    }

    pub fn line_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.c == '\n').count() + 1
    }

    fn apply(&mut self, edit: Edit, style: Style) {
        match edit {
            Edit::Insert { offset, text } => self.splice(offset, 0, &text, style),
            Edit::Replace { offset, len, text } => self.splice(offset, len, &text, style),
            Edit::Remove { offset, len } => self.splice(offset, len, "", style),
        }
    }

    fn splice(&mut self, offset: usize, len: usize, text: &str, style: Style) {
        let start = offset.min(self.cells.len());
        let end = start.saturating_add(len).min(self.cells.len());
        let cells = text.chars().map(|c| Cell { c, style });
        self.cells.splice(start..end, cells);
        self.caret = self.caret.min(self.cells.len());
    }
}

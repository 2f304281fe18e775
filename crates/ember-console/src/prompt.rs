//! Separate input line for consoles without inline input
//!
//! When inline input is off the buffer only holds output, and the user edits
//! an [`InputLine`] drawn below it: a color-coded prompt followed by the
//! typed text.

/// A prompt plus a single editable value with its own caret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    /// Color-code markup shown before the value
    prompt: String,

    chars: Vec<char>,

    /// Position within `chars`, `0..=chars.len()`
    caret: usize,
}

impl InputLine {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            chars: Vec::new(),
            caret: 0,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Move the caret, clamped to the value
    pub fn set_caret(&mut self, at: usize) {
        self.caret = at.min(self.chars.len());
    }

    /// Insert `text` at the caret and move past it
    pub fn insert(&mut self, text: &str) {
        let count = text.chars().count();
        self.chars.splice(self.caret..self.caret, text.chars());
        self.caret += count;
    }

    /// Remove the char before the caret. Returns `false` at the start.
    pub fn backspace(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        self.caret -= 1;
        self.chars.remove(self.caret);
        true
    }

    /// Remove the char under the caret. Returns `false` at the end.
    pub fn delete(&mut self) -> bool {
        if self.caret >= self.chars.len() {
            return false;
        }
        self.chars.remove(self.caret);
        true
    }

    /// Replace the value, caret at its end
    pub fn set_value(&mut self, text: &str) {
        self.chars = text.chars().collect();
        self.caret = self.chars.len();
    }

    /// Hand back the value and start over empty
    pub fn take(&mut self) -> String {
        let value = self.value();
        self.clear();
        value
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.caret = 0;
    }
}

impl Default for InputLine {
    fn default() -> Self {
        Self::new(">> ")
    }
}

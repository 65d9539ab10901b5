use std::time::Instant;

use crate::worklog::{Notice, Toast};

/// How long a toast stays on screen.
pub const TOAST_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Issue,
    /// The work-log modal, shown over the issue page.
    WorkLog,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IssueFocus {
    Controls,
    CommentBox,
}

/// What happens once a dialog is acknowledged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AfterDialog {
    Nothing,
    ReloadPage,
    LeaveIssue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dialog {
    pub notice: Notice,
    pub then: AfterDialog,
}

/// Open abandon confirmation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AbandonPrompt {
    pub reason: TextInput,
    pub error: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct ActiveToast {
    pub toast: Toast,
    pub shown_at: Instant,
}

/// A text input with mid-string cursor support.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(s: &str) -> Self {
        Self {
            value: s.to_string(),
            cursor: s.len(),
        }
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character immediately before the cursor (backspace).
    /// Returns whether anything was removed.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let new_cursor = self.prev_boundary(self.cursor);
        self.value.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
        true
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.next_boundary(self.cursor);
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Returns the string split at the cursor: (before, after).
    pub fn split_at_cursor(&self) -> (&str, &str) {
        (&self.value[..self.cursor], &self.value[self.cursor..])
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        let mut p = pos;
        loop {
            p -= 1;
            if self.value.is_char_boundary(p) {
                return p;
            }
        }
    }

    fn next_boundary(&self, pos: usize) -> usize {
        let mut p = pos + 1;
        while p <= self.value.len() && !self.value.is_char_boundary(p) {
            p += 1;
        }
        p
    }
}

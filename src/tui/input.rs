//! Single-line text input for the terminal front end.
//!
//! The text itself lives in [`crate::SearchState::query`]; this only tracks
//! the cursor, as a byte offset that always sits on a char boundary.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthStr;

/// What a key press in the input amounts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Text or cursor changed, nothing else to do
    Edited,
    /// Submit the form
    Submit,
    /// Move focus to the result area
    Leave,
    Ignored,
}

#[derive(Debug, Default)]
pub struct InputState {
    pub cursor_pos: usize,
}

impl InputState {
    /// Cursor at the end of `text`
    pub fn at_end(text: &str) -> Self {
        Self {
            cursor_pos: text.len(),
        }
    }

    /// Display columns between the start of the text and the cursor
    pub fn cursor_column(&self, text: &str) -> u16 {
        let end = self.cursor_pos.min(text.len());
        text[..end].width() as u16
    }

    pub fn clear(&mut self, text: &mut String) {
        text.clear();
        self.cursor_pos = 0;
    }

    pub fn insert(&mut self, text: &mut String, c: char) {
        text.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    fn prev_boundary(&self, text: &str) -> usize {
        text[..self.cursor_pos]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self, text: &str) -> usize {
        text[self.cursor_pos..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor_pos + i)
            .unwrap_or(text.len())
    }

    pub fn handle_key(&mut self, text: &mut String, key: KeyEvent) -> InputAction {
        // Text can be replaced from outside (e.g. cleared by the empty state)
        if self.cursor_pos > text.len() || !text.is_char_boundary(self.cursor_pos) {
            self.cursor_pos = text.len();
        }

        match key.code {
            KeyCode::Enter => InputAction::Submit,
            KeyCode::Tab | KeyCode::Down => InputAction::Leave,
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear(text);
                InputAction::Edited
            }
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                InputAction::Ignored
            }
            KeyCode::Char(c) => {
                self.insert(text, c);
                InputAction::Edited
            }
            KeyCode::Backspace => {
                if self.cursor_pos > 0 {
                    let prev = self.prev_boundary(text);
                    text.remove(prev);
                    self.cursor_pos = prev;
                }
                InputAction::Edited
            }
            KeyCode::Delete => {
                if self.cursor_pos < text.len() {
                    text.remove(self.cursor_pos);
                }
                InputAction::Edited
            }
            KeyCode::Left => {
                if self.cursor_pos > 0 {
                    self.cursor_pos = self.prev_boundary(text);
                }
                InputAction::Edited
            }
            KeyCode::Right => {
                if self.cursor_pos < text.len() {
                    self.cursor_pos = self.next_boundary(text);
                }
                InputAction::Edited
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
                InputAction::Edited
            }
            KeyCode::End => {
                self.cursor_pos = text.len();
                InputAction::Edited
            }
            _ => InputAction::Ignored,
        }
    }
}

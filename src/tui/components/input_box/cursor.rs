//! Cursor position tracking for the single-line InputBox.
//!
//! `CursorState` owns the cursor byte offset and the horizontal scroll
//! offset (in display columns). Methods take `buffer: &str` explicitly;
//! the text itself is owned by `InputBox`.

use unicode_width::UnicodeWidthStr;

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible display column when the text is wider than the box
    pub scroll_cols: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_cols: 0,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_cols = 0;
    }

    /// Display column of the cursor within the whole buffer.
    pub fn column(&self, buffer: &str) -> u16 {
        u16::try_from(buffer[..self.pos].width()).unwrap_or(u16::MAX)
    }

    /// Keep the cursor inside a viewport `visible_cols` wide.
    pub fn update_scroll(&mut self, buffer: &str, visible_cols: u16) {
        if visible_cols == 0 {
            self.scroll_cols = 0;
            return;
        }
        let col = self.column(buffer);
        if col < self.scroll_cols {
            self.scroll_cols = col;
        } else if col >= self.scroll_cols.saturating_add(visible_cols) {
            self.scroll_cols = col.saturating_add(1).saturating_sub(visible_cols);
        }
    }

    pub fn move_left(&mut self, buffer: &str) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos = prev_char_boundary(buffer, self.pos);
        true
    }

    pub fn move_right(&mut self, buffer: &str) -> bool {
        if self.pos >= buffer.len() {
            return false;
        }
        self.pos = next_char_boundary(buffer, self.pos);
        true
    }
}

/// Byte offset of the character boundary before `pos`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the character boundary after `pos`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

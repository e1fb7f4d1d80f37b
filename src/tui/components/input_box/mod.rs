//! # InputBox Component
//!
//! Single-line question editor.
//!
//! ## Responsibilities
//!
//! - Capture text input and paste
//! - Handle editing (backspace, delete, cursor movement)
//! - Turn Enter into `InputEvent::Submit` instead of inserting anything
//!
//! The buffer is internal state. It is *not* cleared on submit: the
//! controller decides whether the question was accepted, and the event loop
//! calls [`InputBox::clear`] only when a request was actually sent.

mod cursor;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::core::state::Theme;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

use cursor::{CursorState, next_char_boundary, prev_char_boundary};

/// Border (2) consumed horizontally by the bordered block
const HORIZONTAL_OVERHEAD: u16 = 2;
/// Top + bottom borders
pub const INPUT_HEIGHT: u16 = 3;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed; carries the raw buffer
    Submit(String),
    ContentChanged,
}

/// Text input component.
///
/// # Props
///
/// - `theme`: current display mode (from App state)
pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Current display mode (Prop)
    pub theme: Theme,
    cursor: CursorState,
}

impl InputBox {
    pub fn new(theme: Theme) -> Self {
        Self {
            buffer: String::new(),
            theme,
            cursor: CursorState::new(),
        }
    }

    /// Empty the buffer after a question was sent.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor.reset();
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
    }

    /// The part of the buffer that fits after horizontal scrolling.
    fn visible_text(&self, visible_cols: u16) -> String {
        let mut col: u16 = 0;
        let mut shown: u16 = 0;
        let mut out = String::new();
        for ch in self.buffer.chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if col >= self.cursor.scroll_cols {
                if shown.saturating_add(w) > visible_cols {
                    break;
                }
                out.push(ch);
                shown += w;
            }
            col = col.saturating_add(w);
        }
        out
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let palette = Palette::for_theme(self.theme);
        let visible_cols = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        self.cursor.update_scroll(&self.buffer, visible_cols);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Question (Enter to send)")
            .style(palette.base())
            .border_style(palette.base().fg(palette.muted));

        let input = Paragraph::new(self.visible_text(visible_cols))
            .block(block)
            .style(palette.base());
        frame.render_widget(input, area);

        let cursor_col = self.cursor.column(&self.buffer).saturating_sub(self.cursor.scroll_cols);
        // Keep the cursor inside the box even when the column saturated
        let cursor_col = cursor_col.min(visible_cols.saturating_sub(1));
        frame.set_cursor_position((
            area.x.saturating_add(1).saturating_add(cursor_col),
            area.y.saturating_add(1),
        ));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut tmp));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single-line field: fold line breaks into spaces
                let flat = text.replace("\r\n", " ").replace(['\n', '\r'], " ");
                self.insert_str(&flat);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => self
                .cursor
                .move_left(&self.buffer)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorRight => self
                .cursor
                .move_right(&self.buffer)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorHome => (self.cursor.pos != 0).then(|| {
                self.cursor.pos = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor.pos != self.buffer.len()).then(|| {
                self.cursor.pos = self.buffer.len();
                InputEvent::ContentChanged
            }),
            // Enter never edits the buffer
            TuiEvent::Submit => Some(InputEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}

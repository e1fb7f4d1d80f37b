//! # MessageList Component
//!
//! Scrollable view of the conversation.
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the message slice
//! (props). Heights are measured on every render: the list is short and a
//! resolved placeholder can disappear from the middle of it.
//!
//! Whenever the app reports a new revision (a message was appended) the list
//! re-pins to the bottom so the newest entry is visible.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::state::ChatMessage;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

/// Lines moved per wheel notch or arrow key.
const SCROLL_STEP: u16 = 3;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    /// Rendered height of each message, in list order
    pub heights: Vec<u16>,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Last `App::revision` this list rendered
    pub seen_revision: u64,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            heights: Vec::new(),
            stick_to_bottom: true,
            viewport_height: 0,
            seen_revision: 0,
        }
    }

    fn total_height(&self) -> u16 {
        self.heights
            .iter()
            .fold(0u16, |acc, h| acc.saturating_add(*h))
    }

    fn max_offset(&self) -> u16 {
        self.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll if the user has scrolled to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Pin to the newest entry if the conversation changed since last frame.
    pub fn follow_revision(&mut self, revision: u64) {
        if revision != self.seen_revision {
            self.seen_revision = revision;
            self.stick_to_bottom = true;
        }
    }

    /// True when the user has scrolled up and there is content below.
    pub fn has_unseen_content(&self) -> bool {
        !self.stick_to_bottom && self.scroll_state.offset().y < self.max_offset()
    }

    fn scroll_up_by(&mut self, lines: u16) {
        self.clamp_scroll();
        let current = self.scroll_state.offset();
        self.stick_to_bottom = false;
        self.scroll_state.set_offset(Position {
            x: current.x,
            y: current.y.saturating_sub(lines),
        });
    }

    fn scroll_down_by(&mut self, lines: u16) {
        self.clamp_scroll();
        let current = self.scroll_state.offset();
        self.scroll_state.set_offset(Position {
            x: current.x,
            y: current.y.saturating_add(lines),
        });
        self.repin_if_at_bottom();
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let page = self.viewport_height.max(1);
        match event {
            TuiEvent::ScrollUp => self.scroll_up_by(SCROLL_STEP),
            TuiEvent::ScrollDown => self.scroll_down_by(SCROLL_STEP),
            TuiEvent::ScrollPageUp => self.scroll_up_by(page),
            TuiEvent::ScrollPageDown => self.scroll_down_by(page),
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                self.scroll_state.scroll_to_bottom();
            }
            _ => return None,
        }
        Some(())
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [ChatMessage],
    pub revision: u64,
    pub palette: Palette,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a [ChatMessage],
        revision: u64,
        palette: Palette,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            messages,
            revision,
            palette,
            spinner_frame,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        self.state.heights = self
            .messages
            .iter()
            .map(|m| Message::calculate_height(m, content_width))
            .collect();
        self.state.viewport_height = area.height;
        self.state.follow_revision(self.revision);

        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let total_height = self.state.total_height();
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let content_area = Rect::new(0, 0, content_width, total_height);
        let mut y_offset: u16 = 0;
        for (message, &height) in self.messages.iter().zip(self.state.heights.iter()) {
            // Anything past the saturated content height is not drawn
            let rect = Rect::new(0, y_offset, content_width, height).intersection(content_area);
            if rect.is_empty() {
                break;
            }
            scroll_view.render_widget(
                Message::new(message, self.palette, self.spinner_frame),
                rect,
            );
            y_offset = y_offset.saturating_add(height);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(state: &mut MessageListState, messages: &[ChatMessage], revision: u64, height: u16) -> String {
        let backend = TestBackend::new(40, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                MessageList::new(
                    state,
                    messages,
                    revision,
                    Palette::for_theme(Theme::Light),
                    0,
                )
                .render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn conversation(n: usize) -> Vec<ChatMessage> {
        (0..n).map(|i| ChatMessage::user(format!("message {}", i))).collect()
    }

    #[test]
    fn test_renders_messages() {
        let mut state = MessageListState::new();
        let messages = vec![ChatMessage::user("What is Dropout?"), ChatMessage::bot("A technique.")];
        let text = draw(&mut state, &messages, 2, 10);
        assert!(text.contains("What is Dropout?"));
        assert!(text.contains("A technique."));
        assert_eq!(state.heights, vec![3, 3]);
    }

    #[test]
    fn test_sticks_to_newest_message() {
        let mut state = MessageListState::new();
        let messages = conversation(10);
        let text = draw(&mut state, &messages, 10, 6);
        assert!(text.contains("message 9"));
        assert!(!text.contains("message 0"));
    }

    #[test]
    fn test_scroll_up_unpins_and_new_revision_repins() {
        let mut state = MessageListState::new();
        let messages = conversation(10);
        draw(&mut state, &messages, 10, 6);

        state.handle_event(&TuiEvent::ScrollPageUp);
        assert!(!state.stick_to_bottom);
        draw(&mut state, &messages, 10, 6);
        assert!(state.has_unseen_content());

        // Appending bumps the revision: the list follows the newest entry again
        let mut more = messages.clone();
        more.push(ChatMessage::bot("latest"));
        let text = draw(&mut state, &more, 11, 6);
        assert!(state.stick_to_bottom);
        assert!(text.contains("latest"));
    }

    #[test]
    fn test_scroll_down_to_end_repins() {
        let mut state = MessageListState::new();
        let messages = conversation(10);
        draw(&mut state, &messages, 10, 6);

        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
        state.handle_event(&TuiEvent::ScrollDown);
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn test_scroll_to_bottom_event() {
        let mut state = MessageListState::new();
        state.stick_to_bottom = false;
        assert_eq!(state.handle_event(&TuiEvent::ScrollToBottom), Some(()));
        assert!(state.stick_to_bottom);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('x')), None);
    }

    #[test]
    fn test_very_long_answers_render_without_overflow() {
        let mut state = MessageListState::new();
        let long = vec!["row"; 40_000].join("\n");
        let messages = vec![ChatMessage::bot(long.clone()), ChatMessage::bot(long)];
        draw(&mut state, &messages, 2, 10);

        assert_eq!(state.heights.len(), 2);
        assert!(state.heights.iter().all(|&h| h > 40_000));
        assert_eq!(state.total_height(), u16::MAX);
        assert!(!state.has_unseen_content());
    }

    #[test]
    fn test_clamp_scroll_limits_offset() {
        let mut state = MessageListState::new();
        state.heights = vec![3, 3];
        state.viewport_height = 4;
        state.scroll_state.set_offset(Position { x: 0, y: 50 });
        state.clamp_scroll();
        assert_eq!(state.scroll_state.offset().y, 2);
    }
}

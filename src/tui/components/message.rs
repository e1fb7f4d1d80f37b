use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::state::{ChatMessage, Role};
use crate::tui::component::Component;
use crate::tui::palette::Palette;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A stateless component that renders a single chat message with
/// role-based styling.
///
/// `Message` is created fresh each frame. Colours come from the active
/// `Palette`; the loading placeholder gets a spinner in its title.
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered height
/// with `textwrap` options matching `Paragraph` wrapping, so the list can lay
/// out scroll positions without rendering.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a ChatMessage,
    pub palette: Palette,
    pub spinner_frame: usize,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a ChatMessage, palette: Palette, spinner_frame: usize) -> Self {
        Self {
            message,
            palette,
            spinner_frame,
        }
    }

    /// Calculate the height required for this message given a width.
    pub fn calculate_height(message: &ChatMessage, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders + padding; still occupy one row
            return 1;
        }

        let content = message.content.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }

    fn title(&self) -> String {
        if self.message.is_loading() {
            let spin = SPINNER[self.spinner_frame % SPINNER.len()];
            return format!("bot {}", spin);
        }
        role_label(self.message.role).to_string()
    }
}

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "you",
        Role::Bot => "bot",
        Role::Error => "error",
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = self.palette.message_style(self.message);
        let border_style = style.add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .title(self.title())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(style)
            .style(self.palette.base())
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.message.content.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

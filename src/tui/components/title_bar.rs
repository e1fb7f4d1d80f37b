//! # TitleBar Component
//!
//! Top status bar: selected platform, status text, the "↓ New" indicator,
//! and the theme toggle glyph pinned to the right edge.
//!
//! The title text changes based on state:
//!
//! 1. **Unseen content**: `"Helpdesk (platform: Segment) | Ready | ↓ New"`
//! 2. **Status message**: `"Helpdesk (platform: Segment) | Ready"`
//! 3. **Default**: `"Helpdesk (platform: Segment)"`
//!
//! The glyph is the click target for the theme toggle; `icon_area` tells the
//! event loop where it was drawn.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::state::Theme;
use crate::tui::component::Component;
use crate::tui::palette::Palette;

/// Columns kept free to the right of the glyph.
const ICON_RIGHT_MARGIN: u16 = 1;

pub struct TitleBar {
    pub platform_label: String,
    pub status_message: String,
    pub has_unseen_content: bool,
    pub theme: Theme,
}

impl TitleBar {
    pub fn new(
        platform_label: String,
        status_message: String,
        has_unseen_content: bool,
        theme: Theme,
    ) -> Self {
        Self {
            platform_label,
            status_message,
            has_unseen_content,
            theme,
        }
    }

    fn title_text(&self) -> String {
        let mut title = format!("Helpdesk (platform: {})", self.platform_label);
        if !self.status_message.is_empty() {
            title.push_str(" | ");
            title.push_str(&self.status_message);
        }
        if self.has_unseen_content {
            title.push_str(" | ↓ New");
        }
        title
    }

    /// Where the theme glyph lands inside a title bar drawn at `area`.
    pub fn icon_area(area: Rect, theme: Theme) -> Rect {
        let width = (theme.icon().width() as u16).max(1);
        let x = area
            .x
            .saturating_add(area.width.saturating_sub(width + ICON_RIGHT_MARGIN));
        Rect::new(x, area.y, width.min(area.width), area.height.min(1))
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let palette = Palette::for_theme(self.theme);
        let icon_area = Self::icon_area(area, self.theme);

        let text_area = Rect {
            width: icon_area.x.saturating_sub(area.x),
            ..area
        };
        let title = Paragraph::new(Line::from(Span::raw(self.title_text()))).style(palette.base());
        frame.render_widget(title, text_area);

        let icon = Paragraph::new(self.theme.icon()).style(palette.base().fg(palette.accent));
        frame.render_widget(icon, icon_area);
    }
}

//! # PlatformSelect Component
//!
//! The platform dropdown, collapsed to one line: shows the selected option's
//! label and cycles with Tab / Shift+Tab. The selected option's `name` is
//! what goes into the request body.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::config::PlatformEntry;
use crate::core::state::Theme;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

/// Emitted when the selection moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformEvent {
    Changed(String),
}

pub struct PlatformSelect {
    options: Vec<PlatformEntry>,
    selected: usize,
    /// Current display mode (Prop)
    pub theme: Theme,
}

impl PlatformSelect {
    /// `selected` is clamped into range. An empty option list is allowed and
    /// yields an empty platform value.
    pub fn new(options: Vec<PlatformEntry>, selected: usize, theme: Theme) -> Self {
        let selected = selected.min(options.len().saturating_sub(1));
        Self {
            options,
            selected,
            theme,
        }
    }

    pub fn selected(&self) -> Option<&PlatformEntry> {
        self.options.get(self.selected)
    }

    /// The value sent to the backend.
    pub fn value(&self) -> String {
        self.selected().map(|p| p.name.clone()).unwrap_or_default()
    }

    pub fn label(&self) -> String {
        self.selected()
            .map(|p| p.display_label().to_string())
            .unwrap_or_default()
    }

    fn step(&mut self, forward: bool) -> Option<PlatformEvent> {
        let len = self.options.len();
        if len < 2 {
            return None;
        }
        self.selected = if forward {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
        Some(PlatformEvent::Changed(self.value()))
    }
}

impl EventHandler for PlatformSelect {
    type Event = PlatformEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::NextPlatform => self.step(true),
            TuiEvent::PrevPlatform => self.step(false),
            _ => None,
        }
    }
}

impl Component for PlatformSelect {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let palette = Palette::for_theme(self.theme);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Platform (Tab)")
            .style(palette.base())
            .border_style(palette.base().fg(palette.muted));
        let text = format!("{} ▾", self.label());
        let widget = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .style(palette.base().fg(palette.accent));
        frame.render_widget(widget, area);
    }
}

//! Colour sets for the two display modes.
//!
//! Every widget takes its colours from a `Palette` instead of hardcoding
//! them, so toggling the theme restyles the whole frame on the next draw.

use ratatui::style::{Color, Modifier, Style};

use crate::core::state::{ChatMessage, Role, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub user: Color,
    pub bot: Color,
    pub error: Color,
    pub accent: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::White,
                text: Color::Black,
                muted: Color::Gray,
                user: Color::Blue,
                bot: Color::Green,
                error: Color::Red,
                accent: Color::Magenta,
            },
            Theme::Dark => Self {
                background: Color::Black,
                text: Color::White,
                muted: Color::DarkGray,
                user: Color::LightCyan,
                bot: Color::LightGreen,
                error: Color::LightRed,
                accent: Color::LightMagenta,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    /// Style for a message body, chosen by role; placeholders are muted italic.
    pub fn message_style(&self, message: &ChatMessage) -> Style {
        if message.is_loading() {
            return self
                .base()
                .fg(self.muted)
                .add_modifier(Modifier::ITALIC);
        }
        match message.role {
            Role::User => self.base().fg(self.user),
            Role::Bot => self.base().fg(self.bot),
            Role::Error => self.base().fg(self.error).add_modifier(Modifier::BOLD),
        }
    }
}

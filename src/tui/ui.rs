use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::widgets::Block;

use crate::core::state::{App, Theme};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{INPUT_HEIGHT, MessageList, TitleBar};
use crate::tui::palette::Palette;

/// Width of the platform selector next to the input box.
const PLATFORM_WIDTH: u16 = 22;

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiAreas {
    pub title: Rect,
    pub messages: Rect,
    pub input: Rect,
    pub platform: Rect,
}

pub fn layout_areas(area: Rect) -> UiAreas {
    use Constraint::{Length, Min};
    let [title, messages, bottom] =
        Layout::vertical([Length(1), Min(0), Length(INPUT_HEIGHT)]).areas(area);
    let [input, platform] = Layout::horizontal([Min(0), Length(PLATFORM_WIDTH)]).areas(bottom);
    UiAreas {
        title,
        messages,
        input,
        platform,
    }
}

/// Whether a click at (`col`, `row`) landed on the theme glyph.
pub fn theme_toggle_hit(col: u16, row: u16, frame_area: Rect, theme: Theme) -> bool {
    let title = layout_areas(frame_area).title;
    TitleBar::icon_area(title, theme).contains(Position::new(col, row))
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let palette = Palette::for_theme(app.theme);
    let areas = layout_areas(frame.area());

    // Paint the whole frame so the background follows the theme
    frame.render_widget(Block::default().style(palette.base()), frame.area());

    MessageList::new(
        &mut tui.message_list,
        &app.messages,
        app.revision,
        palette,
        spinner_frame,
    )
    .render(frame, areas.messages);

    TitleBar::new(
        tui.platform_select.label(),
        app.status_message.clone(),
        tui.message_list.has_unseen_content(),
        app.theme,
    )
    .render(frame, areas.title);

    tui.input_box.render(frame, areas.input);
    tui.platform_select.render(frame, areas.platform);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::config::default_platforms;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::style::Color;

    fn tui_state(theme: Theme) -> TuiState {
        TuiState::new(default_platforms(), 0, theme)
    }

    #[test]
    fn test_layout_areas() {
        let areas = layout_areas(Rect::new(0, 0, 80, 24));
        assert_eq!(areas.title, Rect::new(0, 0, 80, 1));
        assert_eq!(areas.messages, Rect::new(0, 1, 80, 20));
        assert_eq!(areas.input, Rect::new(0, 21, 58, 3));
        assert_eq!(areas.platform, Rect::new(58, 21, 22, 3));
    }

    #[test]
    fn test_theme_toggle_hit() {
        let area = Rect::new(0, 0, 80, 24);
        let icon = TitleBar::icon_area(layout_areas(area).title, Theme::Light);
        assert!(theme_toggle_hit(icon.x, 0, area, Theme::Light));
        assert!(!theme_toggle_hit(icon.x, 5, area, Theme::Light));
        assert!(!theme_toggle_hit(0, 0, area, Theme::Light));
    }

    #[test]
    fn test_draw_full_frame() {
        let mut app = test_app();
        update(
            &mut app,
            Action::Submit {
                question: "What is Dropout?".to_string(),
                platform: "segment".to_string(),
            },
        );
        let mut tui = tui_state(app.theme);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw_ui(f, &app, &mut tui, 0)).unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("Helpdesk (platform: Segment)"));
        assert!(text.contains("What is Dropout?"));
        assert!(text.contains("Thinking..."));
        assert!(text.contains("Question"));
        assert_eq!(buffer[(0, 0)].bg, Color::White);
    }

    #[test]
    fn test_dark_theme_paints_background() {
        let mut app = test_app();
        update(&mut app, Action::ToggleTheme);
        let mut tui = tui_state(app.theme);

        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|f| draw_ui(f, &app, &mut tui, 0)).unwrap();

        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(0, 0)].bg, Color::Black);
    }
}

//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Flow
//!
//! ```text
//! crossterm event → TuiEvent → component / Action → update() → Effect
//!                                                              │
//!                         Action::AskResolved ← tokio task ←───┘ SpawnAsk
//! ```
//!
//! ## Redraw Strategy
//!
//! - **Waiting** (a request in flight): draws every ~80ms so the spinner moves.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.

mod component;
mod components;
mod event;
mod palette;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::api::{AskBackend, AskRequest};
use crate::core::action::{Action, Effect, update};
use crate::core::config::{PlatformEntry, ResolvedConfig};
use crate::core::state::{App, RequestId, Theme};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState, PlatformEvent, PlatformSelect};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub platform_select: PlatformSelect,
}

impl TuiState {
    pub fn new(platforms: Vec<PlatformEntry>, selected_platform: usize, theme: Theme) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(theme),
            platform_select: PlatformSelect::new(platforms, selected_platform, theme),
        }
    }

    /// Push the current theme down to components that take it as a prop.
    fn sync_theme(&mut self, theme: Theme) {
        self.input_box.theme = theme;
        self.platform_select.theme = theme;
    }
}

/// Runs `restore` when dropped, so every exit path (including `?`) leaves
/// the terminal usable.
struct RestoreOnDrop {
    restore: fn(),
}

impl Drop for RestoreOnDrop {
    fn drop(&mut self) {
        (self.restore)();
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock, // blinking resets on every draw
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Routes one terminal event. Returns the effect the caller must carry out.
fn handle_event(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    frame_area: ratatui::layout::Rect,
) -> Effect {
    match event {
        TuiEvent::Resize => Effect::None,
        TuiEvent::ForceQuit | TuiEvent::Quit => update(app, Action::Quit),
        TuiEvent::ToggleTheme => update(app, Action::ToggleTheme),
        TuiEvent::MouseClick(col, row) => {
            if ui::theme_toggle_hit(col, row, frame_area, app.theme) {
                update(app, Action::ToggleTheme)
            } else {
                Effect::None
            }
        }
        TuiEvent::NextPlatform | TuiEvent::PrevPlatform => {
            if let Some(PlatformEvent::Changed(name)) = tui.platform_select.handle_event(&event) {
                debug!("Platform changed to {}", name);
            }
            Effect::None
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.message_list.handle_event(&event);
            Effect::None
        }
        _ => match tui.input_box.handle_event(&event) {
            Some(InputEvent::Submit(question)) => {
                let effect = update(
                    app,
                    Action::Submit {
                        question,
                        platform: tui.platform_select.value(),
                    },
                );
                if matches!(effect, Effect::SpawnAsk { .. }) {
                    tui.input_box.clear();
                }
                effect
            }
            Some(InputEvent::ContentChanged) | None => Effect::None,
        },
    }
}

pub fn run(config: ResolvedConfig, backend: Arc<dyn AskBackend>) -> std::io::Result<()> {
    info!("Using backend at {}", backend.endpoint());
    let mut app = App::new(backend, config.theme);
    let mut tui = TuiState::new(config.platforms, config.selected_platform, app.theme);

    let mut terminal = ratatui::init();
    let _restore_guard = RestoreOnDrop {
        restore: ratatui::restore,
    };
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true;
    let mut should_quit = false;

    while !should_quit {
        tui.sync_theme(app.theme);
        let animating = app.is_loading();

        if needs_redraw || animating {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain everything pending before the next draw
        let frame_area = terminal.get_frame().area();
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match handle_event(&mut app, &mut tui, event, frame_area) {
                Effect::Quit => {
                    should_quit = true;
                    break;
                }
                Effect::SpawnAsk {
                    request_id,
                    request,
                } => spawn_ask(app.backend.clone(), request_id, request, tx.clone()),
                Effect::None => {}
            }
        }

        // Handle finished requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if update(&mut app, action) == Effect::Quit {
                should_quit = true;
            }
        }
    }

    info!("Shutting down with {} request(s) in flight", app.pending_count());
    Ok(())
}

/// Posts one question on the runtime and reports the outcome back as an
/// `Action::AskResolved`. No timeout, no retry.
fn spawn_ask(
    backend: Arc<dyn AskBackend>,
    request_id: RequestId,
    request: AskRequest,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning request {}", request_id);
    tokio::spawn(async move {
        let started = Instant::now();
        let result = backend.ask(&request).await;
        debug!(
            "Request {} finished in {}ms (ok={})",
            request_id,
            started.elapsed().as_millis(),
            result.is_ok()
        );
        if tx.send(Action::AskResolved { request_id, result }).is_err() {
            warn!("Failed to deliver result for request {}: receiver dropped", request_id);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::default_platforms;
    use crate::core::reply::{EMPTY_QUESTION, LOADING};
    use crate::core::state::ChatMessage;
    use crate::test_support::test_app;
    use ratatui::layout::Rect;

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    fn setup() -> (App, TuiState) {
        let app = test_app();
        let tui = TuiState::new(default_platforms(), 0, app.theme);
        (app, tui)
    }

    fn type_text(app: &mut App, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            handle_event(app, tui, TuiEvent::InputChar(c), AREA);
        }
    }

    #[test]
    fn test_enter_sends_and_clears_input() {
        let (mut app, mut tui) = setup();
        type_text(&mut app, &mut tui, "What is Dropout?");
        handle_event(&mut app, &mut tui, TuiEvent::NextPlatform, AREA);

        let effect = handle_event(&mut app, &mut tui, TuiEvent::Submit, AREA);
        match effect {
            Effect::SpawnAsk { request, .. } => {
                assert_eq!(
                    request,
                    AskRequest {
                        question: "What is Dropout?".to_string(),
                        platform: "mparticle".to_string(),
                    }
                );
            }
            other => panic!("expected SpawnAsk, got {:?}", other),
        }
        assert!(tui.input_box.buffer.is_empty());
        assert_eq!(app.messages.len(), 2);
        assert_eq!(app.messages[1].content, LOADING);
    }

    #[test]
    fn test_enter_on_blank_input_keeps_buffer() {
        let (mut app, mut tui) = setup();
        type_text(&mut app, &mut tui, "  ");

        let effect = handle_event(&mut app, &mut tui, TuiEvent::Submit, AREA);
        assert_eq!(effect, Effect::None);
        assert_eq!(tui.input_box.buffer, "  ");
        assert_eq!(app.messages, vec![ChatMessage::error(EMPTY_QUESTION)]);
    }

    #[test]
    fn test_theme_shortcut_and_click() {
        let (mut app, mut tui) = setup();
        handle_event(&mut app, &mut tui, TuiEvent::ToggleTheme, AREA);
        assert_eq!(app.theme, Theme::Dark);

        let icon = components::TitleBar::icon_area(ui::layout_areas(AREA).title, app.theme);
        handle_event(&mut app, &mut tui, TuiEvent::MouseClick(icon.x, icon.y), AREA);
        assert_eq!(app.theme, Theme::Light);

        // Clicks elsewhere do nothing
        handle_event(&mut app, &mut tui, TuiEvent::MouseClick(0, 10), AREA);
        assert_eq!(app.theme, Theme::Light);
    }

    #[test]
    fn test_sync_theme_updates_props() {
        let (_, mut tui) = setup();
        tui.sync_theme(Theme::Dark);
        assert_eq!(tui.input_box.theme, Theme::Dark);
        assert_eq!(tui.platform_select.theme, Theme::Dark);
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, mut tui) = setup();
        assert_eq!(handle_event(&mut app, &mut tui, TuiEvent::Quit, AREA), Effect::Quit);
        assert_eq!(
            handle_event(&mut app, &mut tui, TuiEvent::ForceQuit, AREA),
            Effect::Quit
        );
    }

    #[test]
    fn test_restore_runs_on_early_return() {
        use std::sync::atomic::{AtomicBool, Ordering};

        static RESTORED: AtomicBool = AtomicBool::new(false);

        fn mark_restored() {
            RESTORED.store(true, Ordering::SeqCst);
        }

        fn failing_setup() -> std::io::Result<()> {
            let _guard = RestoreOnDrop {
                restore: mark_restored,
            };
            let enable_modes: std::io::Result<()> = Err(std::io::Error::other("terminal gone"));
            enable_modes?;
            Ok(())
        }

        assert!(failing_setup().is_err());
        assert!(RESTORED.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_spawn_ask_reports_back() {
        let app = test_app();
        let (tx, rx) = mpsc::channel();
        spawn_ask(
            app.backend.clone(),
            7,
            AskRequest {
                question: "q".to_string(),
                platform: "segment".to_string(),
            },
            tx,
        );

        let action = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap()
            .unwrap();
        match action {
            Action::AskResolved { request_id, result } => {
                assert_eq!(request_id, 7);
                let response = result.unwrap();
                assert_eq!(
                    response.first_answer().map(|a| a.content.as_str()),
                    Some("stub answer")
                );
            }
            other => panic!("expected AskResolved, got {:?}", other),
        }
    }
}

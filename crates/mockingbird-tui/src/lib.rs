//! mockingbird-tui: Terminal UI for the mockingbird chat mockup
//!
//! This crate provides the TUI layer, including:
//! - Home screen with the product card and suggestion cards
//! - Chat screen (sidebar, transcript with typing animation, tool panel)
//! - Shared widgets, theming, and text utilities

mod app;
mod event;
mod layout;
mod screens;
#[cfg(test)]
pub mod test_utils;
mod text;
mod theme;
mod widgets;

use screens::Screen as ScreenTrait;

pub use app::{App, Focus, Options, Screen, Speed, TICK_RATE_MS};
pub use event::{Action, Event, EventHandler};
pub use mockingbird_core;
pub use theme::{IconMode, Theme};

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop, and restores the terminal on
/// exit.
pub async fn run_tui(options: Options) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(options)?;
    let mut events = EventHandler::new(TICK_RATE_MS);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Draw
        terminal.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();

            match app.screen {
                Screen::Home => screens::home::HomeScreen.render(app, area, buf),
                Screen::Chat => screens::chat::ChatScreen.render(app, area, buf),
            }

            if app.show_help {
                screens::render_help_overlay(app, area, buf);
            }
        })?;

        // Handle events
        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    // The input bar consumes plain keys while it has focus;
                    // everything else becomes an action.
                    let input_focused = app.screen == Screen::Home
                        || (app.screen == Screen::Chat && app.focus == Focus::Input);
                    let consumed =
                        input_focused && !app.show_help && app.handle_input_key(key);
                    if !consumed {
                        app.handle_action(event::key_to_action(key));
                    }
                }
                Event::Mouse(mouse) => {
                    use crossterm::event::MouseEventKind;
                    match mouse.kind {
                        MouseEventKind::ScrollUp => app.handle_action(Action::Up),
                        MouseEventKind::ScrollDown => app.handle_action(Action::Down),
                        _ => {}
                    }
                }
                Event::Tick => {
                    app.tick();
                }
                Event::Resize(_, _) => {
                    // Terminal handles resize automatically
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_version() {
        let version = tui_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}



/// Navigation tests driving event handling and screen transitions.
#[cfg(test)]
mod navigation_tests {
    use crate::app::{Focus, Screen};
    use crate::event::Action;
    use crate::test_utils::{create_test_app, create_test_app_in_chat};

    #[test]
    fn test_home_esc_quits() {
        let mut app = create_test_app();
        assert_eq!(app.screen, Screen::Home);
        app.handle_action(Action::Back);
        assert!(app.should_quit);
    }

    #[test]
    fn test_chat_esc_returns_home() {
        let mut app = create_test_app_in_chat();
        app.handle_action(Action::Back);
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn test_tab_cycles_focus_and_back(){
        let mut app = create_test_app_in_chat();
        assert_eq!(app.focus, Focus::Input);

        app.handle_action(Action::NextFocus);
        assert_eq!(app.focus, Focus::Sidebar);
        app.handle_action(Action::PrevFocus);
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn test_tool_panel_toggle_moves_focus() {
        let mut app = create_test_app_in_chat();
        app.handle_action(Action::ToggleTools);
        assert!(app.tool_panel_open);
        assert_eq!(app.focus, Focus::Tools);

        app.handle_action(Action::ToggleTools);
        assert!(!app.tool_panel_open);
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = create_test_app_in_chat();
        app.handle_action(Action::Help);
        assert!(app.show_help);
        app.handle_action(Action::Help);
        assert!(!app.show_help);
    }

    #[test]
    fn test_quit_from_chat() {
        let mut app = create_test_app_in_chat();
        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }
}

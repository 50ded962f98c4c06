//! Test utilities for mockingbird-tui rendering and navigation tests.
//!
//! Provides helpers for creating test terminals, rendering screens, and
//! converting buffers to strings for assertions.

use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};

use crate::app::{App, Screen, Speed};
use crate::screens::Screen as ScreenTrait;

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 100;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 30;

/// Create a test terminal with the default dimensions.
pub fn create_test_terminal() -> Terminal<TestBackend> {
    create_test_terminal_sized(TEST_WIDTH, TEST_HEIGHT)
}

/// Create a test terminal with custom dimensions.
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Create a test app on the home screen with the embedded script.
pub fn create_test_app() -> App {
    App::new_for_test()
}

/// Create a test app on the chat screen with the first seeded conversation.
pub fn create_test_app_in_chat() -> App {
    let mut app = App::new_for_test();
    app.screen = Screen::Chat;
    app
}

/// Create a test app mid-conversation: one exchange committed instantly.
pub fn create_test_app_with_exchange() -> App {
    let mut app = App::new_for_test();
    app.speed = Speed::Instant;
    app.screen = Screen::Chat;
    app.store.new_chat();
    app.submit_message("Can you help me refactor this module?".to_string());
    app
}

/// Convert a buffer to a string representation for assertions.
///
/// Trailing whitespace is trimmed from each line.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let cell = buffer.cell((x, y)).unwrap();
            result.push_str(cell.symbol());
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}

/// Render a screen to a buffer and return it as a string.
pub fn render_screen_to_string<S: ScreenTrait>(screen: &S, app: &App) -> String {
    render_screen_to_string_sized(screen, app, TEST_WIDTH, TEST_HEIGHT)
}

/// Render a screen to a buffer with custom dimensions.
pub fn render_screen_to_string_sized<S: ScreenTrait>(
    screen: &S,
    app: &App,
    width: u16,
    height: u16,
) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    screen.render(app, area, &mut buffer);
    buffer_to_string(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_terminal() {
        let terminal = create_test_terminal();
        let size = terminal.size().unwrap();
        assert_eq!(size.width, TEST_WIDTH);
        assert_eq!(size.height, TEST_HEIGHT);
    }

    #[test]
    fn test_create_test_app() {
        let app = create_test_app();
        assert_eq!(app.screen, Screen::Home);
        assert_eq!(app.store.conversations().len(), 3);
    }

    #[test]
    fn test_create_test_app_with_exchange() {
        let app = create_test_app_with_exchange();
        assert_eq!(app.store.active().messages.len(), 2);
        assert!(!app.is_revealing());
    }

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        let result = buffer_to_string(&buffer);
        assert!(result.contains("Hello"));
        assert!(result.contains("World"));
    }
}

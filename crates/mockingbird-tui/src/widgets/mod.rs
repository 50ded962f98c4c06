//! Shared widgets for the mockingbird TUI.

mod input_bar;
mod sidebar;
mod status_bar;
mod tool_panel;
mod transcript;

pub use input_bar::{InputBar, InputState};
pub use sidebar::Sidebar;
pub use status_bar::{KeyHint, StatusBar};
pub use tool_panel::ToolPanel;
pub use transcript::Transcript;

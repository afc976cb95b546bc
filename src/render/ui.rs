//! Terminal rendering components.
//!
//! This module hosts the concrete terminal UI implementation along with the view-model,
//! user-facing text and styling utilities.

pub mod messages;
pub mod renderer;
pub mod state;
pub mod terminal;
pub mod theme;

pub use renderer::UIRenderer;
pub use state::{
    Focus, FormField, LookupPanel, Modal, ProductForm, ProductListView, StatusLine, Tone, UiMode,
    ViewModel,
};
pub use terminal::TerminalUI;
pub use theme::ColorTheme;

#[cfg(test)]
pub use renderer::tests::MockUIRenderer;

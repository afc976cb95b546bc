//! UI renderer trait
//!
//! This module defines the `UIRenderer` trait for drawing the catalog screen and managing
//! terminal lifecycle hooks such as initialization and cleanup.

use crate::error::Result;
use crate::render::ui::state::ViewModel;

/// Core trait for UI rendering
pub trait UIRenderer {
    /// Draw the current view-model: list, active form, lookup panel, status line and any modal
    fn render(&mut self, view: &ViewModel) -> Result<()>;

    /// Enter raw mode and the alternate screen
    fn initialize(&mut self) -> Result<()>;

    /// Restore the terminal to the state it was in before `initialize`
    fn cleanup(&mut self) -> Result<()>;

    /// Get current terminal dimensions
    fn get_terminal_size(&self) -> Result<(u16, u16)>; // (width, height)
}

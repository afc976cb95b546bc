//! Rendering subsystem.
//!
//! `protocol` carries commands to the API worker and its responses back, `service` turns
//! input and responses into view-model changes, and `ui` draws the view-model.

pub mod protocol;
pub mod service;
pub mod ui;

pub use protocol::{ApiCommand, ApiResponse, RequestId, WriteKind};
pub use service::{Effects, ProductController};

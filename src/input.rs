//! Terminal input: raw event collection and translation into `InputAction`s.

pub mod raw;
pub mod service;

// Modules outside this crate should prefer importing from `crate::input` rather than reaching
// into submodules.
pub use raw::ScrollDirection;
pub use service::{spawn_input_thread, translate_key, InputAction, InputService};

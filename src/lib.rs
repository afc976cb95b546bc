//! # prodtui - Terminal Client for a Product Catalog Service
//!
//! A keyboard-driven terminal front end for a REST product service exposing `/products`.
//!
//! ## Features
//!
//! - **Product List**: every product with name, description and price, refreshed after each write
//! - **Add and Update Forms**: client-side validation before anything is sent
//! - **Delete with Confirmation**: a modal guards every removal
//! - **Lookup by ID**: a detail panel that reports found, not found and failure outcomes
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`config`] - Layered runtime configuration
//! - [`catalog`] - Product model, validation, REST client and the API worker
//! - [`input`] - Terminal event collection and key translation
//! - [`render`] - Controller, worker protocol and terminal user interface
//! - [`app`] - Event loop and component coordination

// Core modules
pub mod config;
pub mod error;

// Subsystems
pub mod catalog;
pub mod input;
pub mod render;

// Core components
pub mod app;

// Re-export commonly used types for convenience
pub use error::{ProdtuiError, Result};

// Public API surface for external usage
pub use app::Application;
pub use catalog::{HttpProductApi, Product, ProductApi, ProductDraft, ProductId};
pub use config::{AppConfig, ConfigOverrides};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Product catalog access: the wire model, client-side validation, the REST client, and the
//! worker task that executes requests on behalf of the controller.

pub mod client;
pub mod model;
pub mod validation;
pub mod worker;

pub use client::{ApiError, ApiResult, HttpProductApi, ProductApi, UNKNOWN_SERVER_ERROR};
pub use model::{format_price, Product, ProductDraft, ProductId};
pub use validation::{validate_create, validate_update, ValidationError};
pub use worker::api_worker_loop;

//! REST client for the product service.
//!
//! The [`ProductApi`] trait is the seam between the worker and the network; the worker only
//! ever sees `ApiResult` values, so every failure (HTTP status, transport, undecodable body)
//! reaches the controller as data rather than as a propagated error.

use crate::catalog::model::{Product, ProductDraft, ProductId};
use crate::error::{ProdtuiError, Result};
use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::{Client, Response, Url};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Message used when a failed response carries no readable JSON body.
pub const UNKNOWN_SERVER_ERROR: &str = "Erro desconhecido do servidor.";

/// Outcome of a single catalog request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The service answered with a status outside 2xx
    #[error("{code} - {status_text}")]
    Status {
        code: u16,
        status_text: String,
        /// Server-provided `message`, the status text, or [`UNKNOWN_SERVER_ERROR`]
        message: String,
    },

    /// The request never produced a response
    #[error("transport failure: {0}")]
    Transport(String),

    /// A success response whose body could not be decoded
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text shown after "Falha ao ... produto:" for status failures.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => Some(message),
            _ => None,
        }
    }

    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Operations offered by the product service.
///
/// Implementations must be thread-safe; the worker holds them behind an `Arc`.
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// `GET /products`
    async fn list_products(&self) -> ApiResult<Vec<Product>>;

    /// `GET /products/{id}`; the service answers with zero or one records
    async fn find_product(&self, id: &ProductId) -> ApiResult<Vec<Product>>;

    /// `POST /products`
    async fn create_product(&self, draft: &ProductDraft) -> ApiResult<()>;

    /// `PUT /products/{id}`
    async fn update_product(&self, id: &ProductId, draft: &ProductDraft) -> ApiResult<()>;

    /// `DELETE /products/{id}`
    async fn delete_product(&self, id: &ProductId) -> ApiResult<()>;
}

/// [`ProductApi`] over HTTP with `reqwest`.
pub struct HttpProductApi {
    http: Client,
    base_url: Url,
}

impl HttpProductApi {
    /// Build a client for the service rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ProdtuiError::client_setup(format!("invalid base URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ProdtuiError::client_setup(format!(
                "base URL {base_url} cannot carry a path"
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ProdtuiError::client_setup(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, id: Option<&ProductId>) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: http(s) URLs always accept path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("products");
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        url
    }

    async fn expect_success(&self, response: Response, operation: &str) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let status_text = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        let message = match response.json::<Value>().await {
            Ok(body) => message_from_body(&body).unwrap_or_else(|| status_text.clone()),
            Err(_) => UNKNOWN_SERVER_ERROR.to_string(),
        };
        warn!(
            "{operation} rejected by server: {} {}",
            status.as_u16(),
            message
        );

        Err(ApiError::Status {
            code: status.as_u16(),
            status_text,
            message,
        })
    }
}

/// `message` of a JSON error body. Missing, null, false, zero and empty values yield `None`;
/// other scalars are shown in their JSON form.
fn message_from_body(body: &Value) -> Option<String> {
    match body.get("message")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        let url = self.endpoint(None);
        debug!("GET {url}");
        let response = self.http.get(url).send().await.map_err(|e| {
            error!("list products: {e}");
            ApiError::from_reqwest(e)
        })?;
        let response = self.expect_success(response, "list products").await?;
        response.json().await.map_err(ApiError::from_reqwest)
    }

    async fn find_product(&self, id: &ProductId) -> ApiResult<Vec<Product>> {
        let url = self.endpoint(Some(id));
        debug!("GET {url}");
        let response = self.http.get(url).send().await.map_err(|e| {
            error!("find product {id}: {e}");
            ApiError::from_reqwest(e)
        })?;
        let response = self.expect_success(response, "find product").await?;
        response.json().await.map_err(ApiError::from_reqwest)
    }

    async fn create_product(&self, draft: &ProductDraft) -> ApiResult<()> {
        let url = self.endpoint(None);
        debug!("POST {url}");
        let response = self
            .http
            .post(url)
            .json(draft)
            .send()
            .await
            .map_err(|e| {
                error!("create product: {e}");
                ApiError::from_reqwest(e)
            })?;
        self.expect_success(response, "create product").await?;
        Ok(())
    }

    async fn update_product(&self, id: &ProductId, draft: &ProductDraft) -> ApiResult<()> {
        let url = self.endpoint(Some(id));
        debug!("PUT {url}");
        let response = self
            .http
            .put(url)
            .json(draft)
            .send()
            .await
            .map_err(|e| {
                error!("update product {id}: {e}");
                ApiError::from_reqwest(e)
            })?;
        self.expect_success(response, "update product").await?;
        Ok(())
    }

    async fn delete_product(&self, id: &ProductId) -> ApiResult<()> {
        let url = self.endpoint(Some(id));
        debug!("DELETE {url}");
        let response = self.http.delete(url).send().await.map_err(|e| {
            error!("delete product {id}: {e}");
            ApiError::from_reqwest(e)
        })?;
        self.expect_success(response, "delete product").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_built_under_base_path() {
        let api = HttpProductApi::new("http://localhost:3000", None).unwrap();
        assert_eq!(
            api.endpoint(None).as_str(),
            "http://localhost:3000/products"
        );
        assert_eq!(
            api.endpoint(Some(&ProductId::new("7"))).as_str(),
            "http://localhost:3000/products/7"
        );

        let nested = HttpProductApi::new("http://example.test/api/", None).unwrap();
        assert_eq!(
            nested.endpoint(None).as_str(),
            "http://example.test/api/products"
        );
    }

    #[test]
    fn identifiers_are_percent_encoded() {
        let api = HttpProductApi::new("http://localhost:3000", None).unwrap();
        let url = api.endpoint(Some(&ProductId::new("a b/c")));
        assert_eq!(url.as_str(), "http://localhost:3000/products/a%20b%2Fc");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            HttpProductApi::new("not a url", None),
            Err(ProdtuiError::ClientSetup { .. })
        ));
        assert!(matches!(
            HttpProductApi::new("mailto:shop@example.test", None),
            Err(ProdtuiError::ClientSetup { .. })
        ));
    }

    #[test]
    fn only_status_errors_carry_server_message() {
        let status = ApiError::Status {
            code: 409,
            status_text: "Conflict".to_string(),
            message: "duplicate name".to_string(),
        };
        assert_eq!(status.server_message(), Some("duplicate name"));
        assert_eq!(status.to_string(), "409 - Conflict");
        assert_eq!(ApiError::Transport("refused".into()).server_message(), None);
    }

    #[test]
    fn error_body_message_extraction() {
        use serde_json::json;

        assert_eq!(
            message_from_body(&json!({"message": "Nome duplicado"})).as_deref(),
            Some("Nome duplicado")
        );
        assert_eq!(message_from_body(&json!({"message": 42})).as_deref(), Some("42"));
        assert_eq!(message_from_body(&json!({"message": ""})), None);
        assert_eq!(message_from_body(&json!({"message": null})), None);
        assert_eq!(message_from_body(&json!({"message": 0})), None);
        assert_eq!(message_from_body(&json!({})), None);
        assert_eq!(message_from_body(&json!("oops")), None);
        assert_eq!(message_from_body(&json!([])), None);
        assert_eq!(message_from_body(&Value::Null), None);
    }
}

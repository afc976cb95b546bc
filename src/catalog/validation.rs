//! Client-side checks applied to form input before any write request is issued.

use crate::catalog::model::{ProductDraft, ProductId};
use thiserror::Error;

/// Reasons a form submission is blocked. The display text is what the user sees in the alert.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Erro: ID do produto não selecionado para atualização.")]
    MissingId,

    #[error("Nome e Preço são obrigatórios!")]
    MissingRequired,

    #[error("Nome e Preço são obrigatórios para atualização!")]
    MissingRequiredForUpdate,

    #[error("O preço deve ser um número válido.")]
    InvalidPrice,

    #[error("O preço não pode ser negativo.")]
    NegativePrice,
}

/// Validate the add form and build the create payload.
pub fn validate_create(
    name: &str,
    description: &str,
    price: &str,
) -> Result<ProductDraft, ValidationError> {
    if name.trim().is_empty() || price.trim().is_empty() {
        return Err(ValidationError::MissingRequired);
    }
    build_draft(name, description, price)
}

/// Validate the update form. The id comes from the row the update was started from.
pub fn validate_update(
    id: Option<&ProductId>,
    name: &str,
    description: &str,
    price: &str,
) -> Result<(ProductId, ProductDraft), ValidationError> {
    let id = match id {
        Some(id) if !id.as_str().is_empty() => id.clone(),
        _ => return Err(ValidationError::MissingId),
    };
    if name.trim().is_empty() || price.trim().is_empty() {
        return Err(ValidationError::MissingRequiredForUpdate);
    }
    Ok((id, build_draft(name, description, price)?))
}

/// Parse a price field. Must be a finite number and not negative.
pub fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    let price = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidPrice)?;
    if !price.is_finite() {
        return Err(ValidationError::InvalidPrice);
    }
    if price < 0.0 {
        return Err(ValidationError::NegativePrice);
    }
    Ok(price)
}

fn build_draft(name: &str, description: &str, price: &str) -> Result<ProductDraft, ValidationError> {
    Ok(ProductDraft {
        name: name.to_string(),
        description: description.to_string(),
        price: parse_price(price)?,
    })
}

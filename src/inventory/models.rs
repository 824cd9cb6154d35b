//! Inventory Domain Models
//!
//! Data structures for the item catalog and the request/response shapes of
//! the item endpoints.

use crate::error::AppError;
use crate::store::Document;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Catalog Models
// =============================================================================

/// A purchasable item in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Document identifier, assigned on creation
    #[serde(rename = "_id")]
    pub id: Uuid,

    /// Stock keeping unit, unique across the catalog
    pub sku: String,

    /// Display name of the product
    pub name: String,

    /// Unit price
    pub price: f64,

    /// Optional product category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Item {
    pub fn new(fields: ItemFields) -> Self {
        Self {
            id: Uuid::new_v4(),
            sku: fields.sku,
            name: fields.name,
            price: fields.price,
            category: fields.category,
        }
    }
}

impl Document for Item {
    fn key(&self) -> &str {
        &self.sku
    }
}

// =============================================================================
// Inputs
// =============================================================================

/// Message returned when sku, name or price is missing
pub const MISSING_FIELDS_MESSAGE: &str = "SKU, name, and price are required";

/// Raw body of the add-item and add-to-cart requests
///
/// Every field is optional at the wire level so that a missing field is
/// reported as a validation error instead of a parse failure.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ItemInput {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
}

/// An [`ItemInput`] whose required fields are known to be present
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFields {
    pub sku: String,
    pub name: String,
    pub price: f64,
    pub category: Option<String>,
}

impl ItemInput {
    /// Checks that sku, name and price are present.
    ///
    /// Empty strings and a zero price count as missing; whitespace is kept as is.
    pub fn validate(self) -> Result<ItemFields, AppError> {
        let present = |value: Option<String>| value.filter(|s| !s.is_empty());
        let price = self.price.filter(|p| *p != 0.0);

        match (present(self.sku), present(self.name), price) {
            (Some(sku), Some(name), Some(price)) => Ok(ItemFields {
                sku,
                name,
                price,
                category: present(self.category),
            }),
            _ => Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string())),
        }
    }
}

/// Query string of the search endpoint
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

// =============================================================================
// Responses
// =============================================================================

/// Response of a successful add-item request
#[derive(Debug, Serialize)]
pub struct ItemCreated {
    pub message: String,
    pub item: Item,
}

/// Response carrying only a status message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

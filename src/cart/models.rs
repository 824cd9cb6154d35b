//! Shopping Cart Domain Models
//!
//! This module contains all data structures related to the shopping cart
//! business domain.

use crate::error::AppError;
use crate::inventory::models::ItemFields;
use crate::store::Document;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

// =============================================================================
// Cart Domain Models
// =============================================================================

/// A line in the cart. At most one exists per SKU.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartEntry {
    /// Document identifier, assigned when the SKU first enters the cart
    #[serde(rename = "_id")]
    pub id: Uuid,

    /// SKU of the product; not checked against the catalog
    pub sku: String,

    /// Name of the product
    pub name: String,

    /// Unit price captured when the entry was created
    pub price: f64,

    /// Number of units, never below 1
    pub quantity: u32,
}

impl CartEntry {
    /// Creates a fresh entry holding a single unit
    pub fn new(fields: ItemFields) -> Self {
        Self {
            id: Uuid::new_v4(),
            sku: fields.sku,
            name: fields.name,
            price: fields.price,
            quantity: 1,
        }
    }

    /// Price of all units on this line
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

impl Document for CartEntry {
    fn key(&self) -> &str {
        &self.sku
    }
}

/// Outcome of putting a unit in the cart
#[derive(Debug, Clone, PartialEq)]
pub enum CartAddition {
    /// A new entry was created with quantity 1
    Created(CartEntry),
    /// An existing entry gained a unit
    Incremented(CartEntry),
}

/// Outcome of changing the quantity of an existing entry
#[derive(Debug, Clone, PartialEq)]
pub enum CartChange {
    /// The entry's quantity changed and it is still in the cart
    Updated(CartEntry),
    /// The entry's last unit was removed, and with it the entry
    Removed,
}

/// Quantity adjustment requested through PUT /cart/:sku
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Increase,
    Decrease,
}

impl FromStr for CartAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "increase" => Ok(Self::Increase),
            "decrease" => Ok(Self::Decrease),
            other => Err(AppError::Validation(format!(
                "Invalid action '{other}', expected \"increase\" or \"decrease\""
            ))),
        }
    }
}

// =============================================================================
// Inputs & Responses
// =============================================================================

/// Body of PUT /cart/:sku
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCartInput {
    pub action: Option<String>,
}

impl UpdateCartInput {
    pub fn action(&self) -> Result<CartAction, AppError> {
        self.action
            .as_deref()
            .ok_or_else(|| AppError::Validation("Action is required".to_string()))?
            .parse()
    }
}

/// Response for cart mutations
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    /// Human-readable outcome
    pub message: String,

    /// The entry after the change; absent when the entry was removed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_item: Option<CartEntry>,
}

/// Response for GET /cart
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub cart_items: Vec<CartEntry>,
    pub total_amount: f64,
}

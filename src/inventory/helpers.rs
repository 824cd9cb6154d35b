//! Item Catalog Operations
//!
//! Functions backing the item endpoints. Each one touches a single document
//! and flushes the catalog when it changes it.

use super::models::{Item, ItemInput};
use crate::error::AppError;
use crate::state::AppState;
use dashmap::mapref::entry::Entry;

/// Adds a new item to the catalog.
///
/// Fails with `Validation` when sku, name or price is missing and with
/// `Conflict` when the SKU is already taken. The catalog is left unchanged in
/// both cases, and also when the snapshot cannot be written.
pub async fn add_item(state: &AppState, input: ItemInput) -> Result<Item, AppError> {
    let fields = input.validate()?;

    let item = match state.items.documents().entry(fields.sku.clone()) {
        Entry::Occupied(_) => {
            return Err(AppError::Conflict(
                "Item with this SKU already exists".to_string(),
            ))
        }
        Entry::Vacant(slot) => slot.insert(Item::new(fields)).value().clone(),
    };

    state
        .items
        .flush_or_revert(&item.sku, None)
        .await
        .map_err(|e| AppError::store("Failed to add item", e))?;

    tracing::info!(sku = %item.sku, "Item added");
    Ok(item)
}

/// Returns every item in the catalog.
pub fn list_items(state: &AppState) -> Vec<Item> {
    state.items.all()
}

/// Returns the items whose SKU equals `query` or whose name contains it.
pub fn search_items(state: &AppState, query: &str) -> Vec<Item> {
    state
        .items
        .all()
        .into_iter()
        .filter(|item| matches_query(item, query))
        .collect()
}

/// Exact SKU match, or case-insensitive substring match on the name.
///
/// An empty query matches every item.
pub fn matches_query(item: &Item, query: &str) -> bool {
    item.sku == query || item.name.to_lowercase().contains(&query.to_lowercase())
}

/// Permanently deletes the item with the given SKU.
pub async fn remove_item(state: &AppState, sku: &str) -> Result<Item, AppError> {
    let (_, removed) = state
        .items
        .documents()
        .remove(sku)
        .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;

    state
        .items
        .flush_or_revert(sku, Some(removed.clone()))
        .await
        .map_err(|e| AppError::store("Failed to remove item from inventory", e))?;

    tracing::info!(sku = %removed.sku, "Item removed");
    Ok(removed)
}

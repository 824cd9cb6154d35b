//! Application State Management
//!
//! Holds the two collections every handler works against: the item catalog
//! and the cart.

use crate::cart::models::CartEntry;
use crate::config::AppConfig;
use crate::inventory::models::Item;
use crate::store::{Collection, StoreError};
use std::{path::Path, sync::Arc};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Collection name of the item catalog
pub const ITEMS_COLLECTION: &str = "items";
/// Collection name of the cart entries
pub const CART_COLLECTION: &str = "cart";

/// Core application state containing the catalog and cart collections
pub struct AppState {
    /// Purchasable items, keyed by SKU.
    pub items: Collection<Item>,

    /// Cart line entries, keyed by SKU.
    pub cart: Collection<CartEntry>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl AppState {
    /// Creates a state whose collections are never written to disk
    pub fn in_memory() -> Self {
        Self {
            items: Collection::in_memory(ITEMS_COLLECTION),
            cart: Collection::in_memory(CART_COLLECTION),
        }
    }

    /// Opens both collections under `data_dir`, loading what is already there
    pub async fn open(data_dir: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            items: Collection::open(ITEMS_COLLECTION, data_dir).await?,
            cart: Collection::open(CART_COLLECTION, data_dir).await?,
        })
    }

    /// Picks persistent or in-memory storage based on the configuration
    pub async fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        match &config.data_dir {
            Some(dir) => Self::open(dir).await,
            None => {
                tracing::warn!("INVENTORY_DATA_DIR not set, data will not survive a restart");
                Ok(Self::in_memory())
            }
        }
    }
}

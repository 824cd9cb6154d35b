//! Item Catalog Domain Module
//!
//! - Domain models (Item, request inputs, responses)
//! - Catalog operations (add, list, search, remove)
//! - REST API handlers

pub mod handlers;
pub mod helpers;
pub mod models;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::Item;

//! Inventory & Cart Library
//!
//! This library provides an item catalog and a shopping cart behind a small
//! JSON REST API.

// Domain modules
pub mod cart;
pub mod inventory;

// Infrastructure
pub mod config;
pub mod error;
pub mod router;
pub mod state;
pub mod store;

//! REST API handlers for shopping cart operations
//!
//! This module implements HTTP endpoints for adding, listing, and removing
//! cart entries.

use super::{helpers::*, models::*};
use crate::error::AppError;
use crate::inventory::models::ItemInput;
use crate::state::SharedState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, put},
    Json, Router,
};
use tracing::instrument;

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart", get(get_cart).post(post_cart))
        .route("/cart/:sku", put(put_cart).delete(delete_cart))
}

/// Endpoint: POST /cart
/// Adds one unit of the item to the cart.
#[instrument(skip_all)]
async fn post_cart(
    State(state): State<SharedState>,
    body: Result<Json<ItemInput>, JsonRejection>,
) -> Result<Json<CartResponse>, AppError> {
    let Json(input) = body?;

    let response = match add_to_cart(&state, input).await? {
        CartAddition::Created(entry) => respond("Item added to cart", Some(entry)),
        CartAddition::Incremented(entry) => respond("Item quantity increased", Some(entry)),
    };

    Ok(Json(response))
}

/// Endpoint: GET /cart
/// Returns every cart entry and the running total.
async fn get_cart(State(state): State<SharedState>) -> Json<CartSummary> {
    Json(list_cart(&state))
}

/// Endpoint: DELETE /cart/:sku
/// Removes one unit; the entry disappears when its last unit goes.
#[instrument(skip(state))]
async fn delete_cart(
    State(state): State<SharedState>,
    Path(sku): Path<String>,
) -> Result<Json<CartResponse>, AppError> {
    let response = match remove_one(&state, &sku).await? {
        CartChange::Removed => respond("Item removed from cart", None),
        CartChange::Updated(entry) => respond("Item quantity reduced", Some(entry)),
    };

    Ok(Json(response))
}

/// Endpoint: PUT /cart/:sku
/// Applies `{"action": "increase" | "decrease"}` to the entry.
/// An unknown SKU is reported before the body or action is looked at.
#[instrument(skip(state, body))]
async fn put_cart(
    State(state): State<SharedState>,
    Path(sku): Path<String>,
    body: Result<Json<UpdateCartInput>, JsonRejection>,
) -> Result<Json<CartResponse>, AppError> {
    ensure_in_cart(&state, &sku)?;
    let Json(input) = body?;
    let action = input.action()?;

    let response = match update_quantity(&state, &sku, action).await? {
        CartChange::Removed => respond("Item removed from cart", None),
        CartChange::Updated(entry) => respond("Cart updated", Some(entry)),
    };

    Ok(Json(response))
}

fn respond(message: &str, cart_item: Option<CartEntry>) -> CartResponse {
    CartResponse {
        message: message.to_string(),
        cart_item,
    }
}

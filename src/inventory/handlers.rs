//! REST API handlers for the item catalog

use super::{helpers::*, models::*};
use crate::error::AppError;
use crate::state::SharedState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use tracing::instrument;

/// Creates routes for catalog operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(get_items).post(create_item))
        .route("/search", get(search))
        .route("/item/:sku", delete(delete_item))
}

/// Endpoint: POST /
/// Adds a new item to the catalog.
#[instrument(skip_all)]
async fn create_item(
    State(state): State<SharedState>,
    body: Result<Json<ItemInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = body?;
    let item = add_item(&state, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ItemCreated {
            message: "Item added successfully".to_string(),
            item,
        }),
    ))
}

/// Endpoint: GET /
async fn get_items(State(state): State<SharedState>) -> Json<Vec<Item>> {
    Json(list_items(&state))
}

/// Endpoint: GET /search?query=
#[instrument(skip(state))]
async fn search(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Item>> {
    let query = params.query.unwrap_or_default();
    Json(search_items(&state, &query))
}

/// Endpoint: DELETE /item/:sku
#[instrument(skip(state))]
async fn delete_item(
    State(state): State<SharedState>,
    Path(sku): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    remove_item(&state, &sku).await?;

    Ok(Json(MessageResponse {
        message: "Item removed from inventory".to_string(),
    }))
}

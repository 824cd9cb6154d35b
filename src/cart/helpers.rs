//! Shopping Cart Business Logic Helpers
//!
//! Cart operations and totals. Quantity changes happen under the map's entry
//! lock; the cart is flushed once the lock has been released, and the change
//! is undone if that flush fails.

use super::models::{CartAction, CartAddition, CartChange, CartEntry, CartSummary};
use crate::error::AppError;
use crate::inventory::models::ItemInput;
use crate::state::AppState;
use dashmap::mapref::entry::Entry;

/// Puts one unit of an item in the cart.
///
/// Increments the existing entry for the SKU, or creates one with quantity 1.
pub async fn add_to_cart(state: &AppState, input: ItemInput) -> Result<CartAddition, AppError> {
    let fields = input.validate()?;
    let sku = fields.sku.clone();

    let (addition, previous) = match state.cart.documents().entry(sku.clone()) {
        Entry::Occupied(mut slot) => {
            let previous = slot.get().clone();
            let entry = slot.get_mut();
            entry.quantity = one_more(entry.quantity)?;
            (CartAddition::Incremented(entry.clone()), Some(previous))
        }
        Entry::Vacant(slot) => {
            let entry = CartEntry::new(fields);
            slot.insert(entry.clone());
            (CartAddition::Created(entry), None)
        }
    };

    flush(state, &sku, previous, "Failed to add item to cart").await?;
    Ok(addition)
}

/// Returns every cart entry along with the cart total.
pub fn list_cart(state: &AppState) -> CartSummary {
    let cart_items = state.cart.all();
    let total_amount = cart_total(&cart_items);
    tracing::debug!(entries = cart_items.len(), total = total_amount, "Cart listed");

    CartSummary {
        cart_items,
        total_amount,
    }
}

/// Sum of `price * quantity` over all entries.
pub fn cart_total(entries: &[CartEntry]) -> f64 {
    entries.iter().map(CartEntry::line_total).sum()
}

/// Fails with `NotFound` unless the cart holds an entry for `sku`.
pub fn ensure_in_cart(state: &AppState, sku: &str) -> Result<(), AppError> {
    if state.cart.documents().contains_key(sku) {
        Ok(())
    } else {
        Err(not_in_cart())
    }
}

/// Takes one unit of `sku` out of the cart, dropping the entry at zero.
pub async fn remove_one(state: &AppState, sku: &str) -> Result<CartChange, AppError> {
    let (change, previous) = decrement(state, sku)?;
    flush(state, sku, Some(previous), "Failed to remove item from cart").await?;
    Ok(change)
}

/// Applies an increase/decrease action to the entry for `sku`.
pub async fn update_quantity(
    state: &AppState,
    sku: &str,
    action: CartAction,
) -> Result<CartChange, AppError> {
    let (change, previous) = match action {
        CartAction::Increase => match state.cart.documents().get_mut(sku) {
            Some(mut entry) => {
                let previous = entry.clone();
                entry.quantity = one_more(entry.quantity)?;
                (CartChange::Updated(entry.clone()), previous)
            }
            None => return Err(not_in_cart()),
        },
        CartAction::Decrease => decrement(state, sku)?,
    };

    flush(state, sku, Some(previous), "Failed to update cart item").await?;
    Ok(change)
}

/// Returns the change together with the entry as it was before it.
fn decrement(state: &AppState, sku: &str) -> Result<(CartChange, CartEntry), AppError> {
    match state.cart.documents().entry(sku.to_string()) {
        Entry::Vacant(_) => Err(not_in_cart()),
        Entry::Occupied(mut slot) if slot.get().quantity > 1 => {
            let previous = slot.get().clone();
            let entry = slot.get_mut();
            entry.quantity -= 1;
            Ok((CartChange::Updated(entry.clone()), previous))
        }
        Entry::Occupied(slot) => {
            let previous = slot.remove();
            Ok((CartChange::Removed, previous))
        }
    }
}

fn one_more(quantity: u32) -> Result<u32, AppError> {
    quantity
        .checked_add(1)
        .ok_or_else(|| AppError::Validation("Cart quantity limit reached".to_string()))
}

fn not_in_cart() -> AppError {
    AppError::NotFound("Item not found in cart".to_string())
}

async fn flush(
    state: &AppState,
    sku: &str,
    previous: Option<CartEntry>,
    context: &'static str,
) -> Result<(), AppError> {
    state
        .cart
        .flush_or_revert(sku, previous)
        .await
        .map_err(|e| AppError::store(context, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pen() -> ItemInput {
        ItemInput {
            sku: Some("A1".into()),
            name: Some("Pen".into()),
            price: Some(2.0),
            category: None,
        }
    }

    fn quantity_of(state: &AppState, sku: &str) -> Option<u32> {
        state.cart.get(sku).map(|e| e.quantity)
    }

    #[tokio::test]
    async fn repeated_adds_aggregate_into_one_entry() {
        let state = AppState::in_memory();

        let first = add_to_cart(&state, pen()).await.unwrap();
        assert!(matches!(first, CartAddition::Created(ref e) if e.quantity == 1));

        for _ in 0..4 {
            let next = add_to_cart(&state, pen()).await.unwrap();
            assert!(matches!(next, CartAddition::Incremented(_)));
        }

        let summary = list_cart(&state);
        assert_eq!(summary.cart_items.len(), 1);
        assert_eq!(summary.cart_items[0].quantity, 5);
        assert_eq!(summary.total_amount, 10.0);
    }

    #[tokio::test]
    async fn add_requires_item_fields() {
        let state = AppState::in_memory();
        let mut input = pen();
        input.name = None;

        let err = add_to_cart(&state, input).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(state.cart.is_empty());
    }

    #[tokio::test]
    async fn quantity_never_wraps() {
        let state = AppState::in_memory();
        add_to_cart(&state, pen()).await.unwrap();
        if let Some(mut entry) = state.cart.documents().get_mut("A1") {
            entry.quantity = u32::MAX;
        }

        let err = add_to_cart(&state, pen()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = update_quantity(&state, "A1", CartAction::Increase)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(quantity_of(&state, "A1"), Some(u32::MAX));
    }

    #[tokio::test]
    async fn remove_one_decrements_then_drops() {
        let state = AppState::in_memory();
        add_to_cart(&state, pen()).await.unwrap();
        add_to_cart(&state, pen()).await.unwrap();

        let change = remove_one(&state, "A1").await.unwrap();
        assert!(matches!(change, CartChange::Updated(ref e) if e.quantity == 1));
        assert_eq!(quantity_of(&state, "A1"), Some(1));

        assert_eq!(remove_one(&state, "A1").await.unwrap(), CartChange::Removed);
        assert_eq!(quantity_of(&state, "A1"), None);

        let err = remove_one(&state, "A1").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_quantity_applies_actions() {
        let state = AppState::in_memory();
        add_to_cart(&state, pen()).await.unwrap();
        assert!(ensure_in_cart(&state, "A1").is_ok());

        update_quantity(&state, "A1", CartAction::Increase).await.unwrap();
        assert_eq!(quantity_of(&state, "A1"), Some(2));

        update_quantity(&state, "A1", CartAction::Decrease).await.unwrap();
        assert_eq!(quantity_of(&state, "A1"), Some(1));

        let change = update_quantity(&state, "A1", CartAction::Decrease).await.unwrap();
        assert_eq!(change, CartChange::Removed);
        assert!(state.cart.is_empty());

        let err = update_quantity(&state, "A1", CartAction::Increase)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(matches!(
            ensure_in_cart(&state, "A1"),
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn store_failure_leaves_cart_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        let state = AppState::open(&data).await.unwrap();
        add_to_cart(&state, pen()).await.unwrap();
        add_to_cart(&state, pen()).await.unwrap();
        std::fs::remove_dir_all(&data).unwrap();

        let mut book = pen();
        book.sku = Some("B2".into());
        for result in [
            add_to_cart(&state, pen()).await.map(|_| ()),
            add_to_cart(&state, book).await.map(|_| ()),
            remove_one(&state, "A1").await.map(|_| ()),
            update_quantity(&state, "A1", CartAction::Increase)
                .await
                .map(|_| ()),
        ] {
            assert!(matches!(result, Err(AppError::Store { .. })));
        }

        assert_eq!(quantity_of(&state, "A1"), Some(2));
        assert_eq!(quantity_of(&state, "B2"), None);
        assert_eq!(state.cart.len(), 1);
    }

    #[test]
    fn total_covers_all_lines() {
        let mut pens = CartEntry::new(pen().validate().unwrap());
        pens.quantity = 3;
        let mut book = CartEntry::new(
            ItemInput {
                sku: Some("B2".into()),
                name: Some("Notebook".into()),
                price: Some(4.5),
                category: None,
            }
            .validate()
            .unwrap(),
        );
        book.quantity = 2;

        assert_eq!(cart_total(&[pens, book]), 15.0);
        assert_eq!(cart_total(&[]), 0.0);
    }
}

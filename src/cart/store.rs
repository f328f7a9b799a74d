//! Cart store

use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    cart::{
        errors::CartError,
        line_item::CartLineItem,
        state::{CartSnapshot, CartState, Outcome},
        summary::CartSummary,
    },
    persist::Persistence,
    products::{Product, ProductId},
    storage::KeyValueStorage,
};

/// Storage key for the persisted cart.
pub const CART_STORAGE_KEY: &str = "timehouse-cart";

/// Owns the cart for a session and writes every change through to storage.
#[derive(Debug)]
pub struct CartStore {
    state: CartState,
    persistence: Persistence<CartSnapshot>,
}

impl CartStore {
    /// Restores the cart from storage, starting empty when nothing usable is stored.
    pub fn restore(storage: Arc<dyn KeyValueStorage>) -> Self {
        let persistence = Persistence::new(CART_STORAGE_KEY, storage);

        let state = persistence
            .load()
            .map(CartState::from)
            .unwrap_or_default();

        info!(items = state.len(), "cart restored");

        Self { state, persistence }
    }

    /// Line items in display order.
    pub fn items(&self) -> &[CartLineItem] {
        self.state.items()
    }

    /// Read-only view of the cart state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Adds one unit of `product`.
    ///
    /// A failed add leaves the cart exactly as it was; the caller is not told.
    /// Adding a product already at [`Quantity::MAX`](crate::cart::Quantity::MAX)
    /// is such a failure, so the extra unit is dropped.
    pub fn add_item(&mut self, product: &Product) {
        if self.state.add_item(product) == Outcome::Applied {
            debug!(product = %product.id, "added to cart");

            self.persist();
        }
    }

    /// Removes the line for `id`, if present.
    pub fn remove_item(&mut self, id: &ProductId) {
        self.state.remove_item(id);

        debug!(product = %id, "removed from cart");

        self.persist();
    }

    /// Sets the quantity for `id`, clamped into `[1, 10]`.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) {
        self.state.update_quantity(id, quantity);

        debug!(product = %id, quantity, "updated cart quantity");

        self.persist();
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) {
        self.state.clear();

        debug!("cleared cart");

        self.persist();
    }

    /// Totals for the current items; `None` when the cart is empty.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the items cannot be totalled in one currency or the
    /// total does not fit in a decimal amount.
    pub fn summary(&self) -> Result<Option<CartSummary>, CartError> {
        CartSummary::calculate(self.state.items())
    }

    fn persist(&self) {
        self.persistence.save(&self.state.snapshot());
    }
}

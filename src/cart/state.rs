//! Cart state machine
//!
//! A cart is either *stable* (no checkpoint) or *mutating* (checkpoint held
//! while a guarded mutation runs). Only adds are guarded; removal, quantity
//! updates and clearing are single-step transitions on a stable cart.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    cart::{errors::CartError, line_item::CartLineItem, quantity::Quantity},
    products::{Product, ProductId, first_duplicate},
};

/// Result of a guarded mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The mutation completed and its effects were kept.
    Applied,

    /// The mutation failed and the pre-mutation items were restored.
    RolledBack,
}

/// Cart line items plus the transient rollback checkpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    items: Vec<CartLineItem>,
    checkpoint: Option<Vec<CartLineItem>>,
}

impl CartState {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Looks up the line item for a product.
    pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|line| line.id() == id)
    }

    /// Number of line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all line items.
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .map(|line| u32::from(line.quantity().get()))
            .sum()
    }

    /// Whether no guarded mutation is in flight.
    pub fn is_stable(&self) -> bool {
        self.checkpoint.is_none()
    }

    /// Runs `mutation` against the items, restoring them if it fails.
    ///
    /// The checkpoint is taken before the mutation and cleared on every exit
    /// path. Failures are logged and absorbed.
    pub(crate) fn transact<F>(&mut self, operation: &'static str, mutation: F) -> Outcome
    where
        F: FnOnce(&mut Vec<CartLineItem>) -> Result<(), CartError>,
    {
        self.checkpoint = Some(self.items.clone());

        let result = mutation(&mut self.items);
        let checkpoint = self.checkpoint.take();

        match result {
            Ok(()) => {
                debug!(operation, items = self.items.len(), "cart transaction applied");

                Outcome::Applied
            }
            Err(error) => {
                warn!(operation, %error, "cart transaction failed, rolling back");

                self.items = checkpoint.unwrap_or_default();

                Outcome::RolledBack
            }
        }
    }

    /// Adds one unit of `product`, appending a new line if it is not yet in the cart.
    ///
    /// Incrementing a line already at [`Quantity::MAX`] fails with
    /// [`CartError::QuantityLimit`] and rolls back.
    pub fn add_item(&mut self, product: &Product) -> Outcome {
        self.transact("add_item", |items| add_product(items, product))
    }

    /// Removes the line for `id`. Unknown identifiers are ignored.
    pub fn remove_item(&mut self, id: &ProductId) {
        self.items.retain(|line| line.id() != id);
    }

    /// Sets the quantity for `id`, clamped into `[1, 10]`. Unknown identifiers are ignored.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) {
        let quantity = Quantity::clamped(quantity);

        if let Some(line) = self.items.iter_mut().find(|line| line.id() == id) {
            line.set_quantity(quantity);
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the persisted form of the cart.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
        }
    }
}

impl From<CartSnapshot> for CartState {
    fn from(snapshot: CartSnapshot) -> Self {
        Self {
            items: snapshot.items,
            checkpoint: None,
        }
    }
}

fn add_product(items: &mut Vec<CartLineItem>, product: &Product) -> Result<(), CartError> {
    if let Some(line) = items.iter_mut().find(|line| line.id() == &product.id) {
        let quantity = line
            .quantity()
            .checked_increment()
            .ok_or_else(|| CartError::QuantityLimit(product.id.clone()))?;

        line.set_quantity(quantity);
    } else {
        items.push(CartLineItem::new(product.clone()));
    }

    Ok(())
}

#[derive(Deserialize)]
struct RawCartSnapshot {
    items: Vec<CartLineItem>,
}

/// Persisted cart: the complete ordered line-item list.
///
/// Decoding rejects carts that repeat a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCartSnapshot")]
pub struct CartSnapshot {
    items: Vec<CartLineItem>,
}

impl CartSnapshot {
    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }
}

impl TryFrom<RawCartSnapshot> for CartSnapshot {
    type Error = CartError;

    fn try_from(raw: RawCartSnapshot) -> Result<Self, Self::Error> {
        if let Some(duplicate) = first_duplicate(raw.items.iter().map(CartLineItem::id)) {
            return Err(CartError::DuplicateItem(duplicate.clone()));
        }

        Ok(Self { items: raw.items })
    }
}

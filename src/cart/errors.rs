//! Cart errors

use thiserror::Error;

use crate::products::ProductId;

/// Errors raised inside cart mutations and totals.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// Incrementing the line item would exceed the per-product maximum.
    #[error("product {0} is already at the maximum quantity")]
    QuantityLimit(ProductId),

    /// A product appears on more than one line item.
    #[error("product {0} appears on more than one line item")]
    DuplicateItem(ProductId),

    /// A line item's currency differs from the cart currency (item currency, cart currency).
    #[error("line item has currency {0}, but cart has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// A line total or cart total does not fit in a decimal amount.
    #[error("cart total is too large to represent")]
    Overflow,
}

//! Line items

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::{
    cart::{errors::CartError, quantity::Quantity},
    products::{Product, ProductId},
};

/// One cart row: a copy of the product plus its quantity.
///
/// Serialised flat, with `quantity` alongside the product fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(flatten)]
    product: Product,
    quantity: Quantity,
}

impl CartLineItem {
    /// Creates a line item with quantity 1.
    pub fn new(product: Product) -> Self {
        Self::with_quantity(product, Quantity::MIN)
    }

    /// Creates a line item with the given quantity.
    pub fn with_quantity(product: Product, quantity: Quantity) -> Self {
        Self { product, quantity }
    }

    /// Returns the product identifier.
    pub fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Returns the product.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Returns the quantity.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub(crate) fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
    }

    /// Unit price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if the product does not fit in a [`Decimal`].
    pub fn line_total(&self) -> Result<Money<'static, Currency>, CartError> {
        let price = &self.product.price;

        let amount = price
            .amount
            .checked_mul(Decimal::from(self.quantity.get()))
            .ok_or(CartError::Overflow)?;

        Ok(Money::from_decimal(amount, price.currency.currency()))
    }
}

//! Cart totals

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::cart::{errors::CartError, line_item::CartLineItem};

/// Subtotal above which shipping is free, in major units of the cart currency.
const FREE_SHIPPING_THRESHOLD: i64 = 200;

/// Flat shipping charge, in major units of the cart currency.
const FLAT_SHIPPING: i64 = 15;

/// Totals shown on the cart page.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSummary {
    /// Sum of line totals
    pub subtotal: Money<'static, Currency>,

    /// Shipping charge
    pub shipping: Money<'static, Currency>,

    /// Subtotal plus shipping
    pub total: Money<'static, Currency>,
}

impl CartSummary {
    /// Calculates totals for the given line items.
    ///
    /// Returns `Ok(None)` for an empty cart, which has no currency.
    ///
    /// # Errors
    ///
    /// - [`CartError::CurrencyMismatch`]: line items are priced in different currencies.
    /// - [`CartError::Overflow`]: a line total or the cart total does not fit in a [`Decimal`].
    pub fn calculate(items: &[CartLineItem]) -> Result<Option<Self>, CartError> {
        let Some(first) = items.first() else {
            return Ok(None);
        };

        let currency = first.product().price.currency;

        let subtotal = items.iter().try_fold(Decimal::ZERO, |acc, line| {
            let line_currency = line.product().price.currency;

            if line_currency != currency {
                return Err(CartError::CurrencyMismatch(
                    line_currency.code(),
                    currency.code(),
                ));
            }

            acc.checked_add(*line.line_total()?.amount())
                .ok_or(CartError::Overflow)
        })?;

        let shipping = if subtotal > Decimal::from(FREE_SHIPPING_THRESHOLD) {
            Decimal::ZERO
        } else {
            Decimal::from(FLAT_SHIPPING)
        };

        let total = subtotal.checked_add(shipping).ok_or(CartError::Overflow)?;

        Ok(Some(Self {
            subtotal: Money::from_decimal(subtotal, currency.currency()),
            shipping: Money::from_decimal(shipping, currency.currency()),
            total: Money::from_decimal(total, currency.currency()),
        }))
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::{
        cart::quantity::Quantity,
        products::{CurrencyCode, test_support::product},
    };

    use super::*;

    #[test]
    fn empty_cart_has_no_summary() -> TestResult {
        assert_eq!(CartSummary::calculate(&[])?, None);

        Ok(())
    }

    #[test]
    fn large_subtotal_ships_free() -> TestResult {
        let items = [
            CartLineItem::with_quantity(product("a", 14_500), Quantity::try_from(2_u8)?),
            CartLineItem::new(product("b", 7_200)),
        ];

        let summary = CartSummary::calculate(&items)?.ok_or("expected summary")?;

        assert_eq!(summary.subtotal, Money::from_major(36_200, iso::USD));
        assert_eq!(summary.shipping, Money::from_major(0, iso::USD));
        assert_eq!(summary.total, Money::from_major(36_200, iso::USD));

        Ok(())
    }

    #[test]
    fn small_subtotal_pays_flat_shipping() -> TestResult {
        let items = [CartLineItem::new(product("a", 200))];

        let summary = CartSummary::calculate(&items)?.ok_or("expected summary")?;

        assert_eq!(summary.subtotal, Money::from_major(200, iso::USD));
        assert_eq!(summary.shipping, Money::from_major(15, iso::USD));
        assert_eq!(summary.total, Money::from_major(215, iso::USD));

        Ok(())
    }

    #[test]
    fn subtotal_overflow_is_an_error() -> TestResult {
        let mut large = product("a", 1);
        large.price.amount = "50000000000000000000000000000".parse()?;

        let mut also_large = large.clone();
        also_large.id = "b".into();

        let items = [CartLineItem::new(large), CartLineItem::new(also_large)];

        assert_eq!(CartSummary::calculate(&items), Err(CartError::Overflow));

        Ok(())
    }

    #[test]
    fn mixed_currencies_error() {
        let mut riyal = product("b", 100);
        riyal.price.currency = CurrencyCode::Qar;

        let items = [CartLineItem::new(product("a", 100)), CartLineItem::new(riyal)];

        assert_eq!(
            CartSummary::calculate(&items),
            Err(CartError::CurrencyMismatch("QAR", "USD"))
        );
    }
}

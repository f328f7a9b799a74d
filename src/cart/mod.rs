//! Cart
//!
//! The client-side shopping cart: an ordered list of line items, one per
//! product, mutated through [`CartStore`] and persisted on every change.

pub mod errors;
pub mod line_item;
pub mod quantity;
pub mod state;
pub mod store;
pub mod summary;

pub use errors::CartError;
pub use line_item::CartLineItem;
pub use quantity::Quantity;
pub use state::{CartSnapshot, CartState, Outcome};
pub use store::CartStore;
pub use summary::CartSummary;

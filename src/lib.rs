//! Timehouse
//!
//! Storefront core for a luxury watch retailer: the built-in catalog, a
//! client-side cart with rollback on failed adds, and user settings, each
//! persisted to a host-provided key-value store.

pub mod cart;
pub mod catalog;
pub mod persist;
pub mod prelude;
pub mod products;
pub mod session;
pub mod settings;
pub mod storage;

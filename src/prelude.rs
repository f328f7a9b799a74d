//! Timehouse prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartError, CartLineItem, CartStore, CartSummary, Quantity},
    catalog::{Catalog, CatalogError},
    persist::{PersistError, Persistence},
    products::{Category, CurrencyCode, Movement, Price, Product, ProductId, ProductImage},
    session::{Session, SessionError},
    settings::{Locale, SettingsState, SettingsStore, Theme},
    storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError},
};

//! Session
//!
//! Composition root: one catalog, one cart and one settings store per
//! application session, all restored from the same storage backend.

use std::sync::Arc;

use thiserror::Error;

use crate::{
    cart::CartStore,
    catalog::{Catalog, CatalogError},
    products::ProductId,
    settings::SettingsStore,
    storage::KeyValueStorage,
};

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// The catalog seed could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// No catalog product has this identifier.
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),
}

/// Owns the stores for one application session.
#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    cart: CartStore,
    settings: SettingsStore,
}

impl Session {
    /// Opens a session over the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Catalog`] if the built-in catalog is malformed.
    pub fn open(storage: Arc<dyn KeyValueStorage>) -> Result<Self, SessionError> {
        Ok(Self::with_catalog(Catalog::genesis()?, storage))
    }

    /// Opens a session over the given catalog.
    pub fn with_catalog(catalog: Catalog, storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            catalog,
            cart: CartStore::restore(Arc::clone(&storage)),
            settings: SettingsStore::restore(storage),
        }
    }

    /// The product catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The cart.
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// The cart, mutably.
    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// User preferences.
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// User preferences, mutably.
    pub fn settings_mut(&mut self) -> &mut SettingsStore {
        &mut self.settings
    }

    /// Adds one unit of the catalog product `id` to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownProduct`] if the catalog has no such product.
    pub fn add_to_cart(&mut self, id: &ProductId) -> Result<(), SessionError> {
        let product = self
            .catalog
            .get(id)
            .ok_or_else(|| SessionError::UnknownProduct(id.clone()))?;

        self.cart.add_item(product);

        Ok(())
    }
}

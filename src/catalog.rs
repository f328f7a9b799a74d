//! Catalog Seed
//!
//! The static list of purchasable watches, compiled into the binary.

use jiff::Timestamp;
use serde::Deserialize;
use thiserror::Error;

use crate::products::{Product, ProductId, first_duplicate};

const GENESIS_CATALOG: &str = include_str!("../fixtures/catalog.yml");

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// YAML parsing error
    #[error("Failed to parse catalog: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Two records share an identifier
    #[error("Duplicate product in catalog: {0}")]
    DuplicateProduct(ProductId),
}

/// Wrapper for the catalog in YAML
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    version: String,
    items: Vec<Product>,
}

/// Immutable, versioned product list.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Product>,
    version: String,
    last_updated: Timestamp,
}

impl Catalog {
    /// Loads the built-in seed.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the embedded seed is malformed.
    pub fn genesis() -> Result<Self, CatalogError> {
        Self::from_yaml(GENESIS_CATALOG)
    }

    /// Loads a catalog from YAML, stamping it with the current time.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Yaml`]: the document could not be parsed.
    /// - [`CatalogError::DuplicateProduct`]: two records share an identifier.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        if let Some(duplicate) = first_duplicate(fixture.items.iter().map(|item| &item.id)) {
            return Err(CatalogError::DuplicateProduct(duplicate.clone()));
        }

        Ok(Self {
            items: fixture.items,
            version: fixture.version,
            last_updated: Timestamp::now(),
        })
    }

    /// Looks up a product by identifier.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Iterates products in seed order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.items.iter()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Seed version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// When this catalog was loaded.
    pub fn last_updated(&self) -> Timestamp {
        self.last_updated
    }
}

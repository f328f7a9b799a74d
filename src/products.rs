//! Products

use std::{collections::BTreeMap, fmt};

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Unique product identifier, e.g. `submariner-001`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Currencies carried by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    /// Qatari riyal
    Qar,

    /// US dollar
    Usd,
}

impl CurrencyCode {
    /// Returns the ISO currency used for money arithmetic.
    pub fn currency(self) -> &'static Currency {
        match self {
            CurrencyCode::Qar => iso::QAR,
            CurrencyCode::Usd => iso::USD,
        }
    }

    /// Returns the ISO alpha code.
    pub fn code(self) -> &'static str {
        self.currency().iso_alpha_code
    }
}

/// Product price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in major units
    ///
    /// Written as a decimal string; read from either a string or a number.
    #[serde(serialize_with = "rust_decimal::serde::str::serialize")]
    pub amount: Decimal,

    /// Price currency
    pub currency: CurrencyCode,

    /// Pre-rendered display string, e.g. `$14,500`
    pub formatted: String,
}

impl Price {
    /// Returns the price as money in its currency.
    pub fn money(&self) -> Money<'static, Currency> {
        Money::from_decimal(self.amount, self.currency.currency())
    }
}

/// Target audience of a watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Men's watches
    Men,

    /// Women's watches
    Women,

    /// Unisex watches
    Unisex,
}

/// Watch movement type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Movement {
    /// Self-winding mechanical
    Automatic,

    /// Battery powered
    Quartz,

    /// Hand-wound mechanical
    Manual,
}

/// Product image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    /// Image location
    pub url: String,

    /// Alternative text
    pub alt: String,

    /// Whether this is the image shown on product cards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
}

/// Product
///
/// Read-only catalog record. The cart copies it wholesale into a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier
    pub id: ProductId,

    /// URL slug
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Manufacturer, e.g. `Rolex`
    pub brand: String,

    /// Model name
    pub model: String,

    /// English description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Arabic description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_ar: Option<String>,

    /// Price
    pub price: Price,

    /// Category
    pub category: Category,

    /// Movement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement: Option<Movement>,

    /// Case material
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_material: Option<String>,

    /// Images, in display order
    #[serde(default)]
    pub images: Vec<ProductImage>,

    /// Free-form specification table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<BTreeMap<String, String>>,

    /// Units in stock, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl Product {
    /// Returns the image flagged as primary, falling back to the first image.
    pub fn primary_image(&self) -> Option<&ProductImage> {
        self.images
            .iter()
            .find(|image| image.is_primary == Some(true))
            .or_else(|| self.images.first())
    }

    /// Returns `brand model`, as shown on product cards.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

/// Returns the first identifier that appears more than once.
pub(crate) fn first_duplicate<'a>(
    ids: impl IntoIterator<Item = &'a ProductId>,
) -> Option<&'a ProductId> {
    let mut seen = FxHashSet::default();

    ids.into_iter().find(|id| !seen.insert(*id))
}

//! Shop Event Definitions
//!
//! A shop event is an authored trigger that opens a shop: its note metadata
//! (which may name the shop) and the goods it sells.

use serde::{Deserialize, Serialize};

use crate::data::{Metadata, ProductDefinition, ProductKind};

/// One line of a shop's goods list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopGood {
    pub kind: ProductKind,
    pub id: u32,
    /// Buy price at this shop, instead of the catalog price
    #[serde(default)]
    pub price: Option<u32>,
}

impl ShopGood {
    pub fn new(kind: ProductKind, id: u32) -> Self {
        Self { kind, id, price: None }
    }
}

/// Raw shop event from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RawShopEvent {
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub purchase_only: bool,
    #[serde(default)]
    pub goods: Vec<ShopGood>,
}

/// A shop event with its note metadata extracted
#[derive(Debug, Clone)]
pub struct ShopEvent {
    pub key: String,
    pub meta: Metadata,
    pub purchase_only: bool,
    pub goods: Vec<ShopGood>,
}

impl ShopEvent {
    pub fn new(key: &str, note: &str, goods: Vec<ShopGood>) -> Self {
        Self {
            key: key.to_string(),
            meta: Metadata::parse(note),
            purchase_only: false,
            goods,
        }
    }

    pub fn from_raw(key: &str, raw: &RawShopEvent) -> Self {
        Self {
            key: key.to_string(),
            meta: Metadata::parse(&raw.note),
            purchase_only: raw.purchase_only,
            goods: raw.goods.clone(),
        }
    }

    /// Get a product's line on this shop's goods list
    pub fn good(&self, kind: ProductKind, id: u32) -> Option<&ShopGood> {
        self.goods.iter().find(|g| g.kind == kind && g.id == id)
    }

    /// Check if a product is on this shop's goods list
    pub fn sells(&self, kind: ProductKind, id: u32) -> bool {
        self.good(kind, id).is_some()
    }

    /// Unit price when buying here. A goods-list price wins over the catalog.
    pub fn buy_price(&self, product: &ProductDefinition) -> u32 {
        self.good(product.kind, product.id)
            .and_then(|g| g.price)
            .unwrap_or(product.price)
    }

    /// Unit price the shop pays for a product, half its catalog price
    pub fn sell_price(&self, product: &ProductDefinition) -> u32 {
        product.price / 2
    }
}

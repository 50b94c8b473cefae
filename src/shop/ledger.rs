//! Shop Stock Ledger
//!
//! Remaining stock keyed by shop name, product kind and product id. A product
//! with no entry in a shop's table has unlimited stock there.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::resolver::StockResolver;
use crate::data::{Catalog, ProductDefinition, ProductKind};

/// Stock entries for one shop name, grouped by product kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopStockTable {
    /// Set once the shop's goods list has been registered. Saved tables
    /// without the flag were opened before it existed.
    #[serde(default = "default_populated")]
    populated: bool,
    #[serde(default)]
    items: BTreeMap<u32, u32>,
    #[serde(default)]
    weapons: BTreeMap<u32, u32>,
    #[serde(default)]
    armors: BTreeMap<u32, u32>,
}

fn default_populated() -> bool {
    true
}

impl ShopStockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining stock for a product, `None` if untracked
    pub fn get(&self, kind: ProductKind, id: u32) -> Option<u32> {
        self.group(kind).get(&id).copied()
    }

    /// `(id, remaining)` pairs for one kind, ordered by id
    pub fn entries(&self, kind: ProductKind) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.group(kind).iter().map(|(id, remaining)| (*id, *remaining))
    }

    /// Number of tracked entries across all kinds
    pub fn len(&self) -> usize {
        self.items.len() + self.weapons.len() + self.armors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the shop's goods list has been registered
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    pub(crate) fn mark_populated(&mut self) {
        self.populated = true;
    }

    fn group(&self, kind: ProductKind) -> &BTreeMap<u32, u32> {
        match kind {
            ProductKind::Item => &self.items,
            ProductKind::Weapon => &self.weapons,
            ProductKind::Armor => &self.armors,
        }
    }

    fn group_mut(&mut self, kind: ProductKind) -> &mut BTreeMap<u32, u32> {
        match kind {
            ProductKind::Item => &mut self.items,
            ProductKind::Weapon => &mut self.weapons,
            ProductKind::Armor => &mut self.armors,
        }
    }
}

/// Stock tables for every shop name seen so far.
///
/// Shops sharing a name share a table. Tables are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockLedger {
    shops: BTreeMap<String, ShopStockTable>,
}

impl StockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a shop's table by name
    pub fn get(&self, shop: &str) -> Option<&ShopStockTable> {
        self.shops.get(shop)
    }

    /// Get a shop's table, creating an empty one if needed
    pub fn get_or_create(&mut self, shop: &str) -> &mut ShopStockTable {
        self.shops.entry(shop.to_string()).or_insert_with(|| {
            debug!("Created stock table for shop '{}'", shop);
            ShopStockTable::new()
        })
    }

    /// Remaining stock, `None` meaning unlimited
    pub fn lookup(&self, shop: &str, kind: ProductKind, id: u32) -> Option<u32> {
        self.shops.get(shop).and_then(|table| table.get(kind, id))
    }

    /// Reset a product's stock to its configured max.
    ///
    /// Products without a stock tag are left untracked. Returns whether the
    /// ledger changed.
    pub fn restock(
        &mut self,
        shop: &str,
        product: &ProductDefinition,
        resolver: &StockResolver<'_>,
    ) -> bool {
        let Some(max) = resolver.max_stock(product) else {
            return false;
        };

        self.get_or_create(shop)
            .group_mut(product.kind)
            .insert(product.id, max);
        debug!("Restocked {} {} in '{}' to {}", product.kind, product.id, shop, max);
        true
    }

    /// Restock every product already tracked for a shop.
    ///
    /// Only existing entries are touched, even if other catalog products have
    /// stock tags. Returns whether the shop has a table.
    pub fn restock_all(
        &mut self,
        shop: &str,
        catalog: &Catalog,
        resolver: &StockResolver<'_>,
    ) -> bool {
        let Some(table) = self.shops.get_mut(shop) else {
            return false;
        };

        for kind in ProductKind::ALL {
            for (id, remaining) in table.group_mut(kind).iter_mut() {
                match catalog.get(kind, *id).and_then(|product| resolver.max_stock(product)) {
                    Some(max) => *remaining = max,
                    None => warn!(
                        "Cannot restock {} {} in '{}': no stock tag in catalog",
                        kind, id, shop
                    ),
                }
            }
        }

        debug!("Restocked all products in '{}'", shop);
        true
    }

    /// Take `amount` from a tracked product, stopping at zero.
    ///
    /// Untracked products and a zero amount are a no-op returning `false`.
    pub fn decrease(&mut self, shop: &str, kind: ProductKind, id: u32, amount: u32) -> bool {
        if amount == 0 {
            return false;
        }
        let Some(remaining) = self.entry_mut(shop, kind, id) else {
            return false;
        };

        if amount > *remaining {
            warn!(
                "Stock for {} {} in '{}' would go negative ({} - {}), stopping at 0",
                kind, id, shop, remaining, amount
            );
        }
        *remaining = remaining.saturating_sub(amount);
        debug!("Stock for {} {} in '{}' decreased to {}", kind, id, shop, remaining);
        true
    }

    /// Add `amount` to a tracked product.
    ///
    /// Untracked products and a zero amount are a no-op returning `false`.
    pub fn increase(&mut self, shop: &str, kind: ProductKind, id: u32, amount: u32) -> bool {
        if amount == 0 {
            return false;
        }
        let Some(remaining) = self.entry_mut(shop, kind, id) else {
            return false;
        };

        *remaining = remaining.saturating_add(amount);
        debug!("Stock for {} {} in '{}' increased to {}", kind, id, shop, remaining);
        true
    }

    /// All shop names with a table
    pub fn shop_names(&self) -> impl Iterator<Item = &String> {
        self.shops.keys()
    }

    pub fn len(&self) -> usize {
        self.shops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shops.is_empty()
    }

    fn entry_mut(&mut self, shop: &str, kind: ProductKind, id: u32) -> Option<&mut u32> {
        self.shops.get_mut(shop)?.group_mut(kind).get_mut(&id)
    }
}

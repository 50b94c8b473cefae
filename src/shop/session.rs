//! Shop Session
//!
//! Binds one shop visit to a shop name and routes the buy/sell flow's
//! queries and completions to the ledger. A session with no shop name tracks
//! nothing and leaves every product unlimited.

use std::fmt;
use tracing::{debug, info, warn};

use super::config::ShopStockConfig;
use super::definition::{ShopEvent, ShopGood};
use super::ledger::StockLedger;
use crate::data::{Catalog, Metadata, ProductDefinition};

/// Caption drawn next to a product's remaining stock
pub const STOCK_LEFT_CAPTION: &str = "Stock left";

/// Remaining stock as shown in the shop status window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLabel {
    Remaining(u32),
    Unlimited,
}

impl fmt::Display for StockLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockLabel::Remaining(count) => write!(f, "{}", count),
            StockLabel::Unlimited => f.write_str("∞"),
        }
    }
}

/// One shop visit. Holds the ledger for as long as the shop is open.
pub struct ShopSession<'a> {
    ledger: &'a mut StockLedger,
    config: &'a ShopStockConfig,
    shop_name: Option<String>,
}

impl<'a> ShopSession<'a> {
    /// Open a shop from its event note and goods list.
    ///
    /// The first time a shop name is opened, every good on the list is
    /// restocked to its max.
    pub fn open(
        ledger: &'a mut StockLedger,
        config: &'a ShopStockConfig,
        catalog: &Catalog,
        event_meta: &Metadata,
        goods: &[ShopGood],
    ) -> Self {
        let shop_name = config.shop_name(event_meta);

        match &shop_name {
            Some(name) => {
                let populated = ledger.get(name).map_or(false, |table| table.is_populated());
                if !populated {
                    let resolver = config.resolver();
                    for good in goods {
                        match catalog.get(good.kind, good.id) {
                            Some(product) => {
                                ledger.restock(name, product, &resolver);
                            }
                            None => warn!(
                                "Shop '{}' lists unknown {} {}",
                                name, good.kind, good.id
                            ),
                        }
                    }
                    ledger.get_or_create(name).mark_populated();
                    info!("Set up stock for shop '{}' from {} goods", name, goods.len());
                }
                debug!("Opened shop '{}'", name);
            }
            None => debug!(
                "Shop has no <{}> tag, stock is unlimited",
                config.shop_note_name
            ),
        }

        Self {
            ledger,
            config,
            shop_name,
        }
    }

    /// Open the shop described by a shop event
    pub fn open_event(
        ledger: &'a mut StockLedger,
        config: &'a ShopStockConfig,
        catalog: &Catalog,
        event: &ShopEvent,
    ) -> Self {
        Self::open(ledger, config, catalog, &event.meta, &event.goods)
    }

    pub fn shop_name(&self) -> Option<&str> {
        self.shop_name.as_deref()
    }

    pub fn is_bound(&self) -> bool {
        self.shop_name.is_some()
    }

    /// Remaining stock in this shop, `None` meaning unlimited
    pub fn remaining(&self, product: &ProductDefinition) -> Option<u32> {
        let shop = self.shop_name.as_deref()?;
        self.ledger.lookup(shop, product.kind, product.id)
    }

    /// Whether the product can be selected in the buy list
    pub fn is_available(&self, product: &ProductDefinition) -> bool {
        self.remaining(product).map_or(true, |count| count > 0)
    }

    /// The host's own purchasable count, capped by remaining stock
    pub fn max_buyable(&self, product: &ProductDefinition, host_max: u32) -> u32 {
        match self.remaining(product) {
            Some(count) => host_max.min(count),
            None => host_max,
        }
    }

    /// Record a completed purchase
    pub fn on_purchase(&mut self, product: &ProductDefinition, quantity: u32) -> bool {
        let Some(shop) = self.shop_name.as_deref() else {
            return false;
        };
        self.ledger.decrease(shop, product.kind, product.id, quantity)
    }

    /// Record a completed sale. Only restocks when selling restocks is
    /// enabled, and never past the product's max stock.
    pub fn on_sale(&mut self, product: &ProductDefinition, quantity: u32) -> bool {
        if !self.config.selling_restocks {
            return false;
        }
        let Some(shop) = self.shop_name.as_deref() else {
            return false;
        };
        let Some(remaining) = self.ledger.lookup(shop, product.kind, product.id) else {
            return false;
        };

        let amount = match self.config.resolver().max_stock(product) {
            Some(max) => quantity.min(max.saturating_sub(remaining)),
            None => quantity,
        };
        if amount < quantity {
            debug!(
                "Sale of {} {} {} restocks only {} (max stock reached)",
                quantity, product.kind, product.id, amount
            );
        }
        self.ledger.increase(shop, product.kind, product.id, amount)
    }

    /// Stock line for the status window; `None` when the shop is untracked
    pub fn stock_label(&self, product: &ProductDefinition) -> Option<StockLabel> {
        self.shop_name.as_ref()?;
        Some(match self.remaining(product) {
            Some(count) => StockLabel::Remaining(count),
            None => StockLabel::Unlimited,
        })
    }
}

//! Game State
//!
//! The mutable, saved part of a game that this crate owns. The host's save
//! system persists it as-is.

use serde::{Deserialize, Serialize};

use crate::data::Catalog;
use crate::shop::{run_plugin_command, ShopEvent, ShopSession, ShopStockConfig, StockLedger};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    #[serde(default)]
    shop_stock: StockLedger,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shop_stock(&self) -> &StockLedger {
        &self.shop_stock
    }

    pub fn shop_stock_mut(&mut self) -> &mut StockLedger {
        &mut self.shop_stock
    }

    /// Start a visit to the shop behind `event`
    pub fn open_shop<'a>(
        &'a mut self,
        config: &'a ShopStockConfig,
        catalog: &Catalog,
        event: &ShopEvent,
    ) -> ShopSession<'a> {
        ShopSession::open_event(&mut self.shop_stock, config, catalog, event)
    }

    /// Run a plugin command against the shop stock
    pub fn plugin_command<S: AsRef<str>>(
        &mut self,
        command: &str,
        args: &[S],
        catalog: &Catalog,
        config: &ShopStockConfig,
    ) -> bool {
        run_plugin_command(command, args, &mut self.shop_stock, catalog, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ProductDefinition, ProductKind};
    use crate::shop::{ShopGood, PLUGIN_COMMAND};

    #[test]
    fn test_state_survives_json() {
        let mut catalog = Catalog::new();
        catalog.insert(ProductDefinition::new(ProductKind::Item, 1, "Potion", "<stock:10>"));
        let config = ShopStockConfig::default();
        let event = ShopEvent::new("counter", "<shopName:Noob>", vec![ShopGood::new(ProductKind::Item, 1)]);

        let mut state = GameState::new();
        let mut session = state.open_shop(&config, &catalog, &event);
        session.on_purchase(catalog.get(ProductKind::Item, 1).unwrap(), 3);
        drop(session);

        let json = serde_json::to_string(&state).unwrap();
        let mut restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);

        // A loaded save does not re-populate the shop on the next visit
        let session = restored.open_shop(&config, &catalog, &event);
        assert_eq!(session.remaining(catalog.get(ProductKind::Item, 1).unwrap()), Some(7));
    }

    #[test]
    fn test_plugin_command_restocks() {
        let mut catalog = Catalog::new();
        catalog.insert(ProductDefinition::new(ProductKind::Item, 1, "Potion", "<stock:10>"));
        let config = ShopStockConfig::default();
        let event = ShopEvent::new("counter", "<shopName:Noob>", vec![ShopGood::new(ProductKind::Item, 1)]);

        let mut state = GameState::new();
        let mut session = state.open_shop(&config, &catalog, &event);
        session.on_purchase(catalog.get(ProductKind::Item, 1).unwrap(), 10);
        drop(session);
        assert_eq!(state.shop_stock().lookup("Noob", ProductKind::Item, 1), Some(0));

        assert!(state.plugin_command(PLUGIN_COMMAND, &["restockitem", "Noob", "1"], &catalog, &config));
        assert_eq!(state.shop_stock().lookup("Noob", ProductKind::Item, 1), Some(10));
    }

    #[test]
    fn test_saved_table_without_flag_keeps_counts() {
        let mut catalog = Catalog::new();
        catalog.insert(ProductDefinition::new(ProductKind::Item, 1, "Potion", "<stock:10>"));
        let config = ShopStockConfig::default();
        let event = ShopEvent::new("counter", "<shopName:Noob>", vec![ShopGood::new(ProductKind::Item, 1)]);

        let mut state: GameState =
            serde_json::from_str(r#"{"shop_stock":{"Noob":{"items":{"1":3}}}}"#).unwrap();
        assert!(state.shop_stock().get("Noob").unwrap().is_populated());

        let session = state.open_shop(&config, &catalog, &event);
        assert_eq!(session.remaining(catalog.get(ProductKind::Item, 1).unwrap()), Some(3));
    }

    #[test]
    fn test_empty_state_from_empty_object() {
        let state: GameState = serde_json::from_str("{}").unwrap();
        assert!(state.shop_stock().is_empty());
    }
}

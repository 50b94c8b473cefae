//! Restock Plugin Commands
//!
//! ```text
//! AXL_ShopStock restockall <shopName>
//! AXL_ShopStock restockitem <shopName> <id>
//! AXL_ShopStock restockweapon <shopName> <id>
//! AXL_ShopStock restockarmor <shopName> <id>
//! ```
//!
//! Anything else is ignored.

use tracing::debug;

use super::config::ShopStockConfig;
use super::ledger::StockLedger;
use crate::data::{Catalog, ProductKind};

/// Plugin command name the restock verbs are issued under
pub const PLUGIN_COMMAND: &str = "AXL_ShopStock";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopCommand {
    /// Restock every tracked product in a shop
    RestockAll { shop: String },
    /// Restock one product in a shop
    Restock {
        shop: String,
        kind: ProductKind,
        id: u32,
    },
}

impl ShopCommand {
    /// Parse a plugin command. Returns `None` for other plugins, unknown
    /// verbs, missing arguments and non-numeric ids.
    pub fn parse<S: AsRef<str>>(command: &str, args: &[S]) -> Option<Self> {
        if command != PLUGIN_COMMAND {
            return None;
        }

        let verb = args.first()?.as_ref().to_lowercase();
        let shop = args.get(1)?.as_ref().to_string();

        let kind = match verb.as_str() {
            "restockall" => return Some(ShopCommand::RestockAll { shop }),
            "restockitem" => ProductKind::Item,
            "restockweapon" => ProductKind::Weapon,
            "restockarmor" => ProductKind::Armor,
            _ => return None,
        };
        let id = args.get(2)?.as_ref().trim().parse::<u32>().ok()?;

        Some(ShopCommand::Restock { shop, kind, id })
    }

    /// Apply the command to the ledger. Returns whether anything was
    /// restocked (for `RestockAll`, whether the shop exists).
    pub fn execute(&self, ledger: &mut StockLedger, catalog: &Catalog, config: &ShopStockConfig) -> bool {
        let resolver = config.resolver();
        match self {
            ShopCommand::RestockAll { shop } => ledger.restock_all(shop, catalog, &resolver),
            ShopCommand::Restock { shop, kind, id } => match catalog.get(*kind, *id) {
                Some(product) => ledger.restock(shop, product, &resolver),
                None => {
                    debug!("Ignoring restock of unknown {} {}", kind, id);
                    false
                }
            },
        }
    }
}

/// Parse and run a plugin command. Returns whether the ledger was touched.
pub fn run_plugin_command<S: AsRef<str>>(
    command: &str,
    args: &[S],
    ledger: &mut StockLedger,
    catalog: &Catalog,
    config: &ShopStockConfig,
) -> bool {
    match ShopCommand::parse(command, args) {
        Some(cmd) => {
            debug!("Running {:?}", cmd);
            cmd.execute(ledger, catalog, config)
        }
        None => false,
    }
}

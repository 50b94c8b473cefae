//! Shop Stock
//!
//! Per-shop limited stock: the ledger, max-stock resolution, shop visits and
//! the restock plugin commands.

pub mod command;
pub mod config;
pub mod definition;
pub mod ledger;
pub mod registry;
pub mod resolver;
pub mod session;

pub use command::{run_plugin_command, ShopCommand, PLUGIN_COMMAND};
pub use config::ShopStockConfig;
pub use definition::{ShopEvent, ShopGood};
pub use ledger::{ShopStockTable, StockLedger};
pub use registry::ShopRegistry;
pub use resolver::StockResolver;
pub use session::{ShopSession, StockLabel, STOCK_LEFT_CAPTION};

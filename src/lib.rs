//! Limited shop stock for an RPG.
//!
//! Every named shop keeps its own remaining count for each item, weapon and
//! armor whose catalog note carries a `<stock:N>` tag. Untagged products stay
//! unlimited. The host calls into a [`shop::ShopSession`] while a shop is open
//! and runs the restock plugin commands through [`state::GameState`].

pub mod data;
pub mod error;
pub mod script;
pub mod shop;
pub mod state;

pub use data::{Catalog, ProductDefinition, ProductKind};
pub use error::{DataError, ScriptError};
pub use shop::{ShopSession, ShopStockConfig, StockLedger};
pub use state::GameState;

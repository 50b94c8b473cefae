//! Shop Scripts
//!
//! A line-oriented script standing in for the host's event interpreter:
//!
//! ```text
//! open <event>            begin a shop visit
//! buy <kind> <id> <qty>   buy, capped by remaining stock
//! sell <kind> <id> <qty>
//! close                   end the visit
//! plugin <name> <args..>  plugin command (only outside a visit)
//! # comment
//! ```

use tracing::{info, warn};

use crate::data::{Catalog, ProductDefinition, ProductKind};
use crate::error::ScriptError;
use crate::shop::{ShopEvent, ShopRegistry, ShopSession, ShopStockConfig, STOCK_LEFT_CAPTION};
use crate::state::GameState;

/// Most of one product the host lets the party buy in a single transaction
pub const HOST_MAX_BUY: u32 = 99;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    Open(String),
    Buy { kind: ProductKind, id: u32, quantity: u32 },
    Sell { kind: ProductKind, id: u32, quantity: u32 },
    Close,
    Plugin { command: String, args: Vec<String> },
}

/// A step with the line it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub step: ScriptStep,
}

/// What a buy or sell step actually moved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub shop: Option<String>,
    pub kind: ProductKind,
    pub id: u32,
    pub requested: u32,
    pub quantity: u32,
    /// Gold paid (purchase) or received (sale)
    pub gold: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptReport {
    pub purchases: Vec<Transaction>,
    pub sales: Vec<Transaction>,
    pub commands_applied: usize,
}

impl ScriptReport {
    pub fn gold_spent(&self) -> u32 {
        self.purchases.iter().map(|t| t.gold).sum()
    }

    pub fn gold_earned(&self) -> u32 {
        self.sales.iter().map(|t| t.gold).sum()
    }
}

/// Parse a whole script. Blank lines and `#` comments are skipped.
pub fn parse_script(source: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut steps = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let words: Vec<&str> = text.split_whitespace().collect();
        let step = match words[0].to_lowercase().as_str() {
            "open" => match words.get(1) {
                Some(event) if words.len() == 2 => ScriptStep::Open(event.to_string()),
                _ => return Err(ScriptError::new(line, "usage: open <event>")),
            },
            "buy" => {
                let (kind, id, quantity) = parse_trade(line, &words)?;
                ScriptStep::Buy { kind, id, quantity }
            }
            "sell" => {
                let (kind, id, quantity) = parse_trade(line, &words)?;
                ScriptStep::Sell { kind, id, quantity }
            }
            "close" => ScriptStep::Close,
            "plugin" => match words.get(1) {
                Some(command) => ScriptStep::Plugin {
                    command: command.to_string(),
                    args: words[2..].iter().map(|w| w.to_string()).collect(),
                },
                None => return Err(ScriptError::new(line, "usage: plugin <name> <args..>")),
            },
            other => return Err(ScriptError::new(line, format!("unknown step '{}'", other))),
        };

        steps.push(ScriptLine { line, step });
    }

    Ok(steps)
}

fn parse_trade(line: usize, words: &[&str]) -> Result<(ProductKind, u32, u32), ScriptError> {
    let usage = || ScriptError::new(line, format!("usage: {} <kind> <id> <qty>", words[0]));
    if words.len() != 4 {
        return Err(usage());
    }
    let kind = ProductKind::from_str(words[1])
        .ok_or_else(|| ScriptError::new(line, format!("unknown product kind '{}'", words[1])))?;
    let id = words[2].parse::<u32>().map_err(|_| usage())?;
    let quantity = words[3].parse::<u32>().map_err(|_| usage())?;
    Ok((kind, id, quantity))
}

/// Plays scripts against a game state using loaded data
pub struct ScriptRunner<'a> {
    config: &'a ShopStockConfig,
    catalog: &'a Catalog,
    shops: &'a ShopRegistry,
}

impl<'a> ScriptRunner<'a> {
    pub fn new(config: &'a ShopStockConfig, catalog: &'a Catalog, shops: &'a ShopRegistry) -> Self {
        Self { config, catalog, shops }
    }

    /// Run every step. Mutations made before an error are kept.
    pub fn run(&self, state: &mut GameState, steps: &[ScriptLine]) -> Result<ScriptReport, ScriptError> {
        let mut report = ScriptReport::default();
        let mut remaining = steps.iter();

        while let Some(entry) = remaining.next() {
            match &entry.step {
                ScriptStep::Open(key) => {
                    let event = self
                        .shops
                        .get(key)
                        .ok_or_else(|| ScriptError::new(entry.line, format!("unknown shop event '{}'", key)))?;
                    let mut session = state.open_shop(self.config, self.catalog, event);

                    for visit_entry in remaining.by_ref() {
                        if visit_entry.step == ScriptStep::Close {
                            break;
                        }
                        self.visit_step(&mut session, event, visit_entry, &mut report)?;
                    }
                }
                ScriptStep::Plugin { command, args } => {
                    if state.plugin_command(command, args.as_slice(), self.catalog, self.config) {
                        report.commands_applied += 1;
                    }
                }
                ScriptStep::Close => {
                    return Err(ScriptError::new(entry.line, "close without open"));
                }
                ScriptStep::Buy { .. } | ScriptStep::Sell { .. } => {
                    return Err(ScriptError::new(entry.line, "buy and sell need an open shop"));
                }
            }
        }

        Ok(report)
    }

    fn visit_step(
        &self,
        session: &mut ShopSession<'_>,
        event: &ShopEvent,
        entry: &ScriptLine,
        report: &mut ScriptReport,
    ) -> Result<(), ScriptError> {
        match &entry.step {
            ScriptStep::Buy { kind, id, quantity } => {
                if !event.sells(*kind, *id) {
                    return Err(ScriptError::new(
                        entry.line,
                        format!("{} {} is not sold at '{}'", kind, id, event.key),
                    ));
                }
                let product = self.product(entry.line, *kind, *id)?;

                let bought = if session.is_available(product) {
                    (*quantity).min(session.max_buyable(product, HOST_MAX_BUY))
                } else {
                    warn!("{} is sold out", product.name);
                    0
                };
                if bought > 0 {
                    session.on_purchase(product, bought);
                }
                let gold = event.buy_price(product).saturating_mul(bought);
                self.log_stock(session, product);

                report.purchases.push(Transaction {
                    shop: session.shop_name().map(str::to_string),
                    kind: *kind,
                    id: *id,
                    requested: *quantity,
                    quantity: bought,
                    gold,
                });
                Ok(())
            }
            ScriptStep::Sell { kind, id, quantity } => {
                if event.purchase_only {
                    return Err(ScriptError::new(entry.line, format!("'{}' is purchase only", event.key)));
                }
                let product = self.product(entry.line, *kind, *id)?;

                session.on_sale(product, *quantity);
                let gold = event.sell_price(product).saturating_mul(*quantity);
                self.log_stock(session, product);

                report.sales.push(Transaction {
                    shop: session.shop_name().map(str::to_string),
                    kind: *kind,
                    id: *id,
                    requested: *quantity,
                    quantity: *quantity,
                    gold,
                });
                Ok(())
            }
            ScriptStep::Open(_) => Err(ScriptError::new(entry.line, "a shop is already open")),
            ScriptStep::Plugin { .. } => Err(ScriptError::new(
                entry.line,
                "plugin commands cannot run while a shop is open",
            )),
            ScriptStep::Close => Ok(()),
        }
    }

    fn product(&self, line: usize, kind: ProductKind, id: u32) -> Result<&'a ProductDefinition, ScriptError> {
        self.catalog
            .get(kind, id)
            .ok_or_else(|| ScriptError::new(line, format!("unknown {} {}", kind, id)))
    }

    fn log_stock(&self, session: &ShopSession<'_>, product: &ProductDefinition) {
        if let Some(label) = session.stock_label(product) {
            info!("{}: {} {}", product.name, STOCK_LEFT_CAPTION, label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shop::ShopGood;

    fn fixtures(selling_restocks: bool) -> (ShopStockConfig, Catalog, ShopRegistry) {
        let config = ShopStockConfig {
            selling_restocks,
            ..ShopStockConfig::default()
        };

        let mut potion = ProductDefinition::new(ProductKind::Item, 1, "Potion", "<stock:10>");
        potion.price = 50;
        let mut catalog = Catalog::new();
        catalog.insert(potion);
        catalog.insert(ProductDefinition::new(ProductKind::Weapon, 2, "Sword", ""));

        let mut shops = ShopRegistry::new();
        let mut sword = ShopGood::new(ProductKind::Weapon, 2);
        sword.price = Some(200);
        let goods = vec![ShopGood::new(ProductKind::Item, 1), sword];
        shops.insert(ShopEvent::new("counter", "<shopName:Noob>", goods.clone()));
        shops.insert(ShopEvent::new("stall", "no name", goods));

        (config, catalog, shops)
    }

    fn run(source: &str, selling_restocks: bool) -> (GameState, Result<ScriptReport, ScriptError>) {
        let (config, catalog, shops) = fixtures(selling_restocks);
        let mut state = GameState::new();
        let result = parse_script(source)
            .and_then(|steps| ScriptRunner::new(&config, &catalog, &shops).run(&mut state, &steps));
        (state, result)
    }

    #[test]
    fn test_parse_script() {
        let steps = parse_script("# visit\nopen counter\n\nbuy item 1 3\nclose\nplugin AXL_ShopStock restockall Noob\n").unwrap();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0], ScriptLine { line: 2, step: ScriptStep::Open("counter".to_string()) });
        assert_eq!(steps[1].step, ScriptStep::Buy { kind: ProductKind::Item, id: 1, quantity: 3 });
        assert_eq!(steps[1].line, 4);
        assert_eq!(
            steps[3].step,
            ScriptStep::Plugin {
                command: "AXL_ShopStock".to_string(),
                args: vec!["restockall".to_string(), "Noob".to_string()],
            }
        );
    }

    #[test]
    fn test_parse_errors_carry_line() {
        assert_eq!(parse_script("open counter\nbuy potion 1 3").unwrap_err().line, 2);
        assert_eq!(parse_script("dance").unwrap_err().line, 1);
        assert_eq!(parse_script("\nsell item x 1").unwrap_err().line, 2);
        assert!(parse_script("open").is_err());
    }

    #[test]
    fn test_buying_is_capped_by_stock() {
        let (state, result) = run("open counter\nbuy item 1 3\nbuy item 1 50\nbuy item 1 1\nbuy weapon 2 120\nclose", false);
        let report = result.unwrap();

        let bought: Vec<u32> = report.purchases.iter().map(|t| t.quantity).collect();
        assert_eq!(bought, vec![3, 7, 0, HOST_MAX_BUY]);
        assert_eq!(state.shop_stock().lookup("Noob", ProductKind::Item, 1), Some(0));
        assert_eq!(state.shop_stock().lookup("Noob", ProductKind::Weapon, 2), None);
    }

    #[test]
    fn test_restock_between_visits() {
        let source = "open counter\nbuy item 1 8\nclose\nplugin AXL_ShopStock restockitem Noob 1\nopen counter\nbuy item 1 10";
        let (state, result) = run(source, false);
        let report = result.unwrap();

        assert_eq!(report.commands_applied, 1);
        assert_eq!(report.purchases[1].quantity, 10);
        assert_eq!(state.shop_stock().lookup("Noob", ProductKind::Item, 1), Some(0));
    }

    #[test]
    fn test_selling_restocks_when_enabled() {
        let source = "open counter\nbuy item 1 5\nsell item 1 2\nclose";

        let (state, result) = run(source, true);
        result.unwrap();
        assert_eq!(state.shop_stock().lookup("Noob", ProductKind::Item, 1), Some(7));

        let (state, result) = run(source, false);
        result.unwrap();
        assert_eq!(state.shop_stock().lookup("Noob", ProductKind::Item, 1), Some(5));
    }

    #[test]
    fn test_transactions_carry_gold() {
        let (_, result) = run("open counter\nbuy item 1 4\nbuy weapon 2 2\nbuy item 1 20\nsell item 1 3\nclose", false);
        let report = result.unwrap();

        let paid: Vec<u32> = report.purchases.iter().map(|t| t.gold).collect();
        assert_eq!(paid, vec![200, 400, 300]);
        assert_eq!(report.gold_spent(), 900);
        assert_eq!(report.sales[0].gold, 75);
        assert_eq!(report.gold_earned(), 75);
    }

    #[test]
    fn test_unnamed_shop_is_unlimited() {
        let (state, result) = run("open stall\nbuy item 1 40\nclose", false);
        assert_eq!(result.unwrap().purchases[0].quantity, 40);
        assert!(state.shop_stock().is_empty());
    }

    #[test]
    fn test_runtime_errors() {
        let (_, result) = run("buy item 1 1", false);
        assert_eq!(result.unwrap_err().line, 1);

        let (_, result) = run("open counter\nplugin AXL_ShopStock restockall Noob", false);
        assert_eq!(result.unwrap_err().line, 2);

        let (_, result) = run("open backroom", false);
        assert!(result.unwrap_err().message.contains("backroom"));

        let (_, result) = run("open counter\nbuy armor 1 1", false);
        assert!(result.unwrap_err().message.contains("not sold"));

        let (_, result) = run("close", false);
        assert_eq!(result.unwrap_err().line, 1);
    }

    #[test]
    fn test_mutations_before_error_are_kept() {
        let (state, result) = run("open counter\nbuy item 1 4\nopen counter", false);
        assert!(result.is_err());
        assert_eq!(state.shop_stock().lookup("Noob", ProductKind::Item, 1), Some(6));
    }

    #[test]
    fn test_demo_script_against_bundled_data() {
        let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
        let config = ShopStockConfig::load_or_default(&root.join("config.toml")).unwrap();
        let mut catalog = Catalog::new();
        catalog.load_from_directory(&root.join("data")).unwrap();
        let mut shops = ShopRegistry::new();
        shops.load_from_directory(&root.join("data")).unwrap();

        let source = std::fs::read_to_string(root.join("demos/noob_shop.script")).unwrap();
        let steps = parse_script(&source).unwrap();
        let mut state = GameState::new();
        let report = ScriptRunner::new(&config, &catalog, &shops).run(&mut state, &steps).unwrap();

        let bought: Vec<u32> = report.purchases.iter().map(|t| t.quantity).collect();
        assert_eq!(bought, vec![3, 7, 4, 0, 2, 40]);
        assert_eq!(report.commands_applied, 2);

        let ledger = state.shop_stock();
        assert_eq!(ledger.lookup("Noob", ProductKind::Item, 1), Some(10));
        // Only on the annex's list, which never populated the shared stock
        assert_eq!(ledger.lookup("Noob", ProductKind::Armor, 1), None);
        assert_eq!(ledger.lookup("Noob", ProductKind::Item, 3), None);
        assert_eq!(ledger.len(), 1);
    }
}

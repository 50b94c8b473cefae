use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use shop_stock::data::Catalog;
use shop_stock::script::{parse_script, ScriptRunner};
use shop_stock::shop::{ShopRegistry, ShopStockConfig};
use shop_stock::state::GameState;

#[derive(Parser)]
#[command(name = "shop-stock")]
#[command(about = "Play shop visits and restock commands against limited shop stock")]
#[command(version)]
struct Cli {
    /// Data directory with items/, weapons/, armors/ and shops/
    #[arg(short, long, default_value = "data")]
    data: PathBuf,

    /// Plugin parameters (defaults are used if the file is missing)
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Saved game state to start from (JSON)
    #[arg(short, long)]
    state: Option<PathBuf>,

    /// Script to run
    script: PathBuf,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("shop_stock=info".parse::<tracing_subscriber::filter::Directive>()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ShopStockConfig::load_or_default(&cli.config)?;

    let mut catalog = Catalog::new();
    catalog.load_from_directory(&cli.data)?;

    let mut shops = ShopRegistry::new();
    shops.load_from_directory(&cli.data)?;

    let mut state = match &cli.state {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read state {:?}", path))?;
            serde_json::from_str::<GameState>(&content)
                .with_context(|| format!("Failed to parse state {:?}", path))?
        }
        None => GameState::new(),
    };

    let source = std::fs::read_to_string(&cli.script)
        .with_context(|| format!("Failed to read script {:?}", cli.script))?;
    let steps = parse_script(&source).with_context(|| format!("In script {:?}", cli.script))?;

    let report = ScriptRunner::new(&config, &catalog, &shops)
        .run(&mut state, &steps)
        .with_context(|| format!("In script {:?}", cli.script))?;

    info!(
        "Ran {} steps: {} purchases ({} gold), {} sales ({} gold), {} restock commands applied",
        steps.len(),
        report.purchases.len(),
        report.gold_spent(),
        report.sales.len(),
        report.gold_earned(),
        report.commands_applied
    );

    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

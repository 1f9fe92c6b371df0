use std::path::PathBuf;

use alloy::primitives::Address;
use anyhow::{Context, Result};
use chrono::DateTime;

use options_amm::events::TradeEventData;
use options_amm::fetch::fetch_trades;
use options_amm::math::format_units;
use options_amm::MarketSnapshot;

pub struct TradesArgs {
    pub snapshot: PathBuf,
    pub from_block: u64,
    pub to_block: u64,
    pub account: Option<String>,
    pub rpc_url: Option<String>,
}

/// Entry point for the `trades` command.
pub fn run(args: &TradesArgs) -> Result<()> {
    let snapshot = MarketSnapshot::load(&args.snapshot)
        .with_context(|| format!("loading snapshot {}", args.snapshot.display()))?;
    let market = snapshot.market.info;
    let account: Option<Address> = args
        .account
        .as_deref()
        .map(|a| a.parse::<Address>().context("invalid --account address"))
        .transpose()?;
    let rpc_url = match &args.rpc_url {
        Some(url) => url.clone(),
        None => market
            .chain
            .resolved()
            .rpc_url()
            .map(str::to_string)
            .with_context(|| {
                format!("no RPC URL for chain '{}'; pass --rpc-url", market.chain.name)
            })?,
    };

    let rt = tokio::runtime::Runtime::new().context("creating tokio runtime")?;
    let trades = rt.block_on(fetch_trades(
        &rpc_url,
        &market,
        args.from_block,
        args.to_block,
        account,
    ))?;
    print_trades(&trades);
    Ok(())
}

fn print_trades(trades: &[TradeEventData]) {
    if trades.is_empty() {
        println!("No trades in range.");
        return;
    }

    println!(
        "{:<8} {:<20} {:<6} {:<5} {:<10} {:<12} {:<14} {}",
        "ID", "TIME", "SIDE", "KIND", "SIZE", "PRICE", "PREMIUM", "TX"
    );
    println!("{}", "-".repeat(110));

    for trade in trades {
        let time = DateTime::from_timestamp(trade.timestamp as i64, 0)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| trade.timestamp.to_string());
        println!(
            "{:<8} {:<20} {:<6} {:<5} {:<10} {:<12} {:<14} {}",
            trade.position_id,
            time,
            if trade.is_buy { "buy" } else { "sell" },
            if trade.is_call { "call" } else { "put" },
            format_units(trade.size),
            format_units(trade.price_per_option),
            format_units(trade.premium),
            trade.transaction_hash,
        );
    }

    println!("\n{} trades", trades.len());
}

use std::path::PathBuf;

use anyhow::{Context, Result};

use options_amm::math::{format_units, parse_units};
use options_amm::{MarketSnapshot, OptionKind, Quote, QuoteOptions};

pub struct QuoteArgs {
    pub snapshot: PathBuf,
    pub strike_id: u64,
    pub put: bool,
    pub sell: bool,
    pub size: String,
    pub iterations: Option<u32>,
    pub force_close: bool,
    pub json: bool,
}

/// Entry point for the `quote` command.
pub fn run(args: &QuoteArgs) -> Result<()> {
    let snapshot = MarketSnapshot::load(&args.snapshot)
        .with_context(|| format!("loading snapshot {}", args.snapshot.display()))?;
    let size = parse_units(&args.size).context("parsing --size")?;
    let kind = OptionKind::from_is_call(!args.put);
    let option = snapshot.option(args.strike_id, kind)?;
    let quote = Quote::get(
        &option,
        !args.sell,
        size,
        QuoteOptions {
            is_force_close: args.force_close,
            iterations: args.iterations,
        },
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
        return Ok(());
    }
    print_quote(&snapshot, &quote);
    Ok(())
}

fn print_quote(snapshot: &MarketSnapshot, quote: &Quote) {
    let side = if quote.is_buy { "BUY" } else { "SELL" };
    let strike_price = snapshot
        .strike(quote.strike_id)
        .map(|s| format_units(s.strike_price))
        .unwrap_or_default();
    println!(
        "{} {} {} {} strike {} (board {})",
        side,
        format_units(quote.size),
        snapshot.market.info.name,
        quote.kind,
        strike_price,
        quote.board_id,
    );
    println!("{}", "-".repeat(60));

    if let Some(reason) = quote.disabled_reason {
        println!("{:<22} {}", "disabled", reason);
    }
    println!("{:<22} {}", "premium", format_units(quote.premium));
    println!("{:<22} {}", "price per option", format_units(quote.price_per_option));
    println!("{:<22} {}", "fee", format_units(quote.fee));
    let fees = &quote.fee_components;
    println!("{:<22} {}", "  option price fee", format_units(fees.option_price_fee));
    println!("{:<22} {}", "  spot price fee", format_units(fees.spot_price_fee));
    println!("{:<22} {}", "  vega util fee", format_units(fees.vega_util_fee));
    println!("{:<22} {}", "  variance fee", format_units(fees.variance_fee));
    if quote.is_force_close {
        println!("{:<22} {}", "force close penalty", format_units(quote.force_close_penalty));
    }
    println!("{:<22} {}", "iv", format_units(quote.iv));
    println!("{:<22} {}", "break even", format_units(quote.break_even));
    println!(
        "{:<22} delta {}  gamma {}  vega {}  theta {}  rho {}",
        "greeks",
        format_units(quote.greeks.delta),
        format_units(quote.greeks.gamma),
        format_units(quote.greeks.vega),
        format_units(quote.greeks.theta),
        format_units(quote.greeks.rho),
    );

    if !quote.iterations.is_empty() {
        println!();
        println!(
            "{:<4} {:<12} {:<16} {:<16} {:<12} {}",
            "#", "SIZE", "PREMIUM", "FEE", "VOL", "AMM STD VEGA"
        );
        for (i, it) in quote.iterations.iter().enumerate() {
            println!(
                "{:<4} {:<12} {:<16} {:<16} {:<12} {}",
                i + 1,
                format_units(it.size),
                format_units(it.premium),
                format_units(it.fee()),
                format_units(it.vol_traded),
                format_units(it.post_trade_amm_net_std_vega),
            );
        }
    }
}

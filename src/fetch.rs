//! Fetch a market's trade history over RPC and rebuild it.

use std::collections::BTreeMap;

use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{BlockNumberOrTag, Filter};
use alloy::sol_types::SolEvent;
use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::events::abi::{IOptionMarket, IOptionToken};
use crate::events::{EventBatch, TradeEventData, parse_trade_events, parse_transfer_events};
use crate::model::MarketInfo;

/// Fetch the `Trade` and `Transfer` logs of `market` in `from_block..=to_block`
/// together with the timestamps of every block that traded.
pub async fn fetch_events(
    rpc_url: &str,
    market: &MarketInfo,
    from_block: u64,
    to_block: u64,
) -> Result<EventBatch> {
    let provider = ProviderBuilder::new().connect_http(rpc_url.parse().context("invalid rpc url")?);

    let trade_filter = Filter::new()
        .address(market.address)
        .event_signature(IOptionMarket::Trade::SIGNATURE_HASH)
        .from_block(from_block)
        .to_block(to_block);
    let trade_logs = provider
        .get_logs(&trade_filter)
        .await
        .with_context(|| format!("fetching Trade logs for {}", market.name))?;

    let transfer_filter = Filter::new()
        .address(market.option_token)
        .event_signature(IOptionToken::Transfer::SIGNATURE_HASH)
        .from_block(from_block)
        .to_block(to_block);
    let transfer_logs = provider
        .get_logs(&transfer_filter)
        .await
        .with_context(|| format!("fetching Transfer logs for {}", market.name))?;

    let trades = parse_trade_events(&trade_logs);
    let transfers = parse_transfer_events(&transfer_logs);
    info!(
        market = %market.name,
        from_block,
        to_block,
        trades = trades.len(),
        transfers = transfers.len(),
        "fetched events"
    );

    let mut timestamps = BTreeMap::new();
    for trade in &trades {
        if timestamps.contains_key(&trade.block_number) {
            continue;
        }
        let block = provider
            .get_block_by_number(BlockNumberOrTag::Number(trade.block_number))
            .await
            .with_context(|| format!("fetching block {}", trade.block_number))?
            .with_context(|| format!("block {} not found", trade.block_number))?;
        debug!(block = trade.block_number, timestamp = block.header.timestamp, "block timestamp");
        timestamps.insert(trade.block_number, block.header.timestamp);
    }

    Ok(EventBatch {
        market: market.clone(),
        trades,
        transfers,
        timestamps,
    })
}

/// Reconstructed trades of `market` in the block range, oldest first,
/// optionally limited to positions now held by `account`.
pub async fn fetch_trades(
    rpc_url: &str,
    market: &MarketInfo,
    from_block: u64,
    to_block: u64,
    account: Option<Address>,
) -> Result<Vec<TradeEventData>> {
    let batch = fetch_events(rpc_url, market, from_block, to_block).await?;
    let trades = batch.reconstruct().context("reconstructing trades")?;
    Ok(match account {
        Some(account) => trades.into_iter().filter(|t| t.trader == account).collect(),
        None => trades,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Chain;

    #[tokio::test]
    #[ignore] // Requires network access to an Optimism RPC
    async fn test_fetch_recent_range() {
        let chain = Chain::optimism();
        let rpc_url = chain.rpc_url().unwrap().to_string();
        let market = crate::example::snapshot().market.info;
        let batch = fetch_events(&rpc_url, &market, 110_000_000, 110_000_100).await.unwrap();
        for trade in &batch.trades {
            assert!(batch.timestamps.contains_key(&trade.block_number));
        }
    }
}

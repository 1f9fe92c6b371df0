//! Canonical trade records rebuilt from `Trade` and `Transfer` events.

use std::collections::BTreeMap;
use std::path::Path;

use alloy::primitives::{Address, I256, TxHash};
use serde::{Deserialize, Serialize};

use super::sort::sort_events;
use super::types::{LiquidationData, TradeDirection, TradeEvent, TransferEvent};
use crate::error::{Error, Result};
use crate::math::{scaled_div, scaled_mul};
use crate::model::MarketInfo;
use crate::quote::QuoteFeeComponents;

/// Collateral target of a short position after the trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateralUpdate {
    pub set_collateral_to: I256,
    pub is_base_collateral: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeEventData {
    pub timestamp: u64,
    pub position_id: u64,
    pub strike_id: u64,
    pub strike_price: I256,
    pub market_name: String,
    pub market_address: Address,
    pub expiry_timestamp: u64,
    pub block_number: u64,
    pub transaction_hash: TxHash,
    /// Holder of the position after the transaction.
    pub trader: Address,
    pub size: I256,
    pub premium: I256,
    pub fee: I256,
    pub fee_components: QuoteFeeComponents,
    pub price_per_option: I256,
    pub is_open: bool,
    pub is_call: bool,
    pub is_buy: bool,
    pub is_long: bool,
    pub spot_price: I256,
    /// Only for short positions.
    pub collateral: Option<CollateralUpdate>,
    pub is_force_close: bool,
    pub is_liquidation: bool,
    /// Only for liquidations.
    pub liquidation: Option<LiquidationData>,
    pub iv: I256,
    pub skew: I256,
    pub base_iv: I256,
    pub vol_traded: I256,
}

/// Who holds the position after the trade's transaction.
///
/// The position token may be transferred within the same transaction (e.g.
/// by a wrapper contract); the last non-burn transfer wins.
pub fn resolve_trader(trade: &TradeEvent, transfers: &[TransferEvent]) -> Address {
    let candidates = transfers
        .iter()
        .filter(|t| t.transaction_hash == trade.transaction_hash && t.to != Address::ZERO);
    sort_events(candidates)
        .last()
        .map(|t| t.to)
        .unwrap_or(trade.trader)
}

/// Rebuild one trade from its event, the range's transfers and its block timestamp.
pub fn trade_data_from_event(
    market: &MarketInfo,
    trade: &TradeEvent,
    transfers: &[TransferEvent],
    timestamp: u64,
) -> Result<TradeEventData> {
    let last = trade.results.last().ok_or(Error::EmptyTradeResults {
        tx: trade.transaction_hash,
    })?;

    let mut fee_components = QuoteFeeComponents::default();
    let mut premium = I256::ZERO;
    for result in &trade.results {
        fee_components.option_price_fee += result.option_price_fee;
        fee_components.spot_price_fee += result.spot_price_fee;
        fee_components.vega_util_fee += result.vega_util_fee.vega_util_fee;
        fee_components.variance_fee += result.variance_fee.variance_fee;
        premium += result.total_cost;
    }

    let params = &trade.trade;
    let option_type = params.option_type;
    let is_open = params.direction == TradeDirection::Open;
    let is_liquidation = params.direction == TradeDirection::Liquidate;
    let is_long = option_type.is_long();
    let size = params.amount;
    let price_per_option = if size > I256::ZERO {
        scaled_div(premium, size)?
    } else {
        I256::ZERO
    };

    Ok(TradeEventData {
        timestamp,
        position_id: trade.position_id,
        strike_id: params.strike_id,
        strike_price: params.strike_price,
        market_name: market.name.clone(),
        market_address: market.address,
        expiry_timestamp: params.expiry,
        block_number: trade.block_number,
        transaction_hash: trade.transaction_hash,
        trader: resolve_trader(trade, transfers),
        size,
        premium,
        fee: fee_components.total(),
        fee_components,
        price_per_option,
        is_open,
        is_call: option_type.is_call(),
        is_buy: option_type.is_buy(is_open),
        is_long,
        spot_price: params.spot_price,
        collateral: (!is_long).then(|| CollateralUpdate {
            set_collateral_to: params.set_collateral_to,
            is_base_collateral: option_type.is_base_collateral(),
        }),
        is_force_close: params.is_force_close,
        is_liquidation,
        liquidation: is_liquidation.then(|| trade.liquidation.clone()),
        iv: scaled_mul(last.new_base_iv, last.new_skew)?,
        skew: last.new_skew,
        base_iv: last.new_base_iv,
        vol_traded: last.vol_traded,
    })
}

// ── Batches ──────────────────────────────────────────────────────────

/// Events of one market over a block range, as fetched or as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBatch {
    pub market: MarketInfo,
    pub trades: Vec<TradeEvent>,
    #[serde(default)]
    pub transfers: Vec<TransferEvent>,
    /// Block number → block timestamp.
    pub timestamps: BTreeMap<u64, u64>,
}

impl EventBatch {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Reconstruct every trade in the batch, oldest first.
    pub fn reconstruct(&self) -> Result<Vec<TradeEventData>> {
        sort_events(&self.trades)
            .into_iter()
            .map(|trade| {
                let timestamp = self.timestamps.get(&trade.block_number).copied().ok_or(
                    Error::MissingTimestamp {
                        block_number: trade.block_number,
                    },
                )?;
                trade_data_from_event(&self.market, trade, &self.transfers, timestamp)
            })
            .collect()
    }
}

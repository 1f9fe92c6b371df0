//! Decoding RPC logs into trade and transfer events.

use alloy::primitives::{TxHash, U256};
use alloy::rpc::types::Log;
use tracing::warn;

use super::abi::{IOptionMarket, IOptionToken};
use super::types::{
    LiquidationData, OptionType, TradeDirection, TradeEvent, TradeParams, TradeResult,
    TransferEvent,
};
use crate::error::{Error, Result};
use crate::math::fixed::from_uint;
use crate::quote::{VarianceFeeComponents, VegaUtilFeeComponents};

// ── Helpers ──────────────────────────────────────────────────────────

fn to_u64(value: U256, field: &str) -> Result<u64> {
    u64::try_from(value)
        .map_err(|_| Error::invalid_argument(format!("{field} {value} does not fit in u64")))
}

struct LogPosition {
    transaction_hash: TxHash,
    block_number: u64,
    log_index: u64,
}

fn log_position(log: &Log) -> Result<LogPosition> {
    match (log.transaction_hash, log.block_number, log.log_index) {
        (Some(transaction_hash), Some(block_number), Some(log_index)) => Ok(LogPosition {
            transaction_hash,
            block_number,
            log_index,
        }),
        _ => Err(Error::invalid_argument("log is missing block metadata (pending?)")),
    }
}

// ── ABI → domain conversions ─────────────────────────────────────────

/// The strike id is an indexed event argument, not part of the trade struct.
fn trade_params(strike_id: U256, t: &IOptionMarket::TradeEventData) -> Result<TradeParams> {
    Ok(TradeParams {
        strike_id: to_u64(strike_id, "strike id")?,
        expiry: to_u64(t.expiry, "expiry")?,
        strike_price: from_uint(t.strikePrice)?,
        option_type: OptionType::try_from(t.optionType)?,
        direction: TradeDirection::try_from(t.tradeDirection)?,
        amount: from_uint(t.amount)?,
        set_collateral_to: from_uint(t.setCollateralTo)?,
        is_force_close: t.isForceClose,
        spot_price: from_uint(t.spotPrice)?,
        reserved_fee: from_uint(t.reservedFee)?,
        total_cost: from_uint(t.totalCost)?,
    })
}

impl TryFrom<&IOptionMarket::VegaUtilFeeComponents> for VegaUtilFeeComponents {
    type Error = Error;

    fn try_from(v: &IOptionMarket::VegaUtilFeeComponents) -> Result<Self> {
        Ok(Self {
            pre_trade_amm_net_std_vega: v.preTradeAmmNetStdVega,
            post_trade_amm_net_std_vega: v.postTradeAmmNetStdVega,
            vega_util: from_uint(v.vegaUtil)?,
            vol_traded: from_uint(v.volTraded)?,
            nav: from_uint(v.NAV)?,
            vega_util_fee: from_uint(v.vegaUtilFee)?,
        })
    }
}

impl TryFrom<&IOptionMarket::VarianceFeeComponents> for VarianceFeeComponents {
    type Error = Error;

    fn try_from(v: &IOptionMarket::VarianceFeeComponents) -> Result<Self> {
        Ok(Self {
            variance_fee_coefficient: from_uint(v.varianceFeeCoefficient)?,
            vega: from_uint(v.vega)?,
            vega_coefficient: from_uint(v.vegaCoefficient)?,
            skew: from_uint(v.skew)?,
            skew_coefficient: from_uint(v.skewCoefficient)?,
            iv_variance: from_uint(v.ivVariance)?,
            iv_variance_coefficient: from_uint(v.ivVarianceCoefficient)?,
            variance_fee: from_uint(v.varianceFee)?,
        })
    }
}

impl TryFrom<&IOptionMarket::TradeResult> for TradeResult {
    type Error = Error;

    fn try_from(r: &IOptionMarket::TradeResult) -> Result<Self> {
        Ok(Self {
            amount: from_uint(r.amount)?,
            premium: from_uint(r.premium)?,
            option_price_fee: from_uint(r.optionPriceFee)?,
            spot_price_fee: from_uint(r.spotPriceFee)?,
            vega_util_fee: (&r.vegaUtilFee).try_into()?,
            variance_fee: (&r.varianceFee).try_into()?,
            total_fee: from_uint(r.totalFee)?,
            total_cost: from_uint(r.totalCost)?,
            vol_traded: from_uint(r.volTraded)?,
            new_base_iv: from_uint(r.newBaseIv)?,
            new_skew: from_uint(r.newSkew)?,
        })
    }
}

impl TryFrom<&IOptionMarket::LiquidationEventData> for LiquidationData {
    type Error = Error;

    fn try_from(l: &IOptionMarket::LiquidationEventData) -> Result<Self> {
        Ok(Self {
            reward_beneficiary: l.rewardBeneficiary,
            caller: l.caller,
            return_collateral: from_uint(l.returnCollateral)?,
            lp_premiums: from_uint(l.lpPremiums)?,
            lp_fee: from_uint(l.lpFee)?,
            liquidator_fee: from_uint(l.liquidatorFee)?,
            sm_fee: from_uint(l.smFee)?,
            insolvent_amount: from_uint(l.insolventAmount)?,
        })
    }
}

// ── Log decoding ─────────────────────────────────────────────────────

/// Decode one option market `Trade` log.
pub fn trade_event_from_log(log: &Log) -> Result<TradeEvent> {
    let position = log_position(log)?;
    let decoded = log.log_decode::<IOptionMarket::Trade>()?;
    let event = &decoded.inner.data;

    Ok(TradeEvent {
        transaction_hash: position.transaction_hash,
        block_number: position.block_number,
        log_index: position.log_index,
        trader: event.trader,
        position_id: to_u64(event.positionId, "position id")?,
        trade: trade_params(event.strikeId, &event.trade)?,
        results: event
            .tradeResults
            .iter()
            .map(TradeResult::try_from)
            .collect::<Result<_>>()?,
        liquidation: (&event.liquidation).try_into()?,
    })
}

/// Decode one option token `Transfer` log.
pub fn transfer_event_from_log(log: &Log) -> Result<TransferEvent> {
    let position = log_position(log)?;
    let decoded = log.log_decode::<IOptionToken::Transfer>()?;
    let event = &decoded.inner.data;

    Ok(TransferEvent {
        transaction_hash: position.transaction_hash,
        block_number: position.block_number,
        log_index: position.log_index,
        from: event.from,
        to: event.to,
        token_id: to_u64(event.tokenId, "token id")?,
    })
}

/// Decode every `Trade` log, skipping logs that are not trades or lack block metadata.
pub fn parse_trade_events(logs: &[Log]) -> Vec<TradeEvent> {
    logs.iter()
        .filter_map(|log| match trade_event_from_log(log) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!(tx = ?log.transaction_hash, error = %e, "skipping trade log");
                None
            }
        })
        .collect()
}

/// Decode every `Transfer` log, skipping logs that are not transfers or lack block metadata.
pub fn parse_transfer_events(logs: &[Log]) -> Vec<TransferEvent> {
    logs.iter()
        .filter_map(|log| match transfer_event_from_log(log) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!(tx = ?log.transaction_hash, error = %e, "skipping transfer log");
                None
            }
        })
        .collect()
}

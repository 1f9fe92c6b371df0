use alloy::primitives::I256;
use serde::{Deserialize, Serialize};

use crate::constants::UNIT;
use crate::model::OptionView;

/// Why a quote cannot be traded. Not an error: the quote still carries IV and Greeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisabledReason {
    EmptySize,
    Expired,
    TradingCutoff,
    InsufficientLiquidity,
    DeltaOutOfRange,
    VolTooHigh,
    VolTooLow,
    IVTooHigh,
    IVTooLow,
    SkewTooHigh,
    SkewTooLow,
}

impl std::fmt::Display for DisabledReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DisabledReason::EmptySize => "empty size",
            DisabledReason::Expired => "board expired",
            DisabledReason::TradingCutoff => "inside trading cutoff",
            DisabledReason::InsufficientLiquidity => "insufficient liquidity",
            DisabledReason::DeltaOutOfRange => "delta out of range",
            DisabledReason::VolTooHigh => "vol too high",
            DisabledReason::VolTooLow => "vol too low",
            DisabledReason::IVTooHigh => "base iv too high",
            DisabledReason::IVTooLow => "base iv too low",
            DisabledReason::SkewTooHigh => "skew too high",
            DisabledReason::SkewTooLow => "skew too low",
        };
        f.write_str(s)
    }
}

/// Evaluate the trade limits in fixed precedence; the first failing check wins.
#[allow(clippy::too_many_arguments)]
pub fn disabled_reason(
    option: &OptionView<'_>,
    size: I256,
    min_liquidity: I256,
    iv: I256,
    skew: I256,
    base_iv: I256,
    is_buy: bool,
    is_force_close: bool,
) -> Option<DisabledReason> {
    let market = option.market();
    let limits = &market.params.trade_limit;
    let time_to_expiry = option.time_to_expiry();

    if size <= I256::ZERO {
        return Some(DisabledReason::EmptySize);
    }
    if time_to_expiry <= 0 {
        return Some(DisabledReason::Expired);
    }
    if !is_force_close && time_to_expiry < limits.trading_cutoff as i64 {
        return Some(DisabledReason::TradingCutoff);
    }
    if min_liquidity > I256::ZERO && is_buy && market.liquidity.free_liquidity < min_liquidity {
        return Some(DisabledReason::InsufficientLiquidity);
    }

    // Delta bounds are defined on the call side for both kinds.
    let call_delta = option.strike().call.delta;
    if !is_force_close && (call_delta < limits.min_delta || call_delta > UNIT - limits.min_delta) {
        return Some(DisabledReason::DeltaOutOfRange);
    }

    if iv > limits.max_vol {
        return Some(DisabledReason::VolTooHigh);
    }
    if iv < limits.min_vol {
        return Some(DisabledReason::VolTooLow);
    }
    if base_iv > limits.max_base_iv {
        return Some(DisabledReason::IVTooHigh);
    }
    if base_iv < limits.min_base_iv {
        return Some(DisabledReason::IVTooLow);
    }
    if skew > limits.max_skew {
        return Some(DisabledReason::SkewTooHigh);
    }
    if skew < limits.min_skew {
        return Some(DisabledReason::SkewTooLow);
    }
    None
}

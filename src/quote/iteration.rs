//! One sub-trade of an iterative quote.

use alloy::primitives::I256;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::fees::{
    VarianceFeeComponents, VegaUtilFeeComponents, time_weighted_fee, variance_fee, vega_util_fee,
};
use crate::error::Result;
use crate::math::black_scholes;
use crate::math::fixed::{from_fixed, from_int, to_fixed};
use crate::math::{scaled_div, scaled_mul};
use crate::model::OptionView;

/// Volatility surface and AMM exposure carried from one sub-trade to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationState {
    pub base_iv: I256,
    pub skew: I256,
    pub amm_net_std_vega: I256,
}

impl IterationState {
    /// State before any sub-trade: the AMM holds the opposite of the market's net exposure.
    pub fn initial(option: &OptionView<'_>) -> Self {
        Self {
            base_iv: option.board().base_iv,
            skew: option.strike().skew,
            amm_net_std_vega: -option.market().net_std_vega,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteIteration {
    pub size: I256,
    pub premium: I256,
    pub option_price_fee: I256,
    pub spot_price_fee: I256,
    pub vega_util_fee: VegaUtilFeeComponents,
    pub variance_fee: VarianceFeeComponents,
    pub force_close_penalty: I256,
    pub vol_traded: I256,
    pub new_base_iv: I256,
    pub new_skew: I256,
    pub post_trade_amm_net_std_vega: I256,
}

impl QuoteIteration {
    pub fn next_state(&self) -> IterationState {
        IterationState {
            base_iv: self.new_base_iv,
            skew: self.new_skew,
            amm_net_std_vega: self.post_trade_amm_net_std_vega,
        }
    }

    pub fn fee(&self) -> I256 {
        self.option_price_fee
            + self.spot_price_fee
            + self.vega_util_fee.vega_util_fee
            + self.variance_fee.variance_fee
    }
}

/// Base IV and skew after trading `size`, returned as `(new_base_iv, new_skew)`.
pub fn iv_impact_for_trade(
    option: &OptionView<'_>,
    base_iv: I256,
    skew: I256,
    size: I256,
    is_buy: bool,
) -> Result<(I256, I256)> {
    let pricing = &option.market().params.pricing;
    let order_size = scaled_div(size, pricing.standard_size)?;
    let base_iv_move = order_size / from_int(100);
    let skew_move = scaled_mul(base_iv_move, pricing.skew_adjustment_factor)?;
    if is_buy {
        Ok((base_iv + base_iv_move, skew + skew_move))
    } else {
        Ok((base_iv - base_iv_move, skew - skew_move))
    }
}

// Force close trades are priced against the shocked vol when it is worse for the trader.
fn force_close_vol(option: &OptionView<'_>, vol_traded: I256, is_buy: bool) -> I256 {
    let shocks = &option.market().params.force_close;
    if is_buy {
        if shocks.short_vol_shock.is_zero() {
            vol_traded
        } else {
            vol_traded.max(shocks.short_vol_shock)
        }
    } else if shocks.long_vol_shock.is_zero() {
        vol_traded
    } else {
        vol_traded.min(shocks.long_vol_shock)
    }
}

fn option_price(option: &OptionView<'_>, vol: I256) -> Result<I256> {
    let market = option.market();
    let price = black_scholes::price(
        option.time_to_expiry_annualized(),
        from_fixed(vol),
        from_fixed(market.spot_price),
        from_fixed(option.strike().strike_price),
        from_fixed(market.rate_and_carry),
        option.kind(),
    );
    to_fixed(price)
}

/// Price one sub-trade of `size` starting from `state`.
pub fn quote_iteration(
    option: &OptionView<'_>,
    is_buy: bool,
    size: I256,
    state: &IterationState,
    is_force_close: bool,
) -> Result<QuoteIteration> {
    let market = option.market();
    let pricing = &market.params.pricing;
    let time_to_expiry = option.time_to_expiry();

    let (new_base_iv, new_skew) =
        iv_impact_for_trade(option, state.base_iv, state.skew, size, is_buy)?;
    let vol_traded = scaled_mul(new_base_iv, new_skew)?;

    let base_price = option_price(option, vol_traded)?;
    let (price, force_close_penalty) = if is_force_close {
        let shocked = option_price(option, force_close_vol(option, vol_traded, is_buy))?;
        (shocked, scaled_mul((shocked - base_price).abs(), size)?)
    } else {
        (base_price, I256::ZERO)
    };

    let option_price_fee_coefficient = time_weighted_fee(
        time_to_expiry,
        pricing.option_price_fee_1x_point,
        pricing.option_price_fee_2x_point,
        pricing.option_price_fee_coefficient,
    )?;
    let option_price_fee = scaled_mul(scaled_mul(option_price_fee_coefficient, price)?, size)?;

    let spot_price_fee_coefficient = time_weighted_fee(
        time_to_expiry,
        pricing.spot_price_fee_1x_point,
        pricing.spot_price_fee_2x_point,
        pricing.spot_price_fee_coefficient,
    )?;
    let spot_price_fee =
        scaled_mul(scaled_mul(spot_price_fee_coefficient, market.spot_price)?, size)?;

    let t = option.time_to_expiry_annualized();
    let vol = from_fixed(vol_traded);
    let spot = from_fixed(market.spot_price);
    let strike = from_fixed(option.strike().strike_price);
    let rate = from_fixed(market.rate_and_carry);
    let vega = to_fixed(black_scholes::vega(t, vol, spot, strike, rate))?;
    let std_vega = to_fixed(black_scholes::std_vega(t, vol, spot, strike, rate))?;

    // The AMM takes the other side: a buy reduces its exposure.
    let std_vega_traded = scaled_mul(std_vega, size)?;
    let post_trade_amm_net_std_vega = if is_buy {
        state.amm_net_std_vega - std_vega_traded
    } else {
        state.amm_net_std_vega + std_vega_traded
    };

    let vega_util_fee = vega_util_fee(
        market,
        state.amm_net_std_vega,
        post_trade_amm_net_std_vega,
        vol_traded,
        size,
    )?;
    let variance_fee =
        variance_fee(market, option.board(), is_force_close, vega, new_skew, size)?;

    let fees = option_price_fee
        + spot_price_fee
        + vega_util_fee.vega_util_fee
        + variance_fee.variance_fee;
    let base = scaled_mul(price, size)?;
    let premium = if is_buy {
        base + fees
    } else {
        (base - fees).max(I256::ZERO)
    };

    debug!(
        strike_id = option.strike().id,
        kind = %option.kind(),
        is_buy,
        size = %size,
        premium = %premium,
        vol_traded = %vol_traded,
        "quote iteration"
    );

    Ok(QuoteIteration {
        size,
        premium,
        option_price_fee,
        spot_price_fee,
        vega_util_fee,
        variance_fee,
        force_close_penalty,
        vol_traded,
        new_base_iv,
        new_skew,
        post_trade_amm_net_std_vega,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example;
    use crate::math::{from_parts, units};
    use crate::model::OptionKind;

    #[test]
    fn test_iv_impact() {
        let snapshot = example::snapshot();
        let option = snapshot.option(2, OptionKind::Call).unwrap();
        // Trading the standard size moves base iv by 1 vol point
        let (base_iv, skew) =
            iv_impact_for_trade(&option, from_parts(75, 2), units(1), units(5), true).unwrap();
        assert_eq!(base_iv, from_parts(76, 2));
        assert_eq!(skew, from_parts(10075, 4));

        let (base_iv, skew) =
            iv_impact_for_trade(&option, from_parts(75, 2), units(1), units(5), false).unwrap();
        assert_eq!(base_iv, from_parts(74, 2));
        assert_eq!(skew, from_parts(9925, 4));
    }

    #[test]
    fn test_buy_pays_fees_sell_receives_less() {
        let snapshot = example::snapshot();
        let option = snapshot.option(2, OptionKind::Call).unwrap();
        let state = IterationState::initial(&option);

        let buy = quote_iteration(&option, true, units(1), &state, false).unwrap();
        let sell = quote_iteration(&option, false, units(1), &state, false).unwrap();

        assert!(buy.fee() > I256::ZERO);
        assert!(buy.premium > sell.premium);
        assert!(buy.vol_traded > sell.vol_traded);
        assert!(buy.post_trade_amm_net_std_vega < state.amm_net_std_vega);
        assert!(sell.post_trade_amm_net_std_vega > state.amm_net_std_vega);
        assert_eq!(buy.force_close_penalty, I256::ZERO);
        assert_eq!(buy.next_state().base_iv, buy.new_base_iv);
    }

    #[test]
    fn test_force_close_penalty() {
        let snapshot = example::snapshot();
        let option = snapshot.option(3, OptionKind::Put).unwrap();
        let state = IterationState::initial(&option);

        // vol traded is ~0.77, below the 1.2 short shock: a forced buy pays more
        let forced = quote_iteration(&option, true, units(1), &state, true).unwrap();
        let normal = quote_iteration(&option, true, units(1), &state, false).unwrap();
        assert!(forced.force_close_penalty > I256::ZERO);
        assert!(forced.premium > normal.premium);
    }

    #[test]
    fn test_zero_size_iteration_is_empty() {
        let snapshot = example::snapshot();
        let option = snapshot.option(2, OptionKind::Call).unwrap();
        let state = IterationState::initial(&option);
        let it = quote_iteration(&option, true, I256::ZERO, &state, false).unwrap();
        assert_eq!(it.premium, I256::ZERO);
        assert_eq!(it.fee(), I256::ZERO);
        assert_eq!(it.next_state(), state);
    }
}

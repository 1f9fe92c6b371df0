//! Per-sub-trade fee components.

use alloy::primitives::I256;
use serde::{Deserialize, Serialize};

use crate::constants::UNIT;
use crate::error::{Error, Result};
use crate::math::fixed::from_int;
use crate::math::{scaled_div, scaled_mul};
use crate::model::{Board, Market};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VegaUtilFeeComponents {
    pub pre_trade_amm_net_std_vega: I256,
    pub post_trade_amm_net_std_vega: I256,
    pub vega_util: I256,
    pub vol_traded: I256,
    pub nav: I256,
    pub vega_util_fee: I256,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarianceFeeComponents {
    pub variance_fee_coefficient: I256,
    pub vega: I256,
    pub vega_coefficient: I256,
    pub skew: I256,
    pub skew_coefficient: I256,
    pub iv_variance: I256,
    pub iv_variance_coefficient: I256,
    pub variance_fee: I256,
}

/// Fee coefficient scaled up linearly once expiry is beyond `point_1x`,
/// reaching 2x the coefficient at `point_2x`.
pub fn time_weighted_fee(
    time_to_expiry: i64,
    point_1x: u64,
    point_2x: u64,
    coefficient: I256,
) -> Result<I256> {
    if time_to_expiry <= point_1x as i64 {
        return Ok(coefficient);
    }
    if point_2x <= point_1x {
        return Err(Error::invalid_argument(format!(
            "fee 2x point ({point_2x}) must be after the 1x point ({point_1x})"
        )));
    }
    let over = from_int(time_to_expiry - point_1x as i64);
    let span = from_int((point_2x - point_1x) as i64);
    scaled_mul(coefficient, UNIT + scaled_div(over, span)?)
}

/// Charged only when the trade pushes AMM exposure further from neutral.
pub fn vega_util_fee(
    market: &Market,
    pre_trade_amm_net_std_vega: I256,
    post_trade_amm_net_std_vega: I256,
    vol_traded: I256,
    size: I256,
) -> Result<VegaUtilFeeComponents> {
    let nav = market.liquidity.nav;
    if pre_trade_amm_net_std_vega.abs() >= post_trade_amm_net_std_vega.abs() {
        return Ok(VegaUtilFeeComponents {
            pre_trade_amm_net_std_vega,
            post_trade_amm_net_std_vega,
            vol_traded,
            nav,
            ..Default::default()
        });
    }
    let vega_util = if nav > I256::ZERO {
        scaled_div(scaled_mul(vol_traded, post_trade_amm_net_std_vega.abs())?, nav)?
    } else {
        I256::ZERO
    };
    let vega_util_fee = scaled_mul(
        scaled_mul(market.params.pricing.vega_fee_coefficient, vega_util)?,
        size,
    )?;
    Ok(VegaUtilFeeComponents {
        pre_trade_amm_net_std_vega,
        post_trade_amm_net_std_vega,
        vega_util,
        vol_traded,
        nav,
        vega_util_fee,
    })
}

pub fn variance_fee(
    market: &Market,
    board: &Board,
    is_force_close: bool,
    vega: I256,
    skew: I256,
    size: I256,
) -> Result<VarianceFeeComponents> {
    let params = &market.params.variance_fee;
    let coefficient = if is_force_close {
        params.force_close_variance_fee_coefficient
    } else {
        params.default_variance_fee_coefficient
    };
    if coefficient.is_zero() {
        return Ok(VarianceFeeComponents {
            vega,
            skew,
            iv_variance: board.iv_variance,
            ..Default::default()
        });
    }

    let vega_coefficient =
        params.minimum_static_vega + scaled_mul(vega, params.vega_coefficient)?;
    let skew_coefficient = params.minimum_static_skew_adjustment
        + scaled_mul((skew - params.reference_skew).abs(), params.skew_adjustment_coefficient)?;
    let iv_variance_coefficient = params.minimum_static_iv_variance
        + scaled_mul(board.iv_variance, params.iv_variance_coefficient)?;

    let variance_fee = scaled_mul(
        scaled_mul(
            scaled_mul(scaled_mul(coefficient, vega_coefficient)?, skew_coefficient)?,
            iv_variance_coefficient,
        )?,
        size,
    )?;

    Ok(VarianceFeeComponents {
        variance_fee_coefficient: coefficient,
        vega,
        vega_coefficient,
        skew,
        skew_coefficient,
        iv_variance: board.iv_variance,
        iv_variance_coefficient,
        variance_fee,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example;
    use crate::math::{from_parts, units};

    #[test]
    fn test_time_weighted_fee() {
        let coef = from_parts(1, 2);
        // At or inside the 1x point the coefficient is unchanged
        assert_eq!(time_weighted_fee(100, 200, 400, coef).unwrap(), coef);
        // Halfway between the points: 1.5x
        assert_eq!(time_weighted_fee(300, 200, 400, coef).unwrap(), from_parts(15, 3));
        // At the 2x point
        assert_eq!(time_weighted_fee(400, 200, 400, coef).unwrap(), from_parts(2, 2));
        assert!(time_weighted_fee(300, 200, 200, coef).is_err());
    }

    #[test]
    fn test_vega_util_fee_only_when_exposure_grows() {
        let market = example::snapshot().market;
        let reducing = vega_util_fee(&market, units(200), units(150), from_parts(8, 1), units(1))
            .unwrap();
        assert_eq!(reducing.vega_util_fee, I256::ZERO);
        assert_eq!(reducing.post_trade_amm_net_std_vega, units(150));

        let growing = vega_util_fee(&market, units(200), units(250), from_parts(8, 1), units(1))
            .unwrap();
        // 0.8 * 250 / 10_000_000 = 0.00002, * 6000 = 0.12
        assert_eq!(growing.vega_util, from_parts(2, 5));
        assert_eq!(growing.vega_util_fee, from_parts(12, 2));
    }

    #[test]
    fn test_variance_fee_zero_coefficient() {
        let mut market = example::snapshot().market;
        market.params.variance_fee.default_variance_fee_coefficient = I256::ZERO;
        let board = example::snapshot().boards[0].clone();
        let fee = variance_fee(&market, &board, false, units(2), units(1), units(1)).unwrap();
        assert_eq!(fee.variance_fee, I256::ZERO);
        assert_eq!(fee.vega, units(2));
    }

    #[test]
    fn test_variance_fee_components() {
        let snapshot = example::snapshot();
        let fee = variance_fee(
            &snapshot.market,
            &snapshot.boards[0],
            false,
            units(2),
            from_parts(11, 1),
            units(1),
        )
        .unwrap();
        // 0.001 + 2 * 0.1
        assert_eq!(fee.vega_coefficient, from_parts(201, 3));
        // 0.001 + 0.1 * 3
        assert_eq!(fee.skew_coefficient, from_parts(301, 3));
        // 0.001 + 0.01 * 1.5
        assert_eq!(fee.iv_variance_coefficient, from_parts(16, 3));
        assert!(fee.variance_fee > I256::ZERO);
    }
}

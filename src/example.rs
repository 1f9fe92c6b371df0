use alloy::primitives::address;

use crate::constants::SECONDS_PER_DAY as DAY;
use crate::math::{from_parts, units};
use crate::model::*;

const EXAMPLE_TIMESTAMP: u64 = 1_700_000_000;

/// An ETH market with one monthly board and one board inside the trading cutoff.
///
/// Used by the `example` command and as the fixture for tests.
pub fn snapshot() -> MarketSnapshot {
    MarketSnapshot {
        market: Market {
            info: MarketInfo {
                name: "ETH-USD".into(),
                address: address!("00000000000000000000000000000000000a11e7"),
                option_token: address!("00000000000000000000000000000000000a7d11"),
                chain: Chain::optimism(),
            },
            spot_price: units(1800),
            rate_and_carry: from_parts(5, 2),
            net_std_vega: units(-200),
            liquidity: MarketLiquidity {
                free_liquidity: units(5_000_000),
                nav: units(10_000_000),
            },
            params: MarketParams {
                pricing: PricingParams {
                    option_price_fee_coefficient: from_parts(1, 2),
                    option_price_fee_1x_point: 42 * DAY,
                    option_price_fee_2x_point: 112 * DAY,
                    spot_price_fee_coefficient: from_parts(8, 4),
                    spot_price_fee_1x_point: 42 * DAY,
                    spot_price_fee_2x_point: 112 * DAY,
                    vega_fee_coefficient: units(6000),
                    standard_size: units(5),
                    skew_adjustment_factor: from_parts(75, 2),
                },
                trade_limit: TradeLimitParams {
                    min_delta: from_parts(15, 2),
                    trading_cutoff: 12 * 3600,
                    min_base_iv: from_parts(35, 2),
                    max_base_iv: from_parts(15, 1),
                    min_skew: from_parts(5, 1),
                    max_skew: from_parts(25, 1),
                    min_vol: from_parts(3, 1),
                    max_vol: units(2),
                },
                variance_fee: VarianceFeeParams {
                    default_variance_fee_coefficient: from_parts(6, 1),
                    force_close_variance_fee_coefficient: from_parts(3, 1),
                    skew_adjustment_coefficient: units(3),
                    reference_skew: units(1),
                    minimum_static_skew_adjustment: from_parts(1, 3),
                    vega_coefficient: from_parts(1, 1),
                    minimum_static_vega: from_parts(1, 3),
                    iv_variance_coefficient: from_parts(15, 1),
                    minimum_static_iv_variance: from_parts(1, 3),
                },
                force_close: ForceCloseParams {
                    short_vol_shock: from_parts(12, 1),
                    long_vol_shock: from_parts(4, 1),
                },
            },
        },
        timestamp: EXAMPLE_TIMESTAMP,
        boards: vec![
            Board {
                id: 1,
                expiry: EXAMPLE_TIMESTAMP + 28 * DAY,
                base_iv: from_parts(75, 2),
                iv_variance: from_parts(1, 2),
            },
            Board {
                id: 2,
                expiry: EXAMPLE_TIMESTAMP + 6 * 3600,
                base_iv: from_parts(7, 1),
                iv_variance: from_parts(1, 2),
            },
        ],
        strikes: vec![
            strike(1, 1, 1600, (105, 2), (78, 2), (23, 1), (2, 2)),
            strike(2, 1, 1800, (1, 0), (53, 2), (26, 1), (2, 2)),
            strike(3, 1, 2000, (102, 2), (31, 2), (22, 1), (1, 2)),
            strike(4, 1, 2400, (11, 1), (8, 2), (9, 1), (3, 3)),
            strike(5, 2, 1800, (1, 0), (52, 2), (12, 1), (1, 3)),
        ],
    }
}

fn strike(
    id: u64,
    board_id: u64,
    strike_price: i64,
    skew: (i64, u32),
    call_delta: (i64, u32),
    vega: (i64, u32),
    rho: (i64, u32),
) -> Strike {
    let call_delta = from_parts(call_delta.0, call_delta.1);
    let rho = from_parts(rho.0, rho.1);
    Strike {
        id,
        board_id,
        strike_price: units(strike_price),
        skew: from_parts(skew.0, skew.1),
        vega: from_parts(vega.0, vega.1),
        gamma: from_parts(1, 3),
        call: CachedGreeks {
            delta: call_delta,
            theta: units(-2),
            rho,
        },
        put: CachedGreeks {
            delta: call_delta - units(1),
            theta: from_parts(-18, 1),
            rho: -rho,
        },
    }
}

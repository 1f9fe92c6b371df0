use alloy::primitives::{Address, I256};
use serde::{Deserialize, Serialize};

use super::chain::Chain;

/// Identity of an option market: enough to label trades and find its logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketInfo {
    pub name: String,
    /// Option market contract (emits `Trade`).
    pub address: Address,
    /// Option token contract (ERC-721 positions, emits `Transfer`).
    pub option_token: Address,
    #[serde(default)]
    pub chain: Chain,
}

/// On-chain mirrored market state. Read-only to the pricing core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    #[serde(flatten)]
    pub info: MarketInfo,
    pub spot_price: I256,
    pub rate_and_carry: I256,
    /// Global net standardized vega, trader side. The AMM holds the opposite.
    pub net_std_vega: I256,
    pub liquidity: MarketLiquidity,
    pub params: MarketParams,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketLiquidity {
    pub free_liquidity: I256,
    pub nav: I256,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketParams {
    pub pricing: PricingParams,
    pub trade_limit: TradeLimitParams,
    pub variance_fee: VarianceFeeParams,
    #[serde(default)]
    pub force_close: ForceCloseParams,
}

/// Fee coefficients and IV impact of the pricer.
/// The `*_point` fields are seconds to expiry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingParams {
    pub option_price_fee_coefficient: I256,
    pub option_price_fee_1x_point: u64,
    pub option_price_fee_2x_point: u64,
    pub spot_price_fee_coefficient: I256,
    pub spot_price_fee_1x_point: u64,
    pub spot_price_fee_2x_point: u64,
    pub vega_fee_coefficient: I256,
    pub standard_size: I256,
    pub skew_adjustment_factor: I256,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeLimitParams {
    pub min_delta: I256,
    /// Seconds before expiry after which only force closes are accepted.
    pub trading_cutoff: u64,
    pub min_base_iv: I256,
    pub max_base_iv: I256,
    pub min_skew: I256,
    pub max_skew: I256,
    pub min_vol: I256,
    pub max_vol: I256,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarianceFeeParams {
    pub default_variance_fee_coefficient: I256,
    pub force_close_variance_fee_coefficient: I256,
    pub skew_adjustment_coefficient: I256,
    pub reference_skew: I256,
    pub minimum_static_skew_adjustment: I256,
    pub vega_coefficient: I256,
    pub minimum_static_vega: I256,
    pub iv_variance_coefficient: I256,
    pub minimum_static_iv_variance: I256,
}

/// Vol shocks applied when a position is force closed.
/// Zero disables the shock for that side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceCloseParams {
    /// Floor on the traded vol when buying back a short.
    pub short_vol_shock: I256,
    /// Cap on the traded vol when selling out of a long.
    pub long_vol_shock: I256,
}

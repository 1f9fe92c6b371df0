//! Iterative quote engine.
//!
//! A trade is filled as a sequence of equal sub-trades. Each sub-trade moves
//! base IV, skew and AMM exposure, and the next one is priced from the moved
//! state, so large trades pay for their own market impact.

pub mod disabled;
pub mod fees;
pub mod iteration;

use alloy::primitives::I256;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ITERATIONS, MAX_ITERATIONS};
use crate::error::{Error, Result};
use crate::math::black_scholes;
use crate::math::fixed::{from_fixed, from_int, to_fixed};
use crate::math::{scaled_div, scaled_mul};
use crate::model::{MarketSnapshot, OptionKind, OptionView};

pub use disabled::{DisabledReason, disabled_reason};
pub use fees::{VarianceFeeComponents, VegaUtilFeeComponents};
pub use iteration::{IterationState, QuoteIteration, iv_impact_for_trade, quote_iteration};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteOptions {
    pub is_force_close: bool,
    /// Number of sub-trades; `DEFAULT_ITERATIONS` when unset.
    pub iterations: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteFeeComponents {
    pub option_price_fee: I256,
    pub spot_price_fee: I256,
    pub vega_util_fee: I256,
    pub variance_fee: I256,
}

impl QuoteFeeComponents {
    pub fn total(&self) -> I256 {
        self.option_price_fee + self.spot_price_fee + self.vega_util_fee + self.variance_fee
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteGreeks {
    pub delta: I256,
    pub vega: I256,
    pub gamma: I256,
    pub theta: I256,
    pub rho: I256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub strike_id: u64,
    pub board_id: u64,
    pub kind: OptionKind,
    pub is_buy: bool,
    pub size: I256,
    pub price_per_option: I256,
    pub premium: I256,
    pub fee: I256,
    pub fee_components: QuoteFeeComponents,
    pub iv: I256,
    pub greeks: QuoteGreeks,
    pub force_close_penalty: I256,
    pub is_force_close: bool,
    pub break_even: I256,
    pub is_disabled: bool,
    pub disabled_reason: Option<DisabledReason>,
    pub iterations: Vec<QuoteIteration>,
}

/// Split `size` into `iterations` sub-sizes; the last one absorbs the division remainder.
pub fn split_size(size: I256, iterations: u32) -> impl Iterator<Item = I256> {
    let n = iterations.max(1);
    let each = size / from_int(i64::from(n));
    let last = size - each * from_int(i64::from(n - 1));
    (0..n).map(move |i| if i + 1 == n { last } else { each })
}

/// Spot price at expiry where the position breaks even.
pub fn break_even_price(kind: OptionKind, strike_price: I256, price_per_option: I256) -> I256 {
    match kind {
        OptionKind::Call => strike_price + price_per_option,
        OptionKind::Put => strike_price - price_per_option,
    }
}

impl Quote {
    /// Quote buying or selling `size` of `option`.
    ///
    /// Fails only on invalid arguments. A quote that cannot be traded is
    /// still returned, with `disabled_reason` set and monetary fields zeroed.
    pub fn get(
        option: &OptionView<'_>,
        is_buy: bool,
        size: I256,
        options: QuoteOptions,
    ) -> Result<Self> {
        let num_iterations = options.iterations.unwrap_or(DEFAULT_ITERATIONS);
        if num_iterations < 1 {
            return Err(Error::invalid_argument(
                "iterations must be greater than or equal to 1",
            ));
        }
        if num_iterations > MAX_ITERATIONS {
            return Err(Error::invalid_argument(format!(
                "iterations must not exceed {MAX_ITERATIONS}, got {num_iterations}"
            )));
        }
        if size < I256::ZERO {
            return Err(Error::invalid_argument(format!(
                "size must not be negative, got {size}"
            )));
        }
        let is_force_close = options.is_force_close;

        let mut iterations = Vec::new();
        let state = split_size(size, num_iterations).try_fold(
            IterationState::initial(option),
            |state, sub_size| -> Result<IterationState> {
                let it = quote_iteration(option, is_buy, sub_size, &state, is_force_close)?;
                let next = it.next_state();
                iterations.push(it);
                Ok(next)
            },
        )?;

        let iv = scaled_mul(state.base_iv, state.skew)?;

        if let Some(reason) = disabled_reason(
            option,
            size,
            I256::ZERO,
            iv,
            state.skew,
            state.base_iv,
            is_buy,
            is_force_close,
        ) {
            return Self::disabled(option, is_buy, size, reason);
        }

        let market = option.market();
        let greeks = black_scholes::greeks(
            option.time_to_expiry_annualized(),
            from_fixed(iv),
            from_fixed(market.spot_price),
            from_fixed(option.strike().strike_price),
            from_fixed(market.rate_and_carry),
            option.kind(),
        );

        let mut premium = I256::ZERO;
        let mut force_close_penalty = I256::ZERO;
        let mut fee_components = QuoteFeeComponents::default();
        for it in &iterations {
            premium += it.premium;
            force_close_penalty += it.force_close_penalty;
            fee_components.option_price_fee += it.option_price_fee;
            fee_components.spot_price_fee += it.spot_price_fee;
            fee_components.vega_util_fee += it.vega_util_fee.vega_util_fee;
            fee_components.variance_fee += it.variance_fee.variance_fee;
        }
        let price_per_option = scaled_div(premium, size)?;

        Ok(Self {
            strike_id: option.strike().id,
            board_id: option.board().id,
            kind: option.kind(),
            is_buy,
            size,
            price_per_option,
            premium,
            fee: fee_components.total(),
            fee_components,
            iv,
            greeks: QuoteGreeks {
                delta: to_fixed(greeks.delta)?,
                vega: to_fixed(greeks.vega)?,
                gamma: to_fixed(greeks.gamma)?,
                theta: to_fixed(greeks.theta)?,
                rho: to_fixed(greeks.rho)?,
            },
            force_close_penalty,
            is_force_close,
            break_even: break_even_price(
                option.kind(),
                option.strike().strike_price,
                price_per_option,
            ),
            is_disabled: false,
            disabled_reason: None,
            iterations,
        })
    }

    fn disabled(
        option: &OptionView<'_>,
        is_buy: bool,
        size: I256,
        reason: DisabledReason,
    ) -> Result<Self> {
        let strike = option.strike();
        Ok(Self {
            strike_id: strike.id,
            board_id: option.board().id,
            kind: option.kind(),
            is_buy,
            size,
            price_per_option: I256::ZERO,
            premium: I256::ZERO,
            fee: I256::ZERO,
            fee_components: QuoteFeeComponents::default(),
            iv: scaled_mul(strike.skew, option.board().base_iv)?,
            greeks: QuoteGreeks {
                delta: option.delta(),
                vega: strike.vega,
                gamma: strike.gamma,
                theta: option.theta(),
                rho: option.rho(),
            },
            force_close_penalty: I256::ZERO,
            is_force_close: false,
            break_even: I256::ZERO,
            is_disabled: true,
            disabled_reason: Some(reason),
            iterations: Vec::new(),
        })
    }

    /// Resolve the quoted option back against `snapshot`.
    pub fn option<'a>(&self, snapshot: &'a MarketSnapshot) -> Result<OptionView<'a>> {
        snapshot.option(self.strike_id, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example;
    use crate::math::{from_parts, units};

    #[test]
    fn test_split_size() {
        assert_eq!(split_size(units(10), 4).collect::<Vec<_>>(), vec![from_parts(25, 1); 4]);
        let sizes: Vec<_> = split_size(from_int(10), 3).collect();
        assert_eq!(sizes.len(), 3);
        assert_eq!(sizes[2], from_int(4));
        assert_eq!(sizes.iter().fold(I256::ZERO, |a, b| a + *b), from_int(10));
    }

    #[test]
    fn test_break_even() {
        assert_eq!(break_even_price(OptionKind::Call, units(1800), units(50)), units(1850));
        assert_eq!(break_even_price(OptionKind::Put, units(1800), units(50)), units(1750));
    }

    #[test]
    fn test_invalid_arguments() {
        let snapshot = example::snapshot();
        let option = snapshot.option(2, OptionKind::Call).unwrap();
        let zero_iterations = QuoteOptions {
            iterations: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            Quote::get(&option, true, units(1), zero_iterations),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Quote::get(&option, true, units(-1), QuoteOptions::default()),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_iteration_count_is_bounded() {
        let snapshot = example::snapshot();
        let option = snapshot.option(2, OptionKind::Call).unwrap();
        for n in [MAX_ITERATIONS + 1, u32::MAX] {
            let options = QuoteOptions {
                iterations: Some(n),
                ..Default::default()
            };
            assert!(matches!(
                Quote::get(&option, true, units(1), options),
                Err(Error::InvalidArgument(_))
            ));
        }

        let at_bound = QuoteOptions {
            iterations: Some(MAX_ITERATIONS),
            ..Default::default()
        };
        let quote = Quote::get(&option, true, units(1), at_bound).unwrap();
        assert_eq!(quote.iterations.len(), MAX_ITERATIONS as usize);
    }

    #[test]
    fn test_quote_aggregates_iterations() {
        let snapshot = example::snapshot();
        let option = snapshot.option(2, OptionKind::Call).unwrap();
        let quote = Quote::get(&option, true, units(10), QuoteOptions::default()).unwrap();

        assert!(!quote.is_disabled);
        assert_eq!(quote.iterations.len(), DEFAULT_ITERATIONS as usize);
        let premium = quote.iterations.iter().fold(I256::ZERO, |a, it| a + it.premium);
        assert_eq!(quote.premium, premium);
        assert_eq!(quote.fee, quote.fee_components.total());
        assert_eq!(quote.price_per_option, scaled_div(quote.premium, quote.size).unwrap());
        assert_eq!(quote.break_even, units(1800) + quote.price_per_option);
        assert!(quote.greeks.delta > I256::ZERO && quote.greeks.delta < units(1));
        assert_eq!(quote.option(&snapshot).unwrap().strike().id, 2);
    }

    #[test]
    fn test_empty_size_uses_cached_greeks() {
        let snapshot = example::snapshot();
        let option = snapshot.option(1, OptionKind::Put).unwrap();
        let quote = Quote::get(&option, true, I256::ZERO, QuoteOptions::default()).unwrap();

        assert_eq!(quote.disabled_reason, Some(DisabledReason::EmptySize));
        assert!(quote.is_disabled);
        assert_eq!(quote.premium, I256::ZERO);
        assert_eq!(quote.fee, I256::ZERO);
        assert_eq!(quote.greeks.delta, snapshot.strikes[0].put.delta);
        assert_eq!(quote.greeks.vega, snapshot.strikes[0].vega);
        // 1.05 * 0.75
        assert_eq!(quote.iv, from_parts(7875, 4));
        assert!(quote.iterations.is_empty());
    }
}

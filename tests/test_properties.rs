//! Property-based tests for the quote engine invariants.

use alloy::primitives::I256;
use proptest::prelude::*;

use options_amm::example;
use options_amm::math::fixed::from_int;
use options_amm::math::{from_parts, units};
use options_amm::quote::{IterationState, quote_iteration, split_size};
use options_amm::{DisabledReason, OptionKind, Quote, QuoteOptions};

fn kind(is_call: bool) -> OptionKind {
    OptionKind::from_is_call(is_call)
}

/// Sizes in hundredths of an option, small enough that no bound trips.
fn size_strategy() -> impl Strategy<Value = I256> {
    (1i64..10_000).prop_map(|hundredths| from_parts(hundredths, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The split never leaks or invents size
    #[test]
    fn sub_sizes_sum_to_size(raw in 0i64..i64::MAX, n in 1u32..32) {
        let size = from_int(raw);
        let sizes: Vec<I256> = split_size(size, n).collect();
        prop_assert_eq!(sizes.len(), n as usize);
        let total = sizes.iter().fold(I256::ZERO, |acc, s| acc + *s);
        prop_assert_eq!(total, size);
    }

    /// With one iteration the quote is exactly that iteration
    #[test]
    fn single_iteration_identity(
        strike_id in 1u64..=3,
        is_call in any::<bool>(),
        is_buy in any::<bool>(),
        size in size_strategy(),
    ) {
        let snapshot = example::snapshot();
        let option = snapshot.option(strike_id, kind(is_call)).unwrap();
        let options = QuoteOptions { iterations: Some(1), ..Default::default() };
        let quote = Quote::get(&option, is_buy, size, options).unwrap();
        let state = IterationState::initial(&option);
        let it = quote_iteration(&option, is_buy, size, &state, false).unwrap();

        prop_assert!(!quote.is_disabled);
        prop_assert_eq!(quote.premium, it.premium);
        prop_assert_eq!(quote.fee, it.fee());
        prop_assert_eq!(quote.force_close_penalty, it.force_close_penalty);
    }

    /// fee == option price fee + spot price fee + vega util fee + variance fee
    #[test]
    fn fee_is_sum_of_components(
        strike_id in 1u64..=5,
        is_call in any::<bool>(),
        is_buy in any::<bool>(),
        is_force_close in any::<bool>(),
        size in size_strategy(),
        n in 1u32..8,
    ) {
        let snapshot = example::snapshot();
        let option = snapshot.option(strike_id, kind(is_call)).unwrap();
        let options = QuoteOptions { is_force_close, iterations: Some(n) };
        let quote = Quote::get(&option, is_buy, size, options).unwrap();
        let c = &quote.fee_components;
        let components = c.option_price_fee + c.spot_price_fee + c.vega_util_fee + c.variance_fee;
        prop_assert_eq!(quote.fee, components);
        let iteration_fees = quote.iterations.iter().fold(I256::ZERO, |acc, it| acc + it.fee());
        prop_assert_eq!(quote.fee, iteration_fees);
    }

    /// Buying more never costs less
    #[test]
    fn buy_premium_is_monotonic(
        strike_id in 1u64..=3,
        is_call in any::<bool>(),
        size in 1i64..100,
        extra in 1i64..100,
        n in 1u32..8,
    ) {
        let snapshot = example::snapshot();
        let option = snapshot.option(strike_id, kind(is_call)).unwrap();
        let options = QuoteOptions { iterations: Some(n), ..Default::default() };
        let small = Quote::get(&option, true, units(size), options).unwrap();
        let large = Quote::get(&option, true, units(size + extra), options).unwrap();
        prop_assert!(!small.is_disabled && !large.is_disabled);
        prop_assert!(large.premium >= small.premium);
    }

    /// Selling more never pays less
    #[test]
    fn sell_premium_is_monotonic(
        strike_id in 1u64..=3,
        is_call in any::<bool>(),
        hundredths in 10i64..1_000,
        extra in 1i64..1_000,
        n in 1u32..8,
    ) {
        let snapshot = example::snapshot();
        let option = snapshot.option(strike_id, kind(is_call)).unwrap();
        let options = QuoteOptions { iterations: Some(n), ..Default::default() };
        let small = Quote::get(&option, false, from_parts(hundredths, 2), options).unwrap();
        let large = Quote::get(&option, false, from_parts(hundredths + extra, 2), options).unwrap();
        prop_assert!(!small.is_disabled && !large.is_disabled);
        prop_assert!(large.premium >= small.premium);
    }

    /// Nothing is tradable on an expired board
    #[test]
    fn expired_board_is_always_disabled(
        strike_id in 1u64..=4,
        is_call in any::<bool>(),
        is_buy in any::<bool>(),
        is_force_close in any::<bool>(),
        raw_size in 1i64..i64::MAX,
        n in 1u32..8,
        seconds_past in 0u64..1_000_000,
    ) {
        let mut snapshot = example::snapshot();
        snapshot.timestamp = snapshot.boards[0].expiry + seconds_past;
        let option = snapshot.option(strike_id, kind(is_call)).unwrap();
        let options = QuoteOptions { is_force_close, iterations: Some(n) };
        let quote = Quote::get(&option, is_buy, from_int(raw_size), options).unwrap();
        prop_assert_eq!(quote.disabled_reason, Some(DisabledReason::Expired));
        prop_assert_eq!(quote.premium, I256::ZERO);
    }
}

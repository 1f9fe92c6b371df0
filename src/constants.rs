use alloy::primitives::{I256, U256};

/// Number of decimals carried by every scaled quantity.
pub const UNIT_DECIMALS: u32 = 18;

/// One whole unit (1e18) in fixed point.
pub const UNIT: I256 = I256::from_raw(U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]));

/// Sub-trades a quote is split into when the caller does not say otherwise.
pub const DEFAULT_ITERATIONS: u32 = 5;

/// Upper bound on caller-supplied sub-trade counts.
pub const MAX_ITERATIONS: u32 = 100;

pub const SECONDS_PER_DAY: u64 = 86_400;
pub const SECONDS_PER_YEAR: f64 = 31_536_000.0;

/// Standard vega is normalised to a 30 day expiry.
pub const STD_VEGA_NORMALISATION_DAYS: f64 = 30.0;

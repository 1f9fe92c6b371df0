//! Black-Scholes pricing and Greeks in decimal (`f64`) form.
//!
//! Inputs follow the option market's conventions: time in years, volatility
//! and rate as fractions. Vega and rho are reported per 1% move, theta per day.
//! Degenerate inputs (expired, zero vol, non-positive prices) return finite
//! limits instead of NaN so an expired board can still be quoted as disabled.

use std::f64::consts::PI;

use statrs::distribution::{ContinuousCDF, Normal};

use crate::constants::{SECONDS_PER_YEAR, STD_VEGA_NORMALISATION_DAYS};
use crate::model::OptionKind;

/// Greeks of a single option in decimal form.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub theta: f64,
    pub rho: f64,
}

pub fn norm_cdf(x: f64) -> f64 {
    Normal::standard().cdf(x)
}

pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Annualised time between `now` and `expiry`, floored at zero.
pub fn time_to_expiry_annualized(expiry: u64, now: u64) -> f64 {
    expiry.saturating_sub(now) as f64 / SECONDS_PER_YEAR
}

fn is_degenerate(t: f64, vol: f64, spot: f64, strike: f64) -> bool {
    t <= 0.0 || vol <= 0.0 || spot <= 0.0 || strike <= 0.0
}

fn discounted_strike(t: f64, strike: f64, rate: f64) -> f64 {
    strike * (-rate * t.max(0.0)).exp()
}

pub fn d1(t: f64, vol: f64, spot: f64, strike: f64, rate: f64) -> f64 {
    ((spot / strike).ln() + (rate + 0.5 * vol * vol) * t) / (vol * t.sqrt())
}

pub fn d2(t: f64, vol: f64, spot: f64, strike: f64, rate: f64) -> f64 {
    d1(t, vol, spot, strike, rate) - vol * t.sqrt()
}

pub fn price(t: f64, vol: f64, spot: f64, strike: f64, rate: f64, kind: OptionKind) -> f64 {
    let pv_strike = discounted_strike(t, strike, rate);
    if is_degenerate(t, vol, spot, strike) {
        return match kind {
            OptionKind::Call => (spot - pv_strike).max(0.0),
            OptionKind::Put => (pv_strike - spot).max(0.0),
        };
    }
    let d1 = d1(t, vol, spot, strike, rate);
    let d2 = d1 - vol * t.sqrt();
    let price = match kind {
        OptionKind::Call => spot * norm_cdf(d1) - pv_strike * norm_cdf(d2),
        OptionKind::Put => pv_strike * norm_cdf(-d2) - spot * norm_cdf(-d1),
    };
    price.max(0.0)
}

pub fn delta(t: f64, vol: f64, spot: f64, strike: f64, rate: f64, kind: OptionKind) -> f64 {
    if is_degenerate(t, vol, spot, strike) {
        let in_the_money = spot > discounted_strike(t, strike, rate);
        return match (kind, in_the_money) {
            (OptionKind::Call, true) => 1.0,
            (OptionKind::Call, false) => 0.0,
            (OptionKind::Put, true) => 0.0,
            (OptionKind::Put, false) => -1.0,
        };
    }
    let n = norm_cdf(d1(t, vol, spot, strike, rate));
    match kind {
        OptionKind::Call => n,
        OptionKind::Put => n - 1.0,
    }
}

pub fn gamma(t: f64, vol: f64, spot: f64, strike: f64, rate: f64) -> f64 {
    if is_degenerate(t, vol, spot, strike) {
        return 0.0;
    }
    norm_pdf(d1(t, vol, spot, strike, rate)) / (spot * vol * t.sqrt())
}

/// Vega per 1% vol move.
pub fn vega(t: f64, vol: f64, spot: f64, strike: f64, rate: f64) -> f64 {
    if is_degenerate(t, vol, spot, strike) {
        return 0.0;
    }
    spot * norm_pdf(d1(t, vol, spot, strike, rate)) * t.sqrt() / 100.0
}

/// Vega normalised to a 30 day expiry; this is what AMM exposure is measured in.
pub fn std_vega(t: f64, vol: f64, spot: f64, strike: f64, rate: f64) -> f64 {
    if is_degenerate(t, vol, spot, strike) {
        return 0.0;
    }
    let normalisation = (STD_VEGA_NORMALISATION_DAYS / 365.0 / t).sqrt();
    vega(t, vol, spot, strike, rate) * normalisation
}

/// Theta per calendar day.
pub fn theta(t: f64, vol: f64, spot: f64, strike: f64, rate: f64, kind: OptionKind) -> f64 {
    if is_degenerate(t, vol, spot, strike) {
        return 0.0;
    }
    let d1 = d1(t, vol, spot, strike, rate);
    let d2 = d1 - vol * t.sqrt();
    let decay = -spot * norm_pdf(d1) * vol / (2.0 * t.sqrt());
    let carry = rate * discounted_strike(t, strike, rate);
    let annual = match kind {
        OptionKind::Call => decay - carry * norm_cdf(d2),
        OptionKind::Put => decay + carry * norm_cdf(-d2),
    };
    annual / 365.0
}

/// Rho per 1% rate move.
pub fn rho(t: f64, vol: f64, spot: f64, strike: f64, rate: f64, kind: OptionKind) -> f64 {
    if is_degenerate(t, vol, spot, strike) {
        return 0.0;
    }
    let d2 = d2(t, vol, spot, strike, rate);
    let pv_strike = discounted_strike(t, strike, rate);
    let annual = match kind {
        OptionKind::Call => pv_strike * t * norm_cdf(d2),
        OptionKind::Put => -pv_strike * t * norm_cdf(-d2),
    };
    annual / 100.0
}

pub fn greeks(t: f64, vol: f64, spot: f64, strike: f64, rate: f64, kind: OptionKind) -> Greeks {
    Greeks {
        delta: delta(t, vol, spot, strike, rate, kind),
        gamma: gamma(t, vol, spot, strike, rate),
        vega: vega(t, vol, spot, strike, rate),
        theta: theta(t, vol, spot, strike, rate, kind),
        rho: rho(t, vol, spot, strike, rate, kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: f64 = 30.0 / 365.0;

    #[test]
    fn test_put_call_parity() {
        let (spot, strike, rate, vol) = (1500.0, 1600.0, 0.05, 0.8);
        let call = price(T, vol, spot, strike, rate, OptionKind::Call);
        let put = price(T, vol, spot, strike, rate, OptionKind::Put);
        let parity = spot - strike * (-rate * T).exp();
        assert!((call - put - parity).abs() < 1e-9, "parity off: {}", call - put - parity);
    }

    #[test]
    fn test_delta_ranges() {
        let call = delta(T, 0.8, 1500.0, 1500.0, 0.0, OptionKind::Call);
        let put = delta(T, 0.8, 1500.0, 1500.0, 0.0, OptionKind::Put);
        assert!(call > 0.5 && call < 0.6, "ATM call delta {call}");
        assert!((call - put - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_expired_is_finite() {
        let g = greeks(0.0, 0.8, 1500.0, 1400.0, 0.05, OptionKind::Call);
        assert_eq!(g.delta, 1.0);
        assert_eq!(g.gamma, 0.0);
        assert_eq!(g.vega, 0.0);
        assert_eq!(price(0.0, 0.8, 1500.0, 1400.0, 0.05, OptionKind::Call), 100.0);
        assert_eq!(price(0.0, 0.8, 1500.0, 1400.0, 0.05, OptionKind::Put), 0.0);
        assert_eq!(std_vega(0.0, 0.8, 1500.0, 1400.0, 0.05), 0.0);
    }

    #[test]
    fn test_std_vega_normalised_at_30_days() {
        let v = vega(T, 0.8, 1500.0, 1500.0, 0.0);
        let sv = std_vega(T, 0.8, 1500.0, 1500.0, 0.0);
        assert!((v - sv).abs() < 1e-9);
        assert!(v > 0.0);
    }

    #[test]
    fn test_time_to_expiry() {
        assert_eq!(time_to_expiry_annualized(100, 200), 0.0);
        assert_eq!(time_to_expiry_annualized(31_536_000, 0), 1.0);
    }
}

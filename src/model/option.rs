use alloy::primitives::I256;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::market::Market;
use super::snapshot::MarketSnapshot;
use super::strike::{CachedGreeks, Strike};
use crate::math::black_scholes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    Call,
    Put,
}

impl OptionKind {
    pub fn from_is_call(is_call: bool) -> Self {
        if is_call { OptionKind::Call } else { OptionKind::Put }
    }

    pub fn is_call(self) -> bool {
        matches!(self, OptionKind::Call)
    }
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionKind::Call => write!(f, "call"),
            OptionKind::Put => write!(f, "put"),
        }
    }
}

/// One option (strike + kind) viewed through a market snapshot.
///
/// The view owns nothing: market, board and strike are borrowed from the
/// snapshot, so every lookup during a quote sees the same state.
#[derive(Debug, Clone, Copy)]
pub struct OptionView<'a> {
    snapshot: &'a MarketSnapshot,
    board: &'a Board,
    strike: &'a Strike,
    kind: OptionKind,
}

impl<'a> OptionView<'a> {
    pub(crate) fn new(
        snapshot: &'a MarketSnapshot,
        board: &'a Board,
        strike: &'a Strike,
        kind: OptionKind,
    ) -> Self {
        Self {
            snapshot,
            board,
            strike,
            kind,
        }
    }

    pub fn market(&self) -> &'a Market {
        &self.snapshot.market
    }

    pub fn board(&self) -> &'a Board {
        self.board
    }

    pub fn strike(&self) -> &'a Strike {
        self.strike
    }

    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    pub fn is_call(&self) -> bool {
        self.kind.is_call()
    }

    /// Seconds until the board expires; negative once expired.
    pub fn time_to_expiry(&self) -> i64 {
        self.board.expiry as i64 - self.snapshot.timestamp as i64
    }

    pub fn time_to_expiry_annualized(&self) -> f64 {
        black_scholes::time_to_expiry_annualized(self.board.expiry, self.snapshot.timestamp)
    }

    pub fn cached(&self) -> &'a CachedGreeks {
        self.strike.cached(self.kind)
    }

    pub fn delta(&self) -> I256 {
        self.cached().delta
    }

    pub fn theta(&self) -> I256 {
        self.cached().theta
    }

    pub fn rho(&self) -> I256 {
        self.cached().rho
    }
}

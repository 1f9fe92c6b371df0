use alloy::primitives::I256;
use serde::{Deserialize, Serialize};

use super::option::OptionKind;

/// Greeks the market caches per option, refreshed on-chain after each trade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedGreeks {
    pub delta: I256,
    pub theta: I256,
    pub rho: I256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strike {
    pub id: u64,
    pub board_id: u64,
    pub strike_price: I256,
    /// Multiplier on the board's base IV.
    pub skew: I256,
    #[serde(default)]
    pub vega: I256,
    #[serde(default)]
    pub gamma: I256,
    #[serde(default)]
    pub call: CachedGreeks,
    #[serde(default)]
    pub put: CachedGreeks,
}

impl Strike {
    pub fn cached(&self, kind: OptionKind) -> &CachedGreeks {
        match kind {
            OptionKind::Call => &self.call,
            OptionKind::Put => &self.put,
        }
    }
}

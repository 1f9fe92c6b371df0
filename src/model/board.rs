use alloy::primitives::I256;
use serde::{Deserialize, Serialize};

/// All strikes sharing one expiry. Trades on any strike move `base_iv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: u64,
    /// Expiry, unix seconds.
    pub expiry: u64,
    pub base_iv: I256,
    #[serde(default)]
    pub iv_variance: I256,
}

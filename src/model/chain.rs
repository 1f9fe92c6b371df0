use serde::{Deserialize, Serialize};

/// The chain an option market is deployed on.
///
/// In JSON: `{"name": "optimism", "chain_id": 10, "rpc_url": "https://mainnet.optimism.io"}`.
/// `chain_id` / `rpc_url` may be omitted for known chains and are filled from
/// the registry by [`Chain::resolved`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chain {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
}

// ── Methods ──────────────────────────────────────────────────────────

impl Chain {
    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    pub fn rpc_url(&self) -> Option<&str> {
        self.rpc_url.as_deref()
    }

    /// Fill missing chain id / RPC URL from the known-chain registry.
    pub fn resolved(&self) -> Self {
        let known = Self::from_name(&self.name);
        Chain {
            name: self.name.clone(),
            chain_id: self.chain_id.or(known.chain_id),
            rpc_url: self.rpc_url.clone().or(known.rpc_url),
        }
    }
}

// ── Convenience constructors ─────────────────────────────────────────

impl Chain {
    pub fn optimism() -> Self {
        Chain {
            name: "optimism".into(),
            chain_id: Some(10),
            rpc_url: Some("https://mainnet.optimism.io".into()),
        }
    }

    pub fn arbitrum() -> Self {
        Chain {
            name: "arbitrum".into(),
            chain_id: Some(42161),
            rpc_url: Some("https://arb1.arbitrum.io/rpc".into()),
        }
    }

    /// Construct a chain from its name, matching known chains.
    /// Unknown names get neither chain id nor RPC URL.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "optimism" => Self::optimism(),
            "arbitrum" => Self::arbitrum(),
            _ => Chain {
                name: name.into(),
                chain_id: None,
                rpc_url: None,
            },
        }
    }

    pub fn custom(name: impl Into<String>, chain_id: u64, rpc_url: impl Into<String>) -> Self {
        Chain {
            name: name.into(),
            chain_id: Some(chain_id),
            rpc_url: Some(rpc_url.into()),
        }
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::optimism()
    }
}

// ── Display ──────────────────────────────────────────────────────────

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

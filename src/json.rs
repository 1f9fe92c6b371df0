//! JSON-in, JSON-out quoting for callers outside Rust.

use alloy::primitives::I256;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{MarketSnapshot, OptionKind};
use crate::quote::{Quote, QuoteOptions};

/// One quote request against a snapshot.
///
/// ```json
/// {"strike_id": 2, "kind": "call", "is_buy": true, "size": "1000000000000000000"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub strike_id: u64,
    pub kind: OptionKind,
    pub is_buy: bool,
    pub size: I256,
    #[serde(default)]
    pub options: QuoteOptions,
}

pub fn quote(snapshot: &MarketSnapshot, request: &QuoteRequest) -> Result<Quote> {
    let option = snapshot.option(request.strike_id, request.kind)?;
    Quote::get(&option, request.is_buy, request.size, request.options)
}

pub fn quote_from_json(snapshot_json: &str, request: &QuoteRequest) -> Result<String> {
    let snapshot = MarketSnapshot::from_json(snapshot_json)?;
    let quote = quote(&snapshot, request)?;
    Ok(serde_json::to_string_pretty(&quote)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example;
    use crate::math::units;

    #[test]
    fn test_quote_from_json() {
        let snapshot = serde_json::to_string(&example::snapshot()).unwrap();
        let request = QuoteRequest {
            strike_id: 2,
            kind: OptionKind::Call,
            is_buy: true,
            size: units(1),
            options: QuoteOptions::default(),
        };
        let json = quote_from_json(&snapshot, &request).unwrap();
        let quote: Quote = serde_json::from_str(&json).unwrap();
        assert_eq!(quote.strike_id, 2);
        assert!(!quote.is_disabled);
        assert!(quote.premium > I256::ZERO);
    }

    #[test]
    fn test_request_defaults() {
        let request: QuoteRequest = serde_json::from_str(
            r#"{"strike_id": 3, "kind": "put", "is_buy": false, "size": "5000000000000000000"}"#,
        )
        .unwrap();
        assert_eq!(request.options, QuoteOptions::default());
        assert_eq!(request.size, units(5));
    }

    #[test]
    fn test_unknown_strike() {
        let snapshot = serde_json::to_string(&example::snapshot()).unwrap();
        let request = QuoteRequest {
            strike_id: 42,
            kind: OptionKind::Put,
            is_buy: true,
            size: units(1),
            options: QuoteOptions::default(),
        };
        assert!(quote_from_json(&snapshot, &request).is_err());
    }
}

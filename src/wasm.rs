use wasm_bindgen::prelude::*;

use crate::json::{QuoteRequest, quote_from_json};
use crate::model::MarketSnapshot;

#[wasm_bindgen]
pub fn get_quote(snapshot_json: &str, request_json: &str) -> String {
    let request: QuoteRequest = match serde_json::from_str(request_json) {
        Ok(r) => r,
        Err(e) => {
            return serde_json::json!({
                "error": format!("JSON parse error: {}", e)
            })
            .to_string();
        }
    };
    quote_from_json(snapshot_json, &request).unwrap_or_else(|e| {
        serde_json::json!({
            "error": e.to_string()
        })
        .to_string()
    })
}

#[wasm_bindgen]
pub fn parse_snapshot_json(json: &str) -> String {
    let snapshot = match MarketSnapshot::from_json(json) {
        Ok(s) => s,
        Err(e) => {
            return serde_json::json!({
                "error": e.to_string()
            })
            .to_string();
        }
    };
    serde_json::to_string_pretty(&snapshot).unwrap_or_else(|e| {
        serde_json::json!({
            "error": format!("Serialization error: {}", e)
        })
        .to_string()
    })
}

#[wasm_bindgen]
pub fn example_snapshot() -> String {
    serde_json::to_string_pretty(&crate::example::snapshot()).unwrap_or_default()
}

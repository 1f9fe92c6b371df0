//! Trade history: decoding option market logs and rebuilding trades from them.

pub mod abi;
pub mod parse;
pub mod sort;
pub mod trade;
pub mod types;

pub use parse::{
    parse_trade_events, parse_transfer_events, trade_event_from_log, transfer_event_from_log,
};
pub use sort::{Chronological, sort_events};
pub use trade::{
    CollateralUpdate, EventBatch, TradeEventData, resolve_trader, trade_data_from_event,
};
pub use types::{
    LiquidationData, OptionType, TradeDirection, TradeEvent, TradeParams, TradeResult,
    TransferEvent,
};

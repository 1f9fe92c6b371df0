pub mod constants;
pub mod error;
pub mod events;
pub mod example;
#[cfg(feature = "full")]
pub mod fetch;
pub mod json;
pub mod math;
pub mod model;
pub mod quote;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Error, Result};
pub use model::{MarketSnapshot, OptionKind, OptionView};
pub use quote::{DisabledReason, Quote, QuoteOptions};

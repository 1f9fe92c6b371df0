pub mod board;
pub mod chain;
pub mod market;
pub mod option;
pub mod snapshot;
pub mod strike;

pub use board::Board;
pub use chain::Chain;
pub use market::{
    ForceCloseParams, Market, MarketInfo, MarketLiquidity, MarketParams, PricingParams,
    TradeLimitParams, VarianceFeeParams,
};
pub use option::{OptionKind, OptionView};
pub use snapshot::MarketSnapshot;
pub use strike::{CachedGreeks, Strike};

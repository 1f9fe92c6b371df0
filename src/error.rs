use alloy::primitives::TxHash;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Fixed-point division by zero")]
    DivideByZero,

    #[error("Fixed-point overflow")]
    Overflow,

    #[error("Value {value} cannot be represented in fixed point")]
    NonFinite { value: f64 },

    #[error("Unknown strike `{strike_id}`")]
    UnknownStrike { strike_id: u64 },

    #[error("Unknown board `{board_id}`")]
    UnknownBoard { board_id: u64 },

    #[error("Unknown option type code {0}")]
    InvalidOptionType(u8),

    #[error("Unknown trade direction code {0}")]
    InvalidTradeDirection(u8),

    #[error("Trade in tx {tx} carries no trade results")]
    EmptyTradeResults { tx: TxHash },

    #[error("No timestamp for block {block_number}")]
    MissingTimestamp { block_number: u64 },

    #[error("Log decode error: {0}")]
    Decode(#[from] alloy::sol_types::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

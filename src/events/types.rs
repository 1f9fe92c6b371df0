use alloy::primitives::{Address, I256, TxHash};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::quote::{VarianceFeeComponents, VegaUtilFeeComponents};

/// Position type as encoded by the option market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    LongCall,
    LongPut,
    ShortCallBase,
    ShortCallQuote,
    ShortPutQuote,
}

impl OptionType {
    pub fn is_call(self) -> bool {
        matches!(
            self,
            OptionType::LongCall | OptionType::ShortCallBase | OptionType::ShortCallQuote
        )
    }

    pub fn is_long(self) -> bool {
        matches!(self, OptionType::LongCall | OptionType::LongPut)
    }

    /// Longs buy to open; shorts sell to open.
    pub fn is_buy(self, is_open: bool) -> bool {
        if self.is_long() { is_open } else { !is_open }
    }

    pub fn is_base_collateral(self) -> bool {
        matches!(self, OptionType::ShortCallBase)
    }
}

impl TryFrom<u8> for OptionType {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(OptionType::LongCall),
            1 => Ok(OptionType::LongPut),
            2 => Ok(OptionType::ShortCallBase),
            3 => Ok(OptionType::ShortCallQuote),
            4 => Ok(OptionType::ShortPutQuote),
            other => Err(Error::InvalidOptionType(other)),
        }
    }
}

impl From<OptionType> for u8 {
    fn from(value: OptionType) -> Self {
        value as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeDirection {
    Open,
    Close,
    Liquidate,
}

impl TryFrom<u8> for TradeDirection {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TradeDirection::Open),
            1 => Ok(TradeDirection::Close),
            2 => Ok(TradeDirection::Liquidate),
            other => Err(Error::InvalidTradeDirection(other)),
        }
    }
}

impl From<TradeDirection> for u8 {
    fn from(value: TradeDirection) -> Self {
        value as u8
    }
}

/// Trade-level fields of a `Trade` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeParams {
    pub strike_id: u64,
    pub expiry: u64,
    pub strike_price: I256,
    pub option_type: OptionType,
    pub direction: TradeDirection,
    pub amount: I256,
    pub set_collateral_to: I256,
    pub is_force_close: bool,
    pub spot_price: I256,
    pub reserved_fee: I256,
    pub total_cost: I256,
}

/// One fill of a trade, as reported by the pricer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeResult {
    pub amount: I256,
    pub premium: I256,
    pub option_price_fee: I256,
    pub spot_price_fee: I256,
    pub vega_util_fee: VegaUtilFeeComponents,
    pub variance_fee: VarianceFeeComponents,
    pub total_fee: I256,
    pub total_cost: I256,
    pub vol_traded: I256,
    pub new_base_iv: I256,
    pub new_skew: I256,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidationData {
    pub reward_beneficiary: Address,
    pub caller: Address,
    pub return_collateral: I256,
    pub lp_premiums: I256,
    pub lp_fee: I256,
    pub liquidator_fee: I256,
    pub sm_fee: I256,
    pub insolvent_amount: I256,
}

/// A decoded `Trade` log together with its position in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeEvent {
    pub transaction_hash: TxHash,
    pub block_number: u64,
    pub log_index: u64,
    pub trader: Address,
    pub position_id: u64,
    pub trade: TradeParams,
    pub results: Vec<TradeResult>,
    pub liquidation: LiquidationData,
}

/// A decoded option token `Transfer` log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEvent {
    pub transaction_hash: TxHash,
    pub block_number: u64,
    pub log_index: u64,
    pub from: Address,
    pub to: Address,
    pub token_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_type_flags() {
        assert!(OptionType::LongCall.is_call() && OptionType::LongCall.is_long());
        assert!(!OptionType::LongPut.is_call() && OptionType::LongPut.is_long());
        assert!(OptionType::ShortCallBase.is_call());
        assert!(OptionType::ShortCallBase.is_base_collateral());
        assert!(OptionType::ShortCallQuote.is_call());
        assert!(!OptionType::ShortCallQuote.is_base_collateral());
        assert!(!OptionType::ShortPutQuote.is_call() && !OptionType::ShortPutQuote.is_long());

        assert!(OptionType::LongCall.is_buy(true));
        assert!(!OptionType::LongCall.is_buy(false));
        assert!(!OptionType::ShortPutQuote.is_buy(true));
        assert!(OptionType::ShortPutQuote.is_buy(false));
    }

    #[test]
    fn test_codes() {
        for code in 0u8..5 {
            assert_eq!(u8::from(OptionType::try_from(code).unwrap()), code);
        }
        assert!(matches!(OptionType::try_from(5), Err(Error::InvalidOptionType(5))));
        assert_eq!(TradeDirection::try_from(2).unwrap(), TradeDirection::Liquidate);
        assert!(matches!(TradeDirection::try_from(3), Err(Error::InvalidTradeDirection(3))));
    }
}

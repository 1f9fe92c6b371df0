use alloy::sol;

// ── Option market ─────────────────────────────────────────────────

// Option type and trade direction are Solidity enums, which encode as uint8.
sol! {
    #[allow(missing_docs)]
    #[sol(all_derives)]
    interface IOptionMarket {
        struct TradeEventData {
            uint256 expiry;
            uint256 strikePrice;
            uint8 optionType;
            uint8 tradeDirection;
            uint256 amount;
            uint256 setCollateralTo;
            bool isForceClose;
            uint256 spotPrice;
            uint256 reservedFee;
            uint256 totalCost;
        }

        struct VegaUtilFeeComponents {
            int256 preTradeAmmNetStdVega;
            int256 postTradeAmmNetStdVega;
            uint256 vegaUtil;
            uint256 volTraded;
            uint256 NAV;
            uint256 vegaUtilFee;
        }

        struct VarianceFeeComponents {
            uint256 varianceFeeCoefficient;
            uint256 vega;
            uint256 vegaCoefficient;
            uint256 skew;
            uint256 skewCoefficient;
            uint256 ivVariance;
            uint256 ivVarianceCoefficient;
            uint256 varianceFee;
        }

        struct TradeResult {
            uint256 amount;
            uint256 premium;
            uint256 optionPriceFee;
            uint256 spotPriceFee;
            VegaUtilFeeComponents vegaUtilFee;
            VarianceFeeComponents varianceFee;
            uint256 totalFee;
            uint256 totalCost;
            uint256 volTraded;
            uint256 newBaseIv;
            uint256 newSkew;
        }

        struct LiquidationEventData {
            address rewardBeneficiary;
            address caller;
            uint256 returnCollateral;
            uint256 lpPremiums;
            uint256 lpFee;
            uint256 liquidatorFee;
            uint256 smFee;
            uint256 insolventAmount;
        }

        event Trade(
            address indexed trader,
            uint256 indexed strikeId,
            uint256 indexed positionId,
            TradeEventData trade,
            TradeResult[] tradeResults,
            LiquidationEventData liquidation,
            uint256 timestamp
        );
    }
}

// ── Option token ──────────────────────────────────────────────────

sol! {
    #[allow(missing_docs)]
    #[sol(all_derives)]
    interface IOptionToken {
        event Transfer(address indexed from, address indexed to, uint256 indexed tokenId);
    }
}

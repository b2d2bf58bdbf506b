//! Liquidation quote math.
//!
//! A liquidator repays `debt_to_cover` DSC on behalf of an unhealthy account
//! and receives the equivalent collateral plus a bonus:
//! `collateral = token_amount * (LIQUIDATION_PRECISION + LIQUIDATION_BONUS) / LIQUIDATION_PRECISION`

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::DscError;
use crate::health::{token_amount_from_usd, LIQUIDATION_PRECISION};

/// Liquidation bonus in percent (10%)
pub const LIQUIDATION_BONUS: u64 = 10;

/// Collateral owed to a liquidator for covering some debt
#[odra::odra_type]
#[derive(Copy)]
pub struct LiquidationQuote {
    /// Collateral equivalent of the debt at current price
    pub token_amount: U256,
    /// Bonus collateral on top of `token_amount`
    pub bonus: U256,
    /// Total collateral redeemed to the liquidator
    pub total_collateral: U256,
}

/// Quote a liquidation of `debt_to_cover` against a collateral at `price` (18 decimals)
pub fn quote_liquidation(
    price: U256,
    debt_to_cover: U256,
    token_decimals: u8,
) -> Result<LiquidationQuote, DscError> {
    let token_amount = token_amount_from_usd(price, debt_to_cover, token_decimals)?;
    let bonus = token_amount
        .checked_mul(U256::from(LIQUIDATION_BONUS))
        .ok_or(DscError::ArithmeticOverflow)?
        / U256::from(LIQUIDATION_PRECISION);

    let total_collateral = token_amount
        .checked_add(bonus)
        .ok_or(DscError::ArithmeticOverflow)?;

    Ok(LiquidationQuote {
        token_amount,
        bonus,
        total_collateral,
    })
}

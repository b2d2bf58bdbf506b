//! Valuation and health factor math.
//!
//! All monetary values are 18-decimal fixed point `U256`. Prices handed to
//! these functions are already normalized to 18 decimals by the oracle adapter.
//!
//! Health factor:
//! - adjusted = collateral_value * LIQUIDATION_THRESHOLD / LIQUIDATION_PRECISION
//! - health_factor = adjusted * PRECISION / total_dsc_minted
//! - zero debt yields `U256::MAX`

use odra::casper_types::U256;
use crate::errors::DscError;

/// Internal precision scale (1e18)
pub const PRECISION: u64 = 1_000_000_000_000_000_000;

/// Share of collateral value counted toward solvency (50%, i.e. 200% overcollateralized)
pub const LIQUIDATION_THRESHOLD: u64 = 50;

/// Denominator for threshold and bonus percentages
pub const LIQUIDATION_PRECISION: u64 = 100;

/// Minimum health factor (1.0)
pub const MIN_HEALTH_FACTOR: u64 = PRECISION;

/// A health factor below `MIN_HEALTH_FACTOR`, carrying the computed value.
///
/// Odra user errors are a bare `u16` code, so a contract revert reports only
/// `DscError::HealthFactorBroken`. The value is available to off-chain callers
/// through `calculate_health_factor` and to pure-math callers through this type.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct HealthFactorBroken(pub U256);

impl From<HealthFactorBroken> for DscError {
    fn from(_: HealthFactorBroken) -> Self {
        DscError::HealthFactorBroken
    }
}

/// 10^exp as `U256`
pub fn pow10(exp: u8) -> Result<U256, DscError> {
    let mut value = U256::one();
    for _ in 0..exp {
        value = value
            .checked_mul(U256::from(10u64))
            .ok_or(DscError::ArithmeticOverflow)?;
    }
    Ok(value)
}

/// USD value (18 decimals) of `amount` smallest units of a token with `token_decimals`
pub fn usd_value(price: U256, amount: U256, token_decimals: u8) -> Result<U256, DscError> {
    let unit = pow10(token_decimals)?;
    price
        .checked_mul(amount)
        .ok_or(DscError::ArithmeticOverflow)
        .map(|scaled| scaled / unit)
}

/// Token amount (smallest units) worth `usd_amount` at `price`
pub fn token_amount_from_usd(
    price: U256,
    usd_amount: U256,
    token_decimals: u8,
) -> Result<U256, DscError> {
    if price.is_zero() {
        return Err(DscError::InvalidPrice);
    }
    let unit = pow10(token_decimals)?;
    usd_amount
        .checked_mul(unit)
        .ok_or(DscError::ArithmeticOverflow)
        .map(|scaled| scaled / price)
}

/// Health factor for a debt and collateral value, `U256::MAX` when there is no debt
pub fn calculate_health_factor(
    total_dsc_minted: U256,
    collateral_value_in_usd: U256,
) -> Result<U256, DscError> {
    if total_dsc_minted.is_zero() {
        return Ok(U256::MAX);
    }

    collateral_value_in_usd
        .checked_mul(U256::from(LIQUIDATION_THRESHOLD))
        .map(|v| v / U256::from(LIQUIDATION_PRECISION))
        .and_then(|adjusted| adjusted.checked_mul(U256::from(PRECISION)))
        .map(|v| v / total_dsc_minted)
        .ok_or(DscError::ArithmeticOverflow)
}

/// Check a health factor against `MIN_HEALTH_FACTOR`
pub fn ensure_healthy(health_factor: U256) -> Result<(), HealthFactorBroken> {
    if health_factor < U256::from(MIN_HEALTH_FACTOR) {
        return Err(HealthFactorBroken(health_factor));
    }
    Ok(())
}

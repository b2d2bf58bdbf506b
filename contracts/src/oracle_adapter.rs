//! Price Oracle Adapter
//!
//! Reads the latest round from a collateral's price feed and turns it into an
//! 18-decimal USD price. Implements:
//! - Zero price rejection
//! - Freshness check against block time (PRICE_TIMEOUT_MS)
//! - Rescaling from feed-native decimals to 18 decimals

use odra::prelude::*;
use odra::casper_types::{U256, RuntimeArgs};
use odra::{CallDef, ContractEnv};
use crate::errors::DscError;
use crate::health::pow10;
use crate::types::{CollateralType, PriceRound};

/// Maximum accepted feed age (3 hours). Block time is reported in milliseconds.
pub const PRICE_TIMEOUT_MS: u64 = 3 * 60 * 60 * 1000;

/// Decimals of every price handed to the valuation math
pub const PRICE_DECIMALS: u8 = 18;

/// Rescale a feed answer with `feed_decimals` to `PRICE_DECIMALS`
pub fn normalize_price(answer: U256, feed_decimals: u8) -> Result<U256, DscError> {
    if feed_decimals <= PRICE_DECIMALS {
        let factor = pow10(PRICE_DECIMALS - feed_decimals)?;
        answer.checked_mul(factor).ok_or(DscError::ArithmeticOverflow)
    } else {
        let divisor = pow10(feed_decimals - PRICE_DECIMALS)?;
        Ok(answer / divisor)
    }
}

/// Validate a round and return its normalized price
pub fn validate_round(round: &PriceRound, feed_decimals: u8, now: u64) -> Result<U256, DscError> {
    if round.answer.is_zero() {
        return Err(DscError::InvalidPrice);
    }

    let age = now.saturating_sub(round.updated_at);
    if age > PRICE_TIMEOUT_MS {
        return Err(DscError::StalePrice);
    }

    let price = normalize_price(round.answer, feed_decimals)?;
    if price.is_zero() {
        return Err(DscError::InvalidPrice);
    }
    Ok(price)
}

/// Helper for price feed queries
pub struct PriceOracle;

impl PriceOracle {
    /// Latest round reported by a feed
    pub fn latest_round(env: &ContractEnv, price_feed: Address) -> PriceRound {
        let call_def = CallDef::new("latest_round_data", false, RuntimeArgs::new());
        env.call_contract::<PriceRound>(price_feed, call_def)
    }

    /// Decimals of a feed answer
    pub fn feed_decimals(env: &ContractEnv, price_feed: Address) -> u8 {
        let call_def = CallDef::new("decimals", false, RuntimeArgs::new());
        env.call_contract::<u8>(price_feed, call_def)
    }

    /// Current 18-decimal USD price of one whole collateral token.
    ///
    /// Reverts with `InvalidPrice` or `StalePrice`.
    pub fn price(env: &ContractEnv, collateral: &CollateralType) -> U256 {
        let round = Self::latest_round(env, collateral.price_feed);
        match validate_round(&round, collateral.feed_decimals, env.get_block_time()) {
            Ok(price) => price,
            Err(error) => env.revert(error),
        }
    }
}

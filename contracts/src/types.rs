//! Common types used across the DSC protocol.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::DscError;

/// An approved collateral asset and the feed that prices it
#[odra::odra_type]
#[derive(Copy)]
pub struct CollateralType {
    /// Collateral token contract address
    pub token: Address,
    /// Price feed contract address (USD per whole token)
    pub price_feed: Address,
    /// Decimals of the collateral token (deposit precision)
    pub token_decimals: u8,
    /// Decimals of the price feed answer
    pub feed_decimals: u8,
}

/// Immutable set of approved collateral types, fixed at construction.
///
/// Keeps construction order so enumeration is stable.
#[odra::odra_type]
#[derive(Default)]
pub struct CollateralConfig {
    pub types: Vec<CollateralType>,
}

impl CollateralConfig {
    /// Find the collateral type for a token
    pub fn find(&self, token: &Address) -> Option<&CollateralType> {
        self.types.iter().find(|ct| ct.token == *token)
    }

    /// Approved token addresses in construction order
    pub fn tokens(&self) -> Vec<Address> {
        self.types.iter().map(|ct| ct.token).collect()
    }
}

/// Latest round reported by a price feed
#[odra::odra_type]
pub struct PriceRound {
    /// Price at feed-native precision
    pub answer: U256,
    /// Block time of the last update
    pub updated_at: u64,
}

/// Pair token addresses with their price feeds by position.
///
/// Fails on unequal list lengths or a repeated token.
pub fn pair_collateral(
    tokens: &[Address],
    price_feeds: &[Address],
) -> Result<Vec<(Address, Address)>, DscError> {
    if tokens.len() != price_feeds.len() {
        return Err(DscError::LengthMismatch);
    }

    let mut pairs: Vec<(Address, Address)> = Vec::with_capacity(tokens.len());
    for (token, feed) in tokens.iter().zip(price_feeds.iter()) {
        if pairs.iter().any(|(seen, _)| seen == token) {
            return Err(DscError::DuplicateCollateral);
        }
        pairs.push((*token, *feed));
    }
    Ok(pairs)
}

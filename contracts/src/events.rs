//! Events emitted by the engine and tokens.

use odra::prelude::*;
use odra::casper_types::U256;

/// Collateral deposited into the engine
#[odra::event]
pub struct CollateralDeposited {
    pub user: Address,
    pub token: Address,
    pub amount: U256,
}

/// Collateral released from a position, by its owner or through liquidation
#[odra::event]
pub struct CollateralRedeemed {
    pub from: Address,
    pub to: Address,
    pub token: Address,
    pub amount: U256,
}

/// DSC minted against a position
#[odra::event]
pub struct DscMinted {
    pub user: Address,
    pub amount: U256,
}

/// DSC repaid and burned
#[odra::event]
pub struct DscBurned {
    /// Account whose debt was reduced
    pub on_behalf_of: Address,
    /// Account the DSC was pulled from
    pub dsc_from: Address,
    pub amount: U256,
}

/// Unhealthy position partially or fully liquidated
#[odra::event]
pub struct Liquidated {
    pub liquidator: Address,
    pub user: Address,
    pub token: Address,
    pub debt_covered: U256,
    /// Total collateral paid out, bonus included
    pub collateral_seized: U256,
    /// Bonus part of `collateral_seized`
    pub bonus: U256,
}

/// Token transfer (mint has no `from`, burn has no `to`)
#[odra::event]
pub struct Transfer {
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub amount: U256,
}

/// Token allowance set
#[odra::event]
pub struct Approval {
    pub owner: Address,
    pub spender: Address,
    pub amount: U256,
}

/// Stablecoin ownership handed over
#[odra::event]
pub struct OwnershipTransferred {
    pub previous_owner: Address,
    pub new_owner: Address,
}

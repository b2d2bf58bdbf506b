//! DSC Protocol Contracts
//!
//! Overcollateralized, USD-pegged stablecoin engine on Casper.
//!
//! ## Architecture
//!
//! - **DscEngine**: Collateral ledger, debt ledger, health factor and liquidation
//! - **DecentralizedStableCoin (DSC)**: CEP-18 stablecoin, mintable and burnable only by its owner (the engine)
//! - **PriceOracle**: Price feed reads with staleness and zero-price checks
//! - **TokenAdapter**: Cross-contract calls into collateral tokens and DSC
//!
//! ## Solvency Rule
//!
//! Every account must keep collateral worth at least twice its debt
//! (health factor >= 1.0). Accounts below the line can be liquidated by anyone
//! repaying their debt for collateral plus a 10% bonus.

#![cfg_attr(target_arch = "wasm32", no_std)]

#[cfg(target_arch = "wasm32")]
extern crate alloc;

// Re-export odra for downstream usage
pub use odra;

// Core module declarations
pub mod types;
pub mod errors;
pub mod events;
pub mod health;
pub mod liquidation;

// Collaborator adapters
pub mod oracle_adapter;
pub mod token_adapter;

// Contract modules
pub mod dsc_engine;
pub mod stablecoin;
pub mod mocks;

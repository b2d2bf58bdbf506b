//! Token Adapter
//!
//! Cross-contract calls into CEP-18 style tokens:
//! - Pull collateral or DSC into engine custody (`transfer_from`, engine as spender)
//! - Push collateral out of engine custody (`transfer`)
//! - Mint and burn DSC through the owner-gated stablecoin entry points
//!
//! A token answering `false` aborts the whole call.

use odra::prelude::*;
use odra::casper_types::{U256, RuntimeArgs, runtime_args};
use odra::{CallDef, ContractEnv};
use crate::errors::DscError;

/// Helper for token calls made by the engine
pub struct TokenAdapter;

impl TokenAdapter {
    /// Pull `amount` of `token` from `from` into the calling contract
    pub fn pull(env: &ContractEnv, token: Address, from: Address, amount: U256) {
        let args = runtime_args! {
            "owner" => from,
            "recipient" => env.self_address(),
            "amount" => amount
        };
        let call_def = CallDef::new("transfer_from", true, args);
        let success: bool = env.call_contract(token, call_def);
        if !success {
            env.revert(DscError::TransferFailed);
        }
    }

    /// Push `amount` of `token` from the calling contract to `to`
    pub fn push(env: &ContractEnv, token: Address, to: Address, amount: U256) {
        let args = runtime_args! {
            "recipient" => to,
            "amount" => amount
        };
        let call_def = CallDef::new("transfer", true, args);
        let success: bool = env.call_contract(token, call_def);
        if !success {
            env.revert(DscError::TransferFailed);
        }
    }

    /// Decimals of a token
    pub fn decimals(env: &ContractEnv, token: Address) -> u8 {
        let call_def = CallDef::new("decimals", false, RuntimeArgs::new());
        env.call_contract::<u8>(token, call_def)
    }

    /// Mint DSC to `to`; the calling contract must own the stablecoin
    pub fn mint(env: &ContractEnv, dsc: Address, to: Address, amount: U256) {
        let args = runtime_args! {
            "to" => to,
            "amount" => amount
        };
        let call_def = CallDef::new("mint", true, args);
        let minted: bool = env.call_contract(dsc, call_def);
        if !minted {
            env.revert(DscError::MintFailed);
        }
    }

    /// Burn DSC held by the calling contract
    pub fn burn(env: &ContractEnv, dsc: Address, amount: U256) {
        let args = runtime_args! {
            "amount" => amount
        };
        let call_def = CallDef::new("burn", true, args);
        env.call_contract::<()>(dsc, call_def);
    }
}

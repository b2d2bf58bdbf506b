//! Test-net and test-suite collaborators.
//!
//! - `MockToken`: CEP-18 style collateral token with an open faucet `mint`
//!   and switches that make `transfer`/`transfer_from`/`mint` answer `false`
//! - `MockPriceFeed`: price feed whose answer is set by hand

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::DscError;
use crate::events::{Approval, Transfer};
use crate::types::PriceRound;

/// Mintable collateral token
#[odra::module(events = [Transfer, Approval])]
pub struct MockToken {
    symbol: Var<String>,
    decimals: Var<u8>,
    total_supply: Var<U256>,
    balances: Mapping<Address, U256>,
    allowances: Mapping<(Address, Address), U256>,
    /// `transfer` and `transfer_from` answer `false` without moving funds
    fail_transfers: Var<bool>,
    /// `mint` answers `false` without minting
    fail_mints: Var<bool>,
}

#[odra::module]
impl MockToken {
    pub fn init(&mut self, symbol: String, decimals: u8) {
        self.symbol.set(symbol);
        self.decimals.set(decimals);
        self.total_supply.set(U256::zero());
        self.fail_transfers.set(false);
        self.fail_mints.set(false);
    }

    pub fn symbol(&self) -> String {
        self.symbol.get().unwrap_or_default()
    }

    pub fn decimals(&self) -> u8 {
        self.decimals.get().unwrap_or(18)
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply.get().unwrap_or(U256::zero())
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).unwrap_or(U256::zero())
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or(U256::zero())
    }

    pub fn transfer(&mut self, recipient: Address, amount: U256) -> bool {
        if self.fail_transfers.get().unwrap_or(false) {
            return false;
        }
        let sender = self.env().caller();
        self.move_balance(sender, recipient, amount);
        true
    }

    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let owner = self.env().caller();
        self.allowances.set(&(owner, spender), amount);
        self.env().emit_event(Approval { owner, spender, amount });
        true
    }

    pub fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool {
        if self.fail_transfers.get().unwrap_or(false) {
            return false;
        }
        let spender = self.env().caller();
        let current_allowance = self.allowance(owner, spender);
        if current_allowance < amount {
            self.env().revert(DscError::InsufficientAllowance);
        }
        self.move_balance(owner, recipient, amount);
        self.allowances.set(&(owner, spender), current_allowance - amount);
        true
    }

    /// Faucet mint, open to anyone
    pub fn mint(&mut self, to: Address, amount: U256) -> bool {
        if self.fail_mints.get().unwrap_or(false) {
            return false;
        }
        let new_balance = self.balance_of(to) + amount;
        let new_supply = self.total_supply() + amount;
        self.balances.set(&to, new_balance);
        self.total_supply.set(new_supply);
        self.env().emit_event(Transfer { from: None, to: Some(to), amount });
        true
    }

    /// Burn from the caller's balance
    pub fn burn(&mut self, amount: U256) {
        let owner = self.env().caller();
        let balance = self.balance_of(owner);
        if balance < amount {
            self.env().revert(DscError::BurnExceedsBalance);
        }
        let new_supply = self.total_supply() - amount;
        self.balances.set(&owner, balance - amount);
        self.total_supply.set(new_supply);
        self.env().emit_event(Transfer { from: Some(owner), to: None, amount });
    }

    pub fn set_fail_transfers(&mut self, fail: bool) {
        self.fail_transfers.set(fail);
    }

    pub fn set_fail_mints(&mut self, fail: bool) {
        self.fail_mints.set(fail);
    }

    fn move_balance(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(DscError::InsufficientTokenBalance);
        }
        self.balances.set(&from, from_balance - amount);
        let to_balance = self.balance_of(to);
        self.balances.set(&to, to_balance + amount);
        self.env().emit_event(Transfer { from: Some(from), to: Some(to), amount });
    }
}

/// Hand-driven price feed
#[odra::module]
pub struct MockPriceFeed {
    decimals: Var<u8>,
    answer: Var<U256>,
    updated_at: Var<u64>,
}

#[odra::module]
impl MockPriceFeed {
    pub fn init(&mut self, decimals: u8, initial_answer: U256) {
        self.decimals.set(decimals);
        self.update_answer(initial_answer);
    }

    pub fn decimals(&self) -> u8 {
        self.decimals.get().unwrap_or(8)
    }

    pub fn latest_round_data(&self) -> PriceRound {
        PriceRound {
            answer: self.answer.get().unwrap_or(U256::zero()),
            updated_at: self.updated_at.get().unwrap_or(0),
        }
    }

    /// Set a new answer stamped with the current block time
    pub fn update_answer(&mut self, answer: U256) {
        let now = self.env().get_block_time();
        self.answer.set(answer);
        self.updated_at.set(now);
    }

    /// Set a new answer with an explicit update time
    pub fn update_round_data(&mut self, answer: U256, updated_at: u64) {
        self.answer.set(answer);
        self.updated_at.set(updated_at);
    }
}

//! DSC Stablecoin Contract
//!
//! CEP-18 compatible stablecoin whose supply is controlled by a single owner.
//! After deployment ownership is handed to the DSC engine, which becomes the
//! only account able to mint and burn.

use odra::prelude::*;
use odra::casper_types::{U256, Key};
use odra::casper_types::account::AccountHash;
use odra::casper_types::bytesrepr::ToBytes;
use crate::errors::DscError;
use crate::events::{Approval, OwnershipTransferred, Transfer};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;

const TOKEN_NAME: &str = "DecentralizedStableCoin";
const TOKEN_SYMBOL: &str = "DSC";
const TOKEN_DECIMALS: u8 = 18;
const CEP18_NAME_KEY: &str = "name";
const CEP18_SYMBOL_KEY: &str = "symbol";
const CEP18_DECIMALS_KEY: &str = "decimals";
const CEP18_TOTAL_SUPPLY_KEY: &str = "total_supply";
const CEP18_BALANCES_DICT: &str = "balances";
const CEP18_ALLOWANCES_DICT: &str = "allowances";

/// DSC Stablecoin Contract
#[odra::module(events = [Transfer, Approval, OwnershipTransferred])]
pub struct DecentralizedStableCoin {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Decimals (18 for DSC)
    decimals: Var<u8>,
    /// Total supply
    total_supply: Var<U256>,
    /// Balance mapping
    balances: Mapping<Address, U256>,
    /// Allowance mapping (owner -> spender -> amount)
    allowances: Mapping<(Address, Address), U256>,
    /// Sole minter and burner
    owner: Var<Address>,
}

#[odra::module]
impl DecentralizedStableCoin {
    /// Initialize the stablecoin, owned by the deployer
    pub fn init(&mut self) {
        self.name.set(String::from(TOKEN_NAME));
        self.symbol.set(String::from(TOKEN_SYMBOL));
        self.decimals.set(TOKEN_DECIMALS);
        self.total_supply.set(U256::zero());
        let deployer = self.env().caller();
        self.owner.set(deployer);
        self.env().init_dictionary(CEP18_BALANCES_DICT);
        self.env().init_dictionary(CEP18_ALLOWANCES_DICT);
        self.env().set_named_value(CEP18_NAME_KEY, String::from(TOKEN_NAME));
        self.env().set_named_value(CEP18_SYMBOL_KEY, String::from(TOKEN_SYMBOL));
        self.env().set_named_value(CEP18_DECIMALS_KEY, TOKEN_DECIMALS);
        self.env().set_named_value(CEP18_TOTAL_SUPPLY_KEY, U256::zero());
    }

    // ========== CEP-18 Standard Functions ==========

    /// Get token name
    pub fn name(&self) -> String {
        self.name.get().unwrap_or_else(|| String::from(TOKEN_NAME))
    }

    /// Get token symbol
    pub fn symbol(&self) -> String {
        self.symbol.get().unwrap_or_else(|| String::from(TOKEN_SYMBOL))
    }

    /// Get decimals
    pub fn decimals(&self) -> u8 {
        self.decimals.get().unwrap_or(TOKEN_DECIMALS)
    }

    /// Get total supply
    pub fn total_supply(&self) -> U256 {
        self.total_supply.get().unwrap_or(U256::zero())
    }

    /// Get balance of an account
    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).unwrap_or(U256::zero())
    }

    /// Get allowance for spender
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or(U256::zero())
    }

    /// Transfer tokens to recipient
    pub fn transfer(&mut self, recipient: Address, amount: U256) -> bool {
        let sender = self.env().caller();
        self.transfer_internal(sender, recipient, amount);
        true
    }

    /// Approve spender to spend tokens
    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let owner = self.env().caller();
        self.approve_internal(owner, spender, amount);
        self.env().emit_event(Approval { owner, spender, amount });
        true
    }

    /// Transfer tokens from owner to recipient (requires allowance)
    pub fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool {
        let spender = self.env().caller();

        let current_allowance = self.allowance(owner, spender);
        if current_allowance < amount {
            self.env().revert(DscError::InsufficientAllowance);
        }

        self.transfer_internal(owner, recipient, amount);
        self.approve_internal(owner, spender, current_allowance - amount);
        true
    }

    // ========== Owner Functions ==========

    /// Mint new tokens (owner only)
    pub fn mint(&mut self, to: Address, amount: U256) -> bool {
        self.require_owner();

        if to == Self::zero_address() {
            self.env().revert(DscError::InvalidRecipient);
        }
        if amount.is_zero() {
            self.env().revert(DscError::ZeroAmount);
        }

        let new_balance = self.checked_credit(self.balance_of(to), amount);
        self.balances.set(&to, new_balance);
        self.set_balance_cep18(to, new_balance);

        let new_supply = self.checked_credit(self.total_supply(), amount);
        self.total_supply.set(new_supply);
        self.set_total_supply_cep18(new_supply);

        self.env().emit_event(Transfer { from: None, to: Some(to), amount });
        true
    }

    /// Burn tokens from the owner's own balance (owner only)
    pub fn burn(&mut self, amount: U256) {
        self.require_owner();

        if amount.is_zero() {
            self.env().revert(DscError::ZeroAmount);
        }

        let owner = self.env().caller();
        let current_balance = self.balance_of(owner);
        if current_balance < amount {
            self.env().revert(DscError::BurnExceedsBalance);
        }

        let new_balance = current_balance - amount;
        self.balances.set(&owner, new_balance);
        self.set_balance_cep18(owner, new_balance);

        let new_supply = self.total_supply() - amount;
        self.total_supply.set(new_supply);
        self.set_total_supply_cep18(new_supply);

        self.env().emit_event(Transfer { from: Some(owner), to: None, amount });
    }

    /// Current owner
    pub fn owner(&self) -> Option<Address> {
        self.owner.get()
    }

    /// Hand minting rights to a new owner (owner only)
    pub fn transfer_ownership(&mut self, new_owner: Address) {
        self.require_owner();
        if new_owner == Self::zero_address() {
            self.env().revert(DscError::InvalidRecipient);
        }

        let previous_owner = self.env().caller();
        self.owner.set(new_owner);
        self.env().emit_event(OwnershipTransferred { previous_owner, new_owner });
    }

    // ========== Internal Functions ==========

    fn transfer_internal(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(DscError::InsufficientTokenBalance);
        }

        let new_from_balance = from_balance - amount;
        self.balances.set(&from, new_from_balance);
        self.set_balance_cep18(from, new_from_balance);

        let new_to_balance = self.checked_credit(self.balance_of(to), amount);
        self.balances.set(&to, new_to_balance);
        self.set_balance_cep18(to, new_to_balance);

        self.env().emit_event(Transfer { from: Some(from), to: Some(to), amount });
    }

    fn approve_internal(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.set(&(owner, spender), amount);
        self.set_allowance_cep18(owner, spender, amount);
    }

    fn set_balance_cep18(&self, owner: Address, amount: U256) {
        let key = Self::cep18_balance_key(owner);
        self.env().set_dictionary_value(CEP18_BALANCES_DICT, key.as_bytes(), amount);
    }

    fn set_allowance_cep18(&self, owner: Address, spender: Address, amount: U256) {
        let key = Self::cep18_allowance_key(owner, spender);
        self.env().set_dictionary_value(CEP18_ALLOWANCES_DICT, key.as_bytes(), amount);
    }

    fn set_total_supply_cep18(&self, amount: U256) {
        self.env().set_named_value(CEP18_TOTAL_SUPPLY_KEY, amount);
    }

    fn cep18_balance_key(owner: Address) -> String {
        let key = Key::from(owner);
        let bytes = key.to_bytes().unwrap_or_default();
        BASE64_STANDARD.encode(bytes)
    }

    fn cep18_allowance_key(owner: Address, spender: Address) -> String {
        let owner_key = Key::from(owner);
        let spender_key = Key::from(spender);
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&owner_key.to_bytes().unwrap_or_default());
        bytes.extend_from_slice(&spender_key.to_bytes().unwrap_or_default());
        BASE64_STANDARD.encode(bytes)
    }

    fn checked_credit(&self, current: U256, amount: U256) -> U256 {
        match current.checked_add(amount) {
            Some(value) => value,
            None => self.env().revert(DscError::ArithmeticOverflow),
        }
    }

    fn zero_address() -> Address {
        Address::Account(AccountHash::default())
    }

    fn require_owner(&self) {
        let caller = self.env().caller();
        if self.owner.get() != Some(caller) {
            self.env().revert(DscError::Unauthorized);
        }
    }
}

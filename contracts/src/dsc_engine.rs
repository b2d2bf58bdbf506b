//! DSC Engine Contract
//!
//! Collateral ledger, debt ledger and liquidation for the DSC stablecoin.
//! Users lock approved collateral, mint DSC against it, and must keep a health
//! factor of at least 1.0 (collateral worth twice the debt).
//!
//! Ordering inside every call:
//! - value entering the engine (collateral deposit, DSC repayment) is pulled
//!   before the ledger credits it
//! - value leaving the engine (collateral redemption, DSC mint) is debited and
//!   health-checked before the external transfer or mint
//!
//! Any revert rolls back the whole call.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::DscError;
use crate::events::{CollateralDeposited, CollateralRedeemed, DscBurned, DscMinted, Liquidated};
use crate::health::{
    self, LIQUIDATION_PRECISION, LIQUIDATION_THRESHOLD, MIN_HEALTH_FACTOR, PRECISION,
};
use crate::liquidation::{quote_liquidation, LIQUIDATION_BONUS};
use crate::oracle_adapter::PriceOracle;
use crate::token_adapter::TokenAdapter;
use crate::types::{pair_collateral, CollateralConfig, CollateralType};

/// DSC Engine Contract
#[odra::module(events = [CollateralDeposited, CollateralRedeemed, DscMinted, DscBurned, Liquidated])]
pub struct DscEngine {
    /// Approved collateral types, fixed at construction
    collateral: Var<CollateralConfig>,
    /// Deposited collateral: (user, token) -> amount in token units
    deposits: Mapping<(Address, Address), U256>,
    /// Minted DSC per user
    dsc_minted: Mapping<Address, U256>,
    /// DSC stablecoin contract address
    dsc: Var<Address>,
}

#[odra::module]
impl DscEngine {
    /// Initialize the engine.
    ///
    /// `token_addresses[i]` is priced by `price_feed_addresses[i]`. Token and
    /// feed decimals are read once here and kept with the collateral type.
    pub fn init(
        &mut self,
        token_addresses: Vec<Address>,
        price_feed_addresses: Vec<Address>,
        dsc_address: Address,
    ) {
        let pairs = self.ok_or_revert(pair_collateral(&token_addresses, &price_feed_addresses));

        let env = self.env();
        let types = pairs
            .into_iter()
            .map(|(token, price_feed)| CollateralType {
                token,
                price_feed,
                token_decimals: TokenAdapter::decimals(&env, token),
                feed_decimals: PriceOracle::feed_decimals(&env, price_feed),
            })
            .collect();

        self.collateral.set(CollateralConfig { types });
        self.dsc.set(dsc_address);
    }

    // ========== Collateral Ledger ==========

    /// Lock `amount` of `token` as collateral. Caller must have approved the engine.
    pub fn deposit_collateral(&mut self, token: Address, amount: U256) {
        let user = self.env().caller();
        self.deposit_collateral_internal(user, token, amount);
    }

    /// Withdraw `amount` of `token` from the caller's position
    pub fn redeem_collateral(&mut self, token: Address, amount: U256) {
        let user = self.env().caller();
        self.debit_collateral(token, amount, user, user);
        self.revert_if_health_factor_is_broken(user);
        TokenAdapter::push(&self.env(), token, user, amount);
    }

    // ========== Debt Ledger ==========

    /// Mint `amount` DSC against the caller's collateral
    pub fn mint_dsc(&mut self, amount: U256) {
        let user = self.env().caller();
        self.mint_dsc_internal(user, amount);
    }

    /// Repay and burn `amount` of the caller's DSC debt. Caller must have approved the engine.
    pub fn burn_dsc(&mut self, amount: U256) {
        let user = self.env().caller();
        self.burn_dsc_internal(amount, user, user);
        self.revert_if_health_factor_is_broken(user);
    }

    /// Deposit collateral and mint DSC in one call
    pub fn deposit_collateral_and_mint_dsc(
        &mut self,
        token: Address,
        amount_collateral: U256,
        amount_dsc_to_mint: U256,
    ) {
        let user = self.env().caller();
        self.deposit_collateral_internal(user, token, amount_collateral);
        self.mint_dsc_internal(user, amount_dsc_to_mint);
    }

    /// Burn DSC and withdraw collateral in one call
    pub fn redeem_collateral_for_dsc(
        &mut self,
        token: Address,
        amount_collateral: U256,
        amount_dsc_to_burn: U256,
    ) {
        let user = self.env().caller();
        self.burn_dsc_internal(amount_dsc_to_burn, user, user);
        self.debit_collateral(token, amount_collateral, user, user);
        self.revert_if_health_factor_is_broken(user);
        TokenAdapter::push(&self.env(), token, user, amount_collateral);
    }

    // ========== Liquidation ==========

    /// Repay `debt_to_cover` DSC of an unhealthy `user` and take the equivalent
    /// `collateral` plus a 10% bonus.
    ///
    /// The liquidator pays with DSC from its own balance (engine must be approved).
    /// Reverts unless the user's health factor strictly improves and the
    /// liquidator stays healthy.
    pub fn liquidate(&mut self, collateral: Address, user: Address, debt_to_cover: U256) {
        if debt_to_cover.is_zero() {
            self.env().revert(DscError::ZeroAmount);
        }
        let collateral_type = self.require_collateral(&collateral);
        let liquidator = self.env().caller();

        let starting_health_factor = self.health_factor(user);
        if starting_health_factor >= U256::from(MIN_HEALTH_FACTOR) {
            self.env().revert(DscError::HealthFactorOk);
        }

        let price = PriceOracle::price(&self.env(), &collateral_type);
        let quote = self.ok_or_revert(quote_liquidation(
            price,
            debt_to_cover,
            collateral_type.token_decimals,
        ));

        self.debit_collateral(collateral, quote.total_collateral, user, liquidator);
        self.burn_dsc_internal(debt_to_cover, user, liquidator);

        let ending_health_factor = self.health_factor(user);
        if ending_health_factor <= starting_health_factor {
            self.env().revert(DscError::HealthFactorNotImproved);
        }
        self.revert_if_health_factor_is_broken(liquidator);

        TokenAdapter::push(&self.env(), collateral, liquidator, quote.total_collateral);

        self.env().emit_event(Liquidated {
            liquidator,
            user,
            token: collateral,
            debt_covered: debt_to_cover,
            collateral_seized: quote.total_collateral,
            bonus: quote.bonus,
        });
    }

    // ========== Query Functions ==========

    /// Debt and collateral value of an account: (total_dsc_minted, collateral_value_in_usd)
    pub fn get_account_information(&self, user: Address) -> (U256, U256) {
        (self.get_dsc_minted(user), self.get_account_collateral_value(user))
    }

    /// USD value (18 decimals) of everything `user` has deposited
    pub fn get_account_collateral_value(&self, user: Address) -> U256 {
        let config = self.collateral_config();
        let mut total = U256::zero();
        for collateral_type in config.types.iter() {
            let amount = self.deposit_of(user, collateral_type.token);
            if amount.is_zero() {
                continue;
            }
            let value = self.usd_value_of(collateral_type, amount);
            total = self.ok_or_revert(total.checked_add(value).ok_or(DscError::ArithmeticOverflow));
        }
        total
    }

    /// USD value (18 decimals) of `amount` token units
    pub fn get_usd_value(&self, token: Address, amount: U256) -> U256 {
        let collateral_type = self.require_collateral(&token);
        self.usd_value_of(&collateral_type, amount)
    }

    /// Token units worth `usd_amount` (18 decimals)
    pub fn get_token_amount_from_usd(&self, token: Address, usd_amount: U256) -> U256 {
        let collateral_type = self.require_collateral(&token);
        let price = PriceOracle::price(&self.env(), &collateral_type);
        self.ok_or_revert(health::token_amount_from_usd(
            price,
            usd_amount,
            collateral_type.token_decimals,
        ))
    }

    /// DSC minted by `user`
    pub fn get_dsc_minted(&self, user: Address) -> U256 {
        self.dsc_minted.get(&user).unwrap_or(U256::zero())
    }

    /// Health factor of `user`, or of the caller when `None`
    pub fn get_health_factor(&self, user: Option<Address>) -> U256 {
        let user = user.unwrap_or_else(|| self.env().caller());
        self.health_factor(user)
    }

    /// Health factor for an arbitrary debt and collateral value
    pub fn calculate_health_factor(&self, total_dsc_minted: U256, collateral_value_in_usd: U256) -> U256 {
        self.ok_or_revert(health::calculate_health_factor(
            total_dsc_minted,
            collateral_value_in_usd,
        ))
    }

    /// Deposited amount of `token` for `user`
    pub fn get_collateral_balance_of_user(&self, user: Address, token: Address) -> U256 {
        self.deposit_of(user, token)
    }

    /// Approved collateral tokens in construction order
    pub fn get_collateral_tokens(&self) -> Vec<Address> {
        self.collateral_config().tokens()
    }

    /// Price feed of an approved token
    pub fn get_collateral_token_price_feed(&self, token: Address) -> Option<Address> {
        self.collateral_config().find(&token).map(|ct| ct.price_feed)
    }

    /// Stablecoin address
    pub fn get_dsc(&self) -> Option<Address> {
        self.dsc.get()
    }

    pub fn get_precision(&self) -> U256 {
        U256::from(PRECISION)
    }

    pub fn get_liquidation_threshold(&self) -> U256 {
        U256::from(LIQUIDATION_THRESHOLD)
    }

    pub fn get_liquidation_bonus(&self) -> U256 {
        U256::from(LIQUIDATION_BONUS)
    }

    pub fn get_liquidation_precision(&self) -> U256 {
        U256::from(LIQUIDATION_PRECISION)
    }

    pub fn get_min_health_factor(&self) -> U256 {
        U256::from(MIN_HEALTH_FACTOR)
    }

    // ========== Internal Functions ==========

    fn deposit_collateral_internal(&mut self, user: Address, token: Address, amount: U256) {
        if amount.is_zero() {
            self.env().revert(DscError::ZeroAmount);
        }
        self.require_collateral(&token);

        TokenAdapter::pull(&self.env(), token, user, amount);

        let balance = self.deposit_of(user, token);
        let new_balance = self.ok_or_revert(balance.checked_add(amount).ok_or(DscError::ArithmeticOverflow));
        self.deposits.set(&(user, token), new_balance);

        self.env().emit_event(CollateralDeposited { user, token, amount });
    }

    /// Take collateral off `from`'s position. The tokens are pushed to `to` by the caller.
    fn debit_collateral(&mut self, token: Address, amount: U256, from: Address, to: Address) {
        if amount.is_zero() {
            self.env().revert(DscError::ZeroAmount);
        }
        self.require_collateral(&token);

        let balance = self.deposit_of(from, token);
        if amount > balance {
            self.env().revert(DscError::InsufficientCollateral);
        }
        self.deposits.set(&(from, token), balance - amount);

        self.env().emit_event(CollateralRedeemed { from, to, token, amount });
    }

    fn mint_dsc_internal(&mut self, user: Address, amount: U256) {
        if amount.is_zero() {
            self.env().revert(DscError::ZeroAmount);
        }

        let minted = self.get_dsc_minted(user);
        let new_minted = self.ok_or_revert(minted.checked_add(amount).ok_or(DscError::ArithmeticOverflow));
        self.dsc_minted.set(&user, new_minted);
        self.revert_if_health_factor_is_broken(user);

        TokenAdapter::mint(&self.env(), self.dsc_address(), user, amount);

        self.env().emit_event(DscMinted { user, amount });
    }

    /// Reduce `on_behalf_of`'s debt by `amount`, paid with DSC pulled from `dsc_from`
    fn burn_dsc_internal(&mut self, amount: U256, on_behalf_of: Address, dsc_from: Address) {
        if amount.is_zero() {
            self.env().revert(DscError::ZeroAmount);
        }
        if amount > self.get_dsc_minted(on_behalf_of) {
            self.env().revert(DscError::BurnExceedsDebt);
        }

        let dsc = self.dsc_address();
        TokenAdapter::pull(&self.env(), dsc, dsc_from, amount);

        let minted = self.get_dsc_minted(on_behalf_of);
        let new_minted = self.ok_or_revert(minted.checked_sub(amount).ok_or(DscError::BurnExceedsDebt));
        self.dsc_minted.set(&on_behalf_of, new_minted);

        TokenAdapter::burn(&self.env(), dsc, amount);

        self.env().emit_event(DscBurned { on_behalf_of, dsc_from, amount });
    }

    fn health_factor(&self, user: Address) -> U256 {
        let minted = self.get_dsc_minted(user);
        if minted.is_zero() {
            return U256::MAX;
        }
        let collateral_value = self.get_account_collateral_value(user);
        self.ok_or_revert(health::calculate_health_factor(minted, collateral_value))
    }

    fn revert_if_health_factor_is_broken(&self, user: Address) {
        let health_factor = self.health_factor(user);
        if let Err(broken) = health::ensure_healthy(health_factor) {
            self.env().revert(DscError::from(broken));
        }
    }

    fn usd_value_of(&self, collateral_type: &CollateralType, amount: U256) -> U256 {
        let price = PriceOracle::price(&self.env(), collateral_type);
        self.ok_or_revert(health::usd_value(price, amount, collateral_type.token_decimals))
    }

    fn deposit_of(&self, user: Address, token: Address) -> U256 {
        self.deposits.get(&(user, token)).unwrap_or(U256::zero())
    }

    fn collateral_config(&self) -> CollateralConfig {
        self.collateral.get().unwrap_or_default()
    }

    fn require_collateral(&self, token: &Address) -> CollateralType {
        match self.collateral_config().find(token) {
            Some(collateral_type) => *collateral_type,
            None => self.env().revert(DscError::UnsupportedCollateral),
        }
    }

    fn dsc_address(&self) -> Address {
        self.dsc.get_or_revert_with(DscError::MintFailed)
    }
}

impl DscEngine {
    fn ok_or_revert<T>(&self, result: Result<T, DscError>) -> T {
        match result {
            Ok(value) => value,
            Err(error) => self.env().revert(error),
        }
    }
}

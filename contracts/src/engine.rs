//! CDP Engine Contract
//!
//! The accounting core of the protocol: per-user collateral and debt
//! ledgers, the health-factor rule coupling them to USD prices, and the
//! deposit / mint / burn / redeem / liquidate operations.
//!
//! Operation flow:
//! 1. Validate inputs (positive amount, permitted collateral)
//! 2. Apply the ledger effect
//! 3. Re-check the affected position's health factor
//! 4. Interact with the token contracts
//!
//! Any failure reverts the whole call, so storage and emitted events roll
//! back together. The host executes at most one entry point at a time,
//! which is the serialization discipline the ledgers rely on.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;

use crate::errors::DscError;
use crate::interfaces::{Cep18TokenContractRef, DebtTokenContractRef};
use crate::math;
use crate::math::{
    LIQUIDATION_BONUS, LIQUIDATION_PRECISION, LIQUIDATION_THRESHOLD, MIN_HEALTH_FACTOR,
};
use crate::oracle::{OracleGuard, MAX_PRICE_AGE_SECONDS};
use crate::price_feed::PriceAggregatorContractRef;
use crate::types::CdpSnapshot;

// ==========================================
// Events
// ==========================================

pub mod events {
    use odra::prelude::*;
    use odra::casper_types::U256;

    /// Collateral entered the engine.
    #[odra::event]
    pub struct CollateralDeposited {
        pub user: Address,
        pub token: Address,
        pub amount: U256,
    }

    /// Collateral left the engine, by redemption or liquidation seizure.
    #[odra::event]
    pub struct CollateralRedeemed {
        pub from: Address,
        pub to: Address,
        pub token: Address,
        pub amount: U256,
    }
}

// ==========================================
// Contract
// ==========================================

/// CDP Engine Contract
#[odra::module(events = [events::CollateralDeposited, events::CollateralRedeemed])]
pub struct DscEngine {
    /// DSC debt token address
    dsc_token: Var<Address>,
    /// Permitted collateral tokens, in registration order
    collateral_tokens: Var<Vec<Address>>,
    /// Price feed per permitted collateral token
    price_feeds: Mapping<Address, Address>,
    /// Collateral ledger, keyed by (user, collateral token)
    collateral_deposited: Mapping<(Address, Address), U256>,
    /// DSC debt per user
    dsc_minted: Mapping<Address, U256>,
}

#[odra::module]
impl DscEngine {
    /// Initialize the engine with the debt token and the permitted
    /// collateral set. `collateral_tokens` and `price_feeds` are matched
    /// by index; the set is fixed for the engine's lifetime.
    pub fn init(
        &mut self,
        dsc_token: Address,
        collateral_tokens: Vec<Address>,
        price_feeds: Vec<Address>,
    ) {
        if collateral_tokens.is_empty() || collateral_tokens.len() != price_feeds.len() {
            self.env().revert(DscError::InvalidConstructorArgs);
        }

        for (token, feed) in collateral_tokens.iter().zip(price_feeds.iter()) {
            if self.price_feeds.get(token).is_some() {
                self.env().revert(DscError::InvalidConstructorArgs);
            }
            self.price_feeds.set(token, *feed);
        }

        self.collateral_tokens.set(collateral_tokens);
        self.dsc_token.set(dsc_token);
    }

    // ========== Mutating Entry Points ==========

    /// Deposit collateral into the caller's position.
    ///
    /// Pulls `amount` of `collateral_token` from the caller; the caller
    /// must have approved the engine beforehand. Depositing cannot reduce
    /// health, so no health check runs.
    pub fn deposit_collateral(&mut self, collateral_token: Address, amount: U256) {
        self.require_positive(amount);
        self.require_permitted(&collateral_token);
        let caller = self.env().caller();

        self.deposit_collateral_internal(caller, collateral_token, amount);
    }

    /// Mint DSC against the caller's collateral.
    ///
    /// Fails with `HealthFactorTooLow` if the new debt would tip the
    /// position below 1.0.
    pub fn mint_dsc(&mut self, amount: U256) {
        self.require_positive(amount);
        let caller = self.env().caller();

        self.mint_dsc_internal(caller, amount);
    }

    /// Deposit collateral and mint DSC in one transaction.
    pub fn deposit_collateral_and_mint_dsc(
        &mut self,
        collateral_token: Address,
        collateral_amount: U256,
        dsc_amount: U256,
    ) {
        self.require_positive(collateral_amount);
        self.require_positive(dsc_amount);
        self.require_permitted(&collateral_token);
        let caller = self.env().caller();

        self.deposit_collateral_internal(caller, collateral_token, collateral_amount);
        self.mint_dsc_internal(caller, dsc_amount);
    }

    /// Redeem collateral from the caller's position.
    ///
    /// The health check runs on the post-redemption state; an unhealthy
    /// result reverts the ledger debit and the outbound transfer together.
    pub fn redeem_collateral(&mut self, collateral_token: Address, amount: U256) {
        self.require_positive(amount);
        self.require_permitted(&collateral_token);
        let caller = self.env().caller();

        self.redeem_collateral_internal(collateral_token, amount, caller, caller);
        self.revert_if_health_factor_broken(caller);
    }

    /// Burn DSC to reduce the caller's debt.
    ///
    /// Pulls the DSC from the caller (prior approval required) and burns
    /// it out of the supply.
    pub fn burn_dsc(&mut self, amount: U256) {
        self.require_positive(amount);
        let caller = self.env().caller();

        self.burn_dsc_internal(amount, caller, caller);
        // Burning debt cannot break health; kept as a backstop.
        self.revert_if_health_factor_broken(caller);
    }

    /// Burn DSC and redeem collateral in one transaction.
    pub fn redeem_collateral_for_dsc(
        &mut self,
        collateral_token: Address,
        collateral_amount: U256,
        dsc_amount: U256,
    ) {
        self.require_positive(collateral_amount);
        self.require_positive(dsc_amount);
        self.require_permitted(&collateral_token);
        let caller = self.env().caller();

        self.burn_dsc_internal(dsc_amount, caller, caller);
        self.redeem_collateral_internal(collateral_token, collateral_amount, caller, caller);
        self.revert_if_health_factor_broken(caller);
    }

    /// Liquidate part of an unhealthy position.
    ///
    /// The caller covers `debt_to_cover` (USD, token precision) of `user`'s
    /// debt with their own DSC and seizes the equivalent collateral plus a
    /// 10% bonus. The liquidation must strictly improve the target's health
    /// factor, and the caller's own position must stay healthy.
    pub fn liquidate(&mut self, collateral_token: Address, user: Address, debt_to_cover: U256) {
        self.require_positive(debt_to_cover);
        self.require_permitted(&collateral_token);
        let liquidator = self.env().caller();

        let starting_health_factor = self.health_factor_of(user);
        if starting_health_factor >= U256::from(MIN_HEALTH_FACTOR) {
            self.env().revert(DscError::PositionNotLiquidatable);
        }

        let base_collateral = self.token_amount_from_usd(collateral_token, debt_to_cover);
        let bonus_collateral =
            base_collateral * U256::from(LIQUIDATION_BONUS) / U256::from(LIQUIDATION_PRECISION);
        let seized_collateral = base_collateral + bonus_collateral;

        self.redeem_collateral_internal(collateral_token, seized_collateral, user, liquidator);
        self.burn_dsc_internal(debt_to_cover, user, liquidator);

        let ending_health_factor = self.health_factor_of(user);
        if ending_health_factor <= starting_health_factor {
            self.env().revert(DscError::LiquidationDidNotImprove);
        }

        self.revert_if_health_factor_broken(liquidator);
    }

    // ========== Query Functions ==========

    /// Get a user's debt and total collateral value.
    pub fn cdp_info(&self, user: Address) -> CdpSnapshot {
        CdpSnapshot {
            debt: self.dsc_minted.get(&user).unwrap_or_default(),
            collateral_value_usd: self.collateral_value_of(user),
        }
    }

    /// Get a user's health factor (token precision; `U256::MAX` when debt-free).
    pub fn health_factor_of(&self, user: Address) -> U256 {
        let debt = self.dsc_minted.get(&user).unwrap_or_default();
        math::health_factor(self.collateral_value_of(user), debt)
    }

    /// USD value (token precision) of a user's whole collateral set.
    ///
    /// Only feeds backing assets the user actually holds are consulted, so
    /// a wedged feed cannot gate operations that never needed it.
    pub fn collateral_value_of(&self, user: Address) -> U256 {
        let mut total = U256::zero();
        for token in self.collateral_tokens.get_or_default() {
            let amount = self.collateral_deposited.get(&(user, token)).unwrap_or_default();
            if amount.is_zero() {
                continue;
            }
            total = total + self.usd_value(token, amount);
        }
        total
    }

    /// USD value (token precision) of `amount` of `collateral_token`.
    pub fn usd_value(&self, collateral_token: Address, amount: U256) -> U256 {
        math::usd_value(self.checked_price(collateral_token), amount)
    }

    /// Collateral amount (token precision) worth `usd_amount`.
    pub fn token_amount_from_usd(&self, collateral_token: Address, usd_amount: U256) -> U256 {
        math::token_amount_from_usd(self.checked_price(collateral_token), usd_amount)
    }

    /// A user's deposited balance of one collateral token.
    pub fn collateral_of(&self, user: Address, collateral_token: Address) -> U256 {
        self.collateral_deposited.get(&(user, collateral_token)).unwrap_or_default()
    }

    /// Permitted collateral tokens, in registration order.
    pub fn permitted_collateral_list(&self) -> Vec<Address> {
        self.collateral_tokens.get_or_default()
    }

    /// Price feed for a collateral token, if permitted.
    pub fn price_feed_of(&self, collateral_token: Address) -> Option<Address> {
        self.price_feeds.get(&collateral_token)
    }

    /// DSC debt token address
    pub fn dsc_token(&self) -> Option<Address> {
        self.dsc_token.get()
    }

    /// Liquidation bonus in percent
    pub fn liquidation_bonus_percentage(&self) -> u64 {
        LIQUIDATION_BONUS
    }

    /// Liquidation threshold in percent
    pub fn liquidation_threshold(&self) -> u64 {
        LIQUIDATION_THRESHOLD
    }

    /// Minimum healthy factor (1.0 in token precision)
    pub fn min_health_factor(&self) -> U256 {
        U256::from(MIN_HEALTH_FACTOR)
    }

    /// Token precision (1e18)
    pub fn precision(&self) -> U256 {
        U256::from(math::PRECISION)
    }

    /// Raw oracle answer precision (1e8)
    pub fn feed_precision(&self) -> u64 {
        math::FEED_PRECISION
    }

    /// Lift from feed precision to token precision (1e10)
    pub fn additional_feed_precision(&self) -> u64 {
        math::ADDITIONAL_FEED_PRECISION
    }

    /// Oracle freshness window in seconds
    pub fn max_price_age_seconds(&self) -> u64 {
        MAX_PRICE_AGE_SECONDS
    }

    // ========== Internal Functions ==========

    fn deposit_collateral_internal(&mut self, caller: Address, token: Address, amount: U256) {
        let key = (caller, token);
        let held = self.collateral_deposited.get(&key).unwrap_or_default();
        self.collateral_deposited.set(&key, held + amount);

        self.env().emit_event(events::CollateralDeposited {
            user: caller,
            token,
            amount,
        });

        let mut ledger = Cep18TokenContractRef::new(self.env().clone(), token);
        if !ledger.transfer_from(caller, self.env().self_address(), amount) {
            self.env().revert(DscError::CollateralTransferFailed);
        }
    }

    fn mint_dsc_internal(&mut self, caller: Address, amount: U256) {
        let debt = self.dsc_minted.get(&caller).unwrap_or_default();
        self.dsc_minted.set(&caller, debt + amount);
        self.revert_if_health_factor_broken(caller);

        let mut dsc = DebtTokenContractRef::new(self.env().clone(), self.dsc_address());
        if !dsc.mint(caller, amount) {
            self.env().revert(DscError::MintFailed);
        }
    }

    /// Move collateral out of `from`'s ledger to `to`'s external balance.
    fn redeem_collateral_internal(&mut self, token: Address, amount: U256, from: Address, to: Address) {
        let key = (from, token);
        let held = self.collateral_deposited.get(&key).unwrap_or_default();
        if held < amount {
            self.env().revert(DscError::InsufficientCollateral);
        }
        self.collateral_deposited.set(&key, held - amount);

        self.env().emit_event(events::CollateralRedeemed {
            from,
            to,
            token,
            amount,
        });

        let mut ledger = Cep18TokenContractRef::new(self.env().clone(), token);
        if !ledger.transfer(to, amount) {
            self.env().revert(DscError::TransferFailed);
        }
    }

    /// Retire `amount` of `on_behalf_of`'s debt, paid in DSC by `payer`.
    fn burn_dsc_internal(&mut self, amount: U256, on_behalf_of: Address, payer: Address) {
        let debt = self.dsc_minted.get(&on_behalf_of).unwrap_or_default();
        if debt < amount {
            self.env().revert(DscError::InsufficientDebt);
        }
        self.dsc_minted.set(&on_behalf_of, debt - amount);

        let mut dsc = DebtTokenContractRef::new(self.env().clone(), self.dsc_address());
        if !dsc.transfer_from(payer, self.env().self_address(), amount) {
            self.env().revert(DscError::TransferFailed);
        }
        dsc.burn(amount);
    }

    fn require_positive(&self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(DscError::ZeroAmount);
        }
    }

    fn require_permitted(&self, token: &Address) {
        if self.price_feeds.get(token).is_none() {
            self.env().revert(DscError::CollateralNotPermitted);
        }
    }

    fn feed_of(&self, token: &Address) -> Address {
        match self.price_feeds.get(token) {
            Some(feed) => feed,
            None => self.env().revert(DscError::CollateralNotPermitted),
        }
    }

    /// Guarded raw price (feed precision) for a permitted collateral token.
    fn checked_price(&self, collateral_token: Address) -> U256 {
        let feed = self.feed_of(&collateral_token);
        let feed_ref = PriceAggregatorContractRef::new(self.env().clone(), feed);
        OracleGuard::checked_price(&self.env(), &feed_ref)
    }

    fn dsc_address(&self) -> Address {
        self.dsc_token.get().expect("dsc token not set")
    }

    fn revert_if_health_factor_broken(&self, user: Address) {
        let health_factor = self.health_factor_of(user);
        if health_factor < U256::from(MIN_HEALTH_FACTOR) {
            self.env().revert(DscError::HealthFactorTooLow);
        }
    }
}

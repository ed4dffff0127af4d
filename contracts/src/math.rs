//! Fixed-point arithmetic for the CDP engine.
//!
//! Three precision domains are in play:
//! - token precision (1e18): collateral amounts, debt amounts, health factor
//! - feed precision (1e8): raw oracle answers, USD per whole collateral unit
//! - the lift (1e10) bridging the two, so that feed * lift = token precision
//!
//! All operations are on `U256`; operator overflow aborts the call, which
//! is the intended fatal outcome for magnitudes the protocol never reaches.

use odra::casper_types::U256;

/// Token precision (1e18)
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Raw oracle answer precision (1e8)
pub const FEED_PRECISION: u64 = 100_000_000;

/// Lift applied to raw oracle answers so prices line up with token precision
pub const ADDITIONAL_FEED_PRECISION: u64 = 10_000_000_000;

/// Share of collateral value counted as backing, in percent (200% over-collateralization)
pub const LIQUIDATION_THRESHOLD: u64 = 50;

/// Divisor for [`LIQUIDATION_THRESHOLD`] and [`LIQUIDATION_BONUS`]
pub const LIQUIDATION_PRECISION: u64 = 100;

/// Extra collateral paid to a liquidator, in percent
pub const LIQUIDATION_BONUS: u64 = 10;

/// Minimum healthy factor (1.0 in token precision)
pub const MIN_HEALTH_FACTOR: u128 = 1_000_000_000_000_000_000;

/// USD value (token precision) of `amount` collateral at `raw_price`.
///
/// `raw_price` is a checked oracle answer in feed precision; callers
/// guarantee it is positive.
pub fn usd_value(raw_price: U256, amount: U256) -> U256 {
    raw_price * U256::from(ADDITIONAL_FEED_PRECISION) * amount / U256::from(PRECISION)
}

/// Collateral amount (token precision) worth `usd_amount` at `raw_price`.
///
/// Rounds down; the truncation is at most one unit of the lifted price.
pub fn token_amount_from_usd(raw_price: U256, usd_amount: U256) -> U256 {
    usd_amount * U256::from(PRECISION) / (raw_price * U256::from(ADDITIONAL_FEED_PRECISION))
}

/// Collateral value counted as backing after the liquidation threshold.
pub fn threshold_adjusted(collateral_value_usd: U256) -> U256 {
    collateral_value_usd * U256::from(LIQUIDATION_THRESHOLD) / U256::from(LIQUIDATION_PRECISION)
}

/// Health factor in token precision.
///
/// A position with no debt saturates to `U256::MAX`; a factor below
/// [`MIN_HEALTH_FACTOR`] marks the position liquidatable.
pub fn health_factor(collateral_value_usd: U256, debt: U256) -> U256 {
    if debt.is_zero() {
        return U256::MAX;
    }
    threshold_adjusted(collateral_value_usd) * U256::from(PRECISION) / debt
}

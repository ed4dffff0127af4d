//! Stale-price guard over external price aggregators.
//!
//! Every engine read of an oracle goes through this guard: a round older
//! than the freshness window or a non-positive answer fails the enclosing
//! operation. Failing closed here is what keeps a wedged feed from
//! falsifying solvency checks in either direction.

use odra::casper_types::U256;

use crate::errors::DscError;
use crate::price_feed::PriceAggregatorContractRef;
use crate::types::PriceRound;

/// Maximum round age in seconds before a quote is treated as unavailable
pub const MAX_PRICE_AGE_SECONDS: u64 = 3600;

/// Guarded access to a price aggregator contract
pub struct OracleGuard;

impl OracleGuard {
    /// Read the latest round from `feed`, reverting on stale or invalid data.
    pub fn checked_round(env: &odra::ContractEnv, feed: &PriceAggregatorContractRef) -> PriceRound {
        let round = feed.latest_round_data();

        let age = env.get_block_time().saturating_sub(round.updated_at);
        if age >= MAX_PRICE_AGE_SECONDS {
            env.revert(DscError::StalePrice);
        }
        if round.answer <= 0 {
            env.revert(DscError::InvalidPrice);
        }

        round
    }

    /// Checked raw price lifted into `U256` (feed precision, 1e8).
    pub fn checked_price(env: &odra::ContractEnv, feed: &PriceAggregatorContractRef) -> U256 {
        let round = Self::checked_round(env, feed);
        U256::from(round.answer as u64)
    }
}

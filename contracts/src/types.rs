//! Common types used across the DSC protocol.

use odra::prelude::*;
use odra::casper_types::U256;

/// One oracle round as reported by a price aggregator.
///
/// `answer` is the USD price of one whole collateral unit in feed
/// precision (1e8) and is signed; consumers must reject non-positive
/// answers. `updated_at` is the host block time of the last update.
#[odra::odra_type]
#[derive(Copy, Default)]
pub struct PriceRound {
    /// Round identifier
    pub round_id: u64,
    /// Price in feed precision (signed)
    pub answer: i64,
    /// Timestamp the round was started
    pub started_at: u64,
    /// Timestamp the answer was last updated
    pub updated_at: u64,
    /// Round in which the answer was computed
    pub answered_in_round: u64,
}

/// Snapshot of a single CDP: debt issued and total collateral value.
#[odra::odra_type]
pub struct CdpSnapshot {
    /// DSC debt in token precision
    pub debt: U256,
    /// USD value of all deposited collateral, token precision
    pub collateral_value_usd: U256,
}

//! Manually-fed price aggregator.
//!
//! A deployable aggregator with the `latest_round_data` surface the engine
//! expects. Answers are pushed by an operator, so the feed doubles as the
//! test-suite oracle and as a stand-in aggregator on test networks that
//! have no external USD feeds.

use odra::prelude::*;

use crate::types::PriceRound;

/// Feed answers are USD with 8 decimal places
pub const FEED_DECIMALS: u8 = 8;

/// Price aggregator interface for cross-contract calls
#[odra::external_contract]
pub trait PriceAggregator {
    fn latest_round_data(&self) -> PriceRound;
    fn decimals(&self) -> u8;
}

/// Manually-fed price aggregator contract
#[odra::module]
pub struct ManualPriceFeed {
    /// Answer decimals
    decimals: Var<u8>,
    /// Latest round
    latest: Var<PriceRound>,
}

#[odra::module]
impl ManualPriceFeed {
    /// Initialize the feed with a first round at the current block time.
    pub fn init(&mut self, initial_answer: i64) {
        self.decimals.set(FEED_DECIMALS);
        let now = self.env().get_block_time();
        self.latest.set(PriceRound {
            round_id: 1,
            answer: initial_answer,
            started_at: now,
            updated_at: now,
            answered_in_round: 1,
        });
    }

    /// Get the latest round.
    pub fn latest_round_data(&self) -> PriceRound {
        self.latest.get_or_default()
    }

    /// Get answer decimals.
    pub fn decimals(&self) -> u8 {
        self.decimals.get().unwrap_or(FEED_DECIMALS)
    }

    /// Push a new answer, stamped with the current block time.
    pub fn update_answer(&mut self, answer: i64) {
        let mut round = self.latest.get_or_default();
        let now = self.env().get_block_time();
        round.round_id += 1;
        round.answer = answer;
        round.started_at = now;
        round.updated_at = now;
        round.answered_in_round = round.round_id;
        self.latest.set(round);
    }

    /// Overwrite the whole round, timestamps included. Lets callers stage
    /// stale or otherwise malformed rounds.
    pub fn update_round_data(&mut self, round: PriceRound) {
        self.latest.set(round);
    }
}

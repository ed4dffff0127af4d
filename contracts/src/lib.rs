//! DSC CDP Contracts
//!
//! An over-collateralized stablecoin protocol: users deposit exogenous
//! collateral (wETH, wBTC), mint DSC against it up to a 200%
//! over-collateralization threshold, and unhealthy positions are partially
//! liquidated by third parties for a 10% collateral bonus.
//!
//! ## Architecture
//!
//! - **DscEngine**: per-user collateral and debt ledgers, health-factor
//!   enforcement, deposit/mint/burn/redeem/liquidate
//! - **Dsc**: the stablecoin itself, with engine-only mint/burn
//! - **ManualPriceFeed**: operator-fed USD price aggregator (tests and
//!   testnets without external feeds)
//! - **OracleGuard**: freshness and validity checks on every price read
//! - **CollateralToken**: faucet-minted CEP-18 token standing in for
//!   bridged collateral on test networks
//!
//! Prices flow feed -> guard -> engine; a stale or invalid quote fails
//! the enclosing operation rather than degrading silently.

#![cfg_attr(target_arch = "wasm32", no_std)]

#[cfg(target_arch = "wasm32")]
extern crate alloc;

// Re-export odra for downstream usage
pub use odra;

// Core module declarations
pub mod errors;
pub mod interfaces;
pub mod math;
pub mod oracle;
pub mod types;

// Contract modules
pub mod collateral_token;
pub mod engine;
pub mod price_feed;
pub mod stablecoin;

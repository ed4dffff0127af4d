//! Deploy contracts to Casper livenet/testnet using Odra livenet environment.
//!
//! Usage:
//!   cargo run --bin deploy_livenet --features livenet --release
//!
//! Requires .env file with:
//!   ODRA_CASPER_LIVENET_SECRET_KEY_PATH=/path/to/secret_key.pem
//!   ODRA_CASPER_LIVENET_NODE_ADDRESS=https://node.testnet.casper.network
//!   ODRA_CASPER_LIVENET_CHAIN_NAME=casper-test
//!   ODRA_CASPER_LIVENET_PAYMENT_AMOUNT=200000000000

use odra::host::{Deployer, NoArgs};
use odra::prelude::*;

use dsc_contracts::collateral_token::{CollateralToken, CollateralTokenInitArgs};
use dsc_contracts::engine::{DscEngine, DscEngineInitArgs};
use dsc_contracts::price_feed::{ManualPriceFeed, ManualPriceFeedInitArgs};
use dsc_contracts::stablecoin::Dsc;

/// Initial feed answers (USD, 8 decimals)
const WETH_USD_8DEC: i64 = 400_000_000_000;
const WBTC_USD_8DEC: i64 = 7_000_000_000_000;

fn main() {
    // Load environment from .env file
    dotenv::dotenv().ok();

    println!("=== DSC Protocol Livenet Deployment ===");
    println!();

    // Initialize Odra livenet environment
    let env = odra_casper_livenet_env::env();

    // Configure payment amount for deployments/calls
    let payment_amount: u64 = std::env::var("ODRA_CASPER_LIVENET_PAYMENT_AMOUNT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(200_000_000_000);
    env.set_gas(payment_amount);

    let deployer = env.caller();
    println!("Deployer: {:?}", deployer);
    println!();

    // ==================== Phase 1: Collateral Tokens and Feeds ====================
    println!("=== Phase 1: Deploying Collateral Tokens and Price Feeds ===");
    println!();

    println!("Deploying wETH collateral token...");
    let weth = CollateralToken::deploy(
        &env,
        CollateralTokenInitArgs {
            name: String::from("Wrapped Ether"),
            symbol: String::from("wETH"),
            decimals: 18,
        },
    );
    let weth_addr = weth.address().clone();
    println!("wETH deployed at: {:?}", weth_addr);

    println!("Deploying wBTC collateral token...");
    let wbtc = CollateralToken::deploy(
        &env,
        CollateralTokenInitArgs {
            name: String::from("Wrapped Bitcoin"),
            symbol: String::from("wBTC"),
            decimals: 18,
        },
    );
    let wbtc_addr = wbtc.address().clone();
    println!("wBTC deployed at: {:?}", wbtc_addr);

    println!("Deploying wETH/USD price feed...");
    let weth_feed = ManualPriceFeed::deploy(
        &env,
        ManualPriceFeedInitArgs {
            initial_answer: WETH_USD_8DEC,
        },
    );
    let weth_feed_addr = weth_feed.address().clone();
    println!("wETH/USD feed deployed at: {:?}", weth_feed_addr);

    println!("Deploying wBTC/USD price feed...");
    let wbtc_feed = ManualPriceFeed::deploy(
        &env,
        ManualPriceFeedInitArgs {
            initial_answer: WBTC_USD_8DEC,
        },
    );
    let wbtc_feed_addr = wbtc_feed.address().clone();
    println!("wBTC/USD feed deployed at: {:?}", wbtc_feed_addr);

    println!();

    // ==================== Phase 2: Stablecoin and Engine ====================
    println!("=== Phase 2: Deploying Stablecoin and Engine ===");
    println!();

    println!("Deploying DSC stablecoin...");
    let mut dsc = Dsc::deploy(&env, NoArgs);
    let dsc_addr = dsc.address().clone();
    println!("DSC deployed at: {:?}", dsc_addr);

    println!("Deploying DscEngine...");
    let engine = DscEngine::deploy(
        &env,
        DscEngineInitArgs {
            dsc_token: dsc_addr,
            collateral_tokens: vec![weth_addr, wbtc_addr],
            price_feeds: vec![weth_feed_addr, wbtc_feed_addr],
        },
    );
    let engine_addr = engine.address().clone();
    println!("DscEngine deployed at: {:?}", engine_addr);

    println!();

    // ==================== Phase 3: Wiring ====================
    println!("=== Phase 3: Wiring ===");
    println!();

    // Hand DSC supply authority to the engine
    println!("Transferring DSC ownership to the engine...");
    dsc.transfer_ownership(engine_addr);
    println!("Done.");

    println!();
    println!("=== Deployment Complete ===");
    println!();
    println!("Contract Addresses:");
    println!("  wETH:          {:?}", weth_addr);
    println!("  wBTC:          {:?}", wbtc_addr);
    println!("  wETH/USD feed: {:?}", weth_feed_addr);
    println!("  wBTC/USD feed: {:?}", wbtc_feed_addr);
    println!("  DSC:           {:?}", dsc_addr);
    println!("  DscEngine:     {:?}", engine_addr);
}

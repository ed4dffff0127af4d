#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use odra::casper_types::U256;
use odra::host::{Deployer, HostRef, NoArgs};

use dsc_contracts::collateral_token::{CollateralToken, CollateralTokenInitArgs};
use dsc_contracts::engine::{DscEngine, DscEngineInitArgs};
use dsc_contracts::price_feed::{ManualPriceFeed, ManualPriceFeedInitArgs};
use dsc_contracts::stablecoin::Dsc;

const WAD: u128 = 1_000_000_000_000_000_000;
const WETH_USD: i64 = 400_000_000_000;
const WBTC_USD: i64 = 7_000_000_000_000;

#[derive(Arbitrary, Debug, Clone, Copy)]
enum Op {
    Deposit { user: u8, wbtc: bool, amount: u8 },
    Mint { user: u8, amount: u16 },
    Burn { user: u8, amount: u16 },
    Redeem { user: u8, wbtc: bool, amount: u8 },
    Liquidate { target: u8, cover: u16 },
    // Bounded to 80%..120% of the initial price; with a 200% threshold the
    // band can break individual positions but never global solvency.
    MoveWethPrice { pct: u8 },
}

fn wad(n: u64) -> U256 {
    U256::from(n) * U256::from(WAD)
}

fuzz_target!(|ops: Vec<Op>| {
    let env = odra_test::env();

    let mut weth = CollateralToken::deploy(
        &env,
        CollateralTokenInitArgs {
            name: String::from("Wrapped Ether"),
            symbol: String::from("wETH"),
            decimals: 18,
        },
    );
    let mut wbtc = CollateralToken::deploy(
        &env,
        CollateralTokenInitArgs {
            name: String::from("Wrapped Bitcoin"),
            symbol: String::from("wBTC"),
            decimals: 18,
        },
    );
    let mut weth_feed = ManualPriceFeed::deploy(
        &env,
        ManualPriceFeedInitArgs {
            initial_answer: WETH_USD,
        },
    );
    let wbtc_feed = ManualPriceFeed::deploy(
        &env,
        ManualPriceFeedInitArgs {
            initial_answer: WBTC_USD,
        },
    );
    let mut dsc = Dsc::deploy(&env, NoArgs);
    let mut engine = DscEngine::deploy(
        &env,
        DscEngineInitArgs {
            dsc_token: dsc.address().clone(),
            collateral_tokens: vec![weth.address().clone(), wbtc.address().clone()],
            price_feeds: vec![weth_feed.address().clone(), wbtc_feed.address().clone()],
        },
    );
    dsc.transfer_ownership(engine.address().clone());

    let users = [env.get_account(1), env.get_account(2), env.get_account(3)];

    // A funded liquidator so liquidation paths actually run.
    let liquidator = env.get_account(4);
    wbtc.mint(liquidator, wad(100));
    env.set_caller(liquidator);
    wbtc.approve(engine.address().clone(), wad(100));
    engine.deposit_collateral(wbtc.address().clone(), wad(100));
    engine.mint_dsc(wad(500_000));
    dsc.approve(engine.address().clone(), wad(500_000));

    for op in ops {
        match op {
            Op::Deposit { user, wbtc: use_wbtc, amount } => {
                let user = users[user as usize % users.len()];
                let amount = wad(u64::from(amount) + 1);
                let token = if use_wbtc { &mut wbtc } else { &mut weth };
                token.mint(user, amount);
                env.set_caller(user);
                token.approve(engine.address().clone(), amount);
                let _ = engine.try_deposit_collateral(token.address().clone(), amount);
            }
            Op::Mint { user, amount } => {
                let user = users[user as usize % users.len()];
                env.set_caller(user);
                let _ = engine.try_mint_dsc(wad(u64::from(amount) + 1));
            }
            Op::Burn { user, amount } => {
                let user = users[user as usize % users.len()];
                let amount = wad(u64::from(amount) + 1);
                env.set_caller(user);
                dsc.approve(engine.address().clone(), amount);
                let _ = engine.try_burn_dsc(amount);
            }
            Op::Redeem { user, wbtc: use_wbtc, amount } => {
                let user = users[user as usize % users.len()];
                let token = if use_wbtc {
                    wbtc.address().clone()
                } else {
                    weth.address().clone()
                };
                env.set_caller(user);
                let _ = engine.try_redeem_collateral(token, wad(u64::from(amount) + 1));
            }
            Op::Liquidate { target, cover } => {
                let target = users[target as usize % users.len()];
                env.set_caller(liquidator);
                let _ = engine.try_liquidate(
                    weth.address().clone(),
                    target,
                    wad(u64::from(cover) + 1),
                );
            }
            Op::MoveWethPrice { pct } => {
                let pct = 80 + i64::from(pct) % 41;
                weth_feed.update_answer(WETH_USD / 100 * pct);
            }
        }

        // Global solvency: issued DSC never exceeds the USD value of the
        // collateral the engine holds.
        let engine_addr = engine.address().clone();
        let weth_value = engine.usd_value(weth.address().clone(), weth.balance_of(engine_addr));
        let wbtc_value = engine.usd_value(wbtc.address().clone(), wbtc.balance_of(engine_addr));
        assert!(dsc.total_supply() <= weth_value + wbtc_value);
    }
});

// Run with: cargo fuzz run solvency -- -runs=100000

//! Deploy the DSC protocol to Casper livenet/testnet using Odra livenet environment.
//!
//! Usage:
//!   cargo run --bin deploy_livenet --release
//!
//! Requires .env file with:
//!   ODRA_CASPER_LIVENET_SECRET_KEY_PATH=/path/to/secret_key.pem
//!   ODRA_CASPER_LIVENET_NODE_ADDRESS=https://node.testnet.casper.network
//!   ODRA_CASPER_LIVENET_CHAIN_NAME=casper-test
//!   ODRA_CASPER_LIVENET_PAYMENT_AMOUNT=200000000000
//!
//! Collateral, either:
//!   DSC_DEPLOY_MOCKS=true                      (mock WETH/WBTC with $2000/$1000 feeds)
//! or:
//!   DSC_COLLATERAL_TOKENS=hash-...,hash-...
//!   DSC_PRICE_FEEDS=hash-...,hash-...
//!
//! Optional:
//!   DSC_DEPLOYMENT_RECORD=deployment.json

use std::str::FromStr;

use odra::casper_types::{Key, U256};
use odra::host::{Deployer, NoArgs};
use odra::prelude::*;
use serde::Serialize;
use thiserror::Error;

use dsc_protocol_contracts::dsc_engine::{DscEngine, DscEngineInitArgs};
use dsc_protocol_contracts::mocks::{
    MockPriceFeed, MockPriceFeedInitArgs, MockToken, MockTokenInitArgs,
};
use dsc_protocol_contracts::stablecoin::DecentralizedStableCoin;

const DEFAULT_PAYMENT_AMOUNT: u64 = 200_000_000_000;
const DEFAULT_RECORD_PATH: &str = "deployment.json";
const MOCK_FEED_DECIMALS: u8 = 8;
const MOCK_WETH_USD: u64 = 2000;
const MOCK_WBTC_USD: u64 = 1000;

#[derive(Debug, Error)]
enum DeployError {
    #[error("{0} must be set when DSC_DEPLOY_MOCKS is not enabled")]
    MissingVar(&'static str),
    #[error("invalid contract address {0:?}")]
    InvalidAddress(String),
    #[error("{tokens} collateral tokens but {feeds} price feeds")]
    LengthMismatch { tokens: usize, feeds: usize },
    #[error("failed to write deployment record: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode deployment record: {0}")]
    Json(#[from] serde_json::Error),
}

enum CollateralSource {
    Mocks,
    Existing {
        tokens: Vec<Address>,
        price_feeds: Vec<Address>,
    },
}

struct DeployConfig {
    payment_amount: u64,
    collateral: CollateralSource,
    record_path: String,
}

impl DeployConfig {
    fn from_env() -> Result<Self, DeployError> {
        let payment_amount = std::env::var("ODRA_CASPER_LIVENET_PAYMENT_AMOUNT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PAYMENT_AMOUNT);

        let deploy_mocks = std::env::var("DSC_DEPLOY_MOCKS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let collateral = if deploy_mocks {
            CollateralSource::Mocks
        } else {
            let tokens = parse_addresses("DSC_COLLATERAL_TOKENS")?;
            let price_feeds = parse_addresses("DSC_PRICE_FEEDS")?;
            if tokens.len() != price_feeds.len() {
                return Err(DeployError::LengthMismatch {
                    tokens: tokens.len(),
                    feeds: price_feeds.len(),
                });
            }
            CollateralSource::Existing { tokens, price_feeds }
        };

        let record_path = std::env::var("DSC_DEPLOYMENT_RECORD")
            .unwrap_or_else(|_| String::from(DEFAULT_RECORD_PATH));

        Ok(Self {
            payment_amount,
            collateral,
            record_path,
        })
    }
}

fn parse_addresses(var: &'static str) -> Result<Vec<Address>, DeployError> {
    let raw = std::env::var(var).map_err(|_| DeployError::MissingVar(var))?;
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Address::from_str(s).map_err(|_| DeployError::InvalidAddress(s.to_string())))
        .collect()
}

fn formatted(address: Address) -> String {
    Key::from(address).to_formatted_string()
}

#[derive(Serialize)]
struct CollateralRecord {
    token: String,
    price_feed: String,
}

#[derive(Serialize)]
struct DeploymentRecord {
    deployer: String,
    dsc: String,
    engine: String,
    collateral: Vec<CollateralRecord>,
}

fn main() {
    // Load environment from .env file
    dotenv::dotenv().ok();

    if let Err(error) = run() {
        eprintln!("Deployment failed: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), DeployError> {
    let config = DeployConfig::from_env()?;

    println!("=== DSC Protocol Livenet Deployment ===");
    println!();

    // Initialize Odra livenet environment
    let env = odra_casper_livenet_env::env();
    env.set_gas(config.payment_amount);

    let deployer = env.caller();
    println!("Deployer: {:?}", deployer);
    println!();

    // ==================== Phase 1: Collateral ====================
    println!("=== Phase 1: Collateral ===");
    println!();

    let (tokens, price_feeds) = match config.collateral {
        CollateralSource::Existing { tokens, price_feeds } => {
            println!("Using {} existing collateral token(s)", tokens.len());
            (tokens, price_feeds)
        }
        CollateralSource::Mocks => {
            let feed_unit = U256::from(10u64).pow(U256::from(MOCK_FEED_DECIMALS));
            let mut tokens = Vec::new();
            let mut price_feeds = Vec::new();

            for (symbol, decimals, usd) in [("WETH", 18u8, MOCK_WETH_USD), ("WBTC", 8u8, MOCK_WBTC_USD)] {
                println!("Deploying mock {}...", symbol);
                let token = MockToken::deploy(
                    &env,
                    MockTokenInitArgs {
                        symbol: String::from(symbol),
                        decimals,
                    },
                );
                let feed = MockPriceFeed::deploy(
                    &env,
                    MockPriceFeedInitArgs {
                        decimals: MOCK_FEED_DECIMALS,
                        initial_answer: U256::from(usd) * feed_unit,
                    },
                );
                println!("{} deployed at: {:?}", symbol, token.address().clone());
                println!("{}/USD feed deployed at: {:?}", symbol, feed.address().clone());
                tokens.push(token.address().clone());
                price_feeds.push(feed.address().clone());
            }
            (tokens, price_feeds)
        }
    };

    println!();

    // ==================== Phase 2: Stablecoin and Engine ====================
    println!("=== Phase 2: Stablecoin and Engine ===");
    println!();

    println!("Deploying DecentralizedStableCoin...");
    let mut dsc = DecentralizedStableCoin::deploy(&env, NoArgs);
    let dsc_addr = dsc.address().clone();
    println!("DecentralizedStableCoin deployed at: {:?}", dsc_addr);

    println!("Deploying DscEngine...");
    let engine = DscEngine::deploy(
        &env,
        DscEngineInitArgs {
            token_addresses: tokens.clone(),
            price_feed_addresses: price_feeds.clone(),
            dsc_address: dsc_addr,
        },
    );
    let engine_addr = engine.address().clone();
    println!("DscEngine deployed at: {:?}", engine_addr);

    println!();

    // ==================== Phase 3: Ownership Handover ====================
    println!("=== Phase 3: Ownership Handover ===");
    println!();

    println!("Transferring DSC ownership to DscEngine...");
    dsc.transfer_ownership(engine_addr);
    println!("Done.");

    let record = DeploymentRecord {
        deployer: formatted(deployer),
        dsc: formatted(dsc_addr),
        engine: formatted(engine_addr),
        collateral: tokens
            .iter()
            .zip(price_feeds.iter())
            .map(|(token, feed)| CollateralRecord {
                token: formatted(*token),
                price_feed: formatted(*feed),
            })
            .collect(),
    };
    std::fs::write(&config.record_path, serde_json::to_string_pretty(&record)?)?;

    println!();
    println!("=== Deployment Complete ===");
    println!();
    println!("Contract Addresses:");
    println!("  DecentralizedStableCoin: {:?}", dsc_addr);
    println!("  DscEngine:               {:?}", engine_addr);
    for (token, feed) in tokens.iter().zip(price_feeds.iter()) {
        println!("  Collateral:              {:?} (feed {:?})", token, feed);
    }
    println!();
    println!("Deployment record written to {}", config.record_path);

    Ok(())
}

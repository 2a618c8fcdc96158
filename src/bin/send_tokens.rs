//! Send tokens from a gasless Starknet wallet
//!
//! Validates the request, shows the estimated fee, asks for confirmation and
//! submits an ERC20 `transfer` through the managed-wallet API.
//!
//! Usage:
//!   cargo run --bin send_tokens -- <ETH|STRK|USDC> <TO_ADDRESS> <AMOUNT> [--yes] [--estimate-only]
//!
//! Settings are read from send_config.json (optional). Credentials come from
//! the environment or .env: USER_ID, BEARER_TOKEN, WALLET_PUBLIC_KEY,
//! WALLET_ENCRYPTED_PRIVATE_KEY, GASLESS_API_KEY, ENCRYPT_SALT.

use anyhow::{bail, Context};
use dotenv::dotenv;
use starknet_gasless_send::{
    init_logging, AppConfig, HttpGaslessExecutor, NetworkConfig, SendAssets, StaticIdentity,
    StaticWalletStore, TokenSymbol,
};
use std::env;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

struct Args {
    token: TokenSymbol,
    to_address: String,
    amount: String,
    assume_yes: bool,
    estimate_only: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut positional = Vec::new();
    let mut assume_yes = false;
    let mut estimate_only = false;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--yes" | "-y" => assume_yes = true,
            "--estimate-only" => estimate_only = true,
            flag if flag.starts_with("--") => bail!("Unknown flag: {}", flag),
            _ => positional.push(arg),
        }
    }

    if positional.len() != 3 {
        bail!("Usage: send_tokens <ETH|STRK|USDC> <TO_ADDRESS> <AMOUNT> [--yes] [--estimate-only]");
    }

    let amount = positional.pop().unwrap_or_default().trim().to_string();
    let to_address = positional.pop().unwrap_or_default().trim().to_string();
    let token = positional.pop().unwrap_or_default().parse::<TokenSymbol>()?;

    Ok(Args {
        token,
        to_address,
        amount,
        assume_yes,
        estimate_only,
    })
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    dotenv().ok();

    let args = parse_args()?;
    let config = AppConfig::load("send_config.json").context("Failed to load send_config.json")?;
    let network = NetworkConfig::from_env(config.network);

    let executor = HttpGaslessExecutor::new(
        &config.gasless_base_url,
        env::var("GASLESS_API_KEY").ok(),
        config.request_timeout(),
    )?;
    let mut send = SendAssets::new(
        args.token,
        StaticIdentity::from_env(),
        StaticWalletStore::from_env(),
        executor,
    );

    println!("═══════════════════════════════════════════════════════════");
    println!("   Send {} on {}", args.token, network.network);
    println!("═══════════════════════════════════════════════════════════\n");

    send.validate_amount(&args.amount)?;
    send.validate_address(&args.to_address)?;

    let cost = send.estimate_cost(&args.amount);
    println!("  To:            {}", args.to_address);
    println!("  Amount:        {} {}", args.amount, args.token);
    println!("  Minimum:       {} {}", send.min_amount(), args.token);
    println!("  Estimated fee: {:.6} (sponsored)", cost.estimated_fee);
    println!("  Total:         {:.6}", cost.total_cost);
    println!();

    if args.estimate_only {
        return Ok(());
    }

    if config.require_confirmation && !args.assume_yes && !confirm("Send this transaction?")? {
        warn!("Send cancelled by user");
        return Ok(());
    }

    let receipt = send.send_transaction(&args.to_address, &args.amount, &network).await?;
    info!("{}", receipt);

    println!("✓ {}", receipt);
    if let Some(url) = &receipt.explorer_url {
        println!("  Explorer: {}", url);
    } else if receipt.is_pending() {
        println!("  Transaction submitted; hash not yet available");
    }

    Ok(())
}

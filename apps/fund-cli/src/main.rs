//! stellar-fund - fund a Stellar testnet address with test lumens.
//!
//! ```bash
//! stellar-fund GAAZI4TCR3TY5OJHCTJC2A4QSY6CJWJH5IAJTGKIN2ER7LBNVKOCCWN7
//! stellar-fund CDLZ...CYSC --json
//! ```

use clap::Parser;
use stellar_funding::{AddressKind, FundingConfig, FundingOrchestrator, FundingOutcome};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "stellar-fund", about = "Fund a Stellar testnet account or contract address")]
struct Cli {
    /// Account (G...) or contract (C...) address to fund.
    address: String,

    /// Soroban RPC endpoint used for contract bridging.
    #[arg(long, env = "STELLAR_RPC_URL")]
    rpc_url: Option<String>,

    /// Friendbot endpoint.
    #[arg(long, env = "FRIENDBOT_URL")]
    friendbot_url: Option<String>,

    /// Print the outcome as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stellar_funding=info,stellar_fund=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = FundingConfig::testnet();
    if let Some(url) = cli.rpc_url {
        config = config.with_rpc_url(url);
    }
    if let Some(url) = cli.friendbot_url {
        config = config.with_friendbot_url(url);
    }

    let orchestrator = FundingOrchestrator::from_config(config)?;
    let outcome = orchestrator.fund_address(&cli.address).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        report(orchestrator.config(), &outcome);
    }

    if !outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn report(config: &FundingConfig, outcome: &FundingOutcome) {
    match outcome {
        FundingOutcome::Success { funded_address, .. } => {
            println!("Successfully funded {} on testnet.", funded_address.short());
            for link in explorer_links(config, outcome) {
                println!("  {}", link);
            }
        }
        FundingOutcome::Failure { message, .. } => {
            eprintln!("Error: {}", message);
        }
    }
}

/// Transaction link when a transfer happened, contract link for contracts,
/// account link only for directly funded accounts.
fn explorer_links(config: &FundingConfig, outcome: &FundingOutcome) -> Vec<String> {
    let FundingOutcome::Success { tx_hash, funded_address } = outcome else {
        return Vec::new();
    };

    let mut links = Vec::new();
    if let Some(hash) = tx_hash {
        links.push(config.explorer_tx_url(hash));
    }
    match funded_address.kind() {
        AddressKind::Contract => links.push(config.explorer_contract_url(funded_address.as_str())),
        AddressKind::Account if tx_hash.is_none() => {
            links.push(config.explorer_account_url(funded_address.as_str()))
        }
        AddressKind::Account => {}
    }
    links
}

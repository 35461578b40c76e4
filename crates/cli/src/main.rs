//! Command line front end for Riverr.

mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::Settings;
use dotenv::dotenv;
use riverr_data::providers::{AnthropicProvider, GeckoTerminalProvider, SuiRpcProvider};
use riverr_domain::DEFAULT_INVESTMENT_USD;
use riverr_execution::{
    AggregatorConfig, ChatSession, WalletBalanceAggregator, holdings, wallet_value_cell,
};
use riverr_selection::{PoolRecommender, RecommenderConfig, pool_address_for_style};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "riverr")]
#[command(about = "Explore BTC liquidity on Sui", long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the candidate pools
    Pools,
    /// Recommend a pool for a risk tier
    Recommend {
        /// conservative, moderate or aggressive
        #[arg(short, long)]
        tier: String,

        /// Position size in USD for the earnings estimate
        #[arg(long, default_value_t = DEFAULT_INVESTMENT_USD)]
        investment: Decimal,
    },
    /// Print the deposit pool address for a risk tier
    PoolAddress {
        /// conservative, moderate or aggressive
        #[arg(short, long)]
        tier: Option<String>,
    },
    /// Show a wallet's priced balances
    Wallet {
        /// Wallet address
        #[arg(short, long)]
        address: String,

        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a wallet's WBTC coin objects
    Wbtc {
        /// Wallet address
        #[arg(short, long)]
        address: String,

        /// Check for at least this much WBTC
        #[arg(long)]
        min: Option<Decimal>,
    },
    /// Show trending pools on the network
    Trending {
        #[arg(short, long)]
        page: Option<u32>,
    },
    /// Show recently created pools on the network
    NewPools {
        #[arg(short, long)]
        page: Option<u32>,
    },
    /// Show one pool
    Pool {
        /// Pool address
        address: String,
    },
    /// List the networks the market-data service tracks
    Networks,
    /// Chat with the Riverr assistant
    Chat,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = cli.settings;

    match cli.command {
        Commands::Pools => {
            let recommender = recommender(&settings);
            let pools = recommender.candidate_pools().await?;
            println!("✅ Fetched {} pools:", pools.len());
            output::pools_table(&pools).printstd();
        }
        Commands::Recommend { tier, investment } => {
            let recommender = recommender(&settings);
            match recommender.recommend_for_style(Some(tier.as_str())).await? {
                Some(pool) => {
                    let mut table = output::pool_details(&pool);
                    output::add_earnings_estimate(&mut table, &pool, investment);
                    table.printstd();
                }
                None => println!("❌ No pools available."),
            }
        }
        Commands::PoolAddress { tier } => {
            println!("{}", pool_address_for_style(tier.as_deref()));
        }
        Commands::Wallet { address, json } => {
            let (publisher, _) = wallet_value_cell();
            let aggregator = WalletBalanceAggregator::new(
                Arc::new(SuiRpcProvider::new(settings.sui_rpc())),
                Arc::new(GeckoTerminalProvider::new(settings.gecko_terminal())),
                AggregatorConfig {
                    network: settings.gecko_terminal().network,
                },
                publisher,
            );
            let snapshot = aggregator
                .refresh(&address)
                .await?
                .into_snapshot()
                .context("wallet snapshot was superseded")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else if snapshot.is_empty() {
                println!("No coins held by {address}.");
            } else {
                output::wallet_table(&snapshot).printstd();
            }
        }
        Commands::Wbtc { address, min } => {
            let chain = SuiRpcProvider::new(settings.sui_rpc());
            let holdings = holdings::fetch_wbtc_holdings(&chain, Some(address.as_str())).await?;
            output::holdings_table(&holdings).printstd();

            if let Some(coin) = holdings.largest_coin() {
                println!("Largest coin: {}", coin.coin_object_id);
            }
            if let Some(min) = min {
                if holdings.has_minimum(min) {
                    println!("✅ Holds at least {min} WBTC");
                } else {
                    println!("❌ Holds less than {min} WBTC");
                }
            }
        }
        Commands::Trending { page } => {
            let gecko = GeckoTerminalProvider::new(settings.gecko_terminal());
            let pools = gecko.get_trending_pools(gecko.network(), page).await?;
            output::pools_table(&pools).printstd();
        }
        Commands::NewPools { page } => {
            let gecko = GeckoTerminalProvider::new(settings.gecko_terminal());
            let pools = gecko.get_new_pools(gecko.network(), page).await?;
            output::pools_table(&pools).printstd();
        }
        Commands::Pool { address } => {
            let gecko = GeckoTerminalProvider::new(settings.gecko_terminal());
            let pool = gecko.get_pool(gecko.network(), &address).await?;
            output::pool_details(&pool).printstd();
        }
        Commands::Networks => {
            let gecko = GeckoTerminalProvider::new(settings.gecko_terminal());
            let networks = gecko.get_networks().await?;
            output::networks_table(&networks).printstd();
        }
        Commands::Chat => chat(&settings).await?,
    }

    Ok(())
}

fn recommender(settings: &Settings) -> PoolRecommender {
    let gecko = settings.gecko_terminal();
    let config = RecommenderConfig {
        network: gecko.network.clone(),
        ..RecommenderConfig::default()
    };
    PoolRecommender::new(Arc::new(GeckoTerminalProvider::new(gecko)), config)
}

async fn chat(settings: &Settings) -> Result<()> {
    let provider = AnthropicProvider::new(settings.anthropic()?)?;
    println!("💬 Chatting with {} (empty line or \"exit\" to quit)", provider.model());
    let mut session = ChatSession::new(Arc::new(provider));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() || input.eq_ignore_ascii_case("exit") {
            break;
        }

        let reply = session
            .send(input)
            .await
            .map(|reply| reply.map(|turn| turn.content.clone()));
        match reply {
            Ok(Some(text)) => println!("{text}\n"),
            Ok(None) => {}
            Err(e) => {
                tracing::error!(error = %e, "Chat failed");
                if let Some(apology) = session.history().last() {
                    println!("{}\n", apology.content);
                }
            }
        }
    }
    Ok(())
}

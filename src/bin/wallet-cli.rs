use anyhow::Context;
use aptos_hot_wallet::cli::{Cli, Commands};
use aptos_hot_wallet::core::config::WalletConfig;
use aptos_hot_wallet::core::wallet::{ImportCoordinator, InMemoryWalletState};
use aptos_hot_wallet::monitoring::{ImportMetrics, TracingObserver};
use clap::Parser;
use is_terminal::IsTerminal;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging()?;

    let mut config = WalletConfig::from_env().context("failed to load wallet config")?;

    match cli.command {
        Commands::Networks => {
            for (key, network) in &config.networks {
                println!("{:<10} {:<16} {}", key, network.name, network.node_url);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Import { private_key, network, node_url, timeout_secs, attempts, print_metrics } => {
            if let Some(network) = network {
                config.ledger.network = network;
            }
            if node_url.is_some() {
                config.ledger.node_url = node_url;
            }
            if let Some(secs) = timeout_secs {
                config.ledger.request_timeout_secs = secs;
            }
            if let Some(attempts) = attempts {
                config.ledger.verification_attempts = attempts;
            }
            let endpoint = config.resolve_endpoint()?;

            let raw_key = match private_key {
                Some(key) => Zeroizing::new(key),
                None => read_key_from_stdin().await?,
            };

            let wallet_state = Arc::new(InMemoryWalletState::new());
            let metrics = Arc::new(ImportMetrics::new()?);
            let coordinator = ImportCoordinator::from_config(&config.ledger, wallet_state)?
                .with_observer(Arc::new(TracingObserver))
                .with_observer(metrics.clone());

            let cancel = CancellationToken::new();
            let trigger = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    trigger.cancel();
                }
            });

            let result = coordinator
                .import_by_private_key_with_cancel(raw_key.as_str(), &endpoint, &cancel)
                .await;

            if print_metrics {
                eprint!("{}", metrics.gather_text()?);
            }

            match result {
                Ok(record) => {
                    println!("{}", record.address());
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    eprintln!("{}", err.user_message());
                    Ok(ExitCode::from(if err.is_retryable() { 75 } else { 1 }))
                }
            }
        }
    }
}

/// Read one line from stdin, prompting when attached to a terminal.
async fn read_key_from_stdin() -> anyhow::Result<Zeroizing<String>> {
    if std::io::stdin().is_terminal() {
        eprint!("Private key: ");
        std::io::stderr().flush()?;
    }
    let mut line = Zeroizing::new(String::new());
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("failed to read private key from stdin")?;
    let trimmed = Zeroizing::new(line.trim_end_matches(['\r', '\n']).to_string());
    Ok(trimmed)
}

fn init_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {}", e))?;
    Ok(())
}

use clap::{Parser, Subcommand};

/// Aptos Hot Wallet CLI (library-facing definitions)
#[derive(Debug, Parser)]
#[command(name = "wallet-cli", about = "Aptos Hot Wallet CLI", disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import an existing account by its hex private key
    Import {
        /// Hex private key, with or without 0x. Read from stdin when omitted.
        #[arg(long, env = "WALLET_PRIVATE_KEY", hide_env_values = true)]
        private_key: Option<String>,
        /// Network preset (devnet, testnet, mainnet, local)
        #[arg(long)]
        network: Option<String>,
        /// Explicit node URL, overrides --network
        #[arg(long)]
        node_url: Option<String>,
        /// Per-request ledger timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Ledger round trips allowed on transient failures
        #[arg(long)]
        attempts: Option<u32>,
        /// Print import metrics to stderr when done
        #[arg(long)]
        print_metrics: bool,
    },
    /// List configured networks
    Networks,
}

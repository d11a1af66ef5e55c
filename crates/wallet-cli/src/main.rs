//! dag-wallet — command-line interface for the DAG wallet toolkit.
//!
//! Offline commands (`sign`, `verify`, `address`, `new-wallet`) never
//! touch the network; `balance` and `send` talk to the ledger API for
//! the selected environment.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chain_dag::transaction::TransactionReference;
use dag_network::{DagNetwork, LedgerClient};

/// DAG wallet toolkit command-line interface.
#[derive(Parser)]
#[command(name = "dag-wallet")]
#[command(version, about = "Sign, verify and submit DAG transactions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign a transaction hash, printing the DER signature hex.
    Sign {
        /// Private key in hex (64 characters).
        private_key_hex: String,
        /// Transaction hash from the prepare step.
        tx_hash: String,
    },
    /// Verify a DER signature against a public key and transaction hash.
    Verify {
        /// Public key in hex (128 or 130 characters).
        public_key_hex: String,
        /// Transaction hash the signature covers.
        tx_hash: String,
        /// DER signature in hex.
        signature_hex: String,
    },
    /// Derive the DAG address for a public key.
    Address {
        /// Public key in hex (128 or 130 characters).
        public_key_hex: String,
    },
    /// Generate a new wallet: mnemonic plus key trio.
    NewWallet {
        /// Number of mnemonic words (12 or 24).
        #[arg(long, default_value_t = 12)]
        words: u32,

        /// Mnemonic word-list language.
        #[arg(long, default_value = "english")]
        language: String,
    },
    /// Query the balance of an address.
    Balance {
        address: String,

        /// Network (mainnet, testnet or integrationnet).
        #[arg(short, long, default_value = "mainnet")]
        network: String,
    },
    /// Build, sign and submit a transfer.
    Send {
        /// Private key in hex (64 characters).
        private_key_hex: String,
        /// Destination DAG address.
        to_address: String,
        /// Amount in the smallest denomination (1e8 = 1 DAG).
        amount: u64,

        /// Fee in the smallest denomination.
        #[arg(long, default_value_t = 0)]
        fee: u64,

        /// Network (mainnet, testnet or integrationnet).
        #[arg(short, long, default_value = "mainnet")]
        network: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Argument errors print clap's usage text but exit 1 like every
    // other failure; --help and --version keep their usual exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            use clap::error::ErrorKind;
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                err.exit();
            }
            let _ = err.print();
            std::process::exit(1);
        }
    };

    if let Err(err) = run(cli).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Sign {
            private_key_hex,
            tx_hash,
        } => {
            let signature = wallet_core::sign_transaction_hash(&private_key_hex, &tx_hash)?;
            println!("{signature}");
        }

        Commands::Verify {
            public_key_hex,
            tx_hash,
            signature_hex,
        } => {
            let valid = wallet_core::verify_transaction_signature(
                &public_key_hex,
                &tx_hash,
                &signature_hex,
            )?;
            println!("{valid}");
        }

        Commands::Address { public_key_hex } => {
            let address = wallet_core::get_dag_address_from_public_key(&public_key_hex)?;
            println!("{address}");
        }

        Commands::NewWallet { words, language } => {
            let phrase = wallet_core::generate_mnemonic(words, &language)?;
            let trio = wallet_core::get_key_trio_from_mnemonic(&phrase)?;
            println!("mnemonic:    {phrase}");
            println!("private key: {}", trio.private_key);
            println!("public key:  {}", trio.public_key);
            println!("address:     {}", trio.address);
        }

        Commands::Balance { address, network } => {
            let network: DagNetwork = network.parse()?;
            let client = LedgerClient::new(network);
            let balance = client
                .get_address_balance(&address)
                .await
                .context("fetching balance")?;
            println!(
                "{} DAG (ordinal {})",
                balance.balance as f64 / 1e8,
                balance.ordinal
            );
        }

        Commands::Send {
            private_key_hex,
            to_address,
            amount,
            fee,
            network,
        } => {
            let network: DagNetwork = network.parse()?;
            let client = LedgerClient::new(network);
            let trio = wallet_core::get_key_trio_from_private_key(&private_key_hex)?;

            let last_ref: TransactionReference = client
                .get_last_reference(&trio.address)
                .await
                .context("fetching last transaction reference")?;
            tracing::info!(ordinal = last_ref.ordinal, "building on last reference");

            let (signed, hash) =
                wallet_core::generate_signed_transaction(&trio, &to_address, amount, fee, last_ref)?;

            let accepted = client
                .post_transaction(&signed)
                .await
                .context("submitting transaction")?;
            println!("{}", accepted.hash);
            if accepted.hash != hash {
                tracing::warn!(local = %hash, remote = %accepted.hash, "ledger reported a different hash");
            }
        }
    }

    Ok(())
}

//! Async client for the DAG ledger HTTP API.
//!
//! The signing core never touches the network; this crate is the thin
//! collaborator that fetches the data a transfer needs (last transaction
//! reference, balance) and submits the finished signed transaction. All
//! calls are plain HTTPS requests against the network's load-balanced
//! L0/L1 endpoints.

pub mod client;
pub mod error;
pub mod models;

pub use client::{DagNetwork, LedgerClient};
pub use error::NetworkError;
pub use models::{Balance, PendingTransaction, PostTransactionResponse, TotalSupply};

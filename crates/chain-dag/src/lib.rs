//! Constellation (DAG) chain support for the wallet.
//!
//! This crate provides:
//! - DAG address derivation from secp256k1 public keys (with check digit)
//! - Canonical v2 transaction encoding (the Kryo-compatible wire form the
//!   ledger hashes before signing)
//! - Deterministic ECDSA signing and verification (RFC 6979, low-S, DER)
//! - Multi-proof signed transaction assembly

pub mod address;
pub mod error;
pub mod kryo;
pub mod signing;
pub mod transaction;

// Re-export key public types for ergonomic imports.
pub use address::{address_from_public_key, validate_address};
pub use error::DagError;
pub use signing::{sign, signing_digest, verify};
pub use transaction::{
    build_transfer, DagTransaction, Proof, SignedTransaction, TransactionReference,
    TransactionValue, MIN_SALT,
};

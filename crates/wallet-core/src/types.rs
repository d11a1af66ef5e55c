use serde::{Deserialize, Serialize};

/// Coin networks the HD wallet derives keys for.
///
/// The DAG network shares its secp256k1 curve with Ethereum, so a single
/// seed serves both coin types; they differ only in the BIP-44 path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyringNetwork {
    Constellation,
    Ethereum,
    /// Ethereum derivation as performed by Ledger hardware wallets,
    /// which append the account index directly under `m/44'/60'`.
    EthereumLedger,
}

impl KeyringNetwork {
    /// BIP-44 coin type for this network.
    pub fn coin_type(&self) -> u32 {
        match self {
            KeyringNetwork::Constellation => 1137,
            KeyringNetwork::Ethereum | KeyringNetwork::EthereumLedger => 60,
        }
    }
}

/// Private key, public key and address bundle for one wallet session.
/// Held in memory only; nothing here is ever persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyTrio {
    /// Private key hex (64 characters).
    pub private_key: String,
    /// Uncompressed public key hex with `04` prefix (130 characters).
    pub public_key: String,
    /// DAG address.
    pub address: String,
}

/// Derived DAG address together with the path that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedAddress {
    pub address: String,
    pub derivation_path: String,
}

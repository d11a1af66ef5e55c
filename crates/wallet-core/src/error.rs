use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Unsupported word count: {0} (supported: 12 or 24)")]
    InvalidWordCount(u32),

    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Private key required for hardened derivation of index {0}")]
    PrivateKeyRequired(u32),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error(transparent)]
    Chain(#[from] chain_dag::error::DagError),
}

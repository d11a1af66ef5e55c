use thiserror::Error;

/// DAG chain operation errors.
#[derive(Debug, Error)]
pub enum DagError {
    #[error("invalid private key length: expected 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    #[error("invalid signing digest length: expected at least 32 bytes, got {0}")]
    InvalidDigestLength(usize),

    #[error("invalid public key: {0}")]
    InvalidPublicKeyFormat(String),

    #[error("salt {0} is below the minimum {min}", min = crate::transaction::MIN_SALT)]
    SaltBelowMinimum(u64),

    #[error("an address cannot send a transaction to itself")]
    SelfTransfer,

    #[error("send amount must be at least one unit")]
    AmountTooSmall,

    #[error("malformed DER signature: {0}")]
    MalformedSignature(String),

    #[error("transaction carries no proofs")]
    NoProofsAttached,

    #[error("signing error: {0}")]
    SigningFailed(String),
}

use serde::{Deserialize, Serialize};

use chain_dag::transaction::SignedTransaction;

/// Balance of an address as reported by the L0 API, together with the
/// snapshot ordinal it was observed at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub balance: u64,
    pub ordinal: u64,
}

/// A transaction sitting in the L1 waiting room: the submitted envelope
/// plus its hash and queue status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub transaction: SignedTransaction,
    pub hash: String,
    pub status: String,
}

/// Response to a successful transaction submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTransactionResponse {
    pub hash: String,
}

/// Circulating supply at a snapshot ordinal (L0 `/total-supply`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalSupply {
    pub ordinal: u64,
    pub total: u64,
}

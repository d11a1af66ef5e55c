//! Core keystore for the DAG wallet.
//!
//! Stateless facade over the mnemonic, HD-derivation and chain crates:
//! every function is a pure transformation of its explicit inputs, so the
//! whole signing pipeline — mnemonic -> key trio -> prepare -> sign ->
//! verify -> assemble — lives behind a handful of free functions. Nothing
//! here performs I/O or keeps key material beyond the call.

pub mod address;
pub mod error;
pub mod hd_derivation;
pub mod mnemonic;
pub mod types;

use chain_dag::error::DagError;
use chain_dag::transaction::{
    build_transfer, DagTransaction, Proof, SignedTransaction, TransactionReference,
};
use zeroize::Zeroize;

use error::WalletError;
use types::{KeyTrio, KeyringNetwork};

/// A prepared (encoded and hashed, not yet signed) transaction.
pub struct PreparedTransaction {
    pub transaction: DagTransaction,
    /// SHA-256 hex over the Kryo-framed canonical encoding; `sign`
    /// expands it with SHA-512 before the ECDSA step.
    pub hash: String,
    /// The canonical encoding itself, kept for diagnostics.
    pub encoded: String,
}

/// Generate a new BIP-39 mnemonic.
///
/// `words` must be 12 or 24; `language` is a word-list tag such as
/// "english" or "chinese_simplified".
pub fn generate_mnemonic(words: u32, language: &str) -> Result<String, WalletError> {
    let language = mnemonic::parse_language(language)?;
    mnemonic::generate_mnemonic(words, language)
}

/// Validate a mnemonic phrase against the supported word lists.
pub fn validate_mnemonic(phrase: &str) -> bool {
    mnemonic::validate_mnemonic(phrase)
}

/// Derive seed bytes from mnemonic + passphrase.
pub fn mnemonic_to_seed(phrase: &str, passphrase: &str) -> Result<Vec<u8>, WalletError> {
    mnemonic::mnemonic_to_seed(phrase, passphrase)
}

/// Derive the DAG private key (m/44'/1137'/0'/0/0) from a mnemonic.
pub fn get_private_key_from_mnemonic(phrase: &str) -> Result<String, WalletError> {
    let mut seed = mnemonic::mnemonic_to_seed(phrase, "")?;
    let key = hd_derivation::derive_secp256k1_key(&seed, KeyringNetwork::Constellation, 0);
    seed.zeroize();
    Ok(hex::encode(key?.private_key))
}

/// Derive the uncompressed public key (130 hex characters, `04` prefix)
/// from a private key hex.
pub fn get_public_key_from_private_key(private_key_hex: &str) -> Result<String, WalletError> {
    let mut key_bytes = hex::decode(private_key_hex)
        .map_err(|e| WalletError::InvalidPrivateKey(format!("invalid hex: {e}")))?;
    let public_key = chain_dag::signing::public_key_from_private(&key_bytes);
    key_bytes.zeroize();
    Ok(hex::encode(public_key?))
}

/// Derive the DAG address for a public key hex (128 or 130 characters).
pub fn get_dag_address_from_public_key(public_key_hex: &str) -> Result<String, WalletError> {
    Ok(chain_dag::address::address_from_public_key(public_key_hex)?)
}

/// Bundle a private key with its public key and DAG address.
pub fn get_key_trio_from_private_key(private_key_hex: &str) -> Result<KeyTrio, WalletError> {
    let public_key = get_public_key_from_private_key(private_key_hex)?;
    let address = get_dag_address_from_public_key(&public_key)?;
    Ok(KeyTrio {
        private_key: private_key_hex.to_string(),
        public_key,
        address,
    })
}

/// Derive the full key trio for a mnemonic's first DAG account.
pub fn get_key_trio_from_mnemonic(phrase: &str) -> Result<KeyTrio, WalletError> {
    let private_key = get_private_key_from_mnemonic(phrase)?;
    get_key_trio_from_private_key(&private_key)
}

/// Build a transfer and compute its hash, ready for signing.
///
/// `amount` and `fee` are integers in the smallest denomination
/// (1e-8 DAG). Self-sends and zero amounts are rejected.
pub fn prepare_transaction(
    amount: u64,
    to_address: &str,
    from_address: &str,
    last_ref: TransactionReference,
    fee: u64,
) -> Result<PreparedTransaction, WalletError> {
    let transaction = build_transfer(from_address, to_address, amount, fee, last_ref, None)?;
    let hash = transaction.hash();
    let encoded = transaction.encode();
    Ok(PreparedTransaction {
        transaction,
        hash,
        encoded,
    })
}

/// Sign a transaction hash, returning the DER signature hex.
pub fn sign_transaction_hash(
    private_key_hex: &str,
    tx_hash: &str,
) -> Result<String, WalletError> {
    let mut key_bytes = hex::decode(private_key_hex)
        .map_err(|e| WalletError::InvalidPrivateKey(format!("invalid hex: {e}")))?;
    let signature = chain_dag::signing::sign(&key_bytes, tx_hash);
    key_bytes.zeroize();
    Ok(signature?)
}

/// Verify a DER signature hex against a public key hex and transaction
/// hash. Cryptographic mismatch is `Ok(false)`; only structural problems
/// (bad hex, undecodable DER, malformed key) are errors.
pub fn verify_transaction_signature(
    public_key_hex: &str,
    tx_hash: &str,
    signature_hex: &str,
) -> Result<bool, WalletError> {
    let key_bytes = decode_public_key(public_key_hex)?;
    Ok(chain_dag::signing::verify(&key_bytes, tx_hash, signature_hex)?)
}

/// Prepare, sign, self-verify and assemble a transfer in one step.
///
/// Returns the submission envelope plus the transaction hash. A failed
/// self-verification aborts rather than producing an unpostable payload.
pub fn generate_signed_transaction(
    key_trio: &KeyTrio,
    to_address: &str,
    amount: u64,
    fee: u64,
    last_ref: TransactionReference,
) -> Result<(SignedTransaction, String), WalletError> {
    let prepared = prepare_transaction(amount, to_address, &key_trio.address, last_ref, fee)?;
    let signature = sign_transaction_hash(&key_trio.private_key, &prepared.hash)?;

    if !verify_transaction_signature(&key_trio.public_key, &prepared.hash, &signature)? {
        return Err(WalletError::SigningFailed(
            "signature failed self-verification".into(),
        ));
    }

    let mut transaction = prepared.transaction;
    transaction.add_proof(Proof {
        id: proof_id(&key_trio.public_key)?,
        signature,
    });

    Ok((transaction.into_signed()?, prepared.hash))
}

/// The proof `id` is the uncompressed public key hex without its `04`
/// prefix (128 characters).
fn proof_id(public_key_hex: &str) -> Result<String, WalletError> {
    match public_key_hex.len() {
        130 if public_key_hex.starts_with("04") => Ok(public_key_hex[2..].to_string()),
        128 => Ok(public_key_hex.to_string()),
        other => Err(WalletError::InvalidPublicKey(format!(
            "expected 128 or 130 hex characters, got {other}"
        ))),
    }
}

/// Decode a public key hex into SEC1 bytes, tolerating the raw
/// 128-character uncompressed form used by proofs.
fn decode_public_key(public_key_hex: &str) -> Result<Vec<u8>, WalletError> {
    let normalized = if public_key_hex.len() == 128 {
        format!("04{public_key_hex}")
    } else {
        public_key_hex.to_string()
    };
    hex::decode(&normalized)
        .map_err(|e| WalletError::Chain(DagError::InvalidPublicKeyFormat(format!(
            "invalid hex: {e}"
        ))))
}

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::DagError;
use crate::kryo;

/// Minimum transaction salt (1e8). Salts are randomized above this floor
/// so two otherwise-identical transfers never hash alike.
pub const MIN_SALT: u64 = 100_000_000;

/// Every v2 transaction references two parent blocks on the DAG.
const PARENT_COUNT: &str = "2";

/// Pointer to the last transaction accepted for an address: the hash of
/// that transaction plus the address's monotonically increasing ordinal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReference {
    #[serde(alias = "prevHash")]
    pub hash: String,
    pub ordinal: u64,
}

/// The signable value of a transfer. Amount and fee are integers in the
/// smallest denomination (1e-8 DAG).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionValue {
    pub source: String,
    pub destination: String,
    pub amount: u64,
    pub fee: u64,
    pub parent: TransactionReference,
    pub salt: u64,
}

/// A signature proof authorizing a transaction.
///
/// `id` is the uncompressed public key hex without its `04` prefix
/// (128 characters); `signature` is the DER-encoded ECDSA signature hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    pub id: String,
    pub signature: String,
}

/// The submission envelope posted to the ledger API: the transaction
/// value plus one or more proofs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub value: TransactionValue,
    pub proofs: Vec<Proof>,
}

/// A v2 transfer transaction accumulating signature proofs.
#[derive(Debug, Clone)]
pub struct DagTransaction {
    value: TransactionValue,
    proofs: Vec<Proof>,
}

/// Build an unsigned transfer transaction.
///
/// When `salt` is `None` a fresh salt is drawn as `MIN_SALT` plus 48
/// random bits; an explicit salt below `MIN_SALT` is rejected.
pub fn build_transfer(
    source: &str,
    destination: &str,
    amount: u64,
    fee: u64,
    parent: TransactionReference,
    salt: Option<u64>,
) -> Result<DagTransaction, DagError> {
    if source == destination {
        return Err(DagError::SelfTransfer);
    }
    if amount == 0 {
        return Err(DagError::AmountTooSmall);
    }

    let salt = match salt {
        Some(salt) if salt < MIN_SALT => return Err(DagError::SaltBelowMinimum(salt)),
        Some(salt) => salt,
        None => generate_salt(),
    };

    Ok(DagTransaction {
        value: TransactionValue {
            source: source.to_string(),
            destination: destination.to_string(),
            amount,
            fee,
            parent,
            salt,
        },
        proofs: Vec::new(),
    })
}

/// Draw a fresh salt: `MIN_SALT` plus 48 bits from the OS RNG.
fn generate_salt() -> u64 {
    MIN_SALT + (rand::rngs::OsRng.next_u64() & 0xFFFF_FFFF_FFFF)
}

impl DagTransaction {
    pub fn value(&self) -> &TransactionValue {
        &self.value
    }

    pub fn proofs(&self) -> &[Proof] {
        &self.proofs
    }

    /// Produce the canonical run-length encoding the ledger hashes.
    ///
    /// Fields are emitted in a fixed order, each prefixed with its UTF-8
    /// byte length in decimal: the parent count, source, destination,
    /// amount as lowercase hex, parent hash, parent ordinal in decimal,
    /// fee in decimal, salt as lowercase hex. Identical values always
    /// produce identical output.
    pub fn encode(&self) -> String {
        let amount = format!("{:x}", self.value.amount);
        let ordinal = self.value.parent.ordinal.to_string();
        let fee = self.value.fee.to_string();
        let salt = format!("{:x}", self.value.salt);

        let fields = [
            self.value.source.as_str(),
            self.value.destination.as_str(),
            amount.as_str(),
            self.value.parent.hash.as_str(),
            ordinal.as_str(),
            fee.as_str(),
            salt.as_str(),
        ];

        let mut out = String::from(PARENT_COUNT);
        for field in fields {
            out.push_str(&field.len().to_string());
            out.push_str(field);
        }
        out
    }

    /// The transaction hash: lowercase SHA-256 hex over the Kryo-framed
    /// canonical encoding. This is the value reported back by the ledger
    /// and the input to the signing digest.
    pub fn hash(&self) -> String {
        let serialized = kryo::serialize(&self.encode(), false);
        hex::encode(Sha256::digest(&serialized))
    }

    /// Attach a signature proof. Proofs keep insertion order so repeated
    /// assembly of the same inputs is byte-identical.
    pub fn add_proof(&mut self, proof: Proof) {
        self.proofs.push(proof);
    }

    /// Finalize into the submission envelope. At least one proof must be
    /// attached.
    pub fn into_signed(self) -> Result<SignedTransaction, DagError> {
        if self.proofs.is_empty() {
            return Err(DagError::NoProofsAttached);
        }
        Ok(SignedTransaction {
            value: self.value,
            proofs: self.proofs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "DAG0zJW14beJtZX2BY2KA9gLbpaZ8x6vgX4KVPVX";
    const DESTINATION: &str = "DAG77VVVRvdZiYxZ2hCtkHz68h85ApT5b2xzdTkn";
    const PARENT_HASH: &str = "4cdd7e13e4b4e25f78e60b0e8756b84dfbe4514261f2d3db3d60bfbfcb82a11c";

    fn fixture_tx() -> DagTransaction {
        build_transfer(
            SOURCE,
            DESTINATION,
            100_000_000,
            0,
            TransactionReference {
                hash: PARENT_HASH.into(),
                ordinal: 586,
            },
            Some(0x123_4567_89ab),
        )
        .unwrap()
    }

    #[test]
    fn encode_matches_reference_vector() {
        // Hand-assembled from the wire rules: parent count, then each
        // field prefixed with its decimal byte length. Amount 1e8 is hex
        // "5f5e100", ordinal and fee are decimal, salt is hex.
        let expected = format!(
            "240{SOURCE}40{DESTINATION}75f5e10064{PARENT_HASH}358610{}{}",
            11, "123456789ab"
        );
        assert_eq!(fixture_tx().encode(), expected);
    }

    #[test]
    fn encode_is_deterministic() {
        assert_eq!(fixture_tx().encode(), fixture_tx().encode());
    }

    #[test]
    fn hash_is_sha256_over_kryo_framing() {
        use sha2::{Digest, Sha256};

        let tx = fixture_tx();
        let encoded = tx.encode();
        assert_eq!(encoded.len(), 178);

        // Kryo framing: string marker, two-byte varint of 178 + 1.
        let serialized = kryo::serialize(&encoded, false);
        assert_eq!(&serialized[..3], &[0x03, 0xF3, 0x02]);
        assert_eq!(&serialized[3..], encoded.as_bytes());

        assert_eq!(tx.hash(), hex::encode(Sha256::digest(&serialized)));
        assert_eq!(tx.hash().len(), 64);
    }

    #[test]
    fn fresh_salt_is_at_least_minimum() {
        let tx = build_transfer(
            SOURCE,
            DESTINATION,
            1,
            0,
            TransactionReference {
                hash: PARENT_HASH.into(),
                ordinal: 0,
            },
            None,
        )
        .unwrap();
        assert!(tx.value().salt >= MIN_SALT);
    }

    #[test]
    fn explicit_salt_below_minimum_rejected() {
        let result = build_transfer(
            SOURCE,
            DESTINATION,
            1,
            0,
            TransactionReference {
                hash: PARENT_HASH.into(),
                ordinal: 0,
            },
            Some(MIN_SALT - 1),
        );
        assert!(matches!(result, Err(DagError::SaltBelowMinimum(_))));
    }

    #[test]
    fn self_transfer_rejected() {
        let result = build_transfer(
            SOURCE,
            SOURCE,
            1,
            0,
            TransactionReference {
                hash: PARENT_HASH.into(),
                ordinal: 0,
            },
            None,
        );
        assert!(matches!(result, Err(DagError::SelfTransfer)));
    }

    #[test]
    fn zero_amount_rejected() {
        let result = build_transfer(
            SOURCE,
            DESTINATION,
            0,
            0,
            TransactionReference {
                hash: PARENT_HASH.into(),
                ordinal: 0,
            },
            None,
        );
        assert!(matches!(result, Err(DagError::AmountTooSmall)));
    }

    #[test]
    fn proofs_keep_insertion_order() {
        let mut tx = fixture_tx();
        tx.add_proof(Proof {
            id: "aa".repeat(64),
            signature: "3044...01".into(),
        });
        tx.add_proof(Proof {
            id: "bb".repeat(64),
            signature: "3044...02".into(),
        });

        let signed = tx.into_signed().unwrap();
        assert_eq!(signed.proofs.len(), 2);
        assert!(signed.proofs[0].id.starts_with("aa"));
        assert!(signed.proofs[1].id.starts_with("bb"));
    }

    #[test]
    fn no_proofs_rejected() {
        let result = fixture_tx().into_signed();
        assert!(matches!(result, Err(DagError::NoProofsAttached)));
    }

    #[test]
    fn signed_envelope_json_shape() {
        let mut tx = fixture_tx();
        tx.add_proof(Proof {
            id: "ab".repeat(64),
            signature: "3045022100aa".into(),
        });
        let signed = tx.into_signed().unwrap();

        let json = serde_json::to_value(&signed).unwrap();
        assert_eq!(json["value"]["source"], SOURCE);
        assert_eq!(json["value"]["destination"], DESTINATION);
        assert_eq!(json["value"]["amount"], 100_000_000u64);
        assert_eq!(json["value"]["fee"], 0);
        assert_eq!(json["value"]["parent"]["hash"], PARENT_HASH);
        assert_eq!(json["value"]["parent"]["ordinal"], 586);
        assert_eq!(json["value"]["salt"], 0x123_4567_89abu64);
        assert_eq!(json["proofs"][0]["signature"], "3045022100aa");
    }

    #[test]
    fn reference_accepts_prev_hash_alias() {
        let parsed: TransactionReference =
            serde_json::from_str(&format!(r#"{{"prevHash":"{PARENT_HASH}","ordinal":9}}"#))
                .unwrap();
        assert_eq!(parsed.hash, PARENT_HASH);
        assert_eq!(parsed.ordinal, 9);
    }
}

//! DAG address derivation and validation.
//!
//! A DAG address is derived from the SHA-256 of the public key's DER
//! (SPKI) encoding: the 32 digest bytes are Base58-encoded, the last 36
//! characters are kept, and a mod-9 check digit over the decimal digits
//! of that tail is inserted after the `DAG` prefix.

use sha2::{Digest, Sha256};

use crate::error::DagError;

/// DER SubjectPublicKeyInfo header for a secp256k1 public key, minus the
/// final `04` byte that belongs to the uncompressed point itself.
pub const PKCS_PREFIX: &str = "3056301006072a8648ce3d020106052b8104000a034200";

/// The Base58 alphabet used by the address body (Bitcoin alphabet).
const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Derive a DAG address from an uncompressed secp256k1 public key hex.
///
/// Accepts either the raw 128-character x || y form or the 130-character
/// SEC1 form starting with `04`.
pub fn address_from_public_key(public_key_hex: &str) -> Result<String, DagError> {
    let spki_hex = match public_key_hex.len() {
        128 => format!("{PKCS_PREFIX}04{public_key_hex}"),
        130 if public_key_hex.starts_with("04") => format!("{PKCS_PREFIX}{public_key_hex}"),
        _ => {
            return Err(DagError::InvalidPublicKeyFormat(format!(
                "expected 128 or 130 hex characters, got {}",
                public_key_hex.len()
            )))
        }
    };

    let spki = hex::decode(&spki_hex)
        .map_err(|e| DagError::InvalidPublicKeyFormat(format!("invalid hex: {e}")))?;

    let digest = Sha256::digest(&spki);
    let encoded = bs58::encode(&digest).into_string();
    let tail = &encoded[encoded.len() - 36..];

    // Fold the decimal digits of the tail into a single mod-9 check digit.
    let mut check_digit = 0u32;
    for c in tail.chars().filter(|c| c.is_ascii_digit()) {
        check_digit += c.to_digit(10).unwrap_or(0);
        if check_digit >= 9 {
            check_digit %= 9;
        }
    }

    Ok(format!("DAG{check_digit}{tail}"))
}

/// Validate a DAG address string: `DAG` prefix, one check digit, and a
/// 36-character Base58 body, 40 characters in total.
pub fn validate_address(address: &str) -> bool {
    if address.len() != 40 || !address.starts_with("DAG") {
        return false;
    }

    let Some(parity) = address.chars().nth(3) else {
        return false;
    };
    if !parity.is_ascii_digit() {
        return false;
    }

    address[4..].chars().all(|c| BASE58_ALPHABET.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Known key pair: m/44'/1137'/0'/0/0 for the mnemonic "multiply
    /// angle perfect verify behind sibling skirt attract first lift
    /// remove fortune".
    const PUBLIC_KEY: &str = "044462191fb1056699c28607c7e8e03b73602fa070b78cad863b5f84d08a577d5d0399ccd90ba1e69f34382d678216d4b2a030d98e38c0c960447dc49514f92ad7";
    const ADDRESS: &str = "DAG0zJW14beJtZX2BY2KA9gLbpaZ8x6vgX4KVPVX";

    #[test]
    fn known_public_key_derives_reference_address() {
        let address = address_from_public_key(PUBLIC_KEY).unwrap();
        assert_eq!(address, ADDRESS);
    }

    #[test]
    fn raw_form_without_prefix_derives_same_address() {
        let address = address_from_public_key(&PUBLIC_KEY[2..]).unwrap();
        assert_eq!(address, ADDRESS);
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = address_from_public_key(PUBLIC_KEY).unwrap();
        let b = address_from_public_key(PUBLIC_KEY).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn wrong_length_rejected() {
        let result = address_from_public_key("04deadbeef");
        assert!(matches!(result, Err(DagError::InvalidPublicKeyFormat(_))));
    }

    #[test]
    fn wrong_prefix_rejected() {
        // 130 characters but not starting with 04.
        let key = format!("03{}", &PUBLIC_KEY[2..]);
        let result = address_from_public_key(&key);
        assert!(matches!(result, Err(DagError::InvalidPublicKeyFormat(_))));
    }

    #[test]
    fn non_hex_rejected() {
        let key = format!("zz{}", &PUBLIC_KEY[2..]);
        let result = address_from_public_key(&key);
        assert!(matches!(result, Err(DagError::InvalidPublicKeyFormat(_))));
    }

    #[test]
    fn validate_reference_address() {
        assert!(validate_address(ADDRESS));
    }

    #[test]
    fn validate_rejects_wrong_prefix() {
        assert!(!validate_address("DOG0zJW14beJtZX2BY2KA9gLbpaZ8x6vgX4KVPVX"));
    }

    #[test]
    fn validate_rejects_wrong_length() {
        assert!(!validate_address("DAG0zJW14beJtZX2BY2KA9gLbpaZ8x6vgX4KVPV"));
        assert!(!validate_address(""));
    }

    #[test]
    fn validate_rejects_non_digit_parity() {
        assert!(!validate_address("DAGxzJW14beJtZX2BY2KA9gLbpaZ8x6vgX4KVPVX"));
    }

    #[test]
    fn validate_rejects_non_base58_body() {
        // '0', 'O', 'I' and 'l' are outside the Base58 alphabet.
        assert!(!validate_address("DAG0zJW14beJtZX2BY2KA9gLbpaZ8x6vgX4KVP0O"));
    }
}

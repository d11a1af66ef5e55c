use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use sha2::{Digest, Sha512};
use zeroize::Zeroize;

use crate::error::DagError;

/// Compute the signing digest for a transaction hash: SHA-512 over the
/// UTF-8 bytes of the hash hex string. The ECDSA prehash is the first
/// 32 bytes of this digest.
pub fn signing_digest(tx_hash: &str) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(Sha512::digest(tx_hash.as_bytes()).as_slice());
    out
}

/// Sign a transaction hash, returning the DER signature as lowercase hex.
///
/// The hash is run through [`signing_digest`] first; signing itself is
/// deterministic (RFC 6979 nonces), so equal inputs always produce the
/// identical signature.
pub fn sign(private_key: &[u8], tx_hash: &str) -> Result<String, DagError> {
    let digest = signing_digest(tx_hash);
    Ok(hex::encode(sign_digest(private_key, &digest)?))
}

/// Sign a precomputed digest with deterministic ECDSA over secp256k1.
///
/// Only the first 32 bytes of the digest are signed (the ledger signs the
/// truncated SHA-512 output). The signature is normalized to low-S before
/// DER encoding so exactly one canonical form is ever produced.
pub fn sign_digest(private_key: &[u8], digest: &[u8]) -> Result<Vec<u8>, DagError> {
    if private_key.len() != 32 {
        return Err(DagError::InvalidKeyLength(private_key.len()));
    }
    if digest.len() < 32 {
        return Err(DagError::InvalidDigestLength(digest.len()));
    }

    let mut key_bytes = [0u8; 32];
    key_bytes.copy_from_slice(private_key);
    let signing_key = SigningKey::from_bytes((&key_bytes).into())
        .map_err(|e| DagError::SigningFailed(e.to_string()))?;
    key_bytes.zeroize();

    let signature: Signature = signing_key
        .sign_prehash(&digest[..32])
        .map_err(|e| DagError::SigningFailed(e.to_string()))?;

    // Low-S normalization: s > n/2 is replaced with n - s.
    let signature = signature.normalize_s().unwrap_or(signature);

    Ok(signature.to_der().as_bytes().to_vec())
}

/// Verify a hex DER signature against a public key and transaction hash.
///
/// A structurally valid signature that does not match returns `Ok(false)`;
/// only an undecodable DER structure is an error.
pub fn verify(public_key: &[u8], tx_hash: &str, signature_hex: &str) -> Result<bool, DagError> {
    let der = hex::decode(signature_hex)
        .map_err(|e| DagError::MalformedSignature(format!("invalid hex: {e}")))?;
    verify_digest(public_key, &signing_digest(tx_hash), &der)
}

/// Verify a DER signature against a public key and precomputed digest.
///
/// The public key may be SEC1 compressed (33 bytes) or uncompressed
/// (65 bytes). High-S signatures are normalized before checking, matching
/// the verifier the ledger network runs.
pub fn verify_digest(public_key: &[u8], digest: &[u8], der: &[u8]) -> Result<bool, DagError> {
    if public_key.len() != 33 && public_key.len() != 65 {
        return Err(DagError::InvalidPublicKeyFormat(format!(
            "expected 33 or 65 bytes, got {}",
            public_key.len()
        )));
    }
    if digest.len() < 32 {
        return Err(DagError::InvalidDigestLength(digest.len()));
    }

    let verifying_key = VerifyingKey::from_sec1_bytes(public_key)
        .map_err(|e| DagError::InvalidPublicKeyFormat(e.to_string()))?;

    let signature = Signature::from_der(der)
        .map_err(|e| DagError::MalformedSignature(e.to_string()))?;
    let signature = signature.normalize_s().unwrap_or(signature);

    Ok(verifying_key.verify_prehash(&digest[..32], &signature).is_ok())
}

/// Derive the uncompressed public key (65 bytes, `0x04` prefix) for a
/// 32-byte private key.
pub fn public_key_from_private(private_key: &[u8]) -> Result<[u8; 65], DagError> {
    if private_key.len() != 32 {
        return Err(DagError::InvalidKeyLength(private_key.len()));
    }

    let mut key_bytes = [0u8; 32];
    key_bytes.copy_from_slice(private_key);
    let signing_key = SigningKey::from_bytes((&key_bytes).into())
        .map_err(|e| DagError::SigningFailed(e.to_string()))?;
    key_bytes.zeroize();

    let point = signing_key.verifying_key().to_encoded_point(false);
    let mut out = [0u8; 65];
    out.copy_from_slice(point.as_bytes());
    Ok(out)
}

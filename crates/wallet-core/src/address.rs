use crate::error::WalletError;
use crate::hd_derivation;
use crate::types::{DerivedAddress, KeyringNetwork};

/// Derive the DAG address for an account index from seed bytes
pub fn derive_address(seed: &[u8], index: u32) -> Result<DerivedAddress, WalletError> {
    let key = hd_derivation::derive_secp256k1_key(seed, KeyringNetwork::Constellation, index)?;

    let address =
        chain_dag::address::address_from_public_key(&hex::encode(key.public_key_uncompressed))?;

    Ok(DerivedAddress {
        address,
        derivation_path: key.derivation_path.clone(),
    })
}

/// Validate a DAG address string
pub fn validate_address(address: &str) -> bool {
    chain_dag::address::validate_address(address)
}

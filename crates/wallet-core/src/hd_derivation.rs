use bip32::{ChildNumber, DerivationPath, XPrv, XPub};
use k256::ecdsa::SigningKey;
use zeroize::Zeroize;

use crate::error::WalletError;
use crate::types::KeyringNetwork;

/// BIP-44 derivation path: m/purpose'/coin_type'/account'/change/address_index
///
/// - DAG: m/44'/1137'/0'/0/{index}  (constellation coin type 1137)
/// - ETH: m/44'/60'/0'/0/{index}    (BIP-44 standard)
/// - ETH (Ledger): m/44'/60'/{index}  (Ledger Live legacy scheme)
fn derivation_path_for_network(network: KeyringNetwork, index: u32) -> String {
    match network {
        KeyringNetwork::Constellation => format!("m/44'/1137'/0'/0/{index}"),
        KeyringNetwork::Ethereum => format!("m/44'/60'/0'/0/{index}"),
        KeyringNetwork::EthereumLedger => format!("m/44'/60'/{index}"),
    }
}

/// Derive a secp256k1 key from seed using BIP-32
pub fn derive_secp256k1_key(
    seed: &[u8],
    network: KeyringNetwork,
    index: u32,
) -> Result<DerivedKey, WalletError> {
    let path_str = derivation_path_for_network(network, index);

    let path: DerivationPath = path_str
        .parse()
        .map_err(|e: bip32::Error| WalletError::DerivationFailed(e.to_string()))?;

    let xprv = XPrv::derive_from_path(seed, &path)
        .map_err(|e| WalletError::DerivationFailed(e.to_string()))?;

    let private_key_bytes: [u8; 32] = xprv.to_bytes().into();
    let signing_key = SigningKey::from_bytes(&private_key_bytes.into())
        .map_err(|e| WalletError::DerivationFailed(e.to_string()))?;

    let verifying_key = signing_key.verifying_key();
    let public_key_compressed: [u8; 33] = verifying_key
        .to_sec1_bytes()
        .as_ref()
        .try_into()
        .map_err(|_| WalletError::DerivationFailed("Invalid public key length".into()))?;

    let public_key_uncompressed: [u8; 65] = verifying_key
        .to_encoded_point(false)
        .as_bytes()
        .try_into()
        .map_err(|_| WalletError::DerivationFailed("Invalid uncompressed public key".into()))?;

    Ok(DerivedKey {
        private_key: private_key_bytes,
        public_key_compressed,
        public_key_uncompressed,
        derivation_path: path_str,
    })
}

/// The HD root key for a seed.
pub fn root_xprv(seed: &[u8]) -> Result<XPrv, WalletError> {
    XPrv::new(seed).map_err(|e| WalletError::DerivationFailed(e.to_string()))
}

/// Derive an extended private key at an arbitrary BIP-32 path.
pub fn derive_xprv(seed: &[u8], path: &str) -> Result<XPrv, WalletError> {
    let path: DerivationPath = path
        .parse()
        .map_err(|e: bip32::Error| WalletError::DerivationFailed(e.to_string()))?;
    XPrv::derive_from_path(seed, &path).map_err(|e| WalletError::DerivationFailed(e.to_string()))
}

/// Derive a child private key. Indices with the top bit set
/// (>= 2^31) are hardened.
pub fn derive_child_xprv(parent: &XPrv, index: u32) -> Result<XPrv, WalletError> {
    parent
        .derive_child(ChildNumber(index))
        .map_err(|e| WalletError::DerivationFailed(e.to_string()))
}

/// Derive a child public key from a public extended key.
///
/// Hardened indices need the parent's private key, which a public
/// extended key does not carry.
pub fn derive_child_xpub(parent: &XPub, index: u32) -> Result<XPub, WalletError> {
    let child = ChildNumber(index);
    if child.is_hardened() {
        return Err(WalletError::PrivateKeyRequired(index));
    }
    parent
        .derive_child(child)
        .map_err(|e| WalletError::DerivationFailed(e.to_string()))
}

/// Derived secp256k1 key material for one account.
pub struct DerivedKey {
    pub private_key: [u8; 32],
    pub public_key_compressed: [u8; 33],
    pub public_key_uncompressed: [u8; 65],
    pub derivation_path: String,
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

use bip39::{Language, Mnemonic};
use rand::RngCore;
use zeroize::Zeroize;

use crate::error::WalletError;

/// Map a language tag to a BIP-39 word list.
///
/// Tags follow the reference wallet's naming (underscores), with hyphen
/// spellings accepted as well. Anything else — including languages that
/// have no standardized 2048-word list in the `bip39` crate — fails with
/// `UnsupportedLanguage`.
pub fn parse_language(tag: &str) -> Result<Language, WalletError> {
    match tag.to_ascii_lowercase().replace('-', "_").as_str() {
        "english" => Ok(Language::English),
        "chinese_simplified" => Ok(Language::SimplifiedChinese),
        "chinese_traditional" => Ok(Language::TraditionalChinese),
        "czech" => Ok(Language::Czech),
        "french" => Ok(Language::French),
        "italian" => Ok(Language::Italian),
        "japanese" => Ok(Language::Japanese),
        "korean" => Ok(Language::Korean),
        "portuguese" => Ok(Language::Portuguese),
        "spanish" => Ok(Language::Spanish),
        _ => Err(WalletError::UnsupportedLanguage(tag.to_string())),
    }
}

/// Generate a new BIP-39 mnemonic of 12 or 24 words (128 or 256 bits of
/// entropy from the OS RNG).
pub fn generate_mnemonic(words: u32, language: Language) -> Result<String, WalletError> {
    let entropy_len = match words {
        12 => 16,
        24 => 32,
        other => return Err(WalletError::InvalidWordCount(other)),
    };

    let mut entropy = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut entropy[..entropy_len]);
    let mnemonic = Mnemonic::from_entropy_in(language, &entropy[..entropy_len])
        .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;
    entropy.zeroize();
    Ok(mnemonic.to_string())
}

/// Validate a mnemonic phrase, detecting its language among the
/// supported word lists.
pub fn validate_mnemonic(phrase: &str) -> bool {
    Mnemonic::parse_normalized(phrase).is_ok()
}

/// Derive the 64-byte seed from mnemonic + optional passphrase.
/// Caller should zeroize the returned seed when done.
pub fn mnemonic_to_seed(phrase: &str, passphrase: &str) -> Result<Vec<u8>, WalletError> {
    let mnemonic = Mnemonic::parse_normalized(phrase)
        .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;

    Ok(mnemonic.to_seed(passphrase).to_vec())
}

/// Get a language's word list (2048 words) for autocomplete.
pub fn word_list(language: Language) -> &'static [&'static str] {
    language.word_list()
}

/// Check a single word against a language's word list.
pub fn is_valid_word(word: &str, language: Language) -> bool {
    language.find_word(word).is_some()
}

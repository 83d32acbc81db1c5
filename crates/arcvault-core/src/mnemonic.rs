//! BIP-39 seed phrase generation and validation
//!
//! New wallets get 12-word phrases (128 bits of entropy). Validation and
//! import additionally accept 24-word phrases for wallets restored from
//! other software.

use crate::{Error, Result};
use bip39::{Language, Mnemonic};
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroizing;

/// Word count for newly generated phrases
pub const GENERATED_WORD_COUNT: usize = 12;

/// Entropy for a 12-word phrase (128 bits)
const GENERATED_ENTROPY_BYTES: usize = 16;

/// A validated BIP-39 seed phrase.
///
/// The backing string is zeroized on drop. The phrase never appears in
/// `Debug` output or logs.
#[derive(Clone)]
pub struct SeedPhrase {
    words: Zeroizing<String>,
}

impl SeedPhrase {
    /// Generate a new 12-word phrase from OS randomness.
    ///
    /// Fails with [`Error::CryptoUnavailable`] if the OS randomness
    /// source cannot be read; there is no weaker fallback.
    pub fn generate() -> Result<Self> {
        let mut entropy = Zeroizing::new([0u8; GENERATED_ENTROPY_BYTES]);
        OsRng
            .try_fill_bytes(&mut *entropy)
            .map_err(|e| Error::CryptoUnavailable(e.to_string()))?;

        let mnemonic = Mnemonic::from_entropy(&*entropy)
            .map_err(|e| Error::InvalidSeed(e.to_string()))?;

        Ok(Self {
            words: Zeroizing::new(mnemonic.to_string()),
        })
    }

    /// Parse and validate a phrase (wordlist, length, checksum).
    pub fn parse(phrase: &str) -> Result<Self> {
        let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase)
            .map_err(|e| Error::InvalidSeed(e.to_string()))?;

        let word_count = mnemonic.word_count();
        if word_count != 12 && word_count != 24 {
            return Err(Error::InvalidSeed(format!(
                "Expected 12 or 24 words, got {word_count}"
            )));
        }

        Ok(Self {
            words: Zeroizing::new(mnemonic.to_string()),
        })
    }

    /// Check whether a phrase is valid without constructing one.
    ///
    /// Malformed input returns `false`; this never panics.
    pub fn validate(phrase: &str) -> bool {
        Self::parse(phrase).is_ok()
    }

    /// The normalized phrase as a single space-separated string.
    pub fn phrase(&self) -> &str {
        &self.words
    }

    /// Number of words in the phrase.
    pub fn word_count(&self) -> usize {
        self.words.split_whitespace().count()
    }

    /// Derive the 64-byte BIP-39 seed (empty passphrase).
    pub fn to_seed_bytes(&self) -> Result<Zeroizing<[u8; 64]>> {
        let mnemonic = Mnemonic::parse_in_normalized(Language::English, &self.words)
            .map_err(|e| Error::InvalidSeed(e.to_string()))?;
        Ok(Zeroizing::new(mnemonic.to_seed("")))
    }
}

impl std::fmt::Debug for SeedPhrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedPhrase")
            .field("word_count", &self.word_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_valid_12_words() {
        let seed = SeedPhrase::generate().unwrap();
        assert_eq!(seed.word_count(), GENERATED_WORD_COUNT);
        assert!(SeedPhrase::validate(seed.phrase()));
    }

    #[test]
    fn test_generate_is_unique() {
        let a = SeedPhrase::generate().unwrap();
        let b = SeedPhrase::generate().unwrap();
        assert_ne!(a.phrase(), b.phrase());
    }

    #[test]
    fn test_validate_rejects_bad_checksum() {
        // Valid words, wrong checksum word
        assert!(!SeedPhrase::validate(
            "abandon abandon abandon abandon abandon abandon \
             abandon abandon abandon abandon abandon abandon"
        ));
    }

    #[test]
    fn test_validate_accepts_known_vector() {
        // BIP-39 test vector for all-zero entropy
        assert!(SeedPhrase::validate(
            "abandon abandon abandon abandon abandon abandon \
             abandon abandon abandon abandon abandon about"
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_word() {
        assert!(!SeedPhrase::validate(
            "abandon abandon abandon abandon abandon abandon \
             abandon abandon abandon abandon abandon zzzzzz"
        ));
    }

    #[test]
    fn test_validate_rejects_wrong_length() {
        assert!(!SeedPhrase::validate("abandon about"));
        assert!(!SeedPhrase::validate(""));
    }

    #[test]
    fn test_accepts_24_words() {
        // BIP-39 test vector for all-zero 256-bit entropy
        let phrase = "abandon abandon abandon abandon abandon abandon \
                      abandon abandon abandon abandon abandon abandon \
                      abandon abandon abandon abandon abandon abandon \
                      abandon abandon abandon abandon abandon art";
        let seed = SeedPhrase::parse(phrase).unwrap();
        assert_eq!(seed.word_count(), 24);
    }

    #[test]
    fn test_seed_bytes_deterministic() {
        let seed = SeedPhrase::generate().unwrap();
        let a = seed.to_seed_bytes().unwrap();
        let b = seed.to_seed_bytes().unwrap();
        assert_eq!(a.as_ref(), b.as_ref());
    }

    #[test]
    fn test_debug_does_not_leak_words() {
        let seed = SeedPhrase::parse(
            "abandon abandon abandon abandon abandon abandon \
             abandon abandon abandon abandon abandon about",
        )
        .unwrap();
        let dump = format!("{seed:?}");
        assert!(!dump.contains("abandon"));
        assert!(!dump.contains("about"));
    }
}

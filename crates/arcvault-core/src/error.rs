//! Error types

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Vault core errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid seed phrase
    #[error("Invalid seed phrase: {0}")]
    InvalidSeed(String),

    /// Key derivation error
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// Encryption error
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Decryption failed. One generic message regardless of root cause
    /// (wrong password, truncated blob, or tampered ciphertext).
    #[error("Invalid password or corrupted data")]
    DecryptionFailed,

    /// Record format version with no known parameter set
    #[error("Unsupported record version: {0}")]
    UnsupportedVersion(String),

    /// Malformed keystore file
    #[error("Invalid keystore: {0}")]
    InvalidKeystore(String),

    /// OS randomness source unavailable
    #[error("Cryptography unavailable: {0}")]
    CryptoUnavailable(String),

    /// Invalid key material
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

//! Error types
//!
//! The taxonomy the UI layer sees. Cryptographic and storage failures
//! propagate here rather than being swallowed at the component boundary;
//! the one deliberate exception is biometric registration during wallet
//! creation, which [`crate::vault::Vault`] downgrades to "biometric
//! disabled".

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Session and orchestration errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed user input (seed phrase, keystore file, weak password)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No wallet record in the store
    #[error("No wallet found")]
    NoWallet,

    /// Wrong password or corrupted record. One generic message for both.
    #[error("Invalid password or corrupted data")]
    DecryptionFailed,

    /// Throttle limit reached; only a recovery import clears it
    #[error("Too many failed unlock attempts. Restore the wallet from its seed phrase to continue")]
    UnlockBlocked,

    /// A second unlock or persist started before the first finished
    #[error("Another vault operation is in progress")]
    OperationInProgress,

    /// Operation requires an unlocked session
    #[error("Vault is locked")]
    VaultLocked,

    /// No platform authenticator configured or available
    #[error("Biometric authentication unavailable")]
    BiometricUnavailable,

    /// Platform authenticator rejected the assertion
    #[error("Biometric verification failed")]
    BiometricVerificationFailed,

    /// OS randomness source unavailable
    #[error("Cryptography unavailable: {0}")]
    CryptoUnavailable(String),

    /// Cryptographic subsystem error
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Persistence unavailable or failed
    #[error("Storage error: {0}")]
    Storage(#[from] arcvault_storage_sqlite::Error),

    /// Unknown provider name
    #[error("Unknown wallet provider: {0}")]
    UnknownProvider(String),
}

impl From<arcvault_core::Error> for Error {
    fn from(err: arcvault_core::Error) -> Self {
        use arcvault_core::Error as Core;
        match err {
            Core::DecryptionFailed => Error::DecryptionFailed,
            Core::InvalidSeed(msg) | Core::InvalidKeystore(msg) => Error::InvalidInput(msg),
            Core::CryptoUnavailable(msg) => Error::CryptoUnavailable(msg),
            Core::UnsupportedVersion(version) => {
                Error::InvalidInput(format!("Unsupported record version: {version}"))
            }
            Core::KeyDerivation(msg) | Core::Encryption(msg) | Core::InvalidKey(msg) => {
                Error::Crypto(msg)
            }
        }
    }
}

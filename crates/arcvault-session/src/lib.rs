//! Arcvault session and orchestration layer
//!
//! Drives the wallet lifecycle over the core and storage crates:
//! create/import flows, password unlock with attempt throttling,
//! optional biometric binding, the in-memory vault session, and the
//! named wallet-provider registry.
//!
//! The decrypted seed lives only in the [`session::VaultSession`] for
//! the duration of the app session; `logout` wipes it and the
//! persisted encrypted record stays behind.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod biometric;
pub mod error;
pub mod provider;
pub mod session;
pub mod vault;

pub use biometric::{
    clear_platform_authenticator, platform_authenticator, set_platform_authenticator,
    Assertion, Challenge, PlatformAuthenticator, SoftwareAuthenticator, USER_HANDLE_LEN,
};
pub use error::{Error, Result};
pub use provider::{ProviderRegistry, VaultProvider, WalletProvider};
pub use session::VaultSession;
pub use vault::{Vault, MIN_PASSWORD_LENGTH};

//! Biometric binding via platform authenticators
//!
//! Binds an origin-scoped platform-authenticator credential to the
//! wallet's public key. The binding never decrypts anything; it only
//! gates whether the fast unlock path is offered. Decryption always
//! requires the password.
//!
//! The concrete authenticator (fingerprint/face hardware and its OS
//! bridge) is consumed as a capability behind [`PlatformAuthenticator`];
//! [`SoftwareAuthenticator`] is an in-process implementation for tests
//! and for platforms without native integration.

use crate::{Error, Result};
use parking_lot::RwLock;
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Length of the user handle bound at registration: a prefix of the
/// wallet's public key.
pub const USER_HANDLE_LEN: usize = 16;

/// Challenge length in bytes
const CHALLENGE_LEN: usize = 32;

/// A fresh random challenge for one assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Challenge(pub [u8; CHALLENGE_LEN]);

impl Challenge {
    /// Draw a fresh challenge from OS randomness.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; CHALLENGE_LEN];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| Error::CryptoUnavailable(e.to_string()))?;
        Ok(Self(bytes))
    }
}

/// Assertion returned by the platform authenticator after a successful
/// user-presence/verification ceremony.
#[derive(Debug, Clone)]
pub struct Assertion {
    /// Credential that produced the assertion
    pub credential_id: String,
    /// Challenge echoed back from the signed client data
    pub challenge: [u8; CHALLENGE_LEN],
    /// User handle bound at registration, if the platform returns one
    pub user_handle: Option<String>,
}

/// Platform authenticator capability.
///
/// Implementations bridge to the OS credential APIs. The trait is
/// deliberately small: create a credential, assert over a challenge.
pub trait PlatformAuthenticator: Send + Sync {
    /// Whether an authenticator is present and usable.
    fn is_available(&self) -> bool;

    /// Create a credential bound to the wallet's public id and return
    /// its opaque reference.
    fn register(&self, wallet_public_id: &str) -> Result<String>;

    /// Run a user-presence ceremony constrained to `credential_id`,
    /// over `challenge`.
    fn assert_presence(&self, credential_id: &str, challenge: &Challenge) -> Result<Assertion>;
}

static PLATFORM_AUTHENTICATOR: OnceLock<RwLock<Option<Arc<dyn PlatformAuthenticator>>>> =
    OnceLock::new();

fn authenticator_slot() -> &'static RwLock<Option<Arc<dyn PlatformAuthenticator>>> {
    PLATFORM_AUTHENTICATOR.get_or_init(|| RwLock::new(None))
}

/// Register a platform authenticator implementation for this process.
pub fn set_platform_authenticator(authenticator: Arc<dyn PlatformAuthenticator>) {
    *authenticator_slot().write() = Some(authenticator);
}

/// Clear the configured platform authenticator.
pub fn clear_platform_authenticator() {
    *authenticator_slot().write() = None;
}

/// Get the configured platform authenticator, if any.
pub fn platform_authenticator() -> Option<Arc<dyn PlatformAuthenticator>> {
    authenticator_slot().read().as_ref().map(Arc::clone)
}

/// Expected user handle for a wallet public id.
pub(crate) fn user_handle_for(wallet_public_id: &str) -> String {
    wallet_public_id.chars().take(USER_HANDLE_LEN).collect()
}

/// Register a credential for the wallet with the given authenticator.
pub fn register_binding(
    authenticator: &dyn PlatformAuthenticator,
    wallet_public_id: &str,
) -> Result<String> {
    if !authenticator.is_available() {
        return Err(Error::BiometricUnavailable);
    }

    let credential_id = authenticator.register(wallet_public_id)?;
    tracing::info!("Biometric credential registered for wallet");
    Ok(credential_id)
}

/// Verify the stored binding with a fresh challenge.
///
/// Checks the assertion is constrained to the stored credential, echoes
/// the freshly generated challenge (replay protection), and carries a
/// user handle consistent with the wallet id prefix. Returns `Ok(false)`
/// on a failed ceremony so callers fall back to password entry.
pub fn verify_binding(
    authenticator: &dyn PlatformAuthenticator,
    wallet_public_id: &str,
    credential_id: &str,
) -> Result<bool> {
    if !authenticator.is_available() {
        return Err(Error::BiometricUnavailable);
    }

    let challenge = Challenge::generate()?;
    let assertion = match authenticator.assert_presence(credential_id, &challenge) {
        Ok(assertion) => assertion,
        Err(Error::BiometricVerificationFailed) => return Ok(false),
        Err(e) => return Err(e),
    };

    if assertion.credential_id != credential_id {
        tracing::warn!("Assertion came from an unexpected credential");
        return Ok(false);
    }
    if assertion.challenge != challenge.0 {
        tracing::warn!("Assertion challenge mismatch");
        return Ok(false);
    }
    if let Some(handle) = &assertion.user_handle {
        if *handle != user_handle_for(wallet_public_id) {
            tracing::warn!("Assertion user handle does not match wallet");
            return Ok(false);
        }
    }

    Ok(true)
}

/// In-process authenticator backed by a credential table.
///
/// Stands in for the OS authenticator in tests and on platforms without
/// native integration. Availability and forced-failure behavior are
/// configurable.
pub struct SoftwareAuthenticator {
    credentials: RwLock<HashMap<String, String>>,
    available: bool,
    fail_assertions: bool,
    fail_registration: bool,
}

impl SoftwareAuthenticator {
    /// Create an available authenticator.
    pub fn new() -> Self {
        Self {
            credentials: RwLock::new(HashMap::new()),
            available: true,
            fail_assertions: false,
            fail_registration: false,
        }
    }

    /// Create an authenticator that reports itself unavailable.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Create an authenticator whose ceremonies always fail (user
    /// cancels / biometric mismatch).
    pub fn failing_assertions() -> Self {
        Self {
            fail_assertions: true,
            ..Self::new()
        }
    }

    /// Create an authenticator whose registrations always fail.
    pub fn failing_registration() -> Self {
        Self {
            fail_registration: true,
            ..Self::new()
        }
    }
}

impl Default for SoftwareAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformAuthenticator for SoftwareAuthenticator {
    fn is_available(&self) -> bool {
        self.available
    }

    fn register(&self, wallet_public_id: &str) -> Result<String> {
        if self.fail_registration {
            return Err(Error::BiometricUnavailable);
        }

        let mut nonce = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut nonce)
            .map_err(|e| Error::CryptoUnavailable(e.to_string()))?;

        let mut hasher = Sha256::new();
        hasher.update(wallet_public_id.as_bytes());
        hasher.update(nonce);
        let credential_id = hex::encode(&hasher.finalize()[..16]);

        self.credentials
            .write()
            .insert(credential_id.clone(), wallet_public_id.to_string());
        Ok(credential_id)
    }

    fn assert_presence(&self, credential_id: &str, challenge: &Challenge) -> Result<Assertion> {
        if self.fail_assertions {
            return Err(Error::BiometricVerificationFailed);
        }

        let credentials = self.credentials.read();
        let wallet_public_id = credentials
            .get(credential_id)
            .ok_or(Error::BiometricVerificationFailed)?;

        Ok(Assertion {
            credential_id: credential_id.to_string(),
            challenge: challenge.0,
            user_handle: Some(user_handle_for(wallet_public_id)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALLET_ID: &str = "9f2CQWkC3tEVrYdCmmDsHLzVLuKajnYE1TC8eGActe5p";

    #[test]
    fn test_register_and_verify() {
        let authenticator = SoftwareAuthenticator::new();
        let credential_id = authenticator.register(WALLET_ID).unwrap();

        let challenge = Challenge::generate().unwrap();
        let assertion = authenticator
            .assert_presence(&credential_id, &challenge)
            .unwrap();

        assert_eq!(assertion.credential_id, credential_id);
        assert_eq!(assertion.challenge, challenge.0);
        assert_eq!(
            assertion.user_handle.as_deref(),
            Some(&WALLET_ID[..USER_HANDLE_LEN])
        );
    }

    #[test]
    fn test_unknown_credential_fails() {
        let authenticator = SoftwareAuthenticator::new();
        let challenge = Challenge::generate().unwrap();
        assert!(matches!(
            authenticator.assert_presence("no-such-credential", &challenge),
            Err(Error::BiometricVerificationFailed)
        ));
    }

    #[test]
    fn test_challenges_are_fresh() {
        let a = Challenge::generate().unwrap();
        let b = Challenge::generate().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_credential_ids_are_unique_per_registration() {
        let authenticator = SoftwareAuthenticator::new();
        let a = authenticator.register(WALLET_ID).unwrap();
        let b = authenticator.register(WALLET_ID).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_binding_round_trip() {
        let authenticator = SoftwareAuthenticator::new();
        let credential_id = register_binding(&authenticator, WALLET_ID).unwrap();
        assert!(verify_binding(&authenticator, WALLET_ID, &credential_id).unwrap());
    }

    #[test]
    fn test_failed_ceremony_is_false_not_error() {
        let authenticator = SoftwareAuthenticator::failing_assertions();
        assert!(!verify_binding(&authenticator, WALLET_ID, "cred-1").unwrap());
    }

    #[test]
    fn test_unavailable_authenticator_errors() {
        let authenticator = SoftwareAuthenticator::unavailable();
        assert!(matches!(
            register_binding(&authenticator, WALLET_ID),
            Err(Error::BiometricUnavailable)
        ));
        assert!(matches!(
            verify_binding(&authenticator, WALLET_ID, "cred-1"),
            Err(Error::BiometricUnavailable)
        ));
    }

    #[test]
    fn test_verify_rejects_foreign_credential() {
        let authenticator = SoftwareAuthenticator::new();
        let foreign = register_binding(&authenticator, "other-wallet-public-key").unwrap();
        // Credential exists but was bound to a different wallet id
        assert!(!verify_binding(&authenticator, WALLET_ID, &foreign).unwrap());
    }

    #[test]
    fn test_user_handle_is_wallet_prefix() {
        assert_eq!(
            user_handle_for(WALLET_ID),
            WALLET_ID[..USER_HANDLE_LEN].to_string()
        );
        // Shorter ids use the whole id
        assert_eq!(user_handle_for("short"), "short");
    }
}

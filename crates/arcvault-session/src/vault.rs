//! Wallet lifecycle orchestration
//!
//! Drives create, import, unlock, and logout over the core and storage
//! layers. Owns the in-memory session and the unlocked signer, enforces
//! the attempt throttle before any key derivation runs, and serializes
//! unlock/persist attempts so a second caller cannot race the attempt
//! counter.

use crate::biometric::{self, PlatformAuthenticator};
use crate::session::VaultSession;
use crate::{Error, Result};
use arcvault_core::{AccountKeypair, EncryptedWalletRecord, RecordPatch, SeedPhrase};
use arcvault_storage_sqlite::{AttemptCounter, Database, WalletStore};
use parking_lot::Mutex;
use std::sync::Arc;
use zeroize::Zeroizing;

/// Minimum accepted wallet password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// The wallet vault.
///
/// All methods take `&self`; interior state is behind locks so the
/// vault can be shared across UI handlers.
pub struct Vault {
    db: Database,
    session: Mutex<VaultSession>,
    signer: Mutex<Option<AccountKeypair>>,
    /// Serializes unlock and persist. Held for the whole KDF run.
    op_guard: Mutex<()>,
    authenticator: Option<Arc<dyn PlatformAuthenticator>>,
}

impl Vault {
    /// Create a vault over an open database, using the process-wide
    /// platform authenticator if one is registered.
    pub fn new(db: Database) -> Self {
        Self {
            db,
            session: Mutex::new(VaultSession::new()),
            signer: Mutex::new(None),
            op_guard: Mutex::new(()),
            authenticator: None,
        }
    }

    /// Create a vault with an explicitly injected authenticator.
    pub fn with_authenticator(db: Database, authenticator: Arc<dyn PlatformAuthenticator>) -> Self {
        Self {
            authenticator: Some(authenticator),
            ..Self::new(db)
        }
    }

    fn resolve_authenticator(&self) -> Option<Arc<dyn PlatformAuthenticator>> {
        self.authenticator
            .clone()
            .or_else(biometric::platform_authenticator)
    }

    fn store(&self) -> WalletStore<'_> {
        WalletStore::new(&self.db)
    }

    fn attempts(&self) -> AttemptCounter<'_> {
        AttemptCounter::new(&self.db)
    }

    // ======================================================================
    // Wallet state queries
    // ======================================================================

    /// Whether an encrypted wallet record exists.
    pub fn has_wallet(&self) -> Result<bool> {
        Ok(self.store().has_wallet()?)
    }

    /// Public key of the stored wallet, if any. Does not require unlock.
    pub fn public_key(&self) -> Result<Option<String>> {
        Ok(self.store().get()?.map(|record| record.public_key))
    }

    /// Whether the session currently holds the decrypted seed.
    pub fn is_unlocked(&self) -> bool {
        self.signer.lock().is_some()
    }

    /// Whether the password path is blocked by the throttle.
    pub fn is_blocked(&self) -> Result<bool> {
        Ok(self.attempts().blocked()?)
    }

    /// Current consecutive failed unlock attempts.
    pub fn failed_attempts(&self) -> Result<u32> {
        Ok(self.attempts().attempts()?)
    }

    // ======================================================================
    // Create flow
    // ======================================================================

    /// Generate a fresh seed phrase into the session and return it for
    /// the backup step.
    pub fn generate_seed(&self) -> Result<SeedPhrase> {
        let seed = SeedPhrase::generate()?;
        self.session.lock().set_seed(seed.phrase().to_string());
        tracing::info!("Seed phrase generated");
        Ok(seed)
    }

    /// Set the wallet password for the pending create flow.
    pub fn set_password(&self, password: &str) -> Result<()> {
        validate_password(password)?;
        self.session.lock().set_password(password.to_string());
        Ok(())
    }

    /// Request biometric binding for the pending create flow.
    pub fn set_biometric(&self, enabled: bool) {
        self.session.lock().set_biometric(enabled);
    }

    /// Encrypt the pending session seed under the session password and
    /// persist the record, completing the create flow.
    ///
    /// Derives the public account key into the record. If biometric was
    /// requested and registration fails, the wallet is still created
    /// with biometric disabled. Clears the session on success.
    pub fn encrypt_and_persist(&self) -> Result<EncryptedWalletRecord> {
        let _guard = self
            .op_guard
            .try_lock()
            .ok_or(Error::OperationInProgress)?;

        let (seed, password, want_biometric) = {
            let session = self.session.lock();
            let seed = session
                .seed()
                .ok_or_else(|| Error::InvalidInput("No seed phrase in session".to_string()))?
                .to_string();
            let password = session
                .password()
                .ok_or_else(|| Error::InvalidInput("No password in session".to_string()))?
                .to_string();
            (Zeroizing::new(seed), Zeroizing::new(password), session.biometric())
        };

        let seed = SeedPhrase::parse(&seed)?;
        let mut record = EncryptedWalletRecord::seal(&seed, &password)?;

        if want_biometric {
            match self
                .resolve_authenticator()
                .ok_or(Error::BiometricUnavailable)
                .and_then(|auth| biometric::register_binding(auth.as_ref(), &record.public_key))
            {
                Ok(credential_id) => {
                    record.biometric_enabled = Some(true);
                    record.biometric_credential_id = Some(credential_id);
                }
                Err(e) => {
                    tracing::warn!("Biometric registration failed, continuing without: {e}");
                    record.biometric_enabled = Some(false);
                    record.biometric_credential_id = None;
                }
            }
        }

        self.store().store(&record)?;
        self.attempts().reset()?;
        self.session.lock().clear();

        tracing::info!("Wallet created and persisted");
        Ok(record)
    }

    // ======================================================================
    // Import flows
    // ======================================================================

    /// Import a wallet from an existing seed phrase, replacing any
    /// stored record and resetting the throttle counter.
    pub fn import_from_seed(&self, words: &str, password: &str) -> Result<EncryptedWalletRecord> {
        let _guard = self
            .op_guard
            .try_lock()
            .ok_or(Error::OperationInProgress)?;

        validate_password(password)?;
        let seed = SeedPhrase::parse(words)?;
        let record = EncryptedWalletRecord::seal(&seed, password)?;

        self.store().store(&record)?;
        self.attempts().reset()?;
        self.session.lock().clear();

        tracing::info!("Wallet imported from seed phrase");
        Ok(record)
    }

    /// Import a wallet from a portable keystore file.
    ///
    /// The password must open the keystore; the seed is then re-sealed
    /// under a fresh salt and nonce before persisting. A wrong password
    /// here does not touch the throttle counter; the counter guards the
    /// stored record only.
    pub fn import_from_keystore(&self, json: &str, password: &str) -> Result<EncryptedWalletRecord> {
        let _guard = self
            .op_guard
            .try_lock()
            .ok_or(Error::OperationInProgress)?;

        validate_password(password)?;
        let imported = EncryptedWalletRecord::from_keystore_json(json)?;
        let seed = imported.decrypt(password)?;
        let record = EncryptedWalletRecord::seal(&seed, password)?;

        self.store().store(&record)?;
        self.attempts().reset()?;
        self.session.lock().clear();

        tracing::info!("Wallet imported from keystore");
        Ok(record)
    }

    /// Export the stored record as portable keystore JSON.
    pub fn export_keystore(&self) -> Result<String> {
        let record = self.store().get()?.ok_or(Error::NoWallet)?;
        Ok(record.to_keystore_json()?)
    }

    // ======================================================================
    // Unlock / lock
    // ======================================================================

    /// Unlock the wallet with the password.
    ///
    /// The throttle is checked before any key derivation: once blocked,
    /// this returns [`Error::UnlockBlocked`] without running the KDF.
    /// A failed decryption increments the counter; success resets it
    /// and leaves the decrypted seed in the session until [`Self::logout`].
    pub fn unlock(&self, password: &str) -> Result<()> {
        let _guard = self
            .op_guard
            .try_lock()
            .ok_or(Error::OperationInProgress)?;

        let record = self.store().get()?.ok_or(Error::NoWallet)?;

        let counter = self.attempts();
        if counter.blocked()? {
            return Err(Error::UnlockBlocked);
        }

        let seed = match record.decrypt(password) {
            Ok(seed) => seed,
            Err(arcvault_core::Error::DecryptionFailed) => {
                let count = counter.record_failure()?;
                if AttemptCounter::is_blocked(count) {
                    tracing::warn!("Unlock attempt limit reached, password path blocked");
                }
                return Err(Error::DecryptionFailed);
            }
            Err(e) => return Err(e.into()),
        };

        let keypair = AccountKeypair::from_seed(&seed)?;
        counter.reset()?;

        self.session.lock().set_seed(seed.phrase().to_string());
        *self.signer.lock() = Some(keypair);

        tracing::info!("Wallet unlocked");
        Ok(())
    }

    /// Clear the in-memory session and signer. The persisted encrypted
    /// record is untouched.
    pub fn logout(&self) {
        self.session.lock().clear();
        *self.signer.lock() = None;
        tracing::info!("Vault session cleared");
    }

    /// Delete the stored wallet record and reset the counter. The
    /// in-memory session is cleared as well.
    pub fn remove_wallet(&self) -> Result<()> {
        self.store().delete()?;
        self.attempts().reset()?;
        self.logout();
        tracing::info!("Wallet removed");
        Ok(())
    }

    // ======================================================================
    // Biometric fast path
    // ======================================================================

    /// Whether the stored wallet has an active biometric binding and an
    /// authenticator is present.
    pub fn biometric_unlock_available(&self) -> Result<bool> {
        let Some(record) = self.store().get()? else {
            return Ok(false);
        };
        let Some(authenticator) = self.resolve_authenticator() else {
            return Ok(false);
        };
        Ok(record.biometric_binding().is_some() && authenticator.is_available())
    }

    /// Run the biometric ceremony for the stored wallet.
    ///
    /// On success the caller may offer the fast unlock path; the
    /// password is still required to decrypt. `Ok(false)` means the
    /// ceremony failed and the caller falls back to password entry.
    pub fn verify_biometric(&self) -> Result<bool> {
        let record = self.store().get()?.ok_or(Error::NoWallet)?;
        let credential_id = record
            .biometric_binding()
            .ok_or(Error::BiometricUnavailable)?;
        let authenticator = self
            .resolve_authenticator()
            .ok_or(Error::BiometricUnavailable)?;

        biometric::verify_binding(authenticator.as_ref(), &record.public_key, credential_id)
    }

    /// Bind a biometric credential to an existing wallet.
    pub fn enable_biometric(&self) -> Result<EncryptedWalletRecord> {
        let record = self.store().get()?.ok_or(Error::NoWallet)?;
        let authenticator = self
            .resolve_authenticator()
            .ok_or(Error::BiometricUnavailable)?;

        let credential_id = biometric::register_binding(authenticator.as_ref(), &record.public_key)?;
        Ok(self.store().update(RecordPatch {
            biometric_enabled: Some(true),
            biometric_credential_id: Some(Some(credential_id)),
            ..Default::default()
        })?)
    }

    /// Remove the biometric binding from the stored wallet.
    pub fn disable_biometric(&self) -> Result<EncryptedWalletRecord> {
        Ok(self.store().update(RecordPatch {
            biometric_enabled: Some(false),
            biometric_credential_id: Some(None),
            ..Default::default()
        })?)
    }

    // ======================================================================
    // Signing capability
    // ======================================================================

    /// Sign an arbitrary message with the unlocked account key.
    pub fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>> {
        let signer = self.signer.lock();
        let keypair = signer.as_ref().ok_or(Error::VaultLocked)?;
        Ok(keypair.sign_message(message).to_vec())
    }

    /// Sign serialized transaction bytes with the unlocked account key.
    pub fn sign_transaction(&self, tx_bytes: &[u8]) -> Result<Vec<u8>> {
        let signer = self.signer.lock();
        let keypair = signer.as_ref().ok_or(Error::VaultLocked)?;
        Ok(keypair.sign_transaction(tx_bytes).to_vec())
    }

    /// Public key of the unlocked session.
    pub fn session_public_key(&self) -> Result<String> {
        let signer = self.signer.lock();
        let keypair = signer.as_ref().ok_or(Error::VaultLocked)?;
        Ok(keypair.public_key())
    }
}

fn validate_password(password: &str) -> Result<()> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(Error::InvalidInput(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

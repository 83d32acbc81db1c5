//! Encrypted wallet record and portable keystore format
//!
//! The record is the only durable secret-bearing entity: base64-coded
//! ciphertext/iv/salt, the derived base58 public key, a creation
//! timestamp, the format version tag, and the optional biometric
//! binding. The same serde shape doubles as the portable keystore JSON
//! used for backup and import.

use crate::cipher::{self, SealedSeed, NONCE_LEN};
use crate::kdf::{self, KdfParams, CURRENT_VERSION, SALT_LEN};
use crate::mnemonic::SeedPhrase;
use crate::signer::AccountKeypair;
use crate::{Error, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

/// The encrypted wallet record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedWalletRecord {
    /// AES-256-GCM ciphertext plus tag, base64
    pub ciphertext: String,
    /// 12-byte nonce, base64, unique per encryption
    pub iv: String,
    /// 16-byte KDF salt, base64, unique per wallet
    pub salt: String,
    /// Derived account public key, base58
    pub public_key: String,
    /// Creation time, epoch milliseconds
    pub created_at: i64,
    /// Record format version; selects the KDF parameter set
    pub version: String,
    /// Whether a biometric credential is bound to this wallet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biometric_enabled: Option<bool>,
    /// Opaque platform-authenticator credential reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biometric_credential_id: Option<String>,
}

impl EncryptedWalletRecord {
    /// Encrypt a seed phrase under a password into a fresh record.
    ///
    /// Draws a new salt and nonce, derives the account public key from
    /// the seed, and stamps the current format version. Biometric
    /// fields start unset.
    pub fn seal(seed: &SeedPhrase, password: &str) -> Result<Self> {
        let salt = kdf::generate_salt()?;
        let key = kdf::derive_key(password, &salt, KdfParams::current())?;
        let sealed = cipher::encrypt(seed, &key)?;
        let public_key = AccountKeypair::from_seed(seed)?.public_key();

        Ok(Self {
            ciphertext: BASE64.encode(&sealed.ciphertext),
            iv: BASE64.encode(sealed.iv),
            salt: BASE64.encode(salt),
            public_key,
            created_at: chrono::Utc::now().timestamp_millis(),
            version: CURRENT_VERSION.to_string(),
            biometric_enabled: None,
            biometric_credential_id: None,
        })
    }

    /// Decrypt the seed phrase with the wallet password.
    ///
    /// Re-derives the key from the stored salt using the parameter set
    /// for this record's version. Every failure mode surfaces as the
    /// generic [`Error::DecryptionFailed`], except an unknown version
    /// which is reported as such.
    pub fn decrypt(&self, password: &str) -> Result<SeedPhrase> {
        let params = KdfParams::for_version(&self.version)?;

        let salt = BASE64
            .decode(&self.salt)
            .map_err(|_| Error::DecryptionFailed)?;
        let iv_bytes = BASE64.decode(&self.iv).map_err(|_| Error::DecryptionFailed)?;
        let iv: [u8; NONCE_LEN] = iv_bytes
            .try_into()
            .map_err(|_| Error::DecryptionFailed)?;
        let ciphertext = BASE64
            .decode(&self.ciphertext)
            .map_err(|_| Error::DecryptionFailed)?;

        let key = kdf::derive_key(password, &salt, params).map_err(|e| match e {
            Error::CryptoUnavailable(m) => Error::CryptoUnavailable(m),
            _ => Error::DecryptionFailed,
        })?;

        cipher::decrypt(&SealedSeed { ciphertext, iv }, &key)
    }

    /// Credential id of the biometric binding, if the binding is active.
    ///
    /// A credential id without `biometricEnabled == true` is treated as
    /// disabled.
    pub fn biometric_binding(&self) -> Option<&str> {
        if self.biometric_enabled == Some(true) {
            self.biometric_credential_id.as_deref()
        } else {
            None
        }
    }

    /// Apply a partial update. `createdAt` is preserved and `version`
    /// is pinned to the current format tag.
    pub fn apply(&mut self, patch: RecordPatch) {
        if let Some(public_key) = patch.public_key {
            self.public_key = public_key;
        }
        if let Some(enabled) = patch.biometric_enabled {
            self.biometric_enabled = Some(enabled);
        }
        if let Some(credential_id) = patch.biometric_credential_id {
            self.biometric_credential_id = credential_id;
        }
        self.version = CURRENT_VERSION.to_string();
    }

    /// Serialize to portable keystore JSON.
    pub fn to_keystore_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::InvalidKeystore(e.to_string()))
    }

    /// Parse and validate a portable keystore JSON file.
    pub fn from_keystore_json(json: &str) -> Result<Self> {
        let record: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidKeystore(e.to_string()))?;
        record.validate_shape()?;
        Ok(record)
    }

    fn validate_shape(&self) -> Result<()> {
        KdfParams::for_version(&self.version)?;

        let salt = BASE64
            .decode(&self.salt)
            .map_err(|_| Error::InvalidKeystore("Salt is not valid base64".to_string()))?;
        if salt.len() < SALT_LEN {
            return Err(Error::InvalidKeystore("Salt too short".to_string()));
        }

        let iv = BASE64
            .decode(&self.iv)
            .map_err(|_| Error::InvalidKeystore("IV is not valid base64".to_string()))?;
        if iv.len() != NONCE_LEN {
            return Err(Error::InvalidKeystore(format!(
                "IV must be {NONCE_LEN} bytes, got {}",
                iv.len()
            )));
        }

        let ciphertext = BASE64
            .decode(&self.ciphertext)
            .map_err(|_| Error::InvalidKeystore("Ciphertext is not valid base64".to_string()))?;
        if ciphertext.is_empty() {
            return Err(Error::InvalidKeystore("Ciphertext is empty".to_string()));
        }

        if self.public_key.is_empty() {
            return Err(Error::InvalidKeystore("Missing public key".to_string()));
        }

        Ok(())
    }
}

/// Partial update for [`EncryptedWalletRecord::apply`].
///
/// `biometric_credential_id` is doubly optional: `None` leaves the field
/// untouched, `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    /// Replace the public key
    pub public_key: Option<String>,
    /// Set the biometric flag
    pub biometric_enabled: Option<bool>,
    /// Set or clear the credential id
    pub biometric_credential_id: Option<Option<String>>,
}

//! Authenticated seed encryption
//!
//! AES-256-GCM over the UTF-8 mnemonic string. Every encryption draws a
//! fresh 12-byte nonce; the ciphertext carries the GCM tag appended by
//! the cipher. Decryption failures all map to the one generic
//! [`Error::DecryptionFailed`] so callers cannot distinguish a wrong
//! password from tampered data.

use crate::mnemonic::SeedPhrase;
use crate::kdf::VaultKey;
use crate::{Error, Result};
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroizing;

/// AES-GCM nonce length in bytes
pub const NONCE_LEN: usize = 12;

/// Encrypted seed with its nonce. Tag is appended to the ciphertext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedSeed {
    /// Ciphertext plus 16-byte GCM tag
    pub ciphertext: Vec<u8>,
    /// Nonce used for this encryption
    pub iv: [u8; NONCE_LEN],
}

/// Encrypt a seed phrase under a derived key with a fresh nonce.
pub fn encrypt(seed: &SeedPhrase, key: &VaultKey) -> Result<SealedSeed> {
    let mut iv = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut iv)
        .map_err(|e| Error::CryptoUnavailable(e.to_string()))?;

    let cipher = Aes256Gcm::new(key.as_bytes().into());
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&iv), seed.phrase().as_bytes())
        .map_err(|e| Error::Encryption(e.to_string()))?;

    Ok(SealedSeed { ciphertext, iv })
}

/// Decrypt a sealed seed. Every failure mode surfaces as
/// [`Error::DecryptionFailed`].
pub fn decrypt(sealed: &SealedSeed, key: &VaultKey) -> Result<SeedPhrase> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());
    let plaintext = cipher
        .decrypt(Nonce::from_slice(&sealed.iv), sealed.ciphertext.as_slice())
        .map_err(|_| Error::DecryptionFailed)?;
    let plaintext = Zeroizing::new(plaintext);

    let phrase = std::str::from_utf8(&plaintext).map_err(|_| Error::DecryptionFailed)?;
    SeedPhrase::parse(phrase).map_err(|_| Error::DecryptionFailed)
}

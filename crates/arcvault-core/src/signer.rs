//! Account key derivation and signing
//!
//! Derives the account Ed25519 keypair from the BIP-39 seed. The public
//! key (base58) is the wallet's public identifier; the signing half is
//! exposed only as a sign capability and never serialized.

use crate::mnemonic::SeedPhrase;
use crate::{Error, Result};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

/// Signature length in bytes
pub const SIGNATURE_LEN: usize = 64;

/// Account keypair derived from the seed phrase.
pub struct AccountKeypair {
    signing: SigningKey,
}

impl AccountKeypair {
    /// Derive the account keypair from a seed phrase.
    ///
    /// Uses the first 32 bytes of the BIP-39 seed as the Ed25519 secret.
    pub fn from_seed(seed: &SeedPhrase) -> Result<Self> {
        let seed_bytes = seed.to_seed_bytes()?;
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&seed_bytes[..32]);

        Ok(Self {
            signing: SigningKey::from_bytes(&secret),
        })
    }

    /// Base58-encoded public key.
    pub fn public_key(&self) -> String {
        bs58::encode(self.signing.verifying_key().to_bytes()).into_string()
    }

    /// Sign an arbitrary message (backend auth challenges).
    pub fn sign_message(&self, message: &[u8]) -> [u8; SIGNATURE_LEN] {
        self.signing.sign(message).to_bytes()
    }

    /// Sign serialized transaction bytes. The transaction layer owns the
    /// serialization; the vault only signs.
    pub fn sign_transaction(&self, tx_bytes: &[u8]) -> [u8; SIGNATURE_LEN] {
        self.signing.sign(tx_bytes).to_bytes()
    }
}

impl std::fmt::Debug for AccountKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountKeypair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Verify a signature against a base58 public key.
pub fn verify_signature(public_key: &str, message: &[u8], signature: &[u8]) -> Result<bool> {
    let key_bytes = bs58::decode(public_key)
        .into_vec()
        .map_err(|e| Error::InvalidKey(e.to_string()))?;
    let key_bytes: [u8; 32] = key_bytes
        .try_into()
        .map_err(|_| Error::InvalidKey("Invalid public key length".to_string()))?;
    let verifying = VerifyingKey::from_bytes(&key_bytes)
        .map_err(|e| Error::InvalidKey(e.to_string()))?;

    let signature: [u8; SIGNATURE_LEN] = signature
        .try_into()
        .map_err(|_| Error::InvalidKey("Invalid signature length".to_string()))?;

    Ok(verifying
        .verify(message, &Signature::from_bytes(&signature))
        .is_ok())
}

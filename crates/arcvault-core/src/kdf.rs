//! Argon2id key derivation
//!
//! Cost parameters are keyed by the record format version so that future
//! tuning cannot break decryption of older records: each version tag maps
//! to exactly one parameter set, and unknown tags fail instead of
//! guessing.

use crate::{Error, Result};
use argon2::{Algorithm, Argon2, ParamsBuilder, Version};
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroizing;

/// Current record format version
pub const CURRENT_VERSION: &str = "2.0";

/// Required salt length in bytes
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes (AES-256)
const KEY_LEN: usize = 32;

/// Argon2id cost parameters for one record format version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB
    pub m_cost: u32,
    /// Time cost (iterations)
    pub t_cost: u32,
    /// Parallelism (lanes)
    pub p_cost: u32,
}

impl KdfParams {
    /// Parameters for the current record format version.
    ///
    /// Memory: 64 MiB (65536 KiB), Iterations: 3, Parallelism: 1
    pub fn current() -> Self {
        Self {
            m_cost: 65536,
            t_cost: 3,
            p_cost: 1,
        }
    }

    /// Look up the parameter set for a record format version.
    pub fn for_version(version: &str) -> Result<Self> {
        match version {
            CURRENT_VERSION => Ok(Self::current()),
            other => Err(Error::UnsupportedVersion(other.to_string())),
        }
    }
}

/// Symmetric key derived from the wallet password.
///
/// Key bytes are zeroized on drop and are not exposed outside this
/// crate; the key is usable only through [`crate::cipher`].
pub struct VaultKey {
    key: Zeroizing<[u8; KEY_LEN]>,
}

impl VaultKey {
    /// Key bytes for the cipher layer.
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    #[cfg(test)]
    pub(crate) fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self {
            key: Zeroizing::new(bytes),
        }
    }
}

/// Derive an encryption key from a password and salt using Argon2id.
///
/// Deliberately slow (hundreds of milliseconds); callers run it off any
/// latency-sensitive thread.
pub fn derive_key(password: &str, salt: &[u8], params: KdfParams) -> Result<VaultKey> {
    if salt.len() < SALT_LEN {
        return Err(Error::KeyDerivation("Salt too short".to_string()));
    }

    let params = ParamsBuilder::new()
        .m_cost(params.m_cost)
        .t_cost(params.t_cost)
        .p_cost(params.p_cost)
        .output_len(KEY_LEN)
        .build()
        .map_err(|e| Error::KeyDerivation(e.to_string()))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut *key)
        .map_err(|e| Error::KeyDerivation(e.to_string()))?;

    Ok(VaultKey { key })
}

/// Generate a random per-wallet salt.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| Error::CryptoUnavailable(e.to_string()))?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_version_parameters() {
        let params = KdfParams::for_version("2.0").unwrap();
        assert_eq!(params.m_cost, 65536); // 64 MiB in KiB
        assert_eq!(params.t_cost, 3);
        assert_eq!(params.p_cost, 1);
        assert_eq!(params, KdfParams::current());
    }

    #[test]
    fn test_unknown_version_rejected() {
        assert!(matches!(
            KdfParams::for_version("1.0"),
            Err(Error::UnsupportedVersion(_))
        ));
        assert!(KdfParams::for_version("").is_err());
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let salt = generate_salt().unwrap();
        let a = derive_key("correct-horse-1", &salt, KdfParams::current()).unwrap();
        let b = derive_key("correct-horse-1", &salt, KdfParams::current()).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_password_changes_key() {
        let salt = generate_salt().unwrap();
        let a = derive_key("correct-horse-1", &salt, KdfParams::current()).unwrap();
        let b = derive_key("correct-horse-2", &salt, KdfParams::current()).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_salt_changes_key() {
        let salt_a = generate_salt().unwrap();
        let salt_b = generate_salt().unwrap();
        assert_ne!(salt_a, salt_b);

        let a = derive_key("correct-horse-1", &salt_a, KdfParams::current()).unwrap();
        let b = derive_key("correct-horse-1", &salt_b, KdfParams::current()).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_short_salt_rejected() {
        let result = derive_key("password", &[0u8; 8], KdfParams::current());
        assert!(matches!(result, Err(Error::KeyDerivation(_))));
    }
}

//! In-memory vault session
//!
//! Holds the secrets that exist only between steps of the create/import
//! flow and while the wallet is unlocked: the seed phrase, the password,
//! and the biometric opt-in. Contents are zeroized on clear and on drop;
//! the session is never serialized.

use zeroize::Zeroizing;

/// Ephemeral per-process session state.
#[derive(Default)]
pub struct VaultSession {
    seed: Option<Zeroizing<String>>,
    password: Option<Zeroizing<String>>,
    biometric: bool,
}

impl VaultSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a seed phrase into the session.
    pub fn set_seed(&mut self, phrase: String) {
        self.seed = Some(Zeroizing::new(phrase));
    }

    /// Put the wallet password into the session.
    pub fn set_password(&mut self, password: String) {
        self.password = Some(Zeroizing::new(password));
    }

    /// Set the biometric opt-in flag.
    pub fn set_biometric(&mut self, enabled: bool) {
        self.biometric = enabled;
    }

    /// Seed phrase, if present.
    pub fn seed(&self) -> Option<&str> {
        self.seed.as_deref().map(String::as_str)
    }

    /// Password, if present.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().map(String::as_str)
    }

    /// Biometric opt-in flag.
    pub fn biometric(&self) -> bool {
        self.biometric
    }

    /// Whether the session holds no secrets.
    pub fn is_empty(&self) -> bool {
        self.seed.is_none() && self.password.is_none()
    }

    /// Wipe all session state. Backing memory is zeroized.
    pub fn clear(&mut self) {
        self.seed = None;
        self.password = None;
        self.biometric = false;
    }
}

impl std::fmt::Debug for VaultSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultSession")
            .field("has_seed", &self.seed.is_some())
            .field("has_password", &self.password.is_some())
            .field("biometric", &self.biometric)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let session = VaultSession::new();
        assert!(session.is_empty());
        assert_eq!(session.seed(), None);
        assert_eq!(session.password(), None);
        assert!(!session.biometric());
    }

    #[test]
    fn test_populate_and_clear() {
        let mut session = VaultSession::new();
        session.set_seed("word1 word2".to_string());
        session.set_password("password-1".to_string());
        session.set_biometric(true);

        assert_eq!(session.seed(), Some("word1 word2"));
        assert_eq!(session.password(), Some("password-1"));
        assert!(session.biometric());
        assert!(!session.is_empty());

        session.clear();
        assert!(session.is_empty());
        assert!(!session.biometric());
    }

    #[test]
    fn test_debug_does_not_leak_secrets() {
        let mut session = VaultSession::new();
        session.set_seed("topsecret words".to_string());
        session.set_password("hunter22".to_string());

        let dump = format!("{session:?}");
        assert!(!dump.contains("topsecret"));
        assert!(!dump.contains("hunter22"));
    }
}

//! Named wallet-provider registry
//!
//! External wallet extensions and the built-in vault all sit behind the
//! same capability interface, registered by name and selected by
//! configuration or detection. This replaces probing a global namespace
//! for whatever wallet objects happen to exist.

use crate::vault::Vault;
use crate::{Error, Result};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Capability surface every wallet provider implements.
pub trait WalletProvider: Send + Sync {
    /// Stable provider name used for registration and selection.
    fn name(&self) -> &str;

    /// Whether the provider is usable right now.
    fn is_available(&self) -> bool;

    /// Connect and return the account public key.
    fn connect(&self) -> Result<String>;

    /// Sign an arbitrary message.
    fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>>;
}

/// Registry of named provider adapters.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: RwLock<BTreeMap<String, Arc<dyn WalletProvider>>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under its own name. Re-registering a name
    /// replaces the previous adapter.
    pub fn register(&self, provider: Arc<dyn WalletProvider>) {
        let name = provider.name().to_string();
        self.providers.write().insert(name, provider);
    }

    /// Look up a provider by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn WalletProvider>> {
        self.providers
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownProvider(name.to_string()))
    }

    /// Names of all registered providers.
    pub fn names(&self) -> Vec<String> {
        self.providers.read().keys().cloned().collect()
    }

    /// Names of providers that report themselves available.
    pub fn detect(&self) -> Vec<String> {
        self.providers
            .read()
            .values()
            .filter(|provider| provider.is_available())
            .map(|provider| provider.name().to_string())
            .collect()
    }
}

/// The built-in provider backed by the local vault.
pub struct VaultProvider {
    vault: Arc<Vault>,
}

impl VaultProvider {
    /// Provider name for registry selection
    pub const NAME: &'static str = "arcvault";

    /// Create a provider over a shared vault.
    pub fn new(vault: Arc<Vault>) -> Self {
        Self { vault }
    }
}

impl WalletProvider for VaultProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn is_available(&self) -> bool {
        self.vault.has_wallet().unwrap_or(false)
    }

    fn connect(&self) -> Result<String> {
        self.vault.public_key()?.ok_or(Error::NoWallet)
    }

    fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>> {
        self.vault.sign_message(message)
    }
}

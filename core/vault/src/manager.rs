//! Vault manager for opening sessions and listing vaults.

use passkeep_common::{Result, Secret, VaultName};
use passkeep_store::{StoreConfig, VaultIndex};

use crate::session::VaultSession;

/// Entry point over one storage root.
///
/// Holds the injected layout configuration and hands out sessions; all
/// vault state lives on disk, so managers are cheap and stateless.
pub struct VaultManager {
    config: StoreConfig,
}

impl VaultManager {
    /// Create a manager over a storage root.
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Get the storage layout.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Names of all registered vaults, in registration order.
    pub fn vault_names(&self) -> Result<Vec<String>> {
        VaultIndex::new(&self.config).names()
    }

    /// Check whether a vault name is registered.
    pub fn vault_exists(&self, name: &str) -> Result<bool> {
        VaultIndex::new(&self.config).exists(name)
    }

    /// Open a session, creating the vault if the name is new.
    ///
    /// # Errors
    /// - `Authentication` if the name exists and the passphrase digest
    ///   does not match
    /// - `InvalidCharacter` if the passphrase contains a symbol outside
    ///   the cipher alphabet
    pub fn open(&self, name: VaultName, secret: &Secret) -> Result<VaultSession> {
        VaultSession::open(&self.config, name, secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_vault_names_empty_without_registry() {
        let temp = TempDir::new().unwrap();
        let manager = VaultManager::new(StoreConfig::new(temp.path()));
        assert!(manager.vault_names().unwrap().is_empty());
    }

    #[test]
    fn test_open_registers_and_lists() {
        let temp = TempDir::new().unwrap();
        let manager = VaultManager::new(StoreConfig::new(temp.path()));

        manager
            .open(VaultName::new("personal").unwrap(), &Secret::new("secret"))
            .unwrap();
        manager
            .open(VaultName::new("work").unwrap(), &Secret::new("other-key"))
            .unwrap();

        assert_eq!(manager.vault_names().unwrap(), vec!["personal", "work"]);
        assert!(manager.vault_exists("personal").unwrap());
        assert!(!manager.vault_exists("missing").unwrap());
    }
}

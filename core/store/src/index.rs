//! Vault registry.
//!
//! A single JSON file mapping vault names to passphrase digests. Entries
//! are created once, read on every authentication and never updated or
//! deleted here; a vault's passphrase cannot be changed in place.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::StoreConfig;
use passkeep_common::{Error, Result};

/// One registry record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Vault name, unique across the registry.
    pub name: String,
    /// Lowercase hex SHA-512 digest of the vault passphrase.
    pub secret_hash: String,
}

/// On-disk shape of the registry file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct IndexFile {
    vaults: Vec<IndexEntry>,
}

/// The vault registry.
pub struct VaultIndex {
    path: PathBuf,
}

impl VaultIndex {
    /// Create a registry handle for a storage layout.
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            path: config.index_path(),
        }
    }

    /// Read all registry entries.
    ///
    /// An absent registry file reads as an empty registry.
    ///
    /// # Errors
    /// - `Io` if the file exists but cannot be read
    /// - `Serialization` if the file content is not a valid registry
    pub fn entries(&self) -> Result<Vec<IndexEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let file: IndexFile = serde_json::from_str(&content)
            .map_err(|e| Error::Serialization(format!("Invalid registry file: {}", e)))?;
        Ok(file.vaults)
    }

    /// Read all registered vault names, in registration order.
    pub fn names(&self) -> Result<Vec<String>> {
        Ok(self.entries()?.into_iter().map(|e| e.name).collect())
    }

    /// Check whether a vault name is registered.
    pub fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.lookup(name)?.is_some())
    }

    /// Find the entry for a vault name.
    pub fn lookup(&self, name: &str) -> Result<Option<IndexEntry>> {
        Ok(self.entries()?.into_iter().find(|e| e.name == name))
    }

    /// Add a new entry and persist the full registry.
    ///
    /// The registry is serialized first and written through a temporary
    /// file that is renamed into place, so a failed write leaves the
    /// previous on-disk registry unchanged.
    ///
    /// # Errors
    /// - `InvalidInput` if the name is already registered
    /// - `Io` / `Serialization` on a failed write; the previous registry
    ///   file is left as it was
    pub fn append(&self, entry: IndexEntry) -> Result<()> {
        let mut entries = self.entries()?;
        if entries.iter().any(|e| e.name == entry.name) {
            return Err(Error::InvalidInput(format!(
                "Vault '{}' is already registered",
                entry.name
            )));
        }
        debug!(vault = %entry.name, "registering vault");
        entries.push(entry);

        let content = serde_json::to_string_pretty(&IndexFile { vaults: entries })
            .map_err(|e| Error::Serialization(e.to_string()))?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

//! Vault session management.
//!
//! A session binds a registry lookup, passphrase authentication and a
//! cipher engine. It is single-use: one vault and one passphrase for its
//! whole lifetime, and every store operation routes through it.
//!
//! # Concurrency
//! At most one active session per vault at a time. Mutations are full
//! read-rewrite cycles with no locking or staleness detection, so a second
//! concurrent session on the same vault can lose data. This is a documented
//! caller obligation, not something the session enforces.

use std::path::PathBuf;

use tracing::{debug, info};

use passkeep_cipher::{hash_secret, CipherEngine};
use passkeep_common::{Error, Result, Secret, VaultName};
use passkeep_store::{IndexEntry, StoreConfig, StoreSummary, VaultIndex, VaultRecord, VaultStore};

/// Authenticated session on one vault.
///
/// Constructing a session is the only way to reach the mutation
/// operations; there is no unauthenticated handle.
pub struct VaultSession {
    name: VaultName,
    store: VaultStore,
    export_path: PathBuf,
    created: bool,
}

impl VaultSession {
    /// Open a session, creating the vault if the name is new.
    ///
    /// For an existing name the passphrase digest must match the registry
    /// entry; for a new name an entry is registered and an empty vault
    /// file is created.
    ///
    /// # Errors
    /// - `InvalidCharacter` if the passphrase contains a symbol outside
    ///   the cipher alphabet; checked before any registry mutation, so a
    ///   vault can never be created with an unusable passphrase
    /// - `Authentication` on a digest mismatch; no state changes and the
    ///   caller may retry with another passphrase
    pub fn open(config: &StoreConfig, name: VaultName, secret: &Secret) -> Result<Self> {
        config.ensure_layout()?;

        // Reject foreign symbols before touching the registry.
        let engine = CipherEngine::from_secret(secret.expose())?;

        let index = VaultIndex::new(config);
        let created = match index.lookup(name.as_str())? {
            Some(entry) => {
                if hash_secret(secret.expose()) != entry.secret_hash {
                    return Err(Error::Authentication("Incorrect secret key".to_string()));
                }
                debug!(vault = %name, "authenticated");
                false
            }
            None => {
                index.append(IndexEntry {
                    name: name.as_str().to_string(),
                    secret_hash: hash_secret(secret.expose()),
                })?;
                info!(vault = %name, "created new vault");
                true
            }
        };

        let store = VaultStore::new(config.vault_path(&name), engine);
        store.ensure_file_exists()?;

        let export_path = config.export_path(&name);
        Ok(Self {
            name,
            store,
            export_path,
            created,
        })
    }

    /// Name of the vault this session is bound to.
    pub fn name(&self) -> &VaultName {
        &self.name
    }

    /// Whether opening this session created the vault.
    pub fn created(&self) -> bool {
        self.created
    }

    /// Number of stored records.
    pub fn record_count(&self) -> Result<usize> {
        self.store.record_count()
    }

    /// Check whether a password is stored for a service.
    pub fn contains_service(&self, service: &str) -> Result<bool> {
        self.store.contains_service(service)
    }

    /// Generate and store a password for a new service.
    ///
    /// # Errors
    /// - `DuplicateService` if the service already has a record; resolve
    ///   by calling [`regenerate`] or skipping
    ///
    /// [`regenerate`]: VaultSession::regenerate
    pub fn store_one(&self, service: &str) -> Result<()> {
        self.store.store_one(service)
    }

    /// Generate and store passwords for several services.
    pub fn store_many(&self, services: &[String]) -> Result<StoreSummary> {
        self.store.store_many(services)
    }

    /// Delete a service's record, returning its plaintext pair.
    pub fn delete(&self, service: &str) -> Result<VaultRecord> {
        self.store.delete(service)
    }

    /// Replace a service's password with a freshly generated one.
    pub fn regenerate(&self, service: &str) -> Result<()> {
        self.store.regenerate(service)
    }

    /// Write a plaintext copy of the vault to the export location.
    ///
    /// Returns the path of the written file. The encrypted vault file is
    /// left untouched.
    pub fn export(&self) -> Result<PathBuf> {
        self.store.export_to(&self.export_path)?;
        Ok(self.export_path.clone())
    }
}

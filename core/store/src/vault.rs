//! Encrypted per-vault record table.
//!
//! A vault file is a two-column CSV: a fixed header row followed by one
//! `(encrypted service name, encrypted password)` pair per row, in
//! insertion order. Every mutation reads the whole table and rewrites the
//! whole body; plaintext exists only in memory and in explicit exports.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::codec;
use passkeep_cipher::{generate, CipherEngine};
use passkeep_common::{Error, Result};

/// Fixed header row of every vault and export file.
pub const VAULT_FILE_HEADER: (&str, &str) = ("Service name", "Password");

/// One decrypted credential record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultRecord {
    /// Service name as it was stored (original case).
    pub service: String,
    /// Generated password.
    pub password: String,
}

/// Outcome of a bulk store: which services were appended as new records
/// and which were overwritten through regeneration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StoreSummary {
    pub stored: Vec<String>,
    pub regenerated: Vec<String>,
}

/// Record table of one vault, bound to the session's cipher engine.
pub struct VaultStore {
    path: PathBuf,
    engine: CipherEngine,
}

impl VaultStore {
    /// Create a store handle for a vault file.
    pub fn new(path: PathBuf, engine: CipherEngine) -> Self {
        Self { path, engine }
    }

    /// Path of the encrypted vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty vault file if absent.
    ///
    /// Idempotent; an existing file is left untouched.
    pub fn ensure_file_exists(&self) -> Result<()> {
        if !self.path.exists() {
            fs::File::create(&self.path)?;
        }
        Ok(())
    }

    /// Number of stored records.
    pub fn record_count(&self) -> Result<usize> {
        Ok(self.encrypted_rows()?.len())
    }

    /// Read and decrypt every stored record, in row order.
    pub fn records(&self) -> Result<Vec<VaultRecord>> {
        self.encrypted_rows()?
            .into_iter()
            .map(|(service, password)| {
                Ok(VaultRecord {
                    service: self.engine.decode(&service)?,
                    password: self.engine.decode(&password)?,
                })
            })
            .collect()
    }

    /// Check whether a password is stored for a service.
    ///
    /// The comparison is case-insensitive and decrypts every stored
    /// service name, so it is O(records) per call.
    pub fn contains_service(&self, service: &str) -> Result<bool> {
        let needle = service.to_lowercase();
        for record in self.records()? {
            if record.service.to_lowercase() == needle {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Generate and store a password for a new service.
    ///
    /// # Errors
    /// - `DuplicateService` if a record for the service already exists
    ///   (case-insensitive); the caller decides whether to overwrite via
    ///   [`regenerate`] or skip
    /// - `InvalidCharacter` if the service name contains a symbol outside
    ///   the cipher alphabet
    ///
    /// [`regenerate`]: VaultStore::regenerate
    pub fn store_one(&self, service: &str) -> Result<()> {
        self.ensure_file_exists()?;
        if self.contains_service(service)? {
            return Err(Error::DuplicateService(service.to_string()));
        }
        let mut rows = self.encrypted_rows()?;
        rows.push(self.encrypt_record(service, &generate(service))?);
        debug!(service, path = %self.path.display(), "storing new record");
        self.rewrite(rows)
    }

    /// Generate and store passwords for several services in one rewrite.
    ///
    /// Services that already have a record are routed to [`regenerate`];
    /// the rest are appended in input order.
    ///
    /// [`regenerate`]: VaultStore::regenerate
    pub fn store_many(&self, services: &[String]) -> Result<StoreSummary> {
        self.ensure_file_exists()?;
        let mut summary = StoreSummary::default();
        let mut fresh = Vec::new();
        for service in services {
            if self.contains_service(service)? {
                self.regenerate(service)?;
                summary.regenerated.push(service.clone());
            } else {
                fresh.push(service.clone());
            }
        }
        let mut rows = self.encrypted_rows()?;
        for service in &fresh {
            rows.push(self.encrypt_record(service, &generate(service))?);
        }
        debug!(
            appended = fresh.len(),
            regenerated = summary.regenerated.len(),
            path = %self.path.display(),
            "bulk store"
        );
        self.rewrite(rows)?;
        summary.stored = fresh;
        Ok(summary)
    }

    /// Delete the record of a service and return its plaintext pair.
    ///
    /// The match is case-insensitive. Remaining records are re-encrypted
    /// and the file body is rewritten in full.
    ///
    /// # Errors
    /// - `NotFound` if no record matches; the vault file is left untouched
    pub fn delete(&self, service: &str) -> Result<VaultRecord> {
        let needle = service.to_lowercase();
        let (removed, kept): (Vec<VaultRecord>, Vec<VaultRecord>) = self
            .records()?
            .into_iter()
            .partition(|r| r.service.to_lowercase() == needle);

        let Some(record) = removed.into_iter().next() else {
            return Err(Error::NotFound(format!(
                "No password stored for service '{}'",
                service
            )));
        };

        let rows = kept
            .iter()
            .map(|r| self.encrypt_record(&r.service, &r.password))
            .collect::<Result<Vec<_>>>()?;
        debug!(service, path = %self.path.display(), "deleting record");
        self.rewrite(rows)?;
        Ok(record)
    }

    /// Replace a service's password with a freshly generated one.
    ///
    /// The stored service name keeps its original case. If the service has
    /// no record, nothing is appended and the `NotFound` signal from the
    /// delete step propagates.
    pub fn regenerate(&self, service: &str) -> Result<()> {
        let removed = self.delete(service)?;
        let mut rows = self.encrypted_rows()?;
        rows.push(self.encrypt_record(&removed.service, &generate(service))?);
        debug!(service, path = %self.path.display(), "regenerated record");
        self.rewrite(rows)
    }

    /// Write a plaintext copy of the vault to a separate location.
    ///
    /// The header row is copied verbatim; every record row is decrypted.
    /// The encrypted source file is never touched.
    pub fn export_to(&self, dest: &Path) -> Result<()> {
        if !self.path.exists() {
            return Err(Error::NotFound(format!(
                "Vault file not found: {}",
                self.path.display()
            )));
        }
        let mut out = vec![(
            VAULT_FILE_HEADER.0.to_string(),
            VAULT_FILE_HEADER.1.to_string(),
        )];
        for record in self.records()? {
            out.push((record.service, record.password));
        }
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!(path = %dest.display(), "exporting plaintext copy");
        codec::write_table(dest, &out)
    }

    /// Read the raw encrypted record rows, header excluded.
    fn encrypted_rows(&self) -> Result<Vec<(String, String)>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut rows = codec::read_table(&self.path)?;
        if !rows.is_empty() {
            rows.remove(0);
        }
        Ok(rows)
    }

    /// Encrypt one plaintext pair into a row.
    fn encrypt_record(&self, service: &str, password: &str) -> Result<(String, String)> {
        Ok((self.engine.encode(service)?, self.engine.encode(password)?))
    }

    /// Rewrite the whole file as header plus the given record rows.
    fn rewrite(&self, rows: Vec<(String, String)>) -> Result<()> {
        let mut table = vec![(
            VAULT_FILE_HEADER.0.to_string(),
            VAULT_FILE_HEADER.1.to_string(),
        )];
        table.extend(rows);
        codec::write_table(&self.path, &table)
    }
}

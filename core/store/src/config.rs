//! Storage layout configuration.
//!
//! All on-disk locations derive from one explicitly injected root
//! directory; the core has no implicit global default.

use std::fs;
use std::path::{Path, PathBuf};

use passkeep_common::{Result, VaultName};

/// Registry file name in the storage root.
pub const INDEX_FILENAME: &str = "vaults_index.json";

/// Directory holding the encrypted vault files.
pub const VAULTS_DIRNAME: &str = "vaults";

/// Directory receiving plaintext exports.
pub const EXPORTS_DIRNAME: &str = "exports";

/// Root storage directory and the paths derived from it.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    root: PathBuf,
}

impl StoreConfig {
    /// Create a configuration rooted at the given directory.
    ///
    /// The directory does not need to exist yet; [`ensure_layout`] creates
    /// it on first use.
    ///
    /// [`ensure_layout`]: StoreConfig::ensure_layout
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the registry file.
    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILENAME)
    }

    /// Directory holding the encrypted vault files.
    pub fn vaults_dir(&self) -> PathBuf {
        self.root.join(VAULTS_DIRNAME)
    }

    /// Directory receiving plaintext exports.
    pub fn exports_dir(&self) -> PathBuf {
        self.root.join(EXPORTS_DIRNAME)
    }

    /// Path of a vault's encrypted record table.
    pub fn vault_path(&self, name: &VaultName) -> PathBuf {
        self.vaults_dir().join(format!("{}.csv", name.as_str()))
    }

    /// Path of a vault's plaintext export.
    ///
    /// Always distinct from [`vault_path`], so an export can never
    /// overwrite the encrypted original.
    ///
    /// [`vault_path`]: StoreConfig::vault_path
    pub fn export_path(&self, name: &VaultName) -> PathBuf {
        self.exports_dir().join(format!("{}.csv", name.as_str()))
    }

    /// Create the root, vaults and exports directories.
    ///
    /// Idempotent; existing directories are left untouched.
    pub fn ensure_layout(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::create_dir_all(self.vaults_dir())?;
        fs::create_dir_all(self.exports_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_derive_from_root() {
        let config = StoreConfig::new("/data/passkeep");
        let name = VaultName::new("personal").unwrap();

        assert_eq!(
            config.index_path(),
            PathBuf::from("/data/passkeep/vaults_index.json")
        );
        assert_eq!(
            config.vault_path(&name),
            PathBuf::from("/data/passkeep/vaults/personal.csv")
        );
        assert_eq!(
            config.export_path(&name),
            PathBuf::from("/data/passkeep/exports/personal.csv")
        );
    }

    #[test]
    fn test_export_path_distinct_from_vault_path() {
        let config = StoreConfig::new("/data/passkeep");
        let name = VaultName::new("personal").unwrap();
        assert_ne!(config.vault_path(&name), config.export_path(&name));
    }

    #[test]
    fn test_ensure_layout_idempotent() {
        let temp = TempDir::new().unwrap();
        let config = StoreConfig::new(temp.path().join("store"));

        config.ensure_layout().unwrap();
        config.ensure_layout().unwrap();

        assert!(config.vaults_dir().is_dir());
        assert!(config.exports_dir().is_dir());
    }
}

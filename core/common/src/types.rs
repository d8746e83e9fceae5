//! Common types used throughout Passkeep.

use std::fmt;
use zeroize::Zeroize;

/// Name of a vault.
///
/// Doubles as the stem of the vault's on-disk file name, so it must be
/// non-empty and must not contain path separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VaultName(String);

impl VaultName {
    /// Create a new VaultName from a string.
    ///
    /// # Errors
    /// - Returns error if the name is empty or contains a path separator
    pub fn new(name: impl Into<String>) -> crate::Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(crate::Error::InvalidInput(
                "Vault name cannot be empty".to_string(),
            ));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(crate::Error::InvalidInput(
                "Vault name cannot contain path separators".to_string(),
            ));
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VaultName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Passphrase wrapper that zeroizes on drop.
///
/// The raw passphrase only lives as long as the session-opening call that
/// consumes it; it is never logged or echoed.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct Secret(String);

impl Secret {
    /// Wrap a raw passphrase string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the raw passphrase.
    ///
    /// # Security
    /// The returned slice should be used immediately and not stored.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Check if the passphrase is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret([REDACTED; {} chars])", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vault_name_creation() {
        let name = VaultName::new("personal").unwrap();
        assert_eq!(name.as_str(), "personal");
    }

    #[test]
    fn test_vault_name_empty_fails() {
        assert!(VaultName::new("").is_err());
    }

    #[test]
    fn test_vault_name_separator_fails() {
        assert!(VaultName::new("a/b").is_err());
        assert!(VaultName::new("a\\b").is_err());
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = Secret::new("hunter2");
        let printed = format!("{:?}", secret);
        assert!(!printed.contains("hunter2"));
    }
}

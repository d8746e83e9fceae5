//! Persistence layer for Passkeep.
//!
//! This module provides:
//! - The root-directory layout configuration
//! - The vault registry (name to passphrase-digest index)
//! - The per-vault encrypted record table with its mutation protocol
//!
//! # Design Principles
//! - Encrypt at rest: no plaintext service name or password is ever written
//!   inside a vault file; plaintext only leaves through an explicit export
//! - Rewrite on mutation: every store/delete/regenerate rewrites the whole
//!   vault file body; there is no in-place or partial write
//! - Single writer: at most one active session per vault at a time, enforced
//!   by caller discipline rather than locking

pub mod codec;
pub mod config;
pub mod index;
pub mod vault;

pub use config::StoreConfig;
pub use index::{IndexEntry, VaultIndex};
pub use vault::{StoreSummary, VaultRecord, VaultStore, VAULT_FILE_HEADER};

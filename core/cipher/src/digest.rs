//! Passphrase digests for vault authentication.

use sha2::{Digest, Sha512};

/// Hash a passphrase for storage in the vault index.
///
/// Returns the lowercase hex SHA-512 digest. The digest is what the index
/// persists and what authentication compares against; the raw passphrase
/// never reaches disk.
pub fn hash_secret(passphrase: &str) -> String {
    hex::encode(Sha512::digest(passphrase.as_bytes()))
}

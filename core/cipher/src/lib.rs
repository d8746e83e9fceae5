//! Cipher engine and password generation for Passkeep.
//!
//! This module provides:
//! - The fixed 66-symbol cipher alphabet
//! - Numeric key derivation and alphabet-indexed substitution
//! - Pseudo-random service password generation
//! - Passphrase digests for vault authentication
//!
//! # Security Guarantees
//! None worth the name: the substitution cipher is a deterministic modular
//! shift over a known alphabet and exists to obfuscate records at rest
//! against casual inspection, not to resist cryptanalysis. Passphrases are
//! never logged and their digests are one-way.

pub mod alphabet;
pub mod digest;
pub mod engine;
pub mod generator;

pub use alphabet::{position, symbol, ALPHABET, ALPHABET_LEN};
pub use digest::hash_secret;
pub use engine::CipherEngine;
pub use generator::generate;

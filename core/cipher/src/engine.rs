//! Alphabet-indexed substitution cipher.
//!
//! The engine derives a numeric key from a passphrase by summing the
//! alphabet positions of its characters, then shifts every symbol of a
//! text by that key modulo the alphabet size. Key `0` (the empty
//! passphrase) is the identity transform for both directions.

use crate::alphabet::{position, symbol, ALPHABET_LEN};
use passkeep_common::Result;

/// Forward/inverse substitution transform bound to one numeric key.
///
/// Both transforms preserve string length, treat characters independently
/// and are pure functions of the input and the key. The key is derived
/// once and is immutable for the engine's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherEngine {
    key: u64,
}

impl CipherEngine {
    /// Create an engine from an already-derived numeric key.
    pub fn new(key: u64) -> Self {
        Self { key }
    }

    /// Create an engine keyed by a passphrase.
    ///
    /// # Errors
    /// - Returns `InvalidCharacter` if the passphrase contains a symbol
    ///   outside the alphabet
    pub fn from_secret(passphrase: &str) -> Result<Self> {
        Ok(Self::new(Self::derive_key(passphrase)?))
    }

    /// Derive the numeric key for a passphrase.
    ///
    /// The key is the sum of the alphabet positions of every character.
    /// Identical passphrases always derive identical keys; the empty
    /// passphrase derives key `0`.
    ///
    /// # Errors
    /// - Returns `InvalidCharacter` if any character is outside the alphabet
    pub fn derive_key(passphrase: &str) -> Result<u64> {
        let mut key = 0u64;
        for c in passphrase.chars() {
            key += position(c)? as u64;
        }
        Ok(key)
    }

    /// Get the numeric key.
    pub fn key(&self) -> u64 {
        self.key
    }

    /// The key reduced into the alphabet's index space.
    fn shift(&self) -> usize {
        (self.key % ALPHABET_LEN as u64) as usize
    }

    /// Apply the forward substitution to a text.
    ///
    /// Each symbol at position `i` maps to the symbol at
    /// `(i + key) mod 66`. With key `0` the input is returned unchanged.
    ///
    /// # Errors
    /// - Returns `InvalidCharacter` if the text contains a symbol outside
    ///   the alphabet; nothing is returned partially encoded
    pub fn encode(&self, text: &str) -> Result<String> {
        let shift = self.shift();
        text.chars()
            .map(|c| Ok(symbol((position(c)? + shift) % ALPHABET_LEN)))
            .collect()
    }

    /// Apply the inverse substitution to a text.
    ///
    /// Each symbol at position `i` maps to the symbol at
    /// `(i - key) mod 66`, so `decode(encode(s)) == s` for every
    /// alphabet-only string.
    ///
    /// # Errors
    /// - Returns `InvalidCharacter` if the text contains a symbol outside
    ///   the alphabet
    pub fn decode(&self, text: &str) -> Result<String> {
        let shift = self.shift();
        text.chars()
            .map(|c| Ok(symbol((position(c)? + ALPHABET_LEN - shift) % ALPHABET_LEN)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::ALPHABET;
    use proptest::prelude::*;

    #[test]
    fn test_derive_key_deterministic() {
        let k1 = CipherEngine::derive_key("secret").unwrap();
        let k2 = CipherEngine::derive_key("secret").unwrap();
        assert_eq!(k1, k2);
    }

    #[test]
    fn test_derive_key_worked_example() {
        // 'a' is position 0, 'b' is position 1.
        assert_eq!(CipherEngine::derive_key("ab").unwrap(), 1);
    }

    #[test]
    fn test_derive_key_empty_is_zero() {
        assert_eq!(CipherEngine::derive_key("").unwrap(), 0);
    }

    #[test]
    fn test_derive_key_foreign_symbol_fails() {
        assert!(CipherEngine::derive_key("pass word").is_err());
    }

    #[test]
    fn test_encode_worked_example() {
        let engine = CipherEngine::from_secret("ab").unwrap();
        assert_eq!(engine.key(), 1);
        assert_eq!(engine.encode("hello").unwrap(), "ifmmp");
        assert_eq!(engine.decode("ifmmp").unwrap(), "hello");
    }

    #[test]
    fn test_encode_wraps_around_alphabet() {
        let engine = CipherEngine::new(1);
        // '9' is the last symbol, so a shift of one wraps back to 'a'.
        assert_eq!(engine.encode("9").unwrap(), "a");
        assert_eq!(engine.decode("a").unwrap(), "9");
    }

    #[test]
    fn test_zero_key_is_identity() {
        let engine = CipherEngine::new(0);
        assert_eq!(engine.encode("hello").unwrap(), "hello");
        assert_eq!(engine.decode("hello").unwrap(), "hello");
    }

    #[test]
    fn test_key_multiple_of_alphabet_len_is_identity() {
        let engine = CipherEngine::new(ALPHABET_LEN as u64 * 3);
        assert_eq!(engine.encode("Pa55-w0rd").unwrap(), "Pa55-w0rd");
    }

    #[test]
    fn test_encode_preserves_length() {
        let engine = CipherEngine::from_secret("secret").unwrap();
        let encoded = engine.encode("linkedin").unwrap();
        assert_eq!(encoded.len(), "linkedin".len());
    }

    #[test]
    fn test_encode_foreign_symbol_fails() {
        let engine = CipherEngine::new(5);
        assert!(engine.encode("not valid").is_err());
        assert!(engine.decode("not valid").is_err());
    }

    fn alphabet_string() -> impl Strategy<Value = String> {
        proptest::collection::vec(0..ALPHABET_LEN, 0..64)
            .prop_map(|idxs| idxs.into_iter().map(|i| ALPHABET[i]).collect())
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(s in alphabet_string(), key in any::<u32>()) {
            let engine = CipherEngine::new(key as u64);
            let encoded = engine.encode(&s).unwrap();
            prop_assert_eq!(engine.decode(&encoded).unwrap(), s);
        }

        #[test]
        fn prop_zero_key_identity(s in alphabet_string()) {
            let engine = CipherEngine::new(0);
            prop_assert_eq!(engine.encode(&s).unwrap(), s.clone());
            prop_assert_eq!(engine.decode(&s).unwrap(), s);
        }
    }
}

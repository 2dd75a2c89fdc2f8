//! Key and key schedule types for AES-256.

use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::cipher::ROUNDS;

/// AES-256 key size in bytes.
pub const KEY_SIZE: usize = 32;

/// AES-256 key wrapper.
///
/// `Debug` is redacted so keys do not end up in logs. The bytes are wiped
/// on drop; clone explicitly when a second owner is needed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Aes256Key(pub [u8; KEY_SIZE]);

impl Aes256Key {
    /// Returns the raw key bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl From<[u8; KEY_SIZE]> for Aes256Key {
    fn from(value: [u8; KEY_SIZE]) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Aes256Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Aes256Key(..)")
    }
}

/// Encryption round keys: 15 round keys of four big-endian words (60 words).
///
/// Wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct RoundKeys(pub [[u32; 4]; ROUNDS + 1]);

impl RoundKeys {
    /// Returns the round key at the requested index (0..=14).
    #[inline]
    pub fn get(&self, round: usize) -> &[u32; 4] {
        &self.0[round]
    }
}

/// Decryption round keys in equivalent inverse-cipher form.
///
/// Index 0 is the last encryption round key; indices 1..=13 have had
/// InvMixColumns applied. Wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct InvRoundKeys(pub [[u32; 4]; ROUNDS + 1]);

impl InvRoundKeys {
    /// Returns the round key at the requested index (0..=14).
    #[inline]
    pub fn get(&self, round: usize) -> &[u32; 4] {
        &self.0[round]
    }
}

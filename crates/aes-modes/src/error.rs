//! Error type and the size checks every mode runs before touching data.

use core::fmt;

use aes_core::{Aes256Key, Block, BLOCK_SIZE, KEY_SIZE};
use thiserror::Error;

/// Which argument failed a size check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// Plaintext or ciphertext buffer.
    Data,
    /// AES-256 key.
    Key,
    /// Initialization vector.
    Iv,
}

/// The size rule an argument violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthRule {
    /// Must contain at least one byte.
    NonEmpty,
    /// Must be a multiple of the given number of bytes.
    MultipleOf(usize),
    /// Must be exactly the given number of bytes.
    Exactly(usize),
}

/// Failures reported before any cipher work starts.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Data, key or IV has the wrong size.
    #[error("{}", LengthMessage(.field, .rule))]
    InvalidLength {
        /// Offending argument.
        field: Field,
        /// Rule it broke.
        rule: LengthRule,
        /// Length that was supplied.
        actual: usize,
    },
    /// CTR cursor outside `0..16`.
    #[error("State value must be in the range [0, 15]")]
    InvalidState {
        /// Cursor that was supplied.
        cursor: u8,
    },
}

/// Result alias used across the crate.
pub type Result<T> = core::result::Result<T, Error>;

struct LengthMessage<'a>(&'a Field, &'a LengthRule);

impl fmt::Display for LengthMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subject = match *self.0 {
            Field::Data => "Data",
            Field::Key => "Key",
            Field::Iv => "IV",
        };
        match *self.1 {
            LengthRule::NonEmpty => write!(f, "{subject} must not be empty"),
            LengthRule::MultipleOf(n) => {
                write!(f, "{subject} size must match a multiple of {n} bytes")
            }
            LengthRule::Exactly(n) => write!(f, "{subject} size must be exactly {n} bytes"),
        }
    }
}

fn reject(field: Field, rule: LengthRule, actual: usize) -> Error {
    log::debug!("rejecting {field:?}: {actual} bytes violates {rule:?}");
    Error::InvalidLength {
        field,
        rule,
        actual,
    }
}

/// Data must be non-empty.
pub(crate) fn check_stream(data: &[u8]) -> Result<()> {
    if data.is_empty() {
        return Err(reject(Field::Data, LengthRule::NonEmpty, 0));
    }
    Ok(())
}

/// Data must be non-empty and block aligned.
pub(crate) fn check_blocks(data: &[u8]) -> Result<()> {
    check_stream(data)?;
    if data.len() % BLOCK_SIZE != 0 {
        return Err(reject(
            Field::Data,
            LengthRule::MultipleOf(BLOCK_SIZE),
            data.len(),
        ));
    }
    Ok(())
}

pub(crate) fn check_exact(field: Field, bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() != expected {
        return Err(reject(field, LengthRule::Exactly(expected), bytes.len()));
    }
    Ok(())
}

/// Builds a key from an untyped slice.
pub fn key_from_slice(bytes: &[u8]) -> Result<Aes256Key> {
    check_exact(Field::Key, bytes, KEY_SIZE)?;
    let mut key = [0u8; KEY_SIZE];
    key.copy_from_slice(bytes);
    Ok(Aes256Key::from(key))
}

/// Builds a 16-byte IV from an untyped slice.
pub fn iv_from_slice(bytes: &[u8]) -> Result<Block> {
    check_exact(Field::Iv, bytes, BLOCK_SIZE)?;
    Ok(load_block(bytes))
}

/// Copies a block-sized chunk into an owned block.
#[inline]
pub(crate) fn load_block(chunk: &[u8]) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(chunk);
    block
}

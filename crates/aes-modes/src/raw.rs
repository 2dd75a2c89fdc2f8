//! Byte-slice entry points for host bindings.
//!
//! These take untyped buffers, run every size check in a fixed order (data
//! emptiness, data alignment, key, IV, cursor) and then dispatch to the typed
//! modes. Nothing is computed unless all checks pass.

use aes_core::Block;

use crate::cbc::cbc;
use crate::ctr::{ctr_transform, CtrState};
use crate::direction::Direction;
use crate::error::{check_blocks, check_stream, iv_from_slice, key_from_slice, Result};
use crate::ige::{ige, IgeIv};

fn cbc256(direction: Direction, data: &[u8], key: &[u8], iv: &[u8]) -> Result<(Vec<u8>, Block)> {
    check_blocks(data)?;
    let key = key_from_slice(key)?;
    let iv = iv_from_slice(iv)?;
    let out = cbc(direction, data, &key, iv)?;
    Ok((out.data, out.iv))
}

/// AES-256-CBC encryption. Returns the ciphertext and the final IV.
pub fn cbc256_encrypt(data: &[u8], key: &[u8], iv: &[u8]) -> Result<(Vec<u8>, Block)> {
    cbc256(Direction::Encrypt, data, key, iv)
}

/// AES-256-CBC decryption. Returns the plaintext and the final IV.
pub fn cbc256_decrypt(data: &[u8], key: &[u8], iv: &[u8]) -> Result<(Vec<u8>, Block)> {
    cbc256(Direction::Decrypt, data, key, iv)
}

/// AES-256-CTR keystream XOR starting `cursor` bytes into the block for `iv`.
pub fn ctr256_transform(
    data: &[u8],
    key: &[u8],
    iv: &[u8],
    cursor: u8,
) -> Result<(Vec<u8>, CtrState)> {
    check_stream(data)?;
    let key = key_from_slice(key)?;
    let iv = iv_from_slice(iv)?;
    let state = CtrState::new(iv, cursor)?;
    ctr_transform(data, &key, state)
}

/// Alias of [`ctr256_transform`].
pub fn ctr256_encrypt(
    data: &[u8],
    key: &[u8],
    iv: &[u8],
    cursor: u8,
) -> Result<(Vec<u8>, CtrState)> {
    ctr256_transform(data, key, iv, cursor)
}

/// Alias of [`ctr256_transform`].
pub fn ctr256_decrypt(
    data: &[u8],
    key: &[u8],
    iv: &[u8],
    cursor: u8,
) -> Result<(Vec<u8>, CtrState)> {
    ctr256_transform(data, key, iv, cursor)
}

fn ige256(direction: Direction, data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    check_blocks(data)?;
    let key = key_from_slice(key)?;
    let iv = IgeIv::try_from(iv)?;
    ige(direction, data, &key, &iv)
}

/// AES-256-IGE encryption with a 32-byte IV.
pub fn ige256_encrypt(data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    ige256(Direction::Encrypt, data, key, iv)
}

/// AES-256-IGE decryption with a 32-byte IV.
pub fn ige256_decrypt(data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    ige256(Direction::Decrypt, data, key, iv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Field, LengthRule};

    fn length_error(field: Field, rule: LengthRule, actual: usize) -> Error {
        Error::InvalidLength {
            field,
            rule,
            actual,
        }
    }

    #[test]
    fn cbc_checks_in_order() {
        // Empty data wins over a bad key and IV.
        assert_eq!(
            cbc256_encrypt(&[], &[0u8; 3], &[0u8; 3]),
            Err(length_error(Field::Data, LengthRule::NonEmpty, 0))
        );
        assert_eq!(
            cbc256_decrypt(&[0u8; 17], &[0u8; 3], &[0u8; 3]),
            Err(length_error(Field::Data, LengthRule::MultipleOf(16), 17))
        );
        assert_eq!(
            cbc256_encrypt(&[0u8; 16], &[0u8; 31], &[0u8; 3]),
            Err(length_error(Field::Key, LengthRule::Exactly(32), 31))
        );
        assert_eq!(
            cbc256_decrypt(&[0u8; 16], &[0u8; 32], &[0u8; 15]),
            Err(length_error(Field::Iv, LengthRule::Exactly(16), 15))
        );
    }

    #[test]
    fn ctr_checks_in_order() {
        assert_eq!(
            ctr256_encrypt(&[], &[0u8; 32], &[0u8; 16], 99),
            Err(length_error(Field::Data, LengthRule::NonEmpty, 0))
        );
        assert_eq!(
            ctr256_encrypt(&[0u8; 5], &[0u8; 33], &[0u8; 16], 0),
            Err(length_error(Field::Key, LengthRule::Exactly(32), 33))
        );
        assert_eq!(
            ctr256_decrypt(&[0u8; 5], &[0u8; 32], &[0u8; 32], 0),
            Err(length_error(Field::Iv, LengthRule::Exactly(16), 32))
        );
        assert_eq!(
            ctr256_decrypt(&[0u8; 5], &[0u8; 32], &[0u8; 16], 16),
            Err(Error::InvalidState { cursor: 16 })
        );
    }

    #[test]
    fn ctr_accepts_unaligned_data() {
        let (out, state) = ctr256_transform(&[0u8; 7], &[1u8; 32], &[2u8; 16], 3).unwrap();
        assert_eq!(out.len(), 7);
        assert_eq!(state.cursor(), 10);
    }

    #[test]
    fn ige_checks_in_order() {
        assert_eq!(
            ige256_encrypt(&[0u8; 8], &[0u8; 32], &[0u8; 32]),
            Err(length_error(Field::Data, LengthRule::MultipleOf(16), 8))
        );
        assert_eq!(
            ige256_decrypt(&[0u8; 16], &[0u8; 16], &[0u8; 32]),
            Err(length_error(Field::Key, LengthRule::Exactly(32), 16))
        );
        assert_eq!(
            ige256_encrypt(&[0u8; 16], &[0u8; 32], &[0u8; 16]),
            Err(length_error(Field::Iv, LengthRule::Exactly(32), 16))
        );
    }

    #[test]
    fn outputs_match_typed_api() {
        let key = [3u8; 32];
        let data = [9u8; 48];
        let (cbc_out, cbc_iv) = cbc256_encrypt(&data, &key, &[4u8; 16]).unwrap();
        let typed = crate::cbc_encrypt(&data, &crate::Aes256Key::from(key), [4u8; 16]).unwrap();
        assert_eq!(cbc_out, typed.data);
        assert_eq!(cbc_iv, typed.iv);

        let ige_out = ige256_encrypt(&data, &key, &[5u8; 32]).unwrap();
        assert_eq!(ige256_decrypt(&ige_out, &key, &[5u8; 32]).unwrap(), data);
    }
}

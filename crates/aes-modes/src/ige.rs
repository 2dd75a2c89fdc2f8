//! AES-256-IGE (Infinite Garble Extension).
//!
//! Each block is masked before the cipher with the previous output block and
//! after the cipher with the previous input block. The 32-byte IV seeds both
//! masks; which half seeds which depends on the direction, and that layout is
//! what MTProto peers expect on the wire.

use aes_core::{
    decrypt_block, encrypt_block, expand_inv_key, expand_key, xor_in_place, Aes256Key, Block,
    BLOCK_SIZE,
};

use crate::direction::Direction;
use crate::error::{check_blocks, check_exact, load_block, Field, Result};

/// IGE IV size in bytes.
pub const IGE_IV_SIZE: usize = 2 * BLOCK_SIZE;

/// Two concatenated 16-byte chaining values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IgeIv(pub [u8; IGE_IV_SIZE]);

impl IgeIv {
    /// Returns the first and second 16-byte halves.
    pub fn halves(&self) -> (Block, Block) {
        let (first, second) = self.0.split_at(BLOCK_SIZE);
        (load_block(first), load_block(second))
    }
}

impl From<[u8; IGE_IV_SIZE]> for IgeIv {
    fn from(value: [u8; IGE_IV_SIZE]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for IgeIv {
    type Error = crate::Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        check_exact(Field::Iv, bytes, IGE_IV_SIZE)?;
        let mut iv = [0u8; IGE_IV_SIZE];
        iv.copy_from_slice(bytes);
        Ok(Self(iv))
    }
}

/// Runs IGE in the given direction.
///
/// `data` must be a non-empty multiple of 16 bytes.
pub fn ige(direction: Direction, data: &[u8], key: &Aes256Key, iv: &IgeIv) -> Result<Vec<u8>> {
    check_blocks(data)?;
    log::trace!("ige {direction} over {} bytes", data.len());
    Ok(match direction {
        Direction::Encrypt => encrypt_blocks(data, key, iv),
        Direction::Decrypt => decrypt_blocks(data, key, iv),
    })
}

/// Encrypts `data` in IGE mode.
pub fn ige_encrypt(data: &[u8], key: &Aes256Key, iv: &IgeIv) -> Result<Vec<u8>> {
    ige(Direction::Encrypt, data, key, iv)
}

/// Decrypts `data` in IGE mode.
pub fn ige_decrypt(data: &[u8], key: &Aes256Key, iv: &IgeIv) -> Result<Vec<u8>> {
    ige(Direction::Decrypt, data, key, iv)
}

fn encrypt_blocks(data: &[u8], key: &Aes256Key, iv: &IgeIv) -> Vec<u8> {
    let round_keys = expand_key(key);
    let (mut pre, mut post) = iv.halves();
    let mut out = vec![0u8; data.len()];

    for (input, output) in data
        .chunks_exact(BLOCK_SIZE)
        .zip(out.chunks_exact_mut(BLOCK_SIZE))
    {
        let chunk = load_block(input);
        let mut buffer = chunk;
        xor_in_place(&mut buffer, &pre);
        let mut block = encrypt_block(&buffer, &round_keys);
        xor_in_place(&mut block, &post);
        output.copy_from_slice(&block);

        pre = block;
        post = chunk;
    }

    out
}

fn decrypt_blocks(data: &[u8], key: &Aes256Key, iv: &IgeIv) -> Vec<u8> {
    let round_keys = expand_inv_key(key);
    // Halves swap roles relative to encryption.
    let (mut post, mut pre) = iv.halves();
    let mut out = vec![0u8; data.len()];

    for (input, output) in data
        .chunks_exact(BLOCK_SIZE)
        .zip(out.chunks_exact_mut(BLOCK_SIZE))
    {
        let chunk = load_block(input);
        let mut buffer = chunk;
        xor_in_place(&mut buffer, &pre);
        let mut block = decrypt_block(&buffer, &round_keys);
        xor_in_place(&mut block, &post);
        output.copy_from_slice(&block);

        pre = block;
        post = chunk;
    }

    out
}

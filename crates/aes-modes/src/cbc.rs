//! AES-256-CBC.

use aes_core::{
    decrypt_block, encrypt_block, expand_inv_key, expand_key, xor_in_place, Aes256Key, Block,
    BLOCK_SIZE,
};

use crate::direction::Direction;
use crate::error::{check_blocks, load_block, Result};

/// Output of a CBC call together with the final chaining value.
///
/// Feeding `iv` into the next call continues the chain as if both inputs had
/// been processed at once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chained {
    /// Transformed bytes, same length as the input.
    pub data: Vec<u8>,
    /// Chaining value after the last block.
    pub iv: Block,
}

/// Runs CBC in the given direction.
///
/// `data` must be a non-empty multiple of 16 bytes.
pub fn cbc(direction: Direction, data: &[u8], key: &Aes256Key, iv: Block) -> Result<Chained> {
    check_blocks(data)?;
    log::trace!("cbc {direction} over {} bytes", data.len());
    Ok(match direction {
        Direction::Encrypt => encrypt_blocks(data, key, iv),
        Direction::Decrypt => decrypt_blocks(data, key, iv),
    })
}

/// Encrypts `data` in CBC mode.
pub fn cbc_encrypt(data: &[u8], key: &Aes256Key, iv: Block) -> Result<Chained> {
    cbc(Direction::Encrypt, data, key, iv)
}

/// Decrypts `data` in CBC mode.
pub fn cbc_decrypt(data: &[u8], key: &Aes256Key, iv: Block) -> Result<Chained> {
    cbc(Direction::Decrypt, data, key, iv)
}

fn encrypt_blocks(data: &[u8], key: &Aes256Key, mut iv: Block) -> Chained {
    let round_keys = expand_key(key);
    let mut out = data.to_vec();

    for chunk in out.chunks_exact_mut(BLOCK_SIZE) {
        xor_in_place(chunk, &iv);
        iv = encrypt_block(&load_block(chunk), &round_keys);
        chunk.copy_from_slice(&iv);
    }

    Chained { data: out, iv }
}

fn decrypt_blocks(data: &[u8], key: &Aes256Key, mut iv: Block) -> Chained {
    let round_keys = expand_inv_key(key);
    let mut out = data.to_vec();

    for chunk in out.chunks_exact_mut(BLOCK_SIZE) {
        // The raw ciphertext becomes the next IV, so grab it before overwriting.
        let next_iv = load_block(chunk);
        let mut plain = decrypt_block(&next_iv, &round_keys);
        xor_in_place(&mut plain, &iv);
        chunk.copy_from_slice(&plain);
        iv = next_iv;
    }

    Chained { data: out, iv }
}

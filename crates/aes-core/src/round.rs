//! AES round transformations.
//!
//! The state is a column-major 16-byte block: byte `4 * c + r` holds row `r`
//! of column `c`, which is also the order of the input bytes.

use crate::block::Block;
use crate::sbox::{inv_sbox, sbox};

/// Source index of every output byte after ShiftRows.
const SHIFT_ROWS: [usize; 16] = [0, 5, 10, 15, 4, 9, 14, 3, 8, 13, 2, 7, 12, 1, 6, 11];

/// Source index of every output byte after InvShiftRows.
const INV_SHIFT_ROWS: [usize; 16] = [0, 13, 10, 7, 4, 1, 14, 11, 8, 5, 2, 15, 12, 9, 6, 3];

/// Applies SubBytes to the state in place.
#[inline]
pub fn sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub fn inv_sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = inv_sbox(*byte);
    }
}

fn permute(state: &mut Block, sources: &[usize; 16]) {
    let src = *state;
    for (dst, &idx) in state.iter_mut().zip(sources.iter()) {
        *dst = src[idx];
    }
}

/// Performs ShiftRows in place.
#[inline]
pub fn shift_rows(state: &mut Block) {
    permute(state, &SHIFT_ROWS);
}

/// Performs the inverse of ShiftRows in place.
#[inline]
pub fn inv_shift_rows(state: &mut Block) {
    permute(state, &INV_SHIFT_ROWS);
}

fn xtime(byte: u8) -> u8 {
    let shifted = byte << 1;
    if byte & 0x80 != 0 {
        shifted ^ 0x1b
    } else {
        shifted
    }
}

fn gmul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        a = xtime(a);
        b >>= 1;
    }
    product
}

fn mix_single_column(col: &mut [u8; 4]) {
    let [a0, a1, a2, a3] = *col;
    col[0] = xtime(a0) ^ (xtime(a1) ^ a1) ^ a2 ^ a3;
    col[1] = a0 ^ xtime(a1) ^ (xtime(a2) ^ a2) ^ a3;
    col[2] = a0 ^ a1 ^ xtime(a2) ^ (xtime(a3) ^ a3);
    col[3] = (xtime(a0) ^ a0) ^ a1 ^ a2 ^ xtime(a3);
}

fn inv_mix_single_column(col: &mut [u8; 4]) {
    let [a0, a1, a2, a3] = *col;
    col[0] = gmul(a0, 0x0e) ^ gmul(a1, 0x0b) ^ gmul(a2, 0x0d) ^ gmul(a3, 0x09);
    col[1] = gmul(a0, 0x09) ^ gmul(a1, 0x0e) ^ gmul(a2, 0x0b) ^ gmul(a3, 0x0d);
    col[2] = gmul(a0, 0x0d) ^ gmul(a1, 0x09) ^ gmul(a2, 0x0e) ^ gmul(a3, 0x0b);
    col[3] = gmul(a0, 0x0b) ^ gmul(a1, 0x0d) ^ gmul(a2, 0x09) ^ gmul(a3, 0x0e);
}

fn for_each_column(state: &mut Block, f: fn(&mut [u8; 4])) {
    for column in state.chunks_exact_mut(4) {
        let mut col = [column[0], column[1], column[2], column[3]];
        f(&mut col);
        column.copy_from_slice(&col);
    }
}

/// MixColumns over all four columns.
#[inline]
pub fn mix_columns(state: &mut Block) {
    for_each_column(state, mix_single_column);
}

/// Inverse MixColumns over all four columns.
#[inline]
pub fn inv_mix_columns(state: &mut Block) {
    for_each_column(state, inv_mix_single_column);
}

/// Inverse MixColumns applied to a single big-endian schedule word.
pub fn inv_mix_word(word: u32) -> u32 {
    let mut col = word.to_be_bytes();
    inv_mix_single_column(&mut col);
    u32::from_be_bytes(col)
}

/// XORs a round key into the state, one big-endian word per column.
#[inline]
pub fn add_round_key(state: &mut Block, round_key: &[u32; 4]) {
    for (column, word) in state.chunks_exact_mut(4).zip(round_key.iter()) {
        for (byte, key_byte) in column.iter_mut().zip(word.to_be_bytes()) {
            *byte ^= key_byte;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_rows_round_trips() {
        let mut state: Block = core::array::from_fn(|i| i as u8);
        let original = state;
        shift_rows(&mut state);
        assert_ne!(state, original);
        inv_shift_rows(&mut state);
        assert_eq!(state, original);
    }

    #[test]
    fn mix_columns_matches_fips_example() {
        // Column from the FIPS-197 round 1 trace (db 13 53 45 -> 8e 4d a1 bc).
        let mut state: Block = [
            0xdb, 0x13, 0x53, 0x45, 0xf2, 0x0a, 0x22, 0x5c, 0x01, 0x01, 0x01, 0x01, 0xc6, 0xc6,
            0xc6, 0xc6,
        ];
        mix_columns(&mut state);
        assert_eq!(&state[..8], &[0x8e, 0x4d, 0xa1, 0xbc, 0x9f, 0xdc, 0x58, 0x9d]);
        assert_eq!(&state[8..], &[0x01, 0x01, 0x01, 0x01, 0xc6, 0xc6, 0xc6, 0xc6]);
        inv_mix_columns(&mut state);
        assert_eq!(&state[..4], &[0xdb, 0x13, 0x53, 0x45]);
    }

    #[test]
    fn add_round_key_uses_big_endian_words() {
        let mut state = [0u8; 16];
        add_round_key(&mut state, &[0x0102_0304, 0, 0, 0xa0b0_c0d0]);
        assert_eq!(&state[..4], &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(&state[12..], &[0xa0, 0xb0, 0xc0, 0xd0]);
    }

    #[test]
    fn inv_mix_word_matches_block_transform() {
        let mut state = [0u8; 16];
        state[..4].copy_from_slice(&0x8e4d_a1bc_u32.to_be_bytes());
        inv_mix_columns(&mut state);
        assert_eq!(inv_mix_word(0x8e4d_a1bc), 0xdb13_5345);
        assert_eq!(&state[..4], &[0xdb, 0x13, 0x53, 0x45]);
    }
}

//! AES-256 key schedule and block encryption/decryption.

use zeroize::Zeroize;

use crate::block::Block;
use crate::key::{Aes256Key, InvRoundKeys, RoundKeys};
use crate::round::{
    add_round_key, inv_mix_columns, inv_mix_word, inv_shift_rows, inv_sub_bytes, mix_columns,
    shift_rows, sub_bytes,
};
use crate::sbox::sbox;

/// Number of AES-256 rounds.
pub const ROUNDS: usize = 14;

const KEY_WORDS: usize = 8;
const SCHEDULE_WORDS: usize = 4 * (ROUNDS + 1);

const RCON: [u8; 7] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40];

fn rot_word(word: u32) -> u32 {
    word.rotate_left(8)
}

fn sub_word(word: u32) -> u32 {
    u32::from_be_bytes(word.to_be_bytes().map(sbox))
}

fn expand_words(key: &Aes256Key) -> [u32; SCHEDULE_WORDS] {
    let mut w = [0u32; SCHEDULE_WORDS];
    for (word, chunk) in w.iter_mut().zip(key.as_bytes().chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    for i in KEY_WORDS..SCHEDULE_WORDS {
        let mut temp = w[i - 1];
        if i % KEY_WORDS == 0 {
            temp = sub_word(rot_word(temp)) ^ (u32::from(RCON[i / KEY_WORDS - 1]) << 24);
        } else if i % KEY_WORDS == 4 {
            temp = sub_word(temp);
        }
        w[i] = w[i - KEY_WORDS] ^ temp;
    }
    w
}

/// Expands a 256-bit key into the 15 encryption round keys.
pub fn expand_key(key: &Aes256Key) -> RoundKeys {
    let mut words = expand_words(key);
    let mut round_keys = RoundKeys([[0u32; 4]; ROUNDS + 1]);
    for (round_key, chunk) in round_keys.0.iter_mut().zip(words.chunks_exact(4)) {
        round_key.copy_from_slice(chunk);
    }
    words.zeroize();
    round_keys
}

/// Expands a 256-bit key into decryption round keys for the equivalent
/// inverse cipher (FIPS-197 section 5.3.5).
pub fn expand_inv_key(key: &Aes256Key) -> InvRoundKeys {
    let forward = expand_key(key);
    let mut round_keys = InvRoundKeys([[0u32; 4]; ROUNDS + 1]);
    for (round, round_key) in round_keys.0.iter_mut().enumerate() {
        let source = forward.get(ROUNDS - round);
        *round_key = if round == 0 || round == ROUNDS {
            *source
        } else {
            (*source).map(inv_mix_word)
        };
    }
    round_keys
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let mut state = *block;

    add_round_key(&mut state, round_keys.get(0));

    for round in 1..ROUNDS {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, round_keys.get(round));
    }

    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, round_keys.get(ROUNDS));

    state
}

/// Decrypts a single 16-byte block with inverse-cipher round keys.
pub fn decrypt_block(block: &Block, round_keys: &InvRoundKeys) -> Block {
    let mut state = *block;

    add_round_key(&mut state, round_keys.get(0));

    for round in 1..ROUNDS {
        inv_sub_bytes(&mut state);
        inv_shift_rows(&mut state);
        inv_mix_columns(&mut state);
        add_round_key(&mut state, round_keys.get(round));
    }

    inv_sub_bytes(&mut state);
    inv_shift_rows(&mut state);
    add_round_key(&mut state, round_keys.get(ROUNDS));

    state
}

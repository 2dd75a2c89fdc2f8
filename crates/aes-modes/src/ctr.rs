//! AES-256-CTR with a resumable keystream cursor.
//!
//! The counter block is incremented as a 128-bit big-endian integer. The
//! cursor records how many bytes of the current keystream block were already
//! used, so one logical stream can be split over any number of calls by
//! threading the returned [`CtrState`] into the next one.

use aes_core::{encrypt_block, expand_key, Aes256Key, Block, BLOCK_SIZE};

use crate::error::{check_stream, Error, Result};

/// Counter block plus the offset into its keystream block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CtrState {
    iv: Block,
    cursor: u8,
}

impl CtrState {
    /// Builds a state; `cursor` must be below 16.
    pub fn new(iv: Block, cursor: u8) -> Result<Self> {
        if usize::from(cursor) >= BLOCK_SIZE {
            log::debug!("rejecting ctr cursor {cursor}");
            return Err(Error::InvalidState { cursor });
        }
        Ok(Self { iv, cursor })
    }

    /// Starts a fresh stream at `iv`.
    pub fn from_iv(iv: Block) -> Self {
        Self { iv, cursor: 0 }
    }

    /// Current counter block.
    pub fn iv(&self) -> &Block {
        &self.iv
    }

    /// Bytes of the current keystream block already consumed.
    pub fn cursor(&self) -> u8 {
        self.cursor
    }
}

/// XORs `data` with the keystream described by `state`.
///
/// Encryption and decryption are the same operation. Returns the output and
/// the state to pass to the next call.
pub fn ctr_transform(
    data: &[u8],
    key: &Aes256Key,
    state: CtrState,
) -> Result<(Vec<u8>, CtrState)> {
    check_stream(data)?;
    log::trace!(
        "ctr over {} bytes starting at cursor {}",
        data.len(),
        state.cursor
    );

    let round_keys = expand_key(key);
    let CtrState { mut iv, cursor } = state;
    let mut cursor = usize::from(cursor);
    let mut keystream = encrypt_block(&iv, &round_keys);
    let mut out = data.to_vec();

    for byte in out.iter_mut() {
        *byte ^= keystream[cursor];
        cursor += 1;
        if cursor == BLOCK_SIZE {
            cursor = 0;
            increment_counter(&mut iv);
            keystream = encrypt_block(&iv, &round_keys);
        }
    }

    // cursor < BLOCK_SIZE here, so the narrowing is lossless.
    let next = CtrState {
        iv,
        cursor: cursor as u8,
    };
    Ok((out, next))
}

fn increment_counter(counter: &mut Block) {
    for byte in counter.iter_mut().rev() {
        *byte = byte.wrapping_add(1);
        if *byte != 0 {
            break;
        }
    }
}

/// CTR stream that owns its key and position between calls.
///
/// The key is wiped when the stream is dropped.
#[derive(Clone, Debug)]
pub struct Ctr256 {
    key: Aes256Key,
    state: CtrState,
}

impl Ctr256 {
    /// Creates a stream positioned at `state`.
    pub fn new(key: Aes256Key, state: CtrState) -> Self {
        Self { key, state }
    }

    /// Transforms the next chunk of the stream.
    pub fn apply(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let (out, next) = ctr_transform(data, &self.key, self.state)?;
        self.state = next;
        Ok(out)
    }

    /// Position the next call will resume from.
    pub fn state(&self) -> CtrState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Field, LengthRule};
    use rand::{Rng, RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn key_from_hex(s: &str) -> Aes256Key {
        let bytes: [u8; 32] = hex::decode(s).unwrap().try_into().unwrap();
        Aes256Key::from(bytes)
    }

    fn block_from_hex(s: &str) -> Block {
        hex::decode(s).unwrap().try_into().unwrap()
    }

    const NIST_KEY: &str = "603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4";
    const NIST_IV: &str = "f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff";
    const NIST_PLAIN: &str = "6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51\
                              30c81c46a35ce411e5fbc1191a0a52eff69f2445df4f9b17ad2b417be66c3710";
    const NIST_CIPHER: &str = "601ec313775789a5b7a7f504bbf3d228f443e3ca4d62b59aca84e990cacaf5c5\
                               2b0930daa23de94ce87017ba2d84988ddfc9c58db67aada613c2dd08457941a6";

    #[test]
    fn encrypt_matches_sp800_38a() {
        let plain = hex::decode(NIST_PLAIN).unwrap();
        let start = CtrState::from_iv(block_from_hex(NIST_IV));
        let (out, next) = ctr_transform(&plain, &key_from_hex(NIST_KEY), start).unwrap();
        assert_eq!(hex::encode(out), NIST_CIPHER);
        assert_eq!(next.cursor(), 0);
        assert_eq!(hex::encode(next.iv()), "f0f1f2f3f4f5f6f7f8f9fafbfcfdff03");
    }

    #[test]
    fn decrypt_is_the_same_transform() {
        let cipher = hex::decode(NIST_CIPHER).unwrap();
        let start = CtrState::from_iv(block_from_hex(NIST_IV));
        let (out, _) = ctr_transform(&cipher, &key_from_hex(NIST_KEY), start).unwrap();
        assert_eq!(hex::encode(out), NIST_PLAIN);
    }

    #[test]
    fn partial_block_leaves_cursor_mid_block() {
        let start = CtrState::from_iv(block_from_hex(NIST_IV));
        let (_, next) = ctr_transform(&[0u8; 20], &key_from_hex(NIST_KEY), start).unwrap();
        assert_eq!(next.cursor(), 4);
        assert_eq!(hex::encode(next.iv()), "f0f1f2f3f4f5f6f7f8f9fafbfcfdff00");
    }

    #[test]
    fn every_split_point_matches_single_call() {
        let key = key_from_hex(NIST_KEY);
        let plain = hex::decode(NIST_PLAIN).unwrap();
        let start = CtrState::from_iv(block_from_hex(NIST_IV));
        let (whole, whole_state) = ctr_transform(&plain, &key, start).unwrap();

        for split in 1..plain.len() {
            let (head, mid) = ctr_transform(&plain[..split], &key, start).unwrap();
            let (tail, end) = ctr_transform(&plain[split..], &key, mid).unwrap();
            assert_eq!([head, tail].concat(), whole, "split at {split}");
            assert_eq!(end, whole_state);
        }
    }

    #[test]
    fn stream_object_resumes_across_random_chunks() {
        let mut rng = ChaCha20Rng::seed_from_u64(0xc7);
        let mut key = [0u8; 32];
        let mut iv = [0u8; 16];
        rng.fill_bytes(&mut key);
        rng.fill_bytes(&mut iv);
        let key = Aes256Key::from(key);
        let mut data = vec![0u8; 1000];
        rng.fill_bytes(&mut data);

        let (expected, _) = ctr_transform(&data, &key, CtrState::from_iv(iv)).unwrap();

        let mut stream = Ctr256::new(key, CtrState::from_iv(iv));
        let mut actual = Vec::new();
        let mut offset = 0;
        while offset < data.len() {
            let len = rng.gen_range(1..=40).min(data.len() - offset);
            actual.extend(stream.apply(&data[offset..offset + len]).unwrap());
            offset += len;
        }
        assert_eq!(actual, expected);
    }

    #[test]
    fn counter_carries_into_higher_bytes() {
        let mut counter = block_from_hex("000000000000000000000000000100ff");
        increment_counter(&mut counter);
        assert_eq!(hex::encode(counter), "00000000000000000000000000010100");

        let mut counter = block_from_hex("0000000000000000000000000000ffff");
        increment_counter(&mut counter);
        assert_eq!(hex::encode(counter), "00000000000000000000000000010000");
    }

    #[test]
    fn counter_wraps_at_top() {
        let key = Aes256Key::from([0u8; 32]);
        let (out, next) = ctr_transform(&[0u8; 32], &key, CtrState::from_iv([0xff; 16])).unwrap();
        assert_eq!(
            hex::encode(out),
            "acdace8078a32b1a182bfa4987ca1347dc95c078a2408989ad48a21492842087"
        );
        assert_eq!(hex::encode(next.iv()), "00000000000000000000000000000001");
        assert_eq!(next.cursor(), 0);
    }

    #[test]
    fn counter_wrap_mid_block_keeps_cursor() {
        let key = Aes256Key::from([0u8; 32]);
        let (out, next) = ctr_transform(&[0u8; 17], &key, CtrState::from_iv([0xff; 16])).unwrap();
        assert_eq!(hex::encode(out), "acdace8078a32b1a182bfa4987ca1347dc");
        assert_eq!(next.iv(), &[0u8; 16]);
        assert_eq!(next.cursor(), 1);
    }

    #[test]
    fn cursor_must_stay_inside_a_block() {
        assert!(CtrState::new([0u8; 16], 15).is_ok());
        assert_eq!(
            CtrState::new([0u8; 16], 16),
            Err(Error::InvalidState { cursor: 16 })
        );
        assert_eq!(
            CtrState::new([0u8; 16], 255),
            Err(Error::InvalidState { cursor: 255 })
        );
    }

    #[test]
    fn rejects_empty_data() {
        let key = Aes256Key::from([0u8; 32]);
        assert_eq!(
            ctr_transform(&[], &key, CtrState::from_iv([0u8; 16])),
            Err(Error::InvalidLength {
                field: Field::Data,
                rule: LengthRule::NonEmpty,
                actual: 0,
            })
        );
    }
}

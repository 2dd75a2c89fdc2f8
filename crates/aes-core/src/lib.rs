//! Reference AES-256 block cipher shared by the chaining modes in `aes-modes`.
//!
//! This crate follows FIPS-197 and provides:
//! - The AES-256 key schedule, in both the forward form and the equivalent
//!   inverse-cipher form used for decryption.
//! - Single-block encryption and decryption.
//! - The fixed-size key and block types used across the workspace.
//!
//! Round keys are stored as big-endian words relative to memory order, so the
//! schedule and ciphertext bytes are identical on every host.
//!
//! Substitution is table-driven and therefore not constant-time; it should not
//! be treated as side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod key;
mod round;
mod sbox;

pub use crate::block::{xor_in_place, Block, BLOCK_SIZE};
pub use crate::cipher::{decrypt_block, encrypt_block, expand_inv_key, expand_key, ROUNDS};
pub use crate::key::{Aes256Key, InvRoundKeys, RoundKeys, KEY_SIZE};

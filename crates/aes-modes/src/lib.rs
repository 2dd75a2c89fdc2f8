//! AES-256 chaining modes built on the `aes-core` block cipher.
//!
//! Three modes are provided:
//! - [`cbc`]: cipher block chaining with a single rolling 16-byte IV.
//! - [`ctr`]: counter mode with a byte cursor so a stream can be resumed
//!   across calls.
//! - [`ige`]: Infinite Garble Extension, a two-chain mode used by MTProto
//!   peers; corrupting one ciphertext block garbles all later plaintext.
//!
//! Every call derives its own key schedule and returns a freshly allocated
//! buffer. Chaining state is passed in by value and the advanced state is
//! handed back, so nothing is mutated behind the caller's back. All size
//! checks run before any block is processed.
//!
//! The [`raw`] module exposes the same operations over untyped byte slices for
//! host bindings that only see buffers.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cbc;
pub mod ctr;
mod direction;
mod error;
pub mod ige;
pub mod raw;

pub use aes_core::{Aes256Key, Block, BLOCK_SIZE, KEY_SIZE};

pub use crate::cbc::{cbc, cbc_decrypt, cbc_encrypt, Chained};
pub use crate::ctr::{ctr_transform, Ctr256, CtrState};
pub use crate::direction::Direction;
pub use crate::error::{iv_from_slice, key_from_slice, Error, Field, LengthRule, Result};
pub use crate::ige::{ige, ige_decrypt, ige_encrypt, IgeIv, IGE_IV_SIZE};

#![allow(deprecated)]
//! Raw single-block adapters over the underlying block ciphers.
//!
//! The Feistel round consumes exactly one 16-byte ECB encryption per round.
//! For AES that is one native block; for the 64-bit 3DES ciphers used by the
//! BPS chaining mode it is two independent 8-byte blocks. No mode, padding,
//! or IV state is involved, and the key schedule is built once at
//! construction.

#[allow(deprecated)]
use aes::cipher::{Array, BlockCipherEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256};
use des::{TdesEde2, TdesEde3};
use zeroize::Zeroize;

use crate::common::{BLOCK_LENGTH, Error};

/// A block cipher usable as the round function of the engine.
///
/// The FF3 family keys the cipher with the byte-reversed form of the
/// caller's key; `with_reversed_key` performs that reversal internally so
/// callers always pass the logical key.
pub trait FpeCipher: Sized {
    /// Native block width in bits.
    const BLOCK_BITS: usize;

    /// Build the cipher from the logical key, loading its byte-reversed
    /// form into the key schedule.
    fn with_reversed_key(key: &[u8]) -> Result<Self, Error>;

    /// Raw ECB encryption of one 16-byte chunk.
    fn encrypt16(&self, block: &mut [u8; BLOCK_LENGTH]);
}

/// Reverse the key into a stack buffer, build the key schedule, wipe the
/// buffer.
fn keyed_reversed<T: KeyInit>(key: &[u8]) -> Result<T, Error> {
    if key.len() > 32 {
        return Err(Error::KeyLength);
    }
    let mut buf = [0u8; 32];
    let staged = &mut buf[..key.len()];
    staged.copy_from_slice(key);
    staged.reverse();
    let out = T::new_from_slice(staged).map_err(|_| Error::KeyLength);
    buf.zeroize();
    out
}

impl FpeCipher for Aes128 {
    const BLOCK_BITS: usize = 128;

    fn with_reversed_key(key: &[u8]) -> Result<Self, Error> {
        keyed_reversed(key)
    }

    fn encrypt16(&self, block: &mut [u8; BLOCK_LENGTH]) {
        let mut b = Array::clone_from_slice(block);
        self.encrypt_block(&mut b);
        block.copy_from_slice(b.as_slice());
    }
}

impl FpeCipher for Aes192 {
    const BLOCK_BITS: usize = 128;

    fn with_reversed_key(key: &[u8]) -> Result<Self, Error> {
        keyed_reversed(key)
    }

    fn encrypt16(&self, block: &mut [u8; BLOCK_LENGTH]) {
        let mut b = Array::clone_from_slice(block);
        self.encrypt_block(&mut b);
        block.copy_from_slice(b.as_slice());
    }
}

impl FpeCipher for Aes256 {
    const BLOCK_BITS: usize = 128;

    fn with_reversed_key(key: &[u8]) -> Result<Self, Error> {
        keyed_reversed(key)
    }

    fn encrypt16(&self, block: &mut [u8; BLOCK_LENGTH]) {
        let mut b = Array::clone_from_slice(block);
        self.encrypt_block(&mut b);
        block.copy_from_slice(b.as_slice());
    }
}

impl FpeCipher for TdesEde2 {
    const BLOCK_BITS: usize = 64;

    fn with_reversed_key(key: &[u8]) -> Result<Self, Error> {
        keyed_reversed(key)
    }

    fn encrypt16(&self, block: &mut [u8; BLOCK_LENGTH]) {
        let (left, right) = block.split_at_mut(8);
        let mut b = Array::clone_from_slice(left);
        self.encrypt_block(&mut b);
        left.copy_from_slice(b.as_slice());
        let mut b = Array::clone_from_slice(right);
        self.encrypt_block(&mut b);
        right.copy_from_slice(b.as_slice());
    }
}

impl FpeCipher for TdesEde3 {
    const BLOCK_BITS: usize = 64;

    fn with_reversed_key(key: &[u8]) -> Result<Self, Error> {
        keyed_reversed(key)
    }

    fn encrypt16(&self, block: &mut [u8; BLOCK_LENGTH]) {
        let (left, right) = block.split_at_mut(8);
        let mut b = Array::clone_from_slice(left);
        self.encrypt_block(&mut b);
        left.copy_from_slice(b.as_slice());
        let mut b = Array::clone_from_slice(right);
        self.encrypt_block(&mut b);
        right.copy_from_slice(b.as_slice());
    }
}

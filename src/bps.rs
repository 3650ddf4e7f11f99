//! BPS-style chaining: extends the single-block Feistel engine to inputs
//! longer than one block.
//!
//! Inputs up to the engine's block length are a single Feistel call. Longer
//! inputs are split into block-length pieces chained CBC-like: each block
//! is digit-wise added (mod radix) to the previous ciphertext block before
//! encryption, and a trailing partial block is handled by re-encrypting the
//! last full-length window so that it overlaps the previous block.
//!
//! The tweak is the 8-byte legacy layout; a per-block counter is XOR-ed
//! into tweak bytes 1 and 5. The counter is applied to an owned copy, so
//! the caller's tweak bytes are never modified.

use aes::Aes128;
use des::{TdesEde2, TdesEde3};
use zeroize::Zeroize;

use crate::block::FpeCipher;
use crate::common::{Direction, Error, MAX_SINGLE_BLOCK_LEN};
use crate::ff3::Ff3;

#[cfg(feature = "std")]
use crate::alphabet::Alphabet;

/// BPS chaining engine over a block cipher.
///
/// Wraps a legacy-tweak [`Ff3`] engine whose `max_len` is the chaining
/// block length.
pub struct Bps<C: FpeCipher> {
    block: Ff3<C>,
}

#[allow(non_camel_case_types)]
/// BPS chaining with AES-128.
pub type Bps_128 = Bps<Aes128>;

#[allow(non_camel_case_types)]
/// BPS chaining with two-key 3DES.
pub type Bps_Tdes2 = Bps<TdesEde2>;

#[allow(non_camel_case_types)]
/// BPS chaining with three-key 3DES.
pub type Bps_Tdes3 = Bps<TdesEde3>;

impl<C: FpeCipher> Bps<C> {
    /// Build a chaining engine from the logical key and domain parameters.
    ///
    /// `max_len` doubles as the chaining block length. Legacy 8-byte tweak
    /// support is always enabled on the inner engine; the chaining counter
    /// lives in the 8-byte layout.
    pub fn new(key: &[u8], radix: u32, min_len: usize, max_len: usize) -> Result<Self, Error> {
        Ok(Bps {
            block: Ff3::new(key, radix, min_len, max_len, true)?,
        })
    }

    pub fn radix(&self) -> u32 {
        self.block.radix()
    }

    /// Chaining block length: inputs up to this length take a single
    /// Feistel call.
    pub fn block_len(&self) -> usize {
        self.block.max_len()
    }

    /// Encrypt a digit string of any length from the engine minimum up.
    pub fn encrypt(
        &self,
        plaintext: &[u16],
        tweak: &[u8],
        ciphertext: &mut [u16],
    ) -> Result<(), Error> {
        self.chain_slices(plaintext, tweak, ciphertext, Direction::Encrypt)
    }

    /// Decrypt a digit string of any length from the engine minimum up.
    pub fn decrypt(
        &self,
        ciphertext: &[u16],
        tweak: &[u8],
        plaintext: &mut [u16],
    ) -> Result<(), Error> {
        self.chain_slices(ciphertext, tweak, plaintext, Direction::Decrypt)
    }

    fn chain_slices(
        &self,
        src: &[u16],
        tweak: &[u8],
        dst: &mut [u16],
        dir: Direction,
    ) -> Result<(), Error> {
        if dst.len() < src.len() {
            return Err(Error::OutputTooShort);
        }
        let dst = &mut dst[..src.len()];
        dst.copy_from_slice(src);
        let result = self.chain(dst, tweak, dir);
        if result.is_err() {
            dst.zeroize();
        }
        result
    }

    /// The chaining core, in place over `text`.
    fn chain(&self, text: &mut [u16], tweak: &[u8], dir: Direction) -> Result<(), Error> {
        // An absent tweak is an all-zero 8-byte one; 7-byte tweaks have no
        // room for the chaining counter and are rejected here.
        let mut twk = [0u8; 8];
        match tweak.len() {
            0 => {}
            8 => twk.copy_from_slice(tweak),
            _ => return Err(Error::TweakLength),
        }
        for &d in text.iter() {
            if d as u32 >= self.block.radix() {
                return Err(Error::InvalidDigit);
            }
        }

        if text.len() <= self.block.max_len() {
            return self.block.feistel(text, &twk, dir);
        }

        let mut tmp = [0u16; MAX_SINGLE_BLOCK_LEN];
        let result = match dir {
            Direction::Encrypt => self.chain_encrypt(text, &mut twk, &mut tmp),
            Direction::Decrypt => self.chain_decrypt(text, &mut twk, &mut tmp),
        };
        tmp.zeroize();
        result
    }

    fn chain_encrypt(
        &self,
        text: &mut [u16],
        twk: &mut [u8; 8],
        tmp: &mut [u16; MAX_SINGLE_BLOCK_LEN],
    ) -> Result<(), Error> {
        let radix = self.block.radix();
        let blen = self.block.max_len();
        let n = text.len();
        let full = n / blen;
        let rest = n % blen;
        let tmp = &mut tmp[..blen];

        let mut c = 0;
        for i in 0..full {
            tmp.copy_from_slice(&text[c..c + blen]);
            if i > 0 {
                for (t, &prev) in tmp.iter_mut().zip(&text[c - blen..c]) {
                    *t = add_digit(*t, prev, radix);
                }
            }
            perturb(twk, i as u8);
            let r = self.block.feistel(tmp, twk, Direction::Encrypt);
            perturb(twk, i as u8);
            r?;
            text[c..c + blen].copy_from_slice(tmp);
            c += blen;
        }

        if rest > 0 {
            // Fold the tail into the previous ciphertext, then re-encrypt
            // the last full-length window; it overlaps the previous block
            // by blen - rest digits.
            for idx in n - rest..n {
                text[idx] = add_digit(text[idx], text[idx - blen], radix);
            }
            tmp.copy_from_slice(&text[n - blen..]);
            perturb(twk, full as u8);
            let r = self.block.feistel(tmp, twk, Direction::Encrypt);
            perturb(twk, full as u8);
            r?;
            text[n - blen..].copy_from_slice(tmp);
        }
        Ok(())
    }

    fn chain_decrypt(
        &self,
        text: &mut [u16],
        twk: &mut [u8; 8],
        tmp: &mut [u16; MAX_SINGLE_BLOCK_LEN],
    ) -> Result<(), Error> {
        let radix = self.block.radix();
        let blen = self.block.max_len();
        let n = text.len();
        let full = n / blen;
        let rest = n % blen;
        let tmp = &mut tmp[..blen];

        if rest > 0 {
            tmp.copy_from_slice(&text[n - blen..]);
            perturb(twk, full as u8);
            let r = self.block.feistel(tmp, twk, Direction::Decrypt);
            perturb(twk, full as u8);
            r?;
            // Unfold the overlapped tail against the ciphertext digits it
            // was mixed with.
            for idx in 1..=rest {
                tmp[blen - idx] = sub_digit(tmp[blen - idx], text[n - idx - blen], radix);
            }
            text[n - blen..].copy_from_slice(tmp);
        }

        let mut c = full * blen;
        let mut i = full;
        while i > 0 {
            i -= 1;
            tmp.copy_from_slice(&text[c - blen..c]);
            perturb(twk, i as u8);
            let r = self.block.feistel(tmp, twk, Direction::Decrypt);
            perturb(twk, i as u8);
            r?;
            if i > 0 {
                for (t, &prev) in tmp.iter_mut().zip(&text[c - 2 * blen..c - blen]) {
                    *t = sub_digit(*t, prev, radix);
                }
            }
            text[c - blen..c].copy_from_slice(tmp);
            c -= blen;
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
impl<C: FpeCipher> Bps<C> {
    /// Encrypt a string over the alphabet, chaining as needed. Characters
    /// outside the alphabet pass through unchanged at their positions.
    pub fn encrypt_str(
        &self,
        plaintext: &str,
        tweak: &[u8],
        alphabet: &Alphabet,
    ) -> Result<String, Error> {
        self.chain_str(plaintext, tweak, alphabet, Direction::Encrypt)
    }

    /// Decrypt a string over the alphabet.
    pub fn decrypt_str(
        &self,
        ciphertext: &str,
        tweak: &[u8],
        alphabet: &Alphabet,
    ) -> Result<String, Error> {
        self.chain_str(ciphertext, tweak, alphabet, Direction::Decrypt)
    }

    fn chain_str(
        &self,
        input: &str,
        tweak: &[u8],
        alphabet: &Alphabet,
        dir: Direction,
    ) -> Result<String, Error> {
        if alphabet.radix() != self.block.radix() {
            return Err(Error::RadixMismatch);
        }
        let (mut digits, formatting) = alphabet.decode(input);
        let out = self
            .chain(&mut digits, tweak, dir)
            .and_then(|()| alphabet.encode(&digits, &formatting));
        digits.zeroize();
        out
    }
}

/// XOR the block counter into the chaining bytes of the tweak. Applying it
/// twice restores the tweak.
fn perturb(twk: &mut [u8; 8], i: u8) {
    twk[1] ^= i;
    twk[5] ^= i;
}

fn add_digit(a: u16, b: u16, radix: u32) -> u16 {
    ((a as u32 + b as u32) % radix) as u16
}

fn sub_digit(a: u16, b: u16, radix: u32) -> u16 {
    ((a as u32 + radix - b as u32) % radix) as u16
}

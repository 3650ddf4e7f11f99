//! FF3-1 format-preserving Feistel cipher, with optional legacy-FF3 tweak
//! support.
//!
//! The engine enciphers a string of radix-r digits into another string of
//! the same length over the same radix, under a key and a 7-byte (FF3-1) or
//! 8-byte (legacy FF3) tweak. Construction:
//! - Eight-round unbalanced Feistel over the two halves of the digit string
//! - One raw block-cipher call per round, byte-reversed on both sides
//! - Radix-domain arithmetic modulo radix^halflen in fixed-width
//!   accumulators
//!
//! Security properties:
//! - Ciphertext length equals plaintext length
//! - All ciphertext digits are in range [0, radix)
//! - The legacy 8-byte tweak variant is withdrawn by NIST and kept only for
//!   interoperability; prefer 7-byte tweaks
//! - No authentication - consider AEAD if integrity protection is needed

use aes::{Aes128, Aes192, Aes256};
use zeroize::Zeroize;

use crate::block::FpeCipher;
use crate::common::{BLOCK_LENGTH, Direction, Error};
use crate::num::{Acc128, Acc96, Divisor};

#[cfg(feature = "std")]
use crate::alphabet::Alphabet;

/// Smallest text length valid for the radix: at least 2 digits, and a
/// domain of at least 10^6 messages.
pub fn min_text_len(radix: u32) -> usize {
    let mut acc: u128 = 1;
    let mut m = 0;
    while acc < 1_000_000 {
        acc *= radix as u128;
        m += 1;
    }
    m.max(2)
}

/// Largest text length a single Feistel block supports for the radix and
/// block width: twice the largest t with radix^t < 2^(block_bits - 32).
///
/// The strict bound keeps every half-string value and divisor inside the
/// 96-bit accumulator. For a 128-bit block this yields 56 at radix 10, 40
/// at radix 26; for the 64-bit 3DES block, 18 at radix 10.
pub fn max_text_len(radix: u32, block_bits: usize) -> usize {
    let cap: u128 = 1 << (block_bits - 32);
    let mut acc: u128 = radix as u128;
    let mut t = 0;
    while acc < cap {
        t += 1;
        acc *= radix as u128;
    }
    2 * t
}

/// FF3-1 engine over a block cipher.
#[derive(Debug)]
pub struct Ff3<C: FpeCipher> {
    cipher: C,
    radix: u32,
    min_len: usize,
    max_len: usize,
    legacy_tweak: bool,
}

#[allow(non_camel_case_types)]
/// FF3-1 with AES-128.
pub type Ff3_128 = Ff3<Aes128>;

#[allow(non_camel_case_types)]
/// FF3-1 with AES-192.
pub type Ff3_192 = Ff3<Aes192>;

#[allow(non_camel_case_types)]
/// FF3-1 with AES-256.
pub type Ff3_256 = Ff3<Aes256>;

impl<C: FpeCipher> Ff3<C> {
    /// Build an engine from the logical key and domain parameters.
    ///
    /// The key is loaded byte-reversed per the FF3 convention; callers pass
    /// the key as written. With `legacy_tweak`, 8-byte tweaks are accepted
    /// in addition to 7-byte ones.
    ///
    /// # Errors
    /// Any violated construction invariant: block wider than 128 bits,
    /// radix outside [2, 65536], `min_len` below [`min_text_len`],
    /// `min_len > max_len`, `max_len` above [`max_text_len`], or a key of
    /// the wrong size for the cipher.
    pub fn new(
        key: &[u8],
        radix: u32,
        min_len: usize,
        max_len: usize,
        legacy_tweak: bool,
    ) -> Result<Self, Error> {
        if C::BLOCK_BITS > 128 {
            return Err(Error::BlockSize);
        }
        if !(2..=65536).contains(&radix) {
            return Err(Error::RadixOutOfRange);
        }
        if min_len < min_text_len(radix) {
            return Err(Error::MinLengthInvalid);
        }
        if min_len > max_len {
            return Err(Error::LengthBounds);
        }
        if max_len > max_text_len(radix, C::BLOCK_BITS) {
            return Err(Error::MaxLengthTooLarge);
        }
        let cipher = C::with_reversed_key(key)?;
        Ok(Ff3 {
            cipher,
            radix,
            min_len,
            max_len,
            legacy_tweak,
        })
    }

    pub fn radix(&self) -> u32 {
        self.radix
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Encrypt a digit string.
    ///
    /// Digits must be in `[0, radix)`; the output buffer must be at least
    /// as long as the input and receives exactly `plaintext.len()` digits.
    pub fn encrypt(
        &self,
        plaintext: &[u16],
        tweak: &[u8],
        ciphertext: &mut [u16],
    ) -> Result<(), Error> {
        self.cipher_slices(plaintext, tweak, ciphertext, Direction::Encrypt)
    }

    /// Decrypt a digit string.
    pub fn decrypt(
        &self,
        ciphertext: &[u16],
        tweak: &[u8],
        plaintext: &mut [u16],
    ) -> Result<(), Error> {
        self.cipher_slices(ciphertext, tweak, plaintext, Direction::Decrypt)
    }

    fn cipher_slices(
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
        let result = self.feistel(dst, tweak, dir);
        if result.is_err() {
            dst.zeroize();
        }
        result
    }

    /// Derive the two 4-byte round tweaks. An empty tweak is equivalent to
    /// a zero tweak.
    fn split_tweak(&self, tweak: &[u8]) -> Result<([u8; 4], [u8; 4]), Error> {
        match tweak.len() {
            0 => Ok(([0u8; 4], [0u8; 4])),
            7 => Ok(split_tweak_56(tweak)),
            8 if self.legacy_tweak => Ok(split_tweak_64(tweak)),
            _ => Err(Error::TweakLength),
        }
    }

    /// The eight-round core, in place over `text`.
    pub(crate) fn feistel(
        &self,
        text: &mut [u16],
        tweak: &[u8],
        dir: Direction,
    ) -> Result<(), Error> {
        let n = text.len();
        if n < self.min_len || n > self.max_len {
            return Err(Error::TextLength);
        }
        for &d in text.iter() {
            if d as u32 >= self.radix {
                return Err(Error::InvalidDigit);
            }
        }
        let (tl, tr) = self.split_tweak(tweak)?;

        let u = n.div_ceil(2);
        let v = n - u;
        let div_u = Divisor::new(Acc96::radix_pow(self.radix, u));
        let div_v = if u == v {
            div_u
        } else {
            Divisor::new(Acc96::radix_pow(self.radix, v))
        };

        // The halves travel through the rounds as numbers; the role
        // rotation (A,B) <- (B,C) is a value rotation, and digits are only
        // rematerialized once at the end.
        let mut na = num_rev(self.radix, &text[..u]);
        let mut nb = num_rev(self.radix, &text[u..]);

        let mut p = [0u8; BLOCK_LENGTH];
        for step in 0..8u32 {
            let round = match dir {
                Direction::Encrypt => step,
                Direction::Decrypt => 7 - step,
            };
            // Even rounds work on the long half with T_R, odd rounds on
            // the short half with T_L.
            let (div, w) = if round % 2 == 0 {
                (&div_u, &tr)
            } else {
                (&div_v, &tl)
            };

            p[..4].copy_from_slice(w);
            p[3] ^= round as u8;
            match dir {
                Direction::Encrypt => nb.copy_to(&mut p[4..]),
                Direction::Decrypt => na.copy_to(&mut p[4..]),
            }

            p.reverse();
            self.cipher.encrypt16(&mut p);
            p.reverse();

            let mut y = Acc128::from_be_bytes(&p).rem96(div);
            match dir {
                Direction::Encrypt => {
                    let c = na.add_mod(&y, div.value());
                    na = nb;
                    nb = c;
                }
                Direction::Decrypt => {
                    let c = nb.sub_mod(&y, div.value());
                    nb = na;
                    na = c;
                }
            }
            y.zeroize();
        }

        str_rev(self.radix, &na, &mut text[..u]);
        str_rev(self.radix, &nb, &mut text[u..]);

        p.zeroize();
        na.zeroize();
        nb.zeroize();
        Ok(())
    }
}

#[cfg(feature = "std")]
impl<C: FpeCipher> Ff3<C> {
    /// Encrypt a string over the alphabet. Characters outside the alphabet
    /// pass through unchanged at their original positions.
    pub fn encrypt_str(
        &self,
        plaintext: &str,
        tweak: &[u8],
        alphabet: &Alphabet,
    ) -> Result<String, Error> {
        self.cipher_str(plaintext, tweak, alphabet, Direction::Encrypt)
    }

    /// Decrypt a string over the alphabet.
    pub fn decrypt_str(
        &self,
        ciphertext: &str,
        tweak: &[u8],
        alphabet: &Alphabet,
    ) -> Result<String, Error> {
        self.cipher_str(ciphertext, tweak, alphabet, Direction::Decrypt)
    }

    fn cipher_str(
        &self,
        input: &str,
        tweak: &[u8],
        alphabet: &Alphabet,
        dir: Direction,
    ) -> Result<String, Error> {
        if alphabet.radix() != self.radix {
            return Err(Error::RadixMismatch);
        }
        let (mut digits, formatting) = alphabet.decode(input);
        let out = self
            .feistel(&mut digits, tweak, dir)
            .and_then(|()| alphabet.encode(&digits, &formatting));
        digits.zeroize();
        out
    }
}

/// 7-byte FF3-1 layout: T_L takes bytes 0..3 and the high nibble of byte 3,
/// T_R takes bytes 4..7 and the low nibble of byte 3 shifted up.
fn split_tweak_56(t: &[u8]) -> ([u8; 4], [u8; 4]) {
    ([t[0], t[1], t[2], t[3] & 0xF0], [t[4], t[5], t[6], t[3] << 4])
}

/// 8-byte legacy layout: plain halves.
fn split_tweak_64(t: &[u8]) -> ([u8; 4], [u8; 4]) {
    ([t[0], t[1], t[2], t[3]], [t[4], t[5], t[6], t[7]])
}

/// Fold a half into a value, least significant digit first.
fn num_rev(radix: u32, digits: &[u16]) -> Acc96 {
    let mut acc = Acc96::ZERO;
    for &d in digits.iter().rev() {
        acc.multiply_add(radix as u64, d as u32);
    }
    acc
}

/// Inverse of [`num_rev`]: emit the value least significant digit first,
/// zero-filling the remaining positions.
fn str_rev(radix: u32, value: &Acc96, out: &mut [u16]) {
    let d = Acc96::from_u32(radix);
    let mut acc = *value;
    for slot in out.iter_mut() {
        let (q, r) = acc.divrem(&d);
        *slot = r.to_u32() as u16;
        acc = q;
    }
    assert!(acc.is_zero(), "half value wider than its digit count");
}

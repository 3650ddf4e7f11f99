//! FF3-1 format-preserving encryption library.
//!
//! This crate implements the FF3-1 format-preserving cipher, the original
//! FF3 tweak variant for legacy interoperability, and BPS-style chaining
//! for inputs longer than a single cipher block.
//!
//! # Overview
//!
//! Format-preserving encryption maps a string over an alphabet to another
//! string of the same length over the same alphabet, suitable for:
//! - Encrypting card numbers, account numbers, and national identifiers in
//!   place
//! - Tokenizing structured fields without schema changes
//! - Encrypting identifiers with embedded punctuation (the punctuation
//!   passes through untouched)
//!
//! # Variants
//!
//! - **FF3-1**: eight-round Feistel with a 7-byte tweak, over AES
//! - **Legacy FF3**: the withdrawn 8-byte-tweak variant, opt-in, kept for
//!   interoperability with existing data
//! - **BPS chaining**: CBC-like composition of Feistel blocks for inputs of
//!   arbitrary length, including the 3DES variant of the BPS paper
//!
//! # Quick Start
//!
//! ## Encrypting a formatted string
//!
//! ```rust
//! use ff3::{Alphabet, Ff3_128};
//!
//! let key = [0x2B; 16];
//! let engine = Ff3_128::new(&key, 10, 6, 56, false).unwrap();
//! let alphabet = Alphabet::new("0123456789").unwrap();
//! let tweak = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
//!
//! let ciphertext = engine
//!     .encrypt_str("4111-1111-1111-1111", &tweak, &alphabet)
//!     .unwrap();
//! assert_eq!(ciphertext.len(), 19);
//! assert_eq!(ciphertext.chars().nth(4), Some('-'));
//!
//! let plaintext = engine.decrypt_str(&ciphertext, &tweak, &alphabet).unwrap();
//! assert_eq!(plaintext, "4111-1111-1111-1111");
//! ```
//!
//! ## Chaining long digit strings
//!
//! ```rust
//! use ff3::Bps_128;
//!
//! let key = [0x2B; 16];
//! // Block length 18: longer inputs are chained across blocks.
//! let engine = Bps_128::new(&key, 10, 6, 18).unwrap();
//!
//! let plaintext: Vec<u16> = (0..40).map(|i| (i % 10) as u16).collect();
//! let mut ciphertext = vec![0u16; plaintext.len()];
//! engine.encrypt(&plaintext, &[0u8; 8], &mut ciphertext).unwrap();
//!
//! let mut decrypted = vec![0u16; ciphertext.len()];
//! engine.decrypt(&ciphertext, &[0u8; 8], &mut decrypted).unwrap();
//! assert_eq!(plaintext, decrypted);
//! ```
//!
//! # Security Considerations
//!
//! - **Tweaks are public but must vary**: reusing one (key, tweak) pair
//!   across related values leaks equality
//! - **Legacy FF3 is withdrawn**: the 8-byte tweak variant is vulnerable to
//!   a multi-tweak attack and exists only for legacy data
//! - **Small domains stay small**: the engine enforces a floor of 10^6
//!   messages, which is far below brute-force safety for public tweaks
//! - **No authentication**: pair with a MAC or AEAD where integrity matters
//!
//! # Feature Flags
//!
//! - `std` (default): string API and alphabet codec
//! - When disabled, the digit-slice engine is `no_std` compatible

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
pub mod alphabet;
pub mod block;
pub mod bps;
pub mod common;
pub mod ff3;
pub mod num;

#[cfg(test)]
mod vectors;

#[cfg(feature = "std")]
pub use alphabet::Alphabet;
pub use block::FpeCipher;
pub use bps::{Bps, Bps_128, Bps_Tdes2, Bps_Tdes3};
pub use common::Error;
pub use ff3::{max_text_len, min_text_len, Ff3, Ff3_128, Ff3_192, Ff3_256};

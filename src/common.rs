//! Common definitions shared across the FF3 and BPS cipher implementations.

/// Unified error type for all engine operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The key length does not match the chosen block cipher.
    KeyLength,
    /// The block cipher's block is wider than 128 bits.
    BlockSize,
    /// The radix is outside [2, 65536].
    RadixOutOfRange,
    /// The minimum length is below 2 or the domain radix^minlen is below 10^6.
    MinLengthInvalid,
    /// The minimum length exceeds the maximum length.
    LengthBounds,
    /// The maximum length exceeds what a 12-byte trailer can represent for
    /// this radix and block width.
    MaxLengthTooLarge,
    /// The tweak length is not valid for the current configuration.
    TweakLength,
    /// The text length is outside [minlen, maxlen].
    TextLength,
    /// A digit value is out of range for the radix.
    InvalidDigit,
    /// The output buffer is shorter than the input.
    OutputTooShort,
    /// The alphabet's radix does not match the engine's radix.
    RadixMismatch,
    /// The alphabet contains a repeated symbol.
    DuplicateSymbol,
    /// A formatting entry's offset does not fit the reassembled string.
    FormattingOffset,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::KeyLength => write!(f, "invalid key length for cipher"),
            Error::BlockSize => write!(f, "cipher block wider than 128 bits"),
            Error::RadixOutOfRange => write!(f, "radix outside [2, 65536]"),
            Error::MinLengthInvalid => write!(f, "minimum length too small for radix"),
            Error::LengthBounds => write!(f, "minimum length exceeds maximum length"),
            Error::MaxLengthTooLarge => write!(f, "maximum length too large for radix"),
            Error::TweakLength => write!(f, "invalid tweak length"),
            Error::TextLength => write!(f, "text length outside configured bounds"),
            Error::InvalidDigit => write!(f, "digit out of range for radix"),
            Error::OutputTooShort => write!(f, "output buffer shorter than input"),
            Error::RadixMismatch => write!(f, "alphabet radix does not match engine radix"),
            Error::DuplicateSymbol => write!(f, "alphabet contains a repeated symbol"),
            Error::FormattingOffset => write!(f, "formatting offset out of place"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Width in bytes of the Feistel round input fed to the block cipher.
pub const BLOCK_LENGTH: usize = 16;

/// Largest text length any engine configuration can accept in a single
/// Feistel block: the radix-2 bound for a 128-bit block cipher.
pub const MAX_SINGLE_BLOCK_LEN: usize = 190;

/// Direction of cipher operation.
#[derive(Clone, Copy)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

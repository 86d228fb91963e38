//! Error type.
//!
//! All fallible operations of this crate return `zkmod::Result<T>`. The
//! arithmetic operators on `ModInt` cannot return an error; they panic
//! on a modulus mismatch, and the `try_*()` methods should be used when
//! operands may come from different moduli.

use thiserror::Error;

/// Errors reported by integer construction and modular arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The modulus is 0 or 1, or Montgomery reduction was requested for
    /// an even modulus.
    #[error("invalid modulus")]
    InvalidModulus,

    /// A value does not fit in the target width.
    #[error("value does not fit in {bits} bits")]
    WidthOverflow { bits: u32 },

    /// A checked subtraction borrowed.
    #[error("subtraction underflow")]
    Underflow,

    /// A runtime-sized buffer does not have the expected length.
    #[error("length mismatch: expected {expected}, got {actual}")]
    WidthMismatch { expected: usize, actual: usize },

    /// A literal is not a well-formed hexadecimal integer.
    #[error("invalid integer literal")]
    InvalidLiteral,

    /// The operands are bound to different moduli.
    #[error("operands use different moduli")]
    ModulusMismatch,
}

pub type Result<T> = core::result::Result<T, Error>;

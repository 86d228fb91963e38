//! Overflow policies for limb-array arithmetic.
//!
//! A policy is a zero-sized marker type implementing `OverflowPolicy`.
//! Code that is generic over the policy decides once, at instantiation,
//! whether an overflowing addition, subtraction or left shift wraps,
//! saturates, or reports an error:
//!
//! ```
//! use zkmod::{Checked, Uint, Wrapping};
//!
//! let a = Uint::<2>::MAX;
//! let b = Uint::<2>::ONE;
//! assert!(a.add_with::<Wrapping>(&b).unwrap().is_zero());
//! assert!(a.add_with::<Checked>(&b).is_err());
//! ```

use super::Uint;
use crate::error::{Error, Result};

/// Behaviour of fixed-width arithmetic on overflow.
pub trait OverflowPolicy {
    /// Addition `a + b`.
    fn add<const N: usize>(a: &Uint<N>, b: &Uint<N>) -> Result<Uint<N>>;

    /// Subtraction `a - b`.
    fn sub<const N: usize>(a: &Uint<N>, b: &Uint<N>) -> Result<Uint<N>>;

    /// Left shift `a << bits`; overflow means that a non-zero bit was
    /// shifted out.
    fn shl<const N: usize>(a: &Uint<N>, bits: u32) -> Result<Uint<N>>;
}

/// Results wrap modulo 2^(64*N); never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct Wrapping;

/// Results are clamped to `Uint::MAX` (or `Uint::ZERO` on borrow); never
/// fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct Saturating;

/// Overflow is reported as `Error::WidthOverflow` (addition, shift) or
/// `Error::Underflow` (subtraction).
#[derive(Clone, Copy, Debug, Default)]
pub struct Checked;

impl OverflowPolicy for Wrapping {
    #[inline(always)]
    fn add<const N: usize>(a: &Uint<N>, b: &Uint<N>) -> Result<Uint<N>> {
        Ok(a.wrapping_add(b))
    }

    #[inline(always)]
    fn sub<const N: usize>(a: &Uint<N>, b: &Uint<N>) -> Result<Uint<N>> {
        Ok(a.wrapping_sub(b))
    }

    #[inline(always)]
    fn shl<const N: usize>(a: &Uint<N>, bits: u32) -> Result<Uint<N>> {
        Ok(a.shl(bits))
    }
}

impl OverflowPolicy for Saturating {
    #[inline(always)]
    fn add<const N: usize>(a: &Uint<N>, b: &Uint<N>) -> Result<Uint<N>> {
        Ok(a.saturating_add(b))
    }

    #[inline(always)]
    fn sub<const N: usize>(a: &Uint<N>, b: &Uint<N>) -> Result<Uint<N>> {
        Ok(a.saturating_sub(b))
    }

    fn shl<const N: usize>(a: &Uint<N>, bits: u32) -> Result<Uint<N>> {
        if shl_overflows(a, bits) {
            Ok(Uint::MAX)
        } else {
            Ok(a.shl(bits))
        }
    }
}

impl OverflowPolicy for Checked {
    #[inline(always)]
    fn add<const N: usize>(a: &Uint<N>, b: &Uint<N>) -> Result<Uint<N>> {
        a.checked_add(b)
    }

    #[inline(always)]
    fn sub<const N: usize>(a: &Uint<N>, b: &Uint<N>) -> Result<Uint<N>> {
        a.checked_sub(b)
    }

    fn shl<const N: usize>(a: &Uint<N>, bits: u32) -> Result<Uint<N>> {
        if shl_overflows(a, bits) {
            Err(Error::WidthOverflow { bits: Uint::<N>::BITS })
        } else {
            Ok(a.shl(bits))
        }
    }
}

fn shl_overflows<const N: usize>(a: &Uint<N>, bits: u32) -> bool {
    let len = a.bit_length();
    len != 0 && (bits >= Uint::<N>::BITS || len > Uint::<N>::BITS - bits)
}

// ========================================================================

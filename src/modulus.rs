//! Modulus parameter sets.
//!
//! A `Modulus<N>` holds a modulus `m` (with `1 < m < 2^(64*N)`) and the
//! constants needed by the reduction strategy selected for it:
//!
//!  - For an odd modulus, Montgomery reduction is used, with
//!    `m0i = -1/m mod 2^64`, `R mod m` and `R^2 mod m`, where
//!    `R = 2^(64*N)`.
//!
//!  - For an even modulus, Barrett reduction is used, with
//!    `mu = floor(2^(128*N) / m)` (a value over `2*N` limbs).
//!
//! Derivation is deterministic and implemented with `const fn` code, so
//! that a parameter set may be computed at compile-time and stored in a
//! `static`:
//!
//! ```
//! use zkmod::{Modulus, Uint};
//!
//! static M: Modulus<1> = Modulus::new_const(&Uint::from_u64(1000003));
//!
//! let m = Modulus::new(&Uint::<1>::from_u64(1000003)).unwrap();
//! assert!(m == M);
//! ```
//!
//! Parameter sets are immutable. Modular values (`ModInt`) borrow the
//! parameter set they were created with, and values are combined only
//! if they use the same instance (same address); a `static` has a single
//! address, which makes it the natural home for a fixed modulus.

use core::fmt;

use crate::backend::{sbb, Uint};
use crate::error::{Error, Result};

/// Reduction strategy of a modulus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Montgomery representation and REDC (odd moduli only).
    Montgomery,
    /// Plain representation and Barrett reduction (any modulus).
    Barrett,
}

// Strategy-specific precomputed constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Reducer<const N: usize> {
    Montgomery {
        m0i: u64,
        one: Uint<N>,
        r2: Uint<N>,
    },
    Barrett {
        // floor(2^(128*N) / m), low half first
        mu: [Uint<N>; 2],
    },
}

/// A modulus and its precomputed reduction constants.
#[derive(Clone, PartialEq, Eq)]
pub struct Modulus<const N: usize> {
    pub(crate) m: Uint<N>,
    pub(crate) bits: u32,
    pub(crate) red: Reducer<N>,
}

impl<const N: usize> Modulus<N> {

    /// Build the parameter set for modulus `m`. Montgomery reduction is
    /// selected if `m` is odd, Barrett reduction otherwise. The modulus
    /// must be greater than 1.
    pub fn new(m: &Uint<N>) -> Result<Self> {
        if m.bit_length() < 2 {
            return Err(Error::InvalidModulus);
        }
        Ok(Self::derive(m, Self::default_strategy(m)))
    }

    /// Build the parameter set for modulus `m` with an explicit
    /// strategy. Montgomery reduction requires an odd modulus; Barrett
    /// reduction works with all moduli greater than 1.
    pub fn with_strategy(m: &Uint<N>, strategy: Strategy) -> Result<Self> {
        if m.bit_length() < 2 {
            return Err(Error::InvalidModulus);
        }
        if strategy == Strategy::Montgomery && !m.is_odd() {
            return Err(Error::InvalidModulus);
        }
        Ok(Self::derive(m, strategy))
    }

    /// Parse a big-endian hexadecimal modulus and build its parameter
    /// set (as `new()`).
    pub fn from_be_hex(s: &str) -> Result<Self> {
        Self::new(&Uint::from_be_hex(s)?)
    }

    /// Build the parameter set for modulus `m` in a constant context.
    /// This performs the same derivation as `new()`, and panics if
    /// `m <= 1`; when used to initialize a `static`, an invalid modulus
    /// is thus reported at compile-time.
    pub const fn new_const(m: &Uint<N>) -> Self {
        if m.bit_length() < 2 {
            panic!("invalid modulus");
        }
        Self::derive(m, Self::default_strategy(m))
    }

    /// Get the modulus.
    #[inline(always)]
    pub fn value(&self) -> &Uint<N> {
        &self.m
    }

    /// Get the length of the modulus, in bits.
    #[inline(always)]
    pub fn bit_length(&self) -> u32 {
        self.bits
    }

    /// Get the reduction strategy of this parameter set.
    #[inline]
    pub fn strategy(&self) -> Strategy {
        match self.red {
            Reducer::Montgomery { .. } => Strategy::Montgomery,
            Reducer::Barrett { .. } => Strategy::Barrett,
        }
    }

    const fn default_strategy(m: &Uint<N>) -> Strategy {
        if m.is_odd() {
            Strategy::Montgomery
        } else {
            Strategy::Barrett
        }
    }

    // Compute all parameters. The modulus MUST be greater than 1, and
    // odd if the Montgomery strategy is requested.
    const fn derive(m: &Uint<N>, strategy: Strategy) -> Self {
        let bits = m.bit_length();
        let red = match strategy {
            Strategy::Montgomery => {
                // 2^(bits-1) < m; doubling it 64*N-(bits-1) times yields
                // R mod m, and 64*N more doublings yield R^2 mod m.
                let mut x = [0u64; N];
                x[((bits - 1) >> 6) as usize] = 1u64 << ((bits - 1) & 63);
                let mut i = bits - 1;
                while i < Uint::<N>::BITS {
                    x = double_mod(&x, &m.0).0;
                    i += 1;
                }
                let one = x;
                let mut i = 0;
                while i < Uint::<N>::BITS {
                    x = double_mod(&x, &m.0).0;
                    i += 1;
                }
                Reducer::Montgomery {
                    m0i: ninv64(m.0[0]),
                    one: Uint(one),
                    r2: Uint(x),
                }
            }
            Strategy::Barrett => {
                // Bitwise long division of 2^(128*N) by m. The top
                // numerator bit leaves a partial remainder of 1 < m;
                // each further (zero) bit doubles the remainder, and a
                // subtraction of m sets the matching quotient bit.
                let mut r = [0u64; N];
                r[0] = 1;
                let mut q = [[0u64; N]; 2];
                let mut i = Uint::<N>::BITS << 1;
                while i > 0 {
                    i -= 1;
                    let (nr, sub) = double_mod(&r, &m.0);
                    r = nr;
                    if sub {
                        let j = (i >> 6) as usize;
                        q[j / N][j % N] |= 1u64 << (i & 63);
                    }
                }
                Reducer::Barrett { mu: [Uint(q[0]), Uint(q[1])] }
            }
        };
        Self { m: *m, bits, red }
    }
}

// Given x < m, return (2*x mod m, true if m was subtracted).
const fn double_mod<const N: usize>(x: &[u64; N], m: &[u64; N])
    -> ([u64; N], bool)
{
    let mut d = [0u64; N];
    let mut hi = 0;
    let mut i = 0;
    while i < N {
        d[i] = (x[i] << 1) | hi;
        hi = x[i] >> 63;
        i += 1;
    }

    // Trial subtraction; it is kept if 2*x >= m, i.e. if the shift
    // carried out or the subtraction did not borrow.
    let mut t = [0u64; N];
    let mut cc = 0;
    let mut i = 0;
    while i < N {
        let (w, c) = sbb(d[i], m[i], cc);
        t[i] = w;
        cc = c;
        i += 1;
    }
    if hi != 0 || cc == 0 {
        (t, true)
    } else {
        (d, false)
    }
}

// Compute -1/x mod 2^64 (x MUST be odd). Each Newton iteration doubles
// the number of correct low bits of the inverse.
const fn ninv64(x: u64) -> u64 {
    let y = 2u64.wrapping_sub(x);
    let y = y.wrapping_mul(2u64.wrapping_sub(y.wrapping_mul(x)));
    let y = y.wrapping_mul(2u64.wrapping_sub(y.wrapping_mul(x)));
    let y = y.wrapping_mul(2u64.wrapping_sub(y.wrapping_mul(x)));
    let y = y.wrapping_mul(2u64.wrapping_sub(y.wrapping_mul(x)));
    let y = y.wrapping_mul(2u64.wrapping_sub(y.wrapping_mul(x)));
    y.wrapping_neg()
}

impl<const N: usize> fmt::Debug for Modulus<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Modulus")
            .field("m", &self.m)
            .field("bits", &self.bits)
            .field("strategy", &self.strategy())
            .finish()
    }
}

impl<const N: usize> fmt::Display for Modulus<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.m, f)
    }
}

// ========================================================================

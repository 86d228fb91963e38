use core::cmp::Ordering;
use core::fmt;

use rand_core::RngCore;

use super::{addcarry_u64, subborrow_u64, umull, umull_add2, cmp_limbs};
use super::policy::OverflowPolicy;
use crate::error::{Error, Result};

/// A fixed-width unsigned integer made of `N` 64-bit limbs.
///
/// Limbs are stored in little-endian order (limb 0 is the least
/// significant). The value is always non-negative; additions,
/// subtractions and shifts come in wrapping, overflowing, saturating and
/// checked flavours, and can also be selected through an
/// [`OverflowPolicy`] type parameter (`add_with()`, `sub_with()`,
/// `shl_with()`).
///
/// Equality and ordering are the usual integer comparisons. None of the
/// comparison functions are constant-time; `set_cond()`, `select()` and
/// `cswap()` are.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uint<const N: usize>(pub(crate) [u64; N]);

impl<const N: usize> Uint<N> {

    /// Number of 64-bit limbs.
    pub const LIMBS: usize = N;

    /// Width in bits.
    pub const BITS: u32 = (N as u32) << 6;

    pub const ZERO: Self = Self([0; N]);
    pub const ONE: Self = Self::from_u64(1);
    pub const MAX: Self = Self([u64::MAX; N]);

    /// Create a value from its limbs (little-endian order).
    #[inline(always)]
    pub const fn from_limbs(x: [u64; N]) -> Self {
        Self(x)
    }

    /// Create a value from a 64-bit integer.
    #[inline(always)]
    pub const fn from_u64(x: u64) -> Self {
        let mut d = [0u64; N];
        d[0] = x;
        Self(d)
    }

    /// Create a value from a slice of limbs (little-endian order). The
    /// slice must contain exactly `N` limbs.
    pub fn from_le_slice(x: &[u64]) -> Result<Self> {
        if x.len() != N {
            return Err(Error::WidthMismatch { expected: N, actual: x.len() });
        }
        let mut d = [0u64; N];
        d.copy_from_slice(x);
        Ok(Self(d))
    }

    /// Decode an integer from bytes (unsigned little-endian convention).
    /// The slice may have any length, but the value must fit in `N`
    /// limbs.
    pub fn from_le_bytes(buf: &[u8]) -> Result<Self> {
        let mut d = [0u64; N];
        for (i, &b) in buf.iter().enumerate() {
            if i < (N << 3) {
                d[i >> 3] |= (b as u64) << ((i & 7) << 3);
            } else if b != 0 {
                return Err(Error::WidthOverflow { bits: Self::BITS });
            }
        }
        Ok(Self(d))
    }

    /// Decode an integer from bytes (unsigned big-endian convention).
    /// The slice may have any length, but the value must fit in `N`
    /// limbs.
    pub fn from_be_bytes(buf: &[u8]) -> Result<Self> {
        let mut d = [0u64; N];
        for (i, &b) in buf.iter().rev().enumerate() {
            if i < (N << 3) {
                d[i >> 3] |= (b as u64) << ((i & 7) << 3);
            } else if b != 0 {
                return Err(Error::WidthOverflow { bits: Self::BITS });
            }
        }
        Ok(Self(d))
    }

    /// Parse a big-endian hexadecimal literal. An optional `0x` prefix
    /// is accepted, as are leading zeros; the number of significant
    /// digits must not exceed `16*N`.
    pub fn from_be_hex(s: &str) -> Result<Self> {
        let s = s.strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if s.is_empty() {
            return Err(Error::InvalidLiteral);
        }
        let digits = s.trim_start_matches('0').as_bytes();
        if digits.len() > (N << 4) {
            return Err(Error::WidthOverflow { bits: Self::BITS });
        }

        // Decode into a big-endian byte buffer of exactly 8*N bytes. An
        // odd leading digit gets its own byte.
        let mut buf = [[0u8; 8]; N];
        let out = buf.as_flattened_mut();
        let (head, tail) = digits.split_at(digits.len() & 1);
        let start = out.len() - (tail.len() >> 1);
        hex::decode_to_slice(tail, &mut out[start..])
            .map_err(|_| Error::InvalidLiteral)?;
        if let Some(&c) = head.first() {
            hex::decode_to_slice([b'0', c], &mut out[(start - 1)..start])
                .map_err(|_| Error::InvalidLiteral)?;
        }
        Self::from_be_bytes(out)
    }

    /// Parse a big-endian hexadecimal literal in a constant context
    /// (e.g. a `static` initializer). Accepted syntax is the same as for
    /// `from_be_hex()`; an invalid or too wide literal is a panic, i.e.
    /// a compilation error when evaluated at compile-time.
    pub const fn from_be_hex_const(s: &str) -> Self {
        let b = s.as_bytes();
        let mut start = 0;
        if b.len() >= 2 && b[0] == b'0' && (b[1] == b'x' || b[1] == b'X') {
            start = 2;
        }
        if start == b.len() {
            panic!("empty hexadecimal literal");
        }
        let mut d = [0u64; N];
        let mut i = b.len();
        let mut k = 0usize;
        while i > start {
            i -= 1;
            let c = b[i];
            let v = (match c {
                b'0'..=b'9' => c - b'0',
                b'a'..=b'f' => c - b'a' + 10,
                b'A'..=b'F' => c - b'A' + 10,
                _ => panic!("invalid hexadecimal digit"),
            }) as u64;
            if k < (N << 6) {
                d[k >> 6] |= v << (k & 63);
            } else if v != 0 {
                panic!("hexadecimal literal exceeds the integer width");
            }
            k += 4;
        }
        Self(d)
    }

    /// Get the limbs (little-endian order).
    #[inline(always)]
    pub const fn as_limbs(&self) -> &[u64; N] {
        &self.0
    }

    /// Get the limbs (little-endian order).
    #[inline(always)]
    pub const fn to_limbs(self) -> [u64; N] {
        self.0
    }

    /// Encode this value over exactly `8*N` bytes (unsigned
    /// little-endian).
    pub fn write_le_bytes(&self, out: &mut [u8]) -> Result<()> {
        if out.len() != (N << 3) {
            return Err(Error::WidthMismatch {
                expected: N << 3, actual: out.len() });
        }
        for i in 0..N {
            out[(i << 3)..((i << 3) + 8)].copy_from_slice(&self.0[i].to_le_bytes());
        }
        Ok(())
    }

    /// Encode this value over exactly `8*N` bytes (unsigned big-endian).
    pub fn write_be_bytes(&self, out: &mut [u8]) -> Result<()> {
        if out.len() != (N << 3) {
            return Err(Error::WidthMismatch {
                expected: N << 3, actual: out.len() });
        }
        for i in 0..N {
            let j = (N - 1 - i) << 3;
            out[j..(j + 8)].copy_from_slice(&self.0[i].to_be_bytes());
        }
        Ok(())
    }

    /// Fill all limbs with random bits.
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut d = [0u64; N];
        for x in d.iter_mut() {
            *x = rng.next_u64();
        }
        Self(d)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        let mut r = 0;
        let mut i = 0;
        while i < N {
            r |= self.0[i];
            i += 1;
        }
        r == 0
    }

    #[inline(always)]
    pub const fn is_odd(&self) -> bool {
        N > 0 && (self.0[0] & 1) != 0
    }

    /// Get bit `i` (bit 0 is the least significant). Bits beyond the
    /// width are zero.
    #[inline(always)]
    pub const fn bit(&self, i: u32) -> bool {
        if i >= Self::BITS {
            false
        } else {
            ((self.0[(i >> 6) as usize] >> (i & 63)) & 1) != 0
        }
    }

    /// Length of this value in bits (position of the highest set bit,
    /// plus one); zero has length 0.
    pub const fn bit_length(&self) -> u32 {
        let mut i = N;
        while i > 0 {
            i -= 1;
            if self.0[i] != 0 {
                return ((i as u32) << 6) + 64 - self.0[i].leading_zeros();
            }
        }
        0
    }

    /// Add `rhs`; the carry out of the top limb is returned.
    #[inline]
    pub fn overflowing_add(&self, rhs: &Self) -> (Self, bool) {
        let mut d = [0u64; N];
        let mut cc = 0;
        for i in 0..N {
            (d[i], cc) = addcarry_u64(self.0[i], rhs.0[i], cc);
        }
        (Self(d), cc != 0)
    }

    /// Subtract `rhs`; the borrow out of the top limb is returned.
    #[inline]
    pub fn overflowing_sub(&self, rhs: &Self) -> (Self, bool) {
        let mut d = [0u64; N];
        let mut cc = 0;
        for i in 0..N {
            (d[i], cc) = subborrow_u64(self.0[i], rhs.0[i], cc);
        }
        (Self(d), cc != 0)
    }

    #[inline(always)]
    pub fn wrapping_add(&self, rhs: &Self) -> Self {
        self.overflowing_add(rhs).0
    }

    #[inline(always)]
    pub fn wrapping_sub(&self, rhs: &Self) -> Self {
        self.overflowing_sub(rhs).0
    }

    #[inline]
    pub fn saturating_add(&self, rhs: &Self) -> Self {
        let (d, c) = self.overflowing_add(rhs);
        if c { Self::MAX } else { d }
    }

    #[inline]
    pub fn saturating_sub(&self, rhs: &Self) -> Self {
        let (d, c) = self.overflowing_sub(rhs);
        if c { Self::ZERO } else { d }
    }

    /// Add `rhs`, reporting `Error::WidthOverflow` on carry.
    #[inline]
    pub fn checked_add(&self, rhs: &Self) -> Result<Self> {
        match self.overflowing_add(rhs) {
            (d, false) => Ok(d),
            (_, true) => Err(Error::WidthOverflow { bits: Self::BITS }),
        }
    }

    /// Subtract `rhs`, reporting `Error::Underflow` on borrow.
    #[inline]
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self> {
        match self.overflowing_sub(rhs) {
            (d, false) => Ok(d),
            (_, true) => Err(Error::Underflow),
        }
    }

    /// Add `rhs` with the overflow behaviour of policy `P`.
    #[inline(always)]
    pub fn add_with<P: OverflowPolicy>(&self, rhs: &Self) -> Result<Self> {
        P::add(self, rhs)
    }

    /// Subtract `rhs` with the overflow behaviour of policy `P`.
    #[inline(always)]
    pub fn sub_with<P: OverflowPolicy>(&self, rhs: &Self) -> Result<Self> {
        P::sub(self, rhs)
    }

    /// Shift left by `bits` with the overflow behaviour of policy `P`.
    #[inline(always)]
    pub fn shl_with<P: OverflowPolicy>(&self, bits: u32) -> Result<Self> {
        P::shl(self, bits)
    }

    /// Shift left by `bits`; bits pushed out of the width are dropped.
    pub fn shl(&self, bits: u32) -> Self {
        if bits >= Self::BITS {
            return Self::ZERO;
        }
        let w = (bits >> 6) as usize;
        let s = bits & 63;
        let mut d = [0u64; N];
        for i in w..N {
            let mut x = self.0[i - w] << s;
            if s != 0 && i > w {
                x |= self.0[i - w - 1] >> (64 - s);
            }
            d[i] = x;
        }
        Self(d)
    }

    /// Shift right by `bits`.
    pub fn shr(&self, bits: u32) -> Self {
        if bits >= Self::BITS {
            return Self::ZERO;
        }
        let w = (bits >> 6) as usize;
        let s = bits & 63;
        let mut d = [0u64; N];
        for i in 0..(N - w) {
            let mut x = self.0[i + w] >> s;
            if s != 0 && (i + w + 1) < N {
                x |= self.0[i + w + 1] << (64 - s);
            }
            d[i] = x;
        }
        Self(d)
    }

    /// Keep only the `bits` low bits of this value.
    pub(crate) fn truncate_bits(&mut self, bits: u32) {
        for i in 0..N {
            let lo = (i as u32) << 6;
            if bits <= lo {
                self.0[i] = 0;
            } else if bits - lo < 64 {
                self.0[i] &= (1u64 << (bits - lo)) - 1;
            }
        }
    }

    /// Full product of this value by an `M`-limb value. The `N+M` limbs
    /// of the result are returned as a low part (`N` limbs) and a high
    /// part (`M` limbs).
    pub fn widening_mul<const M: usize>(&self, rhs: &Uint<M>) -> (Self, Uint<M>) {
        let mut lo = [0u64; N];
        let mut hi = [0u64; M];
        for i in 0..N {
            let f = self.0[i];
            let mut cc = 0;
            for j in 0..M {
                let k = i + j;
                let w = if k < N { lo[k] } else { hi[k - N] };
                let (d, h) = umull_add2(f, rhs.0[j], w, cc);
                if k < N {
                    lo[k] = d;
                } else {
                    hi[k - N] = d;
                }
                cc = h;
            }
            // Previous rows stopped below index i + M.
            let k = i + M;
            if k < N {
                lo[k] = cc;
            } else {
                hi[k - N] = cc;
            }
        }
        (Self(lo), Uint(hi))
    }

    /// Full square of this value, returned as (low, high) halves.
    pub fn widening_square(&self) -> (Self, Self) {
        let a = &self.0;
        let mut t = [[0u64; N]; 2];
        let d = t.as_flattened_mut();

        // sum_{i<j} a_i*a_j*2^(64*(i+j)) < 2^(128*N-1)
        // -> doubling it cannot overflow
        for i in 0..N {
            let f = a[i];
            let mut cc = 0;
            for j in (i + 1)..N {
                (d[i + j], cc) = umull_add2(f, a[j], d[i + j], cc);
            }
            d[i + N] = cc;
        }

        // Double the partial sum.
        let mut cc = 0;
        for x in d.iter_mut() {
            let w = *x;
            *x = (w << 1) | cc;
            cc = w >> 63;
        }

        // Add the squares a_i*a_i*2^(64*2*i).
        let mut cc = 0;
        for i in 0..N {
            let (lo, hi) = umull(a[i], a[i]);
            let (d0, ee) = addcarry_u64(d[i << 1], lo, cc);
            let (d1, ee) = addcarry_u64(d[(i << 1) + 1], hi, ee);
            d[i << 1] = d0;
            d[(i << 1) + 1] = d1;
            cc = ee;
        }

        (Self(t[0]), Self(t[1]))
    }

    /// Convert to another width. This fails with `Error::WidthOverflow`
    /// if the value does not fit in `M` limbs.
    pub fn resize<const M: usize>(&self) -> Result<Uint<M>> {
        let mut d = [0u64; M];
        for i in 0..N {
            if i < M {
                d[i] = self.0[i];
            } else if self.0[i] != 0 {
                return Err(Error::WidthOverflow { bits: Uint::<M>::BITS });
            }
        }
        Ok(Uint(d))
    }

    // Conditionally copy the provided value ('a') into self:
    //  - If ctl == 0xFFFFFFFF, then the value of 'a' is copied into self.
    //  - If ctl == 0, then the value of self is unchanged.
    // ctl MUST be equal to 0 or 0xFFFFFFFF.
    #[inline]
    pub fn set_cond(&mut self, a: &Self, ctl: u32) {
        let cw = ((ctl as i32) as i64) as u64;
        for i in 0..N {
            self.0[i] ^= cw & (self.0[i] ^ a.0[i]);
        }
    }

    // Return a value equal to either a0 (if ctl == 0) or a1 (if
    // ctl == 0xFFFFFFFF). Value ctl MUST be either 0 or 0xFFFFFFFF.
    #[inline]
    pub fn select(a0: &Self, a1: &Self, ctl: u32) -> Self {
        let mut r = *a0;
        r.set_cond(a1, ctl);
        r
    }

    // Conditionally swap two values: a and b are exchanged if
    // ctl == 0xFFFFFFFF, or not exchanged if ctl == 0x00000000.
    #[inline]
    pub fn cswap(a: &mut Self, b: &mut Self, ctl: u32) {
        let cw = ((ctl as i32) as i64) as u64;
        for i in 0..N {
            let t = cw & (a.0[i] ^ b.0[i]);
            a.0[i] ^= t;
            b.0[i] ^= t;
        }
    }
}

impl<const N: usize> Default for Uint<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const N: usize> Ord for Uint<N> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_limbs(&self.0, &other.0)
    }
}

impl<const N: usize> PartialOrd for Uint<N> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> From<u64> for Uint<N> {
    #[inline(always)]
    fn from(x: u64) -> Self {
        Self::from_u64(x)
    }
}

impl<const N: usize> TryFrom<u128> for Uint<N> {
    type Error = Error;

    fn try_from(x: u128) -> Result<Self> {
        Uint::<2>([x as u64, (x >> 64) as u64]).resize::<N>()
    }
}

impl<const N: usize> fmt::LowerHex for Uint<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        for i in (0..N).rev() {
            write!(f, "{:016x}", self.0[i])?;
        }
        Ok(())
    }
}

impl<const N: usize> fmt::UpperHex for Uint<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        for i in (0..N).rev() {
            write!(f, "{:016X}", self.0[i])?;
        }
        Ok(())
    }
}

impl<const N: usize> fmt::Display for Uint<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self)
    }
}

impl<const N: usize> fmt::Debug for Uint<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uint({:#x})", self)
    }
}

// ========================================================================

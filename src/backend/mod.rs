//! Limb-level integer arithmetic.
//!
//! This module provides the fixed-width unsigned integer type `Uint<N>`
//! (N limbs of 64 bits, little-endian limb order) and the overflow
//! policies that select how its additions, subtractions and shifts
//! behave on overflow. All modular arithmetic in this crate bottoms out
//! in the primitives defined here.
//!
//! The word-level helpers (`addcarry_u64()`, `subborrow_u64()`,
//! `umull*()`) and the slice kernels are crate-internal; `sbb()` is the
//! subtract-with-borrow variant usable in constant contexts, where modulus
//! parameters may be derived.

pub mod policy;
pub mod uint;

pub use policy::{Checked, OverflowPolicy, Saturating, Wrapping};
pub use uint::Uint;

use core::cmp::Ordering;

// Carrying addition and subtraction should use u64::carrying_add()
// and u64::borrowing_sub(), but these functions are currently only
// experimental.

// Add with carry; carry is 0 or 1.
// (x, y, c_in) -> x + y + c_in mod 2^64, c_out

#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub(crate) fn addcarry_u64(x: u64, y: u64, c: u8) -> (u64, u8) {
    use core::arch::x86_64::_addcarry_u64;
    unsafe {
        let mut d = 0u64;
        let cc = _addcarry_u64(c, x, y, &mut d);
        (d, cc)
    }
}

#[cfg(not(target_arch = "x86_64"))]
#[inline(always)]
pub(crate) const fn addcarry_u64(x: u64, y: u64, c: u8) -> (u64, u8) {
    let z = (x as u128).wrapping_add(y as u128).wrapping_add(c as u128);
    (z as u64, (z >> 64) as u8)
}

// Subtract with borrow; borrow is 0 or 1.
// (x, y, c_in) -> x - y - c_in mod 2^64, c_out

#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub(crate) fn subborrow_u64(x: u64, y: u64, c: u8) -> (u64, u8) {
    use core::arch::x86_64::_subborrow_u64;
    unsafe {
        let mut d = 0u64;
        let cc = _subborrow_u64(c, x, y, &mut d);
        (d, cc)
    }
}

#[cfg(not(target_arch = "x86_64"))]
#[inline(always)]
pub(crate) const fn subborrow_u64(x: u64, y: u64, c: u8) -> (u64, u8) {
    let z = (x as u128).wrapping_sub(y as u128).wrapping_sub(c as u128);
    (z as u64, (z >> 127) as u8)
}

// Compute x*y over 128 bits, returned as two 64-bit words (lo, hi)
#[inline(always)]
pub(crate) const fn umull(x: u64, y: u64) -> (u64, u64) {
    let z = (x as u128) * (y as u128);
    (z as u64, (z >> 64) as u64)
}

// Compute x*y+z over 128 bits, returned as two 64-bit words (lo, hi)
#[inline(always)]
pub(crate) const fn umull_add(x: u64, y: u64, z: u64) -> (u64, u64) {
    let t = ((x as u128) * (y as u128)).wrapping_add(z as u128);
    (t as u64, (t >> 64) as u64)
}

// Compute x*y+z1+z2 over 128 bits, returned as two 64-bit words (lo, hi)
#[inline(always)]
pub(crate) const fn umull_add2(x: u64, y: u64, z1: u64, z2: u64) -> (u64, u64) {
    let t = ((x as u128) * (y as u128))
        .wrapping_add(z1 as u128).wrapping_add(z2 as u128);
    (t as u64, (t >> 64) as u64)
}

// Subtract-with-borrow for constant contexts (borrow is 0 or 1).
#[inline(always)]
pub(crate) const fn sbb(x: u64, y: u64, cc: u64) -> (u64, u64) {
    let z = (x as u128)
        .wrapping_sub(y as u128)
        .wrapping_sub(cc as u128);
    (z as u64, (z >> 127) as u64)
}

// ========================================================================
// Slice kernels. Slices are little-endian limb sequences; they are used
// where a const-generic width cannot express the operand sizes (double
// and quadruple width intermediates of Barrett reduction).

// d <- d - a, with a.len() <= d.len(). Returned value is the output borrow.
#[inline]
pub(crate) fn sub_assign_limbs(d: &mut [u64], a: &[u64]) -> u8 {
    debug_assert!(a.len() <= d.len());
    let mut cc = 0;
    for i in 0..a.len() {
        (d[i], cc) = subborrow_u64(d[i], a[i], cc);
    }
    for x in d[a.len()..].iter_mut() {
        (*x, cc) = subborrow_u64(*x, 0, cc);
    }
    cc
}

// d <- a*b mod 2^(64*d.len()). If d.len() >= a.len() + b.len() then the
// product is exact.
pub(crate) fn mul_limbs(d: &mut [u64], a: &[u64], b: &[u64]) {
    for x in d.iter_mut() {
        *x = 0;
    }
    let n = d.len();
    for i in 0..a.len().min(n) {
        let f = a[i];
        let mut hi = 0;
        for j in 0..b.len() {
            let k = i + j;
            if k >= n {
                break;
            }
            (d[k], hi) = umull_add2(f, b[j], d[k], hi);
        }
        // Row i-1 stopped at index i-1+b.len(), so this word is still zero.
        let k = i + b.len();
        if k < n {
            d[k] = hi;
        }
    }
}

// Compare two limb sequences as integers; lengths may differ (missing
// limbs count as zero). This is not constant-time.
pub(crate) fn cmp_limbs(a: &[u64], b: &[u64]) -> Ordering {
    let n = a.len().max(b.len());
    for i in (0..n).rev() {
        let x = if i < a.len() { a[i] } else { 0 };
        let y = if i < b.len() { b[i] } else { 0 };
        if x != y {
            return x.cmp(&y);
        }
    }
    Ordering::Equal
}

// ========================================================================

//! Reduction algorithms.
//!
//! Two algorithms are provided, each as a set of free functions over
//! `Uint<N>` values and the constants of a modulus parameter set:
//!
//!  - `montgomery`: REDC, interleaved Montgomery multiplication, and
//!    Montgomery squaring. Operands and results are in Montgomery
//!    representation (`x*R mod m` with `R = 2^(64*N)`). The modulus MUST
//!    be odd.
//!
//!  - `barrett`: reduction of a double-width integer modulo `m` with the
//!    precomputed ratio `mu = floor(2^(128*N) / m)`, and the plain-form
//!    multiplication and squaring built on it. Any modulus `m > 1` is
//!    supported.
//!
//! These functions are normally reached through the strategy dispatch in
//! `Modulus` (see the `dispatch` module); they are public so that they
//! can be benchmarked and tested on their own.

pub mod barrett;
pub mod montgomery;

use crate::backend::{addcarry_u64, Uint};

// Given a value hi*2^(64*N) + d < 2*m (hi is 0 or 1), return that value
// reduced modulo m. This is constant-time.
#[inline]
pub(crate) fn sub_once<const N: usize>(d: &Uint<N>, hi: u8, m: &Uint<N>)
    -> Uint<N>
{
    let (t, borrow) = d.overflowing_sub(m);

    // If hi is 1 then the subtraction necessarily borrowed, and the
    // wrapped result is correct; otherwise a borrow means that d < m and
    // the subtraction must be undone.
    let mm = (hi as u64).wrapping_sub(borrow as u64);
    let mut r = [0u64; N];
    let mut cc = 0;
    for i in 0..N {
        (r[i], cc) = addcarry_u64(t.0[i], mm & m.0[i], cc);
    }
    Uint(r)
}

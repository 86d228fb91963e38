//! Montgomery reduction and multiplication.
//!
//! With `R = 2^(64*N)` and an odd modulus `m < R`, a value `x` is
//! represented by `x*R mod m`. `m0i` is `-1/m mod 2^64` (see
//! `Modulus::new()`). Multiplication of two representations `a*R` and
//! `b*R` yields `a*b*R` after a division by `R`, which is what `redc()`
//! and `mul()` compute.

use crate::backend::{addcarry_u64, umull_add, umull_add2, Uint};
use super::sub_once;

/// Montgomery reduction: given `t = lo + hi*R` with `t < m*R`, return
/// `t/R mod m`, fully reduced. Panics if `m` is even.
pub fn redc<const N: usize>(lo: &Uint<N>, hi: &Uint<N>, m: &Uint<N>, m0i: u64)
    -> Uint<N>
{
    assert!(m.is_odd(), "Montgomery reduction with an even modulus");
    let mut t = [lo.0, hi.0];
    let d = t.as_flattened_mut();

    // Round i clears limb i by adding g*m*2^(64*i) for the proper g. The
    // carry out of limb i+N is kept in cch and added at limb i+N+1 by
    // the next round.
    let mut cch = 0;
    for i in 0..N {
        let g = d[i].wrapping_mul(m0i);
        let (_, mut cc) = umull_add(g, m.0[0], d[i]);
        for j in 1..N {
            (d[i + j], cc) = umull_add2(g, m.0[j], d[i + j], cc);
        }
        (d[i + N], cch) = addcarry_u64(d[i + N], cc, cch);
    }

    // (t + g*m)/R < (m*R + R*m)/R = 2*m
    sub_once(&Uint(t[1]), cch, m)
}

/// Montgomery multiplication: return `a*b/R mod m`, fully reduced. This
/// requires `b < m`; `a` may be any `N`-limb value. Panics if `m` is
/// even.
pub fn mul<const N: usize>(a: &Uint<N>, b: &Uint<N>, m: &Uint<N>, m0i: u64)
    -> Uint<N>
{
    assert!(m.is_odd(), "Montgomery reduction with an even modulus");
    let mut t = [0u64; N];

    // combined muls + reduction
    let mut cch = 0;
    for i in 0..N {
        let f = a.0[i];
        let (lo, mut cc1) = umull_add(f, b.0[0], t[0]);
        let g = lo.wrapping_mul(m0i);
        let (_, mut cc2) = umull_add(g, m.0[0], lo);
        for j in 1..N {
            let (d, hi1) = umull_add2(f, b.0[j], t[j], cc1);
            cc1 = hi1;
            let (d, hi2) = umull_add2(g, m.0[j], d, cc2);
            cc2 = hi2;
            t[j - 1] = d;
        }
        (t[N - 1], cch) = addcarry_u64(cc1, cc2, cch);
    }

    // The accumulator stays below b + m < 2*m.
    sub_once(&Uint(t), cch, m)
}

/// Montgomery squaring: return `a*a/R mod m`, fully reduced. This
/// requires `a < m`.
#[inline]
pub fn square<const N: usize>(a: &Uint<N>, m: &Uint<N>, m0i: u64) -> Uint<N> {
    let (lo, hi) = a.widening_square();
    redc(&lo, &hi, m, m0i)
}

// ========================================================================

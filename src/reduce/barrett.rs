//! Barrett reduction.
//!
//! For a modulus `m` over `N` limbs (`k = 64*N` bits), the parameter set
//! holds `mu = floor(2^(2*k) / m)` over `2*N` limbs. Any `t < 2^(2*k)` is
//! then reduced by computing the quotient estimate
//! `q = floor(t*mu / 2^(2*k))`, which is never larger than `floor(t/m)`
//! and falls short of it by at most 1; the remainder `t - q*m` thus
//! needs at most one final subtraction of `m`.
//!
//! Values are handled in plain (non-Montgomery) form, and the modulus may
//! be even.

use crate::backend::{cmp_limbs, mul_limbs, sub_assign_limbs, Uint};
use core::cmp::Ordering;

/// Maximum number of final subtractions of `m`. The quotient estimate
/// error is at most 1; exceeding this bound means the parameters are
/// inconsistent.
pub const MAX_CORRECTIONS: usize = 2;

/// Reduce `t = lo + hi*2^(64*N)` modulo `m`; `mu` is the Barrett ratio
/// of `m` (low half first). Any double-width value is accepted.
pub fn reduce<const N: usize>(lo: &Uint<N>, hi: &Uint<N>, m: &Uint<N>,
    mu: &[Uint<N>; 2]) -> Uint<N>
{
    let t = [lo.0, hi.0];
    let t = t.as_flattened();
    let mu = [mu[0].0, mu[1].0];
    let mu = mu.as_flattened();

    // q = floor(t*mu / 2^(128*N)): high half of the 4*N-limb product.
    let mut p = [[0u64; N]; 4];
    let p = p.as_flattened_mut();
    mul_limbs(p, t, mu);
    let q = &p[(N << 1)..];

    // r = t - q*m; since q*m <= t, the truncated product is exact.
    let mut qm = [[0u64; N]; 2];
    let qm = qm.as_flattened_mut();
    mul_limbs(qm, q, &m.0);
    let mut r = [lo.0, hi.0];
    let rr = r.as_flattened_mut();
    let borrow = sub_assign_limbs(rr, qm);
    debug_assert!(borrow == 0);

    let mut rounds = 0;
    while cmp_limbs(rr, &m.0) != Ordering::Less {
        rounds += 1;
        assert!(rounds <= MAX_CORRECTIONS, "Barrett correction overflow");
        sub_assign_limbs(rr, &m.0);
    }
    Uint(r[0])
}

/// Modular multiplication in plain form: `a*b mod m`. The operands may
/// have any value (they need not be reduced).
#[inline]
pub fn mul<const N: usize>(a: &Uint<N>, b: &Uint<N>, m: &Uint<N>,
    mu: &[Uint<N>; 2]) -> Uint<N>
{
    let (lo, hi) = a.widening_mul(b);
    reduce(&lo, &hi, m, mu)
}

/// Modular squaring in plain form: `a^2 mod m`.
#[inline]
pub fn square<const N: usize>(a: &Uint<N>, m: &Uint<N>, mu: &[Uint<N>; 2])
    -> Uint<N>
{
    let (lo, hi) = a.widening_square();
    reduce(&lo, &hi, m, mu)
}

// ========================================================================

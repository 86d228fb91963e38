//! Strategy dispatch.
//!
//! Modular operations on a `Modulus<N>` are expressed over the internal
//! representation of values: Montgomery form (`x*R mod m`) for moduli
//! using the Montgomery strategy, plain form for moduli using the Barrett
//! strategy. The representation-level functions are crate-internal (they
//! back `ModInt`); the plain-level helpers below are public.
//!
//! Additions and subtractions are identical for both representations.
//! Multiplications and squarings select the reduction algorithm from the
//! parameter set; the strategy never changes after construction.

use crate::backend::{addcarry_u64, Uint};
use crate::modulus::{Modulus, Reducer};
use crate::reduce::{barrett, montgomery, sub_once};

impl<const N: usize> Modulus<N> {

    /// Reduce `x` modulo `m`.
    pub fn reduce(&self, x: &Uint<N>) -> Uint<N> {
        match &self.red {
            Reducer::Montgomery { .. } => self.from_repr(&self.to_repr(x)),
            Reducer::Barrett { mu } => {
                barrett::reduce(x, &Uint::ZERO, &self.m, mu)
            }
        }
    }

    /// Reduce the double-width integer `lo + hi*2^(64*N)` modulo `m`.
    pub fn reduce_wide(&self, lo: &Uint<N>, hi: &Uint<N>) -> Uint<N> {
        match &self.red {
            Reducer::Montgomery { .. } => {
                self.from_repr(&self.wide_to_repr(lo, hi))
            }
            Reducer::Barrett { mu } => barrett::reduce(lo, hi, &self.m, mu),
        }
    }

    /// Compute `a*b mod m`. The operands need not be reduced.
    pub fn mul_mod(&self, a: &Uint<N>, b: &Uint<N>) -> Uint<N> {
        match &self.red {
            // b*(a*R)/R = a*b mod m; a*R mod m is reduced, as the
            // multiplication requires for its second operand.
            Reducer::Montgomery { m0i, .. } => {
                montgomery::mul(b, &self.to_repr(a), &self.m, *m0i)
            }
            Reducer::Barrett { mu } => barrett::mul(a, b, &self.m, mu),
        }
    }

    // ====================================================================
    // Representation-level operations. All inputs except those of
    // to_repr() and wide_to_repr() MUST be reduced representations.

    // Convert a plain integer (not necessarily reduced) into the internal
    // representation.
    pub(crate) fn to_repr(&self, x: &Uint<N>) -> Uint<N> {
        match &self.red {
            Reducer::Montgomery { m0i, r2, .. } => {
                montgomery::mul(x, r2, &self.m, *m0i)
            }
            Reducer::Barrett { mu } => {
                barrett::reduce(x, &Uint::ZERO, &self.m, mu)
            }
        }
    }

    // Convert a double-width plain integer lo + hi*R into the internal
    // representation.
    pub(crate) fn wide_to_repr(&self, lo: &Uint<N>, hi: &Uint<N>) -> Uint<N> {
        match &self.red {
            Reducer::Montgomery { m0i, r2, .. } => {
                // lo*R + hi*R^2 = mm(lo, R^2) + mm(mm(hi, R^2), R^2)
                let m0i = *m0i;
                let a = montgomery::mul(lo, r2, &self.m, m0i);
                let b = montgomery::mul(hi, r2, &self.m, m0i);
                let b = montgomery::mul(&b, r2, &self.m, m0i);
                self.add_repr(&a, &b)
            }
            Reducer::Barrett { mu } => barrett::reduce(lo, hi, &self.m, mu),
        }
    }

    // Convert an internal representation back to the plain value in
    // [0, m).
    pub(crate) fn from_repr(&self, x: &Uint<N>) -> Uint<N> {
        match &self.red {
            Reducer::Montgomery { m0i, .. } => {
                montgomery::redc(x, &Uint::ZERO, &self.m, *m0i)
            }
            Reducer::Barrett { .. } => *x,
        }
    }

    // Representation of 1.
    #[inline]
    pub(crate) fn one_repr(&self) -> Uint<N> {
        match &self.red {
            Reducer::Montgomery { one, .. } => *one,
            Reducer::Barrett { .. } => Uint::ONE,
        }
    }

    #[inline]
    pub(crate) fn add_repr(&self, a: &Uint<N>, b: &Uint<N>) -> Uint<N> {
        let (d, cc) = a.overflowing_add(b);
        sub_once(&d, cc as u8, &self.m)
    }

    #[inline]
    pub(crate) fn sub_repr(&self, a: &Uint<N>, b: &Uint<N>) -> Uint<N> {
        let (d, borrow) = a.overflowing_sub(b);

        // Add the modulus back if the subtraction borrowed.
        let mm = (borrow as u64).wrapping_neg();
        let mut r = [0u64; N];
        let mut cc = 0;
        for i in 0..N {
            (r[i], cc) = addcarry_u64(d.0[i], mm & self.m.0[i], cc);
        }
        Uint(r)
    }

    #[inline]
    pub(crate) fn neg_repr(&self, a: &Uint<N>) -> Uint<N> {
        self.sub_repr(&Uint::ZERO, a)
    }

    #[inline]
    pub(crate) fn mul_repr(&self, a: &Uint<N>, b: &Uint<N>) -> Uint<N> {
        match &self.red {
            Reducer::Montgomery { m0i, .. } => {
                montgomery::mul(a, b, &self.m, *m0i)
            }
            Reducer::Barrett { mu } => barrett::mul(a, b, &self.m, mu),
        }
    }

    #[inline]
    pub(crate) fn square_repr(&self, a: &Uint<N>) -> Uint<N> {
        match &self.red {
            Reducer::Montgomery { m0i, .. } => {
                montgomery::square(a, &self.m, *m0i)
            }
            Reducer::Barrett { mu } => barrett::square(a, &self.m, mu),
        }
    }
}

// ========================================================================

//! Modular exponentiation.
//!
//! Exponentiation uses the left-to-right binary method over the bits of
//! the exponent, from the most significant non-zero bit down. Each step
//! squares the accumulator, and the product by the base is merged in
//! with a constant-time selection; thus, execution time depends on the
//! bit length of the exponent, but not on the values of its bits.

use crate::backend::Uint;
use crate::modint::ModInt;
use crate::modulus::Modulus;

impl<const N: usize> Modulus<N> {

    // Raise a representation to the power e (e is a plain integer over M
    // limbs). x^0 = 1 for all x, including 0.
    pub(crate) fn pow_repr<const M: usize>(&self, x: &Uint<N>, e: &Uint<M>)
        -> Uint<N>
    {
        let mut r = self.one_repr();
        let mut i = e.bit_length();
        while i > 0 {
            i -= 1;
            r = self.square_repr(&r);
            let t = self.mul_repr(&r, x);
            r.set_cond(&t, (e.bit(i) as u32).wrapping_neg());
        }
        r
    }

    /// Compute `x^e mod m`. The base need not be reduced.
    pub fn pow_mod<const M: usize>(&self, x: &Uint<N>, e: &Uint<M>) -> Uint<N> {
        self.from_repr(&self.pow_repr(&self.to_repr(x), e))
    }
}

impl<'m, const N: usize> ModInt<'m, N> {

    /// Raise this value to the power `e`.
    #[inline]
    pub fn pow<const M: usize>(self, e: &Uint<M>) -> Self {
        Self { v: self.md.pow_repr(&self.v, e), md: self.md }
    }

    #[inline]
    pub fn pow_u64(self, e: u64) -> Self {
        self.pow(&Uint::<1>::from_u64(e))
    }
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::*;
    use crate::modulus::Strategy;
    use crate::testutil::{to_big, sha_stream};
    use rand_core::RngCore;

    fn check_pow<const N: usize>(md: &Modulus<N>) {
        let zm = to_big(md.value());
        let mut st = sha_stream(&md.value().0[0].to_le_bytes());
        let one = ModInt::one(md);
        let zero = ModInt::zero(md);

        assert!(zero.pow_u64(0) == one);
        assert!(zero.pow_u64(5) == zero);
        assert!(zero.pow(&Uint::<3>::ZERO) == one);

        for _ in 0..30 {
            let a = ModInt::random(md, &mut st);
            assert!(a.pow_u64(0) == one);
            assert!(a.pow_u64(1) == a);

            // repeated multiplication
            let mut r = one;
            for k in 0..20u64 {
                assert!(a.pow_u64(k) == r);
                r *= a;
            }

            // exponents wider and narrower than the modulus
            let e = Uint::<3>::random(&mut st);
            let za = to_big(&a.to_uint());
            assert!(to_big(&a.pow(&e).to_uint())
                == za.modpow(&to_big(&e), &zm));
            let e = Uint::<1>::random(&mut st);
            assert!(to_big(&a.pow(&e).to_uint())
                == za.modpow(&to_big(&e), &zm));

            // x^(e1+e2) = x^e1 * x^e2, x^(2e) = (x^e)^2
            let e1 = st.next_u32() as u64;
            let e2 = st.next_u32() as u64;
            assert!(a.pow_u64(e1 + e2) == a.pow_u64(e1) * a.pow_u64(e2));
            assert!(a.pow_u64(e1 << 1) == a.pow_u64(e1).square());

            // plain-level helper, with an unreduced base
            let x = Uint::<N>::random(&mut st);
            assert!(to_big(&md.pow_mod(&x, &e))
                == to_big(&x).modpow(&to_big(&e), &zm));
        }
    }

    #[test]
    fn pow_montgomery() {
        let md = Modulus::<4>::from_be_hex(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f")
            .unwrap();
        check_pow(&md);
        check_pow(&Modulus::new(&Uint::<2>::from_u64(1000003)).unwrap());
    }

    #[test]
    fn pow_barrett() {
        let p = Uint::<4>::from_be_hex(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f")
            .unwrap();
        check_pow(&Modulus::with_strategy(&p, Strategy::Barrett).unwrap());
        check_pow(&Modulus::new(&Uint::<2>::from_limbs([0, 1 << 40])).unwrap());
        check_pow(&Modulus::new(&Uint::<1>::from_u64(1000000)).unwrap());
    }

    #[test]
    fn fermat() {
        // a^(p-1) = 1 for a prime p and a != 0
        let md = Modulus::<4>::from_be_hex(
            "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed")
            .unwrap();
        let pm1 = md.value().wrapping_sub(&Uint::ONE);
        let mut st = sha_stream(b"fermat");
        for _ in 0..10 {
            let a = ModInt::random(&md, &mut st);
            if !a.is_zero() {
                assert!(a.pow(&pm1) == ModInt::one(&md));
            }
        }
    }
}

//! Modular integers.
//!
//! A `ModInt<'m, N>` is an integer modulo `m`, for a modulus parameter set
//! `&'m Modulus<N>`. The value is kept in the internal representation of
//! the modulus strategy (Montgomery form for odd moduli, plain form for
//! even moduli); all constructors take plain integers and `to_uint()`
//! returns the plain value in `[0, m)`, so the representation is never
//! observable.
//!
//! Values can be combined only if they use the same parameter set
//! instance (compared by address). The arithmetic operators panic on a
//! mismatch; `try_add()`, `try_sub()`, `try_mul()` and `try_cmp()`
//! report it as `Error::ModulusMismatch`.
//!
//! ```
//! use zkmod::{ModInt, Modulus, Uint};
//!
//! let m = Modulus::new(&Uint::<1>::from_u64(101)).unwrap();
//! let a = ModInt::from_u64(45, &m);
//! let b = ModInt::from_i64(-3, &m);
//! assert!((a * b).to_uint() == Uint::from_u64(67));
//! assert!((a - b + a).to_uint() == Uint::from_u64(93));
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand_core::RngCore;

use crate::backend::Uint;
use crate::error::{Error, Result};
use crate::modulus::Modulus;

/// An integer modulo the modulus of a parameter set.
#[derive(Clone, Copy)]
pub struct ModInt<'m, const N: usize> {
    // internal representation, always in [0, m)
    pub(crate) v: Uint<N>,
    pub(crate) md: &'m Modulus<N>,
}

impl<'m, const N: usize> ModInt<'m, N> {

    /// Create a value from a plain integer; the integer is reduced
    /// modulo `m`.
    #[inline]
    pub fn new(x: &Uint<N>, md: &'m Modulus<N>) -> Self {
        Self { v: md.to_repr(x), md }
    }

    #[inline(always)]
    pub fn zero(md: &'m Modulus<N>) -> Self {
        Self { v: Uint::ZERO, md }
    }

    #[inline(always)]
    pub fn one(md: &'m Modulus<N>) -> Self {
        Self { v: md.one_repr(), md }
    }

    #[inline]
    pub fn from_u64(x: u64, md: &'m Modulus<N>) -> Self {
        Self::new(&Uint::from_u64(x), md)
    }

    /// Create a value from a signed integer; negative values are mapped
    /// to `m - |x| mod m`.
    pub fn from_i64(x: i64, md: &'m Modulus<N>) -> Self {
        let r = Self::from_u64(x.unsigned_abs(), md);
        if x < 0 { -r } else { r }
    }

    /// Create a value from the double-width integer `lo + hi*2^(64*N)`.
    #[inline]
    pub fn from_wide(lo: &Uint<N>, hi: &Uint<N>, md: &'m Modulus<N>) -> Self {
        Self { v: md.wide_to_repr(lo, hi), md }
    }

    /// Decode bytes (unsigned little-endian convention) into a value;
    /// the source may have any length, and the integer is reduced
    /// modulo `m`.
    pub fn from_le_bytes_reduce(buf: &[u8], md: &'m Modulus<N>) -> Self {
        // Horner over chunks of 8*N bytes, most significant chunk first:
        // r <- (r*2^(64*N) + chunk) mod m
        let mut r = Uint::ZERO;
        for chunk in buf.chunks(N << 3).rev() {
            let mut d = [0u64; N];
            for (i, &b) in chunk.iter().enumerate() {
                d[i >> 3] |= (b as u64) << ((i & 7) << 3);
            }
            r = md.reduce_wide(&Uint(d), &r);
        }
        Self::new(&r, md)
    }

    /// Get a uniformly random value.
    pub fn random<R: RngCore + ?Sized>(md: &'m Modulus<N>, rng: &mut R) -> Self {
        // Rejection sampling over integers of the modulus length; each
        // attempt succeeds with probability greater than 1/2.
        loop {
            let mut x = Uint::random(rng);
            x.truncate_bits(md.bit_length());
            if x < md.m {
                return Self::new(&x, md);
            }
        }
    }

    /// Get the plain value, in `[0, m)`.
    #[inline]
    pub fn to_uint(&self) -> Uint<N> {
        self.md.from_repr(&self.v)
    }

    /// Get the parameter set of this value.
    #[inline(always)]
    pub fn modulus(&self) -> &'m Modulus<N> {
        self.md
    }

    #[inline(always)]
    pub fn is_zero(&self) -> bool {
        self.v.is_zero()
    }

    /// Return true if both values use the same parameter set instance.
    #[inline(always)]
    pub fn same_modulus(&self, rhs: &Self) -> bool {
        core::ptr::eq(self.md, rhs.md)
    }

    #[inline]
    fn check_modulus(&self, rhs: &Self) -> Result<()> {
        if self.same_modulus(rhs) {
            Ok(())
        } else {
            Err(Error::ModulusMismatch)
        }
    }

    // Operators cannot report errors; a modulus mismatch is a panic.
    #[inline]
    fn assert_modulus(&self, rhs: &Self) {
        if !self.same_modulus(rhs) {
            panic!("{}", Error::ModulusMismatch);
        }
    }

    pub fn try_add(&self, rhs: &Self) -> Result<Self> {
        self.check_modulus(rhs)?;
        Ok(Self { v: self.md.add_repr(&self.v, &rhs.v), md: self.md })
    }

    pub fn try_sub(&self, rhs: &Self) -> Result<Self> {
        self.check_modulus(rhs)?;
        Ok(Self { v: self.md.sub_repr(&self.v, &rhs.v), md: self.md })
    }

    pub fn try_mul(&self, rhs: &Self) -> Result<Self> {
        self.check_modulus(rhs)?;
        Ok(Self { v: self.md.mul_repr(&self.v, &rhs.v), md: self.md })
    }

    /// Compare the plain values of `self` and `rhs`.
    pub fn try_cmp(&self, rhs: &Self) -> Result<Ordering> {
        self.check_modulus(rhs)?;
        Ok(self.to_uint().cmp(&rhs.to_uint()))
    }

    #[inline]
    pub fn set_add(&mut self, rhs: &Self) {
        self.assert_modulus(rhs);
        self.v = self.md.add_repr(&self.v, &rhs.v);
    }

    #[inline]
    pub fn set_sub(&mut self, rhs: &Self) {
        self.assert_modulus(rhs);
        self.v = self.md.sub_repr(&self.v, &rhs.v);
    }

    #[inline]
    pub fn set_mul(&mut self, rhs: &Self) {
        self.assert_modulus(rhs);
        self.v = self.md.mul_repr(&self.v, &rhs.v);
    }

    #[inline]
    pub fn set_neg(&mut self) {
        self.v = self.md.neg_repr(&self.v);
    }

    #[inline]
    pub fn set_double(&mut self) {
        self.v = self.md.add_repr(&self.v, &self.v);
    }

    #[inline]
    pub fn set_square(&mut self) {
        self.v = self.md.square_repr(&self.v);
    }

    /// Square this value `n` times in place.
    pub fn set_xsquare(&mut self, n: u32) {
        for _ in 0..n {
            self.set_square();
        }
    }

    #[inline]
    pub fn double(self) -> Self {
        let mut r = self;
        r.set_double();
        r
    }

    #[inline]
    pub fn square(self) -> Self {
        let mut r = self;
        r.set_square();
        r
    }

    /// Return this value squared `n` times (i.e. raised to `2^n`).
    pub fn xsquare(self, n: u32) -> Self {
        let mut r = self;
        r.set_xsquare(n);
        r
    }

    #[inline(always)]
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    // Set this value to a if ctl == 0xFFFFFFFF, leave it unchanged if
    // ctl == 0. Both values MUST use the same modulus.
    #[inline]
    pub fn set_cond(&mut self, a: &Self, ctl: u32) {
        self.assert_modulus(a);
        self.v.set_cond(&a.v, ctl);
    }

    // Return a0 (if ctl == 0) or a1 (if ctl == 0xFFFFFFFF).
    #[inline]
    pub fn select(a0: &Self, a1: &Self, ctl: u32) -> Self {
        let mut r = *a0;
        r.set_cond(a1, ctl);
        r
    }

    // Swap a and b if ctl == 0xFFFFFFFF, leave them unchanged if ctl == 0.
    #[inline]
    pub fn cswap(a: &mut Self, b: &mut Self, ctl: u32) {
        a.assert_modulus(b);
        Uint::cswap(&mut a.v, &mut b.v, ctl);
    }
}

// Binary operators are implemented on all value/reference combinations
// with the in-place set_*() functions.
macro_rules! modint_binop {
    ($trait:ident, $fn:ident, $atrait:ident, $afn:ident, $set:ident) => {
        impl<'m, const N: usize> $trait<ModInt<'m, N>> for ModInt<'m, N> {
            type Output = ModInt<'m, N>;

            #[inline(always)]
            fn $fn(self, other: ModInt<'m, N>) -> ModInt<'m, N> {
                let mut r = self;
                r.$set(&other);
                r
            }
        }

        impl<'m, const N: usize> $trait<&ModInt<'m, N>> for ModInt<'m, N> {
            type Output = ModInt<'m, N>;

            #[inline(always)]
            fn $fn(self, other: &ModInt<'m, N>) -> ModInt<'m, N> {
                let mut r = self;
                r.$set(other);
                r
            }
        }

        impl<'m, const N: usize> $trait<ModInt<'m, N>> for &ModInt<'m, N> {
            type Output = ModInt<'m, N>;

            #[inline(always)]
            fn $fn(self, other: ModInt<'m, N>) -> ModInt<'m, N> {
                let mut r = *self;
                r.$set(&other);
                r
            }
        }

        impl<'m, const N: usize> $trait<&ModInt<'m, N>> for &ModInt<'m, N> {
            type Output = ModInt<'m, N>;

            #[inline(always)]
            fn $fn(self, other: &ModInt<'m, N>) -> ModInt<'m, N> {
                let mut r = *self;
                r.$set(other);
                r
            }
        }

        impl<'m, const N: usize> $atrait<ModInt<'m, N>> for ModInt<'m, N> {
            #[inline(always)]
            fn $afn(&mut self, other: ModInt<'m, N>) {
                self.$set(&other);
            }
        }

        impl<'m, const N: usize> $atrait<&ModInt<'m, N>> for ModInt<'m, N> {
            #[inline(always)]
            fn $afn(&mut self, other: &ModInt<'m, N>) {
                self.$set(other);
            }
        }
    };
}

modint_binop!(Add, add, AddAssign, add_assign, set_add);
modint_binop!(Sub, sub, SubAssign, sub_assign, set_sub);
modint_binop!(Mul, mul, MulAssign, mul_assign, set_mul);

impl<'m, const N: usize> Neg for ModInt<'m, N> {
    type Output = ModInt<'m, N>;

    #[inline(always)]
    fn neg(self) -> ModInt<'m, N> {
        let mut r = self;
        r.set_neg();
        r
    }
}

impl<'m, const N: usize> Neg for &ModInt<'m, N> {
    type Output = ModInt<'m, N>;

    #[inline(always)]
    fn neg(self) -> ModInt<'m, N> {
        let mut r = *self;
        r.set_neg();
        r
    }
}

// Values bound to different parameter sets are never equal, even if the
// moduli have the same value.
impl<'m, const N: usize> PartialEq for ModInt<'m, N> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.same_modulus(other) && self.v == other.v
    }
}

impl<'m, const N: usize> Eq for ModInt<'m, N> { }

impl<'m, const N: usize> PartialOrd for ModInt<'m, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl<'m, const N: usize> fmt::Debug for ModInt<'m, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModInt({:#x} mod {:#x})", self.to_uint(), self.md.m)
    }
}

impl<'m, const N: usize> fmt::Display for ModInt<'m, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_uint(), f)
    }
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::*;
    use crate::modulus::Strategy;
    use crate::testutil::{to_big, from_big, sha_stream};
    use num_bigint::BigUint;
    use std::format;

    const P_HEX: &str =
        "0xfffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f";
    const X_HEX: &str =
        "0xb5d724ce6f44c3c587867bbcb417e9eb6fa05e7e2ef029166568f14eb3161387";
    const Y_HEX: &str =
        "0xad6e1fcc680392abfb075838eafa513811112f14c593e0efacb6e9d0d7770b4";

    fn u256(s: &str) -> Uint<4> {
        Uint::from_be_hex(s).unwrap()
    }

    fn check_vectors(md: &Modulus<4>) {
        let x = ModInt::new(&u256(X_HEX), md);
        let y = ModInt::new(&u256(Y_HEX), md);
        assert!((x + y).to_uint() == u256(
            "c0ae06cb35c4fcf04736f14042c78efef0b1716f7b49672560345febc08d843b"));
        assert!((x - y).to_uint() == u256(
            "ab0042d1a8c48a9ac7d60639256844d7ee8f4b8ce296eb076a9d82b1a59ea2d3"));
        assert!((y - x).to_uint() == u256(
            "54ffbd2e573b75653829f9c6da97bb281170b4731d6914f895627d4d5a61595c"));
        assert!((x * y).to_uint() == u256(
            "8f351d3215fe69b3e70735f7506140aaa96873f044d78b4ee6809675e51df4ab"));
        assert!(x.pow_u64(65537).to_uint() == u256(
            "01cc6d380d3233bba8b9a6d7d41298b1724d82992ffe7753454dd0d1358e1d9a"));
        assert!(x.pow(&y.to_uint()).to_uint() == u256(
            "6f7affa49a6dfc19f3758f704e33464d1280bb4c3e11ba8cd5271436779a610f"));

        // Same results as the plain big-integer computation.
        let (zx, zy, zp) = (to_big(&x.to_uint()), to_big(&y.to_uint()),
            to_big(md.value()));
        assert!(to_big(&(x + y).to_uint()) == (&zx + &zy) % &zp);
        assert!(to_big(&(x - y).to_uint()) == (&zp + &zx - &zy) % &zp);
        assert!(to_big(&(x * y).to_uint()) == (&zx * &zy) % &zp);
    }

    #[test]
    fn secp256k1_vectors() {
        let mm = Modulus::<4>::from_be_hex(P_HEX).unwrap();
        assert!(mm.strategy() == Strategy::Montgomery);
        check_vectors(&mm);
        let mb = Modulus::with_strategy(&u256(P_HEX), Strategy::Barrett)
            .unwrap();
        check_vectors(&mb);
    }

    fn check_ops<const N: usize>(md: &Modulus<N>) {
        let zm = to_big(md.value());
        let mut st = sha_stream(format!("{:?}", md).as_bytes());
        let zero = ModInt::zero(md);
        let one = ModInt::one(md);
        assert!(zero.is_zero() && !one.is_zero());
        assert!(one.to_uint() == Uint::ONE);
        assert!((-zero).is_zero());
        assert!(ModInt::new(md.value(), md).is_zero());

        for _ in 0..100 {
            let a = ModInt::random(md, &mut st);
            let b = ModInt::random(md, &mut st);
            let c = ModInt::random(md, &mut st);
            assert!(a.to_uint() < *md.value());
            let (za, zb, zc) = (to_big(&a.to_uint()), to_big(&b.to_uint()),
                to_big(&c.to_uint()));

            // round-trip
            assert!(ModInt::new(&a.to_uint(), md) == a);

            // identities
            assert!(a + zero == a);
            assert!(a * one == a);
            assert!(a - a == zero);
            assert!((a + (-a)).is_zero());
            assert!(a * zero == zero);

            // distributivity
            assert!((a + b) * c == a * c + b * c);

            // against the reference
            assert!(to_big(&(a + b).to_uint()) == (&za + &zb) % &zm);
            assert!(to_big(&(a - b).to_uint()) == (&zm + &za - &zb) % &zm);
            assert!(to_big(&(a * b).to_uint()) == (&za * &zb) % &zm);
            assert!(to_big(&a.square().to_uint()) == (&za * &za) % &zm);
            assert!(to_big(&a.double().to_uint()) == (&za << 1) % &zm);
            assert!(to_big(&a.xsquare(3).to_uint())
                == za.modpow(&BigUint::from(8u8), &zm));

            // reference/value operator combinations and assignments
            let mut d = a;
            d += &b;
            d -= c;
            d *= &a;
            assert!(d == (&a + b - &c) * a);
            assert!(-&a == zero - a);

            // comparison follows the plain values
            assert!(a.partial_cmp(&b) == Some(za.cmp(&zb)));
        }
    }

    #[test]
    fn random_ops() {
        check_ops(&Modulus::<4>::from_be_hex(P_HEX).unwrap());
        check_ops(&Modulus::new(&Uint::<2>::MAX).unwrap());
        check_ops(&Modulus::new(&Uint::<1>::from_u64(1000000)).unwrap());
        check_ops(&Modulus::new(&Uint::<1>::from_u64(2)).unwrap());
        check_ops(&Modulus::new(&Uint::<3>::from_u64(3)).unwrap());
    }

    #[test]
    fn boundary_moduli() {
        // 2^256 - 189 (prime), all-ones, and an even modulus with the top
        // bit set: the double-width intermediate products are at their
        // largest.
        let one = BigUint::from(1u8);
        for zm in [
            (&one << 256) - BigUint::from(189u8),
            (&one << 256) - &one,
            (&one << 256) - BigUint::from(2u8),
            &one << 255,
        ] {
            let md = Modulus::new(&from_big::<4>(&zm)).unwrap();
            check_ops(&md);
            let x = ModInt::new(&Uint::MAX, &md);
            let y = ModInt::from_wide(&Uint::MAX, &Uint::MAX, &md);
            let zx = ((&one << 256) - &one) % &zm;
            let zy = ((&one << 512) - &one) % &zm;
            assert!(to_big(&x.to_uint()) == zx);
            assert!(to_big(&y.to_uint()) == zy);
            assert!(to_big(&(x * y).to_uint()) == (&zx * &zy) % &zm);
        }
    }

    #[test]
    fn constructors() {
        let md = Modulus::new(&Uint::<2>::from_u64(1000003)).unwrap();
        let a = ModInt::from_i64(-5, &md);
        assert!(a.to_uint() == Uint::from_u64(999998));
        assert!(ModInt::from_i64(i64::MIN, &md).to_uint()
            == Uint::from_u64(1000003 - ((1u64 << 63) % 1000003)));
        assert!(ModInt::from_i64(7, &md) == ModInt::from_u64(7, &md));

        let mut buf = [0u8; 100];
        for i in 0..buf.len() {
            buf[i] = (i as u8).wrapping_mul(37).wrapping_add(11);
        }
        let zm = to_big(md.value());
        for len in [0, 1, 15, 16, 17, 32, 33, 100] {
            let x = ModInt::from_le_bytes_reduce(&buf[..len], &md);
            assert!(to_big(&x.to_uint())
                == BigUint::from_bytes_le(&buf[..len]) % &zm);
        }

        // Only the most significant byte is set, or only the least.
        for len in [9, 17, 24, 40] {
            let mut hb = [0u8; 40];
            hb[len - 1] = 1;
            let x = ModInt::from_le_bytes_reduce(&hb[..len], &md);
            assert!(to_big(&x.to_uint())
                == (BigUint::from(1u8) << (8 * (len - 1))) % &zm);
            let mut lb = [0u8; 40];
            lb[0] = 1;
            let x = ModInt::from_le_bytes_reduce(&lb[..len], &md);
            assert!(x == ModInt::one(&md));
        }

        let even = Modulus::new(&Uint::<2>::from_limbs([0, 1 << 63])).unwrap();
        let x = ModInt::from_le_bytes_reduce(&buf, &even);
        assert!(to_big(&x.to_uint())
            == BigUint::from_bytes_le(&buf) % to_big(even.value()));
    }

    #[test]
    fn modulus_mismatch() {
        let m1 = Modulus::new(&Uint::<1>::from_u64(97)).unwrap();
        let m2 = Modulus::new(&Uint::<1>::from_u64(97)).unwrap();
        let a = ModInt::from_u64(5, &m1);
        let b = ModInt::from_u64(5, &m2);
        assert!(m1 == m2);
        assert!(!a.same_modulus(&b));
        assert!(a != b);
        assert!(a.partial_cmp(&b).is_none());
        assert!(a.try_add(&b) == Err(Error::ModulusMismatch));
        assert!(a.try_sub(&b) == Err(Error::ModulusMismatch));
        assert!(a.try_mul(&b) == Err(Error::ModulusMismatch));
        assert!(a.try_cmp(&b) == Err(Error::ModulusMismatch));
        let c = ModInt::from_u64(6, &m1);
        assert!(a.try_add(&c).unwrap().to_uint() == Uint::from_u64(11));
        assert!(a.try_cmp(&c) == Ok(Ordering::Less));
    }

    #[test]
    #[should_panic(expected = "operands use different moduli")]
    fn operator_mismatch_panics() {
        let m1 = Modulus::new(&Uint::<1>::from_u64(97)).unwrap();
        let m2 = Modulus::new(&Uint::<1>::from_u64(97)).unwrap();
        let _ = ModInt::from_u64(5, &m1) * ModInt::from_u64(5, &m2);
    }

    #[test]
    fn cond_ops() {
        let md = Modulus::new(&Uint::<1>::from_u64(1009)).unwrap();
        let a = ModInt::from_u64(3, &md);
        let b = ModInt::from_u64(4, &md);
        assert!(ModInt::select(&a, &b, 0) == a);
        assert!(ModInt::select(&a, &b, 0xFFFFFFFF) == b);
        let (mut x, mut y) = (a, b);
        ModInt::cswap(&mut x, &mut y, 0xFFFFFFFF);
        assert!(x == b && y == a);
        x.swap(&mut y);
        assert!(x == a && y == b);
        assert!(format!("{}", a) == format!("{}", Uint::<1>::from_u64(3)));
        assert!(format!("{:?}", b)
            == "ModInt(0x0000000000000004 mod 0x00000000000003f1)");
    }

    #[test]
    fn shared_modulus_threads() {
        let md = Modulus::<4>::from_be_hex(P_HEX).unwrap();
        let x = ModInt::new(&u256(X_HEX), &md);
        let y = ModInt::new(&u256(Y_HEX), &md);
        let expected = (x * y).to_uint();
        std::thread::scope(|s| {
            let hs: std::vec::Vec<_> = (0..4).map(|_| {
                s.spawn(|| (ModInt::new(&u256(X_HEX), &md)
                    * ModInt::new(&u256(Y_HEX), &md)).to_uint())
            }).collect();
            for h in hs {
                assert!(h.join().unwrap() == expected);
            }
        });
    }
}

//! Named moduli.
//!
//! This module defines parameter sets for a few moduli used by common
//! curves and proof systems. They are computed at compile-time and stored
//! in `static` items, so that each has a single address and all values
//! created against one of them can be combined:
//!
//! ```
//! use zkmod::field::SECP256K1_P;
//! use zkmod::ModInt;
//!
//! let a = ModInt::from_u64(7, &SECP256K1_P);
//! let b = -a;
//! assert!((a + b).is_zero());
//! ```

use crate::backend::Uint;
use crate::modulus::Modulus;

/// Base field of secp256k1: `p = 2^256 - 2^32 - 977`.
pub static SECP256K1_P: Modulus<4> = Modulus::new_const(&Uint::from_be_hex_const(
    "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"));

/// Base field of NIST P-256: `p = 2^256 - 2^224 + 2^192 + 2^96 - 1`.
pub static P256_P: Modulus<4> = Modulus::new_const(&Uint::from_be_hex_const(
    "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff"));

/// Base field of Curve25519 and Edwards25519: `p = 2^255 - 19`.
pub static CURVE25519_P: Modulus<4> = Modulus::new_const(&Uint::from_be_hex_const(
    "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed"));

/// Base field of the BN254 (alt_bn128) pairing-friendly curve.
pub static BN254_P: Modulus<4> = Modulus::new_const(&Uint::from_be_hex_const(
    "30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd47"));

/// Scalar field of BN254 (the group order `r`).
pub static BN254_R: Modulus<4> = Modulus::new_const(&Uint::from_be_hex_const(
    "30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001"));

// ========================================================================

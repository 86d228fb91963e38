//! Zkmod is a fixed-width modular integer arithmetic engine.
//!
//! This library implements computations on integers modulo a chosen
//! modulus `m`, for integers of a fixed width of `N` 64-bit limbs; it is
//! meant as the arithmetic core of cryptographic and zero-knowledge proof
//! code (finite fields, curve scalars, and so on are built on top of
//! it). Two reduction strategies are provided:
//!
//!  - Montgomery reduction, for odd moduli. Values are kept in
//!    Montgomery representation (`x*R mod m`, with `R = 2^(64*N)`), and
//!    multiplications use interleaved multiply-and-reduce loops.
//!
//!  - Barrett reduction, for even moduli (and, on request, odd moduli).
//!    Values are kept in plain form, and double-width products are
//!    reduced with a precomputed ratio `floor(2^(128*N) / m)`.
//!
//! The strategy is selected when a modulus parameter set (`Modulus`) is
//! built, from the parity of the modulus. Parameter sets may be computed
//! at runtime (`Modulus::new()`) or at compile-time
//! (`Modulus::new_const()`, for `static` items); the same derivation code
//! is used in both cases, hence with bit-identical results.
//!
//! # Usage
//!
//! ```
//! use zkmod::{ModInt, Modulus, Uint};
//!
//! let m = Modulus::<4>::from_be_hex(
//!     "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f")
//!     .unwrap();
//! let x = ModInt::new(&Uint::from_be_hex(
//!     "b5d724ce6f44c3c587867bbcb417e9eb6fa05e7e2ef029166568f14eb3161387")
//!     .unwrap(), &m);
//! let y = x.square() + ModInt::one(&m);
//! assert!(y - x * x == ModInt::one(&m));
//! ```
//!
//! Modular values (`ModInt`) borrow their parameter set, and use the
//! normal arithmetic operators; values that use distinct parameter sets
//! cannot be combined (the operators panic, and the `try_*()` methods
//! return `Error::ModulusMismatch`). Functions that modify a value in
//! place have a name in `set_*()` (e.g. `x.set_square()`, while
//! `x.square()` returns a new value).
//!
//! The library is `no_std` and does not allocate. Default feature `std`
//! only enables the `std` support of the dependencies (in particular,
//! `Error` then implements `std::error::Error` through `core::error`).
//!
//! # Conventions
//!
//! Modular arithmetic (addition, subtraction, multiplication, squaring)
//! is constant-time. Exponentiation is constant-time with regard to the
//! exponent bits but not its bit length. Comparisons and the plain-level
//! helpers of `Uint` are not constant-time. For the constant-time
//! selection functions (`set_cond()`, `select()`, `cswap()`), control
//! values are `u32` with 0xFFFFFFFF meaning "true" and 0x00000000 meaning
//! "false"; no other value shall be used.
//!
//! No inline assembly is used. On x86-64 architectures, the
//! `_addcarry_u64()` and `_subborrow_u64()` intrinsics are used
//! (from `core::arch::x86_64`); plain implementations are used on other
//! architectures.

#![no_std]

#[cfg(any(test, feature = "std"))]
#[macro_use]
extern crate std;

pub use rand_core::{CryptoRng, RngCore};

pub mod backend;
pub mod error;
pub mod modulus;
pub mod reduce;
pub mod modint;
pub mod field;

mod dispatch;
mod pow;

#[cfg(test)]
mod testutil;

pub use backend::{Checked, OverflowPolicy, Saturating, Uint, Wrapping};
pub use error::{Error, Result};
pub use modint::ModInt;
pub use modulus::{Modulus, Strategy};

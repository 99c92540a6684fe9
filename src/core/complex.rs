//! Scalar helpers over [`Complex64`].
//!
//! Modulus, argument, conjugate and the four arithmetic operators come from
//! `num_complex`; this module only adds the constants and comparisons the
//! rest of the crate keeps reaching for.

use num_complex::Complex64;

pub const ZERO: Complex64 = Complex64::new(0.0, 0.0);
pub const ONE: Complex64 = Complex64::new(1.0, 0.0);
pub const I: Complex64 = Complex64::new(0.0, 1.0);

/// Shorthand for `Complex64::new(re, im)`.
#[inline]
pub const fn c64(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// True when `|a - b| < tol`.
#[inline]
pub fn approx_eq(a: Complex64, b: Complex64, tol: f64) -> bool {
    (a - b).norm() < tol
}

/// True when the modulus of `z` is below `tol`.
#[inline]
pub fn is_negligible(z: Complex64, tol: f64) -> bool {
    z.norm() < tol
}

//!
//! Complex polynomial evaluation
//!
//! Horner scheme over complex coefficients, used by projections
//! defined as truncated complex series.
//!

/// Evaluate `sum(c[i] * z^(i+1))` for i in 0..n
///
/// The constant term is zero: coefficient `c[0]` multiplies `z`.
pub(crate) fn zpoly(z: (f64, f64), c: &[(f64, f64)]) -> (f64, f64) {
    let mut acc = (0., 0.);
    for coef in c.iter().rev() {
        acc = (
            coef.0 + acc.0 * z.0 - acc.1 * z.1,
            coef.1 + acc.0 * z.1 + acc.1 * z.0,
        );
    }
    (acc.0 * z.0 - acc.1 * z.1, acc.0 * z.1 + acc.1 * z.0)
}

/// Evaluate the polynomial and its first derivative
pub(crate) fn zpoly_deriv(z: (f64, f64), c: &[(f64, f64)]) -> ((f64, f64), (f64, f64)) {
    let mut acc = (0., 0.);
    let mut der = (0., 0.);
    for (i, coef) in c.iter().enumerate().rev() {
        let k = (i + 1) as f64;
        der = (
            coef.0 * k + der.0 * z.0 - der.1 * z.1,
            coef.1 * k + der.0 * z.1 + der.1 * z.0,
        );
        acc = (
            coef.0 + acc.0 * z.0 - acc.1 * z.1,
            coef.1 + acc.0 * z.1 + acc.1 * z.0,
        );
    }
    (
        (acc.0 * z.0 - acc.1 * z.1, acc.0 * z.1 + acc.1 * z.0),
        der,
    )
}

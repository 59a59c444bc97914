//!
//! Numeric utilities shared by the ellipsoid geometry
//! and the projection kernels
//!

pub(crate) mod consts {
    //!
    //! Common constants
    //!

    // Note that TAU is 2*PI
    pub(crate) use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

    pub(crate) const EPS_10: f64 = 1.0e-10;
    pub(crate) const EPS_12: f64 = 1.0e-12;
    pub(crate) const EPS_7: f64 = 1.0e-7;
}

// [`f64::asinh`] relies on a naive hypot which may overflow for
// large arguments; this implementation stays accurate up to ~0.89e308.
#[inline]
pub(crate) fn asinh(x: f64) -> f64 {
    (x.abs() + 1.0f64.hypot(x)).ln().copysign(x)
}

mod adjlon;
mod auth;
mod gauss;
mod mlfn;
mod msfn;
mod phi2;
mod qsfn;
mod tsfn;
mod zpoly;

pub(crate) use adjlon::adjlon;
pub(crate) use auth::{authlat, authset};
pub(crate) use gauss::{gauss, gauss_ini, inv_gauss, Gauss};
pub(crate) use mlfn::{enfn, inv_mlfn, mlfn, Enfn};
pub(crate) use msfn::msfn;
pub(crate) use phi2::phi2;
pub(crate) use qsfn::qsfn;
pub(crate) use tsfn::tsfn;
pub(crate) use zpoly::{zpoly, zpoly_deriv};

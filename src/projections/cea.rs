//!
//! Cylindrical Equal Area
//!
//! Parameters:
//!
//! * latitude_of_true_scale (lat_ts)
//!
//! See <https://proj.org/en/stable/operations/projections/cea.html>
//!

use crate::errors::{Error, Result};
use crate::math::consts::{EPS_10, FRAC_PI_2};
use crate::math::{authlat, qsfn};
use crate::parameters::{keys, ParamMap};
use crate::projections::{Classification, Orientation, ProjSetup, Property, Surface};

pub(super) const CLASSIFICATION: Classification = Classification {
    surface: Surface::Cylindrical,
    property: Property::EqualArea,
    orientation: Orientation::Tangent,
};

pub(super) const PARAMETERS: &[&str] = &["latitude_of_true_scale", "lat_ts"];

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Projection {
    Sph {
        k0: f64,
    },
    Ell {
        k0: f64,
        e: f64,
        one_es: f64,
        qp: f64,
        apa: (f64, f64, f64),
    },
}

impl Projection {
    pub fn cea(p: &mut ProjSetup, params: &ParamMap) -> Result<Self> {
        let (mut k0, t) = match params.try_angular(keys::LATITUDE_OF_TRUE_SCALE)? {
            Some(t) => {
                let k0 = t.cos();
                if k0 < 0. {
                    return Err(Error::InvalidParameterValue(
                        "Invalid value for lat_ts: |lat_ts| should be <= 90\u{00b0}",
                    ));
                }
                (k0, t)
            }
            None => (p.k0, 0.0),
        };

        Ok(if p.ellps.is_ellipsoid() {
            let sint = t.sin();
            k0 /= (1. - p.ellps.es * sint * sint).sqrt();
            Self::Ell {
                k0,
                e: p.ellps.e,
                one_es: p.ellps.one_es,
                qp: qsfn(1., p.ellps.e, p.ellps.one_es),
                apa: p.ellps.authalic_coeffs(),
            }
        } else {
            Self::Sph { k0 }
        })
    }

    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        match self {
            Self::Ell { k0, e, one_es, .. } => {
                Ok((k0 * lam, 0.5 * qsfn(phi.sin(), *e, *one_es) / k0, z))
            }
            Self::Sph { k0 } => Ok((k0 * lam, phi.sin() / k0, z)),
        }
    }

    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        match self {
            Self::Ell { k0, qp, apa, .. } => {
                let t = 2. * y * k0 / qp;
                // short circuit at the authalic pole
                let beta = if t.abs() >= 1. {
                    if t.abs() - 1. > EPS_10 {
                        return Err(Error::OutsideProjectionDomain);
                    }
                    FRAC_PI_2.copysign(t)
                } else {
                    t.asin()
                };
                Ok((x / k0, authlat(beta, *apa), z))
            }
            Self::Sph { k0 } => {
                let y = y * k0;
                let t = y.abs();
                if t - EPS_10 > 1. {
                    Err(Error::OutsideProjectionDomain)
                } else {
                    let phi = if t >= 1. {
                        FRAC_PI_2.copysign(y)
                    } else {
                        y.asin()
                    };
                    Ok((x / k0, phi, z))
                }
            }
        }
    }
}

//!
//! American Polyconic
//!
//! Every parallel is the arc of a tangent cone, true to scale along the
//! central meridian. Ellipsoidal and spherical forms; the ellipsoidal
//! inverse runs a Newton iteration on the meridional distance.
//!
//! Reference: USGS Professional Paper 1395 (Snyder), pp. 124-131.
//!

use crate::errors::{Error, Result};
use crate::math::{enfn, mlfn, msfn, Enfn};
use crate::parameters::ParamMap;
use crate::projections::{Classification, Orientation, ProjSetup, Property, Surface};

pub(super) const CLASSIFICATION: Classification = Classification {
    surface: Surface::Polyconical,
    property: Property::Aphylactic,
    orientation: Orientation::Tangent,
};

pub(super) const PARAMETERS: &[&str] = &[];

const TOL: f64 = 1.0e-10;
const CONV: f64 = 1.0e-10;
const ITOL: f64 = 1.0e-12;
const N_ITER: usize = 10;
const I_ITER: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Projection {
    Ell {
        ml0: f64,
        en: Enfn,
        es: f64,
        one_es: f64,
    },
    Sph {
        ml0: f64,
    },
}

impl Projection {
    pub fn poly(p: &mut ProjSetup, _: &ParamMap) -> Result<Self> {
        Ok(if p.ellps.is_ellipsoid() {
            let en = enfn(p.ellps.es);
            Self::Ell {
                ml0: mlfn(p.phi0, p.phi0.sin(), p.phi0.cos(), en),
                en,
                es: p.ellps.es,
                one_es: p.ellps.one_es,
            }
        } else {
            Self::Sph { ml0: -p.phi0 }
        })
    }

    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        match *self {
            Self::Ell { ml0, en, es, .. } => {
                if phi.abs() <= TOL {
                    Ok((lam, -ml0, z))
                } else {
                    let (sp, cp) = phi.sin_cos();
                    let ms = if cp.abs() > TOL {
                        msfn(sp, cp, es) / sp
                    } else {
                        0.
                    };
                    let arc = lam * sp;
                    Ok((
                        ms * arc.sin(),
                        (mlfn(phi, sp, cp, en) - ml0) + ms * (1. - arc.cos()),
                        z,
                    ))
                }
            }
            Self::Sph { ml0 } => {
                if phi.abs() <= TOL {
                    Ok((lam, ml0, z))
                } else {
                    let cot = 1. / phi.tan();
                    let e = lam * phi.sin();
                    Ok((cot * e.sin(), phi + ml0 + cot * (1. - e.cos()), z))
                }
            }
        }
    }

    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        match *self {
            Self::Ell {
                ml0,
                en,
                es,
                one_es,
            } => {
                let y = y + ml0;
                if y.abs() <= TOL {
                    Ok((x, 0., z))
                } else {
                    let r = y * y + x * x;
                    let mut phi = y;
                    let mut i = I_ITER;
                    while i > 0 {
                        let sp = phi.sin();
                        let cp = phi.cos();
                        let s2ph = sp * cp;
                        if cp.abs() < ITOL {
                            return Err(Error::ArithmeticDivergence("polyconic latitude"));
                        }
                        let mut mlp = (1. - es * sp * sp).sqrt();
                        let c = sp * mlp / cp;
                        let ml = mlfn(phi, sp, cp, en);
                        let mlb = ml * ml + r;
                        mlp = one_es / (mlp * mlp * mlp);
                        let dphi = (ml + ml + c * mlb - 2. * y * (c * ml + 1.))
                            / (es * s2ph * (mlb - 2. * y * ml) / c
                                + 2. * (y - ml) * (c * mlp - 1. / s2ph)
                                - mlp
                                - mlp);
                        phi += dphi;
                        if dphi.abs() <= CONV {
                            break;
                        }
                        i -= 1;
                    }
                    if i == 0 {
                        return Err(Error::ArithmeticDivergence("polyconic latitude"));
                    }
                    let c = phi.sin();
                    let lam =
                        (x * phi.tan() * (1. - es * c * c).sqrt()).asin() / phi.sin();
                    Ok((lam, phi, z))
                }
            }
            Self::Sph { ml0 } => {
                let y = y - ml0;
                if y.abs() <= TOL {
                    Ok((x, 0., z))
                } else {
                    let b = x * x + y * y;
                    let mut phi = y;
                    let mut i = N_ITER;
                    while i > 0 {
                        let tp = phi.tan();
                        let dphi = (y * (phi * tp + 1.) - phi - 0.5 * (phi * phi + b) * tp)
                            / ((phi - y) / tp - 1.);
                        phi -= dphi;
                        if dphi.abs() <= CONV {
                            break;
                        }
                        i -= 1;
                    }
                    if i == 0 {
                        return Err(Error::ArithmeticDivergence("polyconic latitude"));
                    }
                    let lam = (x * phi.tan()).asin() / phi.sin();
                    Ok((lam, phi, z))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::{proj, test_proj_roundtrip};
    use approx::assert_abs_diff_eq;

    #[test]
    fn proj_poly_equator_is_linear() {
        let p = proj("poly", "WGS84", &[]);
        // on the equator the projection degenerates to x = a*lam
        let (x, y, _) = p.forward(0.25, 0., 0.).unwrap();
        assert_abs_diff_eq!(x, 0.25 * 6378137., epsilon = 1e-6);
        assert_abs_diff_eq!(y, 0., epsilon = 1e-6);
    }

    #[test]
    fn proj_poly_central_meridian_is_meridian_arc() {
        let el = crate::ellps::Ellipsoid::try_from_defn(&crate::ellipsoids::constants::WGS84)
            .unwrap();
        let p = proj("poly", "WGS84", &[]);
        let phi = 0.7;
        let (x, y, _) = p.forward(0., phi, 0.).unwrap();
        assert_abs_diff_eq!(x, 0., epsilon = 1e-6);
        assert_abs_diff_eq!(y, el.arc_from_lat(phi), epsilon = 1e-4);
    }

    #[test]
    fn proj_poly_roundtrip() {
        test_proj_roundtrip(&proj("poly", "WGS84", &[]), &[(2., 1.), (-75., 40.), (30., -25.)], 1e-9);
        test_proj_roundtrip(&proj("poly", "R:6400000", &[]), &[(2., 1.), (-75., 40.)], 1e-9);
    }

    #[test]
    fn proj_poly_kind() {
        assert_eq!(CLASSIFICATION.surface, Surface::Polyconical);
    }
}

//!
//! Lambert Conformal Conic, one or two standard parallels
//!
//! Parameters:
//!
//! * latitude_of_origin (lat_0): the reference latitude
//! * central_meridian (lon_0): the reference longitude
//! * standard_parallel_1 (lat_1): first standard parallel
//! * standard_parallel_2 (lat_2): second standard parallel
//! * scale_factor (k_0): scale at the natural origin (1SP form)
//! * false_easting / false_northing (x_0, y_0): offsets in meters
//!
//! The single parallel form is obtained by omitting both standard
//! parallels (the latitude of origin is then the tangent parallel) or
//! by collapsing them onto the same latitude.
//!

use crate::errors::{Error, Result};
use crate::math::consts::{EPS_10, FRAC_PI_2, FRAC_PI_4};
use crate::math::{msfn, phi2, tsfn};
use crate::parameters::{keys, ParamMap};
use crate::projections::{Classification, Orientation, ProjSetup, Property, Surface};

pub(super) const CLASSIFICATION: Classification = Classification {
    surface: Surface::Conical,
    property: Property::Conformal,
    orientation: Orientation::Secant,
};

pub(super) const PARAMETERS: &[&str] = &[
    "standard_parallel_1",
    "lat_1",
    "standard_parallel_2",
    "lat_2",
];

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Projection {
    phi1: f64,
    phi2: f64,
    n: f64,
    rho0: f64,
    c: f64,
    ellips: bool,
    e: f64,
    k0: f64,
}

impl Projection {
    pub fn lcc(p: &mut ProjSetup, params: &ParamMap) -> Result<Self> {
        let phi1 = match params.try_angular(keys::STANDARD_PARALLEL_1)? {
            Some(v) => v,
            None => p.phi0,
        };
        let phi2 = match params.try_angular(keys::STANDARD_PARALLEL_2)? {
            Some(v) => v,
            None => {
                if !params.contains(keys::LATITUDE_OF_ORIGIN) {
                    p.phi0 = phi1;
                }
                phi1
            }
        };

        // Standard parallels cannot be equal and on opposite sides of
        // the equator, nor can the cone be tangent at the equator
        if (phi1 + phi2).abs() < EPS_10 {
            return Err(Error::ConicStandardParallelsEqual);
        }

        let phi0 = p.phi0;

        let sinphi = phi1.sin();
        let cosphi = phi1.cos();
        let secant = (phi1 - phi2).abs() >= EPS_10;

        let el = &p.ellps;
        let ellips = el.es != 0.;

        let (n, c, rho0);

        if ellips {
            let m1 = msfn(sinphi, cosphi, el.es);
            let ml1 = tsfn(phi1, sinphi, el.e);
            // secant zone
            n = if secant {
                let sinphi2 = phi2.sin();
                (m1 / msfn(sinphi2, phi2.cos(), el.es)).ln()
                    / (ml1 / tsfn(phi2, sinphi2, el.e)).ln()
            } else {
                sinphi
            };
            c = m1 * ml1.powf(-n) / n;
            rho0 = if (phi0.abs() - FRAC_PI_2).abs() < EPS_10 {
                0.
            } else {
                c * tsfn(phi0, phi0.sin(), el.e).powf(n)
            }
        } else {
            n = if secant {
                (cosphi / phi2.cos()).ln()
                    / ((FRAC_PI_4 + 0.5 * phi2).tan() / (FRAC_PI_4 + 0.5 * phi1).tan()).ln()
            } else {
                sinphi
            };
            c = cosphi * (FRAC_PI_4 + 0.5 * phi1).tan().powf(n) / n;
            rho0 = if (phi0.abs() - FRAC_PI_2).abs() < EPS_10 {
                0.
            } else {
                c * (FRAC_PI_4 + 0.5 * phi0).tan().powf(-n)
            }
        }

        Ok(Self {
            phi1,
            phi2,
            n,
            rho0,
            c,
            ellips,
            e: el.e,
            k0: p.k0,
        })
    }

    pub fn forward(&self, mut lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        let rho = if (phi.abs() - FRAC_PI_2).abs() < EPS_10 {
            if (phi * self.n) <= 0. {
                return Err(Error::ToleranceCondition);
            } else {
                0.
            }
        } else {
            self.c
                * if self.ellips {
                    tsfn(phi, phi.sin(), self.e).powf(self.n)
                } else {
                    (FRAC_PI_4 + 0.5 * phi).tan().powf(-self.n)
                }
        };

        lam *= self.n;

        Ok((
            self.k0 * (rho * lam.sin()),
            self.k0 * (self.rho0 - rho * lam.cos()),
            z,
        ))
    }

    pub fn inverse(&self, mut x: f64, mut y: f64, z: f64) -> Result<(f64, f64, f64)> {
        x /= self.k0;
        y /= self.k0;

        y = self.rho0 - y;
        let mut rho = x.hypot(y);
        let (lam, phi);
        if rho != 0. {
            if self.n < 0. {
                rho = -rho;
                x = -x;
                y = -y;
            }
            phi = if self.ellips {
                phi2((rho / self.c).powf(1. / self.n), self.e)?
            } else {
                2. * (self.c / rho).powf(1. / self.n).atan() - FRAC_PI_2
            };
            lam = x.atan2(y) / self.n;
        } else {
            lam = 0.;
            phi = if self.n > 0. { FRAC_PI_2 } else { -FRAC_PI_2 };
        }
        Ok((lam, phi, z))
    }
}

#[cfg(test)]
mod tests {
    use crate::math::consts::EPS_10;
    use crate::measures::Measure;
    use crate::tests::utils::{proj, test_proj_forward, test_proj_inverse};

    #[test]
    fn proj_lcc_2sp() {
        let p = proj(
            "lcc",
            "GRS80",
            &[
                ("lat_1", Measure::degrees(0.5)),
                ("lat_2", Measure::degrees(2.)),
            ],
        );

        let inputs = [((2., 1., 0.), (222588.439735968423, 110660.533870799671, 0.))];

        test_proj_forward(&p, &inputs, EPS_10);
        test_proj_inverse(&p, &inputs, EPS_10);
    }

    #[test]
    fn proj_lcc_rejects_degenerate_cone() {
        use crate::errors::Error;
        let el = crate::ellps::Ellipsoid::try_from_defn(&crate::ellipsoids::constants::GRS80)
            .unwrap();
        let params = crate::parameters::ParamMap::new()
            .with("lat_1", Measure::degrees(-10.))
            .with("lat_2", Measure::degrees(10.));
        assert!(matches!(
            crate::projections::Projected::new("lcc", &el, &params),
            Err(Error::ConicStandardParallelsEqual)
        ));
    }
}

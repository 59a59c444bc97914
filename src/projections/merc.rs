//!
//! Mercator (1SP)
//!
//! Spherical and ellipsoidal forward and inverse. The scale factor may
//! be given directly or derived from a latitude of true scale. Pole
//! adjacent latitudes are clamped to +/- 85 degrees, where the world
//! variant is conventionally cut.
//!

use crate::errors::{Error, Result};
use crate::math::{asinh, consts::FRAC_PI_2, msfn, phi2};
use crate::parameters::{keys, ParamMap};
use crate::projections::{clamp_polar, Classification, Orientation, ProjSetup, Property, Surface};

pub(super) const CLASSIFICATION: Classification = Classification {
    surface: Surface::Cylindrical,
    property: Property::Conformal,
    orientation: Orientation::Tangent,
};

pub(super) const PARAMETERS: &[&str] = &["latitude_of_true_scale", "lat_ts"];

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Projection {
    is_ellps: bool,
    k0: f64,
    e: f64,
}

impl Projection {
    pub fn merc(p: &mut ProjSetup, params: &ParamMap) -> Result<Self> {
        let phits = params.try_angular(keys::LATITUDE_OF_TRUE_SCALE)?;
        if let Some(phits) = phits {
            if phits.abs() >= FRAC_PI_2 {
                return Err(Error::InvalidParameterValue(
                    "latitude of true scale larger than 90 degrees",
                ));
            }
        }

        if p.ellps.is_ellipsoid() {
            if let Some(phits) = phits {
                p.k0 = msfn(phits.sin(), phits.cos(), p.ellps.es);
            }
        } else if let Some(phits) = phits {
            p.k0 = phits.cos();
        }

        Ok(Self {
            is_ellps: p.ellps.is_ellipsoid(),
            k0: p.k0,
            e: p.ellps.e,
        })
    }

    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        let phi = clamp_polar(phi);
        if self.is_ellps {
            let (sphi, cphi) = phi.sin_cos();
            Ok((
                self.k0 * lam,
                self.k0 * (asinh(sphi / cphi) - self.e * (self.e * sphi).atanh()),
                z,
            ))
        } else {
            Ok((self.k0 * lam, self.k0 * asinh(phi.tan()), z))
        }
    }

    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        if self.is_ellps {
            Ok((x / self.k0, phi2((-y / self.k0).exp(), self.e)?, z))
        } else {
            Ok((x / self.k0, (y / self.k0).sinh().atan(), z))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::consts::EPS_10;
    use crate::measures::Measure;
    use crate::tests::utils::{proj, test_proj_forward, test_proj_inverse};

    #[test]
    fn proj_merc_ellps() {
        let p = proj("merc", "GRS80", &[]);

        let inputs = [
            ((2., 1., 0.), (222638.98158654713, 110579.96521825077, 0.)),
            ((2., -1., 0.), (222638.98158654713, -110579.96521825077, 0.)),
            ((-2., 1., 0.), (-222638.98158654713, 110579.96521825077, 0.)),
            (
                (-2., -1., 0.),
                (-222638.98158654713, -110579.96521825077, 0.),
            ),
        ];

        test_proj_forward(&p, &inputs, EPS_10);
        test_proj_inverse(&p, &inputs, EPS_10);
    }

    #[test]
    fn proj_merc_sph() {
        let p = proj("merc", "R:6400000", &[]);

        let inputs = [
            ((2., 1., 0.), (223402.14425527418, 111706.74357494547, 0.)),
            ((2., -1., 0.), (223402.14425527418, -111706.74357494547, 0.)),
            ((-2., 1., 0.), (-223402.14425527418, 111706.74357494547, 0.)),
            (
                (-2., -1., 0.),
                (-223402.14425527418, -111706.74357494547, 0.),
            ),
        ];

        test_proj_forward(&p, &inputs, EPS_10);
        test_proj_inverse(&p, &inputs, EPS_10);
    }

    #[test]
    fn proj_merc_pole_clamps() {
        let p = proj("merc", "WGS84", &[]);
        let (_, y, _) = p.forward(0., FRAC_PI_2, 0.).unwrap();
        let (_, y85, _) = p.forward(0., 85f64.to_radians(), 0.).unwrap();
        assert_eq!(y, y85);
    }

    #[test]
    fn proj_merc_lat_ts_rejected_at_pole() {
        let el = crate::ellps::Ellipsoid::try_from_defn(&crate::ellipsoids::constants::WGS84)
            .unwrap();
        let err = crate::projections::Projected::new(
            "merc",
            &el,
            &crate::parameters::ParamMap::new().with("lat_ts", Measure::degrees(90.)),
        );
        assert!(err.is_err());
    }
}

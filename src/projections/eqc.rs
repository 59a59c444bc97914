//!
//! Equidistant Cylindrical (Plate Carree)
//!
//! Simplest of all projections, spherical only.
//!
//! See <https://proj.org/operations/projections/eqc.html>
//!

use crate::ellps::Ellipsoid;
use crate::errors::{Error, Result};
use crate::parameters::{keys, ParamMap};
use crate::projections::{Classification, Orientation, ProjSetup, Property, Surface};

pub(super) const CLASSIFICATION: Classification = Classification {
    surface: Surface::Cylindrical,
    property: Property::Equidistant,
    orientation: Orientation::Tangent,
};

pub(super) const PARAMETERS: &[&str] = &["latitude_of_true_scale", "lat_ts"];

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Projection {
    rc: f64,
    phi0: f64,
}

impl Projection {
    pub fn eqc(p: &mut ProjSetup, params: &ParamMap) -> Result<Self> {
        let rc = params
            .try_angular(keys::LATITUDE_OF_TRUE_SCALE)?
            .unwrap_or(0.)
            .cos();
        if rc <= 0. {
            return Err(Error::InvalidParameterValue("lat_ts should be <= 90°"));
        }
        p.ellps = Ellipsoid::sphere(p.ellps.a)?;
        Ok(Self { rc, phi0: p.phi0 })
    }

    #[inline(always)]
    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        Ok((lam * self.rc, phi - self.phi0, z))
    }

    #[inline(always)]
    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        Ok((x / self.rc, y + self.phi0, z))
    }
}

#[cfg(test)]
mod tests {
    use crate::math::consts::EPS_10;
    use crate::measures::Measure;
    use crate::tests::utils::{proj, test_proj_forward, test_proj_inverse};

    #[test]
    fn proj_eqc_wgs84() {
        let p = proj("eqc", "WGS84", &[]);

        let inputs = [((2., 47., 0.), (222638.98158654713, 5232016.06728385761, 0.))];

        test_proj_forward(&p, &inputs, EPS_10);
        test_proj_inverse(&p, &inputs, EPS_10);
    }

    #[test]
    fn proj_eqc_lat_ts() {
        let p = proj(
            "eqc",
            "WGS84",
            &[
                ("lat_ts", Measure::degrees(30.)),
                ("lon_0", Measure::degrees(-90.)),
            ],
        );

        let inputs = [(
            (-88., 30., 0.),
            (192811.01392664597, 3339584.72379820701, 0.),
        )];

        test_proj_forward(&p, &inputs, EPS_10);
        test_proj_inverse(&p, &inputs, EPS_10);
    }
}

//!
//! Gauss-Schreiber Transverse Mercator
//!
//! Double projection: conformal mapping onto a sphere followed by a
//! spherical transverse Mercator. Used by the French overseas grids
//! (Gauss Laborde Reunion and kin).
//!
//! Reference: IGN NTG 76, <https://proj.org/operations/projections/gstmerc.html>
//!

use crate::errors::Result;
use crate::math::{phi2, tsfn};
use crate::parameters::ParamMap;
use crate::projections::{Classification, Orientation, ProjSetup, Property, Surface};

pub(super) const CLASSIFICATION: Classification = Classification {
    surface: Surface::Cylindrical,
    property: Property::Conformal,
    orientation: Orientation::Transverse,
};

pub(super) const PARAMETERS: &[&str] = &[];

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Projection {
    e: f64,
    ra: f64,
    c: f64,
    n1: f64,
    n2: f64,
    xs: f64,
    ys: f64,
}

impl Projection {
    pub fn gstmerc(p: &mut ProjSetup, _: &ParamMap) -> Result<Self> {
        let el = &p.ellps;
        let (sinphi0, cosphi0) = p.phi0.sin_cos();

        // sphere of curvature at the origin latitude
        let n1 = (1. + el.es * cosphi0.powi(4) / (1. - el.es)).sqrt();
        let phic = (sinphi0 / n1).asin();
        let c = (-tsfn(phic, phic.sin(), 0.).ln())
            - n1 * (-tsfn(p.phi0, sinphi0, el.e).ln());
        let n2 = p.k0 * el.a * (1. - el.es).sqrt() / (1. - el.es * sinphi0 * sinphi0);

        Ok(Self {
            e: el.e,
            ra: el.ra,
            c,
            n1,
            n2,
            xs: 0.,
            ys: -n2 * phic,
        })
    }

    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        let big_l = self.n1 * lam;
        // isometric latitude on the sphere of curvature
        let ls = self.c + self.n1 * (-tsfn(phi, phi.sin(), self.e).ln());
        let sin_ls1 = big_l.sin() / ls.cosh();
        let ls1 = -tsfn(sin_ls1.asin(), sin_ls1, 0.).ln();
        Ok((
            (self.xs + self.n2 * ls1) * self.ra,
            (self.ys + self.n2 * (ls.sinh() / big_l.cos()).atan()) * self.ra,
            z,
        ))
    }

    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        let x = x / self.ra;
        let y = y / self.ra;
        let big_l = ((x - self.xs) / self.n2)
            .sinh()
            .atan2(((y - self.ys) / self.n2).cos());
        let sin_c = ((y - self.ys) / self.n2).sin() / ((x - self.xs) / self.n2).cosh();
        let lc = -tsfn(sin_c.asin(), sin_c, 0.).ln();
        let lam = big_l / self.n1;
        let phi = phi2(((self.c - lc) / self.n1).exp(), self.e)?;
        Ok((lam, phi, z))
    }
}

#[cfg(test)]
mod tests {
    use crate::measures::Measure;
    use crate::tests::utils::{proj, test_proj_forward, test_proj_roundtrip};

    // Gauss Laborde Reunion style setup
    fn reunion() -> crate::projections::Projected {
        proj(
            "gstmerc",
            "intl",
            &[
                ("lat_0", Measure::degrees(-21.116_666_666_666_667)),
                ("lon_0", Measure::degrees(55.533_333_333_333_33)),
                ("x_0", Measure::meters(160_000.)),
                ("y_0", Measure::meters(50_000.)),
            ],
        )
    }

    #[test]
    fn proj_gstmerc_center_maps_to_false_origin() {
        let inputs = [(
            (55.533_333_333_333_33, -21.116_666_666_666_667, 0.),
            (160_000., 50_000., 0.),
        )];
        test_proj_forward(&reunion(), &inputs, 1e-6);
    }

    #[test]
    fn proj_gstmerc_roundtrip() {
        test_proj_roundtrip(&reunion(), &[(55.3, -21.3), (55.8, -20.9), (55.533, -21.116)], 1e-9);
    }
}

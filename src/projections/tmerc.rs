//!
//! Transverse Mercator
//!
//! Knud Poder/Karsten Engsager algorithm: trigonometric series in the
//! complex plane over the Gaussian latitude, sixth degree in the third
//! flattening. Exact to the sub millimeter over a +/- 37 degree band
//! around the central meridian.
//!
//! Reference: <https://proj.org/operations/projections/tmerc.html>
//!
//! The zoned UTM variant fixes k0 = 0.9996, a 500 km false easting and
//! a 10000 km false northing on the southern hemisphere.
//!
#![allow(non_snake_case)]

use crate::errors::{Error, Result};
use crate::math::{adjlon, asinh, consts::PI};
use crate::parameters::{keys, ParamMap};
use crate::projections::{Classification, Orientation, ProjSetup, Property, Surface};

pub(super) const CLASSIFICATION: Classification = Classification {
    surface: Surface::Cylindrical,
    property: Property::Conformal,
    orientation: Orientation::Transverse,
};

pub(super) const PARAMETERS: &[&str] = &["zone", "south"];

type Coeffs = [f64; 6];

// Gaussian <-> geodetic latitude, real Clenshaw summation
#[inline]
fn gatg(c: &Coeffs, B: f64) -> f64 {
    let cos_2B = 2. * (2. * B).cos();
    let mut h = c[0];
    let mut h2 = 0.;
    for p in &c[1..] {
        let hn = -h2 + cos_2B * h + p;
        h2 = h;
        h = hn;
    }
    B + h * (2. * B).sin()
}

// Complex Clenshaw summation
#[inline]
fn clens_cplx(a: &Coeffs, arg_r: f64, arg_i: f64) -> (f64, f64) {
    let (sin_arg_r, cos_arg_r) = arg_r.sin_cos();
    let sinh_arg_i = arg_i.sinh();
    let cosh_arg_i = arg_i.cosh();

    let mut r = 2. * cos_arg_r * cosh_arg_i;
    let mut i = -2. * sin_arg_r * sinh_arg_i;

    let (mut hr1, mut hr2) = (0., 0.);
    let (mut hi1, mut hi2) = (0., 0.);

    let mut hr = a[0];
    let mut hi = 0.;
    for p in &a[1..] {
        hr2 = hr1;
        hi2 = hi1;
        hr1 = hr;
        hi1 = hi;
        hi = -hi2 + i * hr1 + r * hi1;
        hr = -hr2 + r * hr1 - i * hi1 + p;
    }

    r = sin_arg_r * cosh_arg_i;
    i = cos_arg_r * sinh_arg_i;
    (
        r * hr - i * hi, // R
        r * hi + i * hr, // I
    )
}

// Real Clenshaw summation
#[inline]
fn clens(a: &Coeffs, arg_r: f64) -> f64 {
    let r = 2. * arg_r.cos();
    let (mut hr1, mut hr2) = (0., 0.);
    let mut hr = a[0];
    for p in &a[1..] {
        hr2 = hr1;
        hr1 = hr;
        hr = -hr2 + r * hr1 + p;
    }
    arg_r.sin() * hr
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Projection {
    Qn: f64,     // Merid. quad., scaled to the projection
    Zb: f64,     // Radius vector in polar coord. systems
    cgb: Coeffs, // Constants for Gauss -> Geo lat
    cbg: Coeffs, // Constants for Geo lat -> Gauss
    utg: Coeffs, // Constants for transv. merc. -> geo
    gtu: Coeffs, // Constants for geo -> transv. merc.
}

impl Projection {
    pub fn tmerc(p: &mut ProjSetup, _params: &ParamMap) -> Result<Self> {
        if p.ellps.f == 0. {
            return Err(Error::EllipsoidRequired);
        }

        // Series coefficients are cached on the ellipsoid
        let rect = p.ellps.rectified_coeffs().clone();

        // Norm. mer. quad, scaled to the projection
        let Qn = p.k0 * rect.qn;

        // Gaussian latitude value of the origin latitude
        let z = gatg(&rect.cbg, p.phi0);

        // Origin northing minus true northing at the origin latitude
        // i.e. true northing = N - Zb
        let Zb = -Qn * (z + clens(&rect.gtu, 2. * z));

        Ok(Self {
            Qn,
            Zb,
            cgb: rect.cgb,
            cbg: rect.cbg,
            utg: rect.utg,
            gtu: rect.gtu,
        })
    }

    //-------------------
    // UTM
    //------------------
    pub fn utm(p: &mut ProjSetup, params: &ParamMap) -> Result<Self> {
        p.x0 = 500_000.;
        p.y0 = if params.check_option(keys::SOUTH)? {
            10_000_000.
        } else {
            0.
        };

        let zone = match params.try_factor(keys::ZONE)? {
            Some(zone) => {
                let zone = zone as i32;
                if (1..=60).contains(&zone) {
                    zone
                } else {
                    return Err(Error::InvalidUtmZone);
                }
            }
            // nearest central meridian input
            None => zone_from_longitude(p.lam0).ok_or(Error::InvalidUtmZone)?,
        };

        p.lam0 = (f64::from(zone - 1) + 0.5) * PI / 30. - PI;
        p.k0 = 0.9996;
        p.phi0 = 0.;

        Self::tmerc(p, params)
    }

    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        let (mut Cn, mut Ce) = (phi, lam);

        // ell. LAT, LNG -> Gaussian LAT, LNG
        Cn = gatg(&self.cbg, Cn);

        // Gaussian LAT, LNG -> compl. sph. LAT
        let (sin_Cn, cos_Cn) = Cn.sin_cos();
        let (sin_Ce, cos_Ce) = Ce.sin_cos();

        Cn = sin_Cn.atan2(cos_Ce * cos_Cn);
        Ce = (sin_Ce * cos_Cn).atan2(sin_Cn.hypot(cos_Cn * cos_Ce));

        // compl. sph. N, E -> ell. norm. N, E
        Ce = asinh(Ce.tan());
        let (dCn, dCe) = clens_cplx(&self.gtu, 2. * Cn, 2. * Ce);
        Cn += dCn;
        Ce += dCe;

        if Ce.abs() <= 2.623395162778 {
            Ok((
                self.Qn * Ce,           // Easting
                self.Qn * Cn + self.Zb, // Northing
                z,
            ))
        } else {
            Err(Error::OutsideProjectionDomain)
        }
    }

    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        let (mut Cn, mut Ce) = (y, x);

        // normalize N, E
        Cn = (Cn - self.Zb) / self.Qn;
        Ce /= self.Qn;

        if Ce.abs() <= 2.623395162778 {
            // 150 degrees
            // norm. N, E -> compl. sph. LAT, LNG
            let (dCn, dCe) = clens_cplx(&self.utg, 2. * Cn, 2. * Ce);
            Cn += dCn;
            Ce += dCe;
            Ce = Ce.sinh().atan();
            // compl. sph. LAT -> Gaussian LAT, LNG
            let (sin_Cn, cos_Cn) = Cn.sin_cos();
            let (sin_Ce, cos_Ce) = Ce.sin_cos();

            Ce = sin_Ce.atan2(cos_Ce * cos_Cn);
            Cn = (sin_Cn * cos_Ce).atan2(sin_Ce.hypot(cos_Ce * cos_Cn));
            // Gaussian LAT, LNG -> ell. LAT, LNG
            Ok((Ce, gatg(&self.cgb, Cn), z))
        } else {
            Err(Error::OutsideProjectionDomain)
        }
    }
}

/// One based UTM zone containing the longitude `lon` (radians)
pub fn zone_from_longitude(lon: f64) -> Option<i32> {
    let zone = ((adjlon(lon) + PI) * 30. / PI).floor() as i32 + 1;
    (1..=60).contains(&zone).then_some(zone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::consts::EPS_10;
    use crate::tests::utils::{proj, test_proj_forward, test_proj_inverse};

    #[test]
    fn proj_tmerc() {
        let p = proj("tmerc", "GRS80", &[]);

        let inputs = [
            ((2., 1., 0.), (222650.79679758527, 110642.22941193319, 0.)),
            ((2., -1., 0.), (222650.79679758527, -110642.22941193319, 0.)),
            ((-2., 1., 0.), (-222650.79679758527, 110642.22941193319, 0.)),
            (
                (-2., -1., 0.),
                (-222650.79679758527, -110642.22941193319, 0.),
            ),
        ];

        test_proj_forward(&p, &inputs, EPS_10);
        test_proj_inverse(&p, &inputs, EPS_10);
    }

    #[test]
    fn proj_utm_zone_30() {
        let p = proj(
            "utm",
            "GRS80",
            &[("zone", crate::measures::Measure::factor(30.))],
        );

        let inputs = [
            ((2., 1., 0.), (1057002.4054912976, 110955.14117594929, 0.)),
            ((2., -1., 0.), (1057002.4054912976, -110955.1411759492, 0.)),
            ((-2., 1., 0.), (611263.8122789060, 110547.10569680421, 0.)),
            ((-2., -1., 0.), (611263.8122789060, -110547.10569680421, 0.)),
        ];

        test_proj_forward(&p, &inputs, EPS_10);
        test_proj_inverse(&p, &inputs, EPS_10);
    }

    #[test]
    fn utm_zone_helper() {
        assert_eq!(zone_from_longitude(3f64.to_radians()), Some(31));
        assert_eq!(zone_from_longitude(-3f64.to_radians()), Some(30));
        assert_eq!(zone_from_longitude(0.0), Some(31));
        assert_eq!(zone_from_longitude(174.5f64.to_radians()), Some(60));
    }

    #[test]
    fn utm_rejects_bad_zone() {
        use crate::measures::Measure;
        let err = crate::projections::Projected::new(
            "utm",
            &crate::ellps::Ellipsoid::try_from_defn(&crate::ellipsoids::constants::GRS80).unwrap(),
            &crate::parameters::ParamMap::new().with("zone", Measure::factor(61.)),
        );
        assert!(matches!(err, Err(Error::InvalidUtmZone)));
    }
}

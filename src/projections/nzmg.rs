//!
//! New Zealand Map Grid
//!
//! Sixth order complex polynomial over the isometric latitude
//! difference; every constant of the method is fixed, including the
//! International 1924 ellipsoid and the false origin.
//!
//! The inverse seeds a first approximation with a dedicated inverse
//! coefficient series, then polishes it with two Newton steps over the
//! forward polynomial.
//!
//! Reference: EPSG Guidance Note 7-2, New Zealand Map Grid;
//! Reilly, W.I., "A conformal mapping projection with minimum scale
//! error", Survey Review XXII/168, 1973.
//!

use crate::ellipsoids::constants as ellps;
use crate::ellps::Ellipsoid;
use crate::errors::Result;
use crate::math::{zpoly, zpoly_deriv};
use crate::parameters::ParamMap;
use crate::projections::{Classification, Orientation, ProjSetup, Property, Surface};

pub(super) const CLASSIFICATION: Classification = Classification {
    surface: Surface::Miscellaneous,
    property: Property::Conformal,
    orientation: Orientation::Oblique,
};

pub(super) const PARAMETERS: &[&str] = &[];

// radians to "fifth of arc seconds" (1e5 seconds) and back
const RAD_TO_SEC5: f64 = 2.062_648_062_470_963_6;
const SEC5_TO_RAD: f64 = 0.484_813_681_109_536;

const NEWTON_STEPS: usize = 2;

/// Forward series B[1..6]
#[rustfmt::skip]
const BF: [(f64, f64); 6] = [
    ( 0.755_785_322_8,  0.0),
    ( 0.249_204_646,    0.003_371_507),
    (-0.001_541_739,    0.041_058_560),
    (-0.101_629_07,     0.017_276_09),
    (-0.266_234_89,    -0.362_492_18),
    (-0.687_098_3,     -1.165_196_7),
];

/// Inverse first approximation series b[1..6]
#[rustfmt::skip]
const BI: [(f64, f64); 6] = [
    ( 1.323_127_043_9,  0.0),
    (-0.577_245_789,   -0.007_809_598),
    ( 0.508_307_513,   -0.112_208_952),
    (-0.150_947_62,     0.182_006_02),
    ( 1.014_181_79,     1.644_976_96),
    ( 1.966_054_9,      2.512_764_5),
];

/// Isometric latitude difference from latitude difference, series in
/// 1e-5 arc seconds
#[rustfmt::skip]
const TPSI: [f64; 10] = [
    0.639_917_507_3,
   -0.135_879_761_3,
    0.063_294_409,
   -0.025_268_53,
    0.011_787_9,
   -0.005_516_1,
    0.002_690_6,
   -0.001_333,
    0.000_67,
   -0.000_34,
];

/// Latitude difference from isometric latitude difference
#[rustfmt::skip]
const TPHI: [f64; 9] = [
    1.562_701_424_3,
    0.518_540_639_8,
   -0.033_330_98,
   -0.105_290_6,
   -0.036_859_4,
    0.007_317,
    0.012_20,
    0.003_94,
   -0.001_3,
];

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Projection {
    phi0: f64,
}

impl Projection {
    pub fn nzmg(p: &mut ProjSetup, _: &ParamMap) -> Result<Self> {
        // Every parameter of the method is a fixed constant
        p.ellps = Ellipsoid::try_from_defn(&ellps::INTL)?;
        p.lam0 = 173f64.to_radians();
        p.phi0 = -41f64.to_radians();
        p.x0 = 2_510_000.;
        p.y0 = 6_023_150.;
        p.k0 = 1.;
        Ok(Self { phi0: p.phi0 })
    }

    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        let dphi = (phi - self.phi0) * RAD_TO_SEC5;
        let mut psi = 0.;
        for c in TPSI.iter().rev() {
            psi = c + dphi * psi;
        }
        psi *= dphi;

        // zeta = dpsi + i*dlam maps through the complex series
        let (re, im) = zpoly((psi, lam), &BF);
        Ok((im, re, z))
    }

    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        // target value of the forward polynomial
        let zeta = (y, x);

        // first approximation through the inverse series
        let mut p = zpoly(zeta, &BI);

        // two Newton steps over the forward series
        for _ in 0..NEWTON_STEPS {
            let (f, fp) = zpoly_deriv(p, &BF);
            let (fr, fi) = (f.0 - zeta.0, f.1 - zeta.1);
            let den = fp.0 * fp.0 + fp.1 * fp.1;
            p = (
                p.0 - (fr * fp.0 + fi * fp.1) / den,
                p.1 - (fi * fp.0 - fr * fp.1) / den,
            );
        }

        let (dpsi, lam) = p;

        // latitude from the isometric latitude difference
        let mut dphi = 0.;
        for c in TPHI.iter().rev() {
            dphi = c + dpsi * dphi;
        }
        dphi *= dpsi;

        Ok((lam, self.phi0 + dphi * SEC5_TO_RAD, z))
    }
}

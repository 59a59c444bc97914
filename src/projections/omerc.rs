//!
//! Oblique Mercator (Hotine)
//!
//! Conformal cylindrical projection about an oblique initial line,
//! given by the azimuth at the projection center. The rectified grid
//! may be rotated away from the oblique axis by a separate angle.
//!
//! Parameters:
//!
//! * azimuth_of_initial_line (alpha): azimuth of the center line
//! * angle_rectified_to_oblique (gamma): rectified grid rotation,
//!   defaults to the azimuth
//! * latitude_of_origin / central_meridian: projection center
//! * no_off: suppress the natural origin offset along the center line
//! * no_rot: skip the rectification rotation
//!
//! Reference: EPSG Guidance Note 7-2, Hotine Oblique Mercator;
//! Snyder, USGS Professional Paper 1395, pp. 66-75.
//!
#![allow(non_snake_case)]

use crate::errors::{Error, Result};
use crate::math::consts::{EPS_10, FRAC_PI_2, FRAC_PI_4};
use crate::math::{phi2, tsfn};
use crate::parameters::{keys, ParamMap};
use crate::projections::{Classification, Orientation, ProjSetup, Property, Surface};

pub(super) const CLASSIFICATION: Classification = Classification {
    surface: Surface::Cylindrical,
    property: Property::Conformal,
    orientation: Orientation::Oblique,
};

pub(super) const PARAMETERS: &[&str] = &[
    "azimuth_of_initial_line",
    "alpha",
    "azi",
    "angle_rectified_to_oblique",
    "gamma",
    "no_off",
    "no_rot",
];

const TOL: f64 = 1.0e-7;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Projection {
    B: f64,
    E: f64,
    AB: f64,
    ArB: f64,
    BrA: f64,
    rB: f64,
    singam: f64,
    cosgam: f64,
    sinrot: f64,
    cosrot: f64,
    u_0: f64,
    v_pole_n: f64,
    v_pole_s: f64,
    no_rot: bool,
    e: f64,
}

impl Projection {
    pub fn omerc(p: &mut ProjSetup, params: &ParamMap) -> Result<Self> {
        let alpha_c = params.try_angular(keys::AZIMUTH_OF_INITIAL_LINE)?;
        let gamma_p = params.try_angular(keys::ANGLE_RECTIFIED_TO_OBLIQUE)?;
        let no_rot = params.check_option(&["no_rot"])?;
        let no_off = params.check_option(&["no_off"])?;

        if alpha_c.is_none() && gamma_p.is_none() {
            return Err(Error::MissingParameter(
                "azimuth_of_initial_line".to_string(),
            ));
        }

        let (e, es, one_es) = (p.ellps.e, p.ellps.es, p.ellps.one_es);
        let com = one_es.sqrt();

        let (B, A, D, F, E);
        if p.phi0.abs() > EPS_10 {
            let (sinph0, cosph0) = p.phi0.sin_cos();
            let con = 1. - es * sinph0 * sinph0;
            let b2 = cosph0 * cosph0;
            B = (1. + es * b2 * b2 / one_es).sqrt();
            A = B * p.k0 * com / con;
            D = B * com / (cosph0 * con.sqrt());
            let mut f = D * D - 1.;
            if f <= 0. {
                f = 0.;
            } else {
                f = f.sqrt();
                if p.phi0 < 0. {
                    f = -f;
                }
            }
            F = f + D;
            E = F * tsfn(p.phi0, sinph0, e).powf(B);
        } else {
            B = 1. / com;
            A = p.k0;
            D = 1.;
            F = 1.;
            E = 1.;
        }

        let (gamma0, gamma, alpha);
        match (alpha_c, gamma_p) {
            (Some(a), g) => {
                gamma0 = (a.sin() / D).clamp(-1., 1.).asin();
                gamma = g.unwrap_or(a);
                alpha = a;
            }
            (None, Some(g)) => {
                gamma0 = g;
                gamma = g;
                alpha = (D * g.sin()).clamp(-1., 1.).asin();
            }
            (None, None) => unreachable!(),
        }

        // shift the central meridian onto the natural origin of the
        // oblique axis
        p.lam0 -= (0.5 * (F - 1. / F) * gamma0.tan()).clamp(-1., 1.).asin() / B;

        let (singam, cosgam) = gamma0.sin_cos();
        let (sinrot, cosrot) = gamma.sin_cos();

        let rB = 1. / B;
        let ArB = A * rB;
        let BrA = 1. / ArB;
        let AB = A * B;

        let u_0 = if no_off {
            0.
        } else {
            let u = ArB * ((D * D - 1.).max(0.).sqrt() / alpha.cos()).atan();
            if p.phi0 < 0. {
                -u.abs()
            } else {
                u.abs()
            }
        };

        Ok(Self {
            B,
            E,
            AB,
            ArB,
            BrA,
            rB,
            singam,
            cosgam,
            sinrot,
            cosrot,
            u_0,
            v_pole_n: ArB * (FRAC_PI_4 - 0.5 * gamma0).tan().ln(),
            v_pole_s: ArB * (FRAC_PI_4 + 0.5 * gamma0).tan().ln(),
            no_rot,
            e,
        })
    }

    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        let (u, v);
        if (phi.abs() - FRAC_PI_2).abs() > EPS_10 {
            let W = self.E / tsfn(phi, phi.sin(), self.e).powf(self.B);
            let temp = 1. / W;
            let S = 0.5 * (W - temp);
            let T = 0.5 * (W + temp);
            let V = (self.B * lam).sin();
            let U = (S * self.singam - V * self.cosgam) / T;
            if (U.abs() - 1.).abs() < EPS_10 {
                return Err(Error::OutsideProjectionDomain);
            }
            v = 0.5 * self.ArB * ((1. - U) / (1. + U)).ln();
            let temp = (self.B * lam).cos();
            if temp.abs() < TOL {
                u = self.AB * lam;
            } else {
                u = self.ArB * (S * self.cosgam + V * self.singam).atan2(temp);
            }
        } else {
            v = if phi > 0. {
                self.v_pole_n
            } else {
                self.v_pole_s
            };
            u = self.ArB * phi;
        }

        if self.no_rot {
            Ok((u, v, z))
        } else {
            let u = u - self.u_0;
            Ok((
                v * self.cosrot + u * self.sinrot,
                u * self.cosrot - v * self.sinrot,
                z,
            ))
        }
    }

    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        let (u, v);
        if self.no_rot {
            v = y;
            u = x;
        } else {
            v = x * self.cosrot - y * self.sinrot;
            u = y * self.cosrot + x * self.sinrot + self.u_0;
        }
        let Qp = (-self.BrA * v).exp();
        let Sp = 0.5 * (Qp - 1. / Qp);
        let Tp = 0.5 * (Qp + 1. / Qp);
        let Vp = (self.BrA * u).sin();
        let Up = (Vp * self.cosgam + Sp * self.singam) / Tp;
        if (Up.abs() - 1.).abs() < EPS_10 {
            Ok((0., FRAC_PI_2.copysign(Up), z))
        } else {
            let ts = (self.E / ((1. + Up) / (1. - Up)).sqrt()).powf(self.rB);
            let phi = phi2(ts, self.e)?;
            let lam = -self.rB
                * (Sp * self.cosgam - Vp * self.singam).atan2((self.BrA * u).cos());
            Ok((lam, phi, z))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::measures::Measure;
    use crate::tests::utils::{proj, test_proj_forward, test_proj_roundtrip};

    // EPSG Guidance Note 7-2 worked example:
    // Timbalai 1948 / RSO Borneo, Everest 1830 (Sabah & Sarawak)
    fn rso_borneo() -> crate::projections::Projected {
        proj(
            "omerc",
            "evrstSS",
            &[
                ("lat_0", Measure::degrees(4.)),
                ("lonc", Measure::degrees(115.)),
                ("alpha", Measure::degrees(53.315_820_472_222_22)),
                ("gamma", Measure::degrees(53.130_102_361_111_11)),
                ("k", Measure::factor(0.99984)),
                ("x_0", Measure::meters(590_476.87)),
                ("y_0", Measure::meters(442_857.65)),
            ],
        )
    }

    #[test]
    fn proj_omerc_rso_borneo() {
        // EPSG test point 5d 23' 14.1129" N, 115d 48' 19.8196" E
        let inputs = [(
            (115.805_505_444_444_4, 5.387_253_583_333_333, 0.),
            (679_245.73, 596_562.78, 0.),
        )];
        test_proj_forward(&rso_borneo(), &inputs, 0.05);
    }

    #[test]
    fn proj_omerc_roundtrip() {
        test_proj_roundtrip(&rso_borneo(), &[(115., 4.), (116.5, 5.5), (113.9, 2.1)], 1e-9);
    }
}

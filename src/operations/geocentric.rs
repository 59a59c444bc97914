//!
//! Geocentric frame operations
//!
//! Geographic to geocentric conversion and the geocentric datum shifts:
//! three parameter translation and seven parameter Bursa-Wolf transform.
//!

use crate::ellps::Ellipsoid;
use crate::errors::{Error, Result};
use crate::math::consts::{FRAC_PI_2, PI, TAU};
use crate::measures::SEC_TO_RAD;

const GENAU: f64 = 1.0e-12;
const GENAU2: f64 = GENAU * GENAU;
const MAXITER: usize = 30;
const FRAC_PI_2_EPS: f64 = 1.001 * FRAC_PI_2;

/// Convert geodetic coordinates (lon, lat, height) to
/// geocentric coordinates (X, Y, Z)
///
/// Angles in radians, heights and cartesian components in meters.
pub(crate) fn geodetic_to_geocentric(
    lam: f64,
    phi: f64,
    height: f64,
    a: f64,
    es: f64,
) -> Result<(f64, f64, f64)> {
    let mut lon = lam;
    let mut lat = phi;

    if lat < -FRAC_PI_2 && lat > -FRAC_PI_2_EPS {
        lat = -FRAC_PI_2
    } else if lat > FRAC_PI_2 && lat < FRAC_PI_2_EPS {
        lat = FRAC_PI_2
    } else if !(-FRAC_PI_2..=FRAC_PI_2).contains(&lat) {
        return Err(Error::LatitudeOutOfRange);
    };

    if lon > PI {
        // TAU is 2PI
        lon -= TAU;
    }

    let sin_lat = lat.sin();
    // Earth radius at location
    let rn = a / (1. - es * (sin_lat * sin_lat)).sqrt();

    let cos_lat = lat.cos();
    Ok((
        (rn + height) * cos_lat * lon.cos(),
        (rn + height) * cos_lat * lon.sin(),
        ((rn * (1. - es)) + height) * sin_lat,
    ))
}

/// Convert geocentric coordinates (X, Y, Z) to
/// geodetic coordinates (lon, lat, height)
///
/// Iterative computation of the latitude and height
/// (Institut fur Erdmessung, University of Hannover scheme),
/// converged to 1e-12 radian. Terminates for any location outside
/// a small neighborhood of the center of mass.
pub(crate) fn geocentric_to_geodetic(
    x: f64,
    y: f64,
    z: f64,
    a: f64,
    es: f64,
    b: f64,
) -> Result<(f64, f64, f64)> {
    let d2 = (x * x) + (y * y);

    // distance between semi-minor axis and location
    let p = d2.sqrt();
    // distance between center and location
    let rr = (d2 + z * z).sqrt();

    // if (X,Y,Z)=(0.,0.,0.) then height becomes semi-minor axis
    // of ellipsoid (=center of mass), latitude becomes PI/2
    let lon = if p / a < GENAU {
        if rr / a < GENAU {
            return Ok((0., FRAC_PI_2, -b));
        }
        0.
    } else {
        y.atan2(x)
    };

    let ct = z / rr;
    let st = p / rr;
    let mut rx = 1.0 / (1.0 - es * (2.0 - es) * st * st).sqrt();
    let mut cphi0 = st * (1.0 - es) * rx;
    let mut sphi0 = ct * rx;
    let (mut rk, mut rn, mut cphi, mut sphi, mut sdphi, mut height);

    // iterate on sin(latitude) until the correction
    // drops below GENAU
    let mut iter = 0;
    loop {
        iter += 1;
        rn = a / (1.0 - es * sphi0 * sphi0).sqrt();
        // ellipsoidal (geodetic) height
        height = p * cphi0 + z * sphi0 - rn * (1.0 - es * sphi0 * sphi0);

        rk = es * rn / (rn + height);
        rx = 1.0 / (1.0 - rk * (2.0 - rk) * st * st).sqrt();
        cphi = st * (1.0 - rk) * rx;
        sphi = ct * rx;
        sdphi = sphi * cphi0 - cphi * sphi0;
        cphi0 = cphi;
        sphi0 = sphi;

        if sdphi * sdphi <= GENAU2 {
            break;
        }

        if iter >= MAXITER {
            break;
        }
    }

    Ok((lon, (sphi / cphi.abs()).atan(), height))
}

/// Conversion between the geographic coordinates of an ellipsoid
/// and the geocentric cartesian frame.
///
/// Forward is geographic to geocentric; the geocentric to geographic
/// direction is exposed as a sibling operation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocentricConversion {
    pub a: f64,
    pub b: f64,
    pub es: f64,
}

impl GeocentricConversion {
    pub fn new(ellps: &Ellipsoid) -> Self {
        Self {
            a: ellps.a,
            b: ellps.b,
            es: ellps.es,
        }
    }

    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        geodetic_to_geocentric(lam, phi, z, self.a, self.es)
    }

    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        geocentric_to_geodetic(x, y, z, self.a, self.es, self.b)
    }
}

/// Three parameter geocentric translation
#[derive(Debug, Clone, PartialEq)]
pub struct GeocentricTranslation {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl GeocentricTranslation {
    pub fn new(dx: f64, dy: f64, dz: f64) -> Self {
        Self { dx, dy, dz }
    }

    pub fn transform(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        (x + self.dx, y + self.dy, z + self.dz)
    }

    pub fn negated(&self) -> Self {
        Self::new(-self.dx, -self.dy, -self.dz)
    }

    pub fn is_null(&self) -> bool {
        self.dx == 0. && self.dy == 0. && self.dz == 0.
    }
}

/// Seven parameter Bursa-Wolf transformation between two geocentric
/// frames, position vector rotation convention.
///
/// Translations in meters, rotations in radians, scale in parts per
/// million. The inverse is taken by negating all seven parameters,
/// which is first order exact only: for the small rotations of
/// practical datum shifts the error is far below the parameter
/// accuracy, and the operation is treated as exactly invertible.
#[derive(Debug, Clone, PartialEq)]
pub struct Helmert {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
    pub ppm: f64,
}

impl Helmert {
    /// Build from translations in meters, rotations in arc seconds and
    /// scale in parts per million (the usual publication units).
    pub fn position_vector(
        dx: f64,
        dy: f64,
        dz: f64,
        rx_sec: f64,
        ry_sec: f64,
        rz_sec: f64,
        ppm: f64,
    ) -> Self {
        Self {
            dx,
            dy,
            dz,
            rx: rx_sec * SEC_TO_RAD,
            ry: ry_sec * SEC_TO_RAD,
            rz: rz_sec * SEC_TO_RAD,
            ppm,
        }
    }

    pub fn transform(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        let s = 1. + self.ppm * 1.0e-6;
        (
            self.dx + s * (x - self.rz * y + self.ry * z),
            self.dy + s * (self.rz * x + y - self.rx * z),
            self.dz + s * (-self.ry * x + self.rx * y + z),
        )
    }

    pub fn negated(&self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
            dz: -self.dz,
            rx: -self.rx,
            ry: -self.ry,
            rz: -self.rz,
            ppm: -self.ppm,
        }
    }
}

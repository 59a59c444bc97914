//!
//! Projection engine
//!

// We definitely do not want to use trait objects, so we use
// enum for type abstraction.
//
// Each projection module contributes a kernel working on normalized
// coordinates: the central meridian shift, the semi major axis scaling
// and the false origin are applied by the `Projected` wrapper. This
// keeps the kernels close to the reference formulas and the wrapper
// identical for every projection.

use crate::ellps::Ellipsoid;
use crate::errors::{Error, Result};
use crate::log;
use crate::math::adjlon;
use crate::math::consts::{EPS_12, FRAC_PI_2};
use crate::operations::Operation;
use crate::parameters::{keys, ParamMap};

/// Developable surface of a projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Azimuthal,
    Conical,
    Cylindrical,
    Pseudocylindrical,
    Pseudoconical,
    Polyconical,
    Hybrid,
    Miscellaneous,
    Retroazimuthal,
}

/// Property preserved by a projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Conformal,
    EqualArea,
    Equidistant,
    Aphylactic,
    Gnomonic,
}

/// Orientation of the projection axis or surface contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Oblique,
    Secant,
    Tangent,
    Transverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classification {
    pub surface: Surface,
    pub property: Property,
    pub orientation: Orientation,
}

/// Common projection state handed to the kernel initializers.
///
/// Initializers may override members (zoned projections, fixed
/// ellipsoid projections, spherical only projections).
#[derive(Debug, Clone)]
pub(crate) struct ProjSetup {
    pub ellps: Ellipsoid,
    pub lam0: f64,
    pub phi0: f64,
    pub k0: f64,
    pub x0: f64,
    pub y0: f64,
}

pub(crate) type InitFn = fn(&mut ProjSetup, &ParamMap) -> Result<ProjKind>;

/// Returned by projection lookup
pub(crate) struct ProjInit(&'static str, InitFn, &'static [&'static str]);

impl ProjInit {
    #[inline(always)]
    pub fn name(&self) -> &'static str {
        self.0
    }

    #[inline(always)]
    pub fn init(&self, p: &mut ProjSetup, params: &ParamMap) -> Result<ProjKind> {
        self.1(p, params)
    }

    /// Parameter keys recognized on top of the common set
    pub fn parameters(&self) -> &'static [&'static str] {
        self.2
    }
}

macro_rules! declare_projections {
    ($(($name:ident $(,)? $($init:ident),*)),+ $(,)?) => {
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, PartialEq)]
        pub(crate) enum ProjKind {
            $(
                $name($name::Projection),
            )+
        }

        impl ProjKind {
            pub(crate) fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
                match self {
                    $(
                        Self::$name(p) => p.forward(lam, phi, z),
                    )+
                }
            }

            pub(crate) fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
                match self {
                    $(
                        Self::$name(p) => p.inverse(x, y, z),
                    )+
                }
            }

            pub(crate) fn classification(&self) -> Classification {
                match self {
                    $(
                        Self::$name(_) => $name::CLASSIFICATION,
                    )+
                }
            }
        }

        mod stubs {
            use super::*;
            $(
                pub(super) fn $name(p: &mut ProjSetup, params: &ParamMap) -> Result<ProjKind> {
                    super::$name::Projection::$name(p, params).map(ProjKind::$name)
                }
                $(
                    pub(super) fn $init(p: &mut ProjSetup, params: &ParamMap) -> Result<ProjKind> {
                        super::$name::Projection::$init(p, params).map(ProjKind::$name)
                    }
                )*
            )+
        }

        const PROJECTIONS: &[ProjInit] = &[
            $(
                ProjInit(stringify!($name), stubs::$name, $name::PARAMETERS),
                $(
                    ProjInit(stringify!($init), stubs::$init, $name::PARAMETERS),
                )*
            )+
        ];
    };
}

// ----------------------------
// Projection list
// ---------------------------

pub mod aea;
pub mod cass;
pub mod cea;
pub mod eqc;
pub mod gstmerc;
pub mod krovak;
pub mod laea;
pub mod lcc;
pub mod merc;
pub mod mill;
pub mod nzmg;
pub mod omerc;
pub mod poly;
pub mod somerc;
pub mod stere;
pub mod sterea;
pub mod tmerc;

#[rustfmt::skip]
declare_projections![
    (tmerc, utm),
    (lcc),
    (merc),
    (mill),
    (cea),
    (eqc),
    (aea),
    (poly),
    (cass),
    (stere),
    (sterea),
    (somerc),
    (omerc),
    (gstmerc),
    (krovak),
    (nzmg),
    (laea),
];

///
/// Return the projection definition
///
pub(crate) fn find_projection(name: &str) -> Option<&'static ProjInit> {
    PROJECTIONS
        .iter()
        .find(|d| d.name().eq_ignore_ascii_case(name))
}

/// Method names of every registered projection
pub fn projection_methods() -> impl Iterator<Item = &'static str> {
    PROJECTIONS.iter().map(|d| d.name())
}

// Keys read by the wrapper itself, accepted for every method
const COMMON_PARAMETERS: &[&[&str]] = &[
    keys::CENTRAL_MERIDIAN,
    keys::LATITUDE_OF_ORIGIN,
    keys::SCALE_FACTOR,
    keys::FALSE_EASTING,
    keys::FALSE_NORTHING,
    keys::UPSTREAM,
];

/// A parameterized map projection.
///
/// Value object pairing a projection kernel with the ellipsoid and the
/// common parameters; forward maps geographic (lon, lat) radians to
/// projected (easting, northing) meters.
#[derive(Debug, Clone, PartialEq)]
pub struct Projected {
    method: &'static str,
    kind: ProjKind,
    a: f64,
    ra: f64,
    lam0: f64,
    x0: f64,
    y0: f64,
}

impl Projected {
    /// Instantiate the projection `method` from its parameter map.
    ///
    /// Unrecognized parameters are accepted and logged, preserving
    /// forward compatibility with richer registry entries.
    pub fn new(method: &str, ellps: &Ellipsoid, params: &ParamMap) -> Result<Self> {
        let defn =
            find_projection(method).ok_or_else(|| Error::ProjectionNotFound(method.into()))?;

        let k0 = params.try_factor(keys::SCALE_FACTOR)?.unwrap_or(1.);
        if k0 <= 0. {
            return Err(Error::InvalidParameterValue("Invalid scale factor"));
        }

        for name in params.names() {
            let known = COMMON_PARAMETERS.iter().any(|g| g.contains(&name))
                || defn.parameters().contains(&name);
            if !known {
                log::warn!("{}: ignoring unknown parameter '{}'", defn.name(), name);
            }
        }

        let mut p = ProjSetup {
            ellps: ellps.clone(),
            lam0: params.try_angular(keys::CENTRAL_MERIDIAN)?.unwrap_or(0.),
            phi0: params.try_angular(keys::LATITUDE_OF_ORIGIN)?.unwrap_or(0.),
            k0,
            x0: params.try_length(keys::FALSE_EASTING)?.unwrap_or(0.),
            y0: params.try_length(keys::FALSE_NORTHING)?.unwrap_or(0.),
        };

        let kind = defn.init(&mut p, params)?;

        Ok(Self {
            method: defn.name(),
            kind,
            a: p.ellps.a,
            ra: p.ellps.ra,
            lam0: p.lam0,
            x0: p.x0,
            y0: p.y0,
        })
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    pub fn classification(&self) -> Classification {
        self.kind.classification()
    }

    /// Wrap into a forward coordinate operation
    pub fn into_operation(self) -> Operation {
        Operation::Project(Box::new(self))
    }

    /// Forward projection of (lon, lat, z), radians to meters
    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        if lam.is_nan() || phi.is_nan() {
            return Err(Error::NanCoordinateValue);
        }
        // Overrange checks
        let t = phi.abs() - FRAC_PI_2;
        if t > EPS_12 || lam.abs() > 10. {
            return Err(Error::CoordinateOutOfRange);
        }
        let phi = if t.abs() <= EPS_12 {
            if phi < 0. {
                -FRAC_PI_2
            } else {
                FRAC_PI_2
            }
        } else {
            phi
        };
        let (x, y, z) = self.kind.forward(adjlon(lam - self.lam0), phi, z)?;
        Ok((self.a * x + self.x0, self.a * y + self.y0, z))
    }

    /// Inverse projection of (easting, northing, z), meters to radians
    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        if x.is_nan() || y.is_nan() {
            return Err(Error::NanCoordinateValue);
        }
        let (lam, phi, z) =
            self.kind
                .inverse((x - self.x0) * self.ra, (y - self.y0) * self.ra, z)?;
        Ok((adjlon(lam + self.lam0), phi, z))
    }
}

// Latitude bound used by the cylindrical projections whose ordinate
// diverges at the pole: pole adjacent latitudes are clamped to +/- 85
// degrees before projecting.
pub(crate) const POLAR_CLAMP: f64 = 85. * std::f64::consts::PI / 180.;

#[inline]
pub(crate) fn clamp_polar(phi: f64) -> f64 {
    if (phi.abs() - FRAC_PI_2).abs() <= EPS_12 {
        POLAR_CLAMP.copysign(phi)
    } else {
        phi
    }
}

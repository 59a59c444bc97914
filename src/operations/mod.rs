//!
//! Coordinate operations
//!
//! A coordinate operation is a value object with a forward step, an
//! inverse obtained as a sibling value object, and an identity flag used
//! to collapse chains. Operations are immutable after construction and
//! safe to share between threads.
//!
//! Tuple convention, inherited from the projection kernels: geographic
//! coordinates are ordered (longitude, latitude, height) in radians and
//! meters, projected coordinates (easting, northing, height) in meters
//! and geocentric coordinates (X, Y, Z) in meters.
//!

pub mod geocentric;
pub mod gridshift;

pub use geocentric::{GeocentricConversion, GeocentricTranslation, Helmert};
pub use gridshift::{GridInterpolator, GridShift};

use crate::errors::{Error, Result};
use crate::log;
use crate::prime_meridians::PrimeMeridian;
use crate::projections::Projected;

/// Rotation of the longitude origin
#[derive(Debug, Clone, PartialEq)]
pub struct LongitudeRotation {
    /// rotation angle, radians, added to the longitude
    pub dlon: f64,
}

impl LongitudeRotation {
    pub fn new(dlon: f64) -> Self {
        Self { dlon }
    }

    /// Rotation carrying longitudes counted from `pm` to longitudes
    /// counted from Greenwich
    pub fn to_greenwich(pm: &PrimeMeridian) -> Self {
        Self::new(pm.longitude())
    }

    /// Rotation carrying Greenwich longitudes to longitudes counted
    /// from `pm`
    pub fn from_greenwich(pm: &PrimeMeridian) -> Self {
        Self::new(-pm.longitude())
    }
}

/// Component wise scaling
#[derive(Debug, Clone, PartialEq)]
pub struct UnitConversion {
    pub factors: [f64; 3],
}

impl UnitConversion {
    pub fn new(factors: [f64; 3]) -> Self {
        Self { factors }
    }

    /// Scale the two planar components
    pub fn planar(factor: f64) -> Self {
        Self::new([factor, factor, 1.])
    }

    /// Scale the vertical component
    pub fn vertical(factor: f64) -> Self {
        Self::new([1., 1., factor])
    }
}

/// A coordinate operation.
///
/// Closed set of transformation steps; sequencing, inversion and
/// identity collapsing operate on values, which keeps operations
/// comparable and hashable by their parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Identity,
    LongitudeRotation(LongitudeRotation),
    AxisSwap,
    UnitConversion(UnitConversion),
    GeographicToGeocentric(GeocentricConversion),
    GeocentricToGeographic(GeocentricConversion),
    GeocentricTranslation(GeocentricTranslation),
    Helmert(Helmert),
    GridShift(GridShift),
    /// Map projection, forward direction (geographic to projected)
    Project(Box<Projected>),
    /// Map projection, inverse direction (projected to geographic)
    Unproject(Box<Projected>),
    Sequence(Vec<Operation>),
}

use Operation::*;

impl Operation {
    /// Build a sequence from `steps`.
    ///
    /// Nested sequences are flattened and identity steps dropped; an
    /// empty or single step chain degenerates accordingly.
    pub fn sequence<I>(steps: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        let mut flat = Vec::new();
        push_steps(&mut flat, steps);
        match flat.len() {
            0 => Identity,
            1 => flat.pop().unwrap_or(Identity),
            _ => Sequence(flat),
        }
    }

    /// Number of coordinate components the operation reads
    pub fn input_dimension(&self) -> usize {
        match self {
            GeographicToGeocentric(_)
            | GeocentricToGeographic(_)
            | GeocentricTranslation(_)
            | Helmert(_)
            | GridShift(_) => 3,
            Sequence(steps) => steps
                .iter()
                .map(Operation::input_dimension)
                .max()
                .unwrap_or(2),
            _ => 2,
        }
    }

    pub fn is_identity(&self) -> bool {
        match self {
            Identity => true,
            LongitudeRotation(r) => r.dlon == 0.,
            UnitConversion(u) => u.factors == [1., 1., 1.],
            Sequence(steps) => steps.iter().all(Operation::is_identity),
            _ => false,
        }
    }

    /// Forward step on a coordinate triple
    pub fn apply(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        match self {
            Identity => Ok((x, y, z)),
            LongitudeRotation(r) => Ok((x + r.dlon, y, z)),
            AxisSwap => Ok((y, x, z)),
            UnitConversion(u) => Ok((x * u.factors[0], y * u.factors[1], z * u.factors[2])),
            GeographicToGeocentric(c) => c.forward(x, y, z),
            GeocentricToGeographic(c) => c.inverse(x, y, z),
            GeocentricTranslation(t) => Ok(t.transform(x, y, z)),
            Helmert(h) => Ok(h.transform(x, y, z)),
            GridShift(g) => g.transform(x, y, z),
            Project(p) => p.forward(x, y, z),
            Unproject(p) => p.inverse(x, y, z),
            Sequence(steps) => {
                let mut cur = (x, y, z);
                for step in steps {
                    match step.apply(cur.0, cur.1, cur.2) {
                        Ok(next) => cur = next,
                        Err(err) => {
                            log::debug!(
                                "sequence step failed at ({}, {}, {}): {}",
                                cur.0,
                                cur.1,
                                cur.2,
                                err
                            );
                            return Err(err);
                        }
                    }
                }
                Ok(cur)
            }
        }
    }

    /// Transform a coordinate tuple.
    ///
    /// The tuple must carry at least two components; a missing or NaN
    /// third component defaults to 0.
    pub fn transform(&self, tuple: &[f64]) -> Result<[f64; 3]> {
        if tuple.len() < 2 {
            return Err(Error::CoordinateDimension {
                expected: 2,
                got: tuple.len(),
            });
        }
        let z = match tuple.get(2) {
            Some(z) if !z.is_nan() => *z,
            _ => 0.,
        };
        if tuple[0].is_nan() || tuple[1].is_nan() {
            return Err(Error::NanCoordinateValue);
        }
        self.apply(tuple[0], tuple[1], z).map(|(x, y, z)| [x, y, z])
    }

    /// Inverse operation as a sibling value object.
    ///
    /// Fails with [`Error::NonInvertible`] when the operation is
    /// algebraically non invertible.
    pub fn try_inverse(&self) -> Result<Operation> {
        match self {
            Identity => Ok(Identity),
            LongitudeRotation(r) => Ok(LongitudeRotation(self::LongitudeRotation::new(-r.dlon))),
            AxisSwap => Ok(AxisSwap),
            UnitConversion(u) => {
                if u.factors.iter().any(|f| *f == 0.) {
                    Err(Error::NonInvertible)
                } else {
                    Ok(UnitConversion(self::UnitConversion::new([
                        1. / u.factors[0],
                        1. / u.factors[1],
                        1. / u.factors[2],
                    ])))
                }
            }
            GeographicToGeocentric(c) => Ok(GeocentricToGeographic(c.clone())),
            GeocentricToGeographic(c) => Ok(GeographicToGeocentric(c.clone())),
            GeocentricTranslation(t) => Ok(GeocentricTranslation(t.negated())),
            Helmert(h) => Ok(Helmert(h.negated())),
            GridShift(g) => {
                if g.invertible() {
                    Ok(GridShift(g.reversed()))
                } else {
                    Err(Error::NonInvertible)
                }
            }
            Project(p) => Ok(Unproject(p.clone())),
            Unproject(p) => Ok(Project(p.clone())),
            Sequence(steps) => {
                let mut inv = Vec::with_capacity(steps.len());
                for step in steps.iter().rev() {
                    inv.push(step.try_inverse()?);
                }
                Ok(Sequence(inv))
            }
        }
    }
}

fn push_steps<I>(flat: &mut Vec<Operation>, steps: I)
where
    I: IntoIterator<Item = Operation>,
{
    for step in steps {
        match step {
            Sequence(inner) => push_steps(flat, inner),
            step if step.is_identity() => {}
            step => flat.push(step),
        }
    }
}

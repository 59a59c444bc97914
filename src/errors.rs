//!
//! Crate errors
//!

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("No value for parameter '{0}'")]
    MissingParameter(String),
    #[error("{0}")]
    InvalidParameterValue(&'static str),
    #[error("Contradictory parameters '{0}' and '{1}'")]
    ContradictoryParameters(&'static str, &'static str),
    #[error("Coordinate tuple of dimension {got}, expected at least {expected}")]
    CoordinateDimension { expected: usize, got: usize },
    #[error("Iterative algorithm '{0}' did not converge")]
    ArithmeticDivergence(&'static str),
    #[error("Operation has no inverse")]
    NonInvertible,
    #[error("Location ({lat}, {lon}) outside of grid domain")]
    OutOfDomain { lat: f64, lon: f64 },
    #[error("No known transformation path from '{0}' to '{1}'")]
    NoTransformationPath(String, String),
    #[error("Latitude out of range")]
    LatitudeOutOfRange,
    #[error("Coordinate out of range")]
    CoordinateOutOfRange,
    #[error("Nan value for coordinate")]
    NanCoordinateValue,
    #[error("Projection '{0}' not found")]
    ProjectionNotFound(String),
    #[error("Projection requires an ellipsoid")]
    EllipsoidRequired,
    #[error("Invalid UTM zone")]
    InvalidUtmZone,
    #[error("Standard parallels cannot be equal and on opposite sides of the equator")]
    ConicStandardParallelsEqual,
    #[error("Tolerance condition error")]
    ToleranceCondition,
    #[error("Coordinate transform outside projection domain")]
    OutsideProjectionDomain,
}

pub type Result<T> = std::result::Result<T, Error>;

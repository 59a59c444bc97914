//!
//! Coordinate reference system transformation library
//!
//! The crate transforms point coordinates between geographic, geocentric
//! and projected reference systems by composing sequences of coordinate
//! operations: longitude rotations, axis swaps, unit conversions,
//! geographic/geocentric conversions, datum shifts and map projections.
//!
//! References:
//! * <http://docs.opengeospatial.org/as/18-005r5/18-005r5.html>
//! * <https://www.iogp.org/bookstore/product/coordinate-conversions-and-transformation-including-formulas/>
//!
//! Text formats (proj strings, WKT input, registry files) and grid file
//! readers are out of scope: the crate consumes parsed parameter maps and
//! abstract grid interpolators, and only emits WKT fragments.
//!

mod math;

pub mod datums;
pub mod ellipsoids;
pub mod ellps;
pub mod errors;
pub mod identifiers;
pub mod measures;
pub mod operations;
pub mod parameters;
pub mod prime_meridians;
pub mod projections;
pub mod vertical;
pub mod wkt;

// Reexport
pub use datums::GeodeticDatum;
pub use ellps::Ellipsoid;
pub use operations::Operation;
pub use prime_meridians::PrimeMeridian;

#[cfg(test)]
mod tests;

// log for logging (optional).
#[cfg(feature = "logging")]
use log;

#[cfg(not(feature = "logging"))]
mod log {
    // Use __XXX__ to prevent 'ambiguous name' error
    // when exporting
    macro_rules! __trace__    ( ($($tt:tt)*) => {{}} );
    macro_rules! __debug__    ( ($($tt:tt)*) => {{}} );
    macro_rules! __error__    ( ($($tt:tt)*) => {{}} );
    macro_rules! __info__     ( ($($tt:tt)*) => {{}} );
    macro_rules! __warn__     ( ($($tt:tt)*) => {{}} );

    #[allow(unused_imports)]
    pub(crate) use {
        __debug__ as debug, __error__ as error, __info__ as info, __trace__ as trace,
        __warn__ as warn,
    };
}

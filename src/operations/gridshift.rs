//!
//! Grid based datum shifts
//!
//! The crate does not read grid files: it consumes an abstract
//! interpolator supplying shift vectors by location. NTv2 or NADCON
//! style readers implement [`GridInterpolator`] on top of their own
//! storage.
//!

use crate::errors::{Error, Result};
use std::fmt::Debug;
use std::sync::Arc;

/// Shift vector supplier.
///
/// `lookup` returns the (delta latitude, delta longitude, delta height)
/// correction, in radians and meters, to add to a source coordinate;
/// locations not covered by the grid fail with [`Error::OutOfDomain`].
pub trait GridInterpolator: Debug + Send + Sync {
    /// Key identifying the grid, used for operation equality
    fn key(&self) -> &str;

    fn lookup(&self, lat: f64, lon: f64) -> Result<(f64, f64, f64)>;

    /// Whether the reverse shift may be derived by fixed point iteration
    fn invertible(&self) -> bool {
        true
    }
}

const MAX_TRY: usize = 9;
const TOL_12: f64 = 1.0e-12;

/// Datum shift interpolated from a grid
#[derive(Debug, Clone)]
pub struct GridShift {
    grid: Arc<dyn GridInterpolator>,
    inverse: bool,
}

impl GridShift {
    pub fn new(grid: Arc<dyn GridInterpolator>) -> Self {
        Self {
            grid,
            inverse: false,
        }
    }

    pub fn key(&self) -> &str {
        self.grid.key()
    }

    pub fn is_inverse(&self) -> bool {
        self.inverse
    }

    pub fn invertible(&self) -> bool {
        self.grid.invertible()
    }

    /// Reverse shift as a sibling value object
    pub fn reversed(&self) -> Self {
        Self {
            grid: self.grid.clone(),
            inverse: !self.inverse,
        }
    }

    pub fn transform(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        if self.inverse {
            self.apply_inverse(lam, phi, z)
        } else {
            let (dlat, dlon, dh) = self.grid.lookup(phi, lam)?;
            Ok((lam + dlon, phi + dlat, z + dh))
        }
    }

    // Un-apply the shift: fixed point iteration on the source
    // location whose shifted image is the input.
    fn apply_inverse(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        let (mut dlat, mut dlon, _) = self.grid.lookup(phi, lam)?;
        let mut i = MAX_TRY;
        while i > 0 {
            let (nlat, nlon, ndh) = self.grid.lookup(phi - dlat, lam - dlon)?;
            if (nlat - dlat).abs() < TOL_12 && (nlon - dlon).abs() < TOL_12 {
                return Ok((lam - nlon, phi - nlat, z - ndh));
            }
            dlat = nlat;
            dlon = nlon;
            i -= 1;
        }
        Err(Error::ArithmeticDivergence("inverse grid shift"))
    }
}

// Grids compare by identity key, never by content
impl PartialEq for GridShift {
    fn eq(&self, other: &Self) -> bool {
        self.inverse == other.inverse && self.grid.key() == other.grid.key()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Constant shift over a rectangular domain, for tests
    #[derive(Debug)]
    pub(crate) struct FlatShift {
        pub key: &'static str,
        pub dlat: f64,
        pub dlon: f64,
        pub dh: f64,
    }

    impl GridInterpolator for FlatShift {
        fn key(&self) -> &str {
            self.key
        }

        fn lookup(&self, lat: f64, lon: f64) -> Result<(f64, f64, f64)> {
            if lat.abs() > 1.2 || lon.abs() > 1.2 {
                Err(Error::OutOfDomain { lat, lon })
            } else {
                Ok((self.dlat, self.dlon, self.dh))
            }
        }
    }

    fn shift() -> GridShift {
        GridShift::new(Arc::new(FlatShift {
            key: "test_grid",
            dlat: 1e-5,
            dlon: -2e-5,
            dh: 0.5,
        }))
    }

    #[test]
    fn gridshift_forward_and_back() {
        let fwd = shift();
        let (lam, phi, z) = fwd.transform(0.1, 0.5, 10.).unwrap();
        assert_abs_diff_eq!(lam, 0.1 - 2e-5, epsilon = 1e-15);
        assert_abs_diff_eq!(phi, 0.5 + 1e-5, epsilon = 1e-15);
        assert_abs_diff_eq!(z, 10.5, epsilon = 1e-15);

        let (lam, phi, z) = fwd.reversed().transform(lam, phi, z).unwrap();
        assert_abs_diff_eq!(lam, 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(phi, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(z, 10., epsilon = 1e-9);
    }

    #[test]
    fn gridshift_out_of_domain() {
        let fwd = shift();
        assert!(matches!(
            fwd.transform(3., 0.5, 0.),
            Err(Error::OutOfDomain { .. })
        ));
    }

    #[test]
    fn gridshift_equality_by_key() {
        assert_eq!(shift(), shift());
        assert_ne!(shift(), shift().reversed());
    }
}

//!
//! Units and measures
//!
//! Parameter values enter the crate as `Measure`s tagged with their unit.
//! Angular values are canonicalized to radians and linear values to meters
//! before being stored in any operation.
//!

use crate::errors::{Error, Result};
use std::f64::consts::PI;

/// Conversion factor from arc second to radian, used for
/// datum shift rotation parameters.
pub(crate) const SEC_TO_RAD: f64 = 4.848_136_811_095_36e-6;

/// Units accepted in parameter maps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Meter,
    Degree,
    Grad,
    Radian,
    /// Dimensionless unit (scale factors)
    Unity,
}

use Unit::*;

impl Unit {
    pub fn is_angular(self) -> bool {
        matches!(self, Degree | Grad | Radian)
    }

    pub fn is_linear(self) -> bool {
        self == Meter
    }

    /// Factor to the canonical unit of the same kind
    /// (radian for angles, meter for lengths)
    pub fn to_canonical(self) -> f64 {
        match self {
            Meter | Radian | Unity => 1.,
            Degree => PI / 180.,
            Grad => PI / 200.,
        }
    }
}

/// A value tagged with its unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measure {
    value: f64,
    unit: Unit,
}

impl Measure {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn meters(value: f64) -> Self {
        Self::new(value, Meter)
    }

    pub fn degrees(value: f64) -> Self {
        Self::new(value, Degree)
    }

    pub fn radians(value: f64) -> Self {
        Self::new(value, Radian)
    }

    pub fn factor(value: f64) -> Self {
        Self::new(value, Unity)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Canonicalize an angular measure to radians
    pub fn as_radians(&self) -> Result<f64> {
        if self.unit.is_angular() {
            Ok(self.value * self.unit.to_canonical())
        } else {
            Err(Error::InvalidParameterValue("Expected an angular value"))
        }
    }

    /// Canonicalize a linear measure to meters
    pub fn as_meters(&self) -> Result<f64> {
        if self.unit.is_linear() {
            Ok(self.value * self.unit.to_canonical())
        } else {
            Err(Error::InvalidParameterValue("Expected a linear value"))
        }
    }

    /// Dimensionless factor
    pub fn as_factor(&self) -> Result<f64> {
        if self.unit == Unity {
            Ok(self.value)
        } else {
            Err(Error::InvalidParameterValue(
                "Expected a dimensionless value",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn measure_angular_canonicalization() {
        assert_abs_diff_eq!(
            Measure::degrees(180.).as_radians().unwrap(),
            PI,
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(
            Measure::new(200., Unit::Grad).as_radians().unwrap(),
            PI,
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(
            Measure::radians(0.25).as_radians().unwrap(),
            0.25,
            epsilon = 1e-15
        );
    }

    #[test]
    fn measure_kind_mismatch() {
        assert!(Measure::meters(10.).as_radians().is_err());
        assert!(Measure::degrees(10.).as_meters().is_err());
        assert!(Measure::meters(10.).as_factor().is_err());
    }
}

//!
//! Operation parameters
//!
//! The crate consumes parameter maps produced by external text parsers:
//! a mapping from parameter name to a [`Measure`]. Canonical names follow
//! the EPSG wording (`central_meridian`, `false_easting`, ...); the usual
//! registry style short keys (`lon_0`, `x_0`, ...) are accepted as
//! aliases. Angles are canonicalized to radians and lengths to meters on
//! access. Unrecognized keys are accepted and reported by the consumer,
//! never fatal.
//!

use crate::errors::{Error, Result};
use crate::measures::Measure;
use std::collections::HashMap;

/// Parameter keys with their accepted aliases
pub mod keys {
    pub const CENTRAL_MERIDIAN: &[&str] = &["central_meridian", "lon_0", "lonc"];
    pub const LATITUDE_OF_ORIGIN: &[&str] = &["latitude_of_origin", "lat_0"];
    pub const STANDARD_PARALLEL_1: &[&str] = &["standard_parallel_1", "lat_1"];
    pub const STANDARD_PARALLEL_2: &[&str] = &["standard_parallel_2", "lat_2"];
    pub const LATITUDE_OF_TRUE_SCALE: &[&str] = &["latitude_of_true_scale", "lat_ts"];
    pub const AZIMUTH_OF_INITIAL_LINE: &[&str] = &["azimuth_of_initial_line", "alpha", "azi"];
    pub const ANGLE_RECTIFIED_TO_OBLIQUE: &[&str] = &["angle_rectified_to_oblique", "gamma"];
    pub const SCALE_FACTOR: &[&str] = &["scale_factor", "k_0", "k"];
    pub const FALSE_EASTING: &[&str] = &["false_easting", "x_0"];
    pub const FALSE_NORTHING: &[&str] = &["false_northing", "y_0"];
    pub const ZONE: &[&str] = &["zone"];
    pub const SOUTH: &[&str] = &["south"];

    /// Keys consumed upstream of the projection factory (datum, ellipsoid
    /// and unit definitions); recognized so that a full registry entry can
    /// be passed through without warnings.
    pub const UPSTREAM: &[&str] = &[
        "proj", "datum", "ellps", "a", "b", "f", "rf", "es", "e", "R", "R_A", "pm", "towgs84",
        "to_meter", "units", "nadgrids", "axis", "no_defs",
    ];
}

/// Map of named parameter values
#[derive(Debug, Clone, Default)]
pub struct ParamMap(HashMap<String, Measure>);

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style insertion
    pub fn with(mut self, name: &str, value: Measure) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: Measure) {
        self.0.insert(name.to_string(), value);
    }

    /// Return the measure stored under any of the aliases of `keys`
    pub fn get(&self, keys: &[&str]) -> Option<&Measure> {
        keys.iter().find_map(|k| self.0.get(*k))
    }

    pub fn contains(&self, keys: &[&str]) -> bool {
        self.get(keys).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Angular value in radians
    pub fn try_angular(&self, keys: &[&str]) -> Result<Option<f64>> {
        self.get(keys).map(|m| m.as_radians()).transpose()
    }

    /// Linear value in meters
    pub fn try_length(&self, keys: &[&str]) -> Result<Option<f64>> {
        self.get(keys).map(|m| m.as_meters()).transpose()
    }

    /// Dimensionless value
    pub fn try_factor(&self, keys: &[&str]) -> Result<Option<f64>> {
        self.get(keys).map(|m| m.as_factor()).transpose()
    }

    pub fn angular_required(&self, keys: &[&str]) -> Result<f64> {
        self.try_angular(keys)?
            .ok_or_else(|| Error::MissingParameter(keys[0].to_string()))
    }

    /// Option style flag: present with a non zero value
    pub fn check_option(&self, keys: &[&str]) -> Result<bool> {
        Ok(matches!(self.try_factor(keys)?, Some(v) if v != 0.))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn params_alias_resolution() {
        let params = ParamMap::new()
            .with("lon_0", Measure::degrees(3.))
            .with("false_easting", Measure::meters(700_000.));
        assert_abs_diff_eq!(
            params.try_angular(keys::CENTRAL_MERIDIAN).unwrap().unwrap(),
            3f64.to_radians(),
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(
            params.try_length(keys::FALSE_EASTING).unwrap().unwrap(),
            700_000.,
            epsilon = 0.
        );
        assert!(params.try_angular(keys::LATITUDE_OF_ORIGIN).unwrap().is_none());
    }

    #[test]
    fn params_missing_required() {
        let params = ParamMap::new();
        assert!(matches!(
            params.angular_required(keys::STANDARD_PARALLEL_1),
            Err(Error::MissingParameter(name)) if name == "standard_parallel_1"
        ));
    }

    #[test]
    fn params_unit_mismatch() {
        let params = ParamMap::new().with("lat_0", Measure::meters(46.5));
        assert!(params.try_angular(keys::LATITUDE_OF_ORIGIN).is_err());
    }

    #[test]
    fn params_canonical_name_wins() {
        let params = ParamMap::new()
            .with("latitude_of_origin", Measure::degrees(90.))
            .with("lat_0", Measure::degrees(0.));
        assert_abs_diff_eq!(
            params.try_angular(keys::LATITUDE_OF_ORIGIN).unwrap().unwrap(),
            FRAC_PI_2,
            epsilon = 1e-15
        );
    }
}

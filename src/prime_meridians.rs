//!
//! Prime meridians
//!
//! A prime meridian is a signed angular offset from Greenwich, stored
//! in radians. Named definitions follow the EPSG 8901..8914 series.
//!

use crate::identifiers::Identifier;
use crate::measures::Measure;

/// Two prime meridians are equal when they share an authority code,
/// a name, or when their longitudes agree within this tolerance.
const LON_TOL: f64 = 1.0e-11;

#[derive(Debug, Clone)]
pub struct PrimeMeridian {
    id: Identifier,
    /// offset from Greenwich, radians, positive eastwards
    lon: f64,
}

impl PrimeMeridian {
    pub fn new(id: Identifier, lon: Measure) -> crate::errors::Result<Self> {
        Ok(Self {
            id,
            lon: lon.as_radians()?,
        })
    }

    pub(crate) fn from_defn(defn: &PrimeMeridianDefn) -> Self {
        Self {
            id: Identifier::from_static("EPSG", defn.code, defn.id),
            lon: defn.lon_deg.to_radians(),
        }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Longitude from Greenwich in radians
    pub fn longitude(&self) -> f64 {
        self.lon
    }

    pub fn longitude_from_greenwich_deg(&self) -> f64 {
        self.lon.to_degrees()
    }

    pub fn is_greenwich(&self) -> bool {
        self.lon == 0.
    }

    pub fn greenwich() -> Self {
        Self::from_defn(&constants::GREENWICH)
    }

    pub fn paris() -> Self {
        Self::from_defn(&constants::PARIS)
    }
}

impl PartialEq for PrimeMeridian {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            || self.id.name().eq_ignore_ascii_case(other.id.name())
            || (self.lon - other.lon).abs() < LON_TOL
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PrimeMeridianDefn {
    pub id: &'static str,
    pub code: &'static str,
    pub lon_deg: f64,
}

#[rustfmt::skip]
pub mod constants {
    use super::PrimeMeridianDefn;

    macro_rules! pm {
        ($name:ident, $id:expr, $code:expr, $lon:expr) => {
            pub const $name: PrimeMeridianDefn = PrimeMeridianDefn {
                id: $id,
                code: $code,
                lon_deg: $lon,
            };
        };
    }

    pm!(GREENWICH, "greenwich", "8901", 0.0);
    pm!(LISBON,    "lisbon",    "8902", -9.131906111111);
    pm!(PARIS,     "paris",     "8903", 2.337229166667);
    pm!(BOGOTA,    "bogota",    "8904", -74.080916666667);
    pm!(MADRID,    "madrid",    "8905", -3.687938888889);
    pm!(ROME,      "rome",      "8906", 12.452333333333);
    pm!(BERN,      "bern",      "8907", 7.439583333333);
    pm!(JAKARTA,   "jakarta",   "8908", 106.807719444444);
    pm!(FERRO,     "ferro",     "8909", -17.666666666667);
    pm!(BRUSSELS,  "brussels",  "8910", 4.367975);
    pm!(STOCKHOLM, "stockholm", "8911", 18.058277777778);
    pm!(ATHENS,    "athens",    "8912", 23.7163375);
    pm!(OSLO,      "oslo",      "8913", 10.722916666667);
    pm!(PARIS_RGS, "paris_rgs", "8914", 2.337208333333);

    ///
    /// Static prime meridians table
    ///
    pub(super) const PRIME_MERIDIANS: [&PrimeMeridianDefn; 14] = [
        &GREENWICH,
        &LISBON,
        &PARIS,
        &BOGOTA,
        &MADRID,
        &ROME,
        &BERN,
        &JAKARTA,
        &FERRO,
        &BRUSSELS,
        &STOCKHOLM,
        &ATHENS,
        &OSLO,
        &PARIS_RGS,
    ];
}

/// Return the prime meridian definition
pub fn find_prime_meridian(name: &str) -> Option<PrimeMeridian> {
    constants::PRIME_MERIDIANS
        .iter()
        .find(|d| d.id.eq_ignore_ascii_case(name))
        .map(|d| PrimeMeridian::from_defn(d))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn pm_paris() {
        let paris = PrimeMeridian::paris();
        assert_abs_diff_eq!(
            paris.longitude_from_greenwich_deg(),
            2.33722917,
            epsilon = 1e-8
        );
        assert_abs_diff_eq!(paris.longitude(), 0.0407923448, epsilon = 1e-9);
    }

    #[test]
    fn pm_equality() {
        let g1 = PrimeMeridian::greenwich();
        let g2 = PrimeMeridian::new(
            Identifier::new("", "", "custom"),
            Measure::degrees(0.),
        )
        .unwrap();
        // same longitude within tolerance
        assert_eq!(g1, g2);
        assert_ne!(g1, PrimeMeridian::paris());
        // paris and paris_rgs differ by ~0.075 arcsec
        let rgs = find_prime_meridian("paris_rgs").unwrap();
        assert_ne!(PrimeMeridian::paris(), rgs);
    }

    #[test]
    fn pm_lookup() {
        assert!(find_prime_meridian("Jakarta").is_some());
        assert!(find_prime_meridian("nowhere").is_none());
    }
}

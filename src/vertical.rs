//!
//! Vertical datums
//!
//! A vertical datum qualifies the meaning of the third coordinate:
//! surface the heights refer to, and the optional operation carrying an
//! altitude onto an ellipsoidal height. When that operation is grid
//! based, the vertical datum leans on an associated geodetic datum for
//! its horizontal attributes.
//!

use crate::datums::GeodeticDatum;
use crate::identifiers::Identifier;
use crate::operations::Operation;
use crate::prime_meridians::PrimeMeridian;

use std::sync::Arc;

/// Reference surface type of a vertical datum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalDatumType {
    Geoidal,
    Ellipsoidal,
    Depth,
    Barometric,
    Orthometric,
    OtherSurface,
}

impl VerticalDatumType {
    /// WKT `VERT_DATUM` type code
    pub fn wkt_code(self) -> u32 {
        match self {
            Self::OtherSurface => 2000,
            Self::Orthometric => 2001,
            Self::Ellipsoidal => 2002,
            Self::Barometric => 2003,
            Self::Geoidal => 2005,
            Self::Depth => 2006,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VerticalDatum {
    id: Identifier,
    kind: VerticalDatumType,
    /// operation from altitudes to ellipsoidal heights, usually grid based
    alti_to_height: Option<Operation>,
    /// geodetic datum carrying the horizontal attributes
    geodetic: Option<Arc<GeodeticDatum>>,
}

impl VerticalDatum {
    pub fn new(
        id: Identifier,
        kind: VerticalDatumType,
        alti_to_height: Option<Operation>,
        geodetic: Option<Arc<GeodeticDatum>>,
    ) -> Self {
        Self {
            id,
            kind,
            alti_to_height,
            geodetic,
        }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn kind(&self) -> VerticalDatumType {
        self.kind
    }

    pub fn alti_to_height(&self) -> Option<&Operation> {
        self.alti_to_height.as_ref()
    }

    pub fn geodetic_datum(&self) -> Option<&Arc<GeodeticDatum>> {
        self.geodetic.as_ref()
    }

    // Horizontal attributes are meaningful only when the altitude
    // conversion is bound to a geodetic datum.
    fn delegate(&self) -> Option<&Arc<GeodeticDatum>> {
        if self.alti_to_height.is_some() {
            self.geodetic.as_ref()
        } else {
            None
        }
    }

    /// Prime meridian of the associated geodetic datum, when the
    /// altitude conversion binds one
    pub fn prime_meridian(&self) -> Option<&PrimeMeridian> {
        self.delegate().map(|d| d.prime_meridian())
    }

    /// WGS84 shift of the associated geodetic datum, when the altitude
    /// conversion binds one
    pub fn to_wgs84(&self) -> Option<&Operation> {
        self.delegate().and_then(|d| d.to_wgs84())
    }
}

impl PartialEq for VerticalDatum {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            || (self.kind == other.kind
                && self.alti_to_height == other.alti_to_height
                && self.geodetic == other.geodetic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datums::find_datum;
    use crate::operations::UnitConversion;

    fn height_op() -> Operation {
        // stand in for a geoid grid: constant vertical offset
        Operation::UnitConversion(UnitConversion::vertical(1.0000001))
    }

    #[test]
    fn vertical_wkt_codes() {
        assert_eq!(VerticalDatumType::OtherSurface.wkt_code(), 2000);
        assert_eq!(VerticalDatumType::Orthometric.wkt_code(), 2001);
        assert_eq!(VerticalDatumType::Ellipsoidal.wkt_code(), 2002);
        assert_eq!(VerticalDatumType::Barometric.wkt_code(), 2003);
        assert_eq!(VerticalDatumType::Geoidal.wkt_code(), 2005);
        assert_eq!(VerticalDatumType::Depth.wkt_code(), 2006);
    }

    #[test]
    fn vertical_delegates_only_with_binding() {
        let geodetic = find_datum("ntf_paris").unwrap();

        let bound = VerticalDatum::new(
            Identifier::from_static("TEST", "v1", "bound"),
            VerticalDatumType::Geoidal,
            Some(height_op()),
            Some(geodetic.clone()),
        );
        assert!(bound.prime_meridian().is_some());
        assert!(bound.to_wgs84().is_some());

        let unbound = VerticalDatum::new(
            Identifier::from_static("TEST", "v2", "unbound"),
            VerticalDatumType::Geoidal,
            None,
            Some(geodetic),
        );
        assert!(unbound.prime_meridian().is_none());
        assert!(unbound.to_wgs84().is_none());
    }
}

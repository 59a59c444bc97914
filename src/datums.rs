//!
//! Geodetic datums and the datum shift graph
//!
//! A geodetic datum pairs an ellipsoid with a prime meridian and keeps
//! two maps of known transformations toward other datums: geocentric
//! edges (operating on cartesian frames) and the geographic sequences
//! derived from them. Edges are seeded from the static `toWGS84`
//! definitions of the well known datums and grow as resolutions are
//! performed; when no direct edge exists a path is searched through the
//! WGS84 pivot.
//!

use crate::ellipsoids::EllipsoidDefn;
use crate::ellps::Ellipsoid;
use crate::errors::{Error, Result};
use crate::identifiers::Identifier;
use crate::log;
use crate::operations::{
    GeocentricConversion, GeocentricTranslation, Helmert, LongitudeRotation, Operation,
};
use crate::prime_meridians::{PrimeMeridian, PrimeMeridianDefn};

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

const WGS84_ID: Identifier = Identifier::from_static("EPSG", "6326", "World Geodetic System 1984");

type EdgeMap = RwLock<HashMap<Identifier, Vec<Operation>>>;

pub struct GeodeticDatum {
    id: Identifier,
    ellps: Ellipsoid,
    pm: PrimeMeridian,
    extent: Option<String>,
    origin: Option<String>,
    epoch: Option<String>,
    to_wgs84: Option<Operation>,

    // the transformation graph, grown through the add edge protocol
    geocentric: EdgeMap,
    geographic: EdgeMap,
}

impl std::fmt::Debug for GeodeticDatum {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("GeodeticDatum")
            .field("id", &self.id)
            .field("ellps", &self.ellps.id())
            .field("pm", &self.pm.id())
            .finish()
    }
}

impl GeodeticDatum {
    /// Create a datum and seed its WGS84 edge from the `to_wgs84`
    /// geocentric operation, when one is known.
    pub fn new(
        id: Identifier,
        ellps: Ellipsoid,
        pm: PrimeMeridian,
        to_wgs84: Option<Operation>,
    ) -> Arc<Self> {
        Self::with_extent(id, ellps, pm, to_wgs84, None, None, None)
    }

    pub fn with_extent(
        id: Identifier,
        ellps: Ellipsoid,
        pm: PrimeMeridian,
        to_wgs84: Option<Operation>,
        extent: Option<&str>,
        origin: Option<&str>,
        epoch: Option<&str>,
    ) -> Arc<Self> {
        let datum = Arc::new(Self {
            id,
            ellps,
            pm,
            extent: extent.map(str::to_string),
            origin: origin.map(str::to_string),
            epoch: epoch.map(str::to_string),
            to_wgs84: to_wgs84.clone(),
            geocentric: EdgeMap::default(),
            geographic: EdgeMap::default(),
        });
        if let Some(op) = to_wgs84 {
            if datum.id != WGS84_ID {
                Self::add_geocentric(&datum, &wgs84(), op, false);
            }
        }
        datum
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellps
    }

    pub fn prime_meridian(&self) -> &PrimeMeridian {
        &self.pm
    }

    pub fn extent(&self) -> Option<&str> {
        self.extent.as_deref()
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn epoch(&self) -> Option<&str> {
        self.epoch.as_deref()
    }

    /// Static geocentric operation toward WGS84, when known
    pub fn to_wgs84(&self) -> Option<&Operation> {
        self.to_wgs84.as_ref()
    }

    // ----------------
    // Add edge protocol
    // ----------------

    /// Register a geocentric transformation from `this` to `target`.
    ///
    /// The reverse edge is derived by inversion and inserted on
    /// `target` unless `reciprocal` marks this call as the derived
    /// insertion itself. Derived geographic sequences are maintained on
    /// both datums. Duplicate edges (by value) are ignored.
    pub fn add_geocentric(
        this: &Arc<Self>,
        target: &Arc<Self>,
        op: Operation,
        reciprocal: bool,
    ) {
        let inserted = {
            let mut map = this
                .geocentric
                .write()
                .expect("datum graph lock poisoned");
            let edges = map.entry(target.id.clone()).or_default();
            if edges.contains(&op) {
                false
            } else {
                edges.push(op.clone());
                true
            }
        };

        if inserted {
            let seq = this.geographic_sequence(target, &op);
            let mut map = this
                .geographic
                .write()
                .expect("datum graph lock poisoned");
            let edges = map.entry(target.id.clone()).or_default();
            if !edges.contains(&seq) {
                edges.push(seq);
            }
        }

        if !reciprocal {
            // a missing inverse only disables the reverse edge
            match op.try_inverse() {
                Ok(inv) => Self::add_geocentric(target, this, inv, true),
                Err(_) => log::warn!(
                    "datum graph: dropping non invertible edge {} -> {}",
                    target.id,
                    this.id
                ),
            }
        }
    }

    // The geographic counterpart of a geocentric edge: rotate onto
    // Greenwich, convert through the cartesian frames, rotate onto the
    // target prime meridian. When the shift is the identity over a
    // shared ellipsoid the cartesian leg drops out entirely.
    fn geographic_sequence(&self, target: &GeodeticDatum, op: &Operation) -> Operation {
        if op.is_identity() && self.ellps == target.ellps {
            Operation::sequence([
                Operation::LongitudeRotation(LongitudeRotation::to_greenwich(&self.pm)),
                Operation::LongitudeRotation(LongitudeRotation::from_greenwich(&target.pm)),
            ])
        } else {
            Operation::sequence([
                Operation::LongitudeRotation(LongitudeRotation::to_greenwich(&self.pm)),
                Operation::GeographicToGeocentric(GeocentricConversion::new(&self.ellps)),
                op.clone(),
                Operation::GeocentricToGeographic(GeocentricConversion::new(&target.ellps)),
                Operation::LongitudeRotation(LongitudeRotation::from_greenwich(&target.pm)),
            ])
        }
    }

    // ----------------
    // Resolve protocol
    // ----------------

    /// Known geocentric transformations from `this` to `target`.
    ///
    /// Returns the identity for equal datums, direct edges when
    /// present, and otherwise pivots through WGS84. Freshly derived
    /// edges are stored, making repeated resolutions idempotent; an
    /// empty set means no known path.
    pub fn geocentric_transformations(this: &Arc<Self>, target: &Arc<Self>) -> Vec<Operation> {
        if this.as_ref() == target.as_ref() {
            return vec![Operation::Identity];
        }

        let direct = {
            let map = this.geocentric.read().expect("datum graph lock poisoned");
            map.get(&target.id).cloned().unwrap_or_default()
        };
        if !direct.is_empty() {
            return direct;
        }

        // WGS84 pivot
        let (src_edges, dst_edges) = {
            let src = this.geocentric.read().expect("datum graph lock poisoned");
            let dst = target
                .geocentric
                .read()
                .expect("datum graph lock poisoned");
            (
                src.get(&WGS84_ID).cloned().unwrap_or_default(),
                dst.get(&WGS84_ID).cloned().unwrap_or_default(),
            )
        };

        let mut out: Vec<Operation> = Vec::new();
        for op1 in &src_edges {
            for op2 in &dst_edges {
                let combined = match (op1.is_identity(), op2.is_identity()) {
                    (true, true) => Operation::Identity,
                    (false, true) => op1.clone(),
                    (_, false) => match op2.try_inverse() {
                        Ok(inv) => {
                            if op1.is_identity() {
                                inv
                            } else {
                                Operation::sequence([op1.clone(), inv])
                            }
                        }
                        Err(_) => {
                            log::debug!(
                                "datum graph: pivot edge {} -> {} not invertible",
                                target.id,
                                this.id
                            );
                            continue;
                        }
                    },
                };
                if !out.contains(&combined) {
                    out.push(combined);
                }
            }
        }

        // store the derived edges for future resolutions
        for op in &out {
            Self::add_geocentric(this, target, op.clone(), false);
        }

        out
    }

    /// Known geographic transformations from `this` to `target`,
    /// deriving and storing them from the geocentric graph as needed.
    pub fn geographic_transformations(this: &Arc<Self>, target: &Arc<Self>) -> Vec<Operation> {
        if this.as_ref() == target.as_ref() {
            return vec![Operation::Identity];
        }

        // resolving geocentric edges populates the geographic map
        let _ = Self::geocentric_transformations(this, target);

        let map = this.geographic.read().expect("datum graph lock poisoned");
        map.get(&target.id).cloned().unwrap_or_default()
    }

    /// First known geographic transformation from `this` to `target`
    pub fn transformation_to(this: &Arc<Self>, target: &Arc<Self>) -> Result<Operation> {
        Self::geographic_transformations(this, target)
            .into_iter()
            .next()
            .ok_or_else(|| {
                Error::NoTransformationPath(this.id.to_string(), target.id.to_string())
            })
    }
}

fn towgs84_equivalent(a: Option<&Operation>, b: Option<&Operation>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => x == y || (x.is_identity() && y.is_identity()),
        (Some(x), None) | (None, Some(x)) => x.is_identity(),
    }
}

impl PartialEq for GeodeticDatum {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            || (self.ellps == other.ellps
                && self.pm == other.pm
                && towgs84_equivalent(self.to_wgs84.as_ref(), other.to_wgs84.as_ref())
                && self.extent == other.extent)
    }
}

// ---------------------------
// Well known datum definitions
// ---------------------------

/// Shift parameters of a datum definition
pub enum DatumParamDefn {
    ToWGS84_0,
    ToWGS84_3(f64, f64, f64),
    ToWGS84_7(f64, f64, f64, f64, f64, f64, f64),
    /// Shift known only through an external grid
    None,
}

impl DatumParamDefn {
    fn operation(&self) -> Option<Operation> {
        match *self {
            Self::ToWGS84_0 => Some(Operation::Identity),
            Self::ToWGS84_3(dx, dy, dz) => Some(Operation::GeocentricTranslation(
                GeocentricTranslation::new(dx, dy, dz),
            )),
            Self::ToWGS84_7(dx, dy, dz, rx, ry, rz, ppm) => Some(Operation::Helmert(
                Helmert::position_vector(dx, dy, dz, rx, ry, rz, ppm),
            )),
            Self::None => None,
        }
    }
}

pub struct DatumDefn {
    pub id: &'static str,
    pub code: &'static str,
    pub name: &'static str,
    pub params: DatumParamDefn,
    pub ellps: &'static EllipsoidDefn,
    pub pm: &'static PrimeMeridianDefn,
    pub extent: Option<&'static str>,
}

pub mod constants {
    use super::*;
    use crate::ellipsoids::constants as ellps;
    use crate::prime_meridians::constants as pm;

    macro_rules! towgs84 {
        () => {
            DatumParamDefn::ToWGS84_0
        };
        ($x:expr, $y:expr, $z:expr) => {
            DatumParamDefn::ToWGS84_3($x, $y, $z)
        };
        ($x:expr, $y:expr, $z:expr, $rx:expr, $ry:expr, $rz:expr, $s:expr) => {
            DatumParamDefn::ToWGS84_7($x, $y, $z, $rx, $ry, $rz, $s)
        };
    }

    macro_rules! datum {
        ($name:ident, $id:expr, $code:expr, $params:expr, $ellps:ident, $pm:ident, $extent:expr, $c:expr $(,)?) => {
            pub const $name: DatumDefn = DatumDefn {
                id: $id,
                code: $code,
                name: $c,
                params: $params,
                ellps: &ellps::$ellps,
                pm: &pm::$pm,
                extent: $extent,
            };
        };
    }

    datum!(
        WGS84,
        "WGS84",
        "6326",
        towgs84!(),
        WGS84,
        GREENWICH,
        Some("World"),
        "World Geodetic System 1984",
    );
    datum!(
        NAD83,
        "NAD83",
        "6269",
        towgs84!(),
        GRS80,
        GREENWICH,
        Some("North America"),
        "North American Datum 1983",
    );
    datum!(
        NAD27,
        "NAD27",
        "6267",
        DatumParamDefn::None,
        CLRK66,
        GREENWICH,
        Some("North America"),
        "North American Datum 1927",
    );
    datum!(
        RGF93,
        "RGF93",
        "6171",
        towgs84!(),
        GRS80,
        GREENWICH,
        Some("France"),
        "Reseau Geodesique Francais 1993",
    );
    datum!(
        NTF_PARIS,
        "ntf_paris",
        "6807",
        towgs84!(-168., -60., 320.),
        CLRK80IGN,
        PARIS,
        Some("France"),
        "Nouvelle Triangulation Francaise (Paris)",
    );
    datum!(
        NTF,
        "ntf",
        "6275",
        towgs84!(-168., -60., 320.),
        CLRK80IGN,
        GREENWICH,
        Some("France"),
        "Nouvelle Triangulation Francaise",
    );
    datum!(
        ED50,
        "ED50",
        "6230",
        towgs84!(-87., -98., -121.),
        INTL,
        GREENWICH,
        Some("Europe"),
        "European Datum 1950",
    );
    datum!(
        OSGB36,
        "OSGB36",
        "6277",
        towgs84!(446.448, -125.157, 542.060, 0.1502, 0.2470, 0.8421, -20.4894),
        AIRY,
        GREENWICH,
        Some("Great Britain"),
        "Ordnance Survey of Great Britain 1936",
    );
    datum!(
        CH1903,
        "ch1903",
        "6149",
        towgs84!(674.374, 15.056, 405.346),
        BESSEL,
        GREENWICH,
        Some("Switzerland"),
        "CH1903",
    );
    datum!(
        NZGD49,
        "nzgd49",
        "6272",
        towgs84!(59.47, -5.04, 187.44, 0.47, -0.1, 1.024, -4.5993),
        INTL,
        GREENWICH,
        Some("New Zealand"),
        "New Zealand Geodetic Datum 1949",
    );
    datum!(
        POTSDAM,
        "potsdam",
        "6314",
        towgs84!(598.1, 73.7, 418.2, 0.202, 0.045, -2.455, 6.7),
        BESSEL,
        GREENWICH,
        Some("Germany"),
        "Potsdam Rauenberg 1950 DHDN",
    );
    datum!(
        IRE65,
        "ire65",
        "6299",
        towgs84!(482.530, -130.596, 564.557, -1.042, -0.214, -0.631, 8.15),
        MOD_AIRY,
        GREENWICH,
        Some("Ireland"),
        "Ireland 1965",
    );
    datum!(
        GGRS87,
        "GGRS87",
        "6121",
        towgs84!(-199.87, 74.79, 246.62),
        GRS80,
        GREENWICH,
        Some("Greece"),
        "Greek Geodetic Reference System 1987",
    );
    datum!(
        CARTHAGE,
        "carthage",
        "6223",
        towgs84!(-263.0, 6.0, 431.0),
        CLRK80IGN,
        GREENWICH,
        Some("Tunisia"),
        "Carthage 1934",
    );

    /// Static datums table
    pub(super) const DATUMS: [&DatumDefn; 14] = [
        &WGS84,
        &NAD83,
        &NAD27,
        &RGF93,
        &NTF_PARIS,
        &NTF,
        &ED50,
        &OSGB36,
        &CH1903,
        &NZGD49,
        &POTSDAM,
        &IRE65,
        &GGRS87,
        &CARTHAGE,
    ];
}

impl GeodeticDatum {
    /// Instantiate a datum from a static definition
    pub fn try_from_defn(defn: &DatumDefn) -> Result<Arc<Self>> {
        Ok(Self::with_extent(
            Identifier::from_static("EPSG", defn.code, defn.name),
            Ellipsoid::try_from_defn(defn.ellps)?,
            PrimeMeridian::from_defn(defn.pm),
            defn.params.operation(),
            defn.extent,
            None,
            None,
        ))
    }
}

lazy_static::lazy_static! {
    static ref WGS84_DATUM: Arc<GeodeticDatum> = GeodeticDatum::try_from_defn(&constants::WGS84)
        .expect("invalid builtin WGS84 definition");

    static ref DATUM_REGISTRY: HashMap<&'static str, Arc<GeodeticDatum>> = {
        let mut map = HashMap::new();
        for defn in constants::DATUMS.iter() {
            let datum = if defn.id == "WGS84" {
                WGS84_DATUM.clone()
            } else {
                match GeodeticDatum::try_from_defn(defn) {
                    Ok(d) => d,
                    Err(_) => {
                        log::error!("invalid builtin datum definition '{}'", defn.id);
                        continue;
                    }
                }
            };
            map.insert(defn.id, datum);
        }
        map
    };
}

/// The WGS84 pivot datum
pub fn wgs84() -> Arc<GeodeticDatum> {
    WGS84_DATUM.clone()
}

/// Return a well known datum by its short id, case insensitive
pub fn find_datum(name: &str) -> Option<Arc<GeodeticDatum>> {
    DATUM_REGISTRY
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(name))
        .map(|(_, datum)| datum.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn test_datum(code: &'static str, shift: Option<Operation>) -> Arc<GeodeticDatum> {
        GeodeticDatum::new(
            Identifier::from_static("TEST", code, "test datum"),
            Ellipsoid::try_from_defn(&crate::ellipsoids::constants::INTL).unwrap(),
            crate::prime_meridians::find_prime_meridian("greenwich").unwrap(),
            shift,
        )
    }

    #[test]
    fn datum_add_edge_mirrors_inverse() {
        let a = test_datum("1", None);
        let b = test_datum("2", None);
        let op = Operation::GeocentricTranslation(GeocentricTranslation::new(10., -20., 30.));

        GeodeticDatum::add_geocentric(&a, &b, op.clone(), false);

        let fwd = GeodeticDatum::geocentric_transformations(&a, &b);
        assert_eq!(fwd, vec![op.clone()]);

        let rev = GeodeticDatum::geocentric_transformations(&b, &a);
        assert_eq!(rev, vec![op.try_inverse().unwrap()]);
    }

    #[test]
    fn datum_duplicate_edges_are_ignored() {
        let a = test_datum("3", None);
        let b = test_datum("4", None);
        let op = Operation::GeocentricTranslation(GeocentricTranslation::new(1., 2., 3.));

        GeodeticDatum::add_geocentric(&a, &b, op.clone(), false);
        GeodeticDatum::add_geocentric(&a, &b, op.clone(), false);

        assert_eq!(GeodeticDatum::geocentric_transformations(&a, &b).len(), 1);
        assert_eq!(GeodeticDatum::geocentric_transformations(&b, &a).len(), 1);
    }

    #[test]
    fn datum_identity_for_same_datum() {
        let a = test_datum("5", None);
        assert_eq!(
            GeodeticDatum::geocentric_transformations(&a, &a),
            vec![Operation::Identity]
        );
    }

    #[test]
    fn datum_pivot_through_wgs84() {
        let ntf = find_datum("ntf_paris").unwrap();
        let ed50 = find_datum("ED50").unwrap();

        let ops = GeodeticDatum::geocentric_transformations(&ntf, &ed50);
        assert_eq!(ops.len(), 1);

        // derived edge is stored: the second resolution yields the
        // same set without recomputation
        let again = GeodeticDatum::geocentric_transformations(&ntf, &ed50);
        assert_eq!(ops, again);

        // composed translation: (-168 - -87, -60 - -98, 320 - -121)
        let (x, y, z) = ops[0].apply(0., 0., 0.).unwrap();
        assert_abs_diff_eq!(x, -81., epsilon = 1e-9);
        assert_abs_diff_eq!(y, 38., epsilon = 1e-9);
        assert_abs_diff_eq!(z, 441., epsilon = 1e-9);
    }

    #[test]
    fn datum_pivot_identity_shortcuts() {
        let nad83 = find_datum("NAD83").unwrap();
        let rgf93 = find_datum("RGF93").unwrap();
        let ntf = find_datum("ntf").unwrap();

        // both identity
        let ops = GeodeticDatum::geocentric_transformations(&nad83, &rgf93);
        assert_eq!(ops, vec![Operation::Identity]);

        // op1 identity: the resolved edge is op2 inverse
        let ops = GeodeticDatum::geocentric_transformations(&rgf93, &ntf);
        assert_eq!(ops.len(), 1);
        let (x, y, z) = ops[0].apply(0., 0., 0.).unwrap();
        assert_abs_diff_eq!(x, 168., epsilon = 1e-9);
        assert_abs_diff_eq!(y, 60., epsilon = 1e-9);
        assert_abs_diff_eq!(z, -320., epsilon = 1e-9);
    }

    #[test]
    fn datum_no_path_yields_empty_set() {
        let orphan = test_datum("6", None);
        let wgs = wgs84();
        assert!(GeodeticDatum::geocentric_transformations(&orphan, &wgs).is_empty());
        assert!(GeodeticDatum::geographic_transformations(&orphan, &wgs).is_empty());
        assert!(matches!(
            GeodeticDatum::transformation_to(&orphan, &wgs),
            Err(Error::NoTransformationPath(_, _))
        ));
    }

    #[test]
    fn datum_equality() {
        let d1 = GeodeticDatum::try_from_defn(&constants::NTF_PARIS).unwrap();
        let d2 = GeodeticDatum::try_from_defn(&constants::NTF_PARIS).unwrap();
        assert_eq!(d1.as_ref(), d2.as_ref());
        assert_ne!(d1.as_ref(), find_datum("ED50").unwrap().as_ref());
        // same ellipsoid and shift, different prime meridian
        assert_ne!(d1.as_ref(), find_datum("ntf").unwrap().as_ref());
    }

    #[test]
    fn datum_geographic_sequence_shape() {
        let ntf = find_datum("ntf_paris").unwrap();
        let ops = GeodeticDatum::geographic_transformations(&ntf, &wgs84());
        assert_eq!(ops.len(), 1);
        match &ops[0] {
            Operation::Sequence(steps) => {
                assert!(matches!(steps[0], Operation::LongitudeRotation(_)));
                assert!(matches!(steps[1], Operation::GeographicToGeocentric(_)));
                assert!(matches!(steps[2], Operation::GeocentricTranslation(_)));
                assert!(matches!(steps[3], Operation::GeocentricToGeographic(_)));
                // target is Greenwich: the final rotation collapses
                assert_eq!(steps.len(), 4);
            }
            other => panic!("expected a sequence, got {:?}", other),
        }
    }
}

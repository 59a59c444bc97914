//!
//! Well known ellipsoid definitions
//!

/// Ellipsoid shape may be defined either by
/// the knowledge of its minor axis or by its reverse flattening
#[derive(Debug, Clone, Copy)]
pub enum FlatteningParam {
    MinorAxis(f64),
    InvFlat(f64),
}

use FlatteningParam::*;

#[derive(Debug, Clone, Copy)]
pub struct EllipsoidDefn {
    pub id: &'static str,
    pub code: &'static str,
    pub a: f64,
    pub rf_or_b: FlatteningParam,
    pub name: &'static str,
}

#[rustfmt::skip]
pub mod constants {
    use super::*;

    macro_rules! ellps {
        ($name:ident, $id:expr, $code:expr, $a:expr, $f:expr, $c:expr) => {
            pub const $name: EllipsoidDefn = EllipsoidDefn {
                id: $id,
                code: $code,
                a: $a,
                rf_or_b: $f,
                name: $c,
            };
        };
    }

    ellps!(GRS80,     "GRS80",     "7019", 6_378_137.,     InvFlat(298.257222101),     "GRS 1980 (IUGG, 1980)");
    ellps!(WGS84,     "WGS84",     "7030", 6_378_137.,     InvFlat(298.257_223_563),   "WGS 84");
    ellps!(WGS72,     "WGS72",     "7043", 6_378_135.,     InvFlat(298.26),            "WGS 72");
    ellps!(WGS66,     "WGS66",     "7025", 6_378_145.,     InvFlat(298.25),            "WGS 66");
    ellps!(AIRY,      "airy",      "7001", 6_377_563.396,  InvFlat(299.3249646),       "Airy 1830");
    ellps!(MOD_AIRY,  "mod_airy",  "7002", 6_377_340.189,  MinorAxis(6_356_034.446),   "Modified Airy");
    ellps!(AUST_SA,   "aust_SA",   "7003", 6_378_160.,     InvFlat(298.25),            "Australian Natl & S. Amer. 1969");
    ellps!(GRS67,     "GRS67",     "7036", 6_378_160.,     InvFlat(298.2471674270),    "GRS 67 (IUGG 1967)");
    ellps!(BESSEL,    "bessel",    "7004", 6_377_397.155,  InvFlat(299.1528128),       "Bessel 1841");
    ellps!(BESS_NAM,  "bess_nam",  "7006", 6_377_483.865,  InvFlat(299.1528128),       "Bessel 1841 (Namibia)");
    ellps!(CLRK66,    "clrk66",    "7008", 6_378_206.4,    MinorAxis(6_356_583.8),     "Clarke 1866");
    ellps!(CLRK80,    "clrk80",    "7034", 6_378_249.145,  InvFlat(293.4663),          "Clarke 1880 mod.");
    ellps!(CLRK80IGN, "clrk80ign", "7011", 6_378_249.2,    InvFlat(293.4660212936269), "Clarke 1880 (IGN)");
    ellps!(EVRST30,   "evrst30",   "7015", 6_377_276.345,  InvFlat(300.8017),          "Everest 1830");
    ellps!(EVRSTSS,   "evrstSS",   "7016", 6_377_298.556,  InvFlat(300.8017),          "Everest (Sabah & Sarawak)");
    ellps!(HELMERT,   "helmert",   "7020", 6_378_200.,     InvFlat(298.3),             "Helmert 1906");
    ellps!(INTL,      "intl",      "7022", 6_378_388.,     InvFlat(297.),              "International 1924 (Hayford 1909, 1910)");
    ellps!(KRASS,     "krass",     "7024", 6_378_245.,     InvFlat(298.3),             "Krassovsky, 1942");
    ellps!(SPHERE,    "sphere",    "7035", 6_370_997.,     MinorAxis(6_370_997.),      "Normal Sphere (r=6370997)");

    ///
    /// Static ellipsoids table
    ///
    pub(super) const ELLIPSOIDS: [&EllipsoidDefn; 19] = [
        &GRS80,
        &WGS84,
        &WGS72,
        &WGS66,
        &AIRY,
        &MOD_AIRY,
        &AUST_SA,
        &GRS67,
        &BESSEL,
        &BESS_NAM,
        &CLRK66,
        &CLRK80,
        &CLRK80IGN,
        &EVRST30,
        &EVRSTSS,
        &HELMERT,
        &INTL,
        &KRASS,
        &SPHERE,
    ];
}

/// Return the ellipsoid definition
pub fn find_ellipsoid(name: &str) -> Option<&'static EllipsoidDefn> {
    constants::ELLIPSOIDS
        .iter()
        .find(|e| e.id.eq_ignore_ascii_case(name))
        .copied()
}

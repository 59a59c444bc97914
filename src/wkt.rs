//!
//! WKT emission
//!
//! The crate only produces the WKT fragments of its reference data
//! model; parsing and the outer CRS nodes belong to external tooling.
//!

use crate::datums::GeodeticDatum;
use crate::ellps::Ellipsoid;
use crate::identifiers::Identifier;
use crate::operations::Operation;
use crate::prime_meridians::PrimeMeridian;
use crate::vertical::VerticalDatum;

use std::fmt::Write;

/// Well known text fragment of a reference data object
pub trait ToWkt {
    fn to_wkt(&self) -> String;
}

fn push_authority(out: &mut String, id: &Identifier) {
    if !id.authority().is_empty() && !id.code().is_empty() {
        // infallible on String
        let _ = write!(out, r#",AUTHORITY["{}","{}"]"#, id.authority(), id.code());
    }
}

impl ToWkt for Ellipsoid {
    fn to_wkt(&self) -> String {
        let mut out = String::new();
        let rf = if self.rf.is_finite() { self.rf } else { 0. };
        let _ = write!(out, r#"SPHEROID["{}",{},{}"#, self.id().name(), self.a, rf);
        push_authority(&mut out, self.id());
        out.push(']');
        out
    }
}

impl ToWkt for PrimeMeridian {
    fn to_wkt(&self) -> String {
        format!(
            r#"PRIMEM["{}",{}]"#,
            self.id().name(),
            self.longitude_from_greenwich_deg()
        )
    }
}

// TOWGS84 parameter list of a geocentric shift operation; rotations
// are reported in arc seconds and the scale in parts per million.
fn towgs84_fragment(op: &Operation) -> Option<String> {
    use crate::measures::SEC_TO_RAD;
    match op {
        Operation::Identity => Some("TOWGS84[0,0,0,0,0,0,0]".to_string()),
        Operation::GeocentricTranslation(t) => {
            Some(format!("TOWGS84[{},{},{},0,0,0,0]", t.dx, t.dy, t.dz))
        }
        Operation::Helmert(h) => Some(format!(
            "TOWGS84[{},{},{},{},{},{},{}]",
            h.dx,
            h.dy,
            h.dz,
            h.rx / SEC_TO_RAD,
            h.ry / SEC_TO_RAD,
            h.rz / SEC_TO_RAD,
            h.ppm
        )),
        _ => None,
    }
}

impl ToWkt for GeodeticDatum {
    fn to_wkt(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            r#"DATUM["{}",{}"#,
            self.id().name(),
            self.ellipsoid().to_wkt()
        );
        if let Some(fragment) = self.to_wgs84().and_then(towgs84_fragment) {
            let _ = write!(out, ",{}", fragment);
        }
        push_authority(&mut out, self.id());
        out.push(']');
        out
    }
}

impl ToWkt for VerticalDatum {
    fn to_wkt(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            r#"VERT_DATUM["{}",{}"#,
            self.id().name(),
            self.kind().wkt_code()
        );
        push_authority(&mut out, self.id());
        out.push(']');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datums::find_datum;
    use crate::ellipsoids::constants;
    use crate::vertical::{VerticalDatum, VerticalDatumType};

    #[test]
    fn wkt_spheroid() {
        let el = Ellipsoid::try_from_defn(&constants::GRS80).unwrap();
        assert_eq!(
            el.to_wkt(),
            r#"SPHEROID["GRS 1980 (IUGG, 1980)",6378137,298.257222101,AUTHORITY["EPSG","7019"]]"#
        );
    }

    #[test]
    fn wkt_spheroid_sphere_reports_zero_flattening() {
        let el = Ellipsoid::sphere(6371000.).unwrap();
        assert_eq!(el.to_wkt(), r#"SPHEROID["sphere",6371000,0]"#);
    }

    #[test]
    fn wkt_primem() {
        let paris = crate::prime_meridians::find_prime_meridian("paris").unwrap();
        // the longitude goes through a radian roundtrip, only the
        // leading digits are stable
        assert!(paris.to_wkt().starts_with(r#"PRIMEM["paris",2.3372291666"#));
    }

    #[test]
    fn wkt_datum_with_translation() {
        let ntf = find_datum("ntf_paris").unwrap();
        let wkt = ntf.to_wkt();
        assert!(wkt.starts_with(r#"DATUM["Nouvelle Triangulation Francaise (Paris)",SPHEROID["#));
        assert!(wkt.contains("TOWGS84[-168,-60,320,0,0,0,0]"));
        assert!(wkt.ends_with(r#"AUTHORITY["EPSG","6807"]]"#));
    }

    #[test]
    fn wkt_datum_with_bursa_wolf() {
        let osgb = find_datum("OSGB36").unwrap();
        let wkt = osgb.to_wkt();
        assert!(wkt.contains("TOWGS84[446.448,-125.157,542.06,"));
        assert!(wkt.contains("-20.4894]"));
    }

    #[test]
    fn wkt_vert_datum() {
        let vd = VerticalDatum::new(
            Identifier::from_static("EPSG", "5101", "Ordnance Datum Newlyn"),
            VerticalDatumType::Orthometric,
            None,
            None,
        );
        assert_eq!(
            vd.to_wkt(),
            r#"VERT_DATUM["Ordnance Datum Newlyn",2001,AUTHORITY["EPSG","5101"]]"#
        );
    }
}

//!
//! End to end transformation pipelines: datum shifts composed with
//! projections through the operation algebra.
//!
use approx::assert_abs_diff_eq;

use geotransform::datums::{find_datum, wgs84, GeodeticDatum};
use geotransform::ellps::Ellipsoid;
use geotransform::ellipsoids::find_ellipsoid;
use geotransform::measures::Measure;
use geotransform::operations::Operation;
use geotransform::parameters::ParamMap;
use geotransform::projections::Projected;

fn ellps(id: &str) -> Ellipsoid {
    Ellipsoid::try_from_defn(find_ellipsoid(id).unwrap()).unwrap()
}

fn lambert93() -> Projected {
    let params = ParamMap::new()
        .with("latitude_of_origin", Measure::degrees(46.5))
        .with("standard_parallel_1", Measure::degrees(44.))
        .with("standard_parallel_2", Measure::degrees(49.))
        .with("central_meridian", Measure::degrees(3.))
        .with("false_easting", Measure::meters(700_000.))
        .with("false_northing", Measure::meters(6_600_000.));
    Projected::new("lcc", &ellps("GRS80"), &params).unwrap()
}

#[test]
fn lambert93_defining_point() {
    // the false origin is the image of the projection center
    let p = lambert93();
    let (e, n, _) = p
        .forward(3f64.to_radians(), 46.5f64.to_radians(), 0.)
        .unwrap();
    assert_abs_diff_eq!(e, 700_000., epsilon = 1e-4);
    assert_abs_diff_eq!(n, 6_600_000., epsilon = 1e-4);
}

#[test]
fn lambert93_roundtrip() {
    let p = lambert93();
    for (lon, lat) in [(2., 48.), (3., 46.5), (-1.5, 43.2), (7.8, 49.9)] {
        let (lam, phi) = (f64::to_radians(lon), f64::to_radians(lat));
        let (e, n, _) = p.forward(lam, phi, 0.).unwrap();
        let (lam2, phi2, _) = p.inverse(e, n, 0.).unwrap();
        assert_abs_diff_eq!(lam2, lam, epsilon = 1e-9);
        assert_abs_diff_eq!(phi2, phi, epsilon = 1e-9);
    }
}

#[test]
fn utm_zone31_wgs84() {
    let params = ParamMap::new().with("zone", Measure::factor(31.));
    let p = Projected::new("utm", &ellps("WGS84"), &params).unwrap();

    // on the central meridian the easting is the false easting and the
    // northing is the scaled meridian arc
    let (e, n, _) = p
        .forward(3f64.to_radians(), 48f64.to_radians(), 0.)
        .unwrap();
    assert_abs_diff_eq!(e, 500_000., epsilon = 1e-6);
    assert_abs_diff_eq!(n, 5_316_300.24, epsilon = 0.05);

    let (lam, phi, _) = p.inverse(e, n, 0.).unwrap();
    assert_abs_diff_eq!(lam, 3f64.to_radians(), epsilon = 1e-9);
    assert_abs_diff_eq!(phi, 48f64.to_radians(), epsilon = 1e-9);
}

#[test]
fn ntf_paris_to_wgs84_roundtrip() {
    let ntf = find_datum("ntf_paris").unwrap();
    let to_wgs84 = GeodeticDatum::transformation_to(&ntf, &wgs84()).unwrap();
    let back = to_wgs84.try_inverse().unwrap();

    // a point near Paris, longitude counted from the Paris meridian
    let (lam, phi, h) = (0.0088, 0.8528, 50.);
    let (lam1, phi1, h1) = to_wgs84.apply(lam, phi, h).unwrap();

    // the Greenwich longitude gains the Paris meridian offset, and the
    // datum shift moves the point by a few arc seconds at most
    assert_abs_diff_eq!(lam1, lam + 0.040792344, epsilon = 1e-4);
    assert_abs_diff_eq!(phi1, phi, epsilon = 1e-4);

    let (lam2, phi2, h2) = back.apply(lam1, phi1, h1).unwrap();
    assert_abs_diff_eq!(lam2, lam, epsilon = 1e-7);
    assert_abs_diff_eq!(phi2, phi, epsilon = 1e-7);
    assert_abs_diff_eq!(h2, h, epsilon = 1e-3);
}

#[test]
fn ntf_paris_projected_pipeline() {
    // NTF (Paris) geographic -> WGS84 geographic -> UTM 31N, and back
    let ntf = find_datum("ntf_paris").unwrap();
    let shift = GeodeticDatum::transformation_to(&ntf, &wgs84()).unwrap();
    let utm = Projected::new(
        "utm",
        &ellps("WGS84"),
        &ParamMap::new().with("zone", Measure::factor(31.)),
    )
    .unwrap();

    let pipeline = Operation::sequence([shift, utm.into_operation()]);
    let inverse = pipeline.try_inverse().unwrap();

    let input = [0.0088, 0.8528, 0.];
    let projected = pipeline.transform(&input).unwrap();
    // sanity: the point lands in the zone 31 band
    assert!(projected[0] > 100_000. && projected[0] < 900_000.);
    assert!(projected[1] > 5_000_000. && projected[1] < 6_000_000.);

    let back = inverse.transform(&projected).unwrap();
    assert_abs_diff_eq!(back[0], input[0], epsilon = 1e-9);
    assert_abs_diff_eq!(back[1], input[1], epsilon = 1e-9);
}

#[test]
fn projection_double_inverse_is_identity_valued() {
    let methods: &[(&str, &[(&str, Measure)])] = &[
        ("tmerc", &[]),
        ("lcc", &[("lat_1", Measure::degrees(44.)), ("lat_2", Measure::degrees(49.))]),
        ("merc", &[]),
        ("mill", &[]),
        ("cea", &[]),
        ("eqc", &[]),
        ("aea", &[("lat_1", Measure::degrees(20.)), ("lat_2", Measure::degrees(60.))]),
        ("poly", &[]),
        ("cass", &[]),
        ("stere", &[]),
        ("sterea", &[]),
        ("somerc", &[]),
        ("gstmerc", &[]),
        ("krovak", &[]),
        ("nzmg", &[]),
        ("laea", &[]),
    ];

    for (method, extra) in methods {
        let mut params = ParamMap::new();
        for (name, m) in *extra {
            params.insert(name, *m);
        }
        let op = Projected::new(method, &ellps("GRS80"), &params)
            .unwrap()
            .into_operation();
        let twice = op.try_inverse().unwrap().try_inverse().unwrap();
        assert_eq!(op, twice, "inverse of inverse differs for {}", method);
    }
}

#[test]
fn omerc_double_inverse() {
    let params = ParamMap::new()
        .with("lat_0", Measure::degrees(4.))
        .with("lonc", Measure::degrees(115.))
        .with("alpha", Measure::degrees(53.315820472222215));
    let op = Projected::new("omerc", &ellps("evrstSS"), &params)
        .unwrap()
        .into_operation();
    assert_eq!(op, op.try_inverse().unwrap().try_inverse().unwrap());
}

#[test]
fn axis_and_units_compose() {
    use geotransform::operations::UnitConversion;

    // northing/easting in kilometers -> easting/northing in meters
    let op = Operation::sequence([
        Operation::AxisSwap,
        Operation::UnitConversion(UnitConversion::planar(1000.)),
    ]);
    assert_eq!(op.transform(&[5.2, 3.1]).unwrap(), [3_100., 5_200., 0.]);

    let back = op.try_inverse().unwrap();
    assert_eq!(back.transform(&[3_100., 5_200., 0.]).unwrap(), [5.2, 3.1, 0.]);
}

#[test]
fn unknown_method_is_reported() {
    let err = Projected::new("vandergrinten4", &ellps("WGS84"), &ParamMap::new());
    assert!(err.is_err());
}

#[test]
fn lcc_1sp_jamaica_1969() {
    // EPSG Guidance Note 7-2 worked example: Jamaica National Grid
    let params = ParamMap::new()
        .with("latitude_of_origin", Measure::degrees(18.))
        .with("central_meridian", Measure::degrees(-77.))
        .with("scale_factor", Measure::factor(1.))
        .with("false_easting", Measure::meters(250_000.))
        .with("false_northing", Measure::meters(150_000.));
    let p = Projected::new("lcc", &ellps("clrk66"), &params).unwrap();

    // 17d 55' 55.80" N, 76d 56' 37.26" W
    let (lam, phi) = (
        -(76_f64 + 56. / 60. + 37.26 / 3600.).to_radians(),
        (17_f64 + 55. / 60. + 55.80 / 3600.).to_radians(),
    );
    let (e, n, _) = p.forward(lam, phi, 0.).unwrap();
    assert_abs_diff_eq!(e, 255_966.58, epsilon = 0.25);
    assert_abs_diff_eq!(n, 142_493.51, epsilon = 0.25);

    let (lam2, phi2, _) = p.inverse(e, n, 0.).unwrap();
    assert_abs_diff_eq!(lam2, lam, epsilon = 1e-9);
    assert_abs_diff_eq!(phi2, phi, epsilon = 1e-9);
}

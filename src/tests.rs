//!
//! Unit tests
//!
use std::sync::Once;

static INIT: Once = Once::new();

pub fn setup() {
    // Init setup
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

pub(crate) mod utils {
    use crate::ellipsoids::find_ellipsoid;
    use crate::ellps::Ellipsoid;
    use crate::measures::Measure;
    use crate::parameters::ParamMap;
    use crate::projections::Projected;
    use approx::assert_abs_diff_eq;

    /// Build a projection from a method name, an ellipsoid id
    /// (a well known id, or "R:radius" for a sphere) and parameters
    pub(crate) fn proj(method: &str, ellps: &str, params: &[(&str, Measure)]) -> Projected {
        let ellps = match ellps.strip_prefix("R:") {
            Some(r) => Ellipsoid::sphere(r.parse().unwrap()).unwrap(),
            None => Ellipsoid::try_from_defn(find_ellipsoid(ellps).unwrap()).unwrap(),
        };
        let mut map = ParamMap::new();
        for (name, m) in params {
            map.insert(name, *m);
        }
        Projected::new(method, &ellps, &map).unwrap()
    }

    pub(crate) fn to_rad(lpz: (f64, f64, f64)) -> (f64, f64, f64) {
        (lpz.0.to_radians(), lpz.1.to_radians(), lpz.2)
    }

    pub(crate) fn to_deg(lam: f64, phi: f64, z: f64) -> (f64, f64, f64) {
        (lam.to_degrees(), phi.to_degrees(), z)
    }

    /// Check forward projection of (lon deg, lat deg, z) inputs against
    /// projected meters
    pub(crate) fn test_proj_forward(
        p: &Projected,
        inputs: &[((f64, f64, f64), (f64, f64, f64))],
        prec: f64,
    ) {
        inputs.iter().for_each(|(input, expect)| {
            let (lam, phi, z) = to_rad(*input);
            let out = p.forward(lam, phi, z).unwrap();
            assert_abs_diff_eq!(out.0, expect.0, epsilon = prec);
            assert_abs_diff_eq!(out.1, expect.1, epsilon = prec);
            assert_abs_diff_eq!(out.2, expect.2, epsilon = prec);
        })
    }

    /// Check inverse projection of projected meters against
    /// (lon deg, lat deg, z)
    pub(crate) fn test_proj_inverse(
        p: &Projected,
        inputs: &[((f64, f64, f64), (f64, f64, f64))],
        prec: f64,
    ) {
        inputs.iter().for_each(|(expect, input)| {
            let (lam, phi, z) = p.inverse(input.0, input.1, input.2).unwrap();
            let out = to_deg(lam, phi, z);
            assert_abs_diff_eq!(out.0, expect.0, epsilon = prec);
            assert_abs_diff_eq!(out.1, expect.1, epsilon = prec);
            assert_abs_diff_eq!(out.2, expect.2, epsilon = prec);
        })
    }

    /// Forward then inverse at (lon deg, lat deg) points, compared in
    /// radians
    pub(crate) fn test_proj_roundtrip(p: &Projected, pts_deg: &[(f64, f64)], eps_rad: f64) {
        for (lon, lat) in pts_deg {
            let (lam, phi) = (lon.to_radians(), lat.to_radians());
            let (x, y, _) = p.forward(lam, phi, 0.).unwrap();
            let (lam2, phi2, _) = p.inverse(x, y, 0.).unwrap();
            assert_abs_diff_eq!(lam2, lam, epsilon = eps_rad);
            assert_abs_diff_eq!(phi2, phi, epsilon = eps_rad);
        }
    }
}

use crate::measures::Measure;
use crate::operations::Operation;
use approx::assert_abs_diff_eq;
use utils::proj;

#[test]
fn test_operation_over_array() {
    setup();

    let op = proj("tmerc", "GRS80", &[]).into_operation();

    let mut data: Vec<[f64; 3]> = (1..=1_000)
        .map(|_| [2.0f64.to_radians(), 1.0f64.to_radians(), 0.0f64])
        .collect();

    for point in data.iter_mut() {
        *point = op.transform(point.as_slice()).unwrap();
    }

    data.iter().for_each(|[x, y, _]| {
        assert_abs_diff_eq!(*x, 222650.79679758527, epsilon = 1.0e-10);
        assert_abs_diff_eq!(*y, 110642.22941193319, epsilon = 1.0e-10);
    });
}

#[test]
fn test_utm33_grs80() {
    setup();

    let op = proj("utm", "GRS80", &[("zone", Measure::factor(33.))]).into_operation();

    let out = op
        .transform(&[
            13.393921852111816_f64.to_radians(),
            52.5200080871582_f64.to_radians(),
            0.0,
        ])
        .unwrap();

    assert_abs_diff_eq!(out[0], 391027.67777461524, epsilon = 1.0e-10);
    assert_abs_diff_eq!(out[1], 5820089.724404063, epsilon = 1.0e-10);

    // and back
    let inv = op.try_inverse().unwrap();
    let back = inv.transform(&out).unwrap();
    assert_abs_diff_eq!(back[0], 13.393921852111816_f64.to_radians(), epsilon = 1e-10);
    assert_abs_diff_eq!(back[1], 52.5200080871582_f64.to_radians(), epsilon = 1e-10);
}

#[test]
fn test_bng_tmerc() {
    setup();

    // British national grid without its correction grid
    let op = proj(
        "tmerc",
        "airy",
        &[
            ("lat_0", Measure::degrees(49.)),
            ("lon_0", Measure::degrees(-2.)),
            ("k_0", Measure::factor(0.9996012717)),
            ("x_0", Measure::meters(400_000.)),
            ("y_0", Measure::meters(-100_000.)),
        ],
    )
    .into_operation();

    let out = op
        .transform(&[-4.89328_f64.to_radians(), 51.66311_f64.to_radians(), 0.0])
        .unwrap();

    // reference values from the truncated series algorithm: at ~3
    // degrees from the central meridian both algorithms agree to the
    // centimeter
    assert_abs_diff_eq!(out[0], 199925.978901151626, epsilon = 5.0e-2);
    assert_abs_diff_eq!(out[1], 200052.051949012151, epsilon = 5.0e-2);

    let back = op.try_inverse().unwrap().transform(&out).unwrap();
    assert_abs_diff_eq!(back[0], -4.89328_f64.to_radians(), epsilon = 1e-10);
    assert_abs_diff_eq!(back[1], 51.66311_f64.to_radians(), epsilon = 1e-10);
}

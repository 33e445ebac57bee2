//! Fixed Transverse Mercator engine for the local cadastral system.
//!
//! Parameters: GRS80 ellipsoid, central meridian 16.5° E, latitude of
//! origin 0°, scale factor 0.9999, false easting 500 000 m, false
//! northing 0 m, identity datum shift. Both directions use the Krüger
//! series to fourth order in the third flattening, which keeps the
//! round-trip error far below a millimeter anywhere in the zone.
//!
//! All functions are pure; callers must only pass finite degrees/meters.

use geo::Coord;

/// GRS80 semi-major axis, meters
const SEMI_MAJOR_AXIS_M: f64 = 6_378_137.0;

/// GRS80 inverse flattening
const INV_FLATTENING: f64 = 298.257_222_101;

/// Central meridian, degrees east
const CENTRAL_MERIDIAN_DEG: f64 = 16.5;

/// Scale factor at the central meridian
const SCALE_FACTOR: f64 = 0.9999;

/// False easting, meters
const FALSE_EASTING_M: f64 = 500_000.0;

/// False northing, meters
const FALSE_NORTHING_M: f64 = 0.0;

/// Third flattening n = f / (2 - f)
fn third_flattening() -> f64 {
    let f = 1.0 / INV_FLATTENING;
    f / (2.0 - f)
}

/// First eccentricity
fn eccentricity() -> f64 {
    let f = 1.0 / INV_FLATTENING;
    (f * (2.0 - f)).sqrt()
}

/// Rectifying radius A = a/(1+n) (1 + n²/4 + n⁴/64)
fn rectifying_radius() -> f64 {
    let n = third_flattening();
    let n2 = n * n;
    SEMI_MAJOR_AXIS_M / (1.0 + n) * (1.0 + n2 / 4.0 + n2 * n2 / 64.0)
}

/// Forward series coefficients α₁..α₄
fn alpha() -> [f64; 4] {
    let n = third_flattening();
    let n2 = n * n;
    let n3 = n2 * n;
    let n4 = n2 * n2;
    [
        n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0 + 41.0 * n4 / 180.0,
        13.0 * n2 / 48.0 - 3.0 * n3 / 5.0 + 557.0 * n4 / 1440.0,
        61.0 * n3 / 240.0 - 103.0 * n4 / 140.0,
        49561.0 * n4 / 161280.0,
    ]
}

/// Inverse series coefficients β₁..β₄
fn beta() -> [f64; 4] {
    let n = third_flattening();
    let n2 = n * n;
    let n3 = n2 * n;
    let n4 = n2 * n2;
    [
        n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0 - n4 / 360.0,
        n2 / 48.0 + n3 / 15.0 - 437.0 * n4 / 1440.0,
        17.0 * n3 / 480.0 - 37.0 * n4 / 840.0,
        4397.0 * n4 / 161280.0,
    ]
}

/// Conformal-to-geographic latitude series coefficients
fn delta() -> [f64; 4] {
    let n = third_flattening();
    let n2 = n * n;
    let n3 = n2 * n;
    let n4 = n2 * n2;
    [
        2.0 * n - 2.0 * n2 / 3.0 - 2.0 * n3 + 116.0 * n4 / 45.0,
        7.0 * n2 / 3.0 - 8.0 * n3 / 5.0 - 227.0 * n4 / 45.0,
        56.0 * n3 / 15.0 - 136.0 * n4 / 35.0,
        4279.0 * n4 / 630.0,
    ]
}

/// Projects a geographic WGS84 coordinate into the local system.
///
/// Degrees in, meters out. Easting is `x`, northing is `y`.
pub fn to_local(lon_deg: f64, lat_deg: f64) -> Coord<f64> {
    let lam = (lon_deg - CENTRAL_MERIDIAN_DEG).to_radians();
    let phi = lat_deg.to_radians();
    let e = eccentricity();

    // tangent of the conformal latitude, via the isometric latitude
    let psi = phi.sin().atanh() - e * (e * phi.sin()).atanh();
    let tau = psi.sinh();

    let xi_p = tau.atan2(lam.cos());
    let eta_p = (lam.sin() / tau.hypot(lam.cos())).asinh();

    let mut xi = xi_p;
    let mut eta = eta_p;
    for (j, a) in alpha().iter().enumerate() {
        let k = 2.0 * (j + 1) as f64;
        xi += a * (k * xi_p).sin() * (k * eta_p).cosh();
        eta += a * (k * xi_p).cos() * (k * eta_p).sinh();
    }

    let scale = SCALE_FACTOR * rectifying_radius();
    Coord {
        x: FALSE_EASTING_M + scale * eta,
        y: FALSE_NORTHING_M + scale * xi,
    }
}

/// Inverse of [to_local]: meters in, WGS84 degrees out as `(lon, lat)`.
pub fn to_geographic(local: Coord<f64>) -> (f64, f64) {
    let scale = SCALE_FACTOR * rectifying_radius();
    let xi = (local.y - FALSE_NORTHING_M) / scale;
    let eta = (local.x - FALSE_EASTING_M) / scale;

    let mut xi_p = xi;
    let mut eta_p = eta;
    for (j, b) in beta().iter().enumerate() {
        let k = 2.0 * (j + 1) as f64;
        xi_p -= b * (k * xi).sin() * (k * eta).cosh();
        eta_p -= b * (k * xi).cos() * (k * eta).sinh();
    }

    let chi = xi_p.sin().atan2(eta_p.sinh().hypot(xi_p.cos()));
    let lam = eta_p.sinh().atan2(xi_p.cos());

    let mut phi = chi;
    for (j, d) in delta().iter().enumerate() {
        let k = 2.0 * (j + 1) as f64;
        phi += d * (k * chi).sin();
    }

    (CENTRAL_MERIDIAN_DEG + lam.to_degrees(), phi.to_degrees())
}

#[cfg(test)]
mod test {
    use super::{to_geographic, to_local};

    #[test]
    fn origin_maps_to_false_easting() {
        let local = to_local(16.5, 0.0);
        assert!((local.x - 500_000.0).abs() < 1e-6);
        assert!(local.y.abs() < 1e-6);
    }

    #[test]
    fn central_meridian_northing_is_scaled_arc() {
        let local = to_local(16.5, 45.0);
        assert!((local.x - 500_000.0).abs() < 1e-6);
        // 0.9999 x the GRS80 meridian arc to 45° (~4 984 944 m)
        assert!(local.y > 4_984_000.0 && local.y < 4_985_000.0);
    }

    #[test]
    fn easting_grows_eastward() {
        assert!(to_local(17.5, 45.8).x > 500_000.0);
        assert!(to_local(15.5, 45.8).x < 500_000.0);
        assert!(to_local(17.5, 45.8).y > 0.0);
    }

    #[test]
    fn round_trip_inside_zone() {
        for lon_step in 0..5 {
            for lat_step in 0..6 {
                let lon = 13.5 + 1.5 * lon_step as f64;
                let lat = 42.0 + 1.0 * lat_step as f64;

                let (lon_back, lat_back) = to_geographic(to_local(lon, lat));

                assert!(
                    (lon_back - lon).abs() < 1e-9,
                    "lon {} came back as {}",
                    lon,
                    lon_back
                );
                assert!(
                    (lat_back - lat).abs() < 1e-9,
                    "lat {} came back as {}",
                    lat,
                    lat_back
                );
            }
        }
    }
}

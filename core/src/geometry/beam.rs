use super::GeometryError;
use serde::{Deserialize, Serialize};

/// Mean radius of the Earth in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Effective radius used to account for standard atmospheric refraction.
pub const EFFECTIVE_EARTH_RADIUS_M: f64 = EARTH_RADIUS_M * 4.0 / 3.0;

/// How far past +/-1 the arcsine argument may drift through rounding before
/// it is rejected instead of clamped.
pub const DEFAULT_ARCSIN_TOLERANCE: f64 = 1e-9;

/// Offset of a sample volume from the radar antenna, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CartesianOffset {
    /// Eastward distance along the surface.
    pub x_m: f64,
    /// Northward distance along the surface.
    pub y_m: f64,
    /// Height above the antenna.
    pub z_m: f64,
}

/// Converts a gate location in radar coordinates to a Cartesian offset.
///
/// Implements Doviak & Zrnic (1993) eqs. 2.28(b) and 2.28(c):
///
/// ```text
/// z = sqrt(r^2 + R^2 + 2 r R sin(el)) - R
/// s = R asin(r cos(el) / (R + z))
/// x = s sin(az),  y = s cos(az)
/// ```
///
/// `range_km` is the slant range to the gate centre, angles are in degrees
/// with azimuth clockwise from north.
pub fn radar_to_cartesian(
    range_km: f64,
    azimuth_deg: f64,
    elevation_deg: f64,
) -> Result<CartesianOffset, GeometryError> {
    radar_to_cartesian_with_tolerance(
        range_km,
        azimuth_deg,
        elevation_deg,
        DEFAULT_ARCSIN_TOLERANCE,
    )
}

/// Same as [`radar_to_cartesian`] with an explicit arcsine clamp tolerance.
pub fn radar_to_cartesian_with_tolerance(
    range_km: f64,
    azimuth_deg: f64,
    elevation_deg: f64,
    tolerance: f64,
) -> Result<CartesianOffset, GeometryError> {
    if !range_km.is_finite() || range_km < 0.0 {
        return Err(GeometryError::Domain {
            quantity: "slant range (km)".into(),
            value: range_km,
        });
    }
    if !azimuth_deg.is_finite() {
        return Err(GeometryError::Domain {
            quantity: "azimuth (deg)".into(),
            value: azimuth_deg,
        });
    }
    if !elevation_deg.is_finite() {
        return Err(GeometryError::Domain {
            quantity: "elevation (deg)".into(),
            value: elevation_deg,
        });
    }

    let theta_e = elevation_deg.to_radians();
    let theta_a = azimuth_deg.rem_euclid(360.0).to_radians();
    let big_r = EFFECTIVE_EARTH_RADIUS_M;
    let r = range_km * 1000.0;

    let z = (r * r + big_r * big_r + 2.0 * r * big_r * theta_e.sin()).sqrt() - big_r;
    let ratio = clamp_unit(r * theta_e.cos() / (big_r + z), tolerance)?;
    let s = big_r * ratio.asin();

    Ok(CartesianOffset {
        x_m: s * theta_a.sin(),
        y_m: s * theta_a.cos(),
        z_m: z,
    })
}

fn clamp_unit(value: f64, tolerance: f64) -> Result<f64, GeometryError> {
    if !value.is_finite() || value.abs() > 1.0 + tolerance {
        return Err(GeometryError::ArcsinDomain { value });
    }
    Ok(value.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(range_km: f64, azimuth_deg: f64, elevation_deg: f64) -> (f64, f64, f64) {
        let big_r: f64 = 6371.0 * 1000.0 * 4.0 / 3.0;
        let r = range_km * 1000.0;
        let te = elevation_deg * std::f64::consts::PI / 180.0;
        let ta = azimuth_deg * std::f64::consts::PI / 180.0;
        let z = (r.powi(2) + big_r.powi(2) + 2.0 * r * big_r * te.sin()).powf(0.5) - big_r;
        let s = big_r * (r * te.cos() / (big_r + z)).asin();
        (s * ta.sin(), s * ta.cos(), z)
    }

    #[test]
    fn zero_range_maps_to_origin() {
        for &(az, el) in &[(0.0, 0.0), (137.0, 3.5), (359.0, -1.0), (45.0, 89.0)] {
            let offset = radar_to_cartesian(0.0, az, el).unwrap();
            assert_eq!(offset.x_m, 0.0);
            assert_eq!(offset.y_m, 0.0);
            assert_eq!(offset.z_m, 0.0);
        }
    }

    #[test]
    fn north_pointing_horizontal_beam_approaches_flat_earth() {
        let offset = radar_to_cartesian(100.0, 0.0, 0.0).unwrap();
        assert!(offset.x_m.abs() < 1e-9);
        // R atan(r / R) for a horizontal beam.
        let big_r = EFFECTIVE_EARTH_RADIUS_M;
        let expected = big_r * (100_000.0 / big_r).atan();
        assert!((offset.y_m - expected).abs() < 1e-6);
        assert!((offset.y_m - 100_000.0).abs() < 10.0);
        assert!(offset.z_m > 0.0);
    }

    fn assert_close(a: CartesianOffset, b: CartesianOffset) {
        assert!((a.x_m - b.x_m).abs() < 1e-6, "x {} vs {}", a.x_m, b.x_m);
        assert!((a.y_m - b.y_m).abs() < 1e-6, "y {} vs {}", a.y_m, b.y_m);
        assert!((a.z_m - b.z_m).abs() < 1e-6, "z {} vs {}", a.z_m, b.z_m);
    }

    #[test]
    fn azimuth_is_periodic() {
        for &az in &[0.0, 12.5, 90.0, 271.3] {
            let a = radar_to_cartesian(57.0, az, 1.5).unwrap();
            let b = radar_to_cartesian(57.0, az + 360.0, 1.5).unwrap();
            let c = radar_to_cartesian(57.0, az - 720.0, 1.5).unwrap();
            assert_close(a, b);
            assert_close(a, c);
        }
        // Whole-degree azimuths reduce exactly.
        assert_eq!(
            radar_to_cartesian(57.0, 90.0, 1.5).unwrap(),
            radar_to_cartesian(57.0, 450.0, 1.5).unwrap()
        );
    }

    #[test]
    fn height_grows_with_range_for_non_negative_elevation() {
        for &el in &[0.0, 0.5, 3.0, 19.5, 90.0] {
            let mut previous = f64::NEG_INFINITY;
            for gate in 0..=250 {
                let z = radar_to_cartesian(gate as f64, 200.0, el).unwrap().z_m;
                assert!(z >= previous, "z decreased at gate {gate} el {el}");
                previous = z;
            }
        }
    }

    #[test]
    fn east_pointing_beam_matches_closed_form() {
        let offset = radar_to_cartesian(100.0, 90.0, 0.5).unwrap();
        let (x, y, z) = reference(100.0, 90.0, 0.5);
        assert!(offset.y_m.abs() < 1.0);
        assert!((offset.x_m - x).abs() < 1e-6);
        assert!((offset.z_m - z).abs() < 1e-6);
        assert!((offset.x_m - 99_981.3).abs() < 1.0);
        assert!((offset.z_m - 1_461.1).abs() < 1.0);
    }

    #[test]
    fn vertical_beam_rises_by_the_range() {
        let offset = radar_to_cartesian(10.0, 45.0, 90.0).unwrap();
        assert!((offset.z_m - 10_000.0).abs() < 1e-6);
        assert!(offset.x_m.abs() < 1e-6);
        assert!(offset.y_m.abs() < 1e-6);
    }

    #[test]
    fn negative_range_is_a_domain_error() {
        let err = radar_to_cartesian(-0.25, 10.0, 0.5).unwrap_err();
        assert!(matches!(err, GeometryError::Domain { value, .. } if value == -0.25));
    }

    #[test]
    fn non_finite_angles_are_rejected() {
        assert!(radar_to_cartesian(1.0, f64::NAN, 0.5).is_err());
        assert!(radar_to_cartesian(1.0, 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn clamp_accepts_rounding_and_rejects_real_overflow() {
        assert_eq!(clamp_unit(1.0 + 1e-12, DEFAULT_ARCSIN_TOLERANCE).unwrap(), 1.0);
        assert_eq!(clamp_unit(-1.0 - 1e-12, DEFAULT_ARCSIN_TOLERANCE).unwrap(), -1.0);
        assert!(matches!(
            clamp_unit(1.001, DEFAULT_ARCSIN_TOLERANCE),
            Err(GeometryError::ArcsinDomain { .. })
        ));
        assert!(clamp_unit(f64::INFINITY, DEFAULT_ARCSIN_TOLERANCE).is_err());
    }
}

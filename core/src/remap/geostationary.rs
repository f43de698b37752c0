use serde::{Deserialize, Serialize};

/// Geostationary view with an x-axis sweep, as flown by the GOES-R series.
///
/// Forward mapping follows the GOES-R Product User's Guide, vol. 4 §4.2.8,
/// scaled to projection metres by the perspective height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeosProjection {
    /// Perspective point height above the ellipsoid (m).
    pub perspective_height_m: f64,
    pub semi_major_m: f64,
    pub semi_minor_m: f64,
    pub nadir_longitude_deg: f64,
}

impl Default for GeosProjection {
    /// GOES-16 in its non-operational (test) position.
    fn default() -> Self {
        Self {
            perspective_height_m: 35_786_023.0,
            semi_major_m: 6_378_137.0,
            semi_minor_m: 6_356_752.314_14,
            nadir_longitude_deg: -89.5,
        }
    }
}

impl GeosProjection {
    pub fn goes16_operational() -> Self {
        Self {
            perspective_height_m: 35_786_000.0,
            semi_major_m: 6_378_140.0,
            semi_minor_m: 6_356_750.0,
            nadir_longitude_deg: -75.0,
        }
    }

    /// Scan angles (radians) seen from the satellite, or `None` when the
    /// point is hidden behind the limb.
    pub fn scan_angles(&self, lon_deg: f64, lat_deg: f64) -> Option<(f64, f64)> {
        let a2 = self.semi_major_m.powi(2);
        let b2 = self.semi_minor_m.powi(2);
        let big_h = self.perspective_height_m + self.semi_major_m;
        let e2 = (a2 - b2) / a2;

        let lat = lat_deg.to_radians();
        let dlon = (lon_deg - self.nadir_longitude_deg).to_radians();

        let phi_c = (b2 / a2 * lat.tan()).atan();
        let rc = self.semi_minor_m / (1.0 - e2 * phi_c.cos().powi(2)).sqrt();

        let sx = big_h - rc * phi_c.cos() * dlon.cos();
        let sy = -rc * phi_c.cos() * dlon.sin();
        let sz = rc * phi_c.sin();

        if big_h * (big_h - sx) < sy * sy + a2 / b2 * sz * sz {
            return None;
        }

        let rn = (sx * sx + sy * sy + sz * sz).sqrt();
        Some(((-sy / rn).asin(), (sz / sx).atan()))
    }

    /// Projection coordinates in metres for a lon/lat point.
    pub fn forward(&self, lon_deg: f64, lat_deg: f64) -> Option<(f64, f64)> {
        let (x, y) = self.scan_angles(lon_deg, lat_deg)?;
        Some((x * self.perspective_height_m, y * self.perspective_height_m))
    }
}

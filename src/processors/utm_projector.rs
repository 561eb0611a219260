use crate::error::{ProcessingError, Result};
use crate::models::{GeodeticCoordinate, Hemisphere, ProjectedCoordinate, UtmZone};
use crate::utils::constants::{
    UTM_FALSE_EASTING, UTM_SCALE_FACTOR, UTM_SOUTH_FALSE_NORTHING, WGS84_INVERSE_FLATTENING,
    WGS84_SEMI_MAJOR_AXIS,
};

/// Forward transverse Mercator projection onto the WGS84 UTM grid.
///
/// Uses the Krüger series in the third flattening `n`, truncated at `n^4`,
/// which is sub-millimetre within a zone.
#[derive(Debug, Clone)]
pub struct UtmProjector {
    southern_false_northing: bool,
    eccentricity: f64,
    rectifying_radius: f64,
    alpha: [f64; 4],
}

impl UtmProjector {
    pub fn new() -> Self {
        let f = 1.0 / WGS84_INVERSE_FLATTENING;
        let n = f / (2.0 - f);
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;

        let rectifying_radius = WGS84_SEMI_MAJOR_AXIS / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0);
        let alpha = [
            n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0 + 41.0 * n4 / 180.0,
            13.0 * n2 / 48.0 - 3.0 * n3 / 5.0 + 557.0 * n4 / 1440.0,
            61.0 * n3 / 240.0 - 103.0 * n4 / 140.0,
            49561.0 * n4 / 161280.0,
        ];

        Self {
            southern_false_northing: false,
            eccentricity: (f * (2.0 - f)).sqrt(),
            rectifying_radius,
            alpha,
        }
    }

    /// Add the 10 000 km false northing for southern latitudes.
    ///
    /// Off by default: southern points then carry negative northings.
    pub fn with_southern_false_northing(mut self, enabled: bool) -> Self {
        self.southern_false_northing = enabled;
        self
    }

    /// Project into the zone derived from the coordinate's own longitude
    pub fn project(&self, coord: &GeodeticCoordinate) -> Result<ProjectedCoordinate> {
        let zone = UtmZone::from_longitude(coord.longitude)
            .map_err(|e| ProcessingError::ProjectionUnavailable(e.to_string()))?;
        self.project_in_zone(coord, zone)
    }

    pub fn project_in_zone(
        &self,
        coord: &GeodeticCoordinate,
        zone: UtmZone,
    ) -> Result<ProjectedCoordinate> {
        if !coord.latitude.is_finite() || !coord.longitude.is_finite() {
            return Err(ProcessingError::ProjectionUnavailable(format!(
                "non-finite input ({}, {})",
                coord.latitude, coord.longitude
            )));
        }

        let phi = coord.latitude.to_radians();
        let delta_lambda = (coord.longitude - zone.central_meridian()).to_radians();
        let e = self.eccentricity;

        let sin_phi = phi.sin();
        let t = (sin_phi.atanh() - e * (e * sin_phi).atanh()).sinh();
        let xi_prime = t.atan2(delta_lambda.cos());
        let eta_prime = (delta_lambda.sin() / (1.0 + t * t).sqrt()).atanh();

        let mut xi = xi_prime;
        let mut eta = eta_prime;
        for (j, alpha) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j as f64 + 1.0);
            xi += alpha * (k * xi_prime).sin() * (k * eta_prime).cosh();
            eta += alpha * (k * xi_prime).cos() * (k * eta_prime).sinh();
        }

        let hemisphere = coord.hemisphere();
        let false_northing = match hemisphere {
            Hemisphere::South if self.southern_false_northing => UTM_SOUTH_FALSE_NORTHING,
            _ => 0.0,
        };

        let easting = UTM_FALSE_EASTING + UTM_SCALE_FACTOR * self.rectifying_radius * eta;
        let northing = false_northing + UTM_SCALE_FACTOR * self.rectifying_radius * xi;

        if !easting.is_finite() || !northing.is_finite() {
            return Err(ProcessingError::ProjectionUnavailable(format!(
                "transform of ({}, {}) in zone {} did not converge",
                coord.latitude, coord.longitude, zone
            )));
        }

        Ok(ProjectedCoordinate {
            zone,
            hemisphere,
            easting,
            northing,
        })
    }
}

impl Default for UtmProjector {
    fn default() -> Self {
        Self::new()
    }
}

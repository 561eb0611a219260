use crate::error::{ProcessingError, Result};
use crate::utils::constants::{MAX_LONGITUDE, UTM_ZONE_COUNT, UTM_ZONE_WIDTH_DEG};

/// Compute the UTM zone number for a longitude in decimal degrees.
///
/// Zone 1 starts at the antimeridian and numbering increases eastward in
/// 6° bands. Longitude exactly 180° would land in zone 61 and is clamped to 60.
///
/// # Examples
/// ```
/// use sheet_geocoder::utils::compute_utm_zone;
///
/// assert_eq!(compute_utm_zone(-122.0842).unwrap(), 10);
/// assert_eq!(compute_utm_zone(180.0).unwrap(), 60);
/// ```
pub fn compute_utm_zone(longitude: f64) -> Result<u8> {
    validate_longitude(longitude)?;

    let zone = ((longitude + MAX_LONGITUDE) / UTM_ZONE_WIDTH_DEG).floor() as u8 + 1;
    Ok(zone.min(UTM_ZONE_COUNT))
}

/// Central meridian of a UTM zone in decimal degrees; `zone` is `1..=60`
pub(crate) fn central_meridian(zone: u8) -> f64 {
    f64::from(zone.saturating_sub(1)) * UTM_ZONE_WIDTH_DEG - MAX_LONGITUDE + UTM_ZONE_WIDTH_DEG / 2.0
}

pub fn validate_longitude(longitude: f64) -> Result<()> {
    if !longitude.is_finite() || !(-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "Longitude {} is outside [-180, 180]",
            longitude
        )));
    }
    Ok(())
}

/// Render a coordinate pair the way it is stored in the sheet: `"<a>, <b>"`
pub fn format_pair(first: f64, second: f64) -> String {
    format!("{}, {}", first, second)
}

use crate::error::{ProcessingError, Result};
use crate::utils::coordinates::{central_meridian, compute_utm_zone, format_pair};
use std::fmt;
use validator::Validate;

/// WGS84 latitude/longitude in decimal degrees.
///
/// A missing coordinate is represented by `Option::None` at the call site,
/// so `(0.0, 0.0)` is an ordinary point in the Gulf of Guinea.
#[derive(Debug, Clone, Copy, PartialEq, Validate)]
pub struct GeodeticCoordinate {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl GeodeticCoordinate {
    /// Build a coordinate, rejecting NaN, infinities and out-of-range degrees
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self {
            latitude,
            longitude,
        };
        // range checks let NaN through
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(ProcessingError::InvalidCoordinate(format!(
                "Non-finite coordinate ({}, {})",
                latitude, longitude
            )));
        }
        coord.validate().map_err(|e| {
            ProcessingError::InvalidCoordinate(format!("({}, {}): {}", latitude, longitude, e))
        })?;
        Ok(coord)
    }

    pub fn hemisphere(&self) -> Hemisphere {
        if self.latitude < 0.0 {
            Hemisphere::South
        } else {
            Hemisphere::North
        }
    }
}

impl fmt::Display for GeodeticCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_pair(self.latitude, self.longitude))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    pub fn letter(&self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
        }
    }
}

/// UTM zone number in `1..=60`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtmZone(u8);

impl UtmZone {
    pub fn from_longitude(longitude: f64) -> Result<Self> {
        compute_utm_zone(longitude).map(UtmZone)
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    /// Central meridian in decimal degrees
    pub fn central_meridian(&self) -> f64 {
        central_meridian(self.0)
    }
}

impl fmt::Display for UtmZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Easting/northing in meters within a UTM zone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedCoordinate {
    pub zone: UtmZone,
    pub hemisphere: Hemisphere,
    pub easting: f64,
    pub northing: f64,
}

impl fmt::Display for ProjectedCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_pair(self.easting, self.northing))
    }
}

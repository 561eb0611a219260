use crate::models::{GeodeticCoordinate, ProjectedCoordinate};

/// One worksheet row moving through the batch.
///
/// Output slots start empty and are filled at most once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressRow {
    pub row: u32,
    pub address: String,
    pub geodetic: Option<GeodeticCoordinate>,
    pub projected: Option<ProjectedCoordinate>,
}

impl AddressRow {
    pub fn new(row: u32, address: impl Into<String>) -> Self {
        Self {
            row,
            address: address.into(),
            geodetic: None,
            projected: None,
        }
    }

    /// Cell text for the lat/lon column, if geocoding succeeded
    pub fn lat_lon_text(&self) -> Option<String> {
        self.geodetic.map(|c| c.to_string())
    }

    /// Cell text for the projected column, if projection succeeded
    pub fn projected_text(&self) -> Option<String> {
        self.projected.map(|c| c.to_string())
    }
}

pub mod google;

pub use google::{GeocodeResponse, GoogleGeocoder};

use crate::error::Result;
use crate::models::GeodeticCoordinate;
use async_trait::async_trait;

/// Result of a geocoding request that reached the service
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeOutcome {
    Found(GeodeticCoordinate),
    /// The service answered but could not resolve the address
    NotFound { status: String },
}

impl GeocodeOutcome {
    pub fn coordinate(&self) -> Option<GeodeticCoordinate> {
        match self {
            GeocodeOutcome::Found(coord) => Some(*coord),
            GeocodeOutcome::NotFound { .. } => None,
        }
    }
}

/// Resolves free-text addresses to WGS84 coordinates.
///
/// Errors are reserved for failures unrelated to the address itself
/// (transport problems, rejected credentials).
#[async_trait]
pub trait Geocode: Send + Sync {
    async fn resolve(&self, address: &str) -> Result<GeocodeOutcome>;
}

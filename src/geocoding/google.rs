use crate::error::{ProcessingError, Result};
use crate::geocoding::{Geocode, GeocodeOutcome};
use crate::models::GeodeticCoordinate;
use crate::utils::constants::{
    DEFAULT_GEOCODE_ENDPOINT, STATUS_INVALID_LOCATION, STATUS_OK, STATUS_OVER_DAILY_LIMIT,
    STATUS_OVER_QUERY_LIMIT, STATUS_REQUEST_DENIED, STATUS_ZERO_RESULTS,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

/// Top-level geocoding payload. Fields the batch does not use are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,

    #[serde(default)]
    pub results: Vec<GeocodeResult>,

    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub geometry: Geometry,

    #[serde(default)]
    pub formatted_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: Location,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Client for a Google-compatible geocoding JSON endpoint
pub struct GoogleGeocoder {
    client: reqwest::Client,
    endpoint: String,
    credential: String,
}

impl GoogleGeocoder {
    pub fn new(credential: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: DEFAULT_GEOCODE_ENDPOINT.to_string(),
            credential: credential.into(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Map a decoded payload to an outcome.
    ///
    /// Credential and quota refusals are errors because every later request
    /// would fail the same way; everything else about a single address is
    /// an ordinary `NotFound`.
    pub fn interpret(response: GeocodeResponse) -> Result<GeocodeOutcome> {
        match response.status.as_str() {
            STATUS_OK => {
                let Some(first) = response.results.first() else {
                    return Ok(GeocodeOutcome::NotFound {
                        status: STATUS_ZERO_RESULTS.to_string(),
                    });
                };
                let location = first.geometry.location;
                match GeodeticCoordinate::new(location.lat, location.lng) {
                    Ok(coord) => Ok(GeocodeOutcome::Found(coord)),
                    Err(e) => {
                        tracing::debug!("Discarding geocode result: {}", e);
                        Ok(GeocodeOutcome::NotFound {
                            status: STATUS_INVALID_LOCATION.to_string(),
                        })
                    }
                }
            }
            STATUS_REQUEST_DENIED | STATUS_OVER_DAILY_LIMIT => {
                Err(ProcessingError::CredentialRejected(describe(&response)))
            }
            STATUS_OVER_QUERY_LIMIT => Err(ProcessingError::Transport(describe(&response))),
            _ => Ok(GeocodeOutcome::NotFound {
                status: response.status,
            }),
        }
    }

    fn check_http_status(status: StatusCode) -> Result<()> {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ProcessingError::CredentialRejected(format!("HTTP {}", status)));
        }
        if !status.is_success() {
            return Err(ProcessingError::Transport(format!("HTTP {}", status)));
        }
        Ok(())
    }
}

#[async_trait]
impl Geocode for GoogleGeocoder {
    async fn resolve(&self, address: &str) -> Result<GeocodeOutcome> {
        if address.trim().is_empty() {
            return Ok(GeocodeOutcome::NotFound {
                status: "INVALID_REQUEST".to_string(),
            });
        }

        tracing::debug!(address, endpoint = %self.endpoint, "Sending geocode request");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("address", address), ("key", self.credential.as_str())])
            .send()
            .await?;

        Self::check_http_status(response.status())?;

        let payload: GeocodeResponse = response.json().await?;
        tracing::debug!(address, status = %payload.status, results = payload.results.len(), "Geocode response");

        Self::interpret(payload)
    }
}

fn describe(response: &GeocodeResponse) -> String {
    match &response.error_message {
        Some(message) => format!("{}: {}", response.status, message),
        None => response.status.clone(),
    }
}

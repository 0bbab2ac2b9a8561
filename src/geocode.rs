//! Reverse geocoding with a coordinate-string fallback.
//!
//! A lookup never fails from the caller's point of view: any transport error, non-2xx
//! response, malformed payload or missing `display_name` degrades to
//! `"Lat: {lat:.6}, Lng: {lng:.6}"`.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const USER_AGENT: &str = concat!("civic-tui/", env!("CARGO_PKG_VERSION"));

/// Resolves coordinates to a display address.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Always yields a non-empty address, falling back to the coordinate string.
    async fn reverse_geocode(&self, lat: f64, lng: f64) -> String;
}

/// Address synthesized when the geocoder cannot resolve a position.
pub fn fallback_address(lat: f64, lng: f64) -> String {
    format!("Lat: {:.6}, Lng: {:.6}", lat, lng)
}

#[derive(Debug, Error)]
enum GeocodeError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("response has no display_name")]
    MissingDisplayName,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

/// Nominatim-compatible `/reverse` endpoint.
pub struct NominatimGeocoder {
    base_url: String,
    client: Client,
}

impl NominatimGeocoder {
    pub fn new(base_url: String, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn lookup(&self, lat: f64, lng: f64) -> Result<String, GeocodeError> {
        let url = format!("{}/reverse", self.base_url);
        let body: ReverseResponse = self
            .client
            .get(&url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lng.to_string()),
                ("format", "json".to_string()),
            ])
            .header(header::ACCEPT_LANGUAGE, "en")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        body.display_name
            .filter(|name| !name.is_empty())
            .ok_or(GeocodeError::MissingDisplayName)
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse_geocode(&self, lat: f64, lng: f64) -> String {
        match self.lookup(lat, lng).await {
            Ok(address) => address,
            Err(e) => {
                debug!(%e, lat, lng, "Reverse geocode failed, using coordinates");
                fallback_address(lat, lng)
            }
        }
    }
}

//! Forward geocoding against a Nominatim-style search endpoint.

use std::future::Future;

use log::{debug, warn};
use serde::Deserialize;

use crate::types::LatLng;

/// Default search endpoint.
pub const NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

/// Resolves a free-text place name to a coordinate.
///
/// `None` covers every way a lookup can come up empty: no match, transport
/// failure, or an unparseable response. Callers treat all of them as "skip
/// this entry" and continue.
pub trait Geocode {
    /// Resolves `name` to a coordinate, or `None` when nothing was found.
    fn geocode(&self, name: &str) -> impl Future<Output = Option<LatLng>> + Send;
}

/// One result row of the search response. The service types `lat`/`lon` as
/// strings; they are parsed to `f64` here.
#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
}

/// HTTP geocoder scoped to a fixed locality.
///
/// Every query gets the locality appended (`"<name>, <locality>"`) so that
/// generic names like "Rathaus" resolve inside the target city instead of
/// anywhere on the planet.
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: reqwest::Client,
    endpoint: String,
    locality: String,
}

impl Geocoder {
    /// Creates a geocoder against the default endpoint.
    pub fn new(client: reqwest::Client, locality: impl Into<String>) -> Self {
        Self::with_endpoint(client, NOMINATIM_ENDPOINT, locality)
    }

    /// Creates a geocoder against a custom endpoint, e.g. a self-hosted
    /// instance.
    pub fn with_endpoint(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        locality: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            locality: locality.into(),
        }
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, reqwest::Error> {
        let url = format!(
            "{}?format=json&q={}",
            self.endpoint,
            urlencoding::encode(query)
        );
        self.client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

impl Geocode for Geocoder {
    async fn geocode(&self, name: &str) -> Option<LatLng> {
        let query = format!("{}, {}", name, self.locality);
        match self.search(&query).await {
            Ok(results) => {
                let hit = first_coordinate(&results);
                if hit.is_none() {
                    debug!("no geocode match for '{query}'");
                }
                hit
            }
            // One bad lookup must not stop the rest of the batch.
            Err(err) => {
                warn!("geocode request for '{query}' failed: {err}");
                None
            }
        }
    }
}

fn first_coordinate(results: &[SearchResult]) -> Option<LatLng> {
    let first = results.first()?;
    Some(LatLng::new(
        first.lat.parse().ok()?,
        first.lon.parse().ok()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_typed_coordinates() {
        let body = r#"[{"lat": "48.20849", "lon": "16.37208", "display_name": "Stephansdom"}]"#;
        let results: Vec<SearchResult> = serde_json::from_str(body).unwrap();
        let hit = first_coordinate(&results).unwrap();
        assert_eq!(hit, LatLng::new(48.20849, 16.37208));
    }

    #[test]
    fn empty_response_means_not_found() {
        let results: Vec<SearchResult> = serde_json::from_str("[]").unwrap();
        assert!(first_coordinate(&results).is_none());
    }

    #[test]
    fn unparseable_coordinates_mean_not_found() {
        let body = r#"[{"lat": "not-a-number", "lon": "16.37208"}]"#;
        let results: Vec<SearchResult> = serde_json::from_str(body).unwrap();
        assert!(first_coordinate(&results).is_none());
    }

    #[test]
    fn only_the_first_result_is_used() {
        let body = r#"[
            {"lat": "48.1", "lon": "16.1"},
            {"lat": "48.9", "lon": "16.9"}
        ]"#;
        let results: Vec<SearchResult> = serde_json::from_str(body).unwrap();
        assert_eq!(first_coordinate(&results), Some(LatLng::new(48.1, 16.1)));
    }
}

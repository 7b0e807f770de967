//! Administrative boundary fetch and the spotlight mask derived from it.
//!
//! The masker runs once at startup: it fetches the boundary polygon for the
//! configured region, draws a world-sized dark polygon with the boundary cut
//! out (everything outside the region appears dimmed), draws the boundary
//! itself as a thin outline, and pins the view to the boundary's bounding
//! box.

use std::future::Future;

use log::info;
use serde::Deserialize;

use crate::error::Error;
use crate::types::{LatLng, LatLngBounds};
use crate::view::{Layer, PolygonStyle, ViewHandle};

/// Default boundary-lookup endpoint.
pub const OVERPASS_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Outer ring of the mask: the whole world in the plate carrée frame, so it
/// encloses any boundary ring (lat in [-90, 90], lon in [-180, 180]).
pub const WORLD_RING: [LatLng; 4] = [
    LatLng::new(-90.0, -180.0),
    LatLng::new(-90.0, 180.0),
    LatLng::new(90.0, 180.0),
    LatLng::new(90.0, -180.0),
];

const MASK_FILL: &str = "#000";
const MASK_FILL_OPACITY: f64 = 0.6;
const OUTLINE_COLOR: &str = "#00ffff";
const OUTLINE_WEIGHT: u32 = 3;
const OUTLINE_FILL_OPACITY: f64 = 0.05;

#[derive(Debug, Deserialize)]
struct BoundaryResponse {
    #[serde(default)]
    elements: Vec<BoundaryElement>,
}

#[derive(Debug, Deserialize)]
struct BoundaryElement {
    #[serde(default)]
    geometry: Vec<GeometryPoint>,
}

#[derive(Debug, Deserialize)]
struct GeometryPoint {
    lat: f64,
    lon: f64,
}

/// Loads a region boundary onto a view.
///
/// Implemented by [`BoundaryMasker`] for live lookups; substitutable the
/// same way [`Geocode`](crate::geocode::Geocode) is, so a composition can
/// run against a fixed or failing boundary without HTTP.
pub trait BoundarySource {
    /// Fetches and applies the boundary, or returns the failure that
    /// aborted the masking step.
    fn load_boundary(
        &self,
        view: &ViewHandle,
        region: &str,
    ) -> impl Future<Output = Result<(), Error>> + Send;
}

/// One-shot loader for the administrative boundary and its mask.
#[derive(Debug, Clone)]
pub struct BoundaryMasker {
    client: reqwest::Client,
    endpoint: String,
}

impl BoundaryMasker {
    /// Creates a masker against the default endpoint.
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_endpoint(client, OVERPASS_ENDPOINT)
    }

    /// Creates a masker against a custom endpoint.
    pub fn with_endpoint(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Fetches the boundary for `region` and applies mask, outline, and
    /// bounds to the view.
    ///
    /// Fatal to the masking step only: on failure the view is left
    /// untouched and marker rendering is unaffected. No retries.
    pub async fn load_boundary(&self, view: &ViewHandle, region: &str) -> Result<(), Error> {
        let query = format!(
            "[out:json];relation[name='{}'][boundary=administrative];out geom;",
            quote_filter_value(region)
        );
        let response: BoundaryResponse = self
            .client
            .get(&self.endpoint)
            .query(&[("data", query.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let ring = boundary_ring(response, region)?;
        info!("loaded boundary for '{region}' with {} vertices", ring.len());
        apply_boundary(view, &ring, region)
    }
}

impl BoundarySource for BoundaryMasker {
    async fn load_boundary(&self, view: &ViewHandle, region: &str) -> Result<(), Error> {
        BoundaryMasker::load_boundary(self, view, region).await
    }
}

/// Escapes a value for interpolation into a single-quoted Overpass filter.
///
/// Region names are configuration input, so names like "Provence-Alpes-Côte
/// d'Azur" must not break out of the quoted string.
fn quote_filter_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Extracts the first element's geometry as the boundary ring.
///
/// The first element is taken as authoritative, even when a later element
/// also carries geometry; multi-ring regions are a future extension. An
/// element list or geometry that is empty is rejected.
fn boundary_ring(response: BoundaryResponse, region: &str) -> Result<Vec<LatLng>, Error> {
    let element = response
        .elements
        .into_iter()
        .next()
        .filter(|e| !e.geometry.is_empty())
        .ok_or_else(|| Error::EmptyBoundary {
            region: region.to_string(),
        })?;
    Ok(element
        .geometry
        .into_iter()
        .map(|p| LatLng::new(p.lat, p.lon))
        .collect())
}

/// Draws the mask and outline for a boundary ring and pins the view to its
/// bounding box. `fit_bounds` and `max_bounds` receive the identical value,
/// so the view cannot pan outside the region it was fitted to.
pub fn apply_boundary(view: &ViewHandle, ring: &[LatLng], region: &str) -> Result<(), Error> {
    let bounds = LatLngBounds::of(ring).ok_or_else(|| Error::EmptyBoundary {
        region: region.to_string(),
    })?;

    view.add_layer(Layer::Mask {
        outer: WORLD_RING.to_vec(),
        inner: ring.to_vec(),
        style: PolygonStyle {
            color: None,
            weight: None,
            fill_color: Some(MASK_FILL.to_string()),
            fill_opacity: MASK_FILL_OPACITY,
            stroke: false,
        },
    });
    view.add_layer(Layer::Outline {
        ring: ring.to_vec(),
        style: PolygonStyle {
            color: Some(OUTLINE_COLOR.to_string()),
            weight: Some(OUTLINE_WEIGHT),
            fill_color: None,
            fill_opacity: OUTLINE_FILL_OPACITY,
            stroke: true,
        },
    });
    view.fit_bounds(bounds);
    view.set_max_bounds(bounds);
    Ok(())
}

/// Ray-casting point-in-polygon test over a closed ring.
#[cfg(test)]
fn point_in_ring(ring: &[LatLng], p: LatLng) -> bool {
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.lon > p.lon) != (b.lon > p.lon)
            && p.lat < (b.lat - a.lat) * (p.lon - a.lon) / (b.lon - a.lon) + a.lat
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

//! City map composition with a boundary spotlight and geocoded points of interest.
//!
//! `citymask` builds an interactive city-map document around one
//! administrative region: everything outside the region's boundary is
//! dimmed by a world-sized mask polygon with the boundary cut out, the
//! boundary itself is drawn as a highlighted outline, and a curated set of
//! points of interest is geocoded by name and placed as color-coded
//! markers with tooltip and popup annotations. The output is a serializable
//! [`MapView`] document; drawing tiles and HTML is left to a frontend.
//!
//! # Quick Start
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Compose the built-in Vienna map and print it as JSON.
//! let config = citymask::MapConfig::builtin();
//! let document = citymask::compose(config).await?;
//! println!("{}", serde_json::to_string_pretty(&document)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Pipeline
//!
//! Two independent procedures run once against a shared [`ViewHandle`]:
//!
//! - [`BoundaryMasker`] fetches the region's boundary polygon from an
//!   Overpass-style service, derives the "world minus boundary" mask, and
//!   pins the view to the boundary's bounding box.
//! - [`PlaceRenderer`] geocodes each configured place name through a
//!   Nominatim-style service (scoped with a fixed locality suffix) and adds
//!   a marker per hit. One renderer invocation runs per category; the
//!   invocations are spawned concurrently and awaited together.
//!
//! A geocode miss skips its entry silently; a failed boundary fetch aborts
//! the masking step only. Neither stops marker rendering, and no call is
//! retried.
//!
//! # Configuration
//!
//! Place lists are data, not code: [`MapConfig`] deserializes from JSON,
//! and [`MapConfig::builtin`] returns the embedded Vienna dataset. A
//! custom resolver can be substituted through the [`Geocode`] trait, which
//! is how the tests avoid live HTTP.

#![warn(missing_docs)]

mod boundary;
mod config;
mod error;
mod geocode;
mod places;
mod types;
mod view;

pub use boundary::{apply_boundary, BoundaryMasker, BoundarySource, OVERPASS_ENDPOINT, WORLD_RING};
pub use config::{Category, ManualMarker, MapConfig, ViewConfig};
pub use error::Error;
pub use geocode::{Geocode, Geocoder, NOMINATIM_ENDPOINT};
pub use places::{add_manual_marker, coordinate_link, search_link, PlaceRenderer};
pub use types::{LatLng, LatLngBounds, Marker, PlaceEntry, Popup};
pub use view::{Layer, MapView, PolygonStyle, ViewHandle, OSM_ATTRIBUTION, OSM_TILE_URL};

use log::error;

/// Composes a complete map document from a configuration, using the live
/// Overpass and Nominatim endpoints.
///
/// Thin wrapper around [`compose_with`] that builds the shared HTTP client
/// and the default collaborators.
pub async fn compose(config: MapConfig) -> Result<MapView, Error> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("citymask/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let boundary = BoundaryMasker::new(client.clone());
    let geocoder = Geocoder::new(client, config.geocode_locality.clone());
    Ok(compose_with(config, boundary, geocoder).await)
}

/// Composes a map document with explicit collaborators.
///
/// Spawns the boundary-masking task and one place-rendering task per
/// category, places the manual markers, awaits every task, and returns a
/// snapshot of the finished document. A boundary failure is logged and the
/// composition continues without the mask; marker rendering is unaffected.
pub async fn compose_with<B, G>(config: MapConfig, boundary: B, geocoder: G) -> MapView
where
    B: BoundarySource + Send + 'static,
    G: Geocode + Clone + Send + Sync + 'static,
{
    let view = ViewHandle::new(MapView::new(
        config.view.center,
        config.view.zoom,
        config.view.min_zoom,
        config.view.max_zoom,
    ));

    let boundary_task = {
        let view = view.clone();
        let region = config.region.clone();
        tokio::spawn(async move { boundary.load_boundary(&view, &region).await })
    };

    let mut renders = Vec::with_capacity(config.categories.len());
    for category in config.categories {
        let renderer = PlaceRenderer::new(geocoder.clone(), config.link_locality.clone());
        let view = view.clone();
        renders.push(tokio::spawn(async move {
            renderer
                .render_places(&view, &category.places, &category.color)
                .await
        }));
    }

    for manual in &config.manual_markers {
        add_manual_marker(
            &view,
            manual.position,
            &manual.name,
            &manual.description,
            &manual.color,
        );
    }

    match boundary_task.await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => error!("boundary masking failed: {err}"),
        Err(err) => error!("boundary task aborted: {err}"),
    }
    for handle in renders {
        if let Err(err) = handle.await {
            error!("place rendering task aborted: {err}");
        }
    }

    view.snapshot()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Clone)]
    struct TableGeocoder(HashMap<&'static str, LatLng>);

    impl Geocode for TableGeocoder {
        async fn geocode(&self, name: &str) -> Option<LatLng> {
            self.0.get(name).copied()
        }
    }

    /// Boundary source whose service is unreachable.
    struct UnavailableBoundary;

    impl BoundarySource for UnavailableBoundary {
        async fn load_boundary(&self, _view: &ViewHandle, region: &str) -> Result<(), Error> {
            Err(Error::EmptyBoundary {
                region: region.to_string(),
            })
        }
    }

    /// Boundary source serving a fixed ring, no HTTP involved.
    struct FixedBoundary(Vec<LatLng>);

    impl BoundarySource for FixedBoundary {
        async fn load_boundary(&self, view: &ViewHandle, region: &str) -> Result<(), Error> {
            apply_boundary(view, &self.0, region)
        }
    }

    fn vienna_table() -> TableGeocoder {
        TableGeocoder(HashMap::from([
            ("Stephansdom", LatLng::new(48.20849, 16.37208)),
            ("Karlskirche", LatLng::new(48.19815, 16.37168)),
        ]))
    }

    fn test_config() -> MapConfig {
        MapConfig {
            region: "Wien".to_string(),
            geocode_locality: "Wien, Austria".to_string(),
            link_locality: "Vienna, Austria".to_string(),
            view: ViewConfig {
                center: LatLng::new(48.2085, 16.3721),
                zoom: 13,
                min_zoom: 11,
                max_zoom: 18,
            },
            categories: vec![
                Category {
                    name: "sights".to_string(),
                    color: "green".to_string(),
                    places: vec![
                        PlaceEntry::new("Stephansdom", "CHURCH, OPEN 6:00-22:00"),
                        PlaceEntry::new("NonexistentPlaceXYZ123", ""),
                    ],
                },
                Category {
                    name: "museums".to_string(),
                    color: "red".to_string(),
                    places: vec![PlaceEntry::new("Karlskirche", "")],
                },
            ],
            manual_markers: vec![ManualMarker {
                name: "HOSTEL".to_string(),
                description: String::new(),
                position: LatLng::new(48.198329, 16.332843),
                color: "yellow".to_string(),
            }],
        }
    }

    fn square_ring() -> Vec<LatLng> {
        vec![
            LatLng::new(48.1, 16.2),
            LatLng::new(48.1, 16.5),
            LatLng::new(48.3, 16.5),
            LatLng::new(48.3, 16.2),
        ]
    }

    #[tokio::test]
    async fn boundary_failure_does_not_affect_marker_rendering() {
        let doc = compose_with(test_config(), UnavailableBoundary, vienna_table()).await;

        // Both geocoded hits and the manual marker survive the dead boundary.
        assert_eq!(doc.markers.len(), 3);
        assert!(doc.markers.iter().any(|m| m.tooltip == "Stephansdom"));
        assert!(doc.markers.iter().any(|m| m.tooltip == "Karlskirche"));
        assert!(doc.markers.iter().any(|m| m.tooltip == "HOSTEL"));

        assert!(doc.layers.is_empty());
        assert_eq!(doc.fit_bounds, None);
        assert_eq!(doc.max_bounds, None);
    }

    #[tokio::test]
    async fn composition_awaits_every_task() {
        let doc = compose_with(test_config(), FixedBoundary(square_ring()), vienna_table()).await;

        // Mask and outline from the boundary task, pinned to its bounds.
        assert_eq!(doc.layers.len(), 2);
        let expected = LatLngBounds::of(&square_ring()).unwrap();
        assert_eq!(doc.fit_bounds, Some(expected));
        assert_eq!(doc.max_bounds, doc.fit_bounds);

        // One marker per hit across both categories, plus the manual one;
        // the miss is skipped.
        assert_eq!(doc.markers.len(), 3);
        let green = doc.markers.iter().find(|m| m.tooltip == "Stephansdom").unwrap();
        assert_eq!(green.color, "green");
        let red = doc.markers.iter().find(|m| m.tooltip == "Karlskirche").unwrap();
        assert_eq!(red.color, "red");
    }
}

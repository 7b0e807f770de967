//! The shared map document and the handle components draw onto.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use crate::types::{LatLng, LatLngBounds, Marker};

/// Default tile source for the base layer.
pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
/// Attribution string required by the default tile source.
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Style attributes for a polygon layer, mirroring the common subset of
/// Leaflet path options a frontend needs to reproduce the composition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolygonStyle {
    /// Stroke color, `None` when the stroke is disabled
    pub color: Option<String>,
    /// Stroke weight in pixels
    pub weight: Option<u32>,
    /// Fill color
    pub fill_color: Option<String>,
    /// Fill opacity in `[0, 1]`
    pub fill_opacity: f64,
    /// Whether the outline is drawn at all
    pub stroke: bool,
}

/// A polygon layer on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layer {
    /// Polygon-with-hole dimming everything outside the inner ring.
    Mask {
        /// Outer ring, the whole-world rectangle
        outer: Vec<LatLng>,
        /// Inner ring cut out of the fill, the boundary polygon
        inner: Vec<LatLng>,
        /// Opaque dark fill, no stroke
        style: PolygonStyle,
    },
    /// Simple polygon outline for visual reference.
    Outline {
        /// The boundary polygon
        ring: Vec<LatLng>,
        /// Thin, low-opacity stroke
        style: PolygonStyle,
    },
}

/// The composed map document.
///
/// Every rendering call appends to this structure; the finished document
/// serializes to JSON for a frontend to draw. Layers and markers are only
/// ever added, never removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    /// Initial view center
    pub center: LatLng,
    /// Initial zoom level
    pub zoom: u8,
    /// Minimum zoom the frontend should allow
    pub min_zoom: u8,
    /// Maximum zoom the frontend should allow
    pub max_zoom: u8,
    /// Tile URL template for the base layer
    pub tile_url: String,
    /// Attribution string for the base layer
    pub attribution: String,
    /// Polygon layers in draw order
    pub layers: Vec<Layer>,
    /// Point annotations in draw order
    pub markers: Vec<Marker>,
    /// Bounds the view was fitted to, if the boundary loaded
    pub fit_bounds: Option<LatLngBounds>,
    /// Bounds panning is clamped to, if the boundary loaded
    pub max_bounds: Option<LatLngBounds>,
}

impl MapView {
    /// Creates an empty document with the given initial frame and the
    /// OpenStreetMap base layer.
    pub fn new(center: LatLng, zoom: u8, min_zoom: u8, max_zoom: u8) -> Self {
        Self {
            center,
            zoom,
            min_zoom,
            max_zoom,
            tile_url: OSM_TILE_URL.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
            layers: Vec::new(),
            markers: Vec::new(),
            fit_bounds: None,
            max_bounds: None,
        }
    }
}

/// Cloneable handle to a shared [`MapView`].
///
/// The boundary masker and every place-renderer invocation receive a clone
/// of the same handle and draw onto the document additively. All mutation
/// goes through a mutex held only for the duration of a single append, so
/// concurrent tasks never observe a partially written layer.
#[derive(Debug, Clone)]
pub struct ViewHandle {
    inner: Arc<Mutex<MapView>>,
}

impl ViewHandle {
    /// Wraps a document in a shared handle.
    pub fn new(view: MapView) -> Self {
        Self {
            inner: Arc::new(Mutex::new(view)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MapView> {
        self.inner.lock().expect("map view lock poisoned")
    }

    /// Appends a polygon layer.
    pub fn add_layer(&self, layer: Layer) {
        self.lock().layers.push(layer);
    }

    /// Appends a marker.
    pub fn add_marker(&self, marker: Marker) {
        self.lock().markers.push(marker);
    }

    /// Records the bounds the frontend should fit the view to.
    pub fn fit_bounds(&self, bounds: LatLngBounds) {
        self.lock().fit_bounds = Some(bounds);
    }

    /// Records the bounds the frontend should clamp panning to.
    pub fn set_max_bounds(&self, bounds: LatLngBounds) {
        self.lock().max_bounds = Some(bounds);
    }

    /// Returns the number of markers currently in the document.
    pub fn marker_count(&self) -> usize {
        self.lock().markers.len()
    }

    /// Returns a point-in-time copy of the document.
    pub fn snapshot(&self) -> MapView {
        self.lock().clone()
    }
}

//! Core data structures for map composition.
//!
//! This module defines the fundamental types used throughout the library:
//!
//! - [`LatLng`] - Simple coordinate pair in decimal degrees
//! - [`LatLngBounds`] - Axis-aligned geographic bounding box
//! - [`PlaceEntry`] - A named point of interest awaiting geocoding
//! - [`Marker`] - A rendered point annotation with tooltip and popup

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};

/// A geographic coordinate pair in decimal degrees.
///
/// # Examples
///
/// ```
/// use citymask::LatLng;
///
/// let stephansplatz = LatLng::new(48.2085, 16.3721);
/// assert_eq!(stephansplatz.lat, 48.2085);
/// assert_eq!(stephansplatz.lon, 16.3721);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in decimal degrees (-90 to 90)
    pub lat: f64,
    /// Longitude in decimal degrees (-180 to 180)
    pub lon: f64,
}

impl LatLng {
    /// Constructs a new coordinate pair.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// An axis-aligned geographic bounding box.
///
/// Used both to fit the view to a boundary polygon and to clamp panning to
/// the same frame afterwards.
///
/// # Examples
///
/// ```
/// use citymask::{LatLng, LatLngBounds};
///
/// let ring = [
///     LatLng::new(48.1, 16.2),
///     LatLng::new(48.3, 16.2),
///     LatLng::new(48.3, 16.5),
/// ];
/// let bounds = LatLngBounds::of(&ring).unwrap();
/// assert!(bounds.contains(LatLng::new(48.2, 16.3)));
/// assert!(!bounds.contains(LatLng::new(47.0, 16.3)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    /// Southern latitude edge
    pub south: f64,
    /// Western longitude edge
    pub west: f64,
    /// Northern latitude edge
    pub north: f64,
    /// Eastern longitude edge
    pub east: f64,
}

impl LatLngBounds {
    /// Computes the bounding box of a point sequence, or `None` if it is empty.
    pub fn of(points: &[LatLng]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self {
            south: first.lat,
            west: first.lon,
            north: first.lat,
            east: first.lon,
        };
        for p in &points[1..] {
            bounds.south = bounds.south.min(p.lat);
            bounds.west = bounds.west.min(p.lon);
            bounds.north = bounds.north.max(p.lat);
            bounds.east = bounds.east.max(p.lon);
        }
        Some(bounds)
    }

    /// Returns true if the point lies within the box (edges inclusive).
    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south && p.lat <= self.north && p.lon >= self.west && p.lon <= self.east
    }
}

/// A point of interest identified by name, before geocoding.
///
/// Entries are static configuration data: defined at load time, never
/// mutated. The description may be empty, in which case the popup shows the
/// name and map link only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceEntry {
    /// Free-text place name resolved through the geocoding service
    pub name: String,
    /// Optional human-readable annotation shown in the popup
    #[serde(default)]
    pub description: String,
}

impl PlaceEntry {
    /// Constructs a new entry from a name and description.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Click-activated detail panel attached to a [`Marker`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    /// Heading, normally the place name
    pub title: String,
    /// Annotation text, omitted when the source entry had none
    pub description: Option<String>,
    /// External map search URL for the place
    pub link: String,
}

/// A visual point annotation on the map.
///
/// One marker is created per successfully geocoded [`PlaceEntry`] (or per
/// manually placed point) and persists for the life of the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Resolved coordinate the marker is anchored to
    pub position: LatLng,
    /// Category color, e.g. `"green"` or `"#ff0000"`
    pub color: String,
    /// Hover label, normally the place name
    pub tooltip: String,
    /// Click-activated detail panel
    pub popup: Popup,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_of_empty_slice_is_none() {
        assert!(LatLngBounds::of(&[]).is_none());
    }

    #[test]
    fn bounds_span_all_points() {
        let ring = [
            LatLng::new(48.2, 16.3),
            LatLng::new(48.1, 16.6),
            LatLng::new(48.35, 16.1),
        ];
        let bounds = LatLngBounds::of(&ring).unwrap();
        assert_eq!(bounds.south, 48.1);
        assert_eq!(bounds.north, 48.35);
        assert_eq!(bounds.west, 16.1);
        assert_eq!(bounds.east, 16.6);
        for p in ring {
            assert!(bounds.contains(p));
        }
    }
}

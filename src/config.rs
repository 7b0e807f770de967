//! Place-list and view configuration.
//!
//! The place lists are data, not code: they load from a JSON file given on
//! the command line, with a built-in Vienna dataset embedded in the binary
//! as the default.

use std::path::Path;

use serde::Deserialize;

use crate::error::Error;
use crate::types::{LatLng, PlaceEntry};

/// The built-in Vienna dataset.
static BUILTIN: &str = include_str!("../data/vienna.json");

/// Initial frame of the map view.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewConfig {
    /// Initial center
    pub center: LatLng,
    /// Initial zoom level
    pub zoom: u8,
    /// Minimum zoom the frontend should allow
    pub min_zoom: u8,
    /// Maximum zoom the frontend should allow
    pub max_zoom: u8,
}

/// A color-coded group of places rendered by one renderer invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    /// Category label, informational only
    pub name: String,
    /// Marker color shared by the whole category
    pub color: String,
    /// Entries geocoded and rendered in order
    pub places: Vec<PlaceEntry>,
}

/// A marker placed at a fixed coordinate, bypassing geocoding.
#[derive(Debug, Clone, Deserialize)]
pub struct ManualMarker {
    /// Tooltip and popup title
    pub name: String,
    /// Popup annotation, may be empty
    #[serde(default)]
    pub description: String,
    /// Fixed coordinate
    pub position: LatLng,
    /// Marker color
    pub color: String,
}

/// Complete input for one map composition.
#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    /// Administrative relation name for the boundary lookup, e.g. `"Wien"`
    pub region: String,
    /// Locality suffix appended to every geocode query, e.g. `"Wien, Austria"`
    pub geocode_locality: String,
    /// Locality literal appended to generated map links, e.g. `"Vienna, Austria"`
    pub link_locality: String,
    /// Initial view frame
    pub view: ViewConfig,
    /// Color-coded place groups
    pub categories: Vec<Category>,
    /// Fixed-coordinate markers
    #[serde(default)]
    pub manual_markers: Vec<ManualMarker>,
}

impl MapConfig {
    /// Loads a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let body = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Returns the embedded Vienna dataset.
    pub fn builtin() -> Self {
        serde_json::from_str(BUILTIN).expect("built-in map configuration is valid")
    }
}

//! Geocode-and-render loop for the curated place lists.

use log::{debug, info};

use crate::geocode::Geocode;
use crate::types::{LatLng, Marker, PlaceEntry, Popup};
use crate::view::ViewHandle;

/// Renders one category of places onto the shared view.
///
/// Each invocation owns its geocoder and processes its entries strictly in
/// order, awaiting every lookup before starting the next. Separate
/// invocations run as independent tasks; they only ever append to the view,
/// so no coordination is needed between them.
///
/// Rendering is deliberately not idempotent: calling
/// [`render_places`](Self::render_places) twice with the same entries
/// appends a second, independent marker set.
#[derive(Debug, Clone)]
pub struct PlaceRenderer<G> {
    geocoder: G,
    link_locality: String,
}

impl<G: Geocode> PlaceRenderer<G> {
    /// Creates a renderer. `link_locality` is the human-readable locality
    /// appended to generated map links, e.g. `"Vienna, Austria"`.
    pub fn new(geocoder: G, link_locality: impl Into<String>) -> Self {
        Self {
            geocoder,
            link_locality: link_locality.into(),
        }
    }

    /// Geocodes each entry and adds a marker for every hit.
    ///
    /// Misses are skipped silently and never abort the batch. Returns the
    /// number of markers created.
    pub async fn render_places(
        &self,
        view: &ViewHandle,
        entries: &[PlaceEntry],
        color: &str,
    ) -> usize {
        let mut placed = 0;
        for entry in entries {
            let Some(position) = self.geocoder.geocode(&entry.name).await else {
                debug!("skipping '{}': no geocode result", entry.name);
                continue;
            };
            let link = search_link(&entry.name, &self.link_locality);
            view.add_marker(place_marker(position, color, entry, link));
            placed += 1;
        }
        info!("placed {placed} of {} '{color}' markers", entries.len());
        placed
    }
}

/// Adds a marker at a fixed coordinate, bypassing geocoding entirely.
///
/// Used for points the geocoder cannot resolve; the map link carries the
/// literal coordinate pair instead of a name query.
pub fn add_manual_marker(
    view: &ViewHandle,
    position: LatLng,
    name: &str,
    description: &str,
    color: &str,
) {
    let entry = PlaceEntry::new(name, description);
    let link = coordinate_link(position);
    view.add_marker(place_marker(position, color, &entry, link));
}

fn place_marker(position: LatLng, color: &str, entry: &PlaceEntry, link: String) -> Marker {
    Marker {
        position,
        color: color.to_string(),
        tooltip: entry.name.clone(),
        popup: Popup {
            title: entry.name.clone(),
            description: (!entry.description.is_empty()).then(|| entry.description.clone()),
            link,
        },
    }
}

/// Builds a map search link for a named place.
///
/// # Examples
///
/// ```
/// let link = citymask::search_link("Stephansdom", "Vienna, Austria");
/// assert_eq!(
///     link,
///     "https://www.google.com/maps/search/?api=1&query=Stephansdom,+Vienna,+Austria"
/// );
/// ```
pub fn search_link(name: &str, locality: &str) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={},+{}",
        name.replace(' ', "+"),
        locality.replace(' ', "+")
    )
}

/// Builds a map search link for a literal coordinate pair.
pub fn coordinate_link(position: LatLng) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={},{}",
        position.lat, position.lon
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::view::MapView;

    /// Stub resolver backed by a fixed name table.
    struct TableGeocoder(HashMap<&'static str, LatLng>);

    impl Geocode for TableGeocoder {
        async fn geocode(&self, name: &str) -> Option<LatLng> {
            self.0.get(name).copied()
        }
    }

    fn vienna_table() -> TableGeocoder {
        TableGeocoder(HashMap::from([
            ("Stephansdom", LatLng::new(48.20849, 16.37208)),
            ("Karlskirche", LatLng::new(48.19815, 16.37168)),
        ]))
    }

    fn test_view() -> ViewHandle {
        ViewHandle::new(MapView::new(LatLng::new(48.2085, 16.3721), 13, 11, 18))
    }

    #[tokio::test]
    async fn one_marker_per_successful_geocode() {
        let view = test_view();
        let renderer = PlaceRenderer::new(vienna_table(), "Vienna, Austria");
        let entries = [
            PlaceEntry::new("Stephansdom", "CHURCH, OPEN 6:00-22:00"),
            PlaceEntry::new("Karlskirche", ""),
        ];

        let placed = renderer.render_places(&view, &entries, "green").await;
        assert_eq!(placed, 2);

        let doc = view.snapshot();
        assert_eq!(doc.markers.len(), 2);

        let first = &doc.markers[0];
        assert_eq!(first.position, LatLng::new(48.20849, 16.37208));
        assert_eq!(first.color, "green");
        assert_eq!(first.tooltip, "Stephansdom");
        assert_eq!(first.popup.title, "Stephansdom");
        assert_eq!(
            first.popup.description.as_deref(),
            Some("CHURCH, OPEN 6:00-22:00")
        );
        assert!(first.popup.link.contains("Stephansdom,+Vienna,+Austria"));

        // Empty descriptions are omitted from the popup.
        assert_eq!(doc.markers[1].popup.description, None);
    }

    #[tokio::test]
    async fn misses_are_skipped_without_error() {
        let view = test_view();
        let renderer = PlaceRenderer::new(vienna_table(), "Vienna, Austria");
        let entries = [PlaceEntry::new("NonexistentPlaceXYZ123", "")];

        let placed = renderer.render_places(&view, &entries, "red").await;
        assert_eq!(placed, 0);
        assert_eq!(view.marker_count(), 0);
    }

    #[tokio::test]
    async fn misses_do_not_stop_later_entries() {
        let view = test_view();
        let renderer = PlaceRenderer::new(vienna_table(), "Vienna, Austria");
        let entries = [
            PlaceEntry::new("NonexistentPlaceXYZ123", ""),
            PlaceEntry::new("Karlskirche", ""),
        ];

        assert_eq!(renderer.render_places(&view, &entries, "red").await, 1);
        assert_eq!(view.snapshot().markers[0].tooltip, "Karlskirche");
    }

    #[tokio::test]
    async fn rendering_twice_appends_a_second_marker_set() {
        let view = test_view();
        let renderer = PlaceRenderer::new(vienna_table(), "Vienna, Austria");
        let entries = [PlaceEntry::new("Stephansdom", "")];

        renderer.render_places(&view, &entries, "green").await;
        renderer.render_places(&view, &entries, "green").await;
        assert_eq!(view.marker_count(), 2);
    }

    #[test]
    fn manual_marker_bypasses_geocoding() {
        let view = test_view();
        add_manual_marker(
            &view,
            LatLng::new(48.198329, 16.332843),
            "HOSTEL",
            "",
            "yellow",
        );

        let doc = view.snapshot();
        assert_eq!(doc.markers.len(), 1);
        let marker = &doc.markers[0];
        assert_eq!(marker.position, LatLng::new(48.198329, 16.332843));
        assert_eq!(marker.color, "yellow");
        assert!(marker.popup.link.ends_with("query=48.198329,16.332843"));
    }

    #[test]
    fn search_link_replaces_spaces() {
        assert_eq!(
            search_link("Austrian Parliament Building", "Vienna, Austria"),
            "https://www.google.com/maps/search/?api=1&query=Austrian+Parliament+Building,+Vienna,+Austria"
        );
    }
}

//! Seams toward the two external display collaborators: the map-rendering
//! surface and the status presentation layer. The pipeline only ever talks
//! through these traits; the console implementations below log every call
//! so the binary runs headless end-to-end.

use geo::Coord;
use log::debug;

use crate::overlay::OverlayState;

/// The map-rendering surface the position pipeline pushes geometry into.
pub trait MapSurface {
    /// Recenters the view.
    fn set_center(&mut self, center: Coord<f64>);

    /// Current zoom level, read back for the one-way zoom ratchet.
    fn zoom(&self) -> f64;

    fn set_zoom(&mut self, zoom: f64);

    /// Moves the current-position marker.
    fn set_position(&mut self, position: Coord<f64>);

    /// Explicit redraw trigger; the surface strokes whatever overlay
    /// geometries are present.
    fn request_redraw(&mut self, overlay: &OverlayState);
}

/// The presentation layer of the status view: labeled elements with text,
/// a visual class and an optional link target.
pub trait StatusPanel {
    fn set_text(&mut self, id: &str, text: &str);

    fn set_class(&mut self, id: &str, class: &str);

    fn set_link(&mut self, id: &str, href: &str);
}

/// Log-backed map surface.
pub struct ConsoleMap {
    zoom: f64,
}

impl ConsoleMap {
    pub fn new(initial_zoom: f64) -> Self {
        Self { zoom: initial_zoom }
    }
}

impl MapSurface for ConsoleMap {
    fn set_center(&mut self, center: Coord<f64>) {
        debug!("map center -> ({:.3}, {:.3})", center.x, center.y);
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn set_zoom(&mut self, zoom: f64) {
        debug!("map zoom {} -> {}", self.zoom, zoom);
        self.zoom = zoom;
    }

    fn set_position(&mut self, position: Coord<f64>) {
        debug!("position marker -> ({:.3}, {:.3})", position.x, position.y);
    }

    fn request_redraw(&mut self, overlay: &OverlayState) {
        match (overlay.marker(), overlay.connector()) {
            (Some(marker), Some(line)) => debug!(
                "redraw: marker ({:.3}, {:.3}), connector ({:.3}, {:.3}) -> ({:.3}, {:.3})",
                marker.0.x, marker.0.y, line.start.x, line.start.y, line.end.x, line.end.y
            ),
            _ => debug!("redraw: no overlay geometries"),
        }
    }
}

/// Log-backed status panel.
#[derive(Default)]
pub struct ConsolePanel;

impl ConsolePanel {
    pub fn new() -> Self {
        Self
    }
}

impl StatusPanel for ConsolePanel {
    fn set_text(&mut self, id: &str, text: &str) {
        debug!("panel {} = {:?}", id, text);
    }

    fn set_class(&mut self, id: &str, class: &str) {
        debug!("panel {} class = {:?}", id, class);
    }

    fn set_link(&mut self, id: &str, href: &str) {
        debug!("panel {} href = {:?}", id, href);
    }
}

use geo::{Coord, EuclideanLength, Line, Point};

use crate::boundary::ClosestBoundary;

/// The two overlay geometries redrawn on every position tick: the closest
/// boundary vertex marker and the connector from the current position to
/// that vertex.
///
/// The render surface holds onto these geometries between frames, so a
/// successful update overwrites coordinates in place through the existing
/// allocations; the boxes are only created on the none-to-some transition
/// and dropped when a tick yields no boundary result.
#[derive(Debug, Default)]
pub struct OverlayState {
    marker: Option<Box<Point<f64>>>,
    connector: Option<Box<Line<f64>>>,
}

impl OverlayState {
    /// Builds the empty startup state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one tick's locate result.
    pub fn apply(&mut self, position: Coord<f64>, closest: Option<&ClosestBoundary>) {
        let Some(closest) = closest else {
            self.marker = None;
            self.connector = None;
            return;
        };

        match &mut self.marker {
            Some(marker) => marker.0 = closest.vertex,
            None => self.marker = Some(Box::new(Point(closest.vertex))),
        }

        match &mut self.connector {
            Some(connector) => {
                connector.start = position;
                connector.end = closest.vertex;
            }
            None => self.connector = Some(Box::new(Line::new(position, closest.vertex))),
        }
    }

    pub fn marker(&self) -> Option<&Point<f64>> {
        self.marker.as_deref()
    }

    pub fn connector(&self) -> Option<&Line<f64>> {
        self.connector.as_deref()
    }

    /// Euclidean length of the connector, when one exists.
    pub fn distance(&self) -> Option<f64> {
        self.connector
            .as_deref()
            .map(|line| line.euclidean_length())
    }

    /// Distance readout for the info display: "d = 12.34" or "d = n/a".
    pub fn distance_readout(&self) -> String {
        match self.distance() {
            Some(d) => format!("d = {d:.2}"),
            None => "d = n/a".to_string(),
        }
    }
}

#[cfg(test)]
mod test {
    use geo::{Coord, Line, Point};

    use super::OverlayState;
    use crate::boundary::ClosestBoundary;

    fn closest(x: f64, y: f64) -> ClosestBoundary {
        ClosestBoundary {
            feature_id: "p1".to_string(),
            vertex: Coord { x, y },
        }
    }

    #[test]
    fn starts_empty() {
        let state = OverlayState::new();
        assert!(state.marker().is_none());
        assert!(state.connector().is_none());
        assert_eq!(state.distance(), None);
        assert_eq!(state.distance_readout(), "d = n/a");
    }

    #[test]
    fn distance_of_three_four_five() {
        let mut state = OverlayState::new();
        state.apply(Coord { x: 0.0, y: 0.0 }, Some(&closest(3.0, 4.0)));

        assert_eq!(state.distance(), Some(5.0));
        assert_eq!(state.distance_readout(), "d = 5.00");
    }

    #[test]
    fn updates_in_place_across_ticks() {
        let mut state = OverlayState::new();

        state.apply(Coord { x: 0.0, y: 0.0 }, Some(&closest(3.0, 4.0)));
        let marker_ptr: *const Point<f64> = state.marker().unwrap();
        let connector_ptr: *const Line<f64> = state.connector().unwrap();

        state.apply(Coord { x: 1.0, y: 1.0 }, Some(&closest(7.0, 9.0)));

        assert_eq!(marker_ptr, state.marker().unwrap() as *const _);
        assert_eq!(connector_ptr, state.connector().unwrap() as *const _);
        assert_eq!(state.marker().unwrap().0, Coord { x: 7.0, y: 9.0 });
        assert_eq!(state.connector().unwrap().start, Coord { x: 1.0, y: 1.0 });
        assert_eq!(state.connector().unwrap().end, Coord { x: 7.0, y: 9.0 });
    }

    #[test]
    fn clears_when_no_boundary_found() {
        let mut state = OverlayState::new();
        state.apply(Coord { x: 0.0, y: 0.0 }, Some(&closest(3.0, 4.0)));
        state.apply(Coord { x: 0.0, y: 0.0 }, None);

        assert!(state.marker().is_none());
        assert!(state.connector().is_none());
        assert_eq!(state.distance_readout(), "d = n/a");
    }
}

use geo::Coord;

use crate::boundary::store::{BoundaryStore, ParcelFeature};

/// Result of a nearest-boundary query: the chosen feature and the closest
/// vertex of its outer ring.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosestBoundary {
    pub feature_id: String,
    pub vertex: Coord<f64>,
}

/// Finds the boundary point nearest to `position`.
///
/// The store's closest-feature query picks one feature for the whole
/// dataset; the chosen feature's outer-ring vertices are then treated as a
/// discrete point set and the closest vertex wins, first occurrence in
/// ring order on ties. This reproduces the vertex-only approximation of
/// the map overlay: true distance to the boundary would need
/// point-to-segment projection, which is intentionally not done here.
///
/// Returns `None` when the store holds no features.
pub fn locate(position: Coord<f64>, store: &BoundaryStore) -> Option<ClosestBoundary> {
    let feature = store.closest_feature(position)?;
    let vertex = closest_vertex(position, feature)?;

    Some(ClosestBoundary {
        feature_id: feature.id.clone(),
        vertex,
    })
}

fn closest_vertex(position: Coord<f64>, feature: &ParcelFeature) -> Option<Coord<f64>> {
    let mut best: Option<(f64, Coord<f64>)> = None;

    for &vertex in &feature.exterior {
        let dx = vertex.x - position.x;
        let dy = vertex.y - position.y;
        let d2 = dx * dx + dy * dy;

        // strict comparison keeps the first occurrence on ties
        match best {
            Some((best_d2, _)) if d2 >= best_d2 => {}
            _ => best = Some((d2, vertex)),
        }
    }

    best.map(|(_, vertex)| vertex)
}

#[cfg(test)]
mod test {
    use geo::Coord;

    use super::locate;
    use crate::boundary::store::{BoundaryStore, ParcelFeature};

    fn unit_square() -> BoundaryStore {
        BoundaryStore::new(vec![ParcelFeature {
            id: "p1".to_string(),
            exterior: vec![
                Coord { x: 0.0, y: 0.0 },
                Coord { x: 2.0, y: 0.0 },
                Coord { x: 2.0, y: 2.0 },
                Coord { x: 0.0, y: 2.0 },
                Coord { x: 0.0, y: 0.0 },
            ],
        }])
    }

    #[test]
    fn empty_store_yields_none() {
        let store = BoundaryStore::empty();
        assert!(locate(Coord { x: 1.0, y: 1.0 }, &store).is_none());
    }

    #[test]
    fn repeated_queries_are_identical() {
        let store = unit_square();
        let position = Coord { x: 3.0, y: 0.5 };

        let first = locate(position, &store).unwrap();
        let second = locate(position, &store).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.feature_id, "p1");
        assert_eq!(first.vertex, Coord { x: 2.0, y: 0.0 });
    }

    #[test]
    fn tie_falls_to_first_ring_vertex() {
        let store = unit_square();

        // (0,0) and (2,0) are equidistant; ring order decides
        let hit = locate(Coord { x: 1.0, y: -1.0 }, &store).unwrap();
        assert_eq!(hit.vertex, Coord { x: 0.0, y: 0.0 });
    }

    #[test]
    fn vertices_only_not_segments() {
        let store = unit_square();

        // the true closest boundary point would be (1, 0) on the bottom
        // edge; the vertex-only search lands on a corner instead
        let hit = locate(Coord { x: 1.0, y: -0.1 }, &store).unwrap();
        assert_eq!(hit.vertex, Coord { x: 0.0, y: 0.0 });
    }
}

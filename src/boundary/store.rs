use std::fs;

use geo::Coord;
use log::{debug, info};
use rstar::{AABB, Envelope, PointDistance, RTree, RTreeObject};
use serde::Deserialize;

use crate::error::Result;

/// One cadastral parcel polygon, reduced to its outer ring.
///
/// Coordinates are in the local projected system. Immutable after load;
/// holes and any rings past the first are dropped by the loader.
#[derive(Debug, Clone)]
pub struct ParcelFeature {
    pub id: String,
    pub exterior: Vec<Coord<f64>>,
}

/// Envelope wrapper for R-tree indexing of parcel features.
#[derive(Debug, Clone)]
struct ParcelEnvelope {
    index: usize,
    aabb: AABB<[f64; 2]>,
}

impl RTreeObject for ParcelEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.aabb
    }
}

impl PointDistance for ParcelEnvelope {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        self.aabb.distance_2(point)
    }
}

/// Loaded set of parcel features with a whole-dataset closest-feature query.
#[derive(Debug)]
pub struct BoundaryStore {
    features: Vec<ParcelFeature>,
    tree: RTree<ParcelEnvelope>,
}

impl BoundaryStore {
    /// Builds a store holding no features; every query returns `None`.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Builds a store over the given features.
    pub fn new(features: Vec<ParcelFeature>) -> Self {
        let envelopes = features
            .iter()
            .enumerate()
            .filter_map(|(index, feature)| {
                if feature.exterior.is_empty() {
                    return None;
                }

                let mut lower = [f64::INFINITY, f64::INFINITY];
                let mut upper = [f64::NEG_INFINITY, f64::NEG_INFINITY];

                for c in &feature.exterior {
                    lower[0] = lower[0].min(c.x);
                    lower[1] = lower[1].min(c.y);
                    upper[0] = upper[0].max(c.x);
                    upper[1] = upper[1].max(c.y);
                }

                Some(ParcelEnvelope {
                    index,
                    aabb: AABB::from_corners(lower, upper),
                })
            })
            .collect();

        Self {
            features,
            tree: RTree::bulk_load(envelopes),
        }
    }

    /// Loads a GeoJSON FeatureCollection of parcel polygons.
    pub fn from_geojson_file(path: &str) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let store = Self::from_geojson(&text)?;
        info!("loaded {} parcel feature(s) from \"{}\"", store.len(), path);
        Ok(store)
    }

    /// Parses a GeoJSON FeatureCollection. Non-polygon geometries and
    /// malformed coordinate entries are skipped, not fatal.
    pub fn from_geojson(text: &str) -> Result<Self> {
        let collection: FeatureCollection = serde_json::from_str(text)?;

        let mut features = Vec::with_capacity(collection.features.len());

        for (index, feature) in collection.features.into_iter().enumerate() {
            if feature.geometry.ty != "Polygon" {
                debug!(
                    "skipping feature #{}: unsupported geometry \"{}\"",
                    index, feature.geometry.ty
                );
                continue;
            }

            // first ring only: the outer boundary
            let Some(outer) = feature
                .geometry
                .coordinates
                .as_array()
                .and_then(|rings| rings.first())
                .and_then(|ring| ring.as_array())
            else {
                debug!("skipping feature #{}: no outer ring", index);
                continue;
            };

            let exterior: Vec<Coord<f64>> = outer
                .iter()
                .filter_map(|entry| {
                    let pair = entry.as_array()?;
                    let x = pair.first()?.as_f64()?;
                    let y = pair.get(1)?.as_f64()?;
                    Some(Coord { x, y })
                })
                .collect();

            if exterior.is_empty() {
                debug!("skipping feature #{}: empty outer ring", index);
                continue;
            }

            features.push(ParcelFeature {
                id: feature.label(index),
                exterior,
            });
        }

        Ok(Self::new(features))
    }

    /// Number of loaded features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Whole-dataset closest-feature query: the feature whose envelope is
    /// nearest to the coordinate. Ties fall to the tree's traversal order.
    pub fn closest_feature(&self, coord: Coord<f64>) -> Option<&ParcelFeature> {
        let hit = self.tree.nearest_neighbor(&[coord.x, coord.y])?;
        Some(&self.features[hit.index])
    }
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    id: Option<serde_json::Value>,
    geometry: Geometry,
    #[serde(default)]
    properties: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    ty: String,
    coordinates: serde_json::Value,
}

impl Feature {
    /// Feature label: the GeoJSON `id` member, else an `id` property,
    /// else the position in the collection.
    fn label(&self, index: usize) -> String {
        if let Some(id) = &self.id {
            return json_label(id);
        }

        if let Some(id) = self
            .properties
            .as_ref()
            .and_then(|properties| properties.get("id"))
        {
            return json_label(id);
        }

        index.to_string()
    }
}

fn json_label(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

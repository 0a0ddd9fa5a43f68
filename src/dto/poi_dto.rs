use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Overpass `[out:json]` response envelope.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub element_type: String,
    pub id: i64,
    pub lon: Option<f64>,
    pub lat: Option<f64>,
    /// Precomputed centroid for area features (`out center`).
    pub center: Option<OverpassCenter>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverpassCenter {
    pub lon: f64,
    pub lat: f64,
}

impl OverpassElement {
    /// Composite identity used for deduplication across query fragments.
    pub fn composite_key(&self) -> String {
        format!("{}/{}", self.element_type, self.id)
    }

    /// Representative point in internal (lon, lat) order: the element's own
    /// coordinate, else its center. Area features without either are useless
    /// to the map and get dropped by the caller.
    pub fn representative_point(&self) -> Option<(f64, f64)> {
        if let (Some(lon), Some(lat)) = (self.lon, self.lat) {
            return Some((lon, lat));
        }
        self.center.as_ref().map(|c| (c.lon, c.lat))
    }
}

/// GeoJSON-style output for the map UI.
#[derive(Debug, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub collection_type: &'static str,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            collection_type: "FeatureCollection",
            features,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: &'static str,
    pub geometry: PointGeometry,
    pub properties: FeatureProperties,
}

#[derive(Debug, Serialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub geometry_type: &'static str,
    /// `[lon, lat]`, GeoJSON order.
    pub coordinates: [f64; 2],
}

#[derive(Debug, Serialize)]
pub struct FeatureProperties {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub poi_type: String,
    pub tags: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn element_prefers_own_coordinate_over_center() {
        let element: OverpassElement = serde_json::from_value(json!({
            "type": "node",
            "id": 42,
            "lat": 53.35,
            "lon": -6.26,
            "center": { "lat": 0.0, "lon": 0.0 },
            "tags": { "amenity": "fuel" }
        }))
        .unwrap();

        assert_eq!(element.representative_point(), Some((-6.26, 53.35)));
        assert_eq!(element.composite_key(), "node/42");
    }

    #[test]
    fn way_falls_back_to_center() {
        let element: OverpassElement = serde_json::from_value(json!({
            "type": "way",
            "id": 7,
            "center": { "lat": 53.4, "lon": -6.3 }
        }))
        .unwrap();

        assert_eq!(element.representative_point(), Some((-6.3, 53.4)));
    }

    #[test]
    fn element_without_coordinates_has_no_point() {
        let element: OverpassElement = serde_json::from_value(json!({
            "type": "relation",
            "id": 9
        }))
        .unwrap();

        assert_eq!(element.representative_point(), None);
    }
}

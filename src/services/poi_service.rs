//! POI aggregation along a stored route
//!
//! Samples the route geometry down to a bounded number of points, issues one
//! batched Overpass query covering every (point, category) pair, then
//! deduplicates and normalizes the result into a feature collection for the
//! map UI.

use std::collections::HashSet;

use crate::dto::poi_dto::{
    Feature, FeatureCollection, FeatureProperties, OverpassElement, PointGeometry,
};
use crate::services::overpass_service::OverpassService;
use crate::utils::errors::AppError;
use crate::utils::geometry::LonLat;

/// Upper bound on sampled route points per aggregation call; keeps the
/// Overpass query bounded for long routes.
pub const MAX_SAMPLES: usize = 25;

pub const DEFAULT_RADIUS_M: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoiType {
    Fuel,
    Toll,
}

impl PoiType {
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "fuel" => Some(PoiType::Fuel),
            "toll" => Some(PoiType::Toll),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PoiType::Fuel => "fuel",
            PoiType::Toll => "toll",
        }
    }

    /// Overpass QL fragments for one sampled point. Fuel stations can be
    /// mapped as nodes or ways; toll barriers are nodes.
    fn query_fragments(&self, radius_m: u32, point: &LonLat) -> Vec<String> {
        let (lon, lat) = point;
        match self {
            PoiType::Fuel => vec![
                format!("node(around:{},{},{})[\"amenity\"=\"fuel\"];", radius_m, lat, lon),
                format!("way(around:{},{},{})[\"amenity\"=\"fuel\"];", radius_m, lat, lon),
            ],
            PoiType::Toll => vec![format!(
                "node(around:{},{},{})[\"barrier\"=\"toll_booth\"];",
                radius_m, lat, lon
            )],
        }
    }
}

/// Parse the `types` query parameter. Unknown keys are dropped; an empty
/// result is a validation failure, not an empty answer.
pub fn parse_poi_types(raw: &str) -> Result<Vec<PoiType>, AppError> {
    let mut types = Vec::new();
    for key in raw.split(',') {
        if key.trim().is_empty() {
            continue;
        }
        if let Some(poi_type) = PoiType::from_key(key) {
            if !types.contains(&poi_type) {
                types.push(poi_type);
            }
        }
    }

    if types.is_empty() {
        return Err(AppError::Validation("no valid POI types".to_string()));
    }
    Ok(types)
}

/// Sample at most `MAX_SAMPLES` points from the path: every `step`-th point
/// starting at index 0, with `step = ceil(len / MAX_SAMPLES)`. Short paths
/// pass through untouched.
pub fn sample_path(path: &[LonLat]) -> Vec<LonLat> {
    if path.is_empty() {
        return Vec::new();
    }
    let step = path.len().div_ceil(MAX_SAMPLES);
    path.iter().step_by(step).copied().collect()
}

/// Assemble the single batched Overpass query for all sampled points and
/// requested categories.
pub fn build_query(points: &[LonLat], radius_m: u32, types: &[PoiType]) -> String {
    let mut query = String::from("[out:json][timeout:25];(");
    for point in points {
        for poi_type in types {
            for fragment in poi_type.query_fragments(radius_m, point) {
                query.push_str(&fragment);
            }
        }
    }
    query.push_str(");out center;");
    query
}

fn title_case(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn categorize(element: &OverpassElement) -> String {
    if element.tags.get("amenity").map(String::as_str) == Some("fuel") {
        return "fuel".to_string();
    }
    if element.tags.get("barrier").map(String::as_str) == Some("toll_booth") {
        return "toll".to_string();
    }
    if let Some(shop) = element.tags.get("shop") {
        return shop.clone();
    }
    "poi".to_string()
}

/// Deduplicate by `type/id` (first occurrence wins), resolve a representative
/// point and a display name, and drop elements with no usable coordinate.
pub fn elements_to_features(elements: Vec<OverpassElement>) -> Vec<Feature> {
    let mut seen = HashSet::new();
    let mut features = Vec::new();

    for element in elements {
        let key = element.composite_key();
        if !seen.insert(key.clone()) {
            continue;
        }

        let Some((lon, lat)) = element.representative_point() else {
            continue;
        };

        let category = categorize(&element);
        let name = element
            .tags
            .get("name")
            .cloned()
            .unwrap_or_else(|| title_case(&category));

        features.push(Feature {
            feature_type: "Feature",
            geometry: PointGeometry {
                geometry_type: "Point",
                coordinates: [lon, lat],
            },
            properties: FeatureProperties {
                id: key,
                name,
                poi_type: category,
                tags: element.tags,
            },
        });
    }

    features
}

pub struct PoiService {
    overpass: OverpassService,
}

impl PoiService {
    pub fn new(overpass_url: String) -> Result<Self, AppError> {
        Ok(Self {
            overpass: OverpassService::new(overpass_url)?,
        })
    }

    pub async fn pois_along_route(
        &self,
        path: &[LonLat],
        radius_m: u32,
        types: &[PoiType],
    ) -> Result<FeatureCollection, AppError> {
        let sampled = sample_path(path);
        let query = build_query(&sampled, radius_m, types);

        let response = self.overpass.query(&query).await?;
        let features = elements_to_features(response.elements);

        log::info!(
            "📌 POI aggregation: {} sampled points, {} feature(s)",
            sampled.len(),
            features.len()
        );

        Ok(FeatureCollection::new(features))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path_of(n: usize) -> Vec<LonLat> {
        (0..n).map(|i| (i as f64, i as f64)).collect()
    }

    #[test]
    fn hundred_points_sample_to_twenty_five() {
        let sampled = sample_path(&path_of(100));
        // step = ceil(100 / 25) = 4 -> indices 0, 4, 8, ..., 96
        assert_eq!(sampled.len(), 25);
        assert_eq!(sampled[0], (0.0, 0.0));
        assert_eq!(sampled[1], (4.0, 4.0));
        assert_eq!(sampled[24], (96.0, 96.0));
    }

    #[test]
    fn short_path_passes_through() {
        let sampled = sample_path(&path_of(10));
        assert_eq!(sampled, path_of(10));
    }

    #[test]
    fn sample_never_exceeds_max() {
        for n in [1, 25, 26, 49, 50, 51, 1000] {
            assert!(sample_path(&path_of(n)).len() <= MAX_SAMPLES, "n = {}", n);
        }
    }

    #[test]
    fn parse_types_drops_unknown_and_duplicates() {
        let types = parse_poi_types("fuel,coffee,toll,fuel").unwrap();
        assert_eq!(types, vec![PoiType::Fuel, PoiType::Toll]);
    }

    #[test]
    fn parse_types_rejects_empty_result() {
        assert!(matches!(
            parse_poi_types("coffee,,"),
            Err(AppError::Validation(_))
        ));
        assert!(parse_poi_types("").is_err());
    }

    #[test]
    fn query_contains_fragments_per_point_and_type() {
        let points = vec![(-6.26, 53.35)];
        let query = build_query(&points, 2000, &[PoiType::Fuel, PoiType::Toll]);
        assert!(query.starts_with("[out:json]"));
        assert!(query.contains("node(around:2000,53.35,-6.26)[\"amenity\"=\"fuel\"];"));
        assert!(query.contains("way(around:2000,53.35,-6.26)[\"amenity\"=\"fuel\"];"));
        assert!(query.contains("node(around:2000,53.35,-6.26)[\"barrier\"=\"toll_booth\"];"));
        assert!(query.ends_with(");out center;"));
    }

    fn element(value: serde_json::Value) -> OverpassElement {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn duplicate_composite_keys_yield_one_feature() {
        let elements = vec![
            element(json!({"type": "node", "id": 1, "lat": 53.0, "lon": -6.0,
                           "tags": {"amenity": "fuel", "name": "Circle K"}})),
            element(json!({"type": "node", "id": 1, "lat": 53.0, "lon": -6.0,
                           "tags": {"amenity": "fuel", "name": "Circle K"}})),
            element(json!({"type": "way", "id": 1, "center": {"lat": 53.1, "lon": -6.1},
                           "tags": {"amenity": "fuel"}})),
        ];

        let features = elements_to_features(elements);
        // node/1 deduplicated; way/1 is a different composite key.
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].properties.id, "node/1");
        assert_eq!(features[1].properties.id, "way/1");
    }

    #[test]
    fn feature_geometry_is_lon_lat() {
        let features = elements_to_features(vec![element(
            json!({"type": "node", "id": 2, "lat": 53.35, "lon": -6.26,
                   "tags": {"barrier": "toll_booth"}}),
        )]);
        assert_eq!(features[0].geometry.coordinates, [-6.26, 53.35]);
        assert_eq!(features[0].properties.poi_type, "toll");
        // No name tag: falls back to the title-cased category.
        assert_eq!(features[0].properties.name, "Toll");
    }

    #[test]
    fn shop_tag_wins_over_generic_label() {
        let features = elements_to_features(vec![element(
            json!({"type": "node", "id": 3, "lat": 53.0, "lon": -6.0,
                   "tags": {"shop": "convenience"}}),
        )]);
        assert_eq!(features[0].properties.poi_type, "convenience");
        assert_eq!(features[0].properties.name, "Convenience");
    }

    #[test]
    fn elements_without_coordinates_are_dropped() {
        let features = elements_to_features(vec![element(
            json!({"type": "relation", "id": 4, "tags": {"amenity": "fuel"}}),
        )]);
        assert!(features.is_empty());
    }
}

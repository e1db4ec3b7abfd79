use crate::coast::CoastalPoints;
use crate::map::HazardLayer;
use anyhow::{Context, Result};
use geojson::{GeoJson, Geometry, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Hazard-line layer file inside the data directory.
pub const HAZARD_LINES_FILE: &str = "subsidence_lines.json";
/// Coastal sample point file, `<lon> <lat>` per line.
pub const COASTAL_POINTS_FILE: &str = "coastal_points.txt";

/// Load the hazard layer and the coastal point set. Either load may
/// fail independently; each failure is logged and degrades that
/// feature (empty layer = degenerate ramp and no proximity hits, empty
/// point set = click popups disabled) instead of aborting.
pub fn load_all(data_dir: &Path) -> (HazardLayer, CoastalPoints) {
    let layer = match load_hazard_layer(&data_dir.join(HAZARD_LINES_FILE)) {
        Ok(layer) => layer,
        Err(e) => {
            eprintln!("Warning: failed to load {}: {:#}", HAZARD_LINES_FILE, e);
            HazardLayer::new()
        }
    };

    let points = match load_coastal_points(&data_dir.join(COASTAL_POINTS_FILE)) {
        Ok(points) => points,
        Err(e) => {
            eprintln!("Warning: failed to load {}: {:#}", COASTAL_POINTS_FILE, e);
            CoastalPoints::default()
        }
    };

    (layer, points)
}

/// Load hazard-line features from GeoJSON. Numeric feature properties
/// become the per-field probability attributes the choropleth and the
/// statistics scan read.
pub fn load_hazard_layer(path: &Path) -> Result<HazardLayer> {
    let mut bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let geojson: GeoJson = simd_json::serde::from_slice(&mut bytes)
        .with_context(|| format!("parsing {}", path.display()))?;

    let mut layer = HazardLayer::new();
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in fc.features {
                let attrs = numeric_attrs(feature.properties.as_ref());
                if let Some(geometry) = feature.geometry {
                    add_geometry_lines(&mut layer, &geometry, &attrs);
                }
            }
        }
        GeoJson::Feature(f) => {
            let attrs = numeric_attrs(f.properties.as_ref());
            if let Some(geometry) = f.geometry {
                add_geometry_lines(&mut layer, &geometry, &attrs);
            }
        }
        GeoJson::Geometry(geometry) => {
            add_geometry_lines(&mut layer, &geometry, &HashMap::new());
        }
    }
    Ok(layer)
}

/// Load the coastal sample points. Order in the file is the identity
/// the result images are keyed by, so it is preserved exactly.
pub fn load_coastal_points(path: &Path) -> Result<CoastalPoints> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(CoastalPoints::from_text(&text))
}

fn numeric_attrs(props: Option<&geojson::JsonObject>) -> HashMap<String, f64> {
    let mut attrs = HashMap::new();
    if let Some(props) = props {
        for (key, value) in props {
            if let Some(v) = value.as_f64() {
                attrs.insert(key.clone(), v);
            }
        }
    }
    attrs
}

/// Positions with fewer than two elements are skipped rather than
/// panicking the loader.
fn to_line(coords: &[Vec<f64>]) -> Vec<(f64, f64)> {
    coords
        .iter()
        .filter_map(|c| match c.as_slice() {
            [lon, lat, ..] => Some((*lon, *lat)),
            _ => None,
        })
        .collect()
}

fn add_geometry_lines(layer: &mut HazardLayer, geometry: &Geometry, attrs: &HashMap<String, f64>) {
    match &geometry.value {
        Value::LineString(coords) => {
            layer.add_line(to_line(coords), attrs.clone());
        }
        Value::MultiLineString(lines) => {
            for coords in lines {
                layer.add_line(to_line(coords), attrs.clone());
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                add_geometry_lines(layer, g, attrs);
            }
        }
        // The hazard service serves line features only.
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_collection_becomes_hazard_lines() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"bo_10_50": 12.5, "name": "segment a"},
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[-124.2, 40.0], [-124.1, 40.5]]
                    }
                },
                {
                    "type": "Feature",
                    "properties": {"bo_10_50": 30},
                    "geometry": {
                        "type": "MultiLineString",
                        "coordinates": [
                            [[-124.1, 40.5], [-124.2, 41.0]],
                            [[-124.2, 41.0], [-124.3, 41.5]]
                        ]
                    }
                }
            ]
        }"#;

        let mut bytes = raw.as_bytes().to_vec();
        let geojson: GeoJson = simd_json::serde::from_slice(&mut bytes).unwrap();
        let mut layer = HazardLayer::new();
        if let GeoJson::FeatureCollection(fc) = geojson {
            for feature in fc.features {
                let attrs = numeric_attrs(feature.properties.as_ref());
                if let Some(geometry) = feature.geometry {
                    add_geometry_lines(&mut layer, &geometry, &attrs);
                }
            }
        }

        assert_eq!(layer.lines.len(), 3);
        assert_eq!(layer.lines[0].attrs.get("bo_10_50"), Some(&12.5));
        // Non-numeric properties are dropped.
        assert!(!layer.lines[0].attrs.contains_key("name"));
        assert_eq!(layer.lines[1].attrs.get("bo_10_50"), Some(&30.0));
        assert_eq!(layer.lines[0].path[0], (-124.2, 40.0));
    }

    #[test]
    fn short_positions_are_skipped_without_panicking() {
        let raw = r#"{
            "type": "Feature",
            "properties": {"bo_10_50": 12.5},
            "geometry": {
                "type": "LineString",
                "coordinates": [[-124.2, 40.0], [-124.1], [], [-124.1, 40.5]]
            }
        }"#;

        let mut bytes = raw.as_bytes().to_vec();
        let geojson: GeoJson = simd_json::serde::from_slice(&mut bytes).unwrap();
        let mut layer = HazardLayer::new();
        if let GeoJson::Feature(f) = geojson {
            let attrs = numeric_attrs(f.properties.as_ref());
            if let Some(geometry) = f.geometry {
                add_geometry_lines(&mut layer, &geometry, &attrs);
            }
        }

        assert_eq!(layer.lines.len(), 1);
        assert_eq!(
            layer.lines[0].path,
            vec![(-124.2, 40.0), (-124.1, 40.5)]
        );
    }

    #[test]
    fn missing_files_degrade_to_empty_data() {
        let (layer, points) = load_all(Path::new("/nonexistent"));
        assert!(!layer.has_data());
        assert!(points.is_empty());
    }
}

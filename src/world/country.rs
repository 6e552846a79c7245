use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::Value;

use crate::error::{DashError, Result};

/// Code properties tried after the configured one.
const CODE_FALLBACKS: &[&str] = &["ISO_A2", "iso_a2", "ISO2"];
const NAME_PROPERTIES: &[&str] = &["name", "NAME", "ADMIN"];

/// One country boundary feature.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryFeature {
    /// Upper-case ISO code, `None` when the feature carries no usable code.
    pub code: Option<String>,
    pub name: String,
    pub shape: MultiPolygon<f64>,
}

fn property_str<'a>(properties: &'a Value, key: &str) -> Option<&'a str> {
    properties.get(key)?.as_str().map(str::trim)
}

fn read_code(properties: &Value, code_property: &str) -> Option<String> {
    std::iter::once(code_property)
        .chain(CODE_FALLBACKS.iter().copied())
        .find_map(|key| property_str(properties, key))
        .filter(|code| !code.is_empty() && *code != "-99")
        .map(str::to_ascii_uppercase)
}

fn read_name(properties: &Value) -> Option<String> {
    NAME_PROPERTIES.iter()
        .find_map(|key| property_str(properties, key))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Parse a GeoJSON FeatureCollection of country boundaries.
/// Features with `Polygon` or `MultiPolygon` geometry are kept; others are skipped.
pub fn parse_boundaries(bytes: &[u8], code_property: &str) -> Result<Vec<CountryFeature>> {
    let value: Value = serde_json::from_slice(bytes)?;
    let features = value["features"].as_array()
        .ok_or_else(|| DashError::Geometry("boundary file has no \"features\" array".into()))?;

    let mut countries = Vec::with_capacity(features.len());
    for (idx, feature) in features.iter().enumerate() {
        let geometry = &feature["geometry"];
        let shape = match geometry["type"].as_str() {
            Some("Polygon") => MultiPolygon(vec![parse_polygon(&geometry["coordinates"], idx)?]),
            Some("MultiPolygon") => parse_multipolygon(&geometry["coordinates"], idx)?,
            _ => continue,
        };

        let properties = &feature["properties"];
        let code = read_code(properties, code_property);
        let name = read_name(properties)
            .or_else(|| code.clone())
            .unwrap_or_else(|| format!("feature {idx}"));

        countries.push(CountryFeature { code, name, shape });
    }
    Ok(countries)
}

/// Standard GeoJSON MultiPolygon coordinates: [polygon, ...].
fn parse_multipolygon(coords: &Value, idx: usize) -> Result<MultiPolygon<f64>> {
    let polygons = coords.as_array()
        .ok_or_else(|| invalid(idx, "MultiPolygon coordinates must be an array"))?;
    polygons.iter()
        .map(|p| parse_polygon(p, idx))
        .collect::<Result<Vec<_>>>()
        .map(MultiPolygon)
}

/// Standard GeoJSON Polygon coordinates: [exterior, hole, ...].
fn parse_polygon(coords: &Value, idx: usize) -> Result<Polygon<f64>> {
    let rings = coords.as_array()
        .ok_or_else(|| invalid(idx, "Polygon coordinates must be an array"))?;
    let (exterior, interiors) = rings.split_first()
        .ok_or_else(|| invalid(idx, "Polygon is missing its exterior ring"))?;

    let exterior = parse_ring(exterior, idx)?;
    let interiors = interiors.iter()
        .map(|r| parse_ring(r, idx))
        .collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

/// A ring: [[x, y], [x, y], ...]. Closed if the file left it open.
fn parse_ring(coords: &Value, idx: usize) -> Result<LineString<f64>> {
    let pairs = coords.as_array()
        .ok_or_else(|| invalid(idx, "ring must be an array of positions"))?;

    let mut points = Vec::with_capacity(pairs.len() + 1);
    for pair in pairs {
        let x = pair.get(0).and_then(Value::as_f64);
        let y = pair.get(1).and_then(Value::as_f64);
        match (x, y) {
            (Some(x), Some(y)) => points.push(Coord { x, y }),
            _ => return Err(invalid(idx, "position must hold two numbers")),
        }
    }

    if points.first() != points.last() {
        if let Some(&first) = points.first() { points.push(first) }
    }
    Ok(LineString(points))
}

fn invalid(idx: usize, msg: &str) -> DashError {
    DashError::Geometry(format!("feature {idx}: {msg}"))
}

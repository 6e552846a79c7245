use std::io::Write;

use geo::{BoundingRect, Contains, Coord, Point, Rect};
use rstar::{RTree, RTreeObject, AABB};
use serde::Serialize;
use tracing::debug;

use crate::config::WorldConfig;
use crate::error::{DashError, Result};
use crate::render::{escape_xml, multipolygon_to_path, ramp_color, Projection, SvgWriter, HIGHLIGHT, NO_DATA_GRAY};
use crate::source::ChartSource;
use crate::world::{join_usage, parse_boundaries, read_usage_csv, CountryFeature, UsageTable, UsageValue};

const MAP_CSS: &str = r#"    .country { stroke: #111827; stroke-width: 0.5; fill-opacity: 0.85; }
    .country.hover { stroke-width: 1.5; fill-opacity: 1; }"#;

/// Tooltip offset from the pointer, in pixels.
const TOOLTIP_DX: f64 = 10.0;
const TOOLTIP_DY: f64 = -15.0;

/// Bounding box of one country, keyed by its index in the feature list.
#[derive(Debug, Clone)]
struct CountryEnvelope {
    idx: usize,
    bbox: Rect<f64>,
}

impl RTreeObject for CountryEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min().into(), self.bbox.max().into())
    }
}

/// Country boundaries joined with per-country usage counts.
#[derive(Debug)]
pub struct WorldMap {
    countries: Vec<CountryFeature>,
    values: Vec<UsageValue>,
    index: RTree<CountryEnvelope>,
    bounds: Option<Rect<f64>>,
}

impl WorldMap {
    pub fn new(countries: Vec<CountryFeature>, usage: &UsageTable) -> Self {
        let values = join_usage(&countries, usage);

        let envelopes: Vec<CountryEnvelope> = countries.iter().enumerate()
            .filter_map(|(idx, c)| c.shape.bounding_rect().map(|bbox| CountryEnvelope { idx, bbox }))
            .collect();

        let bounds = envelopes.iter()
            .map(|e| e.bbox)
            .reduce(|a, b| Rect::new(
                Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
            ));

        let joined = values.iter().filter(|v| v.count().is_some()).count();
        debug!(countries = countries.len(), joined, "joined usage onto boundaries");

        Self { countries, values, index: RTree::bulk_load(envelopes), bounds }
    }

    /// Build from a boundary GeoJSON document and a usage CSV.
    pub fn from_bytes(boundaries: &[u8], usage_csv: &[u8], code_property: &str) -> Result<Self> {
        let countries = parse_boundaries(boundaries, code_property)?;
        let usage = read_usage_csv(usage_csv)?;
        Ok(Self::new(countries, &usage))
    }

    /// Build from the files named in `config`.
    pub fn from_source(src: &dyn ChartSource, config: &WorldConfig) -> Result<Self> {
        let boundaries = src.get(&config.boundaries)?;
        let usage = src.get(&config.usage)?;
        Self::from_bytes(&boundaries, &usage, &config.code_property)
    }

    pub fn countries(&self) -> &[CountryFeature] { &self.countries }

    pub fn len(&self) -> usize { self.countries.len() }

    pub fn is_empty(&self) -> bool { self.countries.is_empty() }

    /// Joined value for the feature at `index`.
    pub fn value(&self, index: usize) -> Option<UsageValue> { self.values.get(index).copied() }

    /// Joined value for the first feature carrying `code`.
    pub fn value_for_code(&self, code: &str) -> Option<UsageValue> {
        let code = code.trim().to_ascii_uppercase();
        self.countries.iter()
            .position(|c| c.code.as_deref() == Some(code.as_str()))
            .and_then(|i| self.value(i))
    }

    /// Bounding box of every feature.
    pub fn bounds(&self) -> Option<Rect<f64>> { self.bounds }

    /// Index of the feature containing the lon/lat point.
    pub fn feature_at(&self, lon: f64, lat: f64) -> Option<usize> {
        let point = Point::new(lon, lat);
        let mut hits: Vec<usize> = self.index
            .locate_in_envelope_intersecting(&AABB::from_point([lon, lat]))
            .map(|e| e.idx)
            .filter(|&i| self.countries[i].shape.contains(&point))
            .collect();
        hits.sort_unstable();
        hits.first().copied()
    }

    /// A view fitted to `width` pixels with `margin` on each side.
    pub fn view(&self, width: f64, margin: f64) -> Result<MapView<'_>> {
        let bounds = self.bounds
            .ok_or_else(|| DashError::Geometry("no boundaries available to draw".into()))?;
        Ok(MapView { map: self, proj: Projection::fit(bounds, width, margin), highlighted: None })
    }

    fn fill_colors(&self) -> Vec<String> {
        let counts = self.values.iter().filter_map(|v| v.count());
        let (min, max) = counts.fold((u64::MAX, 0u64), |(lo, hi), n| (lo.min(n), hi.max(n)));

        self.values.iter()
            .map(|v| match v.count() {
                Some(n) => ramp_color(n as f64, min as f64, max as f64).to_string(),
                None => NO_DATA_GRAY.to_string(),
            })
            .collect()
    }
}

/// Positioned hover tooltip for one country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub name: String,
    pub code: Option<String>,
    pub label: String,
    pub x: f64,
    pub y: f64,
}

/// A projected map plus the current hover highlight.
#[derive(Debug)]
pub struct MapView<'a> {
    map: &'a WorldMap,
    proj: Projection,
    highlighted: Option<usize>,
}

impl<'a> MapView<'a> {
    pub fn projection(&self) -> &Projection { &self.proj }

    pub fn highlighted(&self) -> Option<usize> { self.highlighted }

    /// Pointer moved to SVG coords (x, y). Highlights the country underneath, if any,
    /// and returns its tooltip. Over open water the highlight is cleared.
    pub fn hover(&mut self, x: f64, y: f64) -> Option<Tooltip> {
        let coord = self.proj.unproject(x, y);
        self.highlighted = self.map.feature_at(coord.x, coord.y);

        let index = self.highlighted?;
        let country = &self.map.countries[index];
        let value = self.map.value(index).unwrap_or(UsageValue::NoData);
        Some(Tooltip {
            name: country.name.clone(),
            code: country.code.clone(),
            label: value.label(),
            x: x + TOOLTIP_DX,
            y: y + TOOLTIP_DY,
        })
    }

    /// Hover the point under lon/lat, as if the pointer sat on its projected position.
    pub fn hover_lonlat(&mut self, lon: f64, lat: f64) -> Option<Tooltip> {
        let (x, y) = self.proj.project(&Coord { x: lon, y: lat });
        self.hover(x, y)
    }

    /// Pointer left the map: drop the highlight.
    pub fn unhover(&mut self) { self.highlighted = None }

    /// Render the choropleth as an SVG document.
    pub fn to_svg(&self) -> Result<String> {
        let colors = self.map.fill_colors();

        let mut writer = SvgWriter::buffer();
        writer.write_header(self.proj.width(), self.proj.height())?;
        writer.write_styles(MAP_CSS)?;

        // the highlighted country goes last so its outline sits on top
        let order = (0..self.map.len())
            .filter(|&i| Some(i) != self.highlighted)
            .chain(self.highlighted);

        for i in order {
            let country = &self.map.countries[i];
            let value = self.map.value(i).unwrap_or(UsageValue::NoData);
            let (class, fill) = if Some(i) == self.highlighted {
                ("country hover", HIGHLIGHT.to_string())
            } else {
                ("country", colors[i].clone())
            };
            writeln!(
                writer,
                r#"<path class="{class}" data-code="{}" fill="{fill}" fill-rule="evenodd" d="{}"><title>{}</title></path>"#,
                escape_xml(country.code.as_deref().unwrap_or("")),
                multipolygon_to_path(&country.shape, &self.proj),
                escape_xml(&format!("{}: {}", country.name, value.label())),
            )?;
        }

        writer.write_footer()?;
        writer.into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: &str = r#"{"type": "FeatureCollection", "features": [
        {"properties": {"ISO_A2": "US", "name": "United States"},
         "geometry": {"type": "Polygon", "coordinates": [[[0,0],[10,0],[10,10],[0,10],[0,0]]]}},
        {"properties": {"ISO_A2": "CA", "name": "Canada"},
         "geometry": {"type": "Polygon", "coordinates": [[[0,10],[10,10],[10,20],[0,20],[0,10]]]}},
        {"properties": {"ISO_A2": "MX", "name": "Mexico"},
         "geometry": {"type": "Polygon", "coordinates": [[[20,0],[30,0],[30,10],[20,10],[20,0]]]}}
    ]}"#;

    const USAGE: &str = "country_code,users\nUS,42\nMX,0\n";

    fn world() -> WorldMap {
        WorldMap::from_bytes(WORLD.as_bytes(), USAGE.as_bytes(), "ISO_A2").unwrap()
    }

    #[test]
    fn joins_by_code() {
        let map = world();
        assert_eq!(map.value_for_code("US"), Some(UsageValue::Count(42)));
        assert_eq!(map.value_for_code("MX"), Some(UsageValue::Count(0)));
        assert_eq!(map.value_for_code("CA"), Some(UsageValue::NoData));
        assert_eq!(map.value_for_code("ZZ"), None);
    }

    #[test]
    fn feature_at_point() {
        let map = world();
        assert_eq!(map.feature_at(5.0, 5.0), Some(0));
        assert_eq!(map.feature_at(5.0, 15.0), Some(1));
        assert_eq!(map.feature_at(25.0, 5.0), Some(2));
        assert_eq!(map.feature_at(15.0, 5.0), None);
    }

    #[test]
    fn hover_and_unhover() {
        let map = world();
        let mut view = map.view(320.0, 10.0).unwrap();

        // (5, 15) lies inside Canada.
        let (x, y) = view.projection().project(&geo::Coord { x: 5.0, y: 15.0 });
        let tip = view.hover(x, y).unwrap();
        assert_eq!(tip.name, "Canada");
        assert_eq!(tip.label, "no data");
        assert_eq!((tip.x, tip.y), (x + 10.0, y - 15.0));
        assert_eq!(view.highlighted(), Some(1));
        assert!(view.to_svg().unwrap().contains(r#"class="country hover" data-code="CA""#));

        view.unhover();
        assert_eq!(view.highlighted(), None);
        assert!(!view.to_svg().unwrap().contains("country hover"));
    }

    #[test]
    fn hover_over_water_clears_highlight() {
        let map = world();
        let mut view = map.view(320.0, 10.0).unwrap();
        assert_eq!(view.hover_lonlat(5.0, 5.0).map(|t| t.label), Some("42".to_string()));
        assert!(view.hover_lonlat(15.0, 5.0).is_none());
        assert_eq!(view.highlighted(), None);
    }

    #[test]
    fn svg_labels_every_country() {
        let map = world();
        let svg = map.view(320.0, 10.0).unwrap().to_svg().unwrap();
        assert_eq!(svg.matches("<path").count(), 3);
        assert!(svg.contains("<title>United States: 42</title>"));
        assert!(svg.contains("<title>Canada: no data</title>"));
        assert!(svg.contains("<title>Mexico: 0</title>"));
        assert!(svg.contains(&format!(r#"fill="{NO_DATA_GRAY}""#)));
    }

    #[test]
    fn empty_map_has_no_view() {
        let map = WorldMap::new(Vec::new(), &UsageTable::default());
        assert!(map.is_empty());
        assert!(matches!(map.view(100.0, 0.0), Err(DashError::Geometry(_))));
    }
}

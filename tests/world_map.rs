use chartwatch::{DashboardConfig, MemSource, UsageValue, WorldMap, NO_DATA_GRAY};

const BOUNDARIES: &str = r#"{"type": "FeatureCollection", "features": [
    {"type": "Feature", "properties": {"ISO_A2": "US", "name": "United States"},
     "geometry": {"type": "MultiPolygon", "coordinates": [
        [[[-125, 25], [-65, 25], [-65, 49], [-125, 49], [-125, 25]]],
        [[[-170, 52], [-140, 52], [-140, 71], [-170, 71], [-170, 52]]]
     ]}},
    {"type": "Feature", "properties": {"ISO_A2": "BR", "name": "Brazil"},
     "geometry": {"type": "Polygon", "coordinates": [[[-74, -34], [-35, -34], [-35, 5], [-74, 5], [-74, -34]]]}},
    {"type": "Feature", "properties": {"ISO_A2": "-99", "name": "Disputed"},
     "geometry": {"type": "Polygon", "coordinates": [[[10, 10], [20, 10], [20, 20], [10, 20], [10, 10]]]}}
]}"#;

const USAGE: &str = "country_code,users\nUS,42\nBR,1500000\nFR,7\n";

fn source() -> MemSource {
    let mut src = MemSource::default();
    src.insert("manifest.json", br#"{"world": {"boundaries": "geo/world.geojson", "usage": "geo/users.csv"}}"#.to_vec());
    src.insert("geo/world.geojson", BOUNDARIES.as_bytes().to_vec());
    src.insert("geo/users.csv", USAGE.as_bytes().to_vec());
    src
}

fn world() -> WorldMap {
    let src = source();
    let config = DashboardConfig::from_source(&src).unwrap();
    WorldMap::from_source(&src, config.world.as_ref().unwrap()).unwrap()
}

#[test]
fn join_keeps_no_data_distinct_from_zero() {
    let map = world();
    assert_eq!(map.len(), 3);
    assert_eq!(map.value_for_code("US"), Some(UsageValue::Count(42)));
    assert_eq!(map.value_for_code("us").map(|v| v.to_string()), Some("42".to_string()));
    assert_eq!(map.value(2), Some(UsageValue::NoData));
    assert_eq!(map.value(2).map(|v| v.to_string()), Some("no data".to_string()));
}

#[test]
fn hover_finds_the_country_under_the_pointer() {
    let map = world();
    let mut view = map.view(800.0, 10.0).unwrap();

    // Alaska belongs to the US multipolygon
    let tip = view.hover_lonlat(-150.0, 60.0).unwrap();
    assert_eq!(tip.name, "United States");
    assert_eq!(tip.code.as_deref(), Some("US"));
    assert_eq!(tip.label, "42");

    let tip = view.hover_lonlat(-50.0, -10.0).unwrap();
    assert_eq!(tip.label, "1,500,000");

    let tip = view.hover_lonlat(15.0, 15.0).unwrap();
    assert_eq!(tip.code, None);
    assert_eq!(tip.label, "no data");

    // open ocean
    assert!(view.hover_lonlat(-30.0, 40.0).is_none());
    assert_eq!(view.highlighted(), None);
}

#[test]
fn tooltip_is_offset_from_pointer() {
    let map = world();
    let mut view = map.view(800.0, 10.0).unwrap();
    let (x, y) = view.projection().project(&geo::Coord { x: -100.0, y: 40.0 });
    let tip = view.hover(x, y).unwrap();
    assert_eq!(tip.x, x + 10.0);
    assert_eq!(tip.y, y - 15.0);
}

#[test]
fn svg_marks_hover_and_no_data() {
    let map = world();
    let mut view = map.view(800.0, 10.0).unwrap();
    assert!(view.hover_lonlat(-50.0, -10.0).is_some());

    let svg = view.to_svg().unwrap();
    assert_eq!(svg.matches("<path").count(), 3);
    assert_eq!(svg.matches("country hover").count(), 1);
    assert!(svg.contains(r#"class="country hover" data-code="BR""#));
    assert!(svg.contains("<title>Brazil: 1,500,000</title>"));
    assert!(svg.contains("<title>Disputed: no data</title>"));
    assert!(svg.contains(&format!(r#"fill="{NO_DATA_GRAY}""#)));

    view.unhover();
    assert!(!view.to_svg().unwrap().contains("country hover"));
}

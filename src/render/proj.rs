use geo::{Coord, CoordsIter, LineString, MultiPolygon, Rect};

/// Equirectangular lon/lat -> SVG pixel mapping (Y down), fitted to a bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub bounds: Rect<f64>,
    pub margin: f64,
    pub scale: f64,
}

impl Projection {
    /// Fit `bounds` into `width` pixels with `margin` on every side.
    pub fn fit(bounds: Rect<f64>, width: f64, margin: f64) -> Self {
        let span = if bounds.width() > 0.0 { bounds.width() } else { 1.0 };
        Self { bounds, margin, scale: (width - 2.0 * margin) / span }
    }

    pub fn width(&self) -> f64 { self.bounds.width() * self.scale + 2.0 * self.margin }

    pub fn height(&self) -> f64 { self.bounds.height() * self.scale + 2.0 * self.margin }

    /// lon/lat -> SVG coords.
    pub fn project(&self, coord: &Coord<f64>) -> (f64, f64) {
        let x = self.margin + (coord.x - self.bounds.min().x) * self.scale;
        let y = self.margin + (self.bounds.max().y - coord.y) * self.scale; // invert vertically
        (x, y)
    }

    /// SVG coords -> lon/lat.
    pub fn unproject(&self, x: f64, y: f64) -> Coord<f64> {
        Coord {
            x: self.bounds.min().x + (x - self.margin) / self.scale,
            y: self.bounds.max().y - (y - self.margin) / self.scale,
        }
    }
}

/// Build a compact SVG path string for a MultiPolygon (exteriors + holes).
pub(crate) fn multipolygon_to_path(shape: &MultiPolygon<f64>, proj: &Projection) -> String {
    let mut out = String::new();

    for polygon in &shape.0 {
        out.push_str(&ring_to_path(polygon.exterior(), proj));
        for interior in polygon.interiors() {
            out.push_str(&ring_to_path(interior, proj));
        }
    }

    out
}

/// Build a compact SVG path string for a LineString (ring).
fn ring_to_path(ring: &LineString<f64>, proj: &Projection) -> String {
    let mut out = String::new();

    let mut coords = ring.coords_iter()
        .map(|coord| proj.project(&coord));
    if let Some((x, y)) = coords.next() {
        out.push_str(&format!(" M{x:.3},{y:.3}"));
        for (x, y) in coords {
            out.push_str(&format!(" L{x:.3},{y:.3}"));
        }
        out.push('Z');
    }

    out
}

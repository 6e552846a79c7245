use std::fmt::Write;

/// SVG path data for a monotone-in-x cubic curve through `points` (sorted by x).
/// Tangents are limited so the curve never overshoots between neighbouring points.
pub(crate) fn monotone_x_path(points: &[(f64, f64)]) -> String {
    let mut out = String::new();
    let Some(&(x0, y0)) = points.first() else { return out };
    let _ = write!(out, "M{x0:.3},{y0:.3}");

    match points.len() {
        1 => return out,
        2 => {
            let (x1, y1) = points[1];
            let _ = write!(out, "L{x1:.3},{y1:.3}");
            return out;
        }
        _ => {}
    }

    let tangents = tangents(points);
    for (i, window) in points.windows(2).enumerate() {
        let ((xa, ya), (xb, yb)) = (window[0], window[1]);
        let dx = (xb - xa) / 3.0;
        let _ = write!(
            out,
            "C{:.3},{:.3},{:.3},{:.3},{xb:.3},{yb:.3}",
            xa + dx, ya + dx * tangents[i],
            xb - dx, yb - dx * tangents[i + 1],
        );
    }
    out
}

fn sign(x: f64) -> f64 { if x < 0.0 { -1.0 } else { 1.0 } }

fn secant(a: (f64, f64), b: (f64, f64)) -> f64 {
    let h = b.0 - a.0;
    if h == 0.0 { 0.0 } else { (b.1 - a.1) / h }
}

/// Per-point tangents (Steffen-style limiting at interior points, one-sided at the ends).
fn tangents(points: &[(f64, f64)]) -> Vec<f64> {
    let n = points.len();
    let mut t = vec![0.0; n];

    for i in 1..n - 1 {
        let h0 = points[i].0 - points[i - 1].0;
        let h1 = points[i + 1].0 - points[i].0;
        let s0 = secant(points[i - 1], points[i]);
        let s1 = secant(points[i], points[i + 1]);
        let p = if h0 + h1 == 0.0 { 0.0 } else { (s0 * h1 + s1 * h0) / (h0 + h1) };
        let m = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
        t[i] = if m.is_finite() { m } else { 0.0 };
    }

    let end = |a: (f64, f64), b: (f64, f64), neighbour: f64| -> f64 {
        let h = b.0 - a.0;
        if h == 0.0 { neighbour } else { (3.0 * (b.1 - a.1) / h - neighbour) / 2.0 }
    };
    t[0] = end(points[0], points[1], t[1]);
    t[n - 1] = end(points[n - 2], points[n - 1], t[n - 2]);
    t
}

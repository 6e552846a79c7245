use std::io::Write;

use crate::aggregate::{Metric, WeeklyAggregate};
use crate::error::{DashError, Result};
use crate::render::{
    color::TREND_GREEN,
    curve::monotone_x_path,
    format::{escape_xml, format_rank, format_thousands, format_tick},
    scale::{LinearScale, TimeScale},
    writer::SvgWriter,
};

/// Fixed rank axis upper bound; the axis runs from 0 (top) to this value (bottom).
pub const RANK_AXIS_MAX: f64 = 50.0;

const MARGIN_TOP: f64 = 30.0;
const MARGIN_RIGHT: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;
const MARGIN_LEFT: f64 = 80.0;
const Y_TICKS: usize = 10;

const TREND_CSS: &str = r#"    .axis line, .axis path { stroke: #6b7280; stroke-width: 1; }
    .axis text { fill: #374151; font: 11px sans-serif; }
    .label { fill: #555555; font: 12px sans-serif; }
    .trend { fill: none; stroke-width: 3; }
    .dot { stroke: #ffffff; stroke-width: 1; }"#;

/// Outer canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSize {
    pub width: f64,
    pub height: f64,
}

impl Default for ChartSize {
    fn default() -> Self { Self { width: 960.0, height: 500.0 } }
}

impl ChartSize {
    fn inner(&self) -> Result<(f64, f64)> {
        let width = self.width - MARGIN_LEFT - MARGIN_RIGHT;
        let height = self.height - MARGIN_TOP - MARGIN_BOTTOM;
        if width <= 0.0 || height <= 0.0 {
            return Err(DashError::Geometry(format!(
                "chart area {}x{} leaves no room inside the margins", self.width, self.height
            )));
        }
        Ok((width, height))
    }
}

/// Hover text for one week: week, formatted value, and the number of songs listed for it.
pub fn tooltip_text(week: &WeeklyAggregate, metric: Metric) -> String {
    let value = match metric {
        Metric::Streams => format!("{} streams", format_thousands(week.total_streams)),
        Metric::Rank => format!("Rank {}", format_rank(week.average_rank)),
    };
    format!("Week: {}\n{}\nSongs: {}", week.week, value, week.songs.len())
}

/// Vertical scale for `metric`: streams from 0 to the observed maximum, rank fixed and inverted.
pub fn y_scale(aggregates: &[WeeklyAggregate], metric: Metric, height: f64) -> LinearScale {
    let domain = match metric {
        Metric::Streams => {
            let max = aggregates.iter().map(|w| w.total_streams).max().unwrap_or(0);
            (0.0, max as f64)
        }
        Metric::Rank => (RANK_AXIS_MAX, 0.0),
    };
    LinearScale::new(domain, (height, 0.0))
}

/// Draw the weekly series as a complete SVG document.
/// Every call renders from scratch.
pub fn render_trend_svg(aggregates: &[WeeklyAggregate], metric: Metric, size: ChartSize) -> Result<String> {
    if aggregates.is_empty() {
        return Err(DashError::NoData);
    }
    let (width, height) = size.inner()?;

    let x = TimeScale::extent(aggregates.iter().map(|w| w.week.date()), (0.0, width))
        .ok_or(DashError::NoData)?;
    let y = y_scale(aggregates, metric, height);

    let points: Vec<(f64, f64)> = aggregates.iter()
        .map(|w| (x.apply(w.week.date()), y.apply(w.value(metric))))
        .collect();

    let mut writer = SvgWriter::buffer();
    writer.write_header(size.width, size.height)?;
    writer.write_styles(TREND_CSS)?;
    writeln!(writer, r#"<g transform="translate({MARGIN_LEFT},{MARGIN_TOP})">"#)?;

    // x axis: month starts, or the weeks themselves for spans shorter than a month
    writeln!(writer, r#"<g class="axis x" transform="translate(0,{height})">"#)?;
    writeln!(writer, r#"<line x1="0" x2="{width}" y1="0" y2="0"/>"#)?;
    let months = x.month_ticks();
    let x_ticks: Vec<(f64, String)> = if months.len() >= 2 {
        months.iter().map(|d| (x.apply(*d), d.format("%b %Y").to_string())).collect()
    } else {
        aggregates.iter().map(|w| (x.apply(w.week.date()), w.week.date().format("%b %d").to_string())).collect()
    };
    for (tx, label) in &x_ticks {
        writeln!(
            writer,
            r#"<g transform="translate({tx:.3},0)"><line y2="6"/><text y="9" dx="-.8em" dy=".15em" text-anchor="end" transform="rotate(-45)">{}</text></g>"#,
            escape_xml(label),
        )?;
    }
    writeln!(writer, "</g>")?;

    // y axis
    writeln!(writer, r#"<g class="axis y">"#)?;
    writeln!(writer, r#"<line x1="0" x2="0" y1="0" y2="{height}"/>"#)?;
    let (y_ticks, step) = y.ticks(Y_TICKS);
    for value in y_ticks {
        writeln!(
            writer,
            r#"<g transform="translate(0,{:.3})"><line x2="-6"/><text x="-9" dy=".32em" text-anchor="end">{}</text></g>"#,
            y.apply(value),
            format_tick(value, step),
        )?;
    }
    writeln!(writer, "</g>")?;
    writeln!(
        writer,
        r#"<text class="label" transform="rotate(-90)" y="{}" x="{}" dy="1em" text-anchor="middle">{}</text>"#,
        -MARGIN_LEFT,
        -height / 2.0,
        metric.label(),
    )?;

    writeln!(writer, r#"<path class="trend" stroke="{TREND_GREEN}" d="{}"/>"#, monotone_x_path(&points))?;

    for (week, (px, py)) in aggregates.iter().zip(&points) {
        writeln!(
            writer,
            r#"<circle class="dot" cx="{px:.3}" cy="{py:.3}" r="5" fill="{TREND_GREEN}" data-week="{}" data-value="{}"><title>{}</title></circle>"#,
            week.week,
            week.value(metric),
            escape_xml(&tooltip_text(week, metric)),
        )?;
    }

    writeln!(writer, "</g>")?;
    writer.write_footer()?;
    writer.into_string()
}

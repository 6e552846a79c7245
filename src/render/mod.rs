mod color;
mod curve;
mod format;
mod proj;
mod scale;
mod toplist;
mod trend;
mod writer;

pub use color::{ramp_color, Rgb, HIGHLIGHT, NO_DATA_GRAY, TREND_GREEN};
pub use format::{format_rank, format_thousands};
pub use proj::Projection;
pub use scale::{LinearScale, TimeScale};
pub use toplist::{chart_title, render_top_list_html, top_songs, TopSongEntry};
pub use trend::{render_trend_svg, tooltip_text, y_scale, ChartSize, RANK_AXIS_MAX};

pub(crate) use format::escape_xml;
pub(crate) use proj::multipolygon_to_path;
pub(crate) use writer::SvgWriter;

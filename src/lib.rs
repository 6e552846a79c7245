#![doc = "Chartwatch public API"]
mod aggregate;
mod chart;
mod config;
mod dashboard;
mod error;
mod load;
mod merge;
mod render;
mod source;
mod world;

#[doc(inline)]
pub use chart::{parse_streams, ArtistIndex, ChartDataset, Rank, SongRecord, WeekId};

#[doc(inline)]
pub use aggregate::{
    aggregate, filter_records, latest_week, ArtistFilter, FilterSet, Metric, TimeRange, WeeklyAggregate,
    TOP_SONGS_PER_WEEK,
};

#[doc(inline)]
pub use config::{discover_weeks, DashboardConfig, WorldConfig, DEFAULT_SONGS_DIR, DEFAULT_WEEKS, MANIFEST_FILE};

#[doc(inline)]
pub use dashboard::{Dashboard, DashboardView};

#[doc(inline)]
pub use error::{DashError, Result};

#[doc(inline)]
pub use load::{load_configured, load_weeks, LoadOutcome, WeekFailure};

#[doc(inline)]
pub use merge::{merge_chart_dir, write_merged, MergeReport};

#[doc(inline)]
pub use render::{
    chart_title, format_rank, format_thousands, ramp_color, render_top_list_html, render_trend_svg,
    tooltip_text, top_songs, y_scale, ChartSize, LinearScale, Projection, Rgb, TimeScale, TopSongEntry,
    HIGHLIGHT, NO_DATA_GRAY, RANK_AXIS_MAX, TREND_GREEN,
};

#[doc(inline)]
pub use source::{ChartSource, DiskSource, MemSource};

#[cfg(feature = "http")]
#[doc(inline)]
pub use source::HttpSource;

#[doc(inline)]
pub use world::{
    join_usage, parse_boundaries, read_usage_csv, CountryFeature, MapView, Tooltip, UsageTable, UsageValue,
    WorldMap, NO_DATA_LABEL,
};

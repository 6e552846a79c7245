mod filter;
mod weekly;

pub use filter::{filter_records, ArtistFilter, FilterSet, Metric, TimeRange};
pub use weekly::{aggregate, latest_week, WeeklyAggregate, TOP_SONGS_PER_WEEK};

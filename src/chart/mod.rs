mod artists;
mod dataset;
pub(crate) mod record;
mod week;

pub use artists::ArtistIndex;
pub use dataset::ChartDataset;
pub use record::{parse_streams, Rank, SongRecord};
pub use week::WeekId;

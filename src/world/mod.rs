mod country;
mod join;
mod map;
mod usage;

pub use country::{parse_boundaries, CountryFeature};
pub use join::{join_usage, UsageValue, NO_DATA_LABEL};
pub use map::{MapView, Tooltip, WorldMap};
pub use usage::{read_usage_csv, UsageTable};

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::chart::SongRecord;
use crate::error::DashError;

/// Artist selection. A named artist matches any record whose artist field contains the
/// name, so a collaboration credited "Drake, Future" shows up for either artist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtistFilter {
    #[default]
    All,
    Name(String),
}

impl ArtistFilter {
    #[inline]
    pub fn matches(&self, record: &SongRecord) -> bool {
        match self {
            Self::All => true,
            Self::Name(name) => record.artist.contains(name.as_str()),
        }
    }
}

impl FromStr for ArtistFilter {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(Self::All),
            name => Ok(Self::Name(name.to_string())),
        }
    }
}

impl fmt::Display for ArtistFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Time range selection: a lexical prefix of the week identifier ("2017", "2017-02").
/// Not a true date interval.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[default]
    All,
    Prefix(String),
}

impl TimeRange {
    #[inline]
    pub fn matches(&self, record: &SongRecord) -> bool {
        match self {
            Self::All => true,
            Self::Prefix(prefix) => record.week.starts_with(prefix),
        }
    }
}

impl FromStr for TimeRange {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(Self::All),
            prefix => Ok(Self::Prefix(prefix.to_string())),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Prefix(prefix) => f.write_str(prefix),
        }
    }
}

/// Which weekly value the trend chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Streams,
    Rank,
}

impl Metric {
    pub fn to_str(self) -> &'static str {
        match self {
            Self::Streams => "streams",
            Self::Rank => "rank",
        }
    }

    /// Axis label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Streams => "Total Streams",
            Self::Rank => "Average Rank",
        }
    }
}

impl FromStr for Metric {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "streams" => Ok(Self::Streams),
            "rank" => Ok(Self::Rank),
            _ => Err(DashError::UnknownFilter { kind: "metric", value: s.to_string() }),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.to_str()) }
}

/// The full filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct FilterSet {
    pub artist: ArtistFilter,
    pub time_range: TimeRange,
    pub metric: Metric,
}

impl FilterSet {
    /// Record-level filters. `metric` only affects presentation.
    #[inline]
    pub fn matches(&self, record: &SongRecord) -> bool {
        self.artist.matches(record) && self.time_range.matches(record)
    }
}

/// Records passing `filters`, in input order.
pub fn filter_records<'a>(records: &'a [SongRecord], filters: &FilterSet) -> Vec<&'a SongRecord> {
    records.iter().filter(|r| filters.matches(r)).collect()
}

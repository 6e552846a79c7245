use ahash::AHashMap;
use serde::Serialize;

use crate::aggregate::{FilterSet, Metric};
use crate::chart::{SongRecord, WeekId};
use crate::error::{DashError, Result};

/// Songs kept per week for display.
pub const TOP_SONGS_PER_WEEK: usize = 10;

/// Summary of one week under the active filters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAggregate {
    pub week: WeekId,
    pub total_streams: u64,
    /// Mean raw rank over every matching record of the week.
    pub average_rank: f64,
    /// Number of matching records, before truncation.
    pub record_count: usize,
    /// Matching records ordered by rank, truncated to [`TOP_SONGS_PER_WEEK`].
    pub songs: Vec<SongRecord>,
}

impl WeeklyAggregate {
    /// The plotted value for `metric`.
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Streams => self.total_streams as f64,
            Metric::Rank => self.average_rank,
        }
    }
}

#[derive(Default)]
struct WeekGroup<'a> {
    total_streams: u64,
    total_rank: u64,
    songs: Vec<&'a SongRecord>,
}

/// Group matching records by week and summarize each group.
/// The output is sorted ascending by calendar date and rebuilt from scratch on every call.
/// An empty result means nothing matched. A week whose stream total overflows is an error.
pub fn aggregate(records: &[SongRecord], filters: &FilterSet) -> Result<Vec<WeeklyAggregate>> {
    let mut groups: AHashMap<&WeekId, WeekGroup> = AHashMap::new();

    for record in records.iter().filter(|r| filters.matches(r)) {
        let group = groups.entry(&record.week).or_default();
        group.total_streams = group.total_streams.checked_add(record.streams_num)
            .ok_or_else(|| DashError::StreamOverflow { week: record.week.to_string() })?;
        group.total_rank += u64::from(record.rank.raw());
        group.songs.push(record);
    }

    let mut weeks: Vec<WeeklyAggregate> = groups.into_iter()
        .map(|(week, mut group)| {
            let record_count = group.songs.len();
            let average_rank = group.total_rank as f64 / record_count as f64;

            group.songs.sort_by_key(|r| r.rank);
            let songs = group.songs.into_iter()
                .take(TOP_SONGS_PER_WEEK)
                .cloned()
                .collect();

            WeeklyAggregate {
                week: week.clone(),
                total_streams: group.total_streams,
                average_rank,
                record_count,
                songs,
            }
        })
        .collect();

    weeks.sort_by(|a, b| a.week.cmp(&b.week));
    Ok(weeks)
}

/// The aggregate for the latest week, if any.
pub fn latest_week(aggregates: &[WeeklyAggregate]) -> Option<&WeeklyAggregate> {
    aggregates.iter().max_by(|a, b| a.week.cmp(&b.week))
}

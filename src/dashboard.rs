use serde::Serialize;
use tracing::debug;

use crate::aggregate::{aggregate, ArtistFilter, FilterSet, Metric, TimeRange, WeeklyAggregate};
use crate::chart::{ArtistIndex, ChartDataset};
use crate::config::DashboardConfig;
use crate::error::{DashError, Result};
use crate::load::load_configured;
use crate::render::{chart_title, render_top_list_html, render_trend_svg, top_songs, ChartSize, TopSongEntry};
use crate::source::ChartSource;

/// Everything needed to draw the dashboard for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub title: String,
    pub metric: Metric,
    pub aggregates: Vec<WeeklyAggregate>,
    pub top_songs: Vec<TopSongEntry>,
}

/// The loaded dataset plus the current filter selection.
/// Every view is recomputed from the full dataset.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: ChartDataset,
    filters: FilterSet,
}

impl Dashboard {
    /// Load every configured week; any failed week fails the load.
    pub fn load(src: &dyn ChartSource, config: &DashboardConfig) -> Result<Self> {
        let dataset = load_configured(src, config)?.into_strict()?;
        Ok(Self::from_dataset(dataset))
    }

    pub fn from_dataset(dataset: ChartDataset) -> Self {
        Self { dataset, filters: FilterSet::default() }
    }

    pub fn dataset(&self) -> &ChartDataset { &self.dataset }

    /// Sorted artist names for the selection list.
    pub fn artists(&self) -> &ArtistIndex { self.dataset.artists() }

    pub fn filters(&self) -> &FilterSet { &self.filters }

    pub fn set_filters(&mut self, filters: FilterSet) { self.filters = filters }

    pub fn set_artist(&mut self, artist: ArtistFilter) { self.filters.artist = artist }

    pub fn set_time_range(&mut self, range: TimeRange) { self.filters.time_range = range }

    pub fn set_metric(&mut self, metric: Metric) { self.filters.metric = metric }

    /// Apply a raw dropdown value (`"all"` or an artist name).
    pub fn select_artist(&mut self, value: &str) -> Result<()> {
        self.set_artist(value.parse()?);
        Ok(())
    }

    /// Apply a raw dropdown value (`"all"` or a week prefix).
    pub fn select_time_range(&mut self, value: &str) -> Result<()> {
        self.set_time_range(value.parse()?);
        Ok(())
    }

    /// Apply a raw dropdown value (`"streams"` or `"rank"`).
    pub fn select_metric(&mut self, value: &str) -> Result<()> {
        self.set_metric(value.parse()?);
        Ok(())
    }

    /// Weekly aggregates for the current filters, possibly empty.
    pub fn aggregates(&self) -> Result<Vec<WeeklyAggregate>> {
        aggregate(self.dataset.records(), &self.filters)
    }

    /// The full view, or [`DashError::NoData`] when no week matches.
    pub fn view(&self) -> Result<DashboardView> {
        let aggregates = self.aggregates()?;
        debug!(filters = ?self.filters, weeks = aggregates.len(), "recomputed view");
        if aggregates.is_empty() {
            return Err(DashError::NoData);
        }

        Ok(DashboardView {
            title: chart_title(&self.filters.artist),
            metric: self.filters.metric,
            top_songs: top_songs(&aggregates),
            aggregates,
        })
    }
}

impl DashboardView {
    /// The trend chart as an SVG document.
    pub fn trend_svg(&self, size: ChartSize) -> Result<String> {
        render_trend_svg(&self.aggregates, self.metric, size)
    }

    /// The top-songs list as an HTML fragment.
    pub fn top_list_html(&self) -> String {
        render_top_list_html(&self.top_songs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::record::parse_week_file;

    fn dashboard() -> Dashboard {
        let records = parse_week_file("w", br#"[
            {"week":"2017-01-05","artist":"Drake, Future","song":"collab","rank":0,"streams":"1,000"},
            {"week":"2017-01-05","artist":"Ed Sheeran","song":"shape","rank":1,"streams":"2,000"},
            {"week":"2017-02-02","artist":"Drake","song":"solo","rank":4,"streams":"500"}
        ]"#).unwrap();
        Dashboard::from_dataset(ChartDataset::new(records))
    }

    #[test]
    fn default_view_covers_everything() {
        let view = dashboard().view().unwrap();
        assert_eq!(view.title, "Listening Trends For All Artists");
        assert_eq!(view.aggregates.len(), 2);
        assert_eq!(view.aggregates[0].total_streams, 3_000);
        // latest week only
        assert_eq!(view.top_songs.len(), 1);
        assert_eq!(view.top_songs[0].song, "solo");
        assert_eq!(view.top_songs[0].position, 5);
    }

    #[test]
    fn artist_filter_matches_collaborations() {
        let mut dash = dashboard();
        dash.select_artist("Drake").unwrap();
        let view = dash.view().unwrap();
        assert_eq!(view.title, "Listening Trends For Drake");
        assert_eq!(view.aggregates.iter().map(|a| a.total_streams).collect::<Vec<_>>(), [3_000, 500]);
    }

    #[test]
    fn overflowing_week_fails_the_view() {
        let records = parse_week_file("w", br#"[
            {"week":"2017-01-05","artist":"A","song":"a","rank":0,"streams":"18446744073709551615"},
            {"week":"2017-01-05","artist":"B","song":"b","rank":1,"streams":"2"}
        ]"#).unwrap();
        let mut dash = Dashboard::from_dataset(ChartDataset::new(records));
        assert!(matches!(dash.view(), Err(DashError::StreamOverflow { .. })));

        // filtering one song out leaves a total that fits
        dash.select_artist("B").unwrap();
        assert_eq!(dash.view().unwrap().aggregates[0].total_streams, 2);
    }

    #[test]
    fn empty_selection_is_no_data() {
        let mut dash = dashboard();
        dash.select_time_range("2018").unwrap();
        assert!(matches!(dash.view(), Err(DashError::NoData)));
    }

    #[test]
    fn metric_changes_rendering_only() {
        let mut dash = dashboard();
        let before = dash.aggregates().unwrap();
        dash.select_metric("rank").unwrap();
        assert_eq!(dash.aggregates().unwrap(), before);

        let view = dash.view().unwrap();
        assert_eq!(view.metric, Metric::Rank);
        assert!(view.trend_svg(ChartSize::default()).unwrap().contains("Average Rank"));
        assert!(view.top_list_html().contains("song-card"));
    }

    #[test]
    fn bad_metric_is_rejected() {
        let mut dash = dashboard();
        assert!(matches!(dash.select_metric("plays"), Err(DashError::UnknownFilter { .. })));
        assert_eq!(dash.filters().metric, Metric::Streams);
    }

    #[test]
    fn artists_are_sorted() {
        let dash = dashboard();
        assert_eq!(dash.artists().to_vec(), ["Drake", "Ed Sheeran", "Future"]);
    }
}

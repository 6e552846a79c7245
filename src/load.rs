use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::chart::{record::parse_week_file, ChartDataset, SongRecord, WeekId};
use crate::config::DashboardConfig;
use crate::error::{DashError, Result};
use crate::source::ChartSource;

/// One week that could not be fetched or decoded.
#[derive(Debug)]
pub struct WeekFailure {
    pub week: WeekId,
    pub error: DashError,
}

/// Result of loading a set of weeks.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Every week loaded.
    Complete(ChartDataset),
    /// Some weeks loaded; `failures` names the rest.
    Partial { dataset: ChartDataset, failures: Vec<WeekFailure> },
    /// No week loaded.
    Failed(Vec<WeekFailure>),
}

impl LoadOutcome {
    pub fn failures(&self) -> &[WeekFailure] {
        match self {
            Self::Complete(_) => &[],
            Self::Partial { failures, .. } | Self::Failed(failures) => failures,
        }
    }

    pub fn is_complete(&self) -> bool { matches!(self, Self::Complete(_)) }

    /// All-or-nothing: any failed week fails the whole load.
    /// The error lists every failed week with its reason.
    pub fn into_strict(self) -> Result<ChartDataset> {
        match self {
            Self::Complete(dataset) => Ok(dataset),
            Self::Partial { failures, .. } | Self::Failed(failures) => Err(load_failed(failures)),
        }
    }

    /// Accept whatever loaded; only fail when nothing did.
    pub fn into_partial(self) -> Result<ChartDataset> {
        match self {
            Self::Complete(dataset) | Self::Partial { dataset, .. } => Ok(dataset),
            Self::Failed(failures) => Err(load_failed(failures)),
        }
    }
}

fn load_failed(failures: Vec<WeekFailure>) -> DashError {
    let (weeks, reasons) = failures.into_iter()
        .map(|f| (f.week.to_string(), f.error.to_string()))
        .unzip();
    DashError::LoadFailed { weeks, reasons }
}

fn load_week(src: &dyn ChartSource, config: &DashboardConfig, week: &WeekId) -> Result<Vec<SongRecord>> {
    let rel = config.week_path(week);
    let bytes = src.get(&rel)?;
    let records = parse_week_file(&rel, &bytes)?;
    debug!(week = %week, records = records.len(), "loaded week");
    Ok(records)
}

/// Fetch every week concurrently, then merge in input order.
/// Each week's failure is captured instead of aborting the others.
pub fn load_weeks(src: &dyn ChartSource, config: &DashboardConfig, weeks: &[WeekId]) -> LoadOutcome {
    let results: Vec<(WeekId, Result<Vec<SongRecord>>)> = weeks.par_iter()
        .map(|week| (week.clone(), load_week(src, config, week)))
        .collect();

    let mut records = Vec::new();
    let mut failures = Vec::new();
    let mut loaded = 0usize;

    for (week, result) in results {
        match result {
            Ok(week_records) => {
                loaded += 1;
                records.extend(week_records);
            }
            Err(error) => {
                warn!(week = %week, %error, "failed to load week");
                failures.push(WeekFailure { week, error });
            }
        }
    }

    info!(weeks = weeks.len(), loaded, failed = failures.len(), records = records.len(), "dataset load finished");

    if failures.is_empty() {
        LoadOutcome::Complete(ChartDataset::new(records))
    } else if loaded == 0 {
        LoadOutcome::Failed(failures)
    } else {
        LoadOutcome::Partial { dataset: ChartDataset::new(records), failures }
    }
}

/// Load the weeks named by `config`.
pub fn load_configured(src: &dyn ChartSource, config: &DashboardConfig) -> Result<LoadOutcome> {
    let weeks = config.week_ids()?;
    Ok(load_weeks(src, config, &weeks))
}

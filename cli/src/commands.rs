pub mod artists;
pub mod map;
pub mod merge;
pub mod trends;
pub mod weeks;

use std::path::Path;

use anyhow::{bail, Context, Result};
use chartwatch::{discover_weeks, load_configured, ChartSource, Dashboard, DashboardConfig, DiskSource, HttpSource};
use tracing::info;

use crate::cli::DataArgs;

fn is_url(data: &str) -> bool {
    data.starts_with("http://") || data.starts_with("https://")
}

/// Disk directory or HTTP base URL.
pub(crate) fn open_source(data: &str) -> Result<Box<dyn ChartSource>> {
    if is_url(data) {
        Ok(Box::new(HttpSource::new(data)?))
    } else {
        Ok(Box::new(DiskSource::new(data)))
    }
}

pub(crate) fn read_config(src: &dyn ChartSource) -> Result<DashboardConfig> {
    DashboardConfig::from_source(src).context("failed to read dataset manifest")
}

/// Load the dataset described by `args` into a dashboard with default filters.
pub(crate) fn load_dashboard(args: &DataArgs) -> Result<Dashboard> {
    let src = open_source(&args.data)?;
    let mut config = read_config(src.as_ref())?;

    if args.discover {
        if is_url(&args.data) {
            bail!("--discover needs a local data directory, not {}", args.data);
        }
        let dir = Path::new(&args.data).join(&config.songs_dir);
        let weeks = discover_weeks(&dir)
            .with_context(|| format!("failed to list weeks in {}", dir.display()))?;
        config.weeks = weeks.iter().map(ToString::to_string).collect();
    }

    let outcome = load_configured(src.as_ref(), &config)?;
    let dataset = if args.allow_partial { outcome.into_partial()? } else { outcome.into_strict()? };
    info!(records = dataset.len(), artists = dataset.artists().len(), "dataset ready");
    Ok(Dashboard::from_dataset(dataset))
}

use std::fs;

use anyhow::{Context, Result};
use chartwatch::ChartSize;
use tracing::info;

use super::load_dashboard;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::TrendsArgs) -> Result<()> {
    let mut dashboard = load_dashboard(&args.data)?;
    dashboard.select_artist(&args.artist)?;
    dashboard.select_time_range(&args.range)?;
    dashboard.select_metric(&args.metric)?;

    let view = dashboard.view()
        .with_context(|| format!("nothing to chart for artist {:?} in range {:?}", args.artist, args.range))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", view.title);
        for entry in &view.top_songs {
            println!("{:>3}. {} by {} ({} streams)", entry.position, entry.song, entry.artist, entry.streams);
        }
    }

    if let Some(path) = &args.output {
        let svg = view.trend_svg(ChartSize { width: args.width, height: args.height })?;
        fs::write(path, svg).with_context(|| format!("failed to write {}", path.display()))?;
        info!(output = %path.display(), "trend chart written");
    }

    if let Some(path) = &args.html {
        fs::write(path, view.top_list_html()).with_context(|| format!("failed to write {}", path.display()))?;
        info!(output = %path.display(), "top list written");
    }

    Ok(())
}

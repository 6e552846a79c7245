use anyhow::{Context, Result};
use chartwatch::{merge_chart_dir, write_merged};
use tracing::info;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::MergeArgs) -> Result<()> {
    let out_path = &args.output.clone().unwrap_or("./all_songs.json".into());

    let report = merge_chart_dir(&args.dir)
        .with_context(|| format!("failed to merge {}", args.dir.display()))?;
    for path in &report.skipped {
        eprintln!("skipped {}", path.display());
    }

    write_merged(out_path, &report.entries)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    info!(entries = report.entries.len(), output = %out_path.display(), "merged data written");
    Ok(())
}

use anyhow::{Context, Result};
use chartwatch::discover_weeks;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::WeeksArgs) -> Result<()> {
    let weeks = discover_weeks(&args.dir)
        .with_context(|| format!("failed to list weeks in {}", args.dir.display()))?;
    for week in &weeks {
        println!("{week}");
    }
    Ok(())
}

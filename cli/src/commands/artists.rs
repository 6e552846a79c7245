use anyhow::Result;

use super::load_dashboard;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::DataArgs) -> Result<()> {
    let dashboard = load_dashboard(args)?;
    for name in dashboard.artists().iter() {
        println!("{name}");
    }
    Ok(())
}

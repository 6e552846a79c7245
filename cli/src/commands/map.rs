use std::fs;

use anyhow::{anyhow, Context, Result};
use chartwatch::{WorldConfig, WorldMap};
use tracing::info;

use super::{open_source, read_config};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::MapArgs) -> Result<()> {
    let out_path = &args.output.clone().unwrap_or("./world.svg".into());

    let src = open_source(&args.data)?;
    let mut world = match read_config(src.as_ref())?.world {
        Some(world) => world,
        None => WorldConfig {
            boundaries: args.boundaries.clone().ok_or_else(|| anyhow!("no --boundaries given and no world entry in the manifest"))?,
            usage: args.usage.clone().ok_or_else(|| anyhow!("no --usage given and no world entry in the manifest"))?,
            code_property: "ISO_A2".to_string(),
        },
    };
    if let Some(boundaries) = &args.boundaries { world.boundaries = boundaries.clone() }
    if let Some(usage) = &args.usage { world.usage = usage.clone() }

    let map = WorldMap::from_source(src.as_ref(), &world).context("failed to load world map")?;
    let mut view = map.view(args.width, args.margin)?;

    if let Some(point) = &args.hover {
        match view.hover_lonlat(point[0], point[1]) {
            Some(tip) => println!("{}: {}", tip.name, tip.label),
            None => println!("no country at {}, {}", point[0], point[1]),
        }
    }

    fs::write(out_path, view.to_svg()?).with_context(|| format!("failed to write {}", out_path.display()))?;
    info!(countries = map.len(), output = %out_path.display(), "world map written");
    Ok(())
}

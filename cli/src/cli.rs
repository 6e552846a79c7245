use std::path::PathBuf;

/// Weekly chart analytics CLI
#[derive(clap::Parser, Debug)]
#[command(name = "chartwatch", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv); CHARTWATCH_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// List every credited artist, sorted
    Artists(DataArgs),

    /// List the weeks found in a directory of weekly chart files
    Weeks(WeeksArgs),

    /// Aggregate weekly charts and render the trend chart and top list
    Trends(TrendsArgs),

    /// Render the world usage map, optionally hovering a lon/lat point
    Map(MapArgs),

    /// Merge a directory of weekly JSON files into one sorted file
    Merge(MergeArgs),
}

/// Where the dataset lives.
#[derive(clap::Args, Debug)]
pub struct DataArgs {
    /// Dataset root directory or http(s) base URL, defaults to "."
    #[arg(short, long, default_value = ".", value_hint = clap::ValueHint::DirPath)]
    pub data: String,

    /// Load weeks found on disk instead of the manifest/default list
    #[arg(long)]
    pub discover: bool,

    /// Keep going when some weeks fail to load
    #[arg(long)]
    pub allow_partial: bool,
}

#[derive(clap::Args, Debug)]
pub struct WeeksArgs {
    /// Directory holding {YYYY-MM-DD}.json files
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub dir: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct TrendsArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Artist name, or "all"
    #[arg(short, long, default_value = "all")]
    pub artist: String,

    /// Week prefix such as 2017 or 2017-02, or "all"
    #[arg(short, long, default_value = "all")]
    pub range: String,

    /// "streams" or "rank"
    #[arg(short, long, default_value = "streams")]
    pub metric: String,

    /// Output SVG file for the trend chart
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Output HTML fragment for the top list
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub html: Option<PathBuf>,

    /// Print the computed view as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(long, default_value_t = 960.0)]
    pub width: f64,

    #[arg(long, default_value_t = 500.0)]
    pub height: f64,
}

#[derive(clap::Args, Debug)]
pub struct MapArgs {
    /// Dataset root directory or http(s) base URL, defaults to "."
    #[arg(short, long, default_value = ".", value_hint = clap::ValueHint::DirPath)]
    pub data: String,

    /// Boundary GeoJSON, relative to the data root (overrides the manifest)
    #[arg(long)]
    pub boundaries: Option<String>,

    /// Usage CSV, relative to the data root (overrides the manifest)
    #[arg(long)]
    pub usage: Option<String>,

    /// Output SVG file, defaults to "./world.svg"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Hover the country at this point before rendering
    #[arg(long, num_args = 2, value_names = ["LON", "LAT"], allow_negative_numbers = true)]
    pub hover: Option<Vec<f64>>,

    #[arg(long, default_value_t = 960.0)]
    pub width: f64,

    #[arg(long, default_value_t = 10.0)]
    pub margin: f64,
}

#[derive(clap::Args, Debug)]
pub struct MergeArgs {
    /// Directory of weekly JSON array files
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub dir: PathBuf,

    /// Output file, defaults to "./all_songs.json"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

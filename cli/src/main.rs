mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{artists, map, merge, trends, weeks};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // diagnostics go to stderr so stdout stays parseable
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .with_env_var("CHARTWATCH_LOG")
                .from_env_lossy(),
        )
        .try_init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Artists(args) => artists::run(&cli, args),
        Commands::Weeks(args) => weeks::run(&cli, args),
        Commands::Trends(args) => trends::run(&cli, args),
        Commands::Map(args) => map::run(&cli, args),
        Commands::Merge(args) => merge::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }

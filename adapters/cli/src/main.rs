#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that ranks every mine of a field by its chain-reaction peak.

mod input;
mod report;

use std::{
    fs::File,
    io::{self, BufReader, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use minefield_field::query;
use minefield_system_ranking::{Config, Execution, Ranker};

use crate::report::OutputFormat;

/// Ranks the mines of a field by the busiest step of their chain reaction.
#[derive(Debug, Parser)]
#[command(name = "minefield", version)]
struct Args {
    /// File containing one `X Y power` record per line.
    #[arg(short, long, default_value = "input.txt")]
    file: PathBuf,

    /// Format used to print the ranking.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print every mine in rank order, not only the winners.
    #[arg(long)]
    all: bool,

    /// Replay cascades on all available cores.
    #[arg(long)]
    parallel: bool,

    /// Increase log verbosity (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Entry point for the minefield command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let file = File::open(&args.file)
        .with_context(|| format!("cannot open file {}", args.file.display()))?;
    let field = input::load_field(BufReader::new(file)).with_context(|| {
        format!(
            "cannot parse input data from {} into a minefield",
            args.file.display()
        )
    })?;
    info!(
        "loaded {} mines from {}",
        query::mine_count(&field),
        args.file.display()
    );

    let execution = if args.parallel {
        Execution::Parallel
    } else {
        Execution::Sequential
    };
    let ranking = Ranker::new(Config::new(execution))
        .rank(&query::mine_view(&field), &query::adjacency_view(&field))
        .context("cannot rank mines")?;

    let report = report::build_report(&ranking, args.all);
    let mut out = io::stdout().lock();
    report::write_report(&report, args.format, &mut out).context("cannot write report")?;
    out.flush().context("cannot write report")?;

    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

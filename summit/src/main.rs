//! Summit — heightmap trail distances from the command line.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use relief_core::HeightMap;
use relief_paths::{SearchError, shortest_ascent, shortest_descent_to_lowest};

#[derive(Parser, Debug)]
#[command(about = "Compute shortest climbing distances over a heightmap")]
struct Args {
    /// Heightmap file: lines of 'a'..'z' with one 'S' and one 'E'.
    file: PathBuf,

    /// Only report the start-to-summit ascent.
    #[arg(long, conflicts_with = "descent_only")]
    ascent_only: bool,

    /// Only report the summit-to-lowest descent.
    #[arg(long)]
    descent_only: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let map = HeightMap::parse(&text)
        .with_context(|| format!("parsing {}", args.file.display()))?;
    log::debug!(
        "parsed {}x{} heightmap, start {}, summit {}",
        map.grid.width(),
        map.grid.height(),
        map.start,
        map.summit
    );

    if !args.descent_only {
        match shortest_ascent(&map) {
            Ok(d) => println!("shortest ascent: {d}"),
            Err(SearchError::Unreachable) => println!("shortest ascent: unreachable"),
            Err(e) => return Err(e.into()),
        }
    }
    if !args.ascent_only {
        match shortest_descent_to_lowest(&map) {
            Ok(d) => println!("shortest from lowest: {d}"),
            Err(SearchError::NoTargetFound) => println!("shortest from lowest: unreachable"),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

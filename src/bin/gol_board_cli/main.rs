mod random;
mod stats;
mod update;
mod util;

use anyhow::Result;
use clap::{Parser, Subcommand};
use random::{run_random, RandomArgs};
use stats::{run_stats, StatsArgs};
use update::{run_update, UpdateArgs};

#[derive(Parser, Debug)]
#[command(version, about)]
struct CLIParser {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Advance a pattern by a number of generations on its finite board
    Update(UpdateArgs),
    /// Generate a random board
    Random(RandomArgs),
    /// Print pattern's dimensions, population and hash
    Stats(StatsArgs),
}

fn main() -> Result<()> {
    util::init_logger();
    let args = CLIParser::parse();

    match args.action {
        Action::Update(args) => run_update(args),
        Action::Random(args) => run_random(args),
        Action::Stats(args) => run_stats(args),
    }
}

use crate::util::print_population;
use anyhow::Result;
use clap::Args;
use gol_board::{random_grid_seeded, DEFAULT_ALIVE_PROBABILITY};

#[derive(Args, Debug)]
pub(super) struct RandomArgs {
    /// Number of rows
    #[arg(short = 'H', long)]
    height: usize,

    /// Number of columns
    #[arg(short = 'W', long)]
    width: usize,

    /// Probability of each cell being alive
    #[arg(short, long, default_value_t = DEFAULT_ALIVE_PROBABILITY)]
    fill: f64,

    /// Seed for the random number generator, seeds from the OS if omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Path to the file where the board will be saved; supports .rle and .cells formats
    #[arg(short, long)]
    output: String,
}

pub(super) fn run_random(args: RandomArgs) -> Result<()> {
    let grid = random_grid_seeded(args.height, args.width, args.fill, args.seed)?;
    log::info!(
        "Generated {}x{} board with fill rate {}",
        args.height,
        args.width,
        args.fill
    );
    print_population(grid.population());
    grid.to_file(&args.output)
}

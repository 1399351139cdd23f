use crate::util::print_population;
use anyhow::Result;
use clap::Args;
use gol_board::{Grid, Simulation};

#[derive(Args, Debug)]
pub(super) struct UpdateArgs {
    /// Path to the file containing the pattern; supports .rle and .cells formats
    pattern: String,

    /// Path to the file where the resulting pattern will be saved
    #[arg(short, long)]
    output: String,

    /// The pattern will be advanced by this many generations
    #[arg(short, long)]
    generations: u64,

    /// Log progress every this many generations, only at the end by default
    #[arg(short, long)]
    step: Option<u64>,

    /// Count population of the resulting pattern
    #[arg(short, long)]
    population: bool,
}

pub(super) fn run_update(args: UpdateArgs) -> Result<()> {
    let timer = std::time::Instant::now();
    let grid = Grid::from_file(&args.pattern)?;
    println!(
        "Loaded {}x{} pattern in {:.1} secs",
        grid.height(),
        grid.width(),
        timer.elapsed().as_secs_f64()
    );

    let timer = std::time::Instant::now();
    let mut simulation = Simulation::from(grid);
    let step = args.step.unwrap_or(args.generations).clamp(1, args.generations.max(1));
    let mut gens_left = args.generations;
    while gens_left > 0 {
        let batch = step.min(gens_left);
        let changed = simulation.advance(batch)?;
        if changed < batch {
            break;
        }
        gens_left -= batch;
        if gens_left > 0 {
            log::info!(
                "Updated by {} out of {} generations",
                args.generations - gens_left,
                args.generations
            );
        }
    }
    println!(
        "Updated pattern by {} generations in {:.1} secs",
        simulation.generation(),
        timer.elapsed().as_secs_f64()
    );

    if args.population {
        print_population(simulation.population());
    }
    simulation.into_grid().to_file(&args.output)
}

use crate::util::print_population;
use anyhow::Result;
use clap::Args;
use gol_board::Grid;

#[derive(Args, Debug)]
pub(super) struct StatsArgs {
    /// Path to the file containing the pattern; supports .rle and .cells formats
    pattern: String,
}

pub(super) fn run_stats(args: StatsArgs) -> Result<()> {
    let timer = std::time::Instant::now();
    let grid = Grid::from_file(&args.pattern)?;
    println!("Size: {}x{}", grid.height(), grid.width());
    println!("Hash: 0x{:016x}", grid.hash());
    print_population(grid.population());
    println!(
        "Computed stats in {:.1} secs",
        timer.elapsed().as_secs_f64()
    );
    Ok(())
}

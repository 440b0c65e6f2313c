use kdam::{tqdm, BarExt};
use rand::rngs::StdRng;
use rand::SeedableRng;
use structopt::StructOpt;

use vacuum_world::env::{parse_row, VacuumEnv};
use vacuum_world::report::{print_banner, print_summary, ConsoleReporter, Reporter};
use vacuum_world::simulation::{RunSummary, Simulation, StepRecord};
use vacuum_world::PatrolAgent;

/// Run the patrol vacuum agent on a row of cells that dirty themselves at random
#[derive(StructOpt, Debug)]
#[structopt(name = "vacuum_world")]
struct Cli {
    /// Number of cells in the row
    #[structopt(long = "cells", short = "c", default_value = "4")]
    cells: usize,

    /// Number of simulation steps
    #[structopt(long = "steps", short = "n", default_value = "30")]
    steps: usize,

    /// Probability that each clean cell becomes dirty on a step
    #[structopt(long = "dirty_probability", short = "p", default_value = "0.1")]
    dirty_probability: f64,

    /// Initial row state, one 'C' or 'D' per cell (default: all dirty)
    #[structopt(long = "initial_state")]
    initial_state: Option<String>,

    /// Starting cell of the agent (default: random)
    #[structopt(long = "start_position")]
    start_position: Option<usize>,

    /// Seed for the random generator (default: from entropy)
    #[structopt(long = "seed")]
    seed: Option<u64>,

    /// Hide the per step transcript and show a progress bar instead
    #[structopt(long = "quiet", short = "q")]
    quiet: bool,
}

/// Advances a progress bar per step and prints only the final summary.
struct ProgressReporter {
    bar: kdam::Bar,
}

impl Reporter for ProgressReporter {
    fn on_step(&mut self, _record: &StepRecord) {
        self.bar.update(1);
    }

    fn on_end(&mut self, summary: &RunSummary) {
        print_summary(summary);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let rng: StdRng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let initial_state = cli.initial_state.as_deref().map(parse_row).transpose()?;
    let env = VacuumEnv::new(cli.cells, initial_state, cli.start_position, rng)?;
    let agent = PatrolAgent::new(cli.cells);
    let mut simulation = Simulation::new(env, agent, cli.steps, cli.dirty_probability)?;

    if cli.quiet {
        let mut reporter = ProgressReporter {
            bar: tqdm!(total = cli.steps),
        };
        simulation.run(&mut reporter);
    } else {
        print_banner(simulation.env(), cli.dirty_probability);
        simulation.run(&mut ConsoleReporter);
    }
    Ok(())
}

fn main() {
    if let Err(e) = run(Cli::from_args()) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

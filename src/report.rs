use crate::env::{render_row, VacuumEnv};
use crate::simulation::{RunSummary, StepRecord};

/// Consumer of the simulation's per-step records and final summary. The
/// simulation itself never prints.
pub trait Reporter {
    fn on_step(&mut self, record: &StepRecord);
    fn on_end(&mut self, summary: &RunSummary);
}

/// Discards everything. Useful for tests and embedding.
pub struct NullReporter;

impl Reporter for NullReporter {
    fn on_step(&mut self, _record: &StepRecord) {}
    fn on_end(&mut self, _summary: &RunSummary) {}
}

/// Prints a transcript of the run: one block per step, then the two
/// performance sections.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn on_step(&mut self, record: &StepRecord) {
        println!("Step {}:", record.step);
        if !record.newly_dirtied.is_empty() {
            println!("  WORLD: cells {:?} became dirty", record.newly_dirtied);
        }
        println!("  State (step start): {}", render_row(&record.state_before));
        println!(
            "  Percept: ({}, {}) -> Action: {} -> Points: {}",
            record.percept.position, record.percept.cell_state, record.action, record.points
        );
        println!(
            "  State (step end): {}, new position: {}",
            render_row(&record.state_after),
            record.position_after
        );
    }

    fn on_end(&mut self, summary: &RunSummary) {
        println!("\n--- SIMULATION END ---");
        print_summary(summary);
    }
}

/// Prints the run banner: initial state, start position, dirty probability.
pub fn print_banner(env: &VacuumEnv, dirty_probability: f64) {
    println!("--- SIMULATION START (stochastic environment) ---");
    println!(
        "Initial state: {}, initial position: {}",
        render_row(&env.snapshot()),
        env.agent_position()
    );
    println!("Dirty probability: {}\n", dirty_probability);
}

/// Prints the two performance sections. They measure different things and
/// are reported side by side, never combined.
pub fn print_summary(summary: &RunSummary) {
    println!("\n--- PERFORMANCE (actions) ---");
    println!("Total points (actions): {}", summary.action_points);
    println!("Total steps: {}", summary.steps);
    match summary.action_performance() {
        Some(performance) => println!("Performance (points/step): {:.2}", performance),
        None => println!("Performance (points/step): n/a"),
    }

    println!("\n--- PERFORMANCE (state) ---");
    println!("Total points (state): {}", summary.state_points);
    println!("Maximum possible score: {}", summary.max_state_points());
    match summary.state_performance() {
        Some(performance) => {
            println!("Performance (average cleanliness): {:.2}%", performance * 100.0)
        }
        None => println!("Performance (average cleanliness): n/a"),
    }
}

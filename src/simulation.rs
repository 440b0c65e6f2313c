use crate::agent::Agent;
use crate::env::{Action, CellState, ConfigError, Percept, VacuumEnv};
use crate::report::Reporter;

/// Everything that happened in one step, handed to the reporter.
#[derive(Debug, Clone)]
pub struct StepRecord {
    pub step: usize,
    /// Cells the world dirtied this step, ascending.
    pub newly_dirtied: Vec<usize>,
    /// Row state after the world step, before the agent acted.
    pub state_before: Vec<CellState>,
    pub percept: Percept,
    pub action: Action,
    pub points: i64,
    pub state_after: Vec<CellState>,
    pub position_after: usize,
}

/// The two performance measures of a finished run, kept separate: points
/// earned by actions, and clean cells accumulated across the recorded
/// pre-action states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: usize,
    pub num_cells: usize,
    pub action_points: i64,
    pub state_points: usize,
}

impl RunSummary {
    /// Mean action points per step, `None` for a zero-step run.
    pub fn action_performance(&self) -> Option<f64> {
        if self.steps == 0 {
            return None;
        }
        Some(self.action_points as f64 / self.steps as f64)
    }

    pub fn max_state_points(&self) -> usize {
        self.num_cells * self.steps
    }

    /// Fraction of clean cell-steps out of the maximum, `None` for a
    /// zero-step run.
    pub fn state_performance(&self) -> Option<f64> {
        if self.steps == 0 {
            return None;
        }
        Some(self.state_points as f64 / self.max_state_points() as f64)
    }
}

/// Drives the agent through a fixed number of steps of the stochastic world.
///
/// Each step: the world dirties itself, the pre-action state is recorded,
/// the agent perceives and acts, the action is applied, the score updated.
pub struct Simulation<A: Agent> {
    env: VacuumEnv,
    agent: A,
    steps: usize,
    dirty_probability: f64,
    history: Vec<Vec<CellState>>,
    action_points: i64,
}

impl<A: Agent> Simulation<A> {
    pub fn new(
        env: VacuumEnv,
        agent: A,
        steps: usize,
        dirty_probability: f64,
    ) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&dirty_probability) {
            return Err(ConfigError::DirtyProbability(dirty_probability));
        }
        return Ok(Self {
            env,
            agent,
            steps,
            dirty_probability,
            history: vec![],
            action_points: 0,
        });
    }

    pub fn env(&self) -> &VacuumEnv {
        &self.env
    }

    /// The recorded pre-action snapshots, one per executed step.
    pub fn history(&self) -> &[Vec<CellState>] {
        &self.history
    }

    fn points_for(action: &Action) -> i64 {
        match action {
            Action::Vacuum => 10,
            Action::MoveRight | Action::MoveLeft => -1,
        }
    }

    /// Runs the configured number of steps and returns the summary. The
    /// reporter sees every step and the final summary.
    pub fn run(&mut self, reporter: &mut dyn Reporter) -> RunSummary {
        for step in 0..self.steps {
            let newly_dirtied = self.env.world_step(self.dirty_probability);
            let state_before = self.env.snapshot();
            self.history.push(state_before.clone());

            let percept = self.env.percept();
            let action = self.agent.act(&percept);
            self.env.execute_action(&action);

            let points = Self::points_for(&action);
            self.action_points += points;

            reporter.on_step(&StepRecord {
                step,
                newly_dirtied,
                state_before,
                percept,
                action,
                points,
                state_after: self.env.snapshot(),
                position_after: self.env.agent_position(),
            });
        }
        let summary = self.summary();
        reporter.on_end(&summary);
        return summary;
    }

    fn summary(&self) -> RunSummary {
        let state_points: usize = self
            .history
            .iter()
            .map(|state| state.iter().filter(|c| **c == CellState::Clean).count())
            .sum();
        RunSummary {
            steps: self.steps,
            num_cells: self.env.num_cells(),
            action_points: self.action_points,
            state_points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::PatrolAgent;
    use crate::env::parse_row;
    use crate::report::NullReporter;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn simulation(
        num_cells: usize,
        initial: Option<&str>,
        start: usize,
        steps: usize,
        dirty_probability: f64,
    ) -> Simulation<PatrolAgent> {
        let initial = initial.map(|s| parse_row(s).unwrap());
        let env = VacuumEnv::new(
            num_cells,
            initial,
            Some(start),
            StdRng::seed_from_u64(7),
        )
        .unwrap();
        let agent = PatrolAgent::new(num_cells);
        Simulation::new(env, agent, steps, dirty_probability).unwrap()
    }

    #[test]
    fn test_invalid_dirty_probability_is_rejected() {
        let env = VacuumEnv::new(4, None, Some(0), StdRng::seed_from_u64(7)).unwrap();
        let agent = PatrolAgent::new(4);
        assert!(matches!(
            Simulation::new(env, agent, 10, 1.5),
            Err(ConfigError::DirtyProbability(_))
        ));
    }

    #[test]
    fn test_first_two_steps_of_the_textbook_run() {
        // all dirty, agent at 0, nothing re-dirties: Vacuum then MoveRight
        let mut sim = simulation(4, None, 0, 2, 0.0);
        let summary = sim.run(&mut NullReporter);
        assert_eq!(summary.action_points, 9);
        assert_eq!(sim.history().len(), 2);
        assert_eq!(sim.history()[0], parse_row("DDDD").unwrap());
        assert_eq!(sim.history()[1], parse_row("CDDD").unwrap());
        assert_eq!(sim.env().agent_position(), 1);
    }

    #[test]
    fn test_all_dirty_sweep_matches_the_closed_form() {
        // the agent alternates vacuum and move: V M V M V M over 2N-2 steps
        let n = 4;
        let mut sim = simulation(n, None, 0, 2 * n - 2, 0.0);
        let summary = sim.run(&mut NullReporter);
        assert_eq!(summary.action_points, 3 * 10 - 3);
        // clean counts before each step are 0 1 1 2 2 3, i.e. (N-1)^2
        assert_eq!(summary.state_points, (n - 1) * (n - 1));
        assert_eq!(summary.max_state_points(), n * (2 * n - 2));
    }

    #[test]
    fn test_clean_row_patrol_goes_there_and_back() {
        let n = 4;
        let mut sim = simulation(n, Some("CCCC"), 0, 2 * n - 2, 0.0);
        let summary = sim.run(&mut NullReporter);
        // six moves, no vacuuming, ending back at the left end
        assert_eq!(summary.action_points, -(2 * n as i64 - 2));
        assert_eq!(summary.state_points, n * (2 * n - 2));
        assert_eq!(summary.state_performance(), Some(1.0));
        assert_eq!(sim.env().agent_position(), 0);
    }

    #[test]
    fn test_world_that_always_redirties_keeps_the_agent_vacuuming() {
        let mut sim = simulation(4, Some("CCCC"), 2, 5, 1.0);
        let summary = sim.run(&mut NullReporter);
        // every pre-action snapshot is fully dirty again
        for state in sim.history() {
            assert_eq!(state, &parse_row("DDDD").unwrap());
        }
        assert_eq!(summary.action_points, 5 * 10);
        assert_eq!(summary.state_points, 0);
        assert_eq!(sim.env().agent_position(), 2);
    }

    #[test]
    fn test_zero_step_run_has_no_performance() {
        let mut sim = simulation(4, None, 0, 0, 0.1);
        let summary = sim.run(&mut NullReporter);
        assert_eq!(summary.action_points, 0);
        assert_eq!(summary.state_points, 0);
        assert_eq!(summary.action_performance(), None);
        assert_eq!(summary.state_performance(), None);
        assert!(sim.history().is_empty());
    }

    #[test]
    fn test_runs_with_the_same_seed_are_identical() {
        let run = |seed: u64| {
            let env = VacuumEnv::new(6, None, None, StdRng::seed_from_u64(seed)).unwrap();
            let mut sim = Simulation::new(env, PatrolAgent::new(6), 50, 0.3).unwrap();
            let summary = sim.run(&mut NullReporter);
            (summary, sim.history().to_vec())
        };
        assert_eq!(run(123), run(123));
    }

    #[test]
    fn test_performance_ratios_divide_by_steps_and_cells() {
        let mut sim = simulation(4, None, 0, 2, 0.0);
        let summary = sim.run(&mut NullReporter);
        assert_eq!(summary.action_performance(), Some(4.5));
        assert_eq!(summary.state_performance(), Some(1.0 / 8.0));
    }
}

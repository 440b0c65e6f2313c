use std::fmt;
use std::str::FromStr;

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::Rng;

/// State of a single cell of the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Clean,
    Dirty,
}

impl CellState {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(CellState::Clean),
            'D' => Some(CellState::Dirty),
            _ => None,
        }
    }

    fn to_char(self) -> char {
        match self {
            CellState::Clean => 'C',
            CellState::Dirty => 'D',
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellState::Clean => write!(f, "Clean"),
            CellState::Dirty => write!(f, "Dirty"),
        }
    }
}

/// Everything the agent can do to the environment. The enum is closed, so an
/// unknown action cannot reach [`VacuumEnv::execute_action`]; open inputs go
/// through [`Action::from_str`], which rejects anything it does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Vacuum,
    MoveRight,
    MoveLeft,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Vacuum => write!(f, "Vacuum"),
            Action::MoveRight => write!(f, "MoveRight"),
            Action::MoveLeft => write!(f, "MoveLeft"),
        }
    }
}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Vacuum" => Ok(Action::Vacuum),
            "MoveRight" => Ok(Action::MoveRight),
            "MoveLeft" => Ok(Action::MoveLeft),
            _ => Err(UnknownAction(s.to_string())),
        }
    }
}

/// What the agent senses at decision time: where it is and whether that cell
/// is dirty. Produced fresh by the environment every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Percept {
    pub position: usize,
    pub cell_state: CellState,
}

#[derive(Debug, Clone)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown action '{}'", self.0)
    }
}

impl std::error::Error for UnknownAction {}

/// Rejected configuration, surfaced before any simulation step runs.
#[derive(Debug, Clone)]
pub enum ConfigError {
    NoCells,
    DirtyProbability(f64),
    StartPosition { position: usize, num_cells: usize },
    InitialStateSize { expected: usize, got: usize },
    InitialStateCell(char),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoCells => {
                write!(f, "the row needs at least one cell")
            }
            ConfigError::DirtyProbability(p) => {
                write!(f, "dirty probability {} is not in [0, 1]", p)
            }
            ConfigError::StartPosition {
                position,
                num_cells,
            } => {
                write!(
                    f,
                    "start position {} is outside the row of {} cells",
                    position, num_cells
                )
            }
            ConfigError::InitialStateSize { expected, got } => {
                write!(
                    f,
                    "initial state covers {} cells, the row has {}",
                    got, expected
                )
            }
            ConfigError::InitialStateCell(c) => {
                write!(f, "initial state cell '{}' is not 'C' or 'D'", c)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parses a row literal, one 'C' or 'D' per cell, e.g. "DCDD".
pub fn parse_row(s: &str) -> Result<Vec<CellState>, ConfigError> {
    s.chars()
        .map(|c| CellState::from_char(c).ok_or(ConfigError::InitialStateCell(c)))
        .collect()
}

/// Renders a row as the same compact literal [`parse_row`] accepts.
pub fn render_row(cells: &[CellState]) -> String {
    return cells.iter().map(|c| c.to_char()).collect();
}

/// A row of cells that dirty themselves at random, with a single agent on it.
///
/// The environment is the only owner and mutator of the cell states and of
/// the agent position. The random generator is supplied at construction, so
/// a seeded run is reproducible.
#[derive(Debug, Clone)]
pub struct VacuumEnv {
    cells: Vec<CellState>,
    agent_pos: usize,
    dist: Uniform<f64>,
    rng: StdRng,
}

impl VacuumEnv {
    /// Builds the row. A missing `initial_state` means every cell starts
    /// Dirty; a missing `start_position` is drawn uniformly from `rng`.
    pub fn new(
        num_cells: usize,
        initial_state: Option<Vec<CellState>>,
        start_position: Option<usize>,
        mut rng: StdRng,
    ) -> Result<Self, ConfigError> {
        if num_cells == 0 {
            return Err(ConfigError::NoCells);
        }
        let cells: Vec<CellState> = match initial_state {
            Some(cells) => {
                if cells.len() != num_cells {
                    return Err(ConfigError::InitialStateSize {
                        expected: num_cells,
                        got: cells.len(),
                    });
                }
                cells
            }
            None => vec![CellState::Dirty; num_cells],
        };
        let agent_pos: usize = match start_position {
            Some(position) => {
                if position >= num_cells {
                    return Err(ConfigError::StartPosition {
                        position,
                        num_cells,
                    });
                }
                position
            }
            None => rng.gen_range(0..num_cells),
        };
        return Ok(Self {
            cells,
            agent_pos,
            dist: Uniform::from(0.0..1.0),
            rng,
        });
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn agent_position(&self) -> usize {
        self.agent_pos
    }

    /// The agent's current position and the state of the cell under it.
    pub fn percept(&self) -> Percept {
        Percept {
            position: self.agent_pos,
            cell_state: self.cells[self.agent_pos],
        }
    }

    /// Applies the agent's action. Moves past either end of the row are
    /// clamped, vacuuming a clean cell changes nothing.
    pub fn execute_action(&mut self, action: &Action) {
        match action {
            Action::Vacuum => {
                self.cells[self.agent_pos] = CellState::Clean;
            }
            Action::MoveRight => {
                if self.agent_pos < self.cells.len() - 1 {
                    self.agent_pos += 1;
                }
            }
            Action::MoveLeft => {
                if self.agent_pos > 0 {
                    self.agent_pos -= 1;
                }
            }
        }
    }

    /// Evolves the world one step: every Clean cell independently becomes
    /// Dirty with probability `dirty_probability`. Dirty cells are never
    /// touched. Returns the indices that flipped, in ascending order.
    pub fn world_step(&mut self, dirty_probability: f64) -> Vec<usize> {
        let mut dirtied: Vec<usize> = vec![];
        for i in 0..self.cells.len() {
            if self.cells[i] == CellState::Clean {
                let random: f64 = self.dist.sample(&mut self.rng);
                if random < dirty_probability {
                    self.cells[i] = CellState::Dirty;
                    dirtied.push(i);
                }
            }
        }
        return dirtied;
    }

    /// Independent copy of the cell states, safe to keep in a history log.
    pub fn snapshot(&self) -> Vec<CellState> {
        self.cells.to_vec()
    }
}

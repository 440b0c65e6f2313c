use crate::env::{Action, CellState, Percept};

/// A reactive agent: a percept goes in, an action comes out. The agent never
/// sees the environment itself.
pub trait Agent {
    fn act(&mut self, percept: &Percept) -> Action;
}

/// Which way the agent is currently sweeping the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Left,
}

/// Simple reflex agent with one bit of internal state: its sweep direction.
///
/// It vacuums whatever dirt it stands on, and otherwise patrols the row,
/// reversing whenever it reaches an end. Since the world only dirties clean
/// cells, an unbroken end-to-end sweep revisits every cell periodically.
#[derive(Debug, Clone)]
pub struct PatrolAgent {
    num_cells: usize,
    direction: Direction,
}

impl PatrolAgent {
    pub fn new(num_cells: usize) -> Self {
        Self {
            num_cells,
            direction: Direction::Right,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl Agent for PatrolAgent {
    fn act(&mut self, percept: &Percept) -> Action {
        if percept.cell_state == CellState::Dirty {
            return Action::Vacuum;
        }
        // reverse at the ends before choosing the move
        if percept.position == 0 {
            self.direction = Direction::Right;
        } else if percept.position + 1 == self.num_cells {
            self.direction = Direction::Left;
        }
        match self.direction {
            Direction::Right => Action::MoveRight,
            Direction::Left => Action::MoveLeft,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn percept(position: usize, cell_state: CellState) -> Percept {
        Percept {
            position,
            cell_state,
        }
    }

    #[test]
    fn test_dirt_is_always_vacuumed() {
        let mut agent = PatrolAgent::new(4);
        for position in 0..4 {
            assert_eq!(
                agent.act(&percept(position, CellState::Dirty)),
                Action::Vacuum
            );
        }
    }

    #[test]
    fn test_vacuum_is_only_chosen_on_dirt() {
        let mut agent = PatrolAgent::new(4);
        for position in 0..4 {
            assert_ne!(
                agent.act(&percept(position, CellState::Clean)),
                Action::Vacuum
            );
        }
    }

    #[test]
    fn test_clean_boundaries_reverse_the_sweep() {
        let mut agent = PatrolAgent::new(4);
        assert_eq!(agent.act(&percept(3, CellState::Clean)), Action::MoveLeft);
        assert_eq!(agent.direction(), Direction::Left);
        assert_eq!(agent.act(&percept(0, CellState::Clean)), Action::MoveRight);
        assert_eq!(agent.direction(), Direction::Right);
    }

    #[test]
    fn test_interior_cells_keep_the_current_direction() {
        let mut agent = PatrolAgent::new(5);
        agent.act(&percept(4, CellState::Clean));
        assert_eq!(agent.direction(), Direction::Left);
        assert_eq!(agent.act(&percept(2, CellState::Clean)), Action::MoveLeft);
        assert_eq!(agent.act(&percept(1, CellState::Clean)), Action::MoveLeft);
        assert_eq!(agent.direction(), Direction::Left);
    }

    #[test]
    fn test_dirty_boundary_does_not_touch_the_direction() {
        let mut agent = PatrolAgent::new(4);
        agent.act(&percept(3, CellState::Clean));
        assert_eq!(agent.direction(), Direction::Left);
        // the vacuum reflex fires before the boundary check
        assert_eq!(agent.act(&percept(0, CellState::Dirty)), Action::Vacuum);
        assert_eq!(agent.direction(), Direction::Left);
    }

    #[test]
    fn test_empty_row_agent_does_not_panic() {
        // degenerate size; the boundary check must not underflow
        let mut agent = PatrolAgent::new(0);
        assert_eq!(agent.act(&percept(0, CellState::Clean)), Action::MoveRight);
        assert_eq!(agent.act(&percept(0, CellState::Dirty)), Action::Vacuum);
    }

    #[test]
    fn test_single_cell_row_bounces_in_place() {
        let mut agent = PatrolAgent::new(1);
        // position 0 is both ends; the left-end check wins
        assert_eq!(agent.act(&percept(0, CellState::Clean)), Action::MoveRight);
    }
}

pub mod env;
pub mod report;
pub mod simulation;

mod agent;

pub use agent::{Agent, Direction, PatrolAgent};

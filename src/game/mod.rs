pub mod attempt;
pub mod continents;
pub mod machine;
pub mod session;
pub mod timer;

pub use attempt::{Feedback, PuzzleAttempt};
pub use continents::{ContinentGraph, ContinentNode};
pub use machine::GameMachine;
pub use session::{format_time, DebriefReason, GameSession, Screen};

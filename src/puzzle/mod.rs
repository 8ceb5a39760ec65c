pub mod catalog;
pub mod loader;
pub mod types;

pub use catalog::Catalog;
pub use types::{AnswerKind, ContinentSpec, Position, PuzzleDefinition};

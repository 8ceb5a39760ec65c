pub mod answer;

pub use answer::{evaluate, Evaluation};

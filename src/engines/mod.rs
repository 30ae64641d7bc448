pub mod execution;
pub mod evaluation;
pub mod generation;

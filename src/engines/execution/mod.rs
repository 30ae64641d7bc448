pub mod memory;
pub mod vm;

pub use memory::{Opcode, WorkingMemory};
pub use vm::{ExecutionEngine, ExecutionTrace, Termination};

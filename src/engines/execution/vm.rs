use super::memory::{count_set_bits, decode_address, decode_opcode, Opcode, WorkingMemory};
use crate::config::WorldConfig;
use crate::engines::generation::genome::{Genome, GENOME_LENGTH};
use crate::types::{Direction, GridBounds, Position};
use serde::{Deserialize, Serialize};

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    OutOfBounds,
    AllTreasuresFound,
    StepLimit,
}

/// Immutable result of running one genome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionTrace {
    pub final_position: Position,
    /// One flag per configured treasure, in configuration order
    pub treasure_found: Vec<bool>,
    pub out_of_bounds: bool,
    pub movement_count: usize,
    pub moves: Vec<Direction>,
    pub steps_executed: usize,
    pub termination: Termination,
    /// Working memory as left by the program
    pub final_memory: Genome,
}

impl ExecutionTrace {
    pub fn found_count(&self) -> usize {
        self.treasure_found.iter().filter(|&&found| found).count()
    }

    pub fn found_indices(&self) -> Vec<usize> {
        self.treasure_found
            .iter()
            .enumerate()
            .filter_map(|(i, &found)| found.then_some(i))
            .collect()
    }

    pub fn all_found(&self) -> bool {
        self.treasure_found.iter().all(|&found| found)
    }
}

struct AgentState {
    pc: usize,
    position: Position,
    steps: usize,
    movement_count: usize,
    moves: Vec<Direction>,
    out_of_bounds: bool,
    treasure_found: Vec<bool>,
}

/// Interprets genomes against a fixed world. Holds no per-run state, so one
/// engine can be shared across threads.
#[derive(Debug, Clone)]
pub struct ExecutionEngine {
    max_steps: usize,
    start: Position,
    treasures: Vec<Position>,
    bounds: GridBounds,
}

impl ExecutionEngine {
    pub fn new(
        max_steps: usize,
        start: Position,
        treasures: Vec<Position>,
        bounds: GridBounds,
    ) -> Self {
        Self {
            max_steps,
            start,
            treasures,
            bounds,
        }
    }

    pub fn from_world(world: &WorldConfig, max_steps: usize) -> Self {
        Self::new(max_steps, world.start, world.treasures.clone(), world.bounds)
    }

    /// Executes `genome` on a fresh copy of its memory. At most `max_steps`
    /// instructions are executed, so jump cycles always terminate.
    pub fn run(&self, genome: &Genome) -> ExecutionTrace {
        let mut memory = WorkingMemory::load(genome);
        let mut state = AgentState {
            pc: 0,
            position: self.start,
            steps: 0,
            movement_count: 0,
            moves: Vec::new(),
            out_of_bounds: false,
            treasure_found: vec![false; self.treasures.len()],
        };
        let mut termination = Termination::StepLimit;

        while state.steps < self.max_steps {
            if !self.bounds.contains(state.position) {
                state.out_of_bounds = true;
                termination = Termination::OutOfBounds;
                break;
            }
            if state.treasure_found.iter().all(|&found| found) {
                termination = Termination::AllTreasuresFound;
                break;
            }

            let cell = memory.get(state.pc % GENOME_LENGTH);
            let addr = decode_address(cell);

            match decode_opcode(cell) {
                Opcode::Increment => {
                    memory.increment(addr);
                    state.pc += 1;
                }
                Opcode::Decrement => {
                    memory.decrement(addr);
                    state.pc += 1;
                }
                Opcode::Jump => {
                    state.pc = addr;
                }
                Opcode::Emit => {
                    let direction = Direction::from_set_bits(count_set_bits(memory.get(addr)));
                    self.apply_move(&mut state, direction);
                    state.pc += 1;
                }
            }

            state.steps += 1;
        }

        // A move on the final allowed step can still leave the grid
        if !state.out_of_bounds && !self.bounds.contains(state.position) {
            state.out_of_bounds = true;
            termination = Termination::OutOfBounds;
        }

        ExecutionTrace {
            final_position: state.position,
            treasure_found: state.treasure_found,
            out_of_bounds: state.out_of_bounds,
            movement_count: state.movement_count,
            moves: state.moves,
            steps_executed: state.steps,
            termination,
            final_memory: memory.snapshot(),
        }
    }

    fn apply_move(&self, state: &mut AgentState, direction: Direction) {
        state.position = state.position.step(direction);
        state.moves.push(direction);
        state.movement_count += 1;

        // Treasures sharing a coordinate are claimed one per visit, first listed first
        if let Some(index) = self
            .treasures
            .iter()
            .zip(&state.treasure_found)
            .position(|(&treasure, &found)| !found && treasure == state.position)
        {
            state.treasure_found[index] = true;
        }
    }
}

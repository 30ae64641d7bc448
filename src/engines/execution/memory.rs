use crate::engines::generation::genome::{Genome, GENOME_LENGTH};

/// Opcode held in the two high bits of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Increment, // 00
    Decrement, // 01
    Jump,      // 10
    Emit,      // 11
}

const ADDRESS_MASK: u8 = 0b0011_1111;

pub fn increment(cell: u8) -> u8 {
    cell.wrapping_add(1)
}

pub fn decrement(cell: u8) -> u8 {
    cell.wrapping_sub(1)
}

pub fn count_set_bits(cell: u8) -> u32 {
    cell.count_ones()
}

pub fn decode_address(cell: u8) -> usize {
    (cell & ADDRESS_MASK) as usize
}

pub fn decode_opcode(cell: u8) -> Opcode {
    match cell >> 6 {
        0b00 => Opcode::Increment,
        0b01 => Opcode::Decrement,
        0b10 => Opcode::Jump,
        _ => Opcode::Emit,
    }
}

/// Builds a cell from an opcode and a cell address (address is masked to 6 bits)
pub fn encode(opcode: Opcode, address: usize) -> u8 {
    let high = match opcode {
        Opcode::Increment => 0b00,
        Opcode::Decrement => 0b01,
        Opcode::Jump => 0b10,
        Opcode::Emit => 0b11,
    };
    (high << 6) | (address as u8 & ADDRESS_MASK)
}

/// Disposable copy of a genome owned by a single execution run.
/// Indexing wraps modulo the genome length.
#[derive(Debug, Clone)]
pub struct WorkingMemory {
    cells: [u8; GENOME_LENGTH],
}

impl WorkingMemory {
    pub fn load(genome: &Genome) -> Self {
        Self {
            cells: *genome.cells(),
        }
    }

    pub fn get(&self, index: usize) -> u8 {
        self.cells[index % GENOME_LENGTH]
    }

    pub fn increment(&mut self, index: usize) {
        let slot = &mut self.cells[index % GENOME_LENGTH];
        *slot = increment(*slot);
    }

    pub fn decrement(&mut self, index: usize) {
        let slot = &mut self.cells[index % GENOME_LENGTH];
        *slot = decrement(*slot);
    }

    pub fn snapshot(&self) -> Genome {
        Genome::new(self.cells)
    }
}

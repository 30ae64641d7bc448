//! Genome representation for the finder program
//!
//! A genome is a fixed sequence of 64 bytes. Each byte is one instruction cell:
//! the high 2 bits select the opcode, the low 6 bits address another cell.
//! The execution engine interprets a *copy* of these bytes, so a `Genome`
//! itself never changes once built. Breeding produces new genomes instead.
//!
//! Because the cells live in a `[u8; GENOME_LENGTH]` the length and byte-range
//! invariants hold by construction. Untrusted input (slices, JSON arrays)
//! goes through `TryFrom`, which rejects anything that is not exactly 64 bytes.

use crate::error::{FinderError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const GENOME_LENGTH: usize = 64;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Genome {
    cells: [u8; GENOME_LENGTH],
}

impl Genome {
    pub const fn new(cells: [u8; GENOME_LENGTH]) -> Self {
        Self { cells }
    }

    pub fn from_slice(cells: &[u8]) -> Result<Self> {
        let cells: [u8; GENOME_LENGTH] = cells.try_into().map_err(|_| {
            FinderError::InvalidGenome(format!(
                "expected {} cells, got {}",
                GENOME_LENGTH,
                cells.len()
            ))
        })?;
        Ok(Self { cells })
    }

    /// Accepts wider integers (e.g. parsed from text) and rejects values above 255
    pub fn from_values(values: &[u32]) -> Result<Self> {
        let bytes = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                u8::try_from(v).map_err(|_| {
                    FinderError::InvalidGenome(format!("cell {} holds {}, not a byte", i, v))
                })
            })
            .collect::<Result<Vec<u8>>>()?;
        Self::from_slice(&bytes)
    }

    pub fn cells(&self) -> &[u8; GENOME_LENGTH] {
        &self.cells
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    pub fn to_bytes(self) -> [u8; GENOME_LENGTH] {
        self.cells
    }

    /// One line per cell in binary: `Cell 00: 10000000`
    pub fn memory_table(&self) -> String {
        let mut table = String::from("Memory Table:\n");
        for (i, cell) in self.cells.iter().enumerate() {
            table.push_str(&format!("Cell {:02}: {:08b}\n", i, cell));
        }
        table
    }
}

impl TryFrom<Vec<u8>> for Genome {
    type Error = FinderError;

    fn try_from(value: Vec<u8>) -> Result<Self> {
        Self::from_slice(&value)
    }
}

impl From<Genome> for Vec<u8> {
    fn from(genome: Genome) -> Self {
        genome.cells.to_vec()
    }
}

impl fmt::Debug for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Genome(")?;
        for cell in &self.cells {
            write!(f, "{:02x}", cell)?;
        }
        write!(f, ")")
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grid coordinate. `y` grows downward, so `Up` decrements it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Inclusive rectangle the finder must stay inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    pub min: Position,
    pub max: Position,
}

impl GridBounds {
    pub const fn new(min: Position, max: Position) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, position: Position) -> bool {
        (self.min.x..=self.max.x).contains(&position.x)
            && (self.min.y..=self.max.y).contains(&position.y)
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self::new(Position::new(0, 0), Position::new(6, 6))
    }
}

/// Move emitted by the `Emit` opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Right,
    Left,
}

impl Direction {
    /// Maps the number of set bits of the addressed cell to a move.
    /// Thresholds are checked in order: 0-2 Up, 3-4 Down, 5-6 Right, 7-8 Left.
    pub fn from_set_bits(ones: u32) -> Self {
        if ones <= 2 {
            Direction::Up
        } else if ones <= 4 {
            Direction::Down
        } else if ones <= 6 {
            Direction::Right
        } else {
            Direction::Left
        }
    }

    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Right => 'R',
            Direction::Left => 'L',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Space-separated move symbols, e.g. `"U U R D"`.
pub fn render_moves(moves: &[Direction]) -> String {
    moves
        .iter()
        .map(|d| d.symbol().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

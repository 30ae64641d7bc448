use super::traits::ConfigSection;
use crate::error::FinderError;
use crate::types::{GridBounds, Position};
use serde::{Deserialize, Serialize};

/// Grid, start position and treasure layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub bounds: GridBounds,
    pub start: Position,
    pub treasures: Vec<Position>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            bounds: GridBounds::default(),
            start: Position::new(3, 6),
            treasures: vec![
                Position::new(4, 5),
                Position::new(1, 4),
                Position::new(2, 2),
                Position::new(4, 1),
                Position::new(6, 3),
            ],
        }
    }
}

impl ConfigSection for WorldConfig {
    fn section_name() -> &'static str {
        "world"
    }

    fn validate(&self) -> Result<(), FinderError> {
        let GridBounds { min, max } = self.bounds;
        if min.x > max.x || min.y > max.y {
            return Err(FinderError::Configuration(format!(
                "Grid bounds are empty: min {} max {}",
                min, max
            )));
        }
        if !self.bounds.contains(self.start) {
            return Err(FinderError::Configuration(format!(
                "Start position {} lies outside the grid",
                self.start
            )));
        }
        if self.treasures.is_empty() {
            return Err(FinderError::Configuration(
                "At least one treasure is required".to_string()
            ));
        }
        if let Some(treasure) = self.treasures.iter().find(|t| !self.bounds.contains(**t)) {
            return Err(FinderError::Configuration(format!(
                "Treasure {} lies outside the grid",
                treasure
            )));
        }
        Ok(())
    }
}

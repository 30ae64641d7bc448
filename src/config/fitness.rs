use super::traits::ConfigSection;
use crate::error::FinderError;
use serde::{Deserialize, Serialize};

/// Reward policy for collected treasures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum TreasureBonus {
    /// `bonus * found`
    Linear { bonus: f64 },
    /// `bonus * 2^found`
    Exponential { bonus: f64 },
    /// `found * (bonus + k * found)`
    Quadratic { bonus: f64, k: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessConfig {
    /// Added once per emitted move (usually negative)
    pub step_penalty: f64,
    pub treasure_bonus: TreasureBonus,
    /// Added once if the finder left the grid (usually negative)
    pub out_of_bounds_penalty: f64,
    /// Subtract the rank-weighted distance to every unfound treasure
    pub distance_penalty: bool,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            step_penalty: -1.0,
            treasure_bonus: TreasureBonus::Exponential { bonus: 15.0 },
            out_of_bounds_penalty: -5.0,
            distance_penalty: true,
        }
    }
}

impl ConfigSection for FitnessConfig {
    fn section_name() -> &'static str {
        "fitness"
    }

    fn validate(&self) -> Result<(), FinderError> {
        let bonus_terms = match self.treasure_bonus {
            TreasureBonus::Linear { bonus } | TreasureBonus::Exponential { bonus } => vec![bonus],
            TreasureBonus::Quadratic { bonus, k } => vec![bonus, k],
        };
        let all_finite = [self.step_penalty, self.out_of_bounds_penalty]
            .iter()
            .chain(bonus_terms.iter())
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(FinderError::Configuration(
                "Fitness weights must be finite numbers".to_string()
            ));
        }
        Ok(())
    }
}

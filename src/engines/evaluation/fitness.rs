use crate::config::fitness::{FitnessConfig, TreasureBonus};
use crate::engines::execution::ExecutionTrace;
use crate::types::Position;

impl TreasureBonus {
    /// Reward for `found` collected treasures
    pub fn reward(&self, found: usize) -> f64 {
        let n = found as f64;
        match *self {
            TreasureBonus::Linear { bonus } => bonus * n,
            TreasureBonus::Exponential { bonus } => bonus * 2f64.powi(found as i32),
            TreasureBonus::Quadratic { bonus, k } => n * (bonus + k * n),
        }
    }
}

/// Scores execution traces. Fitness is unbounded in both directions.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    config: FitnessConfig,
    treasures: Vec<Position>,
}

impl FitnessEvaluator {
    pub fn new(config: FitnessConfig, treasures: Vec<Position>) -> Self {
        Self { config, treasures }
    }

    /// Weights large enough to overflow can cancel to NaN; such a run
    /// scores negative infinity so it can never outrank a real score.
    pub fn score(&self, trace: &ExecutionTrace) -> f64 {
        let mut fitness = self.base_score(trace);

        if self.config.distance_penalty {
            fitness -= self.missing_treasure_penalty(trace);
        }

        if fitness.is_nan() {
            log::warn!("Fitness overflowed to NaN, scoring as negative infinity");
            return f64::NEG_INFINITY;
        }

        fitness
    }

    /// Movement cost, treasure reward and the out-of-bounds penalty
    pub fn base_score(&self, trace: &ExecutionTrace) -> f64 {
        let mut fitness = self.config.step_penalty * trace.movement_count as f64;
        fitness += self.config.treasure_bonus.reward(trace.found_count());

        if trace.out_of_bounds {
            fitness += self.config.out_of_bounds_penalty;
        }

        fitness
    }

    /// Sum over unfound treasures of `sqrt(manhattan) * rank`, where rank is
    /// 1 for the first unfound treasure in list order, 2 for the next, ...
    pub fn missing_treasure_penalty(&self, trace: &ExecutionTrace) -> f64 {
        self.treasures
            .iter()
            .zip(&trace.treasure_found)
            .filter(|(_, found)| !**found)
            .enumerate()
            .map(|(rank, (treasure, _))| {
                let distance = trace.final_position.manhattan_distance(*treasure) as f64;
                distance.sqrt() * (rank + 1) as f64
            })
            .sum()
    }
}

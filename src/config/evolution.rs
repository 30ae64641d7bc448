use super::traits::ConfigSection;
use crate::error::FinderError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub num_generations: usize,
    /// Instruction ceiling for a single genome run
    pub max_steps: usize,
    pub mutation_rate: f64,
    /// Upper bound of the per-generation random elite count
    pub max_elite: usize,
    pub breeding_source: BreedingSource,
    pub report_mode: ReportMode,
    /// Stop as soon as a generation's best run collects every treasure
    pub stop_when_solved: bool,
    /// Evaluate genomes on the rayon thread pool
    pub parallel: bool,
    pub seed: Option<u64>,
}

/// Which bytes non-elite parents contribute to crossover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreedingSource {
    /// The genome as it was before execution
    Pristine,
    /// Working memory as the program left it
    Executed,
}

/// Value recorded per generation in the fitness series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportMode {
    Best,
    Sum,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 200,
            num_generations: 3000,
            max_steps: 500,
            mutation_rate: 0.1,
            max_elite: 10,
            breeding_source: BreedingSource::Pristine,
            report_mode: ReportMode::Best,
            stop_when_solved: false,
            parallel: true,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), FinderError> {
        if self.population_size < 2 {
            return Err(FinderError::Configuration(
                "Population size must be at least 2".to_string()
            ));
        }
        if self.max_steps == 0 {
            return Err(FinderError::Configuration(
                "Max steps must be greater than 0".to_string()
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(FinderError::Configuration(
                "Mutation rate must be between 0 and 1".to_string()
            ));
        }
        if self.max_elite == 0 {
            return Err(FinderError::Configuration(
                "Max elite must be at least 1".to_string()
            ));
        }
        Ok(())
    }
}

use crate::engines::execution::ExecutionTrace;
use crate::error::Result;
use crate::engines::generation::{genome::Genome, population::EvaluatedGenome};
use crate::types::{render_moves, Direction};
use serde::{Deserialize, Serialize};

/// What the driver records about one generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub generation: usize,
    /// Best or summed fitness, depending on the report mode
    pub fitness: f64,
    pub best_fitness: f64,
    pub treasures_found: usize,
    pub solved: bool,
    pub best_moves: Vec<Direction>,
}

impl GenerationSummary {
    pub fn best_moves_rendered(&self) -> String {
        render_moves(&self.best_moves)
    }
}

/// Best genome seen over the whole run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Champion {
    pub generation: usize,
    pub genome: Genome,
    pub fitness: f64,
    pub trace: ExecutionTrace,
}

/// Output handed to charting and other reporting collaborators
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvolutionReport {
    /// `(generation index, fitness)` for every evaluated generation
    pub fitness_series: Vec<(usize, f64)>,
    pub last_generation: Option<GenerationSummary>,
    pub champion: Option<Champion>,
    pub solved: bool,
}

impl EvolutionReport {
    pub fn record(&mut self, summary: GenerationSummary, best: &EvaluatedGenome) {
        self.fitness_series.push((summary.generation, summary.fitness));
        self.solved |= summary.solved;

        let improved = self
            .champion
            .as_ref()
            .map_or(true, |champion| best.fitness > champion.fitness);
        if improved {
            self.champion = Some(Champion {
                generation: summary.generation,
                genome: best.genome,
                fitness: best.fitness,
                trace: best.trace.clone(),
            });
        }

        self.last_generation = Some(summary);
    }

    pub fn generations_run(&self) -> usize {
        self.fitness_series.len()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn fitness_values(&self) -> Vec<f64> {
        self.fitness_series.iter().map(|&(_, fitness)| fitness).collect()
    }
}

use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::execution::{ExecutionEngine, ExecutionTrace};
use crate::engines::generation::genome::Genome;
use rayon::prelude::*;

/// A genome together with this generation's run and score
#[derive(Debug, Clone)]
pub struct EvaluatedGenome {
    pub genome: Genome,
    pub fitness: f64,
    pub trace: ExecutionTrace,
}

/// Runs and scores whole generations
pub struct PopulationManager {
    engine: ExecutionEngine,
    evaluator: FitnessEvaluator,
    parallel: bool,
}

impl PopulationManager {
    pub fn new(engine: ExecutionEngine, evaluator: FitnessEvaluator, parallel: bool) -> Self {
        Self {
            engine,
            evaluator,
            parallel,
        }
    }

    pub fn evaluate_one(&self, genome: &Genome) -> EvaluatedGenome {
        let trace = self.engine.run(genome);
        let fitness = self.evaluator.score(&trace);
        EvaluatedGenome {
            genome: *genome,
            fitness,
            trace,
        }
    }

    /// Evaluates every genome and returns them ranked best first.
    /// Runs share nothing, so the parallel path needs no locking; `collect`
    /// keeps input order, which makes the ranking identical either way.
    pub fn evaluate(&self, population: &[Genome]) -> Vec<EvaluatedGenome> {
        let mut evaluated: Vec<EvaluatedGenome> = if self.parallel {
            population
                .par_iter()
                .map(|genome| self.evaluate_one(genome))
                .collect()
        } else {
            population
                .iter()
                .map(|genome| self.evaluate_one(genome))
                .collect()
        };

        Self::rank(&mut evaluated);
        evaluated
    }

    /// Stable sort by fitness (descending); equal fitness keeps incoming order.
    /// NaN is treated as negative infinity and ranks behind every finite score.
    pub fn rank(evaluated: &mut [EvaluatedGenome]) {
        let key = |fitness: f64| if fitness.is_nan() { f64::NEG_INFINITY } else { fitness };
        evaluated.sort_by(|a, b| key(b.fitness).total_cmp(&key(a.fitness)));
    }
}

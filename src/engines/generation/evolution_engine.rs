use crate::config::{AppConfig, EvolutionConfig, ReportMode};
use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::execution::ExecutionEngine;
use crate::engines::generation::{
    breeder::Breeder,
    genome::Genome,
    operators::random_genome,
    population::{EvaluatedGenome, PopulationManager},
    report::{EvolutionReport, GenerationSummary},
};
use crate::error::{FinderError, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct EvolutionEngine {
    config: EvolutionConfig,
    population_manager: PopulationManager,
    breeder: Breeder,
    rng: StdRng,
}

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, summary: &GenerationSummary);
}

impl EvolutionEngine {
    pub fn new(config: &AppConfig) -> Result<Self> {
        config.validate()?;

        let evolution = config.evolution.clone();
        let rng = match evolution.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let engine = ExecutionEngine::from_world(&config.world, evolution.max_steps);
        let evaluator = FitnessEvaluator::new(config.fitness.clone(), config.world.treasures.clone());

        Ok(Self {
            population_manager: PopulationManager::new(engine, evaluator, evolution.parallel),
            breeder: Breeder::from_config(&evolution),
            config: evolution,
            rng,
        })
    }

    pub fn population_manager(&self) -> &PopulationManager {
        &self.population_manager
    }

    /// Run the evolution process from a random first generation
    pub fn run<C: ProgressCallback>(&mut self, callback: C) -> Result<EvolutionReport> {
        let population = self.initialize_population();
        self.run_with_population(population, callback)
    }

    /// Run the evolution process from a caller-provided first generation
    pub fn run_with_population<C: ProgressCallback>(
        &mut self,
        mut population: Vec<Genome>,
        mut callback: C,
    ) -> Result<EvolutionReport> {
        if population.is_empty() {
            return Err(FinderError::Generation(
                "Initial population is empty".to_string()
            ));
        }

        let mut report = EvolutionReport::default();

        for generation in 0..self.config.num_generations {
            callback.on_generation_start(generation);

            let ranked = self.population_manager.evaluate(&population);
            let best = &ranked[0];
            let summary = self.summarize(generation, &ranked);
            let solved = summary.solved;

            callback.on_generation_complete(&summary);
            report.record(summary, best);

            if solved && self.config.stop_when_solved {
                log::info!("All treasures found in generation {}, stopping", generation + 1);
                break;
            }

            // Check termination
            if generation + 1 == self.config.num_generations {
                break;
            }

            population = self.breeder.next_generation(&ranked, &mut self.rng)?;
        }

        Ok(report)
    }

    pub fn initialize_population(&mut self) -> Vec<Genome> {
        (0..self.config.population_size)
            .map(|_| random_genome(&mut self.rng))
            .collect()
    }

    fn summarize(&self, generation: usize, ranked: &[EvaluatedGenome]) -> GenerationSummary {
        let best = &ranked[0];
        let fitness = match self.config.report_mode {
            ReportMode::Best => best.fitness,
            ReportMode::Sum => ranked.iter().map(|e| e.fitness).sum(),
        };

        GenerationSummary {
            generation,
            fitness,
            best_fitness: best.fitness,
            treasures_found: best.trace.found_count(),
            solved: best.trace.all_found(),
            best_moves: best.trace.moves.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Silent;

    impl ProgressCallback for Silent {
        fn on_generation_start(&mut self, _generation: usize) {}

        fn on_generation_complete(&mut self, _summary: &GenerationSummary) {}
    }

    fn small_config(seed: u64) -> AppConfig {
        let mut config = AppConfig::default();
        config.evolution.population_size = 20;
        config.evolution.num_generations = 8;
        config.evolution.max_steps = 100;
        config.evolution.seed = Some(seed);
        config
    }

    #[test]
    fn test_series_has_one_entry_per_generation() {
        let mut engine = EvolutionEngine::new(&small_config(1)).unwrap();
        let report = engine.run(Silent).unwrap();

        assert_eq!(report.generations_run(), 8);
        let indices: Vec<usize> = report.fitness_series.iter().map(|&(g, _)| g).collect();
        assert_eq!(indices, (0..8).collect::<Vec<_>>());
        assert!(report.champion.is_some());
    }

    #[test]
    fn test_sum_mode_reports_aggregate() {
        let mut config = small_config(2);
        config.evolution.report_mode = ReportMode::Sum;
        config.evolution.num_generations = 1;

        let mut engine = EvolutionEngine::new(&config).unwrap();
        let population = engine.initialize_population();
        let expected: f64 = engine
            .population_manager()
            .evaluate(&population)
            .iter()
            .map(|e| e.fitness)
            .sum();

        let report = engine
            .run_with_population(population, Silent)
            .unwrap();
        assert_eq!(report.fitness_series, vec![(0, expected)]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = small_config(3);
        config.evolution.mutation_rate = -0.1;
        assert!(EvolutionEngine::new(&config).is_err());
    }

    #[test]
    fn test_empty_population_rejected() {
        let mut engine = EvolutionEngine::new(&small_config(4)).unwrap();
        let result = engine.run_with_population(Vec::new(), Silent);
        assert!(matches!(result, Err(FinderError::Generation(_))));
    }
}

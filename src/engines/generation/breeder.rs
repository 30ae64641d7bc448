use crate::config::{BreedingSource, EvolutionConfig};
use crate::engines::generation::{
    genome::Genome,
    operators::{crossover, elite_count, mutate, sample_without_replacement},
    population::EvaluatedGenome,
};
use crate::error::{FinderError, Result};
use rand::seq::SliceRandom;
use rand::Rng;

/// Derives the next generation from a ranked one
#[derive(Debug, Clone)]
pub struct Breeder {
    population_size: usize,
    mutation_rate: f64,
    max_elite: usize,
    breeding_source: BreedingSource,
}

impl Breeder {
    pub fn new(
        population_size: usize,
        mutation_rate: f64,
        max_elite: usize,
        breeding_source: BreedingSource,
    ) -> Self {
        Self {
            population_size,
            mutation_rate,
            max_elite,
            breeding_source,
        }
    }

    pub fn from_config(config: &EvolutionConfig) -> Self {
        Self::new(
            config.population_size,
            config.mutation_rate,
            config.max_elite,
            config.breeding_source,
        )
    }

    /// `ranked` must be sorted best first. Elites are copied from their
    /// pristine genome regardless of `breeding_source`; the remaining slots are
    /// filled with mutated two-point crossover children of the parent pool.
    pub fn next_generation<R: Rng>(
        &self,
        ranked: &[EvaluatedGenome],
        rng: &mut R,
    ) -> Result<Vec<Genome>> {
        if ranked.is_empty() {
            return Err(FinderError::Generation(
                "Cannot breed from an empty population".to_string()
            ));
        }

        let elites = elite_count(ranked.len(), self.max_elite, rng).min(self.population_size);
        let mut next_generation: Vec<Genome> = ranked
            .iter()
            .take(elites)
            .map(|evaluated| evaluated.genome)
            .collect();

        let parents: Vec<Genome> = self
            .parent_pool(ranked, elites, rng)
            .into_iter()
            .map(|evaluated| self.breeding_genome(evaluated))
            .collect();

        log::debug!(
            "Breeding: {} elites, {} sampled parents, {} children to create",
            elites,
            parents.len() - elites,
            self.population_size - next_generation.len()
        );

        while next_generation.len() < self.population_size {
            let (parent1, parent2) = pick_two(&parents, rng);
            let (child1, child2) = crossover(&parent1, &parent2, rng);

            next_generation.push(mutate(&child1, self.mutation_rate, rng));
            if next_generation.len() < self.population_size {
                next_generation.push(mutate(&child2, self.mutation_rate, rng));
            }
        }

        Ok(next_generation)
    }

    /// The top `elites` members followed by a sample drawn without
    /// replacement from the rest, clamped to what is available
    pub fn parent_pool<'a, R: Rng>(
        &self,
        ranked: &'a [EvaluatedGenome],
        elites: usize,
        rng: &mut R,
    ) -> Vec<&'a EvaluatedGenome> {
        let elites = elites.min(ranked.len());
        let non_elite = &ranked[elites..];
        let random_count = self
            .population_size
            .saturating_sub(elites)
            .min(non_elite.len());

        ranked[..elites]
            .iter()
            .chain(sample_without_replacement(non_elite, random_count, rng))
            .collect()
    }

    fn breeding_genome(&self, evaluated: &EvaluatedGenome) -> Genome {
        match self.breeding_source {
            BreedingSource::Pristine => evaluated.genome,
            BreedingSource::Executed => evaluated.trace.final_memory,
        }
    }
}

/// Two distinct pool members; a single-member pool is crossed with itself
fn pick_two<R: Rng>(parents: &[Genome], rng: &mut R) -> (Genome, Genome) {
    match parents.choose_multiple(rng, 2).collect::<Vec<_>>().as_slice() {
        [first, second] => (**first, **second),
        [only] => (**only, **only),
        _ => unreachable!("parent pool always holds the top-ranked genome"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::execution::{ExecutionTrace, Termination};
    use crate::engines::generation::genome::GENOME_LENGTH;
    use crate::types::Position;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn evaluated(byte: u8, fitness: f64) -> EvaluatedGenome {
        let genome = Genome::new([byte; GENOME_LENGTH]);
        EvaluatedGenome {
            genome,
            fitness,
            trace: ExecutionTrace {
                final_position: Position::new(3, 6),
                treasure_found: vec![false],
                out_of_bounds: false,
                movement_count: 0,
                moves: Vec::new(),
                steps_executed: 1,
                termination: Termination::StepLimit,
                final_memory: Genome::new([byte.wrapping_add(100); GENOME_LENGTH]),
            },
        }
    }

    fn ranked(n: usize) -> Vec<EvaluatedGenome> {
        (0..n).map(|i| evaluated(i as u8, (n - i) as f64)).collect()
    }

    #[test]
    fn test_size_and_elites() {
        let breeder = Breeder::new(20, 0.1, 10, BreedingSource::Pristine);
        let ranked = ranked(20);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let next = breeder.next_generation(&ranked, &mut rng).unwrap();

            assert_eq!(next.len(), 20);
            // At least the best genome survives unchanged, in first position
            assert_eq!(next[0], ranked[0].genome);
        }
    }

    #[test]
    fn test_elites_use_pristine_genome_even_when_breeding_from_executed() {
        let breeder = Breeder::new(10, 0.0, 10, BreedingSource::Executed);
        let ranked = ranked(10);
        let mut rng = StdRng::seed_from_u64(5);
        let next = breeder.next_generation(&ranked, &mut rng).unwrap();

        assert_eq!(next[0], ranked[0].genome);
        assert_ne!(next[0], ranked[0].trace.final_memory);
    }

    #[test]
    fn test_executed_source_children_come_from_final_memory() {
        // Mutation off: every child byte must come from some parent's source bytes
        let ranked = ranked(6);
        let mut rng = StdRng::seed_from_u64(9);

        let executed = Breeder::new(6, 0.0, 1, BreedingSource::Executed)
            .next_generation(&ranked, &mut rng)
            .unwrap();
        for child in &executed[1..] {
            assert!(child.cells().iter().all(|&b| b >= 100));
        }

        let pristine = Breeder::new(6, 0.0, 1, BreedingSource::Pristine)
            .next_generation(&ranked, &mut rng)
            .unwrap();
        for child in &pristine[1..] {
            assert!(child.cells().iter().all(|&b| b < 6));
        }
    }

    #[test]
    fn test_small_population_clamps() {
        let breeder = Breeder::new(5, 0.5, 10, BreedingSource::Pristine);
        let mut rng = StdRng::seed_from_u64(1);

        let next = breeder.next_generation(&ranked(2), &mut rng).unwrap();
        assert_eq!(next.len(), 5);

        let next = breeder.next_generation(&ranked(1), &mut rng).unwrap();
        assert_eq!(next.len(), 5);
        assert_eq!(next[0], ranked(1)[0].genome);
    }

    #[test]
    fn test_parent_pool_samples_only_non_elites_once() {
        let breeder = Breeder::new(12, 0.1, 10, BreedingSource::Pristine);
        let ranked = ranked(12);

        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let elites = elite_count(ranked.len(), 10, &mut rng);
            let pool = breeder.parent_pool(&ranked, elites, &mut rng);

            assert_eq!(pool.len(), 12);
            for (i, parent) in pool.iter().take(elites).enumerate() {
                assert_eq!(parent.genome, ranked[i].genome);
            }

            let sampled: Vec<Genome> = pool[elites..].iter().map(|p| p.genome).collect();
            for genome in &sampled {
                assert!(!ranked[..elites].iter().any(|e| e.genome == *genome));
            }
            let mut unique: Vec<u8> = sampled.iter().map(|g| g.cells()[0]).collect();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), sampled.len());
        }
    }

    #[test]
    fn test_parent_pool_clamps_to_available() {
        let breeder = Breeder::new(50, 0.1, 10, BreedingSource::Pristine);
        let ranked = ranked(6);
        let mut rng = StdRng::seed_from_u64(3);

        let pool = breeder.parent_pool(&ranked, 2, &mut rng);
        assert_eq!(pool.len(), 6);
    }

    #[test]
    fn test_empty_population_is_an_error() {
        let breeder = Breeder::new(5, 0.5, 10, BreedingSource::Pristine);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(breeder.next_generation(&[], &mut rng).is_err());
    }

    #[test]
    fn test_same_seed_same_offspring() {
        let breeder = Breeder::new(30, 0.2, 10, BreedingSource::Pristine);
        let ranked = ranked(30);

        let a = breeder.next_generation(&ranked, &mut StdRng::seed_from_u64(77)).unwrap();
        let b = breeder.next_generation(&ranked, &mut StdRng::seed_from_u64(77)).unwrap();
        assert_eq!(a, b);
    }
}

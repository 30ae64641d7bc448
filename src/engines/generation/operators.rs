use crate::engines::generation::genome::{Genome, GENOME_LENGTH};
use rand::seq::SliceRandom;
use rand::Rng;

/// Generate random genome
pub fn random_genome<R: Rng>(rng: &mut R) -> Genome {
    let mut cells = [0u8; GENOME_LENGTH];
    rng.fill(&mut cells[..]);
    Genome::new(cells)
}

/// Random elite width for one generation: uniform in `[1, min(max_elite, len - 1)]`.
/// Populations with fewer than two members carry everything they have.
pub fn elite_count<R: Rng>(population_len: usize, max_elite: usize, rng: &mut R) -> usize {
    let upper = max_elite.min(population_len.saturating_sub(1));
    if upper == 0 {
        return population_len.min(1);
    }
    rng.gen_range(1..=upper)
}

/// Draws up to `amount` distinct members; asking for more than exist returns all of them
pub fn sample_without_replacement<'a, T, R: Rng>(
    pool: &'a [T],
    amount: usize,
    rng: &mut R,
) -> Vec<&'a T> {
    if amount > pool.len() {
        log::warn!(
            "Requested {} parents but only {} available, clamping",
            amount,
            pool.len()
        );
    }
    pool.choose_multiple(rng, amount.min(pool.len())).collect()
}

/// Cut points for two-point crossover: first in `[0, len/3]`, second in `[2*len/3, len-1]`
pub fn crossover_points<R: Rng>(rng: &mut R) -> (usize, usize) {
    let first = rng.gen_range(0..=GENOME_LENGTH / 3);
    let second = rng.gen_range(2 * GENOME_LENGTH / 3..GENOME_LENGTH);
    (first, second)
}

/// Two-point crossover with explicit cut points (`cut1 <= cut2 <= len`).
/// Child A takes `parent2[cut1..cut2]` into `parent1`, child B the reverse.
pub fn two_point_crossover(
    parent1: &Genome,
    parent2: &Genome,
    cut1: usize,
    cut2: usize,
) -> (Genome, Genome) {
    let (a, b) = (parent1.as_slice(), parent2.as_slice());
    let child_a = [&a[..cut1], &b[cut1..cut2], &a[cut2..]].concat();
    let child_b = [&b[..cut1], &a[cut1..cut2], &b[cut2..]].concat();

    (validated(child_a), validated(child_b))
}

/// Two-point crossover with randomly drawn cut points
pub fn crossover<R: Rng>(parent1: &Genome, parent2: &Genome, rng: &mut R) -> (Genome, Genome) {
    let (cut1, cut2) = crossover_points(rng);
    two_point_crossover(parent1, parent2, cut1, cut2)
}

/// Mutation: each cell is independently replaced by a fresh random byte
/// with probability `mutation_rate`
pub fn mutate<R: Rng>(genome: &Genome, mutation_rate: f64, rng: &mut R) -> Genome {
    let mut cells = genome.to_bytes();
    for cell in cells.iter_mut() {
        if rng.gen::<f64>() < mutation_rate {
            *cell = rng.gen();
        }
    }
    Genome::new(cells)
}

/// Offspring must keep the genome shape. A violation here is a bug in the
/// operators, not something a caller can recover from.
fn validated(cells: Vec<u8>) -> Genome {
    match Genome::try_from(cells) {
        Ok(genome) => genome,
        Err(e) => panic!("crossover produced a malformed child: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn constant(byte: u8) -> Genome {
        Genome::new([byte; GENOME_LENGTH])
    }

    fn counting() -> Genome {
        let mut cells = [0u8; GENOME_LENGTH];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = i as u8;
        }
        Genome::new(cells)
    }

    #[test]
    fn test_two_point_crossover_segments() {
        let p1 = counting();
        let p2 = constant(200);
        let (a, b) = two_point_crossover(&p1, &p2, 10, 50);

        for i in 0..GENOME_LENGTH {
            if (10..50).contains(&i) {
                assert_eq!(a.cells()[i], p2.cells()[i]);
                assert_eq!(b.cells()[i], p1.cells()[i]);
            } else {
                assert_eq!(a.cells()[i], p1.cells()[i]);
                assert_eq!(b.cells()[i], p2.cells()[i]);
            }
        }
    }

    #[test]
    fn test_crossover_points_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let (first, second) = crossover_points(&mut rng);
            assert!(first <= 21);
            assert!((42..=63).contains(&second));
        }
    }

    #[test]
    fn test_mutation_rate_zero_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        let genome = random_genome(&mut rng);
        assert_eq!(mutate(&genome, 0.0, &mut rng), genome);
    }

    #[test]
    fn test_mutation_rate_one_replaces_cells() {
        let mut rng = StdRng::seed_from_u64(2);
        let original = constant(0xAA);
        let mut unchanged = 0;
        let trials = 200;
        for _ in 0..trials {
            let mutated = mutate(&original, 1.0, &mut rng);
            unchanged += mutated
                .cells()
                .iter()
                .filter(|&&cell| cell == 0xAA)
                .count();
        }
        // Expected 12800 / 256 = 50 unchanged cells
        assert!(unchanged < 120, "unchanged = {}", unchanged);
    }

    #[test]
    fn test_elite_count_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let n = elite_count(200, 10, &mut rng);
            assert!((1..=10).contains(&n));
        }
        for _ in 0..100 {
            let n = elite_count(4, 10, &mut rng);
            assert!((1..=3).contains(&n));
        }
        assert_eq!(elite_count(2, 10, &mut rng), 1);
        assert_eq!(elite_count(1, 10, &mut rng), 1);
        assert_eq!(elite_count(0, 10, &mut rng), 0);
    }

    #[test]
    fn test_sample_clamps_to_pool() {
        let mut rng = StdRng::seed_from_u64(4);
        let pool = vec![1, 2, 3];

        let picked = sample_without_replacement(&pool, 10, &mut rng);
        assert_eq!(picked.len(), 3);

        let mut picked: Vec<i32> = sample_without_replacement(&pool, 2, &mut rng)
            .into_iter()
            .copied()
            .collect();
        picked.sort();
        picked.dedup();
        assert_eq!(picked.len(), 2);
    }
}

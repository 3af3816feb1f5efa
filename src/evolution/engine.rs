//! # EvolutionEngine
//!
//! The generational loop that attempts to break a substitution cipher: it
//! draws a hidden exemplar key, enciphers the message with it, and evolves a
//! population of random keys toward the exemplar. Each generation is
//! evaluated, reported to the statistics sink, checked against the exit
//! conditions, and bred into its successor.
//!
//! Fitness is key similarity against the exemplar, not decoded-text
//! similarity: it is monotonic with decoded-text correctness but far
//! cheaper, and it keeps the fitness function independent of the alphabet
//! codec.
//!
//! ## Example
//!
//! ```rust
//! use cipherbreaker::alphabet::Alphabet;
//! use cipherbreaker::evolution::{EvolutionEngine, EvolutionOptions, NullStatistics};
//! use cipherbreaker::rng::RandomNumberGenerator;
//!
//! let engine = EvolutionEngine::new(Alphabet::new("ABCD").unwrap());
//! let options = EvolutionOptions::builder()
//!     .population_size(30)
//!     .max_iterations(50)
//!     .build();
//!
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let outcome = engine
//!     .evolve(&options, "ABBA", &mut NullStatistics, &mut rng)
//!     .unwrap();
//! assert!(outcome.generations <= 50);
//! ```

use tracing::{debug, info};

use super::options::EvolutionOptions;
use super::population::{EvaluatedSpecimen, Population};
use super::statistics::Statistics;
use crate::alphabet::Alphabet;
use crate::error::{BreakerError, Result};
use crate::rng::RandomNumberGenerator;
use crate::specimen::Specimen;

/// Why the generational loop stopped. Both cases are normal outcomes, not
/// errors.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Some specimen reached the desired evaluation.
    DesiredEvaluationReached,
    /// The iteration cap was hit before the desired evaluation was reached.
    IterationLimitReached,
}

/// The result of a finished search.
#[derive(Debug, Clone)]
pub struct EvolutionOutcome {
    /// The best specimen of the final generation.
    pub best_specimen: Specimen,
    /// Its evaluation against the exemplar, in `[0.0, 1.0]`.
    pub best_evaluation: f64,
    /// The cryptogram as deciphered by the best specimen.
    pub decoded_message: String,
    /// Number of generations that were evaluated and reported.
    pub generations: usize,
    /// Why the loop stopped.
    pub termination: TerminationReason,
}

/// Drives the evolutionary search across generations.
///
/// The engine owns the alphabet for the whole run; the alphabet length fixes
/// the permutation length of every specimen it creates.
#[derive(Debug, Clone)]
pub struct EvolutionEngine {
    alphabet: Alphabet,
}

impl EvolutionEngine {
    /// Creates an engine operating over the given alphabet.
    pub fn new(alphabet: Alphabet) -> Self {
        Self { alphabet }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Attempts to break the substitution cipher by means of an evolutionary
    /// algorithm.
    ///
    /// Builds a hidden exemplar key, enciphers `message` with it, seeds a
    /// random population, and then loops: evaluate, report one generation to
    /// `statistics`, stop when the best evaluation reaches the desired one
    /// or the iteration cap is hit, otherwise breed the next generation.
    ///
    /// # Errors
    ///
    /// Returns [`BreakerError::InvalidParameter`] before anything else
    /// happens if `options` fail validation, and
    /// [`BreakerError::UnknownCharacter`] if `message` contains a character
    /// outside the engine's alphabet. Neither failure emits any statistics
    /// report.
    pub fn evolve<S: Statistics>(
        &self,
        options: &EvolutionOptions,
        message: &str,
        statistics: &mut S,
        rng: &mut RandomNumberGenerator,
    ) -> Result<EvolutionOutcome> {
        options.validate()?;

        let number_of_parents =
            Self::number_of_parents(options.get_population_size(), options.get_parent_fraction());

        // The cipher to be broken, and the message it hides.
        let exemplar = Specimen::random(self.alphabet.len(), rng)?;
        let plain = self.alphabet.to_indices(message)?;
        let cryptogram = exemplar.encode(&plain)?;

        let mut population = Population::random(
            options.get_population_size(),
            self.alphabet.len(),
            &exemplar,
            options.get_parallel_threshold(),
            rng,
        )?;

        let mut iteration = 0;
        let termination = loop {
            let best = population.best().ok_or(BreakerError::EmptyPopulation)?;
            let worst = population.worst().ok_or(BreakerError::EmptyPopulation)?;
            let best_evaluation = best.evaluation();
            let mean_evaluation = population.mean_evaluation();
            let worst_evaluation = worst.evaluation();

            let decoded = best.specimen().decode(&cryptogram)?;
            let best_guess = self.alphabet.to_text(&decoded)?;

            debug!(
                iteration,
                best = best_evaluation,
                mean = mean_evaluation,
                worst = worst_evaluation,
                "generation evaluated"
            );
            statistics.new_generation(
                &best_guess,
                best_evaluation,
                mean_evaluation,
                worst_evaluation,
            );

            iteration += 1;
            if best_evaluation >= options.get_desired_evaluation() {
                break TerminationReason::DesiredEvaluationReached;
            }
            if iteration >= options.get_max_iterations() {
                break TerminationReason::IterationLimitReached;
            }

            population =
                self.next_generation(&population, options, number_of_parents, &exemplar, rng)?;
        };

        let best = population.best().ok_or(BreakerError::EmptyPopulation)?;
        let decoded = best.specimen().decode(&cryptogram)?;
        let outcome = EvolutionOutcome {
            best_specimen: best.specimen().clone(),
            best_evaluation: best.evaluation(),
            decoded_message: self.alphabet.to_text(&decoded)?,
            generations: iteration,
            termination,
        };

        info!(
            generations = outcome.generations,
            best = outcome.best_evaluation,
            termination = ?outcome.termination,
            "search finished"
        );
        Ok(outcome)
    }

    /// Number of specimens admitted to the breeding pool: the parent
    /// fraction of the population, rounded up to an even count so they can
    /// be paired, and capped at the largest even count the population holds.
    fn number_of_parents(population_size: usize, parent_fraction: f64) -> usize {
        let mut count = (population_size as f64 * parent_fraction) as usize;
        if count % 2 == 1 {
            count += 1;
        }
        count.min(population_size - population_size % 2)
    }

    /// Breeds the successor of `current`.
    ///
    /// The top survivor fraction transits unchanged with its cached
    /// evaluation. The top `number_of_parents` form the breeding pool,
    /// paired first with second, third with fourth, and so on; children are
    /// produced round-robin across the pairs until the population is
    /// refilled, each bred from its own forked RNG stream and evaluated on
    /// creation. If no pair can be formed, the shortfall is covered with
    /// fresh random specimens.
    fn next_generation(
        &self,
        current: &Population,
        options: &EvolutionOptions,
        number_of_parents: usize,
        exemplar: &Specimen,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population> {
        let population_size = options.get_population_size();
        let survivor_count =
            (population_size as f64 * options.get_survivor_fraction()) as usize;

        let members = current.members();
        let mut next: Vec<EvaluatedSpecimen> =
            members[..survivor_count.min(members.len())].to_vec();

        let parent_pool = &members[..number_of_parents.min(members.len())];
        let pairs: Vec<_> = parent_pool.chunks_exact(2).collect();

        if pairs.is_empty() {
            while next.len() < population_size {
                let specimen = Specimen::random(self.alphabet.len(), rng)?;
                next.push(EvaluatedSpecimen::new(specimen, exemplar)?);
            }
            return Ok(Population::from_members(next));
        }

        let mut pair_index = 0;
        while next.len() < population_size {
            let pair = pairs[pair_index];
            let mut child_rng = rng.fork();
            let child = pair[0].specimen().reproduce(
                pair[1].specimen(),
                options.get_survivor_fraction(),
                options.get_mutation_chance(),
                &mut child_rng,
            )?;
            next.push(EvaluatedSpecimen::new(child, exemplar)?);
            pair_index = (pair_index + 1) % pairs.len();
        }

        Ok(Population::from_members(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_of_parents_rounds_up_to_even() {
        assert_eq!(EvolutionEngine::number_of_parents(10, 0.5), 6);
        assert_eq!(EvolutionEngine::number_of_parents(10, 0.4), 4);
        assert_eq!(EvolutionEngine::number_of_parents(10, 0.0), 0);
        assert_eq!(EvolutionEngine::number_of_parents(7, 0.5), 4);
    }

    #[test]
    fn test_number_of_parents_is_capped_by_population() {
        assert_eq!(EvolutionEngine::number_of_parents(7, 1.0), 6);
        assert_eq!(EvolutionEngine::number_of_parents(8, 1.0), 8);
        assert_eq!(EvolutionEngine::number_of_parents(1, 1.0), 0);
    }

    #[test]
    fn test_next_generation_preserves_population_size() {
        let mut rng = RandomNumberGenerator::from_seed(4);
        let alphabet = Alphabet::new("ABCDEFGH").unwrap();
        let engine = EvolutionEngine::new(alphabet);
        let exemplar = Specimen::random(8, &mut rng).unwrap();

        for (survivor_fraction, parent_fraction) in
            [(0.2, 0.5), (0.0, 1.0), (0.9, 0.1), (1.0, 0.0)]
        {
            let options = EvolutionOptions::builder()
                .population_size(21)
                .survivor_fraction(survivor_fraction)
                .parent_fraction(parent_fraction)
                .build();
            let number_of_parents = EvolutionEngine::number_of_parents(21, parent_fraction);

            let population = Population::random(21, 8, &exemplar, 1000, &mut rng).unwrap();
            let next = engine
                .next_generation(&population, &options, number_of_parents, &exemplar, &mut rng)
                .unwrap();

            assert_eq!(next.len(), 21);
        }
    }

    #[test]
    fn test_survivors_transit_unchanged() {
        let mut rng = RandomNumberGenerator::from_seed(40);
        let alphabet = Alphabet::new("ABCDEFGH").unwrap();
        let engine = EvolutionEngine::new(alphabet);
        let exemplar = Specimen::random(8, &mut rng).unwrap();

        let options = EvolutionOptions::builder()
            .population_size(10)
            .survivor_fraction(0.5)
            .parent_fraction(0.5)
            .build();
        let population = Population::random(10, 8, &exemplar, 1000, &mut rng).unwrap();
        let elite_keys: Vec<Vec<usize>> = population.members()[..5]
            .iter()
            .map(|member| member.specimen().key().to_vec())
            .collect();

        let next = engine
            .next_generation(&population, &options, 6, &exemplar, &mut rng)
            .unwrap();

        // Every elite key of the old generation is present in the new one.
        for elite in &elite_keys {
            assert!(next
                .members()
                .iter()
                .any(|member| member.specimen().key() == elite.as_slice()));
        }
    }
}

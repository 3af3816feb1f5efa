//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct represents the configuration surface of a
//! search run: population size, desired evaluation, iteration cap, survivor
//! and parent fractions, mutation chance, and the threshold above which
//! fitness evaluation runs in parallel.
//!
//! Validation happens once, at the start of
//! [`EvolutionEngine::evolve`](crate::evolution::EvolutionEngine::evolve),
//! before any population is built; a violation names the offending
//! parameter.
//!
//! ## Example
//!
//! ```rust
//! use cipherbreaker::evolution::EvolutionOptions;
//!
//! let options = EvolutionOptions::builder()
//!     .population_size(200)
//!     .desired_evaluation(0.95)
//!     .max_iterations(500)
//!     .mutation_chance(0.15)
//!     .build();
//!
//! assert!(options.validate().is_ok());
//! ```

use crate::error::{ensure_unit_interval, BreakerError, Result};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    /// Constant number of specimens across all generations.
    population_size: usize,
    /// The search stops as soon as some specimen reaches this evaluation.
    desired_evaluation: f64,
    /// Hard cap on the number of generations.
    max_iterations: usize,
    /// Fraction of the population carried into the next generation
    /// unchanged; doubles as the equal-stay probability during crossover.
    survivor_fraction: f64,
    /// Fraction of the population admitted to the breeding pool.
    parent_fraction: f64,
    /// Probability that a freshly bred child is mutated.
    mutation_chance: f64,
    /// Minimum population size for parallel fitness evaluation.
    parallel_threshold: usize,
}

impl EvolutionOptions {
    pub fn new(
        population_size: usize,
        desired_evaluation: f64,
        max_iterations: usize,
        survivor_fraction: f64,
        parent_fraction: f64,
        mutation_chance: f64,
    ) -> Self {
        Self {
            population_size,
            desired_evaluation,
            max_iterations,
            survivor_fraction,
            parent_fraction,
            mutation_chance,
            parallel_threshold: 1000,
        }
    }

    /// Returns a builder for creating an `EvolutionOptions` instance with a
    /// fluent interface; unset fields keep their defaults.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_desired_evaluation(&self) -> f64 {
        self.desired_evaluation
    }

    pub fn get_max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn get_survivor_fraction(&self) -> f64 {
        self.survivor_fraction
    }

    pub fn get_parent_fraction(&self) -> f64 {
        self.parent_fraction
    }

    pub fn get_mutation_chance(&self) -> f64 {
        self.mutation_chance
    }

    /// Returns the minimum population size for parallel fitness evaluation.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Sets the population size.
    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    /// Sets the desired evaluation.
    pub fn set_desired_evaluation(&mut self, desired_evaluation: f64) {
        self.desired_evaluation = desired_evaluation;
    }

    /// Sets the iteration cap.
    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.max_iterations = max_iterations;
    }

    /// Sets the survivor fraction.
    pub fn set_survivor_fraction(&mut self, survivor_fraction: f64) {
        self.survivor_fraction = survivor_fraction;
    }

    /// Sets the parent fraction.
    pub fn set_parent_fraction(&mut self, parent_fraction: f64) {
        self.parent_fraction = parent_fraction;
    }

    /// Sets the mutation chance.
    pub fn set_mutation_chance(&mut self, mutation_chance: f64) {
        self.mutation_chance = mutation_chance;
    }

    /// Sets the parallel threshold.
    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    /// Checks every parameter against its documented range.
    ///
    /// # Errors
    ///
    /// Returns [`BreakerError::InvalidParameter`] naming the first offending
    /// parameter: the fractions and probabilities must lie in `[0.0, 1.0]`,
    /// and the population size and iteration cap must be positive.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(BreakerError::InvalidParameter {
                name: "population_size",
                reason: "must be positive".to_string(),
            });
        }
        if self.max_iterations == 0 {
            return Err(BreakerError::InvalidParameter {
                name: "max_iterations",
                reason: "must be positive".to_string(),
            });
        }
        ensure_unit_interval("desired_evaluation", self.desired_evaluation)?;
        ensure_unit_interval("survivor_fraction", self.survivor_fraction)?;
        ensure_unit_interval("parent_fraction", self.parent_fraction)?;
        ensure_unit_interval("mutation_chance", self.mutation_chance)?;
        Ok(())
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            population_size: 100,
            desired_evaluation: 1.0,
            max_iterations: 1000,
            survivor_fraction: 0.2,
            parent_fraction: 0.5,
            mutation_chance: 0.1,
            parallel_threshold: 1000,
        }
    }
}

/// Builder for `EvolutionOptions`.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    population_size: Option<usize>,
    desired_evaluation: Option<f64>,
    max_iterations: Option<usize>,
    survivor_fraction: Option<f64>,
    parent_fraction: Option<f64>,
    mutation_chance: Option<f64>,
    parallel_threshold: Option<usize>,
}

impl EvolutionOptionsBuilder {
    /// Sets the population size.
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    /// Sets the evaluation at which the search stops successfully.
    pub fn desired_evaluation(mut self, value: f64) -> Self {
        self.desired_evaluation = Some(value);
        self
    }

    /// Sets the iteration cap.
    pub fn max_iterations(mut self, value: usize) -> Self {
        self.max_iterations = Some(value);
        self
    }

    /// Sets the survivor fraction.
    pub fn survivor_fraction(mut self, value: f64) -> Self {
        self.survivor_fraction = Some(value);
        self
    }

    /// Sets the parent fraction.
    pub fn parent_fraction(mut self, value: f64) -> Self {
        self.parent_fraction = Some(value);
        self
    }

    /// Sets the mutation chance.
    pub fn mutation_chance(mut self, value: f64) -> Self {
        self.mutation_chance = Some(value);
        self
    }

    /// Sets the parallel threshold.
    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> EvolutionOptions {
        let defaults = EvolutionOptions::default();
        EvolutionOptions {
            population_size: self.population_size.unwrap_or(defaults.population_size),
            desired_evaluation: self
                .desired_evaluation
                .unwrap_or(defaults.desired_evaluation),
            max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
            survivor_fraction: self.survivor_fraction.unwrap_or(defaults.survivor_fraction),
            parent_fraction: self.parent_fraction.unwrap_or(defaults.parent_fraction),
            mutation_chance: self.mutation_chance.unwrap_or(defaults.mutation_chance),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(defaults.parallel_threshold),
        }
    }
}

//! # Population
//!
//! `EvaluatedSpecimen` pairs a specimen with its cached evaluation against
//! the exemplar; `Population` is the fixed-size, rank-ordered collection of
//! them that one generation operates on. A population is never mutated in
//! place across generations: survivors are cloned forward with their cached
//! evaluation and the whole collection is replaced wholesale.

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::error::Result;
use crate::specimen::Specimen;

/// Immutable pairing of a specimen with its cached evaluation.
///
/// The evaluation is computed at construction and only ever recomputed by
/// building a new pairing, so a carried-over survivor keeps its score
/// without touching the exemplar again.
#[derive(Debug, Clone)]
pub struct EvaluatedSpecimen {
    specimen: Specimen,
    evaluation: f64,
}

impl EvaluatedSpecimen {
    /// Evaluates `specimen` against `exemplar` and stores the pair.
    ///
    /// # Errors
    ///
    /// Returns [`BreakerError::IncompatibleKeyLength`](crate::error::BreakerError::IncompatibleKeyLength)
    /// if the specimen and the exemplar differ in permutation length.
    pub fn new(specimen: Specimen, exemplar: &Specimen) -> Result<Self> {
        let evaluation = specimen.evaluate(exemplar)?;
        Ok(Self {
            specimen,
            evaluation,
        })
    }

    pub fn specimen(&self) -> &Specimen {
        &self.specimen
    }

    /// Percentage of sameness with the exemplar, in `[0.0, 1.0]`.
    pub fn evaluation(&self) -> f64 {
        self.evaluation
    }
}

/// A fixed-size collection of evaluated specimens, ordered best first.
///
/// The ordering is established with a stable sort, so specimens with equal
/// evaluations keep their relative creation order.
#[derive(Debug, Clone)]
pub struct Population {
    members: Vec<EvaluatedSpecimen>,
}

impl Population {
    /// Builds a population of `size` random specimens of the given key
    /// length, each evaluated against `exemplar`. Evaluation runs in
    /// parallel once `size` reaches `parallel_threshold`.
    pub fn random(
        size: usize,
        key_length: usize,
        exemplar: &Specimen,
        parallel_threshold: usize,
        rng: &mut crate::rng::RandomNumberGenerator,
    ) -> Result<Self> {
        let specimens = (0..size)
            .map(|_| Specimen::random(key_length, rng))
            .collect::<Result<Vec<_>>>()?;

        let members = Self::evaluate_all(specimens, exemplar, parallel_threshold)?;
        Ok(Self::from_members(members))
    }

    /// Ranks `members` best first and wraps them.
    pub(crate) fn from_members(mut members: Vec<EvaluatedSpecimen>) -> Self {
        // Evaluations are always finite, so the comparison never falls
        // through to Equal for anything but genuine ties.
        members.sort_by(|a, b| {
            b.evaluation
                .partial_cmp(&a.evaluation)
                .unwrap_or(Ordering::Equal)
        });
        Self { members }
    }

    /// Evaluates `specimens` against `exemplar`, in parallel when their
    /// number reaches `parallel_threshold`.
    pub(crate) fn evaluate_all(
        specimens: Vec<Specimen>,
        exemplar: &Specimen,
        parallel_threshold: usize,
    ) -> Result<Vec<EvaluatedSpecimen>> {
        if specimens.len() >= parallel_threshold {
            specimens
                .into_par_iter()
                .map(|specimen| EvaluatedSpecimen::new(specimen, exemplar))
                .collect()
        } else {
            specimens
                .into_iter()
                .map(|specimen| EvaluatedSpecimen::new(specimen, exemplar))
                .collect()
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The members of this population, best first.
    pub fn members(&self) -> &[EvaluatedSpecimen] {
        &self.members
    }

    /// The best-evaluated member.
    pub fn best(&self) -> Option<&EvaluatedSpecimen> {
        self.members.first()
    }

    /// The worst-evaluated member.
    pub fn worst(&self) -> Option<&EvaluatedSpecimen> {
        self.members.last()
    }

    /// Mean evaluation across the population; `0.0` for an empty one.
    pub fn mean_evaluation(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        let total: f64 = self.members.iter().map(EvaluatedSpecimen::evaluation).sum();
        total / self.members.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RandomNumberGenerator;

    #[test]
    fn test_random_population_has_requested_size() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        let exemplar = Specimen::random(10, &mut rng).unwrap();

        let population = Population::random(25, 10, &exemplar, 1000, &mut rng).unwrap();
        assert_eq!(population.len(), 25);
    }

    #[test]
    fn test_members_are_ordered_best_first() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        let exemplar = Specimen::random(12, &mut rng).unwrap();

        let population = Population::random(40, 12, &exemplar, 1000, &mut rng).unwrap();
        let evaluations: Vec<f64> = population
            .members()
            .iter()
            .map(EvaluatedSpecimen::evaluation)
            .collect();

        for window in evaluations.windows(2) {
            assert!(window[0] >= window[1]);
        }
        assert_eq!(
            population.best().unwrap().evaluation(),
            evaluations[0]
        );
        assert_eq!(
            population.worst().unwrap().evaluation(),
            *evaluations.last().unwrap()
        );
    }

    #[test]
    fn test_mean_evaluation_lies_between_worst_and_best() {
        let mut rng = RandomNumberGenerator::from_seed(9);
        let exemplar = Specimen::random(8, &mut rng).unwrap();

        let population = Population::random(30, 8, &exemplar, 1000, &mut rng).unwrap();
        let mean = population.mean_evaluation();

        assert!(mean <= population.best().unwrap().evaluation());
        assert!(mean >= population.worst().unwrap().evaluation());
    }

    #[test]
    fn test_parallel_and_sequential_evaluation_agree() {
        let mut rng = RandomNumberGenerator::from_seed(17);
        let exemplar = Specimen::random(6, &mut rng).unwrap();
        let specimens: Vec<Specimen> = (0..32)
            .map(|_| Specimen::random(6, &mut rng).unwrap())
            .collect();

        // Threshold 0 forces the parallel path for the same input.
        let sequential =
            Population::evaluate_all(specimens.clone(), &exemplar, usize::MAX).unwrap();
        let parallel = Population::evaluate_all(specimens, &exemplar, 0).unwrap();

        let seq: Vec<f64> = sequential.iter().map(EvaluatedSpecimen::evaluation).collect();
        let par: Vec<f64> = parallel.iter().map(EvaluatedSpecimen::evaluation).collect();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_carried_over_member_keeps_its_evaluation() {
        let mut rng = RandomNumberGenerator::from_seed(29);
        let exemplar = Specimen::random(10, &mut rng).unwrap();
        let population = Population::random(10, 10, &exemplar, 1000, &mut rng).unwrap();

        let survivor = population.best().unwrap().clone();
        assert_eq!(
            survivor.evaluation(),
            population.best().unwrap().evaluation()
        );
    }

    #[test]
    fn test_empty_population_edges() {
        let population = Population::from_members(Vec::new());
        assert!(population.is_empty());
        assert!(population.best().is_none());
        assert!(population.worst().is_none());
        assert_eq!(population.mean_evaluation(), 0.0);
    }
}

/// Observer for per-generation reporting.
///
/// The engine calls [`Statistics::new_generation`] exactly once per
/// generation and never reacts to the sink: there is no return value and no
/// acknowledgement, so a sink cannot abort or slow down the search. The
/// report carries the decoded guess rather than the key under search.
pub trait Statistics {
    /// Receives one generation's report: the cryptogram as deciphered by the
    /// best specimen, and the best, mean and worst evaluation across the
    /// population.
    fn new_generation(
        &mut self,
        decoded_best_guess: &str,
        best_evaluation: f64,
        mean_evaluation: f64,
        worst_evaluation: f64,
    );
}

/// A sink that discards every report. Useful for benchmarks and for runs
/// where only the final [`EvolutionOutcome`](crate::evolution::EvolutionOutcome)
/// matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStatistics;

impl Statistics for NullStatistics {
    fn new_generation(&mut self, _: &str, _: f64, _: f64, _: f64) {}
}

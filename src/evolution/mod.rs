pub mod engine;
pub mod options;
pub mod population;
pub mod statistics;

pub use engine::{EvolutionEngine, EvolutionOutcome, TerminationReason};
pub use options::{EvolutionOptions, EvolutionOptionsBuilder};
pub use population::{EvaluatedSpecimen, Population};
pub use statistics::{NullStatistics, Statistics};

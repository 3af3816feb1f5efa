use cipherbreaker::{
    alphabet::{Alphabet, DEFAULT_CHARACTERS},
    error::BreakerError,
    evolution::{EvolutionEngine, EvolutionOptions, Statistics, TerminationReason},
    rng::RandomNumberGenerator,
};

/// Collects every report the engine emits, so tests can inspect the full
/// generation-by-generation history.
#[derive(Debug, Default)]
struct RecordingStatistics {
    reports: Vec<GenerationReport>,
}

#[derive(Debug, Clone, PartialEq)]
struct GenerationReport {
    decoded_best_guess: String,
    best_evaluation: f64,
    mean_evaluation: f64,
    worst_evaluation: f64,
}

impl Statistics for RecordingStatistics {
    fn new_generation(
        &mut self,
        decoded_best_guess: &str,
        best_evaluation: f64,
        mean_evaluation: f64,
        worst_evaluation: f64,
    ) {
        self.reports.push(GenerationReport {
            decoded_best_guess: decoded_best_guess.to_string(),
            best_evaluation,
            mean_evaluation,
            worst_evaluation,
        });
    }
}

#[test]
fn test_trivial_desired_evaluation_stops_after_one_generation() {
    let engine = EvolutionEngine::new(Alphabet::new("ABCDE").unwrap());
    let options = EvolutionOptions::builder()
        .population_size(20)
        .desired_evaluation(0.0)
        .max_iterations(100)
        .build();
    let mut statistics = RecordingStatistics::default();
    let mut rng = RandomNumberGenerator::from_seed(1);

    let outcome = engine
        .evolve(&options, "ABCDE", &mut statistics, &mut rng)
        .unwrap();

    assert_eq!(outcome.generations, 1);
    assert_eq!(outcome.termination, TerminationReason::DesiredEvaluationReached);
    assert_eq!(statistics.reports.len(), 1);
}

#[test]
fn test_iteration_cap_bounds_the_run() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let engine = EvolutionEngine::new(Alphabet::new(DEFAULT_CHARACTERS).unwrap());
    let options = EvolutionOptions::builder()
        .population_size(30)
        .desired_evaluation(1.0)
        .max_iterations(5)
        .build();
    let mut statistics = RecordingStatistics::default();
    let mut rng = RandomNumberGenerator::from_seed(2);

    let outcome = engine
        .evolve(&options, "Attack at dawn.", &mut statistics, &mut rng)
        .unwrap();

    // A 56-character key is not recovered in five generations.
    assert_eq!(outcome.termination, TerminationReason::IterationLimitReached);
    assert_eq!(outcome.generations, 5);
    assert_eq!(statistics.reports.len(), 5);
}

#[test]
fn test_search_converges_on_a_tiny_alphabet() {
    let engine = EvolutionEngine::new(Alphabet::new("ABC").unwrap());
    let options = EvolutionOptions::builder()
        .population_size(50)
        .desired_evaluation(1.0)
        .max_iterations(500)
        .survivor_fraction(0.2)
        .parent_fraction(0.5)
        .mutation_chance(0.2)
        .build();
    let mut statistics = RecordingStatistics::default();
    let mut rng = RandomNumberGenerator::from_seed(42);

    let message = "ABCCBA";
    let outcome = engine
        .evolve(&options, message, &mut statistics, &mut rng)
        .unwrap();

    assert_eq!(outcome.termination, TerminationReason::DesiredEvaluationReached);
    assert_eq!(outcome.best_evaluation, 1.0);
    assert_eq!(outcome.decoded_message, message);
    assert_eq!(
        statistics.reports.last().unwrap().decoded_best_guess,
        message
    );
}

#[test]
fn test_best_evaluation_never_drops_with_elitism() {
    let engine = EvolutionEngine::new(Alphabet::new("ABCDEFGHIJ").unwrap());
    let options = EvolutionOptions::builder()
        .population_size(40)
        .desired_evaluation(1.0)
        .max_iterations(30)
        .survivor_fraction(0.25)
        .build();
    let mut statistics = RecordingStatistics::default();
    let mut rng = RandomNumberGenerator::from_seed(7);

    engine
        .evolve(&options, "JIHGFEDCBA", &mut statistics, &mut rng)
        .unwrap();

    assert!(!statistics.reports.is_empty());
    for window in statistics.reports.windows(2) {
        assert!(window[1].best_evaluation >= window[0].best_evaluation);
    }
}

#[test]
fn test_reports_are_internally_consistent() {
    let engine = EvolutionEngine::new(Alphabet::new("ABCDEF").unwrap());
    let options = EvolutionOptions::builder()
        .population_size(25)
        .desired_evaluation(1.0)
        .max_iterations(20)
        .build();
    let mut statistics = RecordingStatistics::default();
    let mut rng = RandomNumberGenerator::from_seed(13);

    let message = "FEDCABD";
    engine
        .evolve(&options, message, &mut statistics, &mut rng)
        .unwrap();

    for report in &statistics.reports {
        assert!(report.worst_evaluation <= report.mean_evaluation);
        assert!(report.mean_evaluation <= report.best_evaluation);
        assert_eq!(report.decoded_best_guess.len(), message.len());
        for character in report.decoded_best_guess.chars() {
            assert!("ABCDEF".contains(character));
        }
    }
}

#[test]
fn test_invalid_parameters_emit_no_report() {
    let engine = EvolutionEngine::new(Alphabet::new("ABC").unwrap());
    let options = EvolutionOptions::builder().mutation_chance(1.5).build();
    let mut statistics = RecordingStatistics::default();
    let mut rng = RandomNumberGenerator::from_seed(3);

    let result = engine.evolve(&options, "ABC", &mut statistics, &mut rng);

    match result {
        Err(BreakerError::InvalidParameter { name, .. }) => {
            assert_eq!(name, "mutation_chance");
        }
        other => panic!("expected InvalidParameter, got {:?}", other),
    }
    assert!(statistics.reports.is_empty());
}

#[test]
fn test_unknown_character_aborts_before_any_report() {
    let engine = EvolutionEngine::new(Alphabet::new("AB").unwrap());
    let options = EvolutionOptions::builder()
        .population_size(10)
        .max_iterations(10)
        .build();
    let mut statistics = RecordingStatistics::default();
    let mut rng = RandomNumberGenerator::from_seed(3);

    let result = engine.evolve(&options, "AXB", &mut statistics, &mut rng);

    match result {
        Err(BreakerError::UnknownCharacter('X')) => {}
        other => panic!("expected UnknownCharacter, got {:?}", other),
    }
    assert!(statistics.reports.is_empty());
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let options = EvolutionOptions::builder()
        .population_size(30)
        .desired_evaluation(1.0)
        .max_iterations(25)
        .build();
    let message = "HEDGEHOG, BADGER.";

    let mut first = RecordingStatistics::default();
    let mut second = RecordingStatistics::default();

    for statistics in [&mut first, &mut second] {
        let engine = EvolutionEngine::new(Alphabet::new(DEFAULT_CHARACTERS).unwrap());
        let mut rng = RandomNumberGenerator::from_seed(99);
        engine
            .evolve(&options, message, statistics, &mut rng)
            .unwrap();
    }

    assert_eq!(first.reports, second.reports);
}

#[test]
fn test_empty_message_still_searches_the_key_space() {
    let engine = EvolutionEngine::new(Alphabet::new("ABCD").unwrap());
    let options = EvolutionOptions::builder()
        .population_size(20)
        .desired_evaluation(1.0)
        .max_iterations(300)
        .build();
    let mut statistics = RecordingStatistics::default();
    let mut rng = RandomNumberGenerator::from_seed(17);

    // Fitness is key similarity, not text similarity, so an empty message
    // does not starve the search.
    let outcome = engine
        .evolve(&options, "", &mut statistics, &mut rng)
        .unwrap();

    assert!(outcome.generations <= 300);
    assert_eq!(outcome.decoded_message, "");
    assert!(!statistics.reports.is_empty());
}

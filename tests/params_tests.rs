#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy_evo::simulation::error::EvoError;
use flappy_evo::simulation::params::Params;
use flappy_evo::simulation::population::survivor_count;
use flappy_evo::simulation::stats::{GenerationStats, History};
use std::fs;

#[test]
fn test_default_params_are_valid() {
    let params = Params::default();
    params.validate().unwrap();

    assert_eq!(params.topology, vec![3, 3, 3, 1]);
    assert_eq!(params.jump_force, 4.0);
    assert_eq!(params.mutation_rate, 0.01);
    assert_eq!(params.start_y(), 300.0);
    assert_eq!(params.max_pipe_height(), 450);
}

#[test]
fn test_partial_json_overrides_defaults() {
    let params = Params::from_json_str(
        r#"{ "population_size": 40, "survival_fraction": 0.25, "max_steps": 1000 }"#,
    )
    .unwrap();

    assert_eq!(params.population_size, 40);
    assert_eq!(params.survival_fraction, 0.25);
    assert_eq!(params.max_steps, Some(1000));
    assert_eq!(params.gravity, 0.25);
    assert_eq!(params.width, 400);
}

#[test]
fn test_survival_fraction_check_matches_population() {
    let params = Params::from_json_str(r#"{ "population_size": 100, "survival_fraction": 0.57 }"#)
        .unwrap();
    assert_eq!(
        survivor_count(params.population_size, params.survival_fraction).unwrap(),
        57
    );

    let ten = Params::from_json_str(r#"{ "population_size": 10, "survival_fraction": 0.1 }"#);
    assert!(ten.is_ok());
    let too_few = Params::from_json_str(r#"{ "population_size": 10, "survival_fraction": 0.099 }"#);
    assert!(matches!(
        too_few,
        Err(EvoError::InvalidSurvivalFraction { .. })
    ));
}

#[test]
fn test_invalid_json_values_are_rejected() {
    let zero_survivors = Params::from_json_str(r#"{ "population_size": 5, "survival_fraction": 0.1 }"#);
    assert!(matches!(
        zero_survivors,
        Err(EvoError::InvalidSurvivalFraction { .. })
    ));

    let bad_topology = Params::from_json_str(r#"{ "topology": [3] }"#);
    assert!(matches!(bad_topology, Err(EvoError::InvalidTopology { .. })));

    let wrong_inputs = Params::from_json_str(r#"{ "topology": [4, 2, 1] }"#);
    assert!(matches!(wrong_inputs, Err(EvoError::InvalidConfig { .. })));

    let no_agents = Params::from_json_str(r#"{ "population_size": 0 }"#);
    assert!(matches!(no_agents, Err(EvoError::InvalidPopulationSize)));

    let huge_gap = Params::from_json_str(r#"{ "pipe_gap": 700 }"#);
    assert!(matches!(huge_gap, Err(EvoError::InvalidConfig { .. })));

    let malformed = Params::from_json_str("{ population_size: ");
    assert!(matches!(malformed, Err(EvoError::Json(_))));
}

#[test]
fn test_params_file_round_trip() {
    let path = std::env::temp_dir().join("flappy_evo_params_test.json");
    let params = Params {
        generations: 3,
        score_limit: 5,
        ..Params::default()
    };
    fs::write(&path, serde_json::to_string_pretty(&params).unwrap()).unwrap();

    let loaded = Params::from_json_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(loaded, params);
}

#[test]
fn test_missing_params_file() {
    let result = Params::from_json_file("/nonexistent/flappy_evo.json");
    assert!(matches!(result, Err(EvoError::Io(_))));
}

#[test]
fn test_history_saves_json() {
    let mut history = History::default();
    assert!(history.latest().is_none());

    for generation in 0..3 {
        history.record(GenerationStats {
            generation,
            population: 10,
            average_fitness: 5.0 * generation as f32,
            best_fitness: 20.0 - generation as f32,
            best_milestones: generation,
            steps: 100,
            pipes_passed: 1,
        });
    }
    assert_eq!(history.best_fitness(), 20.0);
    assert_eq!(history.latest().unwrap().generation, 2);

    let path = std::env::temp_dir().join("flappy_evo_history_test.json");
    history.save_to_file(&path).unwrap();
    let json = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();

    let loaded: History = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded.generations, history.generations);
}

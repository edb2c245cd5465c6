// tests/batch_tests.rs
//! Tests voor configuratie en batch-orkestratie: TOML-parsing, CSV- en
//! logbestanden, en een volledige batch over een tijdelijke instantiemap.

extern crate scqbf;
use scqbf::batch::{
    append_instance_log, discover_instances, run_batch, write_csv, ExperimentResult, CSV_HEADER,
};
use scqbf::config::{BatchConfig, ConfigError};
use scqbf::params::{ConstructionMethod, SearchMethod};
use std::fs;

const SAMPLE: &str = "3
2 1 3
1 2
3
1 2 3
1 -2 0
1 4
5
";

fn result(instance: &str, config: &str, value: Option<f64>, feasible: bool) -> ExperimentResult {
    ExperimentResult {
        instance: instance.to_string(),
        config: config.to_string(),
        value,
        time_seconds: 1,
        feasible,
    }
}

#[test]
fn test_default_config_matches_single_experiment() {
    let config = BatchConfig::default();
    assert_eq!(config.max_iterations, 10_000);
    assert_eq!(config.time_limit, 600.0);
    assert_eq!(config.experiments.len(), 1);
    assert_eq!(config.experiments[0].name, "STANDARD+ALPHA");
    assert_eq!(config.experiments[0].alpha, 0.3);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_from_toml() {
    let config = BatchConfig::from_toml_str(
        r#"
        instances_dir = "data"
        threads = 2
        seed = 5

        [[experiments]]
        name = "RPG"
        construction_method = "random_plus_greedy"
        alpha = 0.0
        random_inclusion_probability = 0.5

        [[experiments]]
        name = "SAMPLED+BEST"
        construction_method = "sampled_greedy"
        search_method = "best_improving"
        alpha = 0.2
        "#,
    )
    .unwrap();

    assert_eq!(config.instances_dir.to_str(), Some("data"));
    assert_eq!(config.threads, Some(2));
    assert_eq!(config.experiments.len(), 2);

    let rpg = config.params_for(&config.experiments[0]);
    assert_eq!(rpg.construction_method, ConstructionMethod::RandomPlusGreedy);
    assert_eq!(rpg.search_method, SearchMethod::FirstImproving);
    assert_eq!(rpg.random_inclusion_probability, 0.5);
    assert_eq!(rpg.seed, Some(5));
    assert_eq!(rpg.max_iterations, 10_000);

    let sampled = config.params_for(&config.experiments[1]);
    assert_eq!(sampled.search_method, SearchMethod::BestImproving);
    assert_eq!(sampled.random_inclusion_probability, 0.3);
}

#[test]
fn test_config_rejects_invalid_values() {
    let err = BatchConfig::from_toml_str(
        r#"
        [[experiments]]
        name = "BAD"
        alpha = 2.0
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("BAD")));

    let err = BatchConfig::from_toml_str("experiments = []").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = BatchConfig::from_toml_str(
        r#"
        [[experiments]]
        name = "X"
        alpha = 0.1
        construction_method = "annealing"
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_method_names_parse() {
    assert_eq!(
        "sampled_greedy".parse::<ConstructionMethod>().unwrap(),
        ConstructionMethod::SampledGreedy
    );
    assert_eq!(
        "BEST_IMPROVING".parse::<SearchMethod>().unwrap(),
        SearchMethod::BestImproving
    );
    assert!(matches!(
        "tabu".parse::<SearchMethod>(),
        Err(ConfigError::UnknownMethod { kind: "search", .. })
    ));
    assert_eq!(ConstructionMethod::RandomPlusGreedy.to_string(), "random_plus_greedy");
}

#[test]
fn test_csv_header_written_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");

    write_csv(&path, &[result("a.txt", "STD", Some(12.345), true)]).unwrap();
    write_csv(&path, &[result("b.txt", "STD", None, false)]).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![CSV_HEADER, "a.txt,STD,12.35,1,Yes", "b.txt,STD,NA,1,No"]
    );
}

#[test]
fn test_instance_log_block() {
    let dir = tempfile::tempdir().unwrap();
    let path = append_instance_log(
        dir.path(),
        "inst_25.txt",
        &[result("inst_25.txt", "STANDARD+ALPHA", Some(7.0), true)],
    )
    .unwrap();
    assert_eq!(path, dir.path().join("inst_25.log"));

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("=== Execution at "));
    assert_eq!(lines[1], "Running instance: inst_25.txt");
    assert_eq!(lines[2], "STANDARD+ALPHA -> Value=7 Time=1s Feasible=Yes");
    assert_eq!(lines[3], "");
}

#[test]
fn test_discover_instances_sorted_files_only() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b.txt"), SAMPLE).unwrap();
    fs::write(dir.path().join("a.txt"), SAMPLE).unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();

    let found = discover_instances(dir.path()).unwrap();
    let names: Vec<_> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["a.txt", "b.txt"]);
}

#[test]
fn test_run_batch_end_to_end() {
    let root = tempfile::tempdir().unwrap();
    let instances = root.path().join("instances");
    fs::create_dir(&instances).unwrap();
    fs::write(instances.join("good.txt"), SAMPLE).unwrap();
    fs::write(instances.join("broken.txt"), "3\n2 1\n").unwrap();

    let mut config = BatchConfig::from_toml_str(
        r#"
        max_iterations = 5
        time_limit = 30.0
        seed = 1
        threads = 2

        [[experiments]]
        name = "STD"
        alpha = 0.3

        [[experiments]]
        name = "SAMPLED"
        construction_method = "sampled_greedy"
        search_method = "best_improving"
        alpha = 0.5
        "#,
    )
    .unwrap();
    config.instances_dir = instances;
    config.results_csv = root.path().join("results.csv");
    config.logs_dir = root.path().join("logs");

    let results = run_batch(&config).unwrap();
    assert_eq!(results.len(), 4);

    for r in results.iter().filter(|r| r.instance == "good.txt") {
        assert!(r.feasible);
        // {S1, S2}: 1 + 5 + 4 = 10 is het enige lokale optimum.
        assert_eq!(r.value, Some(10.0));
    }
    for r in results.iter().filter(|r| r.instance == "broken.txt") {
        assert!(!r.feasible);
        assert_eq!(r.value, None);
    }

    let csv = fs::read_to_string(&config.results_csv).unwrap();
    assert_eq!(csv.lines().count(), 5);
    assert!(config.logs_dir.join("good.log").exists());
    assert!(config.logs_dir.join("broken.log").exists());
}

#[test]
fn test_run_batch_without_instances_fails() {
    let root = tempfile::tempdir().unwrap();
    let config = BatchConfig {
        instances_dir: root.path().to_path_buf(),
        results_csv: root.path().join("results.csv"),
        logs_dir: root.path().join("logs"),
        ..BatchConfig::default()
    };
    assert!(run_batch(&config).is_err());
}

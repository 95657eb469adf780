use super::*;
use wheelhouse_execution::{mocks::RecordingSink, presets::PRESETS, TracingSink};

fn preset_config(name: &str) -> ValidatedConfig {
    Config::from_preset(name).validate().unwrap()
}

#[test]
fn test_wheel_is_seeded() {
    let mut a = Wheel::new(42);
    let mut b = Wheel::new(42);
    let first: Vec<u8> = (0..50).map(|_| a.spin().number()).collect();
    let second: Vec<u8> = (0..50).map(|_| b.spin().number()).collect();
    assert_eq!(first, second);
    assert!(first.iter().all(|n| *n <= 36));
}

#[test]
fn test_config_from_yaml() {
    let yaml = r#"
table:
  min: 2
  min_outside: 10
  max: 1000
strategy: dozen-hedge
bankroll: 2500
spins: 50
seed: 9
log_level: debug
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.flush_every, 100);
    let config = config.validate().unwrap();
    assert_eq!(config.runtime.name(), "dozen-hedge");
    assert_eq!(config.runtime.limits().min_outside(), 10);
    assert_eq!(config.bankroll, 2500);
    assert_eq!(config.log_level, tracing::Level::DEBUG);
    assert!(config.diagnostics.is_none());
}

#[test]
fn test_config_with_inline_strategy() {
    let yaml = r#"
strategy:
  name: inline
  shape:
    legs:
      - target: { cold: { sector: column, lookback: 12 } }
  ladder:
    table: { linear: { start: 1, increment: 2, levels: 5 } }
    transition: reset_on_win
    overflow: cap
"#;
    let config = Config::from_yaml(yaml).unwrap();
    let config = config.validate().unwrap();
    assert_eq!(config.runtime.name(), "inline");
    assert_eq!(config.runtime.ladder().level_count(), 5);
    assert_eq!(config.runtime.limits().max(), 500);
}

#[test]
fn test_inline_strategy_with_nested_enums() {
    let yaml = r#"
strategy:
  name: hedge
  unit: { fixed: 10 }
  shape:
    legs:
      - target: { fixed: { dozen: 1 } }
      - target: { fixed: { dozen: 2 } }
  ladder:
    table: { sequence: [1, 3, 9, 27] }
    transition: reset_on_win
    overflow: { recycle_to: 1 }
  push:
    sector: [25, 26, 27]
"#;
    let config = Config::from_yaml(yaml).unwrap().validate().unwrap();
    let definition = config.runtime.definition();
    assert_eq!(definition.unit, wheelhouse_execution::Unit::Fixed(10));
    assert_eq!(definition.shape.legs.len(), 2);
    assert_eq!(
        definition.ladder.overflow,
        wheelhouse_execution::OverflowPolicy::RecycleTo(1)
    );
}

#[test]
fn test_readme_config_parses() {
    let readme = include_str!("../README.md");
    let start = readme.find("```yaml\n").unwrap() + "```yaml\n".len();
    let end = start + readme[start..].find("```").unwrap();
    let config = Config::from_yaml(&readme[start..end])
        .unwrap()
        .validate()
        .unwrap();
    assert_eq!(config.runtime.name(), "cold-columns");
    assert_eq!(config.runtime.ladder().level_count(), 10);
    assert_eq!(config.seed, 42);
    assert!(config.runtime.definition().skip.is_some());
}

#[test]
fn test_config_errors() {
    let mut config = Config::from_preset("martingale-red");
    config.table.min = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidLimits(_))
    ));

    assert!(matches!(
        Config::from_preset("labouchere").validate(),
        Err(ConfigError::UnknownPreset { .. })
    ));

    let mut config = Config::from_preset("martingale-red");
    config.log_level = "loud".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidLogLevel { .. })
    ));

    let mut config = Config::from_preset("martingale-red");
    config.bankroll = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidNonZero {
            field: "bankroll",
            ..
        })
    ));

    // Overflow policy has no default
    let yaml = r#"
strategy:
  name: missing-overflow
  shape:
    legs:
      - target: { fixed: { dozen: 1 } }
  ladder:
    table: { sequence: [1, 2] }
    transition: reset_on_win
"#;
    assert!(Config::from_yaml(yaml).is_err());
}

#[test]
fn test_session_is_deterministic() {
    for name in PRESETS {
        let first = preset_config(name);
        let second = preset_config(name);
        let a = Simulator::new(first.runtime, 1_000, 7).run(300, &TracingSink);
        let b = Simulator::new(second.runtime, 1_000, 7).run(300, &TracingSink);
        assert_eq!(a, b, "{name}");
    }
}

#[test]
fn test_report_accounting() {
    let config = preset_config("fibonacci-dozens");
    let mut simulator = Simulator::new(config.runtime, 1_000, 3);
    let sink = RecordingSink::default();
    let mut staked = 0;
    let mut placed = 0;
    let mut skipped = 0;
    for _ in 0..200 {
        let before = simulator.bankroll();
        let (wagers, spin) = simulator.step(&sink);
        let stake: u64 = wagers.iter().map(|w| w.amount).sum();
        let returned: u64 = wagers.iter().map(|w| w.settle(spin.number())).sum();
        assert!(stake <= before);
        assert_eq!(simulator.bankroll(), before - stake + returned);
        staked += stake;
        placed += wagers.len() as u64;
        if wagers.is_empty() {
            skipped += 1;
        }
    }
    assert_eq!(simulator.history().len(), 200);
    let recorded = sink.take();
    assert_eq!(recorded.len(), 200);
    assert_eq!(recorded[199].spin, 199);

    let report = simulator.report.clone();
    assert_eq!(report.spins, 200);
    assert_eq!(report.total_staked, staked);
    assert_eq!(report.wagers_placed, placed);
    assert_eq!(report.spins_skipped, skipped);
    assert!(report.peak_bankroll >= report.final_bankroll);
    assert!(report.peak_bankroll >= report.starting_bankroll);
}

#[test]
fn test_bust_stops_session() {
    let config = preset_config("martingale-red");
    // Too small to cover the even-money minimum, but above the table minimum
    let report = Simulator::new(config.runtime, 3, 1).run(100, &TracingSink);
    assert_eq!(report.wagers_placed, 0);
    assert_eq!(report.spins, 100);
    assert!(!report.busted);

    let config = preset_config("martingale-red");
    let report = Simulator::new(config.runtime, 0, 1).run(100, &TracingSink);
    assert!(report.busted);
    assert_eq!(report.spins, 0);
}

#[tokio::test]
async fn test_file_sink_writes_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diagnostics.jsonl");
    let (sink, writer) = FileSink::spawn(path.clone(), 7);

    let config = preset_config("dalembert-even");
    let simulator = Simulator::new(config.runtime, 1_000, 11);
    let report = tokio::task::spawn_blocking(move || simulator.run(20, &sink))
        .await
        .unwrap();
    assert_eq!(report.spins, 20);
    assert_eq!(writer.finish().await, 20);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<wheelhouse_execution::SpinDiagnostic> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 20);
    assert_eq!(lines[0].strategy, "dalembert-even");
    assert_eq!(lines[0].number, None);
    assert_eq!(lines[19].spin, 19);
}

#[tokio::test]
async fn test_file_sink_survives_unwritable_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("diagnostics.jsonl");
    let (sink, writer) = FileSink::spawn(path, 1);

    let config = preset_config("martingale-red");
    let simulator = Simulator::new(config.runtime, 1_000, 11);
    let report = tokio::task::spawn_blocking(move || simulator.run(5, &sink))
        .await
        .unwrap();
    assert_eq!(report.spins, 5);
    assert_eq!(writer.finish().await, 0);
}

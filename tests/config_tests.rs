use std::fs;
use std::path::PathBuf;

use rust_decimal_macros::dec;
use tempfile::TempDir;

use karat::domain::{Algorithm, Grade, WeightVector};
use karat::error::{ConfigError, Error};
use karat::infrastructure::config::Settings;

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("karat.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn shipped_template_is_valid() {
    let template = include_str!("../config.toml.example");
    let settings = Settings::parse_toml(template).expect("template should parse");

    assert_eq!(settings.pricing_config().weights, WeightVector::default());
    assert_eq!(settings.tuning.algorithm, Algorithm::Random);
    assert_eq!(settings.tuning.scenarios.len(), 2);
}

#[test]
fn settings_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[logging]
level = "debug"
format = "json"

[pricing]
step = 100000
source_grade = 750
settlement_grade = 999

[pricing.weights]
profit_target_proximity = 0.2
competitiveness = 0.2
spread_utility = 0.2
volatility_safety = 0.2
ma_reversion_safety = 0.2
"#,
    );

    let settings = Settings::load(&path).unwrap();
    let pricing = settings.pricing_config();
    assert_eq!(settings.logging.format, "json");
    assert_eq!(pricing.step, dec!(100_000));
    assert_eq!(pricing.source_grade, Grade::G750);
    assert_eq!(pricing.settlement_grade, Grade::G999);
    assert_eq!(pricing.weights, WeightVector::new(0.2, 0.2, 0.2, 0.2, 0.2));
}

#[test]
fn inverted_spread_window_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[pricing]
spread_min = 600000
spread_max = 200000
"#,
    );

    match Settings::load(&path) {
        Err(Error::Config(ConfigError::InvalidValue { field, .. })) => {
            assert!(field.starts_with("spread"), "unexpected field {field}");
        }
        other => panic!("expected invalid spread window, got {other:?}"),
    }
}

#[test]
fn partial_weight_table_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[pricing.weights]
competitiveness = 1.0
"#,
    );

    assert!(matches!(
        Settings::load(&path),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn zero_grade_is_rejected() {
    assert!(Settings::parse_toml("[pricing]\nsource_grade = 0").is_err());
}

#[test]
fn unknown_scenario_key_is_rejected() {
    let toml = r#"
[[tuning.scenarios]]
source_price = 11000000
settlement_price = 16000000
spot = 1
"#;
    assert!(matches!(
        Settings::parse_toml(toml),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let err = Settings::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}

#[test]
fn load_or_default_without_path_uses_defaults() {
    let settings = Settings::load_or_default(None).unwrap();
    assert_eq!(settings, Settings::default());
}

//! Tests for configuration validation

use std::collections::HashMap;
use std::time::Duration;

use qew::config::{ENV_ADMISSION_ORDER, ENV_DELAY_MS, ENV_MAX_CONCURRENT};
use qew::{AdmissionOrder, QewConfig};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_default_config() {
    let cfg = QewConfig::default();
    assert_eq!(cfg.max_concurrent, 1);
    assert_eq!(cfg.delay_ms, 0);
    assert_eq!(cfg.admission_order, AdmissionOrder::Fifo);
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.delay().next(), Duration::ZERO);
}

#[test]
fn test_zero_concurrency_is_invalid() {
    let cfg = QewConfig {
        max_concurrent: 0,
        ..QewConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "max_concurrent": 4,
        "delay_ms": 250,
        "admission_order": "lifo"
    }"#;

    let cfg = QewConfig::from_json_str(json).unwrap();
    assert_eq!(cfg.max_concurrent, 4);
    assert_eq!(cfg.admission_order, AdmissionOrder::Lifo);
    assert_eq!(cfg.delay().next(), Duration::from_millis(250));
}

#[test]
fn test_config_from_json_uses_defaults_for_missing_fields() {
    let cfg = QewConfig::from_json_str(r#"{ "max_concurrent": 3 }"#).unwrap();
    assert_eq!(cfg.max_concurrent, 3);
    assert_eq!(cfg.delay_ms, 0);
    assert_eq!(cfg.admission_order, AdmissionOrder::Fifo);
}

#[test]
fn test_config_from_json_rejects_invalid_values() {
    assert!(QewConfig::from_json_str(r#"{ "max_concurrent": 0 }"#).is_err());
    assert!(QewConfig::from_json_str(r#"{ "max_concurrent": -2 }"#).is_err());
    assert!(QewConfig::from_json_str(r#"{ "delay_ms": -1 }"#).is_err());
    assert!(QewConfig::from_json_str(r#"{ "admission_order": "random" }"#).is_err());
}

#[test]
fn test_config_from_lookup() {
    let cfg = QewConfig::from_lookup(lookup(&[
        (ENV_MAX_CONCURRENT, "8"),
        (ENV_DELAY_MS, " 100 "),
        (ENV_ADMISSION_ORDER, "LIFO"),
    ]))
    .unwrap();

    assert_eq!(cfg.max_concurrent, 8);
    assert_eq!(cfg.delay_ms, 100);
    assert_eq!(cfg.admission_order, AdmissionOrder::Lifo);
}

#[test]
fn test_config_from_empty_lookup_is_default() {
    let cfg = QewConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg, QewConfig::default());
}

#[test]
fn test_config_from_lookup_rejects_malformed_values() {
    assert!(QewConfig::from_lookup(lookup(&[(ENV_MAX_CONCURRENT, "0")])).is_err());
    assert!(QewConfig::from_lookup(lookup(&[(ENV_MAX_CONCURRENT, "-3")])).is_err());
    assert!(QewConfig::from_lookup(lookup(&[(ENV_DELAY_MS, "soon")])).is_err());
    assert!(QewConfig::from_lookup(lookup(&[(ENV_ADMISSION_ORDER, "priority")])).is_err());
}

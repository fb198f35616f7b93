//! Configuration defaults and JSON loading.

use pretty_assertions::assert_eq;
use rv5s_core::pipeline::hazards::HazardMode;
use rv5s_core::{Config, VmType};

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.vm_type, VmType::Pipelined);
    assert_eq!(config.hazard_mode, HazardMode::NoHazardNoForwarding);
    assert_eq!(config.text_base, 0);
    assert_eq!(config.memory_size, 128 * 1024 * 1024);
    assert_eq!(config.history_capacity, 1000);
    assert_eq!(config.bht_size, 256);
}

#[test]
fn empty_json_yields_defaults() {
    let config: Config = serde_json::from_str("{}").expect("empty object must parse");
    assert_eq!(config.memory_size, Config::default().memory_size);
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let config: Config = serde_json::from_str(
        r#"{"vm_type": "SingleCycle", "hazard_mode": "HazardAndForwarding", "history_capacity": 10}"#,
    )
    .expect("partial config must parse");

    assert_eq!(config.vm_type, VmType::SingleCycle);
    assert_eq!(config.hazard_mode, HazardMode::HazardAndForwarding);
    assert_eq!(config.history_capacity, 10);
    assert_eq!(config.memory_size, Config::default().memory_size);
}

use revive_domain::config::{BridgeConfig, SurfaceConfig, SyncConfig};
use revive_domain::features::{FeatureId, FeatureSet};
use serde_json::json;
use std::time::Duration;

#[test]
fn config_defaults_are_sane() {
    let bridge = BridgeConfig::default();
    assert_eq!(bridge.poll_interval(), Duration::from_millis(50));
    assert_eq!(bridge.max_attempts, 160);
    assert_eq!(bridge.required_operation.as_deref(), Some("get_init_state"));

    let sync = SyncConfig::default();
    assert_eq!(sync.debounce(), Duration::from_millis(250));
    assert_eq!(sync.mirror_interval(), Duration::from_secs(2));

    let cfg = SurfaceConfig::default();
    assert_eq!(cfg.features, FeatureSet::ALL);
    assert!(cfg.session.server.is_none());
}

#[test]
fn surface_config_deserializes_partial_documents() {
    let raw = json!({
        "bridge": { "max_attempts": 10 },
        "sync": { "debounce_ms": 100 },
        "logging": { "level": "debug", "json": true },
        "session": { "server": "l2mad" },
        "features": ["macros", "pipeline"]
    });

    let cfg: SurfaceConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.bridge.max_attempts, 10);
    assert_eq!(cfg.bridge.poll_interval_ms, 50);
    assert_eq!(cfg.sync.debounce_ms, 100);
    assert_eq!(cfg.sync.mirror_interval_ms, 2000);
    assert!(cfg.logging.json);
    assert_eq!(cfg.session.server.as_deref(), Some("l2mad"));
    assert!(cfg.features.has(FeatureId::Macros));
    assert!(cfg.features.has(FeatureId::Pipeline));
    assert!(!cfg.features.has(FeatureId::Buff));
}

#[test]
fn feature_set_accepts_bits_and_names() {
    let bits: FeatureSet = serde_json::from_value(json!(1)).unwrap();
    assert_eq!(bits, FeatureSet::MACROS);

    let listed: FeatureSet = serde_json::from_value(json!("buff,teleport")).unwrap();
    assert_eq!(listed, FeatureSet::BUFF | FeatureSet::TELEPORT);

    let all: FeatureSet = serde_json::from_value(json!("all")).unwrap();
    assert_eq!(all, FeatureSet::ALL);
    assert_eq!(FeatureSet::from("unknown"), FeatureSet::empty());
}

#[test]
fn config_mutation_copies_on_write() {
    let base = SurfaceConfig::default();
    let mut tuned = base.clone();
    tuned.sync.debounce_ms = 10;

    assert_eq!(base.sync.debounce_ms, 250);
    assert_eq!(tuned.sync.debounce_ms, 10);
}

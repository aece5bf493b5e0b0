use revive::ControlSurface;
use revive::domain::config::SurfaceConfig;
use revive::domain::features::{FeatureId, FeatureSet};
use revive::domain::notify::StatusTone;
use revive::domain::state::{BridgeState, CommitOutcome, HydrationState};
use revive::features::macros::Macros;
use revive::features::teleport::Teleport;
use revive_bridge::BridgeHandle;
use revive_bridge::memory::MemoryHost;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

fn store() -> Arc<MemoryHost> {
    Arc::new(
        MemoryHost::new(json!({
            "init": {"version": "1.4.0", "server": "boh", "language": "eng", "monitoring": false},
            "macros": {"enabled": true, "rows": [{"key": "2", "cast_s": 1.0, "repeat_s": 0.0}]}
        }))
        .with_read("get_init_state", "/init")
        .with_value("app_version", json!("1.4.0"))
        .with_write("set_server", "/init/server")
        .with_write("set_language", "/init/language")
        .with_read("macros_get", "/macros")
        .with_write("macros_set_enabled", "/macros/enabled")
        .with_write("macros_set_run_always", "/macros/run_always")
        .with_value("teleport_get_config", json!({"category": "towns"})),
    )
}

fn config(features: FeatureSet) -> SurfaceConfig {
    let mut config = SurfaceConfig::default();
    config.features = features;
    config.sync.mirror_interval_ms = 100;
    config
}

#[tokio::test(start_paused = true)]
async fn every_enabled_slice_goes_live() {
    let host = store();
    let surface = ControlSurface::new(BridgeHandle::default(), &config(FeatureSet::default())).unwrap();
    assert_eq!(surface.enabled().len(), FeatureId::ALL.len());
    assert!(!surface.is_live());

    host.attach_to(surface.bridge());
    surface.boot().await;

    assert!(surface.is_live());
    assert!(surface.hydration().iter().all(|(_, state)| *state == HydrationState::Live));
    assert_eq!(surface.init_state().unwrap().server, "boh");
    assert_eq!(surface.slice::<Macros>().unwrap().view().rows[0].key, "2");
    assert_eq!(surface.slice::<Teleport>().unwrap().view().config.category, "towns");
    assert_eq!(surface.app_version().await.as_deref(), Some("1.4.0"));
}

#[tokio::test(start_paused = true)]
async fn disabled_features_are_not_initialized() {
    let surface = ControlSurface::new(BridgeHandle::default(), &config(FeatureSet::MACROS)).unwrap();
    assert_eq!(surface.enabled(), vec![FeatureId::Macros]);
    assert!(surface.slice::<Teleport>().is_none());
}

#[tokio::test(start_paused = true)]
async fn context_switch_rehydrates_every_slice() {
    let host = store();
    let surface = ControlSurface::new(BridgeHandle::default(), &config(FeatureSet::MACROS)).unwrap();
    host.attach_to(surface.bridge());
    surface.boot().await;

    host.set_tree_value("/macros/rows", json!([{"key": "5"}]));
    surface.set_server("core").await.unwrap();
    assert_eq!(surface.init_state().unwrap().server, "core");
    assert_eq!(surface.slice::<Macros>().unwrap().view().rows[0].key, "5");
    assert_eq!(host.call_count("macros_get"), 2);

    host.fail("set_language", "unknown language");
    let err = surface.set_language("xx").await.unwrap_err();
    assert!(err.is_degraded());
    assert_eq!(host.call_count("macros_get"), 2);
}

#[tokio::test(start_paused = true)]
async fn store_notifications_reach_the_board() {
    let host = store();
    let surface = ControlSurface::new(BridgeHandle::default(), &config(FeatureSet::TELEPORT)).unwrap();
    host.connect_notifier(surface.notifier());
    host.attach_to(surface.bridge());
    surface.boot().await;

    host.emit("onStatus", vec![json!({"scope": "teleport", "text": "Teleporting", "ok": true})]);
    host.emit("onRows", vec![json!([{"id": "7", "title": "Dion"}])]);
    sleep(Duration::from_millis(5)).await;

    assert_eq!(surface.status("teleport").unwrap().tone(), StatusTone::Ok);
    assert_eq!(surface.slice::<Teleport>().unwrap().view().rows[0].title, "Dion");
}

fn state_of(surface: &ControlSurface, feature: FeatureId) -> Option<HydrationState> {
    surface.hydration().into_iter().find(|(f, _)| *f == feature).map(|(_, state)| state)
}

#[tokio::test(start_paused = true)]
async fn hung_getter_holds_up_only_its_feature() {
    let host = store();
    host.hang("macros_get");
    let surface =
        Arc::new(ControlSurface::new(BridgeHandle::default(), &config(FeatureSet::MACROS | FeatureSet::TELEPORT)).unwrap());
    host.attach_to(surface.bridge());

    let boot = tokio::spawn({
        let surface = Arc::clone(&surface);
        async move { surface.boot().await }
    });
    sleep(Duration::from_secs(60)).await;

    assert_eq!(state_of(&surface, FeatureId::Macros), Some(HydrationState::Hydrating));
    assert_eq!(state_of(&surface, FeatureId::Teleport), Some(HydrationState::Live));
    assert!(surface.slice::<Teleport>().unwrap().set_enabled(true).is_accepted());
    assert_eq!(surface.slice::<Macros>().unwrap().set_enabled(false), CommitOutcome::Suppressed);
    assert!(!boot.is_finished());
}

#[tokio::test(start_paused = true)]
async fn bridge_that_never_opens_leaves_every_feature_idle() {
    let host = store();
    let surface = Arc::new(ControlSurface::new(BridgeHandle::default(), &config(FeatureSet::default())).unwrap());
    let boot = tokio::spawn({
        let surface = Arc::clone(&surface);
        async move { surface.boot().await }
    });

    sleep(Duration::from_secs(30)).await;
    assert_eq!(surface.bridge().state(), BridgeState::Waiting);
    assert!(surface.hydration().iter().all(|(_, state)| *state == HydrationState::Idle));
    assert_eq!(surface.slice::<Macros>().unwrap().set_enabled(false), CommitOutcome::Suppressed);
    assert_eq!(surface.slice::<Teleport>().unwrap().set_enabled(true), CommitOutcome::Suppressed);
    assert!(surface.init_state().is_none());
    assert!(!boot.is_finished());
    assert!(host.calls().is_empty());

    host.attach_to(surface.bridge());
    sleep(Duration::from_millis(5)).await;
    assert!(boot.is_finished());
    assert!(surface.is_live());
}

#[tokio::test(start_paused = true)]
async fn bridge_section_of_the_config_gates_readiness() {
    let host = store();
    let mut tuned = config(FeatureSet::MACROS);
    tuned.bridge.poll_interval_ms = 10;
    tuned.bridge.max_attempts = 3;
    tuned.bridge.required_operation = Some("engine_ready".to_owned());
    let surface = Arc::new(ControlSurface::from_config(&tuned).unwrap());
    host.attach_to(surface.bridge());

    let boot = tokio::spawn({
        let surface = Arc::clone(&surface);
        async move { surface.boot().await }
    });
    sleep(Duration::from_secs(1)).await;
    assert!(!surface.is_live());
    assert!(!boot.is_finished());

    host.set_value("engine_ready", json!(true));
    surface.bridge().announce();
    sleep(Duration::from_millis(5)).await;
    assert!(boot.is_finished());
    assert!(surface.is_live());
}

#[tokio::test(start_paused = true)]
async fn store_pushed_rows_survive_a_server_switch() {
    let host = store();
    let surface = ControlSurface::new(BridgeHandle::default(), &config(FeatureSet::TELEPORT)).unwrap();
    host.connect_notifier(surface.notifier());
    host.attach_to(surface.bridge());
    surface.boot().await;

    host.emit("onRows", vec![json!([{"id": "7", "title": "Dion"}])]);
    sleep(Duration::from_millis(5)).await;
    surface.set_server("core").await.unwrap();

    let view = surface.slice::<Teleport>().unwrap().view();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].title, "Dion");
    assert_eq!(host.call_count("teleport_get_config"), 2);
}

#[tokio::test(start_paused = true)]
async fn overlapping_rehydrations_settle_on_the_last_read() {
    let host = store();
    let surface = ControlSurface::new(BridgeHandle::default(), &config(FeatureSet::MACROS)).unwrap();
    host.attach_to(surface.bridge());
    surface.boot().await;
    let macros = surface.slice::<Macros>().unwrap();
    let generation = macros.module.generation();

    host.delay("macros_get", Duration::from_millis(100));
    host.set_tree_value("/macros/rows", json!([{"key": "7"}]));
    tokio::join!(surface.rehydrate(), surface.rehydrate());

    assert_eq!(macros.module.generation(), generation + 2);
    assert_eq!(macros.module.hydration_state(), HydrationState::Live);
    assert_eq!(macros.view().rows[0].key, "7");
    assert_eq!(host.call_count("macros_get"), 3);
}

#[tokio::test(start_paused = true)]
async fn server_switch_during_a_push_drops_the_queued_edits() {
    let host = store();
    let surface = ControlSurface::new(BridgeHandle::default(), &config(FeatureSet::MACROS)).unwrap();
    host.attach_to(surface.bridge());
    surface.boot().await;
    let macros = surface.slice::<Macros>().unwrap();

    host.delay("macros_set_enabled", Duration::from_millis(500));
    assert!(macros.set_enabled(false).is_accepted());
    sleep(Duration::from_millis(5)).await;
    assert!(macros.module.is_pushing());
    assert!(macros.set_run_always(true).is_accepted());

    surface.set_server("core").await.unwrap();
    assert!(macros.module.pending().is_empty());
    assert!(macros.view().enabled, "view follows the re-read store");

    sleep(Duration::from_secs(1)).await;
    assert!(!macros.module.is_pushing());
    assert_eq!(host.call_count("macros_set_enabled"), 1);
    assert_eq!(host.call_count("macros_set_run_always"), 0);

    assert!(macros.set_run_always(true).is_accepted());
    sleep(Duration::from_millis(5)).await;
    assert_eq!(host.calls_to("macros_set_run_always"), vec![vec![json!(true)]]);
}

use revive_bridge::BridgeHandle;
use revive_bridge::memory::MemoryHost;
use revive_kernel::domain::config::SyncConfig;
use revive_kernel::domain::records::MonitorView;
use revive_kernel::sync::{Lifecycle, NotificationSink, SyncContext};
use revive_monitor::Monitor;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

fn store() -> MemoryHost {
    MemoryHost::new(json!({"state": {"hp": 90, "cp": 100, "alive": true}, "running": true}))
        .with_value("get_init_state", json!({"monitoring": true}))
        .with_read("get_state_snapshot", "/state")
        .with_read("watcher_is_running", "/running")
        .with_write("watcher_set_enabled", "/running")
}

async fn boot(host: MemoryHost) -> (Monitor, Arc<MemoryHost>) {
    let host = Arc::new(host);
    let config = SyncConfig { mirror_interval_ms: 100, ..SyncConfig::default() };
    let ctx = SyncContext::new(BridgeHandle::default(), NotificationSink::default(), config);
    let monitor = revive_monitor::init(&ctx).unwrap();
    host.attach_to(&ctx.bridge);
    monitor.boot().await;
    (monitor, host)
}

#[tokio::test(start_paused = true)]
async fn mirror_follows_the_latest_reading() {
    let (monitor, host) = boot(store()).await;
    sleep(Duration::from_millis(50)).await;
    assert_eq!(
        monitor.view(),
        MonitorView { enabled: true, running: Some(true), hp_percent: Some(90), alive: Some(true) }
    );

    host.set_tree_value("/state", json!({"hp": 0, "cp": 0, "alive": false}));
    sleep(Duration::from_millis(100)).await;
    assert_eq!(monitor.view().hp_percent, Some(0));
    assert_eq!(monitor.view().alive, Some(false));
    assert_eq!(host.call_count("watcher_set_enabled"), 0, "mirror never writes back");
}

#[tokio::test(start_paused = true)]
async fn mirror_survives_failed_reads() {
    let (monitor, host) = boot(store()).await;
    host.fail("get_state_snapshot", "watcher gone");
    sleep(Duration::from_millis(250)).await;
    assert!(monitor.mirror.failures() >= 2);

    host.recover("get_state_snapshot");
    host.set_tree_value("/state/hp", json!(42));
    sleep(Duration::from_millis(100)).await;
    assert_eq!(monitor.view().hp_percent, Some(42));
    assert!(monitor.mirror.is_running());
    assert!(monitor.stop_mirror());
    assert!(!monitor.stop_mirror());
}

#[tokio::test(start_paused = true)]
async fn toggle_is_confirmed_by_run_status() {
    let old = store()
        .with_write("respawn_set_monitoring", "/running")
        .with_value("state_last", json!({"hp_ratio": 0.5}));
    old.remove("watcher_set_enabled");
    old.remove("get_state_snapshot");
    let (monitor, host) = boot(old).await;

    monitor.set_enabled(false);
    sleep(Duration::from_millis(5)).await;
    assert_eq!(host.calls_to("respawn_set_monitoring"), vec![vec![json!(false)]]);

    sleep(Duration::from_millis(150)).await;
    let view = monitor.view();
    assert_eq!(view.running, Some(false));
    assert!(!view.enabled);
    assert_eq!(view.hp_percent, Some(50));
}

#[tokio::test(start_paused = true)]
async fn late_run_status_does_not_revert_a_toggle() {
    // Answers with the status from before the toggle.
    let host = store().with_handler("watcher_is_running", |_, _| Ok(json!(true)));
    host.delay("watcher_is_running", Duration::from_millis(60));
    let (monitor, host) = boot(host).await;

    sleep(Duration::from_millis(10)).await;
    monitor.set_enabled(false);
    sleep(Duration::from_millis(5)).await;
    assert_eq!(host.calls_to("watcher_set_enabled"), vec![vec![json!(false)]]);

    sleep(Duration::from_millis(55)).await;
    let view = monitor.view();
    assert_eq!(view.running, Some(true));
    assert!(!view.enabled);
}

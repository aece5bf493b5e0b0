use revive_bridge::BridgeHandle;
use revive_bridge::memory::MemoryHost;
use revive_kernel::domain::config::SyncConfig;
use revive_kernel::domain::features::FeatureId;
use revive_kernel::domain::records::RespawnConfig;
use revive_kernel::domain::state::HydrationState;
use revive_kernel::sync::{Lifecycle, NotificationSink, SyncContext};
use revive_respawn::Respawn;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

fn store() -> MemoryHost {
    MemoryHost::new(json!({"respawn": {"enabled": false, "seconds": 120, "respawn_enabled": true}}))
        .with_value(
            "get_init_state",
            json!({"respawn": {"enabled": true, "wait_enabled": true, "wait_seconds": 30}}),
        )
        .with_read("respawn_get_wait_config", "/respawn")
        .with_write("respawn_set_enabled", "/respawn/respawn_enabled")
        .with_write("respawn_set_wait_enabled", "/respawn/enabled")
        .with_write("respawn_set_wait_seconds", "/respawn/seconds")
}

async fn boot(host: MemoryHost) -> (Respawn, Arc<MemoryHost>) {
    let host = Arc::new(host);
    let ctx = SyncContext::new(BridgeHandle::default(), NotificationSink::default(), SyncConfig::default());
    let respawn = revive_respawn::init(&ctx).unwrap();
    host.attach_to(&ctx.bridge);
    respawn.boot().await;
    (respawn, host)
}

#[tokio::test(start_paused = true)]
async fn wait_getter_wins_over_init_dump() {
    let (respawn, _) = boot(store()).await;
    assert_eq!(respawn.view(), RespawnConfig { enabled: true, wait_enabled: false, wait_seconds: 120 });
}

#[tokio::test(start_paused = true)]
async fn init_dump_covers_hosts_without_the_getter() {
    let old = store();
    old.remove("respawn_get_wait_config");
    let (respawn, _) = boot(old).await;

    assert_eq!(respawn.view(), RespawnConfig { enabled: true, wait_enabled: true, wait_seconds: 30 });
    assert_eq!(respawn.hydration(), HydrationState::Live);
}

#[tokio::test(start_paused = true)]
async fn typed_seconds_are_debounced_and_clamped() {
    let (respawn, host) = boot(store()).await;

    respawn.set_wait_enabled(true);
    for text in ["4", "45", "-45"] {
        respawn.set_wait_seconds_text(text);
    }
    sleep(Duration::from_millis(5)).await;
    assert_eq!(host.tree_value("/respawn/enabled"), Some(json!(true)));
    assert_eq!(host.call_count("respawn_set_wait_seconds"), 0);

    sleep(Duration::from_millis(300)).await;
    assert_eq!(host.calls_to("respawn_set_wait_seconds"), vec![vec![json!(0)]]);
}

#[tokio::test(start_paused = true)]
async fn slice_drives_its_module_through_the_lifecycle() {
    let host = Arc::new(store());
    let ctx = SyncContext::new(BridgeHandle::default(), NotificationSink::default(), SyncConfig::default());
    let lifecycle: Arc<dyn Lifecycle> = Arc::new(revive_respawn::init(&ctx).unwrap());
    assert_eq!(lifecycle.feature(), FeatureId::Respawn);
    assert_eq!(lifecycle.hydration(), HydrationState::Idle);

    host.attach_to(&ctx.bridge);
    lifecycle.boot().await;
    assert_eq!(lifecycle.hydration(), HydrationState::Live);

    lifecycle.rehydrate().await;
    assert_eq!(host.call_count("respawn_get_wait_config"), 2);
}

use revive_bridge::BridgeHandle;
use revive_bridge::memory::MemoryHost;
use revive_buff::Buff;
use revive_kernel::domain::config::SyncConfig;
use revive_kernel::domain::reply::OpReply;
use revive_kernel::domain::state::CommitOutcome;
use revive_kernel::sync::{Lifecycle, NotificationSink, SyncContext};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

fn store() -> MemoryHost {
    MemoryHost::new(json!({"buff": {"mode": "profile", "method": ""}}))
        .with_value("get_init_state", json!({"buff_methods": ["dashboard", "npc"], "buff_current": "npc"}))
        .with_write("buff_set_enabled", "/buff/enabled")
        .with_write("buff_set_mode", "/buff/mode")
        .with_write("buff_set_method", "/buff/method")
        .with_value("buff_run_once", json!(false))
}

async fn boot(host: MemoryHost) -> (Buff, NotificationSink, Arc<MemoryHost>) {
    let host = Arc::new(host);
    let sink = NotificationSink::default();
    let ctx = SyncContext::new(BridgeHandle::default(), sink.clone(), SyncConfig::default());
    let buff = revive_buff::init(&ctx).unwrap();
    host.connect_notifier(Arc::new(sink.clone()));
    host.attach_to(&ctx.bridge);
    buff.boot().await;
    (buff, sink, host)
}

#[tokio::test(start_paused = true)]
async fn hydrates_from_init_dump_without_a_getter() {
    let (buff, _, _) = boot(store()).await;

    let view = buff.view();
    assert_eq!(view.methods, vec!["dashboard", "npc"]);
    assert_eq!(view.method, "npc");
    assert_eq!(view.mode, "profile");
}

#[tokio::test(start_paused = true)]
async fn method_list_notification_replaces_pool() {
    let (buff, _, host) = boot(store()).await;

    assert!(host.emit("onBuffMethods", vec![json!(["scroll", "dashboard"]), json!("gone")]));
    sleep(Duration::from_millis(5)).await;
    let view = buff.view();
    assert_eq!(view.methods, vec!["scroll", "dashboard"]);
    assert_eq!(view.method, "scroll");
    assert_eq!(host.call_count("buff_set_method"), 0);

    assert_eq!(buff.set_method("dashboard"), CommitOutcome::Accepted);
    assert!(matches!(buff.set_method("npc"), CommitOutcome::Rejected { .. }));
    sleep(Duration::from_millis(5)).await;
    assert_eq!(host.calls_to("buff_set_method"), vec![vec![json!("dashboard")]]);
}

#[tokio::test(start_paused = true)]
async fn run_once_maps_bare_booleans() {
    let (buff, _, host) = boot(store()).await;

    assert_eq!(buff.run_once().await, OpReply::refused("failed"));
    host.set_value("buff_run_once", json!(true));
    assert_eq!(buff.run_once().await, OpReply::success());

    buff.set_mode("MAGE");
    sleep(Duration::from_millis(5)).await;
    assert_eq!(host.tree_value("/buff/mode"), Some(json!("mage")));
}

#[tokio::test(start_paused = true)]
async fn rehydration_keeps_the_pushed_method_pool() {
    let host = store().with_read("buff_get_config", "/buff");
    let (buff, _, host) = boot(host).await;
    host.emit("onBuffMethods", vec![json!(["scroll", "dashboard"]), json!("dashboard")]);
    sleep(Duration::from_millis(5)).await;

    host.set_tree_value("/buff/mode", json!("fighter"));
    buff.rehydrate().await;

    let view = buff.view();
    assert_eq!(view.mode, "fighter");
    assert_eq!(view.methods, vec!["scroll", "dashboard"]);
    assert_eq!(view.method, "dashboard");
}

#[tokio::test(start_paused = true)]
async fn checker_selection_is_read_and_written_on_demand() {
    let host = store()
        .with_value("buff_checker_get", json!(["Mental_Shield", "dance_of_siren", "mental_shield"]))
        .with_write("buff_checker_set", "/checker");
    let (buff, _, host) = boot(host).await;

    assert_eq!(buff.checker().await, vec!["mental_shield", "dance_of_siren"]);
    let sent = buff.set_checker(&["song_of_earth", " song_of_earth ", ""]).await.unwrap();
    assert_eq!(sent, vec!["song_of_earth"]);
    assert_eq!(host.tree_value("/checker"), Some(json!(["song_of_earth"])));

    host.fail("buff_checker_set", "locked");
    let err = buff.set_checker(&["mental_shield"]).await.unwrap_err();
    assert!(err.is_degraded());
}

#[tokio::test(start_paused = true)]
async fn checker_is_empty_on_hosts_without_one() {
    let (buff, _, _) = boot(store()).await;
    assert!(buff.checker().await.is_empty());
    assert!(buff.set_checker(&["mental_shield"]).await.is_err());
}

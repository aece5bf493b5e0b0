use revive::bridge::memory::MemoryHost;
use serde_json::{Value, json};
use std::sync::Arc;

/// A store exposing the macros, respawn and buff surfaces plus the session calls.
pub(crate) fn demo() -> Arc<MemoryHost> {
    let host = MemoryHost::new(json!({
        "init": {
            "version": "demo",
            "server": "boh",
            "language": "eng",
            "monitoring": false,
            "buff_methods": ["profile", "macro"],
            "buff_current": "profile"
        },
        "macros": {"enabled": false, "run_always": false, "delay_s": 0.0, "duration_s": 2.0, "rows": []},
        "respawn": {"respawn_enabled": true, "enabled": true, "seconds": 30},
        "buff": {"enabled": false, "mode": "profile", "method": "profile"}
    }))
    .with_read("get_init_state", "/init")
    .with_read("app_version", "/init/version")
    .with_write("set_server", "/init/server")
    .with_write("set_language", "/init/language")
    .with_read("macros_get", "/macros")
    .with_write("macros_set_enabled", "/macros/enabled")
    .with_write("macros_set_run_always", "/macros/run_always")
    .with_write("macros_set_delay", "/macros/delay_s")
    .with_write("macros_set_duration", "/macros/duration_s")
    .with_write("macros_set_rows", "/macros/rows")
    .with_read("respawn_get_wait_config", "/respawn")
    .with_write("respawn_set_enabled", "/respawn/respawn_enabled")
    .with_write("respawn_set_wait_enabled", "/respawn/enabled")
    .with_write("respawn_set_wait_seconds", "/respawn/seconds")
    .with_read("buff_get_config", "/buff")
    .with_write("buff_set_enabled", "/buff/enabled")
    .with_write("buff_set_mode", "/buff/mode")
    .with_write("buff_set_method", "/buff/method")
    .with_handler("buff_run_once", |_, tree| {
        let enabled = tree.pointer("/buff/enabled").and_then(Value::as_bool).unwrap_or_default();
        Ok(if enabled { json!({"ok": true}) } else { json!({"ok": false, "reason": "disabled"}) })
    });
    Arc::new(host)
}

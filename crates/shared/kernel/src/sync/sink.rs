use parking_lot::RwLock;
use revive_bridge::{HostNotifier, Value};
use revive_domain::notify::{BuffMethods, RowSelected, RowsUpdated, Status};
use revive_domain::records::RowEntry;
use revive_event_bus::{Event, EventBus};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Latest status line per scope.
#[derive(Debug, Default)]
pub struct StatusBoard {
    entries: RwLock<BTreeMap<String, Status>>,
}

impl StatusBoard {
    pub fn record(&self, status: &Status) {
        self.entries.write().insert(status.scope.clone(), status.clone());
    }

    pub fn get(&self, scope: &str) -> Option<Status> {
        self.entries.read().get(scope).cloned()
    }

    /// All scopes, sorted by name.
    pub fn all(&self) -> Vec<Status> {
        self.entries.read().values().cloned().collect()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

/// Entry points for store-initiated notifications.
///
/// Every notification is published on the [`EventBus`]; slices subscribed at init apply it
/// to their view. Nobody subscribed means the notification is dropped.
#[derive(Debug, Clone, Default)]
pub struct NotificationSink {
    events: EventBus,
    board: Arc<StatusBoard>,
}

impl NotificationSink {
    pub fn new(events: EventBus) -> Self {
        Self { events, board: Arc::default() }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn board(&self) -> &StatusBoard {
        &self.board
    }

    pub fn on_status(&self, status: Status) {
        self.board.record(&status);
        self.publish(status);
    }

    pub fn on_rows(&self, rows: Vec<RowEntry>) {
        self.publish(RowsUpdated(rows));
    }

    pub fn on_row_selected(&self, id: Option<String>) {
        self.publish(RowSelected(id));
    }

    pub fn on_buff_methods(&self, methods: Vec<String>, current: String) {
        self.publish(BuffMethods { methods, current });
    }

    /// Raw dispatch by host entry point name (`onStatus`, `onRows`, ...).
    ///
    /// Returns `false` for unknown entries and undecodable arguments.
    pub fn dispatch(&self, entry: &str, args: Vec<Value>) -> bool {
        let mut args = args.into_iter();
        match entry {
            "onStatus" | "on_status" => decode(entry, args.next()).map(|s| self.on_status(s)).is_some(),
            "onRows" | "on_rows" => decode(entry, args.next()).map(|rows| self.on_rows(rows)).is_some(),
            "onRowSelected" | "on_row_selected" => {
                decode(entry, args.next()).map(|id| self.on_row_selected(id)).is_some()
            },
            "onBuffMethods" | "on_buff_methods" => {
                let Some(methods) = decode(entry, args.next()) else { return false };
                let current = decode::<Option<String>>(entry, args.next()).flatten().unwrap_or_default();
                self.on_buff_methods(methods, current);
                true
            },
            _ => {
                debug!(entry, "Unknown notification entry");
                false
            },
        }
    }

    fn publish<T: Event + Debug>(&self, event: T) {
        trace!(?event, "Store notification");
        match self.events.publish(event) {
            Ok(0) => debug!(event = std::any::type_name::<T>(), "Notification dropped: no subscriber"),
            Ok(_) => {},
            Err(e) => warn!(error = %e, "Notification not published"),
        }
    }
}

impl HostNotifier for NotificationSink {
    fn notify(&self, entry: &str, args: Vec<Value>) {
        self.dispatch(entry, args);
    }
}

fn decode<T: DeserializeOwned>(entry: &str, arg: Option<Value>) -> Option<T> {
    serde_json::from_value(arg.unwrap_or(Value::Null))
        .map_err(|e| warn!(entry, error = %e, "Malformed notification"))
        .ok()
}

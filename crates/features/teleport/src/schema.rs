use crate::ops;
use revive_kernel::bridge::{Call, Operation, PushStep, Value, json};
use revive_kernel::domain::features::FeatureId;
use revive_kernel::domain::records::TeleportView;
use revive_kernel::sync::sanitize::ident;
use revive_kernel::sync::{Cadence, FeatureSchema};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeleportPatch {
    Enabled(bool),
    Method(String),
    /// A new category invalidates the location (and with it the stabilize flag).
    Category(String),
    Location(String),
    Stabilize(bool),
    Row(Option<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TeleportGroup {
    Enabled,
    Method,
    Category,
    Location,
    Stabilize,
    Row,
}

#[derive(Debug, Default)]
pub struct TeleportSchema;

impl FeatureSchema for TeleportSchema {
    type View = TeleportView;
    type Patch = TeleportPatch;
    type Group = TeleportGroup;

    const FEATURE: FeatureId = FeatureId::Teleport;

    fn snapshot(&self) -> Option<Operation> {
        Some(ops::GET_CONFIG)
    }

    fn decode(&self, payload: Value) -> Option<TeleportView> {
        serde_json::from_value(payload).ok()
    }

    fn settle(&self, view: &mut TeleportView) {
        if view.config.location.is_empty() {
            view.config.stabilize = false;
        }
    }

    /// Rows, row selection and the method pool reach the view through notifications and the
    /// init dump; the config getter never carries them.
    fn carry(&self, previous: &TeleportView, next: &mut TeleportView) {
        if next.rows.is_empty() {
            next.rows.clone_from(&previous.rows);
        }
        if next.selected_row.is_none() {
            next.selected_row.clone_from(&previous.selected_row);
        }
        if next.methods.is_empty() {
            next.methods.clone_from(&previous.methods);
        }
    }

    fn apply(&self, view: &mut TeleportView, patch: TeleportPatch) -> Result<TeleportGroup, String> {
        let config = &mut view.config;
        let group = match patch {
            TeleportPatch::Enabled(enabled) => {
                config.enabled = enabled;
                TeleportGroup::Enabled
            },
            TeleportPatch::Method(method) => {
                let method = ident(&method);
                if !view.methods.is_empty() && !method.is_empty() && !view.methods.contains(&method) {
                    return Err(format!("Unknown teleport method '{method}'"));
                }
                config.method = method;
                TeleportGroup::Method
            },
            TeleportPatch::Category(category) => {
                let category = ident(&category);
                if category != config.category {
                    config.category = category;
                    config.location.clear();
                    config.stabilize = false;
                }
                TeleportGroup::Category
            },
            TeleportPatch::Location(location) => {
                config.location = ident(&location);
                if config.location.is_empty() {
                    config.stabilize = false;
                }
                TeleportGroup::Location
            },
            TeleportPatch::Stabilize(stabilize) => {
                if stabilize && config.location.is_empty() {
                    return Err("Select a location first".to_owned());
                }
                config.stabilize = stabilize;
                TeleportGroup::Stabilize
            },
            TeleportPatch::Row(row) => {
                view.selected_row = row.map(|id| ident(&id)).filter(|id| !id.is_empty());
                TeleportGroup::Row
            },
        };
        Ok(group)
    }

    fn cadence(&self, _group: TeleportGroup) -> Cadence {
        Cadence::Immediate
    }

    fn push(&self, view: &TeleportView, group: TeleportGroup) -> Vec<PushStep> {
        let config = &view.config;
        let step = match group {
            TeleportGroup::Enabled => PushStep::call("teleport.enabled", ops::SET_ENABLED, vec![json!(config.enabled)]),
            TeleportGroup::Method => PushStep::call("teleport.method", ops::SET_METHOD, vec![json!(config.method)]),
            // The store clears its location on a category change.
            TeleportGroup::Category => {
                PushStep::call("teleport.category", ops::SET_CATEGORY, vec![json!(config.category)])
            },
            TeleportGroup::Location => PushStep::sequence(
                "teleport.location",
                vec![
                    Call::new(ops::SET_LOCATION, vec![json!(config.location)]),
                    Call::new(ops::SET_STABILIZE, vec![json!(config.stabilize)]),
                ],
            )
            .or(vec![Call::new(ops::SET_LOCATION, vec![json!(config.location)])]),
            TeleportGroup::Stabilize => {
                PushStep::call("teleport.stabilize", ops::SET_STABILIZE, vec![json!(config.stabilize)])
            },
            TeleportGroup::Row => PushStep::call(
                "teleport.row",
                ops::SET_ROW,
                vec![json!(view.selected_row.clone().unwrap_or_default())],
            ),
        };
        vec![step]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revive_kernel::domain::records::{RowEntry, TeleportConfig};

    fn targeted() -> TeleportView {
        TeleportView {
            config: TeleportConfig {
                enabled: true,
                method: "dashboard".to_owned(),
                category: "towns".to_owned(),
                location: "giran".to_owned(),
                stabilize: true,
            },
            methods: vec!["dashboard".to_owned(), "gatekeeper".to_owned()],
            ..TeleportView::default()
        }
    }

    #[test]
    fn category_change_clears_location_and_stabilize() {
        let mut view = targeted();
        TeleportSchema.apply(&mut view, TeleportPatch::Category("towns".to_owned())).unwrap();
        assert_eq!(view.config.location, "giran");

        TeleportSchema.apply(&mut view, TeleportPatch::Category("villages".to_owned())).unwrap();
        assert_eq!(view.config.location, "");
        assert!(!view.config.stabilize);
    }

    #[test]
    fn stabilize_needs_a_location() {
        let mut view = targeted();
        TeleportSchema.apply(&mut view, TeleportPatch::Location(" ".to_owned())).unwrap();
        assert!(!view.config.stabilize);
        assert!(TeleportSchema.apply(&mut view, TeleportPatch::Stabilize(true)).is_err());
        assert!(TeleportSchema.apply(&mut view, TeleportPatch::Stabilize(false)).is_ok());
    }

    #[test]
    fn methods_are_checked_against_the_pool() {
        let mut view = targeted();
        assert!(TeleportSchema.apply(&mut view, TeleportPatch::Method("scroll".to_owned())).is_err());
        let group = TeleportSchema.apply(&mut view, TeleportPatch::Method("gatekeeper".to_owned()));
        assert_eq!(group, Ok(TeleportGroup::Method));
    }

    #[test]
    fn hydration_keeps_pushed_rows() {
        let mut previous = targeted();
        previous.rows = vec![RowEntry { id: "7".to_owned(), title: "Dion".to_owned() }];
        previous.selected_row = Some("7".to_owned());
        let mut next = TeleportSchema.decode(json!({"category": "villages"})).unwrap();

        TeleportSchema.carry(&previous, &mut next);
        assert_eq!(next.rows, previous.rows);
        assert_eq!(next.selected_row.as_deref(), Some("7"));
        assert_eq!(next.methods, previous.methods);
        assert_eq!(next.config.category, "villages");
    }

    #[test]
    fn loaded_config_without_location_drops_stabilize() {
        let mut view = TeleportSchema.decode(json!({"enabled": true, "stabilize": true, "location": ""})).unwrap();
        TeleportSchema.settle(&mut view);
        assert!(!view.config.stabilize);
        assert!(view.config.enabled);
    }
}

use revive_kernel::bridge::{CapabilityDescriptor, Operation};

pub const GET_CONFIG: Operation = Operation::new("teleport.get_config", &["teleport_get_config"]);
pub const SET_ENABLED: Operation = Operation::new("teleport.set_enabled", &["teleport_set_enabled", "tp_set_enabled"]);
pub const SET_METHOD: Operation = Operation::new("teleport.set_method", &["teleport_set_method", "tp_set_method"]);
pub const SET_CATEGORY: Operation =
    Operation::new("teleport.set_category", &["teleport_set_category", "tp_set_category"]);
pub const SET_LOCATION: Operation =
    Operation::new("teleport.set_location", &["teleport_set_location", "tp_set_location"]);
pub const SET_STABILIZE: Operation = Operation::new("teleport.set_stabilize", &["teleport_set_stabilize"]);
pub const HAS_OPTIONAL_STABILIZE: Operation =
    Operation::new("teleport.has_optional_stabilize", &["teleport_has_optional_stabilize"]);
pub const SET_ROW: Operation = Operation::new("teleport.set_row", &["tp_set_selected_row_id"]);
pub const RUN_NOW: Operation = Operation::new("teleport.run_now", &["teleport_run_now", "tp_now", "tp_teleport_now"]);
pub const CATEGORIES: Operation = Operation::new("teleport.categories", &["teleport_list_categories", "tp_get_categories"]);
pub const LOCATIONS: Operation = Operation::new("teleport.locations", &["teleport_list_locations", "tp_get_locations"]);

pub fn descriptor() -> CapabilityDescriptor {
    CapabilityDescriptor::new(
        "teleport",
        2,
        [
            GET_CONFIG,
            SET_ENABLED,
            SET_METHOD,
            SET_CATEGORY,
            SET_LOCATION,
            SET_STABILIZE,
            HAS_OPTIONAL_STABILIZE,
            SET_ROW,
            RUN_NOW,
            CATEGORIES,
            LOCATIONS,
        ],
    )
}

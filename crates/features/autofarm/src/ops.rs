use revive_kernel::bridge::{CapabilityDescriptor, Operation};

pub const GET: Operation = Operation::new("autofarm.get", &["autofarm_get"]);
pub const SET_ENABLED: Operation = Operation::new("autofarm.set_enabled", &["autofarm_set_enabled"]);
pub const SET_MODE: Operation = Operation::new("autofarm.set_mode", &["autofarm_set_mode"]);
pub const SAVE: Operation = Operation::new("autofarm.save", &["autofarm_save", "af_save_settings", "af_set_config"]);

/// Start/stop entry points of hosts without the enable toggle.
pub const START: Operation = Operation::new("autofarm.start", &["af_start"]);
pub const STOP: Operation = Operation::new("autofarm.stop", &["af_stop"]);

pub const PROFESSIONS: Operation = Operation::new("autofarm.professions", &["af_get_professions"]);
pub const ATTACK_SKILLS: Operation = Operation::new("autofarm.attack_skills", &["af_get_attack_skills"]);
pub const ZONES: Operation = Operation::new("autofarm.zones", &["af_list_zones_declared_only", "af_list_zones"]);
pub const ZONE_INFO: Operation = Operation::new("autofarm.zone_info", &["af_zone_info"]);

pub fn descriptor() -> CapabilityDescriptor {
    CapabilityDescriptor::new(
        "autofarm",
        2,
        [GET, SET_ENABLED, SET_MODE, SAVE, START, STOP, PROFESSIONS, ATTACK_SKILLS, ZONES, ZONE_INFO],
    )
}

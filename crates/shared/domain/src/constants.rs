//! Stable string identifiers shared with the store.

pub const MACROS: &str = "macros";
pub const AUTOFARM: &str = "autofarm";
pub const TELEPORT: &str = "teleport";
pub const RESPAWN: &str = "respawn";
pub const BUFF: &str = "buff";
pub const MONITOR: &str = "monitor";
pub const PIPELINE: &str = "pipeline";

/// Pipeline stage ids. `respawn` is pinned at position 0.
pub const STAGE_RESPAWN: &str = "respawn";
pub const STAGE_MACROS: &str = "macros";
pub const STAGE_BUFF: &str = "buff";
pub const STAGE_TELEPORT: &str = "tp";
pub const STAGE_AUTOFARM: &str = "autofarm";

pub const PINNED_STAGE: &str = STAGE_RESPAWN;
pub const DEFAULT_ALLOWED_STAGES: [&str; 5] =
    [STAGE_RESPAWN, STAGE_MACROS, STAGE_BUFF, STAGE_TELEPORT, STAGE_AUTOFARM];
pub const DEFAULT_ORDER: [&str; 2] = [STAGE_RESPAWN, STAGE_MACROS];

/// Hotbar keys a macro row or skill slot may bind.
pub const HOTBAR_KEYS: [&str; 10] = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"];

pub const DEFAULT_AUTOFARM_MODES: [&str; 2] = ["auto", "manual"];
pub const DEFAULT_CAST_MS: u32 = 850;
pub const DEFAULT_RESPAWN_WAIT_SECONDS: u32 = 120;

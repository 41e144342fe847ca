//! Settings-metadata profile record (`.smp` files)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One `.smp` settings-metadata profile: UI state and user preferences for
/// the keyboard/joystick mapping features.
///
/// Unlike instance and global configs, `.smp` files are plain nested JSON
/// with no dotted keys, so the record serializes directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SmpProfile {
    pub reduce_inertia: bool,
    pub keyboard_show_greet: bool,
    pub joystick_show_greet: bool,
    pub keyboard_first_greet: bool,
    pub joystick_first_greet: bool,
    pub keyboard_show_hints: bool,
    pub joystick_show_hints: bool,
    pub keyboard_ignore_version: i64,
    pub joystick_ignore_version: i64,
    pub notice_times: i64,
    pub notice_hash: i64,
    /// Resolution-dependent overrides, keyed by resolution string; kept
    /// untyped because the emulator's shape here varies by version.
    pub resolution_relatives: Map<String, Value>,
}

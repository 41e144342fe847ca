//! Global config record (`leidians.config`)

use crate::error::{Error, Result};
use crate::keys;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parsed form of the master `leidians.config` file: global preferences,
/// window-grid management and multi-instance batch options.
///
/// The emulator adds fields freely between releases, so unknown keys are
/// ignored on read and absent keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobalConfig {
    pub next_checkupdate_time: i64,
    pub has_plugin_last: bool,
    pub strp: String,
    pub last_zone_area: String,
    pub last_zone_name: String,
    pub vip_mode: bool,
    pub is_baseboard: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_settings: Option<GlobalBasicSettings>,
    pub noice_user_red: bool,
    pub is_first_install_apk: bool,
    pub clone_from_small_disk: bool,
    pub language_id: String,
    pub mul_tab: bool,
    pub exit_fullscreen_esc: bool,
    pub disable_mouse_right_opt: bool,
    pub next_update_time: i64,
    pub ignore_version: String,
    pub frames_per_second: i32,
    pub reduce_audio: bool,
    pub display_mode: bool,
    pub vmdk_fast_mode: bool,
    pub windows_align_type: i32,
    pub windows_row_count: i32,
    pub windows_auto_size: bool,
    pub sortwndnotoutscreen: bool,
    pub more_screen_sort_in_same: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows_origin: Option<WindowPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows_offset: Option<WindowPosition>,
    pub batch_start_interval: i32,
    pub batch_new_count: i32,
    pub batch_clone_count: i32,
    pub windows_record_pos: bool,
    pub multi_player_sort: i32,
    #[serde(rename = "isSSD")]
    pub is_ssd: bool,
    pub from_install: bool,
    pub product_language_id: String,
    pub channel_open_id: String,
    pub channel_last_open_id: String,
    pub opera_record_first_do: bool,
    pub remote_entrance_version: i32,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            next_checkupdate_time: 0,
            has_plugin_last: false,
            strp: String::new(),
            last_zone_area: String::new(),
            last_zone_name: String::new(),
            vip_mode: false,
            is_baseboard: false,
            basic_settings: None,
            noice_user_red: false,
            is_first_install_apk: false,
            clone_from_small_disk: false,
            language_id: String::new(),
            mul_tab: false,
            exit_fullscreen_esc: false,
            disable_mouse_right_opt: false,
            next_update_time: 0,
            ignore_version: String::new(),
            frames_per_second: 60,
            reduce_audio: false,
            display_mode: false,
            vmdk_fast_mode: false,
            windows_align_type: 0,
            windows_row_count: 0,
            windows_auto_size: false,
            sortwndnotoutscreen: false,
            more_screen_sort_in_same: false,
            windows_origin: None,
            windows_offset: None,
            batch_start_interval: 5,
            batch_new_count: 0,
            batch_clone_count: 0,
            windows_record_pos: false,
            multi_player_sort: 0,
            is_ssd: false,
            from_install: false,
            product_language_id: String::new(),
            channel_open_id: String::new(),
            channel_last_open_id: String::new(),
            opera_record_first_do: false,
            remote_entrance_version: 0,
        }
    }
}

impl GlobalConfig {
    /// Decode a raw wire payload (flat dotted keys) into a typed record.
    ///
    /// # Errors
    ///
    /// Returns `Parse` if the payload does not match the global config shape.
    pub fn from_wire(raw: &Value) -> Result<Self> {
        serde_json::from_value(keys::nest_dotted(raw.clone()))
            .map_err(|e| Error::Parse(e.to_string()))
    }

    /// Encode this record back into the flat dotted wire shape.
    ///
    /// # Errors
    ///
    /// Returns `Serialize` if the record cannot be converted to JSON.
    pub fn to_wire(&self) -> Result<Value> {
        Ok(keys::flatten(serde_json::to_value(self)?))
    }
}

/// The global `basicSettings` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobalBasicSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_ip: Option<String>,
}

/// Window grid origin or offset, in screen pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

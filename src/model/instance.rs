//! Per-instance config records (`leidian<N>.config`)

use crate::error::{Error, Result};
use crate::keys;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parsed form of one `leidian<N>.config` file.
///
/// On disk the file is a flat object with dotted keys
/// (`"basicSettings.left": 0`); the codec converts through the nested shape
/// these types deserialize from. The `advancedSettings` and `hotkeySettings`
/// sections are absent on freshly created instances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InstanceConfig {
    pub property_settings: PropertySettings,
    pub status_settings: StatusSettings,
    pub basic_settings: BasicSettings,
    pub network_settings: NetworkSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advanced_settings: Option<AdvancedSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotkey_settings: Option<HotkeySettings>,
}

impl InstanceConfig {
    /// Decode a raw wire payload (flat dotted keys) into a typed record.
    ///
    /// # Errors
    ///
    /// Returns `Parse` if the payload does not match the instance config
    /// shape.
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

/// Device identity presented to Android
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropertySettings {
    #[serde(rename = "phoneIMEI")]
    pub phone_imei: String,
    #[serde(rename = "phoneIMSI")]
    pub phone_imsi: String,
    pub phone_sim_serial: String,
    pub phone_android_id: String,
    pub phone_model: String,
    pub phone_manufacturer: String,
    pub mac_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Shared-folder paths and player identity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusSettings {
    pub shared_applications: String,
    pub shared_pictures: String,
    pub shared_misc: String,
    pub close_option: i32,
    pub player_name: String,
}

/// Window geometry and behavior toggles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BasicSettings {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub real_heigh: i32,
    pub real_width: i32,
    pub is_forst_start: bool,
    pub mul_fs_add_size: i32,
    pub mul_fs_auto_size: i32,
    pub vertical_sync: bool,
    pub fs_auto_size: i32,
    pub noice_hype_v_open: bool,
    pub auto_run: bool,
    pub root_mode: bool,
    pub height_frame_rate: bool,
    pub adb_debug: i32,
    pub auto_rotate: bool,
    pub is_force_landscape: bool,
    pub standalone_sys_vmdk: bool,
    pub lock_window: bool,
    pub disable_mouse_fast_opt: bool,
    #[serde(rename = "cjztdisableMouseFastOpt_new")]
    pub cjztdisable_mouse_fast_opt_new: i32,
    #[serde(rename = "HDRQuality")]
    pub hdr_quality: i32,
    pub qjcjdisable_mouse_fast: i32,
    pub fps: i32,
    pub astc: bool,
    pub right_tool_bar: bool,
}

/// Virtual network adapter configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkSettings {
    pub network_enable: bool,
    pub network_switching: bool,
    pub network_static: bool,
    pub network_address: String,
    pub network_gateway: String,
    pub network_subnet_mask: String,
    #[serde(rename = "networkDNS1")]
    pub network_dns1: String,
    #[serde(rename = "networkDNS2")]
    pub network_dns2: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_interface: Option<String>,
}

/// CPU, memory, display and audio allocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdvancedSettings {
    pub resolution: Resolution,
    pub resolution_dpi: i32,
    pub cpu_count: i32,
    pub memory_size: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub micphone_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker_name: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resolution {
    pub width: i32,
    pub height: i32,
}

/// One keyboard shortcut: a modifier bitfield plus a virtual key code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyCombo {
    pub modifiers: i32,
    pub key: i32,
}

/// Keyboard shortcuts for emulator functions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HotkeySettings {
    pub back_key: KeyCombo,
    pub home_key: KeyCombo,
    pub app_switch_key: KeyCombo,
    pub menu_key: KeyCombo,
    pub zoom_in_key: KeyCombo,
    pub zoom_out_key: KeyCombo,
    pub boss_key: KeyCombo,
    pub shake_key: KeyCombo,
    pub operation_record_key: KeyCombo,
    pub full_screen_key: KeyCombo,
    pub show_mapping_key: KeyCombo,
    pub video_record_key: KeyCombo,
    pub mapping_record_key: KeyCombo,
    pub keyboard_model_key: KeyCombo,
}

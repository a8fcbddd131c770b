use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Section header of the load order block in the game's `usersettings.ini`.
pub const DEFAULT_SECTION_MARKER: &str = "[LoadOrder]";

/// Key prefix of the load order entries (`Slot1Directory=...`).
pub const DEFAULT_SLOT_KEY_PREFIX: &str = "Slot";

/// Settings file contents (`ModManager Settings.yaml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "Settings", default)]
    pub settings: ManagerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerSettings {
    /// Saved mod installation root (the workshop content folder).
    #[serde(rename = "SteamWorkshopDir", default)]
    pub steam_workshop_dir: Option<Utf8PathBuf>,

    /// Override for the game's settings file; resolved from the user profile when unset.
    #[serde(rename = "UserSettingsFile", default)]
    pub user_settings_file: Option<Utf8PathBuf>,

    #[serde(rename = "SectionMarker", default = "default_section_marker")]
    pub section_marker: String,

    #[serde(rename = "SlotKeyPrefix", default = "default_slot_key_prefix")]
    pub slot_key_prefix: String,

    /// Write the load order after every successful reorder.
    #[serde(rename = "AutoPersist", default = "default_auto_persist")]
    pub auto_persist: bool,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,
}

impl Default for ManagerSettings {
    fn default() -> Self {
        Self {
            steam_workshop_dir: None,
            user_settings_file: None,
            section_marker: default_section_marker(),
            slot_key_prefix: default_slot_key_prefix(),
            auto_persist: default_auto_persist(),
            debug_mode: false,
        }
    }
}

fn default_section_marker() -> String {
    DEFAULT_SECTION_MARKER.to_string()
}

fn default_slot_key_prefix() -> String {
    DEFAULT_SLOT_KEY_PREFIX.to_string()
}

fn default_auto_persist() -> bool {
    true
}

//! Locating the Sea Power workshop folder and the game's settings file.
//!
//! The install root is resolved by trying a list of [`RootStrategy`] values in
//! order; the first one that yields a path wins. Asking the user for a folder is
//! not a strategy here: when nothing resolves, the front-end prompts and stores
//! the answer through [`crate::config::SettingsStore::save_install_root`].

use camino::{Utf8Path, Utf8PathBuf};
use std::env;

/// Steam app id of Sea Power.
pub const SEA_POWER_APP_ID: &str = "1286220";

/// Environment variable pointing at a Steam installation.
pub const STEAM_INSTALL_ENV: &str = "STEAM_INSTALL_PATH";

/// Steam libraries probed when nothing else is configured.
pub const COMMON_STEAM_DIRS: &[&str] = &[
    "C:\\Program Files (x86)\\Steam",
    "C:\\Program Files\\Steam",
    "D:\\Games\\Steam",
];

/// One way of finding the mod installation root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootStrategy {
    /// A path saved in the settings file.
    Saved(Option<Utf8PathBuf>),

    /// A Steam installation named by an environment variable. The workshop path is
    /// derived without checking that it exists; scanning reports that later.
    SteamEnvironment { var: String, app_id: String },

    /// The first Steam library root containing a `steamapps` folder.
    SteamLibraries {
        candidates: Vec<Utf8PathBuf>,
        app_id: String,
    },
}

impl RootStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            RootStrategy::Saved(_) => "saved setting",
            RootStrategy::SteamEnvironment { .. } => "environment",
            RootStrategy::SteamLibraries { .. } => "steam library probe",
        }
    }

    pub fn resolve(&self) -> Option<Utf8PathBuf> {
        match self {
            RootStrategy::Saved(path) => path.clone().filter(|p| !p.as_str().is_empty()),
            RootStrategy::SteamEnvironment { var, app_id } => env::var(var)
                .ok()
                .filter(|value| !value.is_empty())
                .map(|steam| workshop_dir(Utf8Path::new(&steam), app_id)),
            RootStrategy::SteamLibraries { candidates, app_id } => candidates
                .iter()
                .find(|steam| steam.join("steamapps").is_dir())
                .map(|steam| workshop_dir(steam, app_id)),
        }
    }
}

/// `<steam>/steamapps/workshop/content/<app_id>`
pub fn workshop_dir(steam_root: &Utf8Path, app_id: &str) -> Utf8PathBuf {
    steam_root
        .join("steamapps")
        .join("workshop")
        .join("content")
        .join(app_id)
}

/// The strategy chain used by the application: saved setting, environment, probing.
pub fn default_strategies(saved: Option<Utf8PathBuf>) -> Vec<RootStrategy> {
    vec![
        RootStrategy::Saved(saved),
        RootStrategy::SteamEnvironment {
            var: STEAM_INSTALL_ENV.to_string(),
            app_id: SEA_POWER_APP_ID.to_string(),
        },
        RootStrategy::SteamLibraries {
            candidates: COMMON_STEAM_DIRS.iter().map(Utf8PathBuf::from).collect(),
            app_id: SEA_POWER_APP_ID.to_string(),
        },
    ]
}

/// Try each strategy in order.
///
/// Returns the resolved path and the index of the strategy that produced it, so the
/// caller can tell whether the path is new and should be saved.
pub fn resolve_install_root(strategies: &[RootStrategy]) -> Option<(Utf8PathBuf, usize)> {
    for (index, strategy) in strategies.iter().enumerate() {
        if let Some(path) = strategy.resolve() {
            tracing::info!("Resolved mod directory from {}: {}", strategy.name(), path);
            return Some((path, index));
        }
        tracing::debug!("Install root strategy '{}' found nothing", strategy.name());
    }
    None
}

/// `%USERPROFILE%/AppData/LocalLow/Triassic Games/Sea Power/usersettings.ini`
pub fn game_settings_file(user_profile: &Utf8Path) -> Utf8PathBuf {
    user_profile
        .join("AppData")
        .join("LocalLow")
        .join("Triassic Games")
        .join("Sea Power")
        .join("usersettings.ini")
}

/// The game's settings file for the current user, if `USERPROFILE` is set.
pub fn default_game_settings_file() -> Option<Utf8PathBuf> {
    env::var("USERPROFILE")
        .ok()
        .filter(|value| !value.is_empty())
        .map(|profile| game_settings_file(Utf8Path::new(&profile)))
}

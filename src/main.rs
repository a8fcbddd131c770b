//! Sea Power Mod Manager - headless entry point.
//!
//! Resolves where the workshop mods and the game's `usersettings.ini` live, opens a
//! [`Session`] and logs the current load order. Reordering is driven by front-ends
//! through the same [`Session`] API; this binary never prompts.
//!
//! # Execution Flow
//!
//! 1. Load `ModManager Data/ModManager Settings.yaml` (written with defaults on first run)
//! 2. Initialize logging → logs/seapower-modman.<date>
//! 3. Resolve the mod directory: saved setting → `STEAM_INSTALL_PATH` → common Steam
//!    libraries; a newly found directory is saved back to the settings file
//! 4. Resolve the game's settings file (setting override or the user profile default)
//! 5. Scan mods, read the saved order and log the resulting list

use anyhow::{Context, Result};
use camino::Utf8Path;
use seapower_modman::services::install_path::default_game_settings_file;
use seapower_modman::services::{default_strategies, resolve_install_root};
use seapower_modman::{APP_NAME, Session, SettingsStore, VERSION, logging};

const DATA_DIR: &str = "ModManager Data";
const LOG_DIR: &str = "logs";

fn main() -> Result<()> {
    let store = SettingsStore::new(DATA_DIR)?;
    let settings = store.load()?;

    let _guard = logging::setup_logging_with_console(
        Utf8Path::new(LOG_DIR),
        APP_NAME,
        settings.settings.debug_mode,
        true,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let strategies = default_strategies(settings.settings.steam_workshop_dir.clone());
    let install_root = match resolve_install_root(&strategies) {
        Some((path, 0)) => Some(path),
        Some((path, _)) => {
            store.save_install_root(&path)?;
            Some(path)
        }
        None => {
            tracing::warn!(
                "Mod directory not found; set SteamWorkshopDir in {}",
                store.settings_path()
            );
            None
        }
    };

    let target = settings
        .settings
        .user_settings_file
        .clone()
        .or_else(default_game_settings_file)
        .with_context(|| {
            format!(
                "Cannot locate usersettings.ini; set UserSettingsFile in {}",
                store.settings_path()
            )
        })?;

    let mut session = Session::from_settings(&settings.settings, target);
    session
        .load(install_root.as_deref())
        .context("Failed to load mod list")?;

    if let Some(err) = session.scan_error() {
        tracing::warn!("{}", err);
    }

    for row in session.list_mods() {
        tracing::info!(
            "{:>3}  {:<14} {}",
            row.position,
            row.identity,
            row.display_name
        );
    }

    tracing::info!("{} mods in load order", session.order().len());
    Ok(())
}

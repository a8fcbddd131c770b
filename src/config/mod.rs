use crate::models::Settings;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// File name of the manager's settings inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "ModManager Settings.yaml";

/// Loads and saves the manager's own YAML settings file.
///
/// The only value the manager writes on its own is the install root, once it has
/// been resolved or picked by the user. Everything else is user-edited.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    config_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
}

impl SettingsStore {
    /// Create a store rooted at `config_dir`, creating the directory if needed.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            settings_path: config_dir.join(SETTINGS_FILE_NAME),
            config_dir,
        })
    }

    /// Load the settings file.
    ///
    /// A missing file is created with defaults so the user has something to edit.
    pub fn load(&self) -> Result<Settings> {
        if !self.settings_path.exists() {
            tracing::warn!(
                "Settings file not found at {}, writing defaults",
                self.settings_path
            );
            let settings = Settings::default();
            self.save(&settings)?;
            return Ok(settings);
        }

        let file_contents = fs::read_to_string(&self.settings_path)
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?;

        let settings: Settings = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::info!("Loaded settings from {}", self.settings_path);
        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// Remember a newly resolved install root, keeping every other setting.
    pub fn save_install_root(&self, install_root: &Utf8Path) -> Result<Settings> {
        let mut settings = self.load()?;
        settings.settings.steam_workshop_dir = Some(install_root.to_path_buf());
        self.save(&settings)?;
        Ok(settings)
    }

    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (SettingsStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let store = SettingsStore::new(&config_path).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_load_creates_default_file() {
        let (store, _temp_dir) = create_test_store();

        let settings = store.load().unwrap();
        assert!(settings.settings.steam_workshop_dir.is_none());
        assert!(store.settings_path().exists());
    }

    #[test]
    fn test_save_install_root() {
        let (store, _temp_dir) = create_test_store();

        store
            .save_install_root(Utf8Path::new("/steam/workshop/content/1286220"))
            .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(
            loaded.settings.steam_workshop_dir.as_deref(),
            Some(Utf8Path::new("/steam/workshop/content/1286220"))
        );
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let (store, _temp_dir) = create_test_store();
        fs::write(store.settings_path(), "Settings: [unclosed").unwrap();

        assert!(store.load().is_err());
    }
}

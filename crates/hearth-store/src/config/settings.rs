//! Settings file loading and saving

use std::path::Path;

use hearth_core::prelude::*;

use super::types::Settings;

pub const HEARTH_DIR: &str = ".hearth";
pub const CONFIG_FILENAME: &str = "config.toml";

/// Load settings from `.hearth/config.toml` under `base`
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(base: &Path) -> Settings {
    let config_path = base.join(HEARTH_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str::<Settings>(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings.validate()
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Write `settings` to `.hearth/config.toml` under `base`
pub fn save_settings(base: &Path, settings: &Settings) -> Result<()> {
    let dir = base.join(HEARTH_DIR);
    std::fs::create_dir_all(&dir)?;

    let content = toml::to_string_pretty(settings)
        .map_err(|e| Error::config(format!("Failed to serialize settings: {}", e)))?;
    std::fs::write(dir.join(CONFIG_FILENAME), content)?;
    Ok(())
}

/// Create `.hearth/config.toml` with commented defaults if it is missing
pub fn init_config_dir(base: &Path) -> Result<()> {
    let dir = base.join(HEARTH_DIR);

    if !dir.exists() {
        std::fs::create_dir_all(&dir)
            .map_err(|e| Error::config(format!("Failed to create .hearth dir: {}", e)))?;
    }

    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# Hearth store configuration

[effects]
timeout_ms = 30000      # Effects still running after this produce their failure action

[devtools]
enabled = true          # Keep a history of dispatched actions
max_age = 25            # Number of actions kept
"#;
        std::fs::write(&config_path, default_content)?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(load_settings(dir.path()), Settings::default());
    }

    #[test]
    fn test_init_then_load_round_trips_defaults() {
        let dir = tempdir().unwrap();
        init_config_dir(dir.path()).unwrap();

        assert!(dir.path().join(HEARTH_DIR).join(CONFIG_FILENAME).exists());
        assert_eq!(load_settings(dir.path()), Settings::default());
    }

    #[test]
    fn test_init_keeps_existing_file() {
        let dir = tempdir().unwrap();
        let mut settings = Settings::default();
        settings.devtools.max_age = 3;
        save_settings(dir.path(), &settings).unwrap();

        init_config_dir(dir.path()).unwrap();

        assert_eq!(load_settings(dir.path()).devtools.max_age, 3);
    }

    #[test]
    fn test_invalid_toml_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let hearth_dir = dir.path().join(HEARTH_DIR);
        std::fs::create_dir_all(&hearth_dir).unwrap();
        std::fs::write(hearth_dir.join(CONFIG_FILENAME), "[effects\ntimeout_ms = ").unwrap();

        assert_eq!(load_settings(dir.path()), Settings::default());
    }

    #[test]
    fn test_loaded_values_are_validated() {
        let dir = tempdir().unwrap();
        let hearth_dir = dir.path().join(HEARTH_DIR);
        std::fs::create_dir_all(&hearth_dir).unwrap();
        std::fs::write(
            hearth_dir.join(CONFIG_FILENAME),
            "[effects]\ntimeout_ms = 5\n",
        )
        .unwrap();

        let settings = load_settings(dir.path());
        assert_eq!(settings.effects.timeout_ms, crate::config::MIN_EFFECT_TIMEOUT_MS);
    }
}

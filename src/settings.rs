use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::GameConfig;
use crate::error::SettingsError;

const APP_DIR_NAME: &str = "flipsnake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Returns the platform-correct settings file path.
pub fn settings_path() -> Result<PathBuf, SettingsError> {
    dirs::config_dir()
        .map(|base| base.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
        .ok_or(SettingsError::NoPath)
}

/// Loads game settings from `path`, or from [`settings_path`] when `path` is
/// `None`.
///
/// A missing default file yields [`GameConfig::default`]. A missing explicit
/// file, an unreadable or malformed file, or out-of-range values are errors,
/// so the caller can report them before entering raw terminal mode.
pub fn load_settings(path: Option<&Path>) -> Result<GameConfig, SettingsError> {
    match path {
        Some(path) => load_settings_from_path(path, false),
        None => load_settings_from_path(&settings_path()?, true),
    }
}

fn load_settings_from_path(path: &Path, allow_missing: bool) -> Result<GameConfig, SettingsError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound && allow_missing => {
            return Ok(GameConfig::default());
        }
        Err(e) => return Err(e.into()),
    };

    let config = serde_json::from_str::<GameConfig>(&raw)?.validate()?;
    info!("loaded settings from {}", path.display());
    Ok(config)
}

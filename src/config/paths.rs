//! Where trendfeed looks for its config file

use std::path::{Path, PathBuf};

/// Directory override
pub const CONFIG_DIR_ENV: &str = "TRENDFEED_CONFIG_DIR";
/// File override; wins over the directory
pub const CONFIG_FILE_ENV: &str = "TRENDFEED_CONFIG";

/// Accepted file names, in order of preference
const CONFIG_FILE_NAMES: [&str; 2] = ["config.json", "config.toml"];

/// `$TRENDFEED_CONFIG_DIR`, else `<platform config dir>/trendfeed`, else `./.trendfeed`
pub fn config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }

    dirs::config_dir()
        .map(|dir| dir.join(crate::NAME))
        .unwrap_or_else(|| PathBuf::from(format!(".{}", crate::NAME)))
}

/// Config file to load or write
pub fn config_path() -> PathBuf {
    match std::env::var_os(CONFIG_FILE_ENV) {
        Some(path) => PathBuf::from(path),
        None => config_file_in(&config_dir()),
    }
}

/// First existing config file in `dir`; `config.json` when there is none
pub fn config_file_in(dir: &Path) -> PathBuf {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
        .unwrap_or_else(|| dir.join(CONFIG_FILE_NAMES[0]))
}

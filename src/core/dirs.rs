use crate::core::error::BackupError;
use std::path::PathBuf;

pub fn get_config_directory() -> Result<PathBuf, BackupError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Application Support")),
        _ => dirs::config_dir(),
    };

    base.map(|base| base.join("git-local-backup"))
        .ok_or(BackupError::ConfigDirectoryNotFound)
}

pub fn default_config_file() -> Result<PathBuf, BackupError> {
    Ok(get_config_directory()?.join("config.json"))
}

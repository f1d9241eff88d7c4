use crate::{Error, Result};
use std::fs::create_dir;
use std::path::PathBuf;

pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".config"))
        })
        .map(|dir| dir.join(PathBuf::from("paperdeck")))
        .ok_or_else(|| {
            Error::Config(
                "Could not find config directory. Please set HOME or XDG_CONFIG_HOME environment variable."
                    .to_string(),
            )
        })?;

    if !config_dir.exists() {
        create_dir(&config_dir)?;
    }

    Ok(config_dir)
}

use crate::utils::get_config_dir;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::{read_to_string, write};
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PickerConfig {
    /// Daemon socket override; falls back to the runtime-dir default.
    #[serde(default)]
    pub socket: Option<PathBuf>,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_theme() -> String {
    "Dark".to_string()
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            socket: None,
            theme: default_theme(),
        }
    }
}

impl PickerConfig {
    pub fn load_or_default() -> Result<Self> {
        let config_dir = get_config_dir()?;
        let config_path = config_dir.join(PathBuf::from("config.json"));

        if config_path.exists() {
            let content = read_to_string(&config_path)?;
            let config: Self =
                serde_json::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_dir = get_config_dir()?;
        let config_path = config_dir.join(PathBuf::from("config.json"));
        let content =
            serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        write(&config_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: PickerConfig = serde_json::from_str("{}").unwrap();
        assert!(config.socket.is_none());
        assert_eq!(config.theme, "Dark");
    }

    #[test]
    fn test_config_round_trips() {
        let config = PickerConfig {
            socket: Some(PathBuf::from("/run/user/1000/paperdeck.sock")),
            theme: "Nord".to_string(),
        };

        let json = serde_json::to_string(&config).unwrap();
        let back: PickerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.socket, config.socket);
        assert_eq!(back.theme, config.theme);
    }
}

use std::{env, fs, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::StoreError;

const CONFIG_FILE: &str = "config.json";

/// User preferences that shape display output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-ZA".into(),
            currency_symbol: "R".into(),
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, StoreError> {
        Self::from_base(default_base())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, StoreError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    /// Loads the config, falling back to defaults when no file exists yet.
    pub fn load(&self) -> Result<Config, StoreError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(tmp, &self.path)?;
        Ok(())
    }
}

fn default_base() -> PathBuf {
    if let Some(custom) = env::var_os("ECO_CORE_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".eco_core")
}

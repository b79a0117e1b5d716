use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    currency::{CurrencyFormat, DigitGrouping},
    errors::StoreError,
    utils::paths::{app_data_dir, config_file_in, data_dir_in, write_atomic},
};

pub const DEFAULT_STORE_KEY: &str = "transactions";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the persisted store; `<base>/data` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_store_key")]
    pub store_key: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default)]
    pub grouping: DigitGrouping,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            store_key: Self::default_store_key(),
            currency: Self::default_currency(),
            grouping: DigitGrouping::default(),
        }
    }
}

impl Config {
    fn default_store_key() -> String {
        DEFAULT_STORE_KEY.into()
    }

    fn default_currency() -> String {
        "INR".into()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| data_dir_in(&app_data_dir()))
    }

    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat::new(self.currency.clone(), self.grouping)
    }
}

/// Loads and saves the JSON configuration file.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: config_file_in(&base),
        }
    }

    /// Reads the config file, returning defaults when it does not exist.
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
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

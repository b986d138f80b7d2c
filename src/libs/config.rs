//! Configuration management for buildplan.
//!
//! Settings are stored as pretty-printed JSON in the platform data directory
//! next to the database. Every section is optional; a missing file or a
//! missing section means defaults.
//!
//! ```rust,no_run
//! use buildplan::libs::config::Config;
//!
//! let config = Config::read()?;
//! let timeout = config.database_or_default().busy_timeout_ms;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::presets::list_presets;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DatabaseConfig {
    /// Database file; the data directory default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// How long a writer waits on a locked database before giving up.
    pub busy_timeout_ms: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct ProvisioningConfig {
    /// Preset applied to every newly created project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_preset: Option<String>,

    /// Materialize the template catalog right after project creation.
    #[serde(default)]
    pub materialize_on_create: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning: Option<ProvisioningConfig>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            path: None,
            busy_timeout_ms: 5000,
        }
    }
}

impl Config {
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    /// Reads a config file, falling back to defaults when it does not exist.
    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn database_or_default(&self) -> DatabaseConfig {
        self.database.clone().unwrap_or_default()
    }

    pub fn provisioning_or_default(&self) -> ProvisioningConfig {
        self.provisioning.clone().unwrap_or_default()
    }

    /// Interactive setup wizard; existing values become the prompt defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = [
            ConfigModule {
                key: "database".to_string(),
                name: "Database".to_string(),
            },
            ConfigModule {
                key: "provisioning".to_string(),
                name: "Provisioning".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "database" => {
                    let default = config.database_or_default();
                    msg_print!(Message::ConfigModuleDatabase);
                    let path: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDatabasePath.to_string())
                        .default(default.path.as_ref().map(|p| p.display().to_string()).unwrap_or_default())
                        .allow_empty(true)
                        .interact_text()?;
                    config.database = Some(DatabaseConfig {
                        path: if path.trim().is_empty() { None } else { Some(PathBuf::from(path.trim())) },
                        busy_timeout_ms: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptBusyTimeout.to_string())
                            .default(default.busy_timeout_ms)
                            .interact_text()?,
                    });
                }
                "provisioning" => {
                    let default = config.provisioning_or_default();
                    msg_print!(Message::ConfigModuleProvisioning);

                    let mut choices: Vec<String> = vec![Message::NoDefaultPreset.to_string()];
                    choices.extend(list_presets().iter().map(|p| format!("{} ({})", p.name, p.id)));
                    let current = default
                        .default_preset
                        .as_deref()
                        .and_then(|id| list_presets().iter().position(|p| p.id == id))
                        .map(|i| i + 1)
                        .unwrap_or(0);
                    let choice = Select::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDefaultPreset.to_string())
                        .items(&choices)
                        .default(current)
                        .interact()?;

                    config.provisioning = Some(ProvisioningConfig {
                        default_preset: choice.checked_sub(1).map(|i| list_presets()[i].id.to_string()),
                        materialize_on_create: Confirm::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptMaterializeOnCreate.to_string())
                            .default(default.materialize_on_create)
                            .interact()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}

//! User configuration stored as `config.json` in the data directory.
//!
//! Every section is optional. A missing file, or a missing section, means
//! defaults; `tally init` writes the file through an interactive wizard.

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StatsConfig {
    /// Days covered by `stats` and `list` when no range is given, ending today.
    pub default_range_days: u32,
}

impl Default for StatsConfig {
    fn default() -> Self {
        StatsConfig { default_range_days: 7 }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DisplayConfig {
    /// Shown wherever the empty category key is rendered.
    pub uncategorized_label: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            uncategorized_label: "Uncategorized".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatsConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayConfig>,
}

impl Config {
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn stats(&self) -> StatsConfig {
        self.stats.clone().unwrap_or_default()
    }

    pub fn display(&self) -> DisplayConfig {
        self.display.clone().unwrap_or_default()
    }

    pub fn uncategorized_label(&self) -> String {
        self.display().uncategorized_label
    }

    /// Interactive setup. Values already on disk are offered as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "stats".to_string(),
                name: Message::ConfigModuleStats.to_string(),
            },
            ConfigModule {
                key: "display".to_string(),
                name: Message::ConfigModuleDisplay.to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::SelectConfigModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "stats" => {
                    let default = config.stats();
                    msg_print!(Message::ConfigModuleStats);
                    config.stats = Some(StatsConfig {
                        default_range_days: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptDefaultRangeDays.to_string())
                            .default(default.default_range_days)
                            .validate_with(|days: &u32| if *days == 0 { Err("must be at least 1") } else { Ok(()) })
                            .interact_text()?,
                    });
                }
                "display" => {
                    let default = config.display();
                    msg_print!(Message::ConfigModuleDisplay);
                    config.display = Some(DisplayConfig {
                        uncategorized_label: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptUncategorizedLabel.to_string())
                            .default(default.uncategorized_label)
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}

//! Configuration management for fieldforce.
//!
//! Settings live in a JSON document inside the platform data directory (see
//! [`DataStorage`]). Every section is optional; a missing section falls back to
//! built-in defaults, so the service runs with no configuration at all.
//!
//! ## Sections
//!
//! - **server**: listen address and the origins allowed by CORS
//! - **database**: override for the SQLite file location
//! - **export**: default output directory for written reports
//! - **emergency_contacts**: the list served to field devices
//!
//! ## Environment Overrides
//!
//! After the file is read, these variables take precedence (a `.env` file in
//! the working directory is loaded by the binary before parsing):
//!
//! | variable | effect |
//! |----------|--------|
//! | `FIELDFORCE_HOST` | server host |
//! | `FIELDFORCE_PORT`, `PORT` | server port |
//! | `FIELDFORCE_DB` | database file |
//! | `FRONTEND_URL` | allowed CORS origin |
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use fieldforce::libs::config::Config;
//!
//! let config = Config::read()?.with_env_overrides();
//! println!("listening on {}", config.server_config().address());
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::emergency::EmergencyContact;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

/// Represents a configurable section offered by the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed to call the API from a browser.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origins: vec![DEFAULT_FRONTEND_URL.to_string()],
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
}

/// Root configuration document.
///
/// Unset sections are omitted from the written JSON.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contacts: Option<Vec<EmergencyContact>>,
}

impl Config {
    /// Reads the configuration file, returning defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

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

    /// Applies `FIELDFORCE_*`, `PORT` and `FRONTEND_URL` from the process
    /// environment.
    pub fn with_env_overrides(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary lookup. Unparseable ports are ignored.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("FIELDFORCE_HOST");
        let port = lookup("FIELDFORCE_PORT").or_else(|| lookup("PORT")).and_then(|p| p.parse::<u16>().ok());
        let frontend = lookup("FRONTEND_URL");

        if host.is_some() || port.is_some() || frontend.is_some() {
            let mut server = self.server.take().unwrap_or_default();
            if let Some(host) = host {
                server.host = host;
            }
            if let Some(port) = port {
                server.port = port;
            }
            if let Some(origin) = frontend {
                if !server.cors_origins.contains(&origin) {
                    server.cors_origins.insert(0, origin);
                }
            }
            self.server = Some(server);
        }

        if let Some(path) = lookup("FIELDFORCE_DB") {
            self.database = Some(DatabaseConfig { path: PathBuf::from(path) });
        }

        self
    }

    pub fn server_config(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }

    /// Explicit database location, when one is configured.
    pub fn database_path(&self) -> Option<PathBuf> {
        self.database.as_ref().map(|d| d.path.clone())
    }

    /// Where reports are written when the caller names no directory.
    pub fn export_dir(&self) -> Result<PathBuf> {
        match &self.export {
            Some(export) => Ok(export.output_dir.clone()),
            None => Ok(DataStorage::new().get_path("exports")?),
        }
    }

    pub fn contacts(&self) -> Vec<EmergencyContact> {
        self.emergency_contacts.clone().unwrap_or_else(EmergencyContact::defaults)
    }

    /// Runs the interactive setup wizard, starting from the saved values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "server".to_string(),
                name: "Server".to_string(),
            },
            ConfigModule {
                key: "database".to_string(),
                name: "Database".to_string(),
            },
            ConfigModule {
                key: "export".to_string(),
                name: "Export".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "server" => {
                    let default = config.server_config();
                    msg_print!(Message::ConfigModuleServer);
                    let host: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptServerHost.to_string())
                        .default(default.host)
                        .interact_text()?;
                    let port: u16 = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptServerPort.to_string())
                        .default(default.port)
                        .interact_text()?;
                    // Comma separated
                    let origins: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptCorsOrigins.to_string())
                        .default(default.cors_origins.join(","))
                        .allow_empty(true)
                        .interact_text()?;
                    config.server = Some(ServerConfig {
                        host,
                        port,
                        cors_origins: split_origins(&origins),
                    });
                }
                "database" => {
                    let default = match config.database_path() {
                        Some(path) => path,
                        None => DataStorage::new().get_path(crate::db::db::DB_FILE_NAME)?,
                    };
                    msg_print!(Message::ConfigModuleDatabase);
                    let path: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDatabasePath.to_string())
                        .default(default.display().to_string())
                        .interact_text()?;
                    config.database = Some(DatabaseConfig { path: PathBuf::from(path) });
                }
                "export" => {
                    let default = config.export_dir()?;
                    msg_print!(Message::ConfigModuleExport);
                    let dir: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptExportDir.to_string())
                        .default(default.display().to_string())
                        .interact_text()?;
                    config.export = Some(ExportConfig { output_dir: PathBuf::from(dir) });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}

fn split_origins(value: &str) -> Vec<String> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
}

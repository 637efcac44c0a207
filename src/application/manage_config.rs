//! Config management use case

use crate::error::{Result, RoletexError};
use crate::infrastructure::repository::ProjectRepository;
use crate::infrastructure::{Config, FileSystemRepository};

/// Service for managing project configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "roles" => Ok(config.roles.join(",")),
            "source_dir" => Ok(config.source_dir.clone()),
            "output_dir" => Ok(config.output_dir.clone()),
            "styles_dir" => Ok(config.styles_dir.clone()),
            "main_file" => Ok(config.main_file.clone()),
            "compiler" => Ok(config.compiler.clone()),
            "include_location" => Ok(config.include_location.to_string()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(RoletexError::Config(format!(
                "Unknown config key: '{}'",
                key
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "roles" => {
                let roles: Vec<String> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .map(str::to_string)
                    .collect();
                if roles.is_empty() {
                    return Err(RoletexError::Config(
                        "Role list cannot be empty".to_string(),
                    ));
                }
                config.roles = roles;
            }
            "source_dir" => config.source_dir = value.to_string(),
            "output_dir" => config.output_dir = value.to_string(),
            "styles_dir" => config.styles_dir = value.to_string(),
            "main_file" => config.main_file = value.to_string(),
            "compiler" => config.compiler = value.to_string(),
            "include_location" => {
                config.include_location = value.parse().map_err(|_| {
                    RoletexError::Config(format!(
                        "Invalid value for include_location: '{}' (expected true or false)",
                        value
                    ))
                })?;
            }
            "created" => {
                return Err(RoletexError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(RoletexError::Config(format!(
                    "Unknown config key: '{}'",
                    key
                )));
            }
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

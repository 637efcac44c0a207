//! Configuration management

use crate::error::{Result, RoletexError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the project manifest at the project root
pub const MANIFEST_NAME: &str = "roletex.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Roles built by default when no role is given on the command line
    pub roles: Vec<String>,
    /// Directory containing the tagged .tex sources, relative to the root
    pub source_dir: String,
    /// Directory the filtered variants are written to, relative to the root
    pub output_dir: String,
    /// Directory with .sty/.cls files copied verbatim into each variant
    pub styles_dir: String,
    /// The file handed to the LaTeX compiler
    pub main_file: String,
    /// Compiler command, e.g. "pdflatex" or "xelatex -shell-escape"
    pub compiler: String,
    /// Default for the location flag
    pub include_location: bool,
    /// Environments removed from output when filtering empties them
    pub prune_environments: Vec<String>,
    pub created: DateTime<Utc>,
}

impl Config {
    /// Create a new config with default values
    pub fn new(roles: Vec<String>) -> Self {
        Config {
            roles,
            source_dir: "tex".to_string(),
            output_dir: "build".to_string(),
            styles_dir: "templates".to_string(),
            main_file: "main.tex".to_string(),
            compiler: "pdflatex".to_string(),
            include_location: false,
            prune_environments: vec!["highlights".to_string()],
            created: Utc::now(),
        }
    }

    /// Load config from roletex.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(MANIFEST_NAME);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RoletexError::NotProjectDirectory(path.to_path_buf())
            } else {
                RoletexError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| RoletexError::Config(format!("Failed to parse roletex.toml: {}", e)))
    }

    /// Save config to roletex.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let config_path = path.join(MANIFEST_NAME);

        let contents = toml::to_string_pretty(self)
            .map_err(|e| RoletexError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }
}

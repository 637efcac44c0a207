//! Error types for roletex

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the roletex application
#[derive(Debug, Error)]
pub enum RoletexError {
    #[error("Not a roletex project: {0}")]
    NotProjectDirectory(PathBuf),

    #[error("Malformed tag in {file} (line {line}): {message}")]
    MalformedTag {
        file: PathBuf,
        line: usize,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("LaTeX compiler error: {0}")]
    Compiler(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl RoletexError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            RoletexError::NotProjectDirectory(_) => 2,
            RoletexError::MalformedTag { .. } => 3,
            RoletexError::Compiler(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            RoletexError::NotProjectDirectory(path) => {
                format!(
                    "Not a roletex project: {}\n\n\
                    Suggestions:\n\
                    • Run 'roletex init' in this directory to create a new project\n\
                    • Navigate to a directory containing roletex.toml\n\
                    • Set ROLETEX_ROOT environment variable to your project path",
                    path.display()
                )
            }
            RoletexError::MalformedTag {
                file,
                line,
                message,
            } => {
                format!(
                    "Malformed tag in {} (line {}): {}\n\n\
                    Tag syntax:\n\
                    • \\begin{{rolecontent}}{{role1,role2}} ... \\end{{rolecontent}}\n\
                    • \\rolecontent{{role1,role2}}{{content}}\n\
                    • \\begin{{exclude}} ... \\end{{exclude}}\n\n\
                    Every rolecontent tag must name at least one role, and every\n\
                    opened block must be closed before the end of the file.",
                    file.display(),
                    line,
                    message
                )
            }
            RoletexError::Compiler(msg) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check that the compiler is installed and in PATH\n\
                    • Configure a different compiler: roletex config compiler xelatex\n\
                    • Inspect the .log file in the output directory\n\
                    • Use 'roletex build --skip-compile' to only run the filter",
                    msg
                )
            }
            RoletexError::Config(msg) => {
                if msg.contains("Unknown config key") {
                    format!(
                        "{}\n\n\
                        Valid keys: roles, source_dir, output_dir, styles_dir, \
                        main_file, compiler, include_location",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using RoletexError
pub type Result<T> = std::result::Result<T, RoletexError>;

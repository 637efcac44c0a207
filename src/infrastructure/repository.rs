//! File system repository

use crate::error::{Result, RoletexError};
use crate::infrastructure::config::{Config, MANIFEST_NAME};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Abstract repository for project operations
pub trait ProjectRepository {
    /// Get the root directory of this project
    fn root(&self) -> &Path;

    /// Load configuration from roletex.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to roletex.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if roletex.toml exists
    fn is_initialized(&self) -> bool;
}

/// File system implementation of ProjectRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover the project root by walking up from the current directory.
    /// First checks the ROLETEX_ROOT environment variable, then falls back
    /// to discovery.
    pub fn discover() -> Result<Self> {
        // 1. Check ROLETEX_ROOT environment variable first
        if let Ok(root_path) = std::env::var("ROLETEX_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_manifest(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(RoletexError::Config(format!(
                    "ROLETEX_ROOT is set to '{}' but no roletex.toml found. \
                    Run 'roletex init' in that directory or unset ROLETEX_ROOT.",
                    path.display()
                )));
            }
        }

        // 2. Fall back to walking up from current directory
        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the project root by walking up from a specific directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_manifest(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    // Reached filesystem root without finding roletex.toml
                    return Err(RoletexError::NotProjectDirectory(start.to_path_buf()));
                }
            }
        }
    }

    /// Check if a path contains a roletex.toml manifest
    fn has_manifest(path: &Path) -> bool {
        path.join(MANIFEST_NAME).is_file()
    }
}

impl ProjectRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_manifest(&self.root)
    }
}

// File operations (not part of trait - filesystem-specific)
impl FileSystemRepository {
    /// Read a file relative to the project root
    pub fn read_file(&self, filename: &str) -> Result<String> {
        fs::read_to_string(self.root.join(filename)).map_err(RoletexError::Io)
    }

    /// Write a file relative to the project root, creating parent directories
    pub fn write_file(&self, filename: &str, content: &str) -> Result<()> {
        let path = self.root.join(filename);

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&path, content).map_err(RoletexError::Io)
    }

    /// Copy a file (relative paths) within the project
    pub fn copy_file(&self, from: &str, to: &str) -> Result<()> {
        let from_path = self.root.join(from);
        let to_path = self.root.join(to);

        if !from_path.exists() {
            return Err(RoletexError::Config(format!(
                "Cannot copy missing file: {}",
                from_path.display()
            )));
        }

        if let Some(parent) = to_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::copy(from_path, to_path)?;
        Ok(())
    }

    /// Remove a directory tree relative to the project root, if it exists
    pub fn remove_dir(&self, dir: &str) -> Result<()> {
        let path = self.root.join(dir);
        if path.exists() {
            fs::remove_dir_all(path)?;
        }
        Ok(())
    }

    fn normalize_relative_path(path: &Path) -> Option<String> {
        let parts: Vec<&str> = path
            .iter()
            .map(|part| part.to_str())
            .collect::<Option<_>>()?;
        Some(parts.join("/"))
    }

    /// List .tex source files under the given directory, as paths relative
    /// to that directory, sorted so processing order is deterministic.
    pub fn list_sources(&self, source_dir: &str) -> Result<Vec<String>> {
        let dir = self.root.join(source_dir);

        if !dir.is_dir() {
            return Err(RoletexError::Config(format!(
                "Source directory not found: {}",
                dir.display()
            )));
        }

        let mut sources = self.collect_by_extension(&dir, &["tex"]);
        sources.sort();
        Ok(sources)
    }

    /// List style files (.sty/.cls) under the given directory. A missing
    /// styles directory is fine - not every project carries one.
    pub fn list_styles(&self, styles_dir: &str) -> Result<Vec<String>> {
        let dir = self.root.join(styles_dir);

        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut styles = self.collect_by_extension(&dir, &["sty", "cls"]);
        styles.sort();
        Ok(styles)
    }

    fn collect_by_extension(&self, dir: &Path, extensions: &[&str]) -> Vec<String> {
        let mut files = Vec::new();

        let walker = WalkDir::new(dir).into_iter().filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            if !entry.file_type().is_dir() {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !name.starts_with('.'))
        });

        for entry in walker {
            let Ok(entry) = entry else {
                continue;
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let matches_ext = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| extensions.contains(&e));
            if !matches_ext {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(dir) else {
                continue;
            };
            if let Some(filename) = Self::normalize_relative_path(rel) {
                files.push(filename);
            }
        }

        files
    }
}

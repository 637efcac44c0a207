//! Initialize project use case

use crate::domain::Template;
use crate::error::{Result, RoletexError};
use crate::infrastructure::repository::ProjectRepository;
use crate::infrastructure::{Config, FileSystemRepository};
use std::fs;
use std::path::Path;

/// Initialize a new roletex project at the specified path.
pub fn init(path: &Path, roles: &[String]) -> Result<()> {
    // Create the directory if it doesn't exist
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());

    if repo.is_initialized() {
        return Err(RoletexError::Config(format!(
            "Directory already initialized: {}",
            path.display()
        )));
    }

    // Write default config
    let config = Config::new(roles.to_vec());
    repo.save_config(&config)?;

    // Scaffold source and styles directories
    fs::create_dir_all(path.join(&config.source_dir))?;
    fs::create_dir_all(path.join(&config.styles_dir))?;

    // Drop a starter document showing the tag syntax
    let main_rel = format!("{}/{}", config.source_dir, config.main_file);
    if !path.join(&main_rel).exists() {
        let template = Template::from_builtin("main.tex")?;
        repo.write_file(&main_rel, &template.render(roles))?;
    }

    println!("Initialized roletex project at {}", path.display());
    println!("Roles: {}", roles.join(", "));

    Ok(())
}

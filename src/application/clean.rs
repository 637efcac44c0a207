//! Remove derived build outputs

use crate::error::Result;
use crate::infrastructure::repository::ProjectRepository;
use crate::infrastructure::FileSystemRepository;

/// Delete the output directory. Everything in it is derived and will be
/// regenerated by the next build.
pub fn clean(repository: &FileSystemRepository) -> Result<()> {
    let config = repository.load_config()?;
    repository.remove_dir(&config.output_dir)?;

    println!("Removed {}", repository.root().join(&config.output_dir).display());
    Ok(())
}

//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod latex;
pub mod repository;

pub use config::Config;
pub use latex::LatexRunner;
pub use repository::{FileSystemRepository, ProjectRepository};

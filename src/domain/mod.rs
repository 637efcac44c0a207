//! Domain layer - Filtering logic and domain models

pub mod roles;
pub mod tags;
pub mod template;

pub use roles::RoleSet;
pub use template::Template;

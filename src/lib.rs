//! roletex - Role-based LaTeX variant builder
//!
//! A command-line tool that filters tagged LaTeX sources into per-role
//! document variants and drives the LaTeX compiler over each variant.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::RoletexError;

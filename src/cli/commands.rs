//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "roletex")]
#[command(about = "Role-based LaTeX variant builder", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new project
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Roles the project builds variants for
        #[arg(short, long, value_delimiter = ',', default_value = "qr,qd,tech,soleng")]
        roles: Vec<String>,
    },

    /// Filter sources and compile one variant per role
    Build {
        /// Build for a single role only
        #[arg(long)]
        role: Option<String>,

        /// Roles to build (default: roles from roletex.toml)
        #[arg(long, value_delimiter = ',')]
        roles: Vec<String>,

        /// Override the configured source directory
        #[arg(long)]
        source_dir: Option<String>,

        /// Override the configured output directory
        #[arg(long)]
        output_dir: Option<String>,

        /// Retain location content in the header
        #[arg(long)]
        include_location: bool,

        /// Only filter; skip the LaTeX compiler
        #[arg(long)]
        skip_compile: bool,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Remove the derived output directory
    Clean,
}

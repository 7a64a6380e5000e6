//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod check;
pub mod tree;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a theme and print (or write) the compiled output
    Build {
        /// Path to the index component directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Write compiled output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Style compiler executable to invoke
        #[arg(long, env = "THEMEFORGE_COMPILER")]
        compiler: Option<String>,

        /// Scratch directory used for staging
        #[arg(long)]
        scratch_dir: Option<PathBuf>,

        /// Enable an optional component by name (repeatable)
        #[arg(long, value_name = "NAME")]
        enable: Vec<String>,
    },

    /// Resolve and validate a component tree without building
    Check {
        /// Path to the index component directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Display the resolved component tree
    Tree {
        /// Path to the index component directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

impl Commands {
    /// Execute the selected command
    pub async fn run(self, json: bool) -> Result<()> {
        match self {
            Self::Build {
                path,
                output,
                compiler,
                scratch_dir,
                enable,
            } => {
                let options = build::BuildOptions {
                    output,
                    compiler,
                    scratch_dir,
                    enable,
                };
                build::execute(&path, options).await
            }
            Self::Check { path } => check::execute(&path, json).await,
            Self::Tree { path } => tree::execute(&path).await,
        }
    }
}

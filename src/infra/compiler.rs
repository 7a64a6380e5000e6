//! External style compiler adapter
//!
//! Runs the style-sheet compiler as a subprocess: the aggregate entry file
//! is passed as the single argument and compiled output is read from
//! stdout. Any compiler with that calling convention works; `sass` is the
//! default.

use std::path::{Path, PathBuf};

use crate::config::defaults::DEFAULT_COMPILER;
use crate::core::builder::StyleCompiler;
use crate::error::CompileError;

/// Compiles by invoking an external program on the aggregate file
#[derive(Debug, Clone)]
pub struct CommandCompiler {
    program: PathBuf,
}

impl CommandCompiler {
    /// Use an explicit compiler executable
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Locate `program` on PATH
    pub fn discover(program: &str) -> Result<Self, CompileError> {
        let resolved = which::which(program).map_err(|_| CompileError::NotFound {
            program: program.to_string(),
        })?;
        tracing::debug!("Using style compiler at '{}'", resolved.display());
        Ok(Self { program: resolved })
    }

    /// Locate the default compiler (`sass`) on PATH
    pub fn default_compiler() -> Result<Self, CompileError> {
        Self::discover(DEFAULT_COMPILER)
    }

    /// The configured compiler executable
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl StyleCompiler for CommandCompiler {
    async fn compile(&self, entry: &Path) -> Result<String, CompileError> {
        let output = tokio::process::Command::new(&self.program)
            .arg(entry)
            .output()
            .await
            .map_err(|e| CompileError::Spawn {
                program: self.program.display().to_string(),
                error: e.to_string(),
            })?;

        if !output.status.success() {
            let diagnostic = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(CompileError::Failed { diagnostic });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

//! Build command implementation
//!
//! Implements `themeforge build`: resolves the component tree, enables any
//! requested optional components, and runs one build through the
//! orchestrator.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::cli::output;
use crate::config;
use crate::core::builder::BuildOrchestrator;
use crate::core::resolver::ComponentResolver;
use crate::infra::compiler::CommandCompiler;

/// Build options
pub struct BuildOptions {
    /// Write compiled output here instead of stdout
    pub output: Option<std::path::PathBuf>,
    /// Style compiler executable
    pub compiler: Option<String>,
    /// Scratch directory override
    pub scratch_dir: Option<std::path::PathBuf>,
    /// Optional components to enable by name
    pub enable: Vec<String>,
}

/// Execute the build command
pub async fn execute(path: &Path, options: BuildOptions) -> Result<()> {
    let resolver = ComponentResolver::new();
    let mut index = resolver
        .resolve_index(path)
        .with_context(|| format!("Failed to resolve theme at '{}'", path.display()))?;

    for name in &options.enable {
        if !index.enable_optional(name) {
            bail!("No optional component named '{name}' in this theme");
        }
    }

    let compiler = match options.compiler.as_deref() {
        Some(program) => CommandCompiler::discover(program)?,
        None => CommandCompiler::default_compiler()?,
    };
    let scratch = options
        .scratch_dir
        .unwrap_or_else(config::default_scratch_dir);

    tracing::info!("Building theme '{}'", index.name);
    let spinner = output::create_spinner(&format!("Building theme '{}'", index.name));

    let orchestrator = BuildOrchestrator::new(scratch, compiler);
    let result = orchestrator.submit(index).await;
    spinner.finish_and_clear();

    let css = result.with_context(|| "Build failed")?;

    match options.output {
        Some(target) => {
            std::fs::write(&target, &css)
                .with_context(|| format!("Failed to write '{}'", target.display()))?;
            println!("{} Compiled theme written to {}", output::status::SUCCESS, target.display());
        }
        None => print!("{css}"),
    }

    Ok(())
}

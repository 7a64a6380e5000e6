//! CLI command for displaying the resolved component tree
//!
//! Implements the `themeforge tree` command.

use anyhow::{Context, Result};
use std::path::Path;

use crate::core::resolver::ComponentResolver;
use crate::core::tree::format_tree;

/// Execute the tree command
pub async fn execute(path: &Path) -> Result<()> {
    let resolver = ComponentResolver::new();
    let index = resolver
        .resolve_index(path)
        .with_context(|| format!("Failed to resolve theme at '{}'", path.display()))?;

    print!("{}", format_tree(&index));
    Ok(())
}

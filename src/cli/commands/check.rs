//! Check command implementation
//!
//! Implements `themeforge check`: resolves and validates the component
//! tree without staging or compiling anything.

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::output::status;
use crate::core::resolver::ComponentResolver;
use crate::core::tree::component_counts;

/// Execute the check command
pub async fn execute(path: &Path, json: bool) -> Result<()> {
    let resolver = ComponentResolver::new();
    let index = resolver
        .resolve_index(path)
        .with_context(|| format!("Theme at '{}' failed validation", path.display()))?;

    let (modules, contents) = component_counts(&index);

    if json {
        let summary = serde_json::json!({
            "name": index.name,
            "path": index.path,
            "valid": true,
            "modules": modules,
            "contents": contents,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{} Theme '{}' is valid", status::SUCCESS, index.name);
        println!("  {modules} modules, {contents} content fragments");
    }

    Ok(())
}

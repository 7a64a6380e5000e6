//! Component resolution
//!
//! Turns a filesystem path (or an inline spec) into an in-memory
//! [`Component`] tree. A directory with a `properties.yaml` manifest becomes
//! a module; a regular file becomes a content leaf with its text loaded
//! eagerly. Resolution only reads, never writes.
//!
//! `$ref` entries can form reference cycles on disk, so a visited-path set
//! is threaded through the recursion and cycles fail with
//! [`ResolveError::CircularReference`] instead of recursing unboundedly.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::defaults::MANIFEST_FILE_NAME;
use crate::core::component::{Component, ComponentKind, Variable};
use crate::core::manifest::{scalar_text, ComponentSpec, VariableSpec};
use crate::error::ResolveError;

/// Resolves source locations into component trees
#[derive(Debug, Clone)]
pub struct ComponentResolver {
    /// Manifest file name recognized inside module directories
    manifest_file: String,
}

impl Default for ComponentResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentResolver {
    /// Create a resolver recognizing the default manifest file name
    pub fn new() -> Self {
        Self {
            manifest_file: MANIFEST_FILE_NAME.to_string(),
        }
    }

    /// Create a resolver recognizing a custom manifest file name
    pub fn with_manifest_file(manifest_file: impl Into<String>) -> Self {
        Self {
            manifest_file: manifest_file.into(),
        }
    }

    /// Resolve a filesystem path into a component
    pub fn resolve(&self, path: &Path) -> Result<Component, ResolveError> {
        self.resolve_with(path, ComponentSpec::default())
    }

    /// Resolve a filesystem path with an inline override spec.
    ///
    /// Keys from the on-disk manifest win over the inline spec on conflict.
    pub fn resolve_with(
        &self,
        path: &Path,
        inline: ComponentSpec,
    ) -> Result<Component, ResolveError> {
        let mut visited = HashSet::new();
        self.resolve_path(path, inline, &mut visited, true)
    }

    /// Resolve the build root: forces `isIndex` and requires a module
    pub fn resolve_index(&self, path: &Path) -> Result<Component, ResolveError> {
        let inline = ComponentSpec {
            is_index: Some(true),
            ..ComponentSpec::default()
        };
        let component = self.resolve_with(path, inline)?;
        if !component.is_module() {
            return Err(ResolveError::IndexNotModule {
                path: path.to_path_buf(),
            });
        }
        Ok(component)
    }

    /// Resolve a pure inline spec with no backing path.
    ///
    /// The spec is a module iff it declares `components`, otherwise a
    /// content leaf. `base_dir` anchors `$ref` and dependency resolution.
    pub fn resolve_inline(
        &self,
        spec: ComponentSpec,
        base_dir: &Path,
    ) -> Result<Component, ResolveError> {
        let mut visited = HashSet::new();
        self.inline_component(spec, base_dir, &mut visited, true)
    }

    fn resolve_path(
        &self,
        path: &Path,
        inline: ComponentSpec,
        visited: &mut HashSet<PathBuf>,
        is_root: bool,
    ) -> Result<Component, ResolveError> {
        if !path.exists() {
            return Err(ResolveError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let canonical = path.canonicalize().map_err(|e| ResolveError::ReadFile {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        if !visited.insert(canonical.clone()) {
            return Err(ResolveError::CircularReference {
                path: path.to_path_buf(),
            });
        }

        let result = if path.is_dir() {
            self.module_component(path, inline, visited, is_root)
        } else {
            self.content_component(path, inline, is_root)
        };

        visited.remove(&canonical);
        result
    }

    fn module_component(
        &self,
        path: &Path,
        inline: ComponentSpec,
        visited: &mut HashSet<PathBuf>,
        is_root: bool,
    ) -> Result<Component, ResolveError> {
        let manifest_path = path.join(&self.manifest_file);
        if !manifest_path.is_file() {
            return Err(ResolveError::MissingManifest {
                path: path.to_path_buf(),
                manifest: self.manifest_file.clone(),
            });
        }

        let content =
            std::fs::read_to_string(&manifest_path).map_err(|e| ResolveError::ReadFile {
                path: manifest_path.clone(),
                error: e.to_string(),
            })?;
        let file_spec =
            ComponentSpec::from_yaml(&content).map_err(|e| ResolveError::ManifestParse {
                path: manifest_path,
                error: e.to_string(),
            })?;

        let mut spec = file_spec.merged_over(inline);
        if !is_root && spec.is_index.unwrap_or(false) {
            return Err(ResolveError::NestedIndex {
                path: path.to_path_buf(),
            });
        }

        let child_specs = spec.components.take().unwrap_or_default();
        let children = self.resolve_children(child_specs, path, visited)?;

        let oneof = spec.oneof.unwrap_or(false);
        let selected = spec.selected.unwrap_or(0);
        if oneof && selected >= children.len() {
            return Err(ResolveError::InvalidSelection {
                path: path.to_path_buf(),
                selected,
                children: children.len(),
            });
        }

        Ok(assemble(
            path.to_path_buf(),
            spec,
            ComponentKind::Module {
                children,
                oneof,
                selected,
            },
            path,
        ))
    }

    fn content_component(
        &self,
        path: &Path,
        inline: ComponentSpec,
        is_root: bool,
    ) -> Result<Component, ResolveError> {
        if !is_root && inline.is_index.unwrap_or(false) {
            return Err(ResolveError::NestedIndex {
                path: path.to_path_buf(),
            });
        }

        let raw_text = std::fs::read_to_string(path).map_err(|e| ResolveError::ReadFile {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        // Dependencies of a content leaf resolve against its containing directory
        let dep_base = path.parent().unwrap_or(path).to_path_buf();
        Ok(assemble(
            path.to_path_buf(),
            inline,
            ComponentKind::Content { raw_text },
            &dep_base,
        ))
    }

    fn inline_component(
        &self,
        mut spec: ComponentSpec,
        base_dir: &Path,
        visited: &mut HashSet<PathBuf>,
        is_root: bool,
    ) -> Result<Component, ResolveError> {
        if !is_root && spec.is_index.unwrap_or(false) {
            return Err(ResolveError::NestedIndex {
                path: base_dir.to_path_buf(),
            });
        }

        // A synthetic path keeps inline siblings distinct and gives the
        // staging phase a mirror location.
        let name = spec.name.clone().unwrap_or_else(|| "inline".to_string());
        let path = base_dir.join(&name);

        let kind = match spec.components.take() {
            Some(child_specs) => {
                // `$ref` entries of an inline module still resolve against
                // the enclosing real directory.
                let children = self.resolve_children(child_specs, base_dir, visited)?;
                let oneof = spec.oneof.unwrap_or(false);
                let selected = spec.selected.unwrap_or(0);
                if oneof && selected >= children.len() {
                    return Err(ResolveError::InvalidSelection {
                        path,
                        selected,
                        children: children.len(),
                    });
                }
                ComponentKind::Module {
                    children,
                    oneof,
                    selected,
                }
            }
            None => ComponentKind::Content {
                raw_text: String::new(),
            },
        };

        let dep_base = base_dir.to_path_buf();
        Ok(assemble(path, spec, kind, &dep_base))
    }

    fn resolve_children(
        &self,
        child_specs: Vec<ComponentSpec>,
        dir: &Path,
        visited: &mut HashSet<PathBuf>,
    ) -> Result<Vec<Component>, ResolveError> {
        let mut children: Vec<Component> = Vec::with_capacity(child_specs.len());
        let mut seen = HashSet::new();

        for child_spec in child_specs {
            let child = match child_spec.reference.clone() {
                Some(reference) => {
                    let child_path = dir.join(reference);
                    self.resolve_path(&child_path, child_spec, visited, false)?
                }
                None => self.inline_component(child_spec, dir, visited, false)?,
            };
            if !seen.insert(child.path.clone()) {
                return Err(ResolveError::DuplicateChild {
                    parent: dir.to_path_buf(),
                    child: child.path,
                });
            }
            children.push(child);
        }

        // Stable sort: declaration order breaks ties
        children.sort_by_key(|c| c.order);
        Ok(children)
    }
}

/// Build a [`Component`] from a merged spec, resolving dependency paths
/// against `dep_base` and discarding absolute entries so nothing can stage
/// outside the scratch tree.
fn assemble(path: PathBuf, spec: ComponentSpec, kind: ComponentKind, dep_base: &Path) -> Component {
    let name = spec.name.unwrap_or_else(|| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    let dependencies = spec
        .dependencies
        .unwrap_or_default()
        .into_iter()
        .filter_map(|dep| {
            let dep_path = Path::new(&dep);
            if dep_path.is_absolute() {
                tracing::warn!("Ignoring absolute dependency path '{dep}'");
                None
            } else {
                Some(dep_base.join(dep_path))
            }
        })
        .collect();

    let variables = spec
        .variables
        .unwrap_or_default()
        .into_iter()
        .map(variable_from_spec)
        .collect();

    Component {
        path,
        name,
        description: spec.description,
        order: spec.order.unwrap_or(0),
        optional: spec.optional.unwrap_or(false),
        skip_build: true,
        is_index: spec.is_index.unwrap_or(false),
        variables,
        dependencies,
        kind,
    }
}

fn variable_from_spec(spec: VariableSpec) -> Variable {
    Variable {
        name: spec.name,
        description: spec.description,
        format: spec.format,
        default: scalar_text(&spec.default),
        value: spec.value.as_ref().map(scalar_text),
    }
}

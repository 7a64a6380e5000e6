//! Component data model
//!
//! A component is a node in the theme's composition tree: either a `module`
//! (a directory with a manifest, containing further components) or a
//! `content` leaf (a raw style fragment). Components are produced by
//! [`crate::core::resolver::ComponentResolver`] and consumed by
//! [`crate::core::builder::BuildOrchestrator`].

use std::path::PathBuf;

use crate::config::defaults::{FORMAT_PLACEHOLDER, VARIABLE_PREFIX};

/// A customizable variable declared in a module manifest
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Variable identifier, rendered as `$name`
    pub name: String,
    /// Human-readable description
    pub description: Option<String>,
    /// Template the effective value is substituted into, `$` is the placeholder
    pub format: Option<String>,
    /// Default value
    pub default: String,
    /// Override value, wins over the default when present
    pub value: Option<String>,
}

impl Variable {
    /// Effective value: the override if present, else the default, optionally
    /// substituted into the format template.
    pub fn effective_value(&self) -> String {
        let value = self.value.as_deref().unwrap_or(&self.default);
        match &self.format {
            Some(format) => format.replace(FORMAT_PLACEHOLDER, value),
            None => value.to_string(),
        }
    }

    /// Render as a style-sheet declaration, e.g. `$accent: #7289da;`
    pub fn declaration(&self) -> String {
        format!("{}{}: {};", VARIABLE_PREFIX, self.name, self.effective_value())
    }
}

/// Variant-specific component payload
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    /// A container of further components, sorted by `order` ascending
    Module {
        /// Child components in build order
        children: Vec<Component>,
        /// When true, only `children[selected]` is built
        oneof: bool,
        /// Index of the selected child, meaningful only with `oneof`
        selected: usize,
    },
    /// A leaf style fragment
    Content {
        /// The fragment's raw text, loaded eagerly at resolution
        raw_text: String,
    },
}

/// A node in the theme's composition tree
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Absolute source location of this component
    pub path: PathBuf,
    /// Component name
    pub name: String,
    /// Component description
    pub description: Option<String>,
    /// Sibling sequencing, lower values build first
    pub order: i64,
    /// Whether the user may choose to skip this component
    pub optional: bool,
    /// Skips the subtree when `optional` is also set. Defaults to true:
    /// optional components build only after the caller enables them.
    pub skip_build: bool,
    /// Whether this component is the build root
    pub is_index: bool,
    /// Variables in declaration order
    pub variables: Vec<Variable>,
    /// Extra files copied verbatim alongside staged output, absolute paths
    pub dependencies: Vec<PathBuf>,
    /// Module or content payload
    pub kind: ComponentKind,
}

impl Component {
    /// Whether this component is a module
    pub fn is_module(&self) -> bool {
        matches!(self.kind, ComponentKind::Module { .. })
    }

    /// Child components, empty for content leaves
    pub fn children(&self) -> &[Component] {
        match &self.kind {
            ComponentKind::Module { children, .. } => children,
            ComponentKind::Content { .. } => &[],
        }
    }

    /// Variable declarations in declaration order, one per line
    pub fn declarations(&self) -> String {
        self.variables
            .iter()
            .map(Variable::declaration)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The text staged for a content leaf: variable declarations followed by
    /// the raw fragment. Returns `None` for modules.
    pub fn staged_text(&self) -> Option<String> {
        match &self.kind {
            ComponentKind::Content { raw_text } => {
                Some(format!("{}\n{}", self.declarations(), raw_text))
            }
            ComponentKind::Module { .. } => None,
        }
    }

    /// Enable an optional component by name so the next build stages it.
    ///
    /// Returns true when at least one optional component matched.
    pub fn enable_optional(&mut self, name: &str) -> bool {
        self.set_optional_enabled(name, true)
    }

    /// Disable a previously enabled optional component by name.
    pub fn disable_optional(&mut self, name: &str) -> bool {
        self.set_optional_enabled(name, false)
    }

    fn set_optional_enabled(&mut self, name: &str, enabled: bool) -> bool {
        let mut matched = false;
        if self.optional && self.name == name {
            self.skip_build = !enabled;
            matched = true;
        }
        if let ComponentKind::Module { children, .. } = &mut self.kind {
            for child in children {
                matched |= child.set_optional_enabled(name, enabled);
            }
        }
        matched
    }
}

//! Manifest (properties.yaml) parsing
//!
//! Every module directory carries a `properties.yaml` manifest that
//! customizes its composition. The same schema describes inline child
//! specs embedded in a parent manifest's `components` list, so all fields
//! are optional: "present in the manifest" is distinguished from "left to
//! the default", which makes merging file manifests over inline overrides
//! well defined.

use serde::{Deserialize, Serialize};

/// A component spec as written in a manifest
///
/// Either references an external path via `$ref` (with the remaining keys
/// acting as overrides) or is a fully inline component definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentSpec {
    /// Path to an external component, relative to the declaring module
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Component name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Component description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sibling build order, lower builds first (default 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,

    /// Whether the component may be skipped by the user (default false)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,

    /// Whether this component is the build root (default false)
    #[serde(rename = "isIndex", default, skip_serializing_if = "Option::is_none")]
    pub is_index: Option<bool>,

    /// Build exactly one child instead of all of them (default false)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oneof: Option<bool>,

    /// Index of the child built under `oneof` (default 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<usize>,

    /// Customizable variables, in declaration order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<VariableSpec>>,

    /// Child component specs, in declaration order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<ComponentSpec>>,

    /// Extra files copied alongside staged output, relative paths only
    #[serde(
        rename = "$dependencies",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dependencies: Option<Vec<String>>,
}

/// A variable declaration in a manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableSpec {
    /// Variable identifier
    pub name: String,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Template the effective value is substituted into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Default value, any YAML scalar
    #[serde(default)]
    pub default: serde_yaml::Value,

    /// Override value, wins over the default when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_yaml::Value>,
}

impl ComponentSpec {
    /// Parse a manifest document
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Merge this spec (read from a manifest file) over an inline spec.
    ///
    /// Keys present in the file manifest win; keys it leaves out fall back
    /// to the inline spec.
    pub fn merged_over(self, inline: ComponentSpec) -> ComponentSpec {
        ComponentSpec {
            reference: self.reference.or(inline.reference),
            name: self.name.or(inline.name),
            description: self.description.or(inline.description),
            order: self.order.or(inline.order),
            optional: self.optional.or(inline.optional),
            is_index: self.is_index.or(inline.is_index),
            oneof: self.oneof.or(inline.oneof),
            selected: self.selected.or(inline.selected),
            variables: self.variables.or(inline.variables),
            components: self.components.or(inline.components),
            dependencies: self.dependencies.or(inline.dependencies),
        }
    }
}

/// Render a YAML scalar as the text substituted into declarations
pub fn scalar_text(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

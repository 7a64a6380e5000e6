//! Component tree visualization
//!
//! Renders a resolved component tree for the `tree` and `check` commands.

use crate::core::component::{Component, ComponentKind};

/// Format a resolved component tree as an indented tree string
pub fn format_tree(root: &Component) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", describe(root)));
    let children = visible_children(root);
    for (i, child) in children.iter().enumerate() {
        format_node(&mut output, child, "", i == children.len() - 1);
    }
    output
}

fn format_node(output: &mut String, component: &Component, prefix: &str, is_last: bool) {
    let connector = if is_last { "└── " } else { "├── " };
    output.push_str(&format!("{prefix}{connector}{}\n", describe(component)));

    let child_prefix = if is_last {
        format!("{prefix}    ")
    } else {
        format!("{prefix}│   ")
    };

    let children = visible_children(component);
    for (i, child) in children.iter().enumerate() {
        format_node(output, child, &child_prefix, i == children.len() - 1);
    }
}

fn describe(component: &Component) -> String {
    let mut line = component.name.clone();
    match &component.kind {
        ComponentKind::Module {
            children, oneof, ..
        } => {
            if *oneof {
                line.push_str(&format!(" (oneof, {} alternatives)", children.len()));
            }
        }
        ComponentKind::Content { .. } => line.push_str(" (content)"),
    }
    if component.optional {
        if component.skip_build {
            line.push_str(" [optional, skipped]");
        } else {
            line.push_str(" [optional]");
        }
    }
    if !component.variables.is_empty() {
        line.push_str(&format!(" {{{} variables}}", component.variables.len()));
    }
    line
}

fn visible_children(component: &Component) -> &[Component] {
    component.children()
}

/// Count components per variant, for check summaries
pub fn component_counts(root: &Component) -> (usize, usize) {
    let mut modules = 0;
    let mut contents = 0;
    count(root, &mut modules, &mut contents);
    (modules, contents)
}

fn count(component: &Component, modules: &mut usize, contents: &mut usize) {
    match &component.kind {
        ComponentKind::Module { children, .. } => {
            *modules += 1;
            for child in children {
                count(child, modules, contents);
            }
        }
        ComponentKind::Content { .. } => *contents += 1,
    }
}

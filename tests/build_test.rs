//! Integration tests for theme builds
//!
//! Drives the resolver and orchestrator end-to-end over real component
//! trees, with a stub style compiler that echoes the aggregate file.

mod common;

use common::TestTheme;
use predicates::prelude::*;

use themeforge::core::builder::BuildOrchestrator;
use themeforge::core::resolver::ComponentResolver;
use themeforge::error::BuildError;
use themeforge::infra::compiler::CommandCompiler;

#[cfg(unix)]
#[tokio::test]
async fn test_two_leaf_theme_imports_in_order() {
    let theme = TestTheme::new();
    theme.create_two_leaf_theme();
    let stub = theme.create_stub_compiler();

    let index = ComponentResolver::new()
        .resolve_index(&theme.path())
        .expect("theme should resolve");

    let scratch = theme.path().join("scratch");
    let orchestrator = BuildOrchestrator::new(scratch.clone(), CommandCompiler::new(stub));
    let output = orchestrator.submit(index).await.expect("build succeeds");

    // b has order 1, a has order 2
    assert_eq!(output, "@import \"b.scss\";\n@import \"a.scss\";");
    assert!(!scratch.exists(), "scratch removed after build");
}

#[cfg(unix)]
#[tokio::test]
async fn test_staged_leaf_round_trip() {
    let theme = TestTheme::new();
    theme.create_file("buttons.scss", ".btn { color: $accent; }\n");
    theme.create_file(
        "properties.yaml",
        r##"
name: vars-theme
components:
  - $ref: buttons.scss
    variables:
      - name: accent
        default: "#7289da"
      - name: radius
        format: "$px"
        default: 4
        value: 8
"##,
    );

    // stub compiler that copies the staged leaf out before cleanup
    use std::os::unix::fs::PermissionsExt;
    let staged_copy = theme.path().join("staged-copy.scss");
    let stub = theme.path().join("capture");
    std::fs::write(
        &stub,
        format!(
            "#!/bin/sh\ncp \"$(dirname \"$1\")/buttons.scss\" \"{}\"\n",
            staged_copy.display()
        ),
    )
    .expect("write stub");
    let mut perms = std::fs::metadata(&stub).expect("stat").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&stub, perms).expect("chmod");

    let index = ComponentResolver::new()
        .resolve_index(&theme.path())
        .expect("theme should resolve");

    let orchestrator =
        BuildOrchestrator::new(theme.path().join("scratch"), CommandCompiler::new(stub));
    orchestrator.submit(index).await.expect("build succeeds");

    let staged = std::fs::read_to_string(&staged_copy).expect("staged copy exists");
    assert_eq!(
        staged,
        "$accent: #7289da;\n$radius: 8px;\n.btn { color: $accent; }\n"
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_oneof_builds_only_selected_variant() {
    let theme = TestTheme::new();
    theme.create_file("variants/light.scss", ".light {}\n");
    theme.create_file("variants/dark.scss", ".dark {}\n");
    theme.create_file(
        "variants/properties.yaml",
        r#"
name: variants
oneof: true
selected: 1
components:
  - $ref: light.scss
  - $ref: dark.scss
"#,
    );
    theme.create_file(
        "properties.yaml",
        "name: root\ncomponents:\n  - $ref: variants\n",
    );
    let stub = theme.create_stub_compiler();

    let index = ComponentResolver::new()
        .resolve_index(&theme.path())
        .expect("theme should resolve");
    let orchestrator =
        BuildOrchestrator::new(theme.path().join("scratch"), CommandCompiler::new(stub));
    let output = orchestrator.submit(index).await.expect("build succeeds");

    assert_eq!(output, "@import \"variants/dark.scss\";");
}

#[cfg(unix)]
#[tokio::test]
async fn test_optional_component_enabled_by_caller() {
    let theme = TestTheme::new();
    theme.create_file("base.scss", "body {}\n");
    theme.create_file("titlebar.scss", ".titlebar {}\n");
    theme.create_file(
        "properties.yaml",
        r#"
name: root
components:
  - $ref: base.scss
    order: 1
  - $ref: titlebar.scss
    name: titlebar
    optional: true
    order: 2
"#,
    );
    let stub = theme.create_stub_compiler();

    let resolver = ComponentResolver::new();
    let index = resolver
        .resolve_index(&theme.path())
        .expect("theme should resolve");
    let orchestrator = BuildOrchestrator::new(
        theme.path().join("scratch"),
        CommandCompiler::new(stub),
    );

    // skipped by default
    let output = orchestrator
        .submit(index.clone())
        .await
        .expect("build succeeds");
    assert_eq!(output, "@import \"base.scss\";");

    // enabled between submissions without re-resolving
    let mut enabled = index;
    assert!(enabled.enable_optional("titlebar"));
    let output = orchestrator.submit(enabled).await.expect("build succeeds");
    assert_eq!(output, "@import \"base.scss\";\n@import \"titlebar.scss\";");
}

#[cfg(unix)]
#[tokio::test]
async fn test_dependencies_follow_staged_output() {
    let theme = TestTheme::new();
    theme.create_file("assets/logo.svg", "<svg/>");
    theme.create_file("base.scss", "body {}\n");
    theme.create_file(
        "properties.yaml",
        r#"
name: root
components:
  - $ref: base.scss
$dependencies:
  - assets/logo.svg
"#,
    );

    // the stub asserts the dependency exists next to the aggregate
    use std::os::unix::fs::PermissionsExt;
    let stub = theme.path().join("depcheck");
    std::fs::write(
        &stub,
        "#!/bin/sh\ntest -f \"$(dirname \"$1\")/assets/logo.svg\" && cat \"$1\"\n",
    )
    .expect("write stub");
    let mut perms = std::fs::metadata(&stub).expect("stat").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&stub, perms).expect("chmod");

    let index = ComponentResolver::new()
        .resolve_index(&theme.path())
        .expect("theme should resolve");
    let orchestrator =
        BuildOrchestrator::new(theme.path().join("scratch"), CommandCompiler::new(stub));
    let output = orchestrator.submit(index).await.expect("build succeeds");
    assert_eq!(output, "@import \"base.scss\";");
}

#[tokio::test]
async fn test_non_index_submission_rejected() {
    let theme = TestTheme::new();
    theme.create_file("base.scss", "body {}\n");
    theme.create_file("properties.yaml", "name: root\ncomponents:\n  - $ref: base.scss\n");

    let root = ComponentResolver::new()
        .resolve(&theme.path())
        .expect("resolves without index flag");
    assert!(!root.is_index);

    let orchestrator =
        BuildOrchestrator::new(theme.path().join("scratch"), CommandCompiler::new("true"));
    let err = orchestrator.submit(root).await.expect_err("must fail");
    assert!(matches!(err, BuildError::InvalidRoot { .. }));
}

#[cfg(unix)]
#[tokio::test]
async fn test_back_to_back_submissions_share_scratch_safely() {
    let theme = TestTheme::new();
    theme.create_two_leaf_theme();
    let stub = theme.create_stub_compiler();

    let index = ComponentResolver::new()
        .resolve_index(&theme.path())
        .expect("theme should resolve");

    let scratch = theme.path().join("scratch");
    let orchestrator = BuildOrchestrator::new(scratch.clone(), CommandCompiler::new(stub));

    let (first, second) = tokio::join!(
        orchestrator.submit(index.clone()),
        orchestrator.submit(index.clone())
    );
    assert_eq!(
        first.expect("first build"),
        "@import \"b.scss\";\n@import \"a.scss\";"
    );
    assert_eq!(
        second.expect("second build"),
        "@import \"b.scss\";\n@import \"a.scss\";"
    );
    assert!(!scratch.exists(), "scratch removed after both builds");
}

#[cfg(unix)]
#[test]
fn test_build_command_writes_output_file() {
    let theme = TestTheme::new();
    theme.create_two_leaf_theme();
    let stub = theme.create_stub_compiler();
    let target = theme.path().join("out.css");

    let output = std::process::Command::new(env!("CARGO_BIN_EXE_themeforge"))
        .arg("build")
        .arg(theme.path())
        .arg("--compiler")
        .arg(&stub)
        .arg("--scratch-dir")
        .arg(theme.path().join("scratch"))
        .arg("--output")
        .arg(&target)
        .output()
        .expect("Failed to execute themeforge build");

    assert!(
        output.status.success(),
        "build failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let css = std::fs::read_to_string(&target).expect("output file written");
    assert_eq!(css, "@import \"b.scss\";\n@import \"a.scss\";");
}

#[cfg(unix)]
#[test]
fn test_build_command_unknown_enable_fails() {
    let theme = TestTheme::new();
    theme.create_two_leaf_theme();
    let stub = theme.create_stub_compiler();

    let output = std::process::Command::new(env!("CARGO_BIN_EXE_themeforge"))
        .arg("build")
        .arg(theme.path())
        .arg("--compiler")
        .arg(&stub)
        .arg("--enable")
        .arg("nonexistent")
        .output()
        .expect("Failed to execute themeforge build");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        predicates::str::contains("nonexistent").eval(&stderr),
        "stderr names the unknown component: {stderr}"
    );
}

//! End-to-end tests of the `navmenu` binary.

use anyhow::Result;
use assert_cmd::Command;
use navmenu::test_utils::{DefinitionFixture, SettingsFixture};
use predicates::prelude::*;

use crate::common::TestProject;

fn navmenu(project: &TestProject) -> Command {
    let mut cmd = Command::cargo_bin("navmenu").unwrap();
    cmd.current_dir(project.project_path()).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_render_prints_markup() -> Result<()> {
    let project = TestProject::new()?;
    project.write_definition(&DefinitionFixture::basic())?;

    navmenu(&project)
        .args(["render", "menu.toml", "--url", "https://example.com/about/team"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<ul>"))
        .stdout(predicate::str::contains(r#"<a href="https://example.com/about/team">Team</a>"#))
        .stdout(predicate::str::contains("Dashboard").not());
    Ok(())
}

#[test]
fn test_render_view_and_format() -> Result<()> {
    let project = TestProject::new()?;
    project.write_definition(&DefinitionFixture::yaml())?;

    let output = project.run_navmenu(&[
        "render",
        "menu.yaml",
        "--url",
        "https://example.com/about/team",
        "--view",
        "crumb",
        "--format",
        "ol",
        "--class",
        "breadcrumb",
    ])?;
    output.assert_success().assert_stdout_contains(r#"<ol class="breadcrumb">"#).assert_stdout_contains("About");
    assert!(!output.stdout.contains("Home"));
    Ok(())
}

#[test]
fn test_render_for_signed_in_admin() -> Result<()> {
    let project = TestProject::new()?;
    project.write_definition(&DefinitionFixture::basic())?;

    project
        .run_navmenu(&["render", "menu.toml", "--url", "https://example.com/", "--user", "ada", "--role", "admin"])?
        .assert_success()
        .assert_stdout_contains("https://example.com/admin/dashboard");
    Ok(())
}

#[test]
fn test_render_with_settings_file() -> Result<()> {
    let project = TestProject::new()?;
    project.write_definition(&DefinitionFixture::basic())?;
    project.write_settings(&SettingsFixture::basic())?;

    project
        .run_navmenu(&["render", "menu.toml", "--url", "https://example.com/", "--settings", "navmenu.toml"])?
        .assert_success()
        .assert_stdout_contains(r#"<li class="current"><a href="https://example.com">Home</a></li>"#)
        .assert_stdout_contains(r#"class="nav-about inactive""#);
    Ok(())
}

#[test]
fn test_render_with_svg_icons_from_settings() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("icons/home.svg", r#"<svg viewBox="0 0 8 8"><circle r="4"/></svg>"#)?;
    project.write_file("config/navmenu.toml", "[config]\nsvg_path = \"../icons\"\n")?;
    project.write_file("menu.toml", "name = \"main\"\n\n[[items]]\ntitle = \"Home\"\nurl = \"/\"\nsvg = \"home\"\n")?;

    project
        .run_navmenu(&["render", "menu.toml", "--url", "https://example.com/", "--settings", "config/navmenu.toml"])?
        .assert_success()
        .assert_stdout_contains("<circle r=\"4\"/></svg>Home");
    Ok(())
}

#[test]
fn test_render_rejects_relative_url() -> Result<()> {
    let project = TestProject::new()?;
    project.write_definition(&DefinitionFixture::basic())?;

    let output = project.run_navmenu(&["render", "menu.toml", "--url", "/about"])?;
    assert!(!output.success);
    assert_eq!(output.code, Some(1));
    assert!(output.stdout.is_empty());
    assert!(output.stderr.contains("Invalid URL '/about'"), "{}", output.stderr);
    assert!(output.stderr.contains("absolute URL"));
    Ok(())
}

#[test]
fn test_render_missing_definition() -> Result<()> {
    let project = TestProject::new()?;

    navmenu(&project)
        .args(["render", "missing.toml", "--url", "https://example.com/"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing.toml"));
    Ok(())
}

#[test]
fn test_validate_text_report() -> Result<()> {
    let project = TestProject::new()?;
    project.write_definition(&DefinitionFixture::basic())?;

    navmenu(&project)
        .args(["validate", "menu.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Menu 'main' is valid"))
        .stdout(predicate::str::contains("7 items, 4 top-level, 1 dropdowns, depth 2"));
    Ok(())
}

#[test]
fn test_validate_json_report() -> Result<()> {
    let project = TestProject::new()?;
    project.write_definition(&DefinitionFixture::restful())?;

    let output = project.run_navmenu(&["validate", "posts.toml", "--format", "json"])?;
    output.assert_success();

    let report: serde_json::Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(report["valid"], true);
    assert_eq!(report["menu"], "posts");
    assert_eq!(report["items"], 2);
    assert_eq!(report["errors"], serde_json::json!([]));
    Ok(())
}

#[test]
fn test_validate_invalid_definition_fails() -> Result<()> {
    let project = TestProject::new()?;
    project.write_definition(&DefinitionFixture::invalid())?;

    navmenu(&project)
        .args(["validate", "invalid.toml"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("dropdown_type"))
        .stderr(predicate::str::contains("Validation of invalid.toml failed"));
    Ok(())
}

#[test]
fn test_verbose_logs_to_stderr() -> Result<()> {
    let project = TestProject::new()?;
    project.write_definition(&DefinitionFixture::basic())?;

    let output = project.run_navmenu(&["--verbose", "render", "menu.toml", "--url", "https://example.com/"])?;
    output.assert_success();
    assert!(output.stderr.contains("DEBUG"), "{}", output.stderr);
    assert!(!output.stdout.contains("DEBUG"));
    Ok(())
}

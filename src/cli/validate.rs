//! Check a menu definition without rendering it.
//!
//! The definition is built against a request URL exactly as `render` would build it,
//! then its structure is inspected.
//!
//! Errors (validation fails):
//! - the file cannot be parsed or an entry cannot be built
//! - the parent chain of an item loops
//!
//! Warnings (validation fails only with `--strict`):
//! - an item names a parent id that does not exist
//! - two items share a nickname, so only the first is reachable through `get`
//! - a link resolves to no URL (unknown route or action)
//!
//! # Example Output
//!
//! ```text
//! ✓ Menu 'main' is valid
//!   7 items, 4 top-level, 1 dropdowns, depth 2
//! ⚠ Warning: Items 'Blog' and 'Blog' share the nickname 'blog'
//! ```

use anyhow::{Result, anyhow};
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

use super::common::{ActorArgs, MenuInputs};
use crate::core::MenuError;
use crate::menu::Builder;

/// Output format of the validation report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored text
    #[default]
    Text,
    /// One JSON object, for CI
    Json,
}

/// Command to validate a menu definition.
#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Menu definition file
    definition: PathBuf,

    /// Settings file merged over the built-in defaults
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Request URL to build the menu for
    #[arg(short, long, default_value = "http://localhost/")]
    url: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Treat warnings as errors
    #[arg(long)]
    strict: bool,
}

/// Outcome of a validation run.
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    /// No errors, and no warnings in strict mode
    pub valid: bool,
    /// Menu name, when the definition could be parsed
    pub menu: Option<String>,
    pub items: usize,
    pub top_level: usize,
    pub dropdowns: usize,
    /// Number of levels, 0 for an empty menu
    pub depth: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidateCommand {
    /// Validate the definition and print the report.
    ///
    /// # Errors
    ///
    /// Returns an error when validation fails, after the report has been printed.
    pub fn execute(self) -> Result<()> {
        let report = self.inspect();

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => print_text(&report),
        }

        if report.valid {
            Ok(())
        } else {
            Err(anyhow!("Validation of {} failed", self.definition.display()))
        }
    }

    /// Build the menu and collect errors and warnings.
    #[must_use]
    pub fn inspect(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        let mut inputs =
            match MenuInputs::load(&self.definition, self.settings.as_deref(), &self.url, &ActorArgs::default()) {
                Ok(inputs) => inputs,
                Err(e) => {
                    report.errors.push(format!("{e:#}"));
                    return report;
                }
            };
        report.menu = Some(inputs.definition.name.clone());

        let name = match inputs.build() {
            Ok(name) => name,
            Err(e) => {
                report.errors.push(format!("{e:#}"));
                return report;
            }
        };

        match inputs.registry.get(&name) {
            Ok(menu) => inspect_menu(menu, &mut report),
            Err(e) => report.errors.push(e.to_string()),
        }

        report.valid = report.errors.is_empty() && !(self.strict && !report.warnings.is_empty());
        report
    }
}

fn inspect_menu(menu: &Builder, report: &mut ValidationReport) {
    report.items = menu.len();
    report.top_level = menu.roots().len();
    report.dropdowns = menu.all().iter().filter(|item| item.is_dropdown()).count();

    let mut nicknames: HashMap<&str, &str> = HashMap::new();
    for item in menu.all() {
        match menu.find_level(item.parent_id()) {
            Ok(level) => report.depth = report.depth.max(level + 1),
            Err(MenuError::ItemNotFound {
                id,
            }) => report.warnings.push(format!("Item '{}' refers to missing parent '{id}'", item.title())),
            Err(e) => report.errors.push(format!("Item '{}': {e}", item.title())),
        }

        if let Some(first) = nicknames.insert(item.nickname(), item.title()) {
            report.warnings.push(format!(
                "Items '{first}' and '{}' share the nickname '{}'",
                item.title(),
                item.nickname()
            ));
        }

        if item.link().is_some() && !item.is_dropdown() && menu.url_of(item).is_none() {
            report.warnings.push(format!("Item '{}' links to nothing", item.title()));
        }
    }
}

fn print_text(report: &ValidationReport) {
    let name = report.menu.as_deref().unwrap_or("?");

    if report.errors.is_empty() {
        let status = if report.valid { "✓".green() } else { "✗".red() };
        println!("{status} Menu '{name}' {}", if report.valid { "is valid" } else { "has warnings" });
        println!(
            "  {} items, {} top-level, {} dropdowns, depth {}",
            report.items, report.top_level, report.dropdowns, report.depth
        );
    }

    for error in &report.errors {
        println!("{} {error}", "✗".red());
    }
    for warning in &report.warnings {
        println!("{} {warning}", "⚠ Warning:".yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::DefinitionFixture;
    use tempfile::TempDir;

    fn command(path: PathBuf) -> ValidateCommand {
        ValidateCommand {
            definition: path,
            settings: None,
            url: "http://localhost/".to_string(),
            format: OutputFormat::Text,
            strict: false,
        }
    }

    #[test]
    fn test_basic_definition_is_valid() -> Result<()> {
        let dir = TempDir::new()?;
        let report = command(DefinitionFixture::basic().write_to(dir.path())?).inspect();

        assert!(report.valid, "{:?}", report.errors);
        assert_eq!(report.menu.as_deref(), Some("main"));
        assert_eq!(report.items, 7);
        assert_eq!(report.top_level, 4);
        assert_eq!(report.dropdowns, 1);
        assert_eq!(report.depth, 2);
        assert!(report.warnings.is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_definition_reports_error() -> Result<()> {
        let dir = TempDir::new()?;
        let report = command(DefinitionFixture::invalid().write_to(dir.path())?).inspect();

        assert!(!report.valid);
        assert!(report.errors[0].contains("dropdown_type"));
        Ok(())
    }

    #[test]
    fn test_malformed_file_reports_error() -> Result<()> {
        let dir = TempDir::new()?;
        let report = command(DefinitionFixture::malformed().write_to(dir.path())?).inspect();

        assert!(!report.valid);
        assert!(report.menu.is_none());
        assert_eq!(report.errors.len(), 1);
        Ok(())
    }

    #[test]
    fn test_structure_warnings_and_strict_mode() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("menu.toml");
        std::fs::write(
            &path,
            r#"
name = "main"

[[items]]
title = "Blog"
url = "blog"

[[items]]
title = "Blog"
url = "blog/archive"
parent = "gone"

[[items]]
title = "Docs"
route = "docs.index"
"#,
        )?;

        let mut cmd = command(path);
        let report = cmd.inspect();
        assert!(report.valid);
        assert_eq!(report.warnings.len(), 3, "{:?}", report.warnings);

        cmd.strict = true;
        assert!(!cmd.inspect().valid);
        Ok(())
    }

    #[test]
    fn test_cyclic_parents_are_errors() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("menu.toml");
        std::fs::write(
            &path,
            r#"
name = "main"

[[items]]
title = "A"
id = "a"
parent = "b"
url = "a"

[[items]]
title = "B"
id = "b"
parent = "a"
url = "b"
"#,
        )?;

        let report = command(path).inspect();
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 2);
        Ok(())
    }
}

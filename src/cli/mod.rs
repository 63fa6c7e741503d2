//! Command-line interface for navmenu.
//!
//! The binary builds a menu from a definition file against a request URL, the way a
//! web application would on every request, and prints the result.
//!
//! # Available Commands
//!
//! - `render` - Print the markup of a menu or of one of its derived views
//! - `validate` - Check that a definition file builds and report its structure
//!
//! # Example
//!
//! ```bash
//! # Full menu as seen on /about/team
//! navmenu render menu.toml --url https://example.com/about/team
//!
//! # Breadcrumbs as an ordered list, with custom settings
//! navmenu render menu.toml --url https://example.com/about/team --view crumb --format ol \
//!     --settings navmenu.toml
//!
//! # Menu as seen by an administrator
//! navmenu render menu.toml --url https://example.com/ --user ada --role admin
//!
//! # Structure report for CI
//! navmenu validate menu.toml --format json
//! ```
//!
//! # Global Options
//!
//! - `--verbose` - Debug logging on stderr
//! - `--quiet` - No logging at all
//!
//! Without either flag `RUST_LOG` decides, falling back to warnings only.

pub mod common;
mod render;
mod validate;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub use render::{ListTag, RenderCommand, View};
pub use validate::{OutputFormat, ValidateCommand};

/// Main CLI structure for navmenu.
#[derive(Parser)]
#[command(
    name = "navmenu",
    about = "Build and render hierarchical navigation menus",
    version,
    author,
    long_about = "navmenu builds navigation menus from TOML or YAML definitions, marks the items matching a request URL as active, and renders them as HTML lists."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Disable logging
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a menu to HTML
    Render(RenderCommand),

    /// Check a menu definition
    Validate(ValidateCommand),
}

impl Cli {
    /// Initialize logging and run the selected command.
    ///
    /// # Errors
    ///
    /// Returns the command's error; the binary turns it into a user-facing message.
    pub fn execute(self) -> Result<()> {
        self.init_logging();

        match self.command {
            Commands::Render(cmd) => cmd.execute(),
            Commands::Validate(cmd) => cmd.execute(),
        }
    }

    /// Log filter selected by the global flags.
    #[must_use]
    pub fn log_filter(&self) -> EnvFilter {
        if self.verbose {
            EnvFilter::new("navmenu=debug")
        } else if self.quiet {
            EnvFilter::new("off")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        }
    }

    fn init_logging(&self) {
        // Logs go to stderr so rendered markup can be piped.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.log_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

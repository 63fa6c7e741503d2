//! navmenu CLI entry point
//!
//! Parses the command line, runs the selected command and turns failures into
//! user-friendly error messages:
//! - `render` - Print the markup of a menu built from a definition file
//! - `validate` - Check a definition file and report its structure

use anyhow::Result;
use clap::Parser;
use navmenu::cli;
use navmenu::core::user_friendly_error;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            // Convert to user-friendly error with context and suggestions
            user_friendly_error(e).display();
            std::process::exit(1);
        }
    }
}

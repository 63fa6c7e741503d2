//! Integration test suite for navmenu
//!
//! End-to-end tests that exercise the public API the way a host application does and
//! run the `navmenu` binary against definition files on disk.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **rendering**: Markup produced for full menus, dropdowns and render hooks
//! - **activation**: Request matching and the derived views built on it
//! - **registry**: Named menus shared across one request
//! - **definition**: Menus and settings loaded from TOML and YAML files
//! - **cli**: The `render` and `validate` commands

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod activation;
mod cli;
mod definition;
mod registry;
mod rendering;

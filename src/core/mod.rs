//! Core types for navmenu
//!
//! This module holds the error type shared by the library and the binary.
//!
//! - [`MenuError`] - Enumerated error types covering every navmenu failure mode
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//!
//! ```rust
//! use navmenu::core::{MenuError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn lookup() -> Result<()> {
//!     Err(MenuError::ItemNotFound { id: "settings".to_string() }.into())
//! }
//!
//! if let Err(e) = lookup() {
//!     let friendly = user_friendly_error(e);
//!     assert!(friendly.to_string().contains("settings"));
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, MenuError, user_friendly_error};

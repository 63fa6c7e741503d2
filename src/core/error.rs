//! Error handling for navmenu
//!
//! This module provides the error type shared by every part of the menu engine and the
//! user-friendly reporting layer used by the `navmenu` binary. The error system follows
//! two principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`MenuError`] - Enumerated error types for all failure cases
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! Most menu operations never fail: lookups that miss return `None`, permission
//! predicates that error are treated as denial, and missing SVG icons are omitted.
//! The errors below are what remains: structural misuse of the item graph, unknown
//! menu names, and configuration or definition files that cannot be read.
//!
//! # Examples
//!
//! ```rust,no_run
//! use navmenu::core::{MenuError, user_friendly_error};
//!
//! let error = MenuError::MenuNotFound {
//!     name: "mian".to_string(),
//!     suggestion: Some("main".to_string()),
//! };
//!
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with "did you mean" suggestion
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for navmenu operations
///
/// # Error Categories
///
/// ## Structure
/// - [`CyclicParent`] - The parent graph of a menu contains a cycle
/// - [`ItemNotFound`] - An item id did not resolve where one was required
///
/// ## Registry
/// - [`MenuNotFound`] - No menu has been registered under the given name
///
/// ## Collaborators
/// - [`IconNotFound`] - The icon resolver has no SVG for a logical path
/// - [`InvalidUrl`] - A request URL could not be parsed
///
/// ## Configuration
/// - [`ConfigError`] - Settings are present but unusable
/// - [`DefinitionError`] - A menu definition file cannot be turned into a menu
/// - [`IoError`], [`TomlError`], [`YamlError`], [`JsonError`] - conversions from the
///   underlying libraries
///
/// [`CyclicParent`]: MenuError::CyclicParent
/// [`ItemNotFound`]: MenuError::ItemNotFound
/// [`MenuNotFound`]: MenuError::MenuNotFound
/// [`IconNotFound`]: MenuError::IconNotFound
/// [`InvalidUrl`]: MenuError::InvalidUrl
/// [`ConfigError`]: MenuError::ConfigError
/// [`DefinitionError`]: MenuError::DefinitionError
/// [`IoError`]: MenuError::IoError
/// [`TomlError`]: MenuError::TomlError
/// [`YamlError`]: MenuError::YamlError
/// [`JsonError`]: MenuError::JsonError
#[derive(Error, Debug)]
pub enum MenuError {
    /// An item's parent chain leads back to itself
    ///
    /// Items reference their parents by id, so nothing prevents a caller from wiring
    /// `a -> b -> a` (for example by re-assigning ids after construction). Traversals
    /// that must terminate report the first revisited id instead of recursing forever.
    #[error("Cyclic parent reference detected at menu item '{id}'")]
    CyclicParent {
        /// The id that was reached twice
        id: String,
    },

    /// An item id did not resolve
    #[error("Menu item not found: {id}")]
    ItemNotFound {
        /// The id that was looked up
        id: String,
    },

    /// No menu registered under this name
    #[error("Menu not found: {name}")]
    MenuNotFound {
        /// The requested menu name
        name: String,
        /// Closest registered name, if any is similar enough
        suggestion: Option<String>,
    },

    /// The icon resolver could not find an SVG for the logical path
    #[error("SVG icon not found: {path}")]
    IconNotFound {
        /// Logical icon path (prefixed, slash-to-dash transformed)
        path: String,
    },

    /// A request URL could not be parsed
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected input
        url: String,
        /// Parser message
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// A menu definition file describes an impossible menu
    #[error("Invalid menu definition: {message}")]
    DefinitionError {
        /// What is wrong with the definition
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// JSON conversion error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Error context wrapper that provides user-friendly error information
///
/// Suggestions are printed in green and details in yellow by [`display`](Self::display).
///
/// ```rust,no_run
/// use navmenu::core::{ErrorContext, MenuError};
///
/// let context = ErrorContext::new(MenuError::ConfigError {
///     message: "rest_base must be a string or a list".to_string(),
/// })
/// .with_suggestion("Set rest_base = \"api\" or rest_base = [\"api\", \"admin\"]");
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying menu error
    pub error: MenuError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`MenuError`]
    #[must_use]
    pub const fn new(error: MenuError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`MenuError`] variants (directly or anywhere in the `anyhow` chain),
/// [`std::io::Error`] kinds, and falls back to the full context chain as a
/// [`MenuError::ConfigError`] message.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(menu_error) = cause.downcast_ref::<MenuError>() {
            return create_error_context(menu_error, &error);
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::NotFound {
            return ErrorContext::new(MenuError::ConfigError {
                message: format!("{error:#}"),
            })
            .with_suggestion("Check that the file exists and the path is correct");
        }
    }

    ErrorContext::new(MenuError::ConfigError {
        message: format!("{error:#}"),
    })
}

fn create_error_context(error: &MenuError, chain: &anyhow::Error) -> ErrorContext {
    match error {
        MenuError::CyclicParent {
            id,
        } => ErrorContext::new(MenuError::CyclicParent {
            id: id.clone(),
        })
        .with_suggestion("Check the `parent` of each item; an item cannot be its own ancestor")
        .with_details("Menu items are stored flat and linked by parent id, so ids must be unique"),
        MenuError::MenuNotFound {
            name,
            suggestion,
        } => {
            let ctx = ErrorContext::new(MenuError::MenuNotFound {
                name: name.clone(),
                suggestion: suggestion.clone(),
            });
            match suggestion {
                Some(candidate) => ctx.with_suggestion(format!("Did you mean '{candidate}'?")),
                None => ctx.with_suggestion("Create the menu with Registry::make before looking it up"),
            }
        }
        MenuError::InvalidUrl {
            url,
            reason,
        } => ErrorContext::new(MenuError::InvalidUrl {
            url: url.clone(),
            reason: reason.clone(),
        })
        .with_suggestion("Pass an absolute URL including the scheme, e.g. https://example.com/posts"),
        _ => ErrorContext::new(MenuError::ConfigError {
            message: format!("{chain:#}"),
        }),
    }
}

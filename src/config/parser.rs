//! Generic configuration parsing utilities.
//!
//! Settings files and menu definition files can be written in TOML or YAML. The
//! format is chosen from the file extension (`.yaml`/`.yml` for YAML, anything
//! else is treated as TOML). Errors carry the file path as context.
//!
//! ```rust,no_run
//! use navmenu::config::parse_config;
//! use serde::Deserialize;
//! use std::path::Path;
//!
//! #[derive(Deserialize)]
//! struct Menu {
//!     name: String,
//! }
//!
//! # fn example() -> anyhow::Result<()> {
//! let menu: Menu = parse_config(Path::new("menus/main.toml"))?;
//! println!("Loaded menu {}", menu.name);
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::path::Path;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML (the default)
    Toml,
    /// YAML (`.yaml` or `.yml`)
    Yaml,
}

impl ConfigFormat {
    /// Detect the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Toml,
        }
    }
}

/// Parse a TOML or YAML configuration file into the specified type.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or if its content is not valid for
/// the detected format or does not match `T`.
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config_str(&content, ConfigFormat::from_path(path))
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse configuration content that is already in memory.
///
/// # Errors
///
/// Returns an error if the content is not valid for `format` or does not match `T`.
pub fn parse_config_str<T>(content: &str, format: ConfigFormat) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let config = match format {
        ConfigFormat::Toml => toml::from_str(content)?,
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Deserialize)]
    struct TestConfig {
        name: String,
        value: i32,
    }

    #[test]
    fn test_parse_config_toml() {
        use tempfile::tempdir;

        let temp = tempdir().unwrap();
        let config_path = temp.path().join("test.toml");
        std::fs::write(&config_path, "name = \"test\"\nvalue = 42\n").unwrap();

        let config: TestConfig = parse_config(&config_path).unwrap();
        assert_eq!(config.name, "test");
        assert_eq!(config.value, 42);
    }

    #[test]
    fn test_parse_config_yaml() {
        use tempfile::tempdir;

        let temp = tempdir().unwrap();
        let config_path = temp.path().join("test.yml");
        std::fs::write(&config_path, "name: test\nvalue: 7\n").unwrap();

        let config: TestConfig = parse_config(&config_path).unwrap();
        assert_eq!(config.name, "test");
        assert_eq!(config.value, 7);
    }

    #[test]
    fn test_parse_config_error_mentions_path() {
        use tempfile::tempdir;

        let temp = tempdir().unwrap();
        let config_path = temp.path().join("invalid.toml");
        std::fs::write(&config_path, "invalid = toml {").unwrap();

        let result: Result<TestConfig> = parse_config(&config_path);
        let message = format!("{:#}", result.err().unwrap());
        assert!(message.contains("invalid.toml"));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.YAML")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("menu")), ConfigFormat::Toml);
    }
}

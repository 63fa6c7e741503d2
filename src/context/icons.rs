//! SVG icons served from a directory tree.

use super::IconResolver;
use crate::core::MenuError;
use crate::html::Attributes;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Icon set name that prefixes every logical SVG path produced by items.
pub const SVG_ICON_SET: &str = "navmenu";

/// Logical icon name for a relative icon path: `social/github` becomes
/// `navmenu-social-github`.
#[must_use]
pub fn logical_name(path: &str) -> String {
    format!("{SVG_ICON_SET}-{}", path.trim_matches('/').replace('/', "-"))
}

/// Index of every `.svg` file below a directory.
#[derive(Debug, Clone, Default)]
pub struct SvgDirectory {
    icons: HashMap<String, PathBuf>,
}

impl SvgDirectory {
    /// Walk `dir` and register each `.svg` file under its logical name.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be traversed.
    pub fn open(dir: &Path) -> Result<Self, MenuError> {
        let mut icons = HashMap::new();

        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry.map_err(|e| MenuError::IoError(e.into()))?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("svg") {
                continue;
            }

            let Ok(relative) = path.with_extension("").strip_prefix(dir).map(Path::to_path_buf) else {
                continue;
            };
            let relative = relative.components().map(|c| c.as_os_str().to_string_lossy()).collect::<Vec<_>>().join("/");
            icons.insert(logical_name(&relative), path.to_path_buf());
        }

        debug!("Indexed {} SVG icons under {}", icons.len(), dir.display());
        Ok(Self {
            icons,
        })
    }

    /// Number of indexed icons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    /// True when no icons were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

impl IconResolver for SvgDirectory {
    fn svg(&self, name: &str, attributes: &Attributes) -> Result<String, MenuError> {
        let path = self.icons.get(name).ok_or_else(|| MenuError::IconNotFound {
            path: name.to_string(),
        })?;
        let markup = std::fs::read_to_string(path)?;

        let Some(start) = markup.find("<svg") else {
            return Ok(markup.trim().to_string());
        };
        let insert_at = start + "<svg".len();
        let body = &markup[start..];
        let end = body.rfind("</svg>").map_or(markup.len(), |i| start + i + "</svg>".len());
        Ok(format!("{}{}{}", &markup[start..insert_at], attributes.to_html(), &markup[insert_at..end]))
    }
}

//! URL resolution against a fixed base URL and a table of route patterns.

use super::UrlResolver;
use indexmap::IndexMap;
use regex::Regex;
use tracing::trace;
use url::Url;

/// Base URL plus named routes and controller actions.
///
/// Patterns are paths with `{param}` placeholders (`posts/{post}/edit`). Positional
/// parameters fill placeholders in order; parameters left over are appended as
/// extra path segments. Optional placeholders (`{page?}`) are dropped when no
/// parameter is left for them.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    root: String,
    routes: IndexMap<String, String>,
    actions: IndexMap<String, String>,
}

impl RouteTable {
    /// Resolver rooted at `root` (`https://example.com`).
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Register a named route.
    #[must_use]
    pub fn with_route(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.routes.insert(name.into(), pattern.into());
        self
    }

    /// Register a controller action (`PostController@show`).
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.actions.insert(action.into(), pattern.into());
        self
    }

    /// The configured root.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    fn scheme_root(&self, secure: Option<bool>) -> String {
        match secure {
            Some(true) => self.root.replacen("http://", "https://", 1),
            Some(false) => self.root.replacen("https://", "http://", 1),
            None => self.root.clone(),
        }
    }

    fn fill(pattern: &str, params: &[String]) -> String {
        let Ok(placeholder) = Regex::new(r"\{(\w+)(\?)?\}") else {
            return pattern.to_string();
        };

        let mut remaining = params.iter();
        let filled = placeholder.replace_all(pattern, |_: &regex::Captures<'_>| {
            remaining.next().cloned().unwrap_or_default()
        });

        let mut path: Vec<&str> = filled.split('/').filter(|s| !s.is_empty()).collect();
        let surplus: Vec<&String> = remaining.collect();
        path.extend(surplus.iter().map(|s| s.as_str()));
        path.join("/")
    }
}

/// True when `url` carries its own scheme and should not be resolved.
#[must_use]
pub fn is_absolute(url: &str) -> bool {
    Url::parse(url).is_ok()
}

impl UrlResolver for RouteTable {
    fn to(&self, path: &str, params: &[String], secure: Option<bool>) -> String {
        if is_absolute(path) {
            return path.to_string();
        }

        let tail = params.join("/");
        let path = format!("{}/{}", path, tail);
        let resolved =
            format!("{}/{}", self.scheme_root(secure), path.trim_matches('/')).trim_end_matches('/').to_string();
        trace!("Resolved path '{}' to '{}'", path, resolved);
        resolved
    }

    fn route(&self, name: &str, params: &[String]) -> Option<String> {
        let pattern = self.routes.get(name)?;
        Some(self.to(&Self::fill(pattern, params), &[], None))
    }

    fn action(&self, action: &str, params: &[String]) -> Option<String> {
        let pattern = self.actions.get(action)?;
        Some(self.to(&Self::fill(pattern, params), &[], None))
    }
}

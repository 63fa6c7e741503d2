//! Request context backed by a parsed URL.

use super::RequestContext;
use crate::core::MenuError;
use url::Url;

/// A request identified by its absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    url: Url,
}

impl Request {
    /// Parse an absolute URL such as `https://example.com/posts/5?tab=2`.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::InvalidUrl`] for relative or malformed input.
    pub fn parse(input: &str) -> Result<Self, MenuError> {
        let url = Url::parse(input).map_err(|e| MenuError::InvalidUrl {
            url: input.to_string(),
            reason: e.to_string(),
        })?;

        if url.cannot_be_a_base() {
            return Err(MenuError::InvalidUrl {
                url: input.to_string(),
                reason: "URL has no host or path hierarchy".to_string(),
            });
        }

        Ok(Self {
            url,
        })
    }

    /// Scheme, host and port: `https://example.com:8080`.
    #[must_use]
    pub fn root(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    /// The parsed URL.
    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.url
    }
}

impl RequestContext for Request {
    fn path(&self) -> String {
        let path = self.url.path().trim_matches('/');
        if path.is_empty() {
            "/".to_string()
        } else {
            path.to_string()
        }
    }

    fn url(&self) -> String {
        format!("{}{}", self.root(), self.url.path()).trim_end_matches('/').to_string()
    }

    fn full_url(&self) -> String {
        match self.url.query().filter(|q| !q.is_empty()) {
            Some(query) if self.url.path() == "/" => format!("{}/?{query}", self.url()),
            Some(query) => format!("{}?{query}", self.url()),
            None => self.url(),
        }
    }
}

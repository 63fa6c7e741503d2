//! Collaborators consulted while building and rendering menus.
//!
//! The menu engine never talks to a web framework directly. Everything it needs
//! from the outside world comes through four small traits:
//!
//! - [`RequestContext`] - the path and URL of the current request, used for activation
//! - [`UrlResolver`] - turns raw paths, named routes and actions into URLs
//! - [`IconResolver`] - looks up inline SVG markup for a logical icon path
//! - [`Actor`] - the current user (or guest), consulted by permission checks
//!
//! A [`MenuContext`] bundles one implementation of each and is handed to every
//! [`Builder`](crate::menu::Builder) at construction. The request must therefore be
//! known before the first item is added: items check whether they are active as soon
//! as they are created.
//!
//! Concrete implementations are provided for standalone use: [`Request`] parses an
//! absolute URL, [`RouteTable`] resolves against a base URL and a table of
//! `{param}` patterns, [`SvgDirectory`] serves icons from a directory of `.svg`
//! files, and [`Guest`]/[`User`] model the actor.
//!
//! ```rust
//! use navmenu::context::{MenuContext, RouteTable, User};
//!
//! # fn example() -> Result<(), navmenu::core::MenuError> {
//! let context = MenuContext::for_url("https://example.com/posts/5")?
//!     .with_urls(RouteTable::new("https://example.com").with_route("posts.show", "posts/{post}"))
//!     .with_actor(User::new("ada").with_role("admin"));
//!
//! assert_eq!(context.request.path(), "posts/5");
//! assert!(context.actor.has_role("admin"));
//! # Ok(())
//! # }
//! ```

mod actor;
mod icons;
mod request;
mod urls;

pub use actor::{Guest, User};
pub use icons::{SVG_ICON_SET, SvgDirectory, logical_name};
pub use request::Request;
pub use urls::{RouteTable, is_absolute};

use crate::core::MenuError;
use crate::html::Attributes;
use std::fmt;
use std::sync::Arc;

/// The current HTTP request, as far as activation is concerned.
pub trait RequestContext: Send + Sync {
    /// Request path without leading or trailing slashes; `"/"` for the site root.
    fn path(&self) -> String;

    /// Absolute URL without the query string and without a trailing slash.
    fn url(&self) -> String;

    /// [`url`](Self::url) followed by the query string, when there is one.
    fn full_url(&self) -> String;
}

/// URL generation for item targets.
///
/// Parameters are positional: they fill `{placeholders}` in route and action
/// patterns in order.
pub trait UrlResolver: Send + Sync {
    /// URL for a raw path. `secure` forces (`Some(true)`) or forbids (`Some(false)`)
    /// the `https` scheme; `None` keeps the configured scheme.
    fn to(&self, path: &str, params: &[String], secure: Option<bool>) -> String;

    /// URL for a named route, `None` if the route is unknown.
    fn route(&self, name: &str, params: &[String]) -> Option<String>;

    /// URL for a controller action, `None` if the action is unknown.
    fn action(&self, action: &str, params: &[String]) -> Option<String>;
}

/// Inline SVG lookup.
pub trait IconResolver: Send + Sync {
    /// Markup for the icon registered under `name`, with `attributes` applied to the
    /// root element.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::IconNotFound`] when no icon is registered under `name`.
    fn svg(&self, name: &str, attributes: &Attributes) -> Result<String, MenuError>;
}

/// The user a menu is rendered for.
pub trait Actor: Send + Sync {
    /// True when nobody is signed in.
    fn is_guest(&self) -> bool;

    /// Role membership (`admin`, `editor`, ...).
    fn has_role(&self, role: &str) -> bool;

    /// Named capability check.
    fn can(&self, ability: &str) -> bool;

    /// Permission within the actor's current team.
    fn has_team_permission(&self, permission: &str) -> bool;
}

/// Collaborators threaded into every builder.
#[derive(Clone)]
pub struct MenuContext {
    /// Current request
    pub request: Arc<dyn RequestContext>,
    /// URL generation
    pub urls: Arc<dyn UrlResolver>,
    /// SVG lookup; SVG decorations are omitted without one
    pub icons: Option<Arc<dyn IconResolver>>,
    /// Current user
    pub actor: Arc<dyn Actor>,
}

impl MenuContext {
    /// Context with the given request and URL resolver, a guest actor and no icons.
    pub fn new(request: impl RequestContext + 'static, urls: impl UrlResolver + 'static) -> Self {
        Self {
            request: Arc::new(request),
            urls: Arc::new(urls),
            icons: None,
            actor: Arc::new(Guest),
        }
    }

    /// Context for an absolute request URL, resolving paths against the same origin.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::InvalidUrl`] if `url` is not an absolute URL.
    pub fn for_url(url: &str) -> Result<Self, MenuError> {
        let request = Request::parse(url)?;
        let urls = RouteTable::new(request.root());
        Ok(Self::new(request, urls))
    }

    /// Replace the URL resolver.
    #[must_use]
    pub fn with_urls(mut self, urls: impl UrlResolver + 'static) -> Self {
        self.urls = Arc::new(urls);
        self
    }

    /// Install an icon resolver.
    #[must_use]
    pub fn with_icons(mut self, icons: impl IconResolver + 'static) -> Self {
        self.icons = Some(Arc::new(icons));
        self
    }

    /// Replace the current actor.
    #[must_use]
    pub fn with_actor(mut self, actor: impl Actor + 'static) -> Self {
        self.actor = Arc::new(actor);
        self
    }
}

impl fmt::Debug for MenuContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuContext")
            .field("path", &self.request.path())
            .field("icons", &self.icons.is_some())
            .field("guest", &self.actor.is_guest())
            .finish_non_exhaustive()
    }
}

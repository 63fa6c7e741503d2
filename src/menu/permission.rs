//! Visibility rules evaluated against the current actor at render time.

use crate::context::Actor;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::debug;

type Check = dyn Fn(&dyn Actor) -> anyhow::Result<bool> + Send + Sync;

/// Who may see an item.
///
/// Evaluation fails closed: a check that returns an error or panics hides the item.
///
/// ```rust
/// use navmenu::context::{Guest, User};
/// use navmenu::menu::Permission;
///
/// let admins = Permission::only_admins();
/// assert!(admins.is_allowed(&User::new("root").with_role("admin")));
/// assert!(!admins.is_allowed(&Guest));
///
/// let editors = Permission::from("posts.edit");
/// assert!(editors.is_allowed(&User::new("ada").with_ability("posts.edit")));
/// ```
#[derive(Clone)]
pub enum Permission {
    /// Fixed decision
    Allow(bool),
    /// Ability name checked with [`Actor::can`]
    Ability(String),
    /// Arbitrary predicate
    Check(Arc<Check>),
}

impl Default for Permission {
    fn default() -> Self {
        Self::Allow(true)
    }
}

impl Permission {
    /// Predicate that cannot fail.
    pub fn check(f: impl Fn(&dyn Actor) -> bool + Send + Sync + 'static) -> Self {
        Self::try_check(move |actor: &dyn Actor| Ok(f(actor)))
    }

    /// Predicate that may fail; an error denies access.
    pub fn try_check(f: impl Fn(&dyn Actor) -> anyhow::Result<bool> + Send + Sync + 'static) -> Self {
        Self::Check(Arc::new(f))
    }

    /// Signed-in users only.
    #[must_use]
    pub fn only_users() -> Self {
        Self::check(|actor| !actor.is_guest())
    }

    /// Guests only.
    #[must_use]
    pub fn only_guests() -> Self {
        Self::check(|actor| actor.is_guest())
    }

    /// Actors with the `admin` role.
    #[must_use]
    pub fn only_admins() -> Self {
        Self::check(|actor| actor.has_role("admin"))
    }

    /// Actors holding `permission` in their current team.
    pub fn has_team_permission(permission: impl Into<String>) -> Self {
        let permission = permission.into();
        Self::check(move |actor| actor.has_team_permission(&permission))
    }

    /// Evaluate against `actor`.
    #[must_use]
    pub fn is_allowed(&self, actor: &dyn Actor) -> bool {
        match self {
            Self::Allow(allowed) => *allowed,
            Self::Ability(ability) => actor.can(ability),
            Self::Check(check) => match panic::catch_unwind(AssertUnwindSafe(|| check(actor))) {
                Ok(Ok(allowed)) => allowed,
                Ok(Err(e)) => {
                    debug!("Permission check failed, hiding item: {e:#}");
                    false
                }
                Err(_) => {
                    debug!("Permission check panicked, hiding item");
                    false
                }
            },
        }
    }
}

impl From<bool> for Permission {
    fn from(allowed: bool) -> Self {
        Self::Allow(allowed)
    }
}

impl From<&str> for Permission {
    fn from(ability: &str) -> Self {
        Self::Ability(ability.to_string())
    }
}

impl From<String> for Permission {
    fn from(ability: String) -> Self {
        Self::Ability(ability)
    }
}

impl fmt::Debug for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allow(allowed) => f.debug_tuple("Allow").field(allowed).finish(),
            Self::Ability(ability) => f.debug_tuple("Ability").field(ability).finish(),
            Self::Check(_) => f.write_str("Check(..)"),
        }
    }
}

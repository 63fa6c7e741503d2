//! Actors a menu can be rendered for.

use super::Actor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Nobody is signed in. Every role, ability and team check fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Guest;

impl Actor for Guest {
    fn is_guest(&self) -> bool {
        true
    }

    fn has_role(&self, _role: &str) -> bool {
        false
    }

    fn can(&self, _ability: &str) -> bool {
        false
    }

    fn has_team_permission(&self, _permission: &str) -> bool {
        false
    }
}

/// A signed-in user with explicit role, ability and team permission sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Display name
    pub name: String,
    /// Role names
    #[serde(default)]
    pub roles: BTreeSet<String>,
    /// Ability names checked by [`Actor::can`]
    #[serde(default)]
    pub abilities: BTreeSet<String>,
    /// Permissions in the user's current team
    #[serde(default)]
    pub team_permissions: BTreeSet<String>,
}

impl User {
    /// A user with no roles or abilities.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    #[must_use]
    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.abilities.insert(ability.into());
        self
    }

    #[must_use]
    pub fn with_team_permission(mut self, permission: impl Into<String>) -> Self {
        self.team_permissions.insert(permission.into());
        self
    }
}

impl Actor for User {
    fn is_guest(&self) -> bool {
        false
    }

    fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    fn can(&self, ability: &str) -> bool {
        self.abilities.contains(ability)
    }

    fn has_team_permission(&self, permission: &str) -> bool {
        self.team_permissions.contains(permission)
    }
}

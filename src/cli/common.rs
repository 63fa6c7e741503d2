//! Input loading shared by the CLI commands.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Settings;
use crate::context::{MenuContext, SvgDirectory, User};
use crate::menu::{MenuDefinition, Registry};

/// Who the menu is rendered for. Without `--user` or `--role` the request is a guest's.
#[derive(Args, Debug, Clone, Default)]
pub struct ActorArgs {
    /// Render for a signed-in user with this name
    #[arg(long)]
    pub user: Option<String>,

    /// Role of the user (repeatable)
    #[arg(long = "role", value_name = "ROLE")]
    pub roles: Vec<String>,

    /// Ability of the user (repeatable)
    #[arg(long = "ability", value_name = "ABILITY")]
    pub abilities: Vec<String>,

    /// Team permission of the user (repeatable)
    #[arg(long = "team-permission", value_name = "PERMISSION")]
    pub team_permissions: Vec<String>,
}

impl ActorArgs {
    /// The signed-in user described by the flags, `None` for a guest.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        if self.user.is_none() && self.roles.is_empty() && self.abilities.is_empty() && self.team_permissions.is_empty()
        {
            return None;
        }

        let mut user = User::new(self.user.clone().unwrap_or_else(|| "user".to_string()));
        for role in &self.roles {
            user = user.with_role(role);
        }
        for ability in &self.abilities {
            user = user.with_ability(ability);
        }
        for permission in &self.team_permissions {
            user = user.with_team_permission(permission);
        }
        Some(user)
    }
}

/// Built-in settings, or a settings file merged over them.
///
/// # Errors
///
/// Fails when the file cannot be read or parsed.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => {
            Settings::load(path).with_context(|| format!("Failed to load settings from {}", path.display()))
        }
        None => Ok(Settings::default()),
    }
}

/// Request context for `url`, with icons from the configured `svg_path` when it exists.
///
/// A relative `svg_path` is resolved against `base_dir`, the directory of the settings
/// file.
///
/// # Errors
///
/// Fails for a relative or malformed URL and for an icon directory that cannot be read.
pub fn build_context(url: &str, settings: &Settings, base_dir: &Path, actor: &ActorArgs) -> Result<MenuContext> {
    let mut context = MenuContext::for_url(url).with_context(|| format!("Cannot render for request '{url}'"))?;

    if let Some(svg_path) = settings.svg_path() {
        let dir = base_dir.join(svg_path);
        if dir.is_dir() {
            let icons = SvgDirectory::open(&dir)
                .with_context(|| format!("Failed to index SVG icons in {}", dir.display()))?;
            debug!("Indexed {} SVG icons in {}", icons.len(), dir.display());
            context = context.with_icons(icons);
        } else {
            debug!("SVG directory {} does not exist; SVG icons are omitted", dir.display());
        }
    }

    Ok(match actor.user() {
        Some(user) => context.with_actor(user),
        None => context,
    })
}

/// Definition, settings and request, ready to build menus from.
#[derive(Debug)]
pub struct MenuInputs {
    pub definition_path: PathBuf,
    pub definition: MenuDefinition,
    pub registry: Registry,
}

impl MenuInputs {
    /// Load the definition and settings files and prepare a registry for `url`.
    ///
    /// # Errors
    ///
    /// Fails when a file cannot be loaded or the URL is not absolute.
    pub fn load(definition: &Path, settings: Option<&Path>, url: &str, actor: &ActorArgs) -> Result<Self> {
        let parsed = MenuDefinition::load(definition)
            .with_context(|| format!("Failed to load menu definition from {}", definition.display()))?;
        let loaded = load_settings(settings)?;

        let base_dir = settings
            .and_then(Path::parent)
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        let context = build_context(url, &loaded, &base_dir, actor)?;

        Ok(Self {
            definition_path: definition.to_path_buf(),
            definition: parsed,
            registry: Registry::new(loaded, context),
        })
    }

    /// Build the defined menu into the registry and return its name.
    ///
    /// # Errors
    ///
    /// Fails when an entry of the definition cannot be built.
    pub fn build(&mut self) -> Result<String> {
        let definition = &self.definition;
        let mut built = Ok(());
        self.registry.make(&definition.name, |menu| built = definition.build(menu));
        built.with_context(|| {
            format!("Failed to build menu '{}' from {}", definition.name, self.definition_path.display())
        })?;
        Ok(definition.name.clone())
    }
}

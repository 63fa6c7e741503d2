//! Render a menu to HTML.
//!
//! # Examples
//!
//! ```bash
//! navmenu render menu.toml --url https://example.com/about
//! navmenu render menu.yaml --url https://example.com/about --view sub --format div --class nav
//! navmenu render menu.toml --url https://example.com/ --parent settings-dropdown
//! ```

use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use tracing::debug;

use super::common::{ActorArgs, MenuInputs};
use crate::html::Attributes;
use crate::menu::{Builder, RenderOptions};

/// Outer element of the rendered menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum ListTag {
    /// `<ul>` with `<li>` rows
    #[default]
    Ul,
    /// `<ol>` with `<li>` rows
    Ol,
    /// `<div>` with `<div>` rows
    Div,
}

impl ListTag {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ul => "ul",
            Self::Ol => "ol",
            Self::Div => "div",
        }
    }
}

/// Which part of the menu to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum View {
    /// Every item
    #[default]
    Full,
    /// Top-level items only
    Top,
    /// Children of the active item
    Sub,
    /// The active item and its siblings
    Sibling,
    /// Breadcrumbs ending with the active item
    Crumb,
}

/// Command to print the markup of a menu.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Menu definition file (TOML, or YAML with a `.yaml`/`.yml` extension)
    definition: PathBuf,

    /// Absolute URL of the request the menu is rendered for
    #[arg(short, long)]
    url: String,

    /// Settings file merged over the built-in defaults
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Outer list element
    #[arg(short, long, value_enum, default_value_t = ListTag::Ul)]
    format: ListTag,

    /// Part of the menu to render
    #[arg(long, value_enum, default_value_t = View::Full)]
    view: View,

    /// Class of the outer element
    #[arg(long)]
    class: Option<String>,

    /// Render only the items below the item with this id, without the outer element
    #[arg(long, conflicts_with = "view")]
    parent: Option<String>,

    #[command(flatten)]
    actor: ActorArgs,
}

impl RenderCommand {
    /// Render and print the menu.
    ///
    /// # Errors
    ///
    /// Fails when the inputs cannot be loaded, the menu cannot be built or its
    /// structure loops.
    pub fn execute(self) -> Result<()> {
        let html = self.render()?;
        println!("{html}");
        Ok(())
    }

    /// The markup [`execute`](Self::execute) prints.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn render(&self) -> Result<String> {
        let mut inputs = MenuInputs::load(&self.definition, self.settings.as_deref(), &self.url, &self.actor)?;
        let name = inputs.build()?;
        let menu = inputs.registry.get(&name)?;

        if let Some(parent) = &self.parent {
            return Ok(menu.render(self.format.as_str(), Some(parent.as_str()), RenderOptions::new())?);
        }

        let view = self.view(menu)?;
        let menu = view.as_ref().unwrap_or(menu);
        debug!("Rendering {:?} view of menu '{}' ({} items)", self.view, name, menu.len());

        let mut attributes = Attributes::new();
        if let Some(class) = &self.class {
            attributes.set("class", class.clone());
        }

        let html = match self.format {
            ListTag::Ul => menu.as_ul(&attributes, RenderOptions::new())?,
            ListTag::Ol => menu.as_ol(&attributes, RenderOptions::new())?,
            ListTag::Div => menu.as_div(&attributes, RenderOptions::new())?,
        };
        Ok(html)
    }

    /// The derived menu for the selected view, `None` for the full menu.
    fn view(&self, menu: &Builder) -> Result<Option<Builder>> {
        Ok(match self.view {
            View::Full => None,
            View::Top => Some(menu.top_menu()),
            View::Sub => Some(menu.sub_menu()),
            View::Sibling => Some(menu.sibling_menu()),
            View::Crumb => Some(menu.crumb_menu()?),
        })
    }
}

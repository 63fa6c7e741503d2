//! Test fixtures for menu definition and settings files

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Test fixture for menu definition files
#[derive(Clone, Debug)]
pub struct DefinitionFixture {
    /// File name, including the extension that selects the format
    pub name: String,
    pub content: String,
}

impl DefinitionFixture {
    /// Home, About with two children, a Settings dropdown and an admin-only group
    pub fn basic() -> Self {
        Self {
            name: "menu.toml".to_string(),
            content: r#"
name = "main"

[[items]]
title = "Home"
url = "/"

[[items]]
title = "About"
url = "about"
class = "nav-about"
data = { section = "company" }

[[items.children]]
title = "Team"
url = "about/team"

[[items.children]]
title = "History"
url = "about/history"

[[items]]
title = "Settings"
kind = "dropdown"

[[items.children]]
title = "General"
url = "settings/general"

[[items]]
group = { prefix = "admin", class = "admin" }

[[items.items]]
title = "Dashboard"
url = "dashboard"
only = "admins"
"#
            .trim()
            .to_string(),
        }
    }

    /// The same menu as [`basic`](Self::basic), written in YAML
    pub fn yaml() -> Self {
        Self {
            name: "menu.yaml".to_string(),
            content: r#"
name: main
items:
  - title: Home
    url: /
  - title: About
    url: about
    class: nav-about
    data:
      section: company
    children:
      - title: Team
        url: about/team
      - title: History
        url: about/history
  - title: Settings
    kind: dropdown
    children:
      - title: General
        url: settings/general
  - group:
      prefix: admin
      class: admin
    items:
      - title: Dashboard
        url: dashboard
        only: admins
"#
            .trim()
            .to_string(),
        }
    }

    /// Posts menu with RESTful activation switched on through the `options` table
    pub fn restful() -> Self {
        Self {
            name: "posts.toml".to_string(),
            content: r#"
name = "posts"

[options]
restful = true

[[items]]
title = "Posts"
url = "posts"

[[items]]
title = "Post 5"
url = "posts/5"
"#
            .trim()
            .to_string(),
        }
    }

    /// A plain link declaring a dropdown type
    pub fn invalid() -> Self {
        Self {
            name: "invalid.toml".to_string(),
            content: r#"
name = "main"

[[items]]
title = "Home"
url = "/"
dropdown_type = "a"
"#
            .trim()
            .to_string(),
        }
    }

    /// Not a menu definition at all
    pub fn malformed() -> Self {
        Self {
            name: "malformed.toml".to_string(),
            content: "[[items]\ntitle = ".to_string(),
        }
    }

    /// Write the fixture into `dir`, returning its path
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.name);
        fs::write(&path, &self.content)?;
        Ok(path)
    }
}

/// Test fixture for settings files
#[derive(Clone, Debug)]
pub struct SettingsFixture {
    pub name: String,
    pub content: String,
}

impl SettingsFixture {
    /// Icon family, an inactive class for every menu and a custom active class for `main`
    pub fn basic() -> Self {
        Self {
            name: "navmenu.toml".to_string(),
            content: r#"
[config]
icon_family = "fa"

[menus.default]
inactive_class = "inactive"

[menus.main]
active_class = "current"
"#
            .trim()
            .to_string(),
        }
    }

    /// Write the fixture into `dir`, returning its path
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.name);
        fs::write(&path, &self.content)?;
        Ok(path)
    }
}

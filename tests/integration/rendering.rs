use anyhow::Result;
use navmenu::context::MenuContext;
use navmenu::html::Attributes;
use navmenu::menu::{Builder, ItemOptions, RenderOptions};
use navmenu::test_utils::{self, MemoryIcons};
use serde_json::json;

/// A typical site navigation: plain links, a nested section and a dropdown
#[test]
fn test_site_navigation_markup() -> Result<()> {
    test_utils::init_test_logging(None);
    let mut menu = test_utils::builder("about/team");
    menu.add("Home", "/");
    let mut about = menu.add("About", "about").attr("class", "nav-about");
    about.add("Team", "about/team");
    menu.dropdown("Account", ItemOptions::new(), |account| {
        account.add("Profile", "account/profile");
        account.add("Sign out", "logout").divide(Attributes::new());
    });

    let html = menu.as_ul(&Attributes::from([("class", "navbar-nav")]), RenderOptions::new())?;
    assert_eq!(
        html,
        concat!(
            r#"<ul class="navbar-nav">"#,
            r#"<li><a href="https://example.com">Home</a></li>"#,
            r#"<li class="nav-about active"><a href="https://example.com/about">About</a>"#,
            r#"<ul><a href="https://example.com/about/team">Team</a></ul></li>"#,
            r#"<li class="dropdown dropdown-item">"#,
            r#"<button type="button" data-toggle="dropdown" aria-haspopup="true" aria-expanded="false">Account</button>"#,
            r#"<ul aria-labelledby="dropdownMenuButton">"#,
            r#"<a href="https://example.com/account/profile">Profile</a>"#,
            r#"<a href="https://example.com/logout">Sign out</a><li class="divider"></li>"#,
            r#"</ul></li></ul>"#,
        )
    );
    Ok(())
}

/// The after-item hook can style links per item, like a templating layer would
#[test]
fn test_render_hook_adds_link_classes() -> Result<()> {
    let mut menu = test_utils::builder("blog");
    menu.add("Home", "/");
    menu.add("Blog", "blog");

    let options = RenderOptions::new()
        .item_attributes(Attributes::from([("class", "nav-item")]))
        .after_item(|item, scope| {
            scope.link_attributes.set("class", "nav-link");
            if item.is_active() {
                scope.link_attributes.set("aria-current", "page");
            }
        });
    let html = menu.as_ul(&Attributes::new(), options)?;

    assert!(html.contains(r#"<li class="nav-item"><a class="nav-link" href="https://example.com">Home</a></li>"#));
    assert!(html.contains(
        r#"<li class="active nav-item"><a class="nav-link" aria-current="page" href="https://example.com/blog">Blog</a></li>"#
    ));
    Ok(())
}

/// Icons and inline SVGs decorate titles when configured
#[test]
fn test_icon_decorations() -> Result<()> {
    let settings = test_utils::settings(&json!({
        "config": { "icon_family": "bi", "svg_path": "icons", "svg_attributes": { "class": "svg-icon" } }
    }));
    let context: MenuContext =
        test_utils::context("/").with_icons(MemoryIcons::new().with_icon("brand/logo", "<circle/>"));
    let mut menu = Builder::new("main", settings, context);
    menu.add("Home", "/").icon("bi-house").append_svg("brand/logo");

    let html = menu.as_div(&Attributes::new(), RenderOptions::new())?;
    assert_eq!(
        html,
        r#"<div><div class="active"><a href="https://example.com"><i class="bi bi-house"></i>Home<svg class="svg-icon"><circle/></svg></a></div></div>"#
    );
    Ok(())
}

/// Items hidden from the actor take their whole subtree with them
#[test]
fn test_permissions_by_actor() -> Result<()> {
    let build = |context: MenuContext| {
        let mut menu = Builder::new("main", test_utils::settings(&json!({})), context);
        menu.add("Home", "/");
        menu.add("Sign in", "login").only_guests();
        let mut admin = menu.add("Admin", "admin").only_admins();
        admin.add("Users", "admin/users");
        menu.add("Billing", "billing").has_team_permission("billing:view");
        menu
    };

    let guest = build(test_utils::context("/")).as_ul(&Attributes::new(), RenderOptions::new())?;
    assert!(guest.contains("Sign in"));
    assert!(!guest.contains("Admin"));
    assert!(!guest.contains("Users"));
    assert!(!guest.contains("Billing"));

    let admin = build(test_utils::context("/").with_actor(test_utils::admin()))
        .as_ul(&Attributes::new(), RenderOptions::new())?;
    assert!(!admin.contains("Sign in"));
    assert!(admin.contains("Users"));

    let member = build(test_utils::context("/").with_actor(test_utils::member().with_team_permission("billing:view")))
        .as_ul(&Attributes::new(), RenderOptions::new())?;
    assert!(member.contains("Billing"));
    assert!(!member.contains("Admin"));
    Ok(())
}

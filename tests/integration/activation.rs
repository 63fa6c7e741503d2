use anyhow::Result;
use navmenu::html::Attributes;
use navmenu::menu::{Builder, ItemOptions, RenderOptions};
use navmenu::test_utils;
use serde_json::json;

/// Docs section with two levels below it
fn docs_menu(path: &str) -> Builder {
    let mut menu = test_utils::builder(path);
    menu.add("Home", "/");
    let mut docs = menu.add("Docs", "docs");
    let mut guide = docs.add("Guide", "docs/guide");
    guide.add("Install", "docs/guide/install");
    guide.add("Configure", "docs/guide/configure");
    docs.add("API", "docs/api");
    menu.add("Blog", "blog");
    menu
}

fn titles(menu: &Builder) -> Vec<String> {
    menu.all().iter().map(|item| item.title().to_string()).collect()
}

#[test]
fn test_active_item_marks_whole_chain() {
    let menu = docs_menu("docs/guide/install");

    assert_eq!(menu.active().map(|item| item.title()), Some("Install"));
    let marked: Vec<&str> = menu
        .where_field("is_active", &json!(true), false)
        .iter()
        .map(|item| item.title())
        .collect();
    assert_eq!(marked, ["Docs", "Guide", "Install"]);
}

#[test]
fn test_views_follow_the_active_item() -> Result<()> {
    let menu = docs_menu("docs/guide");

    assert_eq!(titles(&menu.top_menu()), ["Home", "Docs", "Blog"]);
    assert_eq!(titles(&menu.sub_menu()), ["Install", "Configure"]);
    assert_eq!(titles(&menu.sibling_menu()), ["Guide", "API"]);
    assert_eq!(titles(&menu.crumb_menu()?), ["Docs", "Guide"]);

    // Copies run through activation again against the same request.
    let crumbs = menu.crumb_menu()?;
    assert_eq!(crumbs.active().map(|item| item.title()), Some("Guide"));
    assert_eq!(
        crumbs.as_ol(&Attributes::from([("class", "breadcrumb")]), RenderOptions::new())?,
        concat!(
            r#"<ol class="breadcrumb"><li><a href="https://example.com/docs">Docs</a></li>"#,
            r#"<li class="active"><a href="https://example.com/docs/guide">Guide</a></li></ol>"#,
        )
    );
    Ok(())
}

#[test]
fn test_views_without_active_item() -> Result<()> {
    let menu = docs_menu("contact");

    assert!(menu.sub_menu().is_empty());
    assert!(menu.crumb_menu()?.is_empty());
    assert_eq!(titles(&menu.sibling_menu()), ["Home", "Docs", "Blog"]);
    Ok(())
}

#[test]
fn test_restful_section_highlighting() {
    let mut menu = test_utils::builder_with("posts/12/comments", &json!({ "menus": { "main": { "restful": true } } }));
    menu.add("Posts", "posts");
    menu.add("Postcards", "postcards");
    let mut admin = menu.add("Admin", "admin");
    admin.add("Posts", ItemOptions::from("admin/posts").with_nickname("adminPosts"));

    assert!(menu.get("posts").is_some_and(|item| item.is_active()));
    assert!(!menu.get("postcards").is_some_and(|item| item.is_marked_active()));
    assert!(!menu.get("admin").is_some_and(|item| item.is_marked_active()));
    assert_eq!(menu.where_active(true).len(), 1);
}

#[test]
fn test_request_query_does_not_prevent_activation() {
    let menu = docs_menu("docs/api?version=2");
    assert_eq!(menu.active().map(|item| item.title()), Some("API"));
}
